//! Yahoo Finance daily price source

pub mod client;

pub use client::{YahooPriceSource, DEFAULT_BASE_URL};
