//! Signal detection over computed indicator tables.

pub mod crossover;

pub use crossover::*;
