//! External collaborators: price data sources and their cache.

pub mod cache;
pub mod market_data;
pub mod yahoo;

pub use cache::{CacheKey, CachedPriceSource};
pub use market_data::{InMemoryPriceSource, MarketDataError, PriceSource};
pub use yahoo::YahooPriceSource;
