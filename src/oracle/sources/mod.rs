//! Spot price feed implementations

mod http;

pub use http::HttpSpotFeed;

use async_trait::async_trait;

use crate::error::FeedError;

/// Trait for spot price feeds
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpotFeed: Send + Sync {
    /// Get the feed name (used in logs)
    fn name(&self) -> &'static str;

    /// Perform one request and return the raw response body
    async fn fetch(&self) -> Result<Vec<u8>, FeedError>;
}
