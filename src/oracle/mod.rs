//! Oracle module - Gold reference price with last-known-good fallback
//!
//! Fetches the spot gold price per troy ounce, converts it to a price per
//! gram, and caches it. A failed fetch never surfaces to the caller: the
//! cached value (or the configured startup fallback) is returned instead.

mod decode;
pub mod sources;

pub use decode::{decode_spot_price, DecodeStrategy, DEFAULT_STRATEGIES};
pub use sources::{HttpSpotFeed, SpotFeed};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::config::OracleConfig;
use crate::error::{DecodeError, FeedError, OracleError};

/// Grams per troy ounce
pub const TROY_OUNCE_GRAMS: Decimal = dec!(31.1034768);

/// Price per gram served before the first successful fetch
pub const DEFAULT_FALLBACK_PRICE_PER_GRAM: Decimal = dec!(125.00);

/// Spot gold endpoint, reports USD per troy ounce
pub const DEFAULT_FEED_URL: &str = "https://api.metals.live/v1/spot/gold";

/// Default upper bound on a single feed request
pub const DEFAULT_FEED_TIMEOUT: Duration = Duration::from_secs(5);

/// Cached reference price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceSnapshot {
    pub price_per_gram: Decimal,
    /// None until the first successful fetch
    pub updated_at: Option<DateTime<Utc>>,
}

/// Gold price oracle shared by all requests
pub struct PriceOracle {
    feed: Arc<dyn SpotFeed>,
    strategies: Vec<DecodeStrategy>,
    timeout: Duration,
    cache: RwLock<ReferenceSnapshot>,
}

impl PriceOracle {
    pub fn new(feed: Arc<dyn SpotFeed>, fallback_per_gram: Decimal, timeout: Duration) -> Self {
        Self {
            feed,
            strategies: DEFAULT_STRATEGIES.to_vec(),
            timeout,
            cache: RwLock::new(ReferenceSnapshot {
                price_per_gram: fallback_per_gram,
                updated_at: None,
            }),
        }
    }

    /// Build an oracle backed by the HTTP feed described in `config`
    pub fn from_config(config: &OracleConfig) -> Result<Self, FeedError> {
        let timeout = Duration::from_millis(config.timeout_ms);
        let feed = HttpSpotFeed::new(&config.feed_url, timeout)?;
        Ok(Self::new(
            Arc::new(feed),
            config.fallback_price_per_gram,
            timeout,
        ))
    }

    /// Replace the decoding chain
    pub fn with_strategies(mut self, strategies: Vec<DecodeStrategy>) -> Self {
        self.strategies = strategies;
        self
    }

    /// Current gold price per gram. Attempts one live fetch; on any failure
    /// returns the cached value unchanged. Never fails.
    pub async fn reference_price_per_gram(&self) -> Decimal {
        match self.fetch_price_per_gram().await {
            Ok(price_per_gram) => {
                let mut cache = self.cache.write().await;
                *cache = ReferenceSnapshot {
                    price_per_gram,
                    updated_at: Some(Utc::now()),
                };
                price_per_gram
            }
            Err(e) => {
                let cached = self.cache.read().await.price_per_gram;
                tracing::warn!(
                    feed = self.feed.name(),
                    error = %e,
                    fallback_per_gram = %cached,
                    "Failed to fetch gold price, using cached value"
                );
                cached
            }
        }
    }

    pub fn feed_name(&self) -> &'static str {
        self.feed.name()
    }

    /// Cached value without touching the feed
    pub async fn snapshot(&self) -> ReferenceSnapshot {
        *self.cache.read().await
    }

    async fn fetch_price_per_gram(&self) -> Result<Decimal, OracleError> {
        let body = tokio::time::timeout(self.timeout, self.feed.fetch())
            .await
            .map_err(|_| FeedError::Timeout(self.timeout.as_millis() as u64))??;

        tracing::debug!(
            feed = self.feed.name(),
            body = %String::from_utf8_lossy(&body),
            "Gold feed response"
        );

        let (strategy, per_ounce) = decode_spot_price(&body, &self.strategies)?;

        // divisor is a constant > 1, so this cannot overflow
        let per_gram = per_ounce / TROY_OUNCE_GRAMS;
        // below 1e-27 per ounce the quotient rounds to zero at 28 digits
        if per_gram.is_zero() {
            return Err(DecodeError::NonPositive(per_gram).into());
        }

        tracing::info!(
            strategy = strategy.name(),
            per_ounce = %per_ounce,
            per_gram = %per_gram.round_dp(4),
            "Gold price updated"
        );

        Ok(per_gram)
    }
}
