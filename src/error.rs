//! Error types for the pricing core.
//!
//! None of these reach an HTTP client: the oracle and the catalog source
//! collapse them into fallback values and only log them.

use rust_decimal::Decimal;
use thiserror::Error;

/// Transport-level failure talking to the spot price feed.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Feed client setup failed: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Feed unavailable: {0}")]
    Unavailable(#[source] reqwest::Error),

    #[error("Feed returned HTTP {0}")]
    Status(u16),

    #[error("Feed timed out after {0} ms")]
    Timeout(u64),
}

/// A feed body no decoding strategy could turn into a usable price.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Invalid JSON for {strategy}: {source}")]
    Json {
        strategy: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Empty spot price array")]
    EmptyArray,

    #[error("Non-positive spot price: {0}")]
    NonPositive(Decimal),

    #[error("No decoding strategy matched: {0}")]
    Unrecognized(String),
}

/// Why a live reference price could not be produced.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Catalog file could not be read or decoded.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog decode failed: {0}")]
    Json(#[from] serde_json::Error),
}
