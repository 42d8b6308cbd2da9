//! API response types

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Envelope for non-catalog responses and errors
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

/// GET /api/health payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    /// Cached gold price per gram
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub gold_price_per_gram: rust_decimal::Decimal,
    /// Last successful feed fetch, None while serving the startup fallback
    pub gold_price_updated_at: Option<DateTime<Utc>>,
    pub gold_feed: &'static str,
    pub catalog_source: &'static str,
}
