//! HTTP spot price feed
//!
//! Single GET against the configured endpoint. No retries: the oracle falls
//! back to its cached value instead.

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    Client,
};
use std::time::Duration;

use crate::error::FeedError;
use crate::oracle::sources::SpotFeed;

#[derive(Debug, Clone)]
pub struct HttpSpotFeed {
    client: Client,
    url: String,
}

impl HttpSpotFeed {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, FeedError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(FeedError::Client)?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SpotFeed for HttpSpotFeed {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch(&self) -> Result<Vec<u8>, FeedError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(FeedError::Unavailable)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(FeedError::Unavailable)?;
        Ok(body.to_vec())
    }
}
