//! HTTP client for the external scraper service.
//!
//! Any transport failure, non-2xx status or unreadable body becomes
//! `AppError::Upstream`; the router maps that to 502.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

use common::{AppError, AppResult, ScraperConfig};
use domain::{
    ScraperHealth, ScraperState, SCRAPER_HEALTH_PATH, SCRAPER_STATUS_PATH, SCRAPER_TRIGGER_PATH,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ScraperGateway: Send + Sync {
    async fn health_check(&self) -> AppResult<ScraperHealth>;

    async fn state(&self) -> AppResult<ScraperState>;

    /// Ask the scraper to start a run; returns the state it reports back.
    async fn trigger(&self) -> AppResult<ScraperState>;
}

pub struct ScraperClient {
    http: Client,
    base_url: String,
}

impl ScraperClient {
    pub fn new(config: &ScraperConfig) -> AppResult<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build scraper client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, path: &str) -> AppResult<T> {
        let response = request
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("{} request failed: {}", path, e)))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(path, %status, "Scraper returned an error status");
            return Err(AppError::upstream(format!("{} returned {}", path, status)));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::upstream(format!("{} returned an unreadable body: {}", path, e)))
    }
}

#[async_trait]
impl ScraperGateway for ScraperClient {
    async fn health_check(&self) -> AppResult<ScraperHealth> {
        let request = self.http.get(self.url(SCRAPER_HEALTH_PATH));
        self.send(request, SCRAPER_HEALTH_PATH).await
    }

    async fn state(&self) -> AppResult<ScraperState> {
        let request = self.http.get(self.url(SCRAPER_STATUS_PATH));
        self.send(request, SCRAPER_STATUS_PATH).await
    }

    async fn trigger(&self) -> AppResult<ScraperState> {
        let request = self
            .http
            .post(self.url(SCRAPER_TRIGGER_PATH))
            .header(CONTENT_TYPE, "application/json");
        let state: ScraperState = self.send(request, SCRAPER_TRIGGER_PATH).await?;

        tracing::info!(status = ?state.status, "Scraper run triggered");
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = ScraperClient::new(&ScraperConfig {
            base_url: "http://scraper:7071/".to_string(),
            timeout_secs: 1,
        })
        .unwrap();

        assert_eq!(client.url("/status"), "http://scraper:7071/status");
    }
}
