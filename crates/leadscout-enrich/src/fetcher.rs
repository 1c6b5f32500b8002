use crate::enricher::WebsiteEnricher;
use crate::error::{FetchError, Result};
use crate::parser::parse_website_details;
use leadscout_core::WebsiteDetails;
use reqwest::Client;
use std::time::Duration;

/// Reqwest-backed website enricher.
///
/// Each fetch is bounded only by the client timeout; there is no retry
/// or backoff on failure.
#[derive(Debug, Clone)]
pub struct SiteFetcher {
    client: Client,
}

impl SiteFetcher {
    /// Build a fetcher with the given per-request timeout.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl WebsiteEnricher for SiteFetcher {
    async fn fetch(&self, url: &str) -> Result<WebsiteDetails> {
        tracing::debug!("Fetching website: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                code: status.as_u16(),
            });
        }

        let body = response.text().await?;
        Ok(parse_website_details(&body, url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetcher_creation() {
        let fetcher = SiteFetcher::new(Duration::from_secs(30));
        assert!(fetcher.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_is_request_error() {
        let fetcher = SiteFetcher::new(Duration::from_millis(200)).expect("create fetcher");

        // Reserved TEST-NET address; connection fails or times out.
        let result = fetcher.fetch("http://192.0.2.1/").await;
        assert!(matches!(result, Err(FetchError::Request(_))));
    }
}
