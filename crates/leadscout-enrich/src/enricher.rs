use crate::error::Result;
use leadscout_core::WebsiteDetails;

/// Capability to fetch and parse a business's own website into
/// structured detail fields.
#[async_trait::async_trait]
pub trait WebsiteEnricher: Send + Sync {
    /// Fetch `url` and extract website details.
    ///
    /// # Errors
    /// Returns [`crate::FetchError`] on timeout, network failure, or a
    /// non-success HTTP status. Parsing itself is total and never fails.
    async fn fetch(&self, url: &str) -> Result<WebsiteDetails>;
}
