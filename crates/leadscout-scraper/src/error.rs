//! Error types for the scrape pipeline.

use thiserror::Error;

/// Fatal pipeline errors.
///
/// Only browser-stage failures abort a run; enrichment and persistence
/// failures are recorded per record in the run summary instead.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// A browser stage (launch, navigate, scroll, snapshot) failed
    #[error("browser error: {0}")]
    Browser(#[from] leadscout_browser::BrowserError),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, ScrapeError>;
