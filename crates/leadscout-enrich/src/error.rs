use thiserror::Error;

pub type Result<T> = std::result::Result<T, FetchError>;

/// Per-candidate enrichment failure.
///
/// These errors are recovered by the scheduler: they are recorded for
/// the run summary and never abort a batch.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to create HTTP client: {0}")]
    Client(String),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status {code} from {url}")]
    Status { url: String, code: u16 },
}
