use crate::error::Result;
use std::time::Duration;

/// Fixed-step scrolling policy used to trigger lazy-loaded content.
///
/// The loop scrolls a container element `steps` times by `distance_px`,
/// pausing `delay` between steps. It does not wait on a load-completion
/// signal; the pauses are the only synchronization with content growth.
#[derive(Debug, Clone)]
pub struct ScrollPolicy {
    /// Number of scroll steps
    pub steps: u32,
    /// Scroll distance per step in pixels
    pub distance_px: u32,
    /// Pause between steps
    pub delay: Duration,
}

/// Capability to open rendering sessions.
#[async_trait::async_trait]
pub trait PageRenderer: Send + Sync {
    /// Launch a new rendering session.
    async fn launch(&self) -> Result<Box<dyn PageSession>>;
}

/// One exclusive rendering session over a single page.
///
/// Sessions must be released exactly once via [`PageSession::close`],
/// on success and error paths alike.
#[async_trait::async_trait]
pub trait PageSession: Send + Sync {
    /// Navigate to a URL, failing if the page does not load within `timeout`.
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<()>;

    /// Scroll the container matched by `selector` per the policy, to
    /// trigger lazy-loaded results.
    async fn scroll_feed(&self, selector: &str, policy: &ScrollPolicy) -> Result<()>;

    /// Snapshot the current DOM as an HTML string.
    async fn snapshot(&self) -> Result<String>;

    /// Release the session and its browser resources.
    async fn close(self: Box<Self>) -> Result<()>;
}
