use crate::error::{BrowserError, Result};
use crate::renderer::{PageRenderer, PageSession, ScrollPolicy};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures_util::stream::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Headless browser rendering engine backed by chromiumoxide.
#[derive(Debug, Clone)]
pub struct BrowserEngine {
    headless: bool,
}

impl BrowserEngine {
    /// Create a new engine with headless mode enabled.
    #[must_use]
    pub fn new() -> Self {
        Self { headless: true }
    }

    /// Set headless mode.
    #[must_use]
    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }
}

impl Default for BrowserEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PageRenderer for BrowserEngine {
    async fn launch(&self) -> Result<Box<dyn PageSession>> {
        let mut builder = BrowserConfig::builder().no_sandbox();
        if !self.headless {
            builder = builder.with_head();
        }
        let config = builder
            .build()
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        // Drive the CDP message loop for the lifetime of the session.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::Launch(format!("failed to open page: {e}")))?;

        tracing::info!("Browser session launched (headless: {})", self.headless);

        Ok(Box::new(ChromiumSession {
            browser,
            page,
            handler_task,
        }))
    }
}

/// One live chromium session: the browser process, a single page, and
/// the spawned CDP handler loop.
struct ChromiumSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
}

/// Build the scroll step script for a container selector.
///
/// The selector is embedded in single quotes, so it may freely contain
/// double quotes (e.g. attribute selectors).
fn scroll_script(selector: &str, distance_px: u32) -> String {
    format!(
        "(() => {{ const el = document.querySelector('{selector}'); if (el) {{ el.scrollBy(0, {distance_px}); }} }})()"
    )
}

#[async_trait::async_trait]
impl PageSession for ChromiumSession {
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<()> {
        tracing::info!("Navigating: {}", url);

        let navigation = async {
            self.page
                .goto(url)
                .await
                .map_err(|e| BrowserError::Navigation(e.to_string()))?;
            self.page
                .wait_for_navigation()
                .await
                .map_err(|e| BrowserError::Navigation(e.to_string()))?;
            Ok(())
        };

        tokio::time::timeout(timeout, navigation)
            .await
            .map_err(|_| BrowserError::Timeout(format!("navigation to {url} timed out")))?
    }

    async fn scroll_feed(&self, selector: &str, policy: &ScrollPolicy) -> Result<()> {
        let script = scroll_script(selector, policy.distance_px);

        for step in 0..policy.steps {
            self.page
                .evaluate(script.as_str())
                .await
                .map_err(|e| BrowserError::Evaluation(format!("scroll step {step}: {e}")))?;
            tokio::time::sleep(policy.delay).await;
        }

        tracing::debug!(
            "Scrolled '{}' {} times by {}px",
            selector,
            policy.steps,
            policy.distance_px
        );
        Ok(())
    }

    async fn snapshot(&self) -> Result<String> {
        self.page
            .content()
            .await
            .map_err(|e| BrowserError::Chromium(format!("failed to snapshot page: {e}")))
    }

    async fn close(self: Box<Self>) -> Result<()> {
        let mut this = *self;

        if let Err(e) = this.page.close().await {
            tracing::warn!("Failed to close page: {}", e);
        }

        this.browser
            .close()
            .await
            .map_err(|e| BrowserError::Chromium(format!("failed to close browser: {e}")))?;
        let _ = this.browser.wait().await;
        this.handler_task.abort();

        tracing::info!("Browser session closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_script_embeds_selector_and_distance() {
        let script = scroll_script(r#"div[role="feed"]"#, 1000);
        assert!(script.contains(r#"document.querySelector('div[role="feed"]')"#));
        assert!(script.contains("scrollBy(0, 1000)"));
    }

    #[test]
    fn test_engine_headless_default() {
        let engine = BrowserEngine::new();
        assert!(engine.headless);

        let headed = BrowserEngine::new().with_headless(false);
        assert!(!headed.headless);
    }
}
