//! Scrape run orchestration.
//!
//! Drives one run through its stages: launch a browser session, render
//! and scroll the search page, snapshot the markup, extract candidates,
//! enrich them in batches, and persist each lead. Browser failures are
//! fatal; everything downstream recovers per record. The session is
//! released exactly once, on success and error paths alike.

use crate::error::Result;
use crate::extract;
use crate::query;
use crate::scheduler::EnrichmentScheduler;
use crate::writer::PersistenceWriter;
use leadscout_browser::{PageRenderer, PageSession, ScrollPolicy};
use leadscout_core::{AppConfig, ScrapeRequest, ScrapeSummary};
use leadscout_db::LeadStore;
use leadscout_enrich::WebsiteEnricher;
use std::sync::Arc;
use std::time::Instant;

/// Coordinates one scrape run end to end.
pub struct ScrapeOrchestrator {
    renderer: Arc<dyn PageRenderer>,
    enricher: Arc<dyn WebsiteEnricher>,
    store: Arc<dyn LeadStore>,
    config: AppConfig,
}

impl ScrapeOrchestrator {
    /// Create an orchestrator over the given capabilities.
    #[must_use]
    pub fn new(
        renderer: Arc<dyn PageRenderer>,
        enricher: Arc<dyn WebsiteEnricher>,
        store: Arc<dyn LeadStore>,
        config: AppConfig,
    ) -> Self {
        Self {
            renderer,
            enricher,
            store,
            config,
        }
    }

    /// Run one scrape request to completion.
    ///
    /// # Errors
    /// Returns [`crate::ScrapeError`] only for browser-stage failures.
    /// Per-record enrichment and persistence failures are reported in
    /// the summary's `failures` instead.
    pub async fn run(&self, request: &ScrapeRequest) -> Result<ScrapeSummary> {
        let start = Instant::now();
        let url = query::search_url(&request.business_category, &request.city);
        tracing::info!(
            "Starting scrape for vendor {}: {} in {}",
            request.vendor_id,
            request.business_category,
            request.city
        );

        let session = self.renderer.launch().await?;
        let rendered = self.render_listing(session.as_ref(), &url).await;
        let close_result = session.close().await;
        let markup = rendered?;
        if let Err(e) = close_result {
            tracing::warn!("Failed to close browser session cleanly: {}", e);
        }

        let candidates =
            extract::extract_listings(&markup, &request.business_category, &request.vendor_id);
        let attempted = candidates.len();
        tracing::info!("Number of businesses found: {}", attempted);

        let scheduler = EnrichmentScheduler::new(
            self.enricher.clone(),
            self.config.enrichment.concurrency,
            self.config.enrichment.inter_batch_delay(),
        );
        let outcome = scheduler.enrich(candidates).await;

        let writer = PersistenceWriter::new(self.store.clone());
        let report = writer.persist(&outcome.leads).await;

        let mut failures = outcome.failures;
        failures.extend(report.failures);

        let summary = ScrapeSummary {
            attempted,
            enriched: outcome.enriched,
            saved: report.saved,
            elapsed_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            failures,
        };
        tracing::info!(
            "Scrape finished in {}ms: {} found, {} enriched, {} saved, {} failures",
            summary.elapsed_ms,
            summary.attempted,
            summary.enriched,
            summary.saved,
            summary.failures.len()
        );

        Ok(summary)
    }

    /// Navigate, scroll the results feed, and snapshot the markup.
    async fn render_listing(&self, session: &dyn PageSession, url: &str) -> Result<String> {
        session
            .navigate(url, self.config.browser.navigation_timeout())
            .await?;

        let policy = ScrollPolicy {
            steps: self.config.scroll.steps,
            distance_px: self.config.scroll.distance_px,
            delay: self.config.scroll.delay(),
        };
        session
            .scroll_feed(&self.config.scroll.feed_selector, &policy)
            .await?;

        Ok(session.snapshot().await?)
    }
}
