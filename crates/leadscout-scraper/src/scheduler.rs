//! Batched enrichment scheduling.
//!
//! Candidates are enriched in fixed-size batches: every future in batch
//! `i` settles before any future in batch `i+1` starts, and a fixed
//! pause separates consecutive batches. A failed fetch never aborts the
//! run; the candidate keeps default details and the failure is recorded.

use leadscout_core::{EnrichedLead, FailureKind, ListingCandidate, RecordFailure};
use leadscout_enrich::WebsiteEnricher;
use std::sync::Arc;
use std::time::Duration;

/// Result of enriching one run's worth of candidates.
#[derive(Debug)]
pub struct EnrichmentOutcome {
    /// One lead per input candidate, in input order
    pub leads: Vec<EnrichedLead>,
    /// Candidates whose website fetch succeeded
    pub enriched: usize,
    /// Per-candidate fetch failures
    pub failures: Vec<RecordFailure>,
}

/// Runs website enrichment under bounded batch concurrency.
pub struct EnrichmentScheduler {
    enricher: Arc<dyn WebsiteEnricher>,
    concurrency: usize,
    inter_batch_delay: Duration,
}

impl EnrichmentScheduler {
    /// Create a scheduler. A `concurrency` of zero is treated as one.
    #[must_use]
    pub fn new(
        enricher: Arc<dyn WebsiteEnricher>,
        concurrency: usize,
        inter_batch_delay: Duration,
    ) -> Self {
        Self {
            enricher,
            concurrency: concurrency.max(1),
            inter_batch_delay,
        }
    }

    /// Enrich all candidates, batch by batch.
    ///
    /// Candidates without a website are passed through unenriched and
    /// count as neither a success nor a failure.
    pub async fn enrich(&self, candidates: Vec<ListingCandidate>) -> EnrichmentOutcome {
        let total = candidates.len();
        let mut leads = Vec::with_capacity(total);
        let mut failures = Vec::new();
        let mut enriched = 0;

        let mut remaining = candidates.into_iter().peekable();
        let mut batch_index = 0;
        while remaining.peek().is_some() {
            let batch: Vec<ListingCandidate> =
                remaining.by_ref().take(self.concurrency).collect();
            tracing::debug!(
                "Enriching batch {} ({} candidates of {})",
                batch_index,
                batch.len(),
                total
            );

            let results =
                futures::future::join_all(batch.into_iter().map(|c| self.enrich_one(c))).await;

            for (lead, failure) in results {
                if failure.is_none() && !lead.listing.biz_website.is_empty() {
                    enriched += 1;
                }
                if let Some(failure) = failure {
                    failures.push(failure);
                }
                leads.push(lead);
            }

            batch_index += 1;
            if remaining.peek().is_some() {
                tokio::time::sleep(self.inter_batch_delay).await;
            }
        }

        EnrichmentOutcome {
            leads,
            enriched,
            failures,
        }
    }

    async fn enrich_one(
        &self,
        candidate: ListingCandidate,
    ) -> (EnrichedLead, Option<RecordFailure>) {
        if candidate.biz_website.is_empty() {
            return (EnrichedLead::unenriched(candidate), None);
        }

        match self.enricher.fetch(&candidate.biz_website).await {
            Ok(details) => (EnrichedLead::new(candidate, details), None),
            Err(e) => {
                tracing::warn!(
                    "Enrichment failed for {}: {}",
                    candidate.biz_website,
                    e
                );
                let record = if candidate.store_name.is_empty() {
                    candidate.biz_website.clone()
                } else {
                    candidate.store_name.clone()
                };
                let failure = RecordFailure {
                    record,
                    kind: FailureKind::Enrichment,
                    detail: e.to_string(),
                };
                (EnrichedLead::unenriched(candidate), Some(failure))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadscout_core::{VendorId, WebsiteDetails};
    use leadscout_enrich::FetchError;
    use std::sync::Mutex;

    /// Enricher that records fetch start/end events and fails on demand.
    struct RecordingEnricher {
        events: Mutex<Vec<String>>,
        fail_urls: Vec<String>,
    }

    impl RecordingEnricher {
        fn new(fail_urls: Vec<&str>) -> Self {
            Self {
                events: Mutex::new(Vec::new()),
                fail_urls: fail_urls.into_iter().map(String::from).collect(),
            }
        }

        fn events(&self) -> Vec<String> {
            self.events.lock().expect("lock events").clone()
        }
    }

    #[async_trait::async_trait]
    impl WebsiteEnricher for RecordingEnricher {
        async fn fetch(&self, url: &str) -> leadscout_enrich::Result<WebsiteDetails> {
            self.events
                .lock()
                .expect("lock events")
                .push(format!("start:{url}"));
            tokio::time::sleep(Duration::from_millis(5)).await;
            self.events
                .lock()
                .expect("lock events")
                .push(format!("end:{url}"));

            if self.fail_urls.iter().any(|f| f == url) {
                return Err(FetchError::Status {
                    url: url.to_string(),
                    code: 503,
                });
            }
            Ok(WebsiteDetails {
                about: format!("about {url}"),
                ..WebsiteDetails::default()
            })
        }
    }

    fn candidate(name: &str, website: &str) -> ListingCandidate {
        let mut c = ListingCandidate::empty(VendorId::new("vendor-1").expect("valid vendor id"));
        c.store_name = name.to_string();
        c.biz_website = website.to_string();
        c
    }

    #[tokio::test]
    async fn test_batches_settle_before_next_starts() {
        let enricher = Arc::new(RecordingEnricher::new(vec![]));
        let scheduler = EnrichmentScheduler::new(enricher.clone(), 2, Duration::ZERO);

        let candidates: Vec<_> = (0..5)
            .map(|i| candidate(&format!("biz-{i}"), &format!("https://site-{i}.test")))
            .collect();

        let outcome = scheduler.enrich(candidates).await;
        assert_eq!(outcome.leads.len(), 5);
        assert_eq!(outcome.enriched, 5);

        let events = enricher.events();
        let pos = |e: &str| {
            events
                .iter()
                .position(|x| x == e)
                .unwrap_or_else(|| panic!("missing event {e}"))
        };

        // Batch 1 (sites 2 and 3) starts only after batch 0 fully settles.
        assert!(pos("start:https://site-2.test") > pos("end:https://site-0.test"));
        assert!(pos("start:https://site-2.test") > pos("end:https://site-1.test"));
        // The final single-candidate batch starts after batch 1 settles.
        assert!(pos("start:https://site-4.test") > pos("end:https://site-2.test"));
        assert!(pos("start:https://site-4.test") > pos("end:https://site-3.test"));
    }

    #[tokio::test]
    async fn test_failure_is_isolated() {
        let enricher = Arc::new(RecordingEnricher::new(vec!["https://down.test"]));
        let scheduler = EnrichmentScheduler::new(enricher, 3, Duration::ZERO);

        let outcome = scheduler
            .enrich(vec![
                candidate("Up", "https://up.test"),
                candidate("Down", "https://down.test"),
            ])
            .await;

        assert_eq!(outcome.leads.len(), 2);
        assert_eq!(outcome.enriched, 1);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].record, "Down");
        assert_eq!(outcome.failures[0].kind, FailureKind::Enrichment);

        // The failed candidate survives with default details.
        let down = &outcome.leads[1];
        assert_eq!(down.listing.store_name, "Down");
        assert_eq!(down.details, WebsiteDetails::default());
        // The successful one keeps its fetched details.
        assert_eq!(outcome.leads[0].details.about, "about https://up.test");
    }

    #[tokio::test]
    async fn test_candidates_without_website_skip_fetch() {
        let enricher = Arc::new(RecordingEnricher::new(vec![]));
        let scheduler = EnrichmentScheduler::new(enricher.clone(), 3, Duration::ZERO);

        let outcome = scheduler
            .enrich(vec![
                candidate("No Site", ""),
                candidate("Has Site", "https://has.test"),
            ])
            .await;

        assert_eq!(outcome.leads.len(), 2);
        assert_eq!(outcome.enriched, 1);
        assert!(outcome.failures.is_empty());
        assert_eq!(outcome.leads[0].details, WebsiteDetails::default());
        assert_eq!(enricher.events().len(), 2); // one start, one end
    }

    #[tokio::test]
    async fn test_zero_concurrency_clamped_to_one() {
        let enricher = Arc::new(RecordingEnricher::new(vec![]));
        let scheduler = EnrichmentScheduler::new(enricher, 0, Duration::ZERO);

        let outcome = scheduler
            .enrich(vec![candidate("A", "https://a.test")])
            .await;
        assert_eq!(outcome.leads.len(), 1);
        assert_eq!(outcome.enriched, 1);
    }

    #[tokio::test]
    async fn test_empty_input() {
        let enricher = Arc::new(RecordingEnricher::new(vec![]));
        let scheduler = EnrichmentScheduler::new(enricher, 3, Duration::ZERO);

        let outcome = scheduler.enrich(Vec::new()).await;
        assert!(outcome.leads.is_empty());
        assert_eq!(outcome.enriched, 0);
        assert!(outcome.failures.is_empty());
    }
}
