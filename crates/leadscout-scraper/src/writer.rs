//! Per-record lead persistence.
//!
//! Leads are written one at a time so that a failed insert never
//! touches the fate of any other record. Every lead is accounted for:
//! saved count plus recorded failures always equals the input length.

use leadscout_core::{EnrichedLead, FailureKind, RecordFailure};
use leadscout_db::LeadStore;
use std::sync::Arc;

/// Result of persisting one run's worth of leads.
#[derive(Debug)]
pub struct PersistReport {
    /// Leads durably inserted
    pub saved: usize,
    /// Per-lead insert failures
    pub failures: Vec<RecordFailure>,
}

/// Writes enriched leads to a store with per-record failure isolation.
pub struct PersistenceWriter {
    store: Arc<dyn LeadStore>,
}

impl PersistenceWriter {
    /// Create a writer over a lead store.
    #[must_use]
    pub fn new(store: Arc<dyn LeadStore>) -> Self {
        Self { store }
    }

    /// Insert each lead in order, recording failures instead of
    /// propagating them.
    pub async fn persist(&self, leads: &[EnrichedLead]) -> PersistReport {
        let total = leads.len();
        let mut saved = 0;
        let mut failures = Vec::new();

        for (index, lead) in leads.iter().enumerate() {
            match self.store.insert(lead).await {
                Ok(id) => {
                    saved += 1;
                    tracing::info!(
                        "[{}/{}] Saved lead: {} ({})",
                        index + 1,
                        total,
                        lead.listing.store_name,
                        id
                    );
                }
                Err(e) => {
                    tracing::error!(
                        "[{}/{}] Failed to save lead {}: {}",
                        index + 1,
                        total,
                        lead.listing.store_name,
                        e
                    );
                    let record = if lead.listing.store_name.is_empty() {
                        lead.listing.google_url.clone()
                    } else {
                        lead.listing.store_name.clone()
                    };
                    failures.push(RecordFailure {
                        record,
                        kind: FailureKind::Persistence,
                        detail: e.to_string(),
                    });
                }
            }
        }

        PersistReport { saved, failures }
    }
}
