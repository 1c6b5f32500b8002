//! LeadScout scrape pipeline.
//!
//! Ties the browser, extraction, enrichment, and persistence layers
//! together into one orchestrated run:
//!
//! 1. Render the maps search page and scroll its results feed
//! 2. Extract listing candidates from the snapshotted markup
//! 3. Enrich candidates from their own websites in bounded batches
//! 4. Persist each lead individually
//!
//! Only browser-stage failures abort a run; per-record enrichment and
//! persistence failures are collected into the run summary.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod error;
pub mod extract;
pub mod orchestrator;
pub mod query;
pub mod scheduler;
pub mod writer;

pub use error::{Result, ScrapeError};
pub use extract::{extract_listings, parse_rating, place_id_from_url};
pub use orchestrator::ScrapeOrchestrator;
pub use query::search_url;
pub use scheduler::{EnrichmentOutcome, EnrichmentScheduler};
pub use writer::{PersistReport, PersistenceWriter};
