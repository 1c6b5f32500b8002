//! LeadScout Core - Foundation crate for the LeadScout scraping pipeline.
//!
//! This crate provides the shared data model, error handling, and
//! configuration management that all other LeadScout crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Shared data types (`ScrapeRequest`, `ListingCandidate`,
//!   `EnrichedLead`, `ScrapeSummary`, `VendorId`)
//!
//! # Example
//!
//! ```rust
//! use leadscout_core::{AppConfig, ScrapeRequest, VendorId};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! let request = ScrapeRequest::new("Austin", "coffee shops", VendorId::generate());
//! assert_eq!(config.enrichment.concurrency, 3);
//! assert_eq!(request.city, "Austin");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, BrowserConfig, DatabaseConfig, EnrichmentConfig, ScrollConfig};
pub use error::{ConfigError, ConfigResult, LeadscoutError, Result};
pub use types::{
    EnrichedLead, FailureKind, ListingCandidate, RecordFailure, ScrapeRequest, ScrapeSummary,
    SocialLinks, VendorId, WebsiteDetails,
};
