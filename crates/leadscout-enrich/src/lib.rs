//! Website enrichment for lead candidates.
//!
//! Given a business's own website URL, fetches the page and extracts the
//! supplementary lead fields: about text, logo, contact email, social
//! profile links, and image URLs. Fetching can fail per candidate; the
//! parse itself is total.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod enricher;
pub mod error;
pub mod fetcher;
pub mod parser;

pub use enricher::WebsiteEnricher;
pub use error::{FetchError, Result};
pub use fetcher::SiteFetcher;
pub use parser::parse_website_details;
