//! Shared types used across the LeadScout pipeline.
//!
//! This module defines the records that flow through a scrape run: the
//! request, the listing candidates parsed out of rendered markup, the
//! website details used for enrichment, and the final run summary.
//! Every extracted field carries a total default (empty string, `None`,
//! or zero) so that missing markup never produces a partial record.

use crate::error::LeadscoutError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Newtype for vendor identifiers with validation.
///
/// Vendor IDs must be 1-64 characters of alphanumerics, hyphens, or
/// underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VendorId(String);

impl VendorId {
    /// Create a new `VendorId` from a string.
    ///
    /// # Errors
    /// Returns error if the ID doesn't match the required format.
    pub fn new(id: impl Into<String>) -> Result<Self, LeadscoutError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Create a new random `VendorId` using UUID v4.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate vendor ID format: alphanumerics, hyphens, underscores, 1-64 chars.
    fn validate(id: &str) -> Result<(), LeadscoutError> {
        static VENDOR_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex =
            VENDOR_REGEX.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").expect("valid regex"));

        if regex.is_match(id) {
            Ok(())
        } else {
            Err(LeadscoutError::Validation(format!(
                "invalid vendor ID: must be 1-64 alphanumeric/hyphen/underscore characters, got '{id}'"
            )))
        }
    }
}

impl fmt::Display for VendorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Input for one scrape run: which city and business category to search,
/// attributed to which vendor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeRequest {
    /// City to search in
    pub city: String,
    /// Business category to search for (e.g. "coffee shops")
    pub business_category: String,
    /// Vendor the resulting leads belong to
    pub vendor_id: VendorId,
}

impl ScrapeRequest {
    /// Create a new scrape request.
    pub fn new(
        city: impl Into<String>,
        business_category: impl Into<String>,
        vendor_id: VendorId,
    ) -> Self {
        Self {
            city: city.into(),
            business_category: business_category.into(),
            vendor_id,
        }
    }
}

/// One parsed search-result record prior to enrichment.
///
/// All string fields default to empty when the corresponding markup
/// fragment is missing; `stars` and `place_id` are `None` when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingCandidate {
    /// Stable place identifier derived from the listing URL, if present
    pub place_id: Option<String>,
    /// Raw address/category line as shown in the listing
    pub address: String,
    /// Business category (first middle-dot segment of the metadata line)
    pub category: String,
    /// Category the scrape request searched for
    pub project_category: String,
    /// Phone number (second middle-dot segment of the metadata line)
    pub phone: String,
    /// URL of the listing on the maps site
    pub google_url: String,
    /// The business's own website, if it advertises one
    pub biz_website: String,
    /// Display name of the business
    pub store_name: String,
    /// Raw rating annotation text (e.g. "4.5 stars 120 Reviews")
    pub rating_text: String,
    /// Thumbnail image URL
    pub image_url: String,
    /// Vendor this candidate was scraped for
    pub vendor_id: VendorId,
    /// Parsed star rating, if the rating text was well-formed
    pub stars: Option<f64>,
    /// Parsed review count; zero when unknown
    pub number_of_reviews: u32,
}

impl ListingCandidate {
    /// Create a candidate with every extracted field at its default.
    #[must_use]
    pub fn empty(vendor_id: VendorId) -> Self {
        Self {
            place_id: None,
            address: String::new(),
            category: String::new(),
            project_category: String::new(),
            phone: String::new(),
            google_url: String::new(),
            biz_website: String::new(),
            store_name: String::new(),
            rating_text: String::new(),
            image_url: String::new(),
            vendor_id,
            stars: None,
            number_of_reviews: 0,
        }
    }
}

/// Social profile links discovered on a business's own site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    /// YouTube channel URL
    pub youtube: String,
    /// Instagram profile URL
    pub instagram: String,
    /// Facebook page URL
    pub facebook: String,
    /// LinkedIn page URL
    pub linkedin: String,
}

/// Supplementary details fetched from a business's own website.
///
/// Every field defaults to empty when the site is missing, unreachable,
/// or does not expose the information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsiteDetails {
    /// Short description of the business
    pub about: String,
    /// Logo or site icon URL
    pub logo_url: String,
    /// Contact email address
    pub email: String,
    /// Social profile links
    pub social_links: SocialLinks,
    /// Image URLs found on the site, in document order
    pub images: Vec<String>,
}

/// A listing candidate merged with its website details.
///
/// Serializes flat: the details fields are appended alongside the
/// candidate fields without overwriting any of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedLead {
    /// The original listing candidate
    #[serde(flatten)]
    pub listing: ListingCandidate,
    /// Details from the business's own site (defaults when enrichment
    /// was skipped or failed)
    #[serde(flatten)]
    pub details: WebsiteDetails,
}

impl EnrichedLead {
    /// Merge a candidate with fetched website details.
    #[must_use]
    pub fn new(listing: ListingCandidate, details: WebsiteDetails) -> Self {
        Self { listing, details }
    }

    /// Wrap a candidate whose enrichment was skipped or failed.
    #[must_use]
    pub fn unenriched(listing: ListingCandidate) -> Self {
        Self {
            listing,
            details: WebsiteDetails::default(),
        }
    }
}

/// Which recoverable stage a per-record failure occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Fetching or parsing the business's own website failed
    Enrichment,
    /// Inserting the lead into the store failed
    Persistence,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enrichment => write!(f, "enrichment"),
            Self::Persistence => write!(f, "persistence"),
        }
    }
}

/// One recorded per-record failure, surfaced in the run summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordFailure {
    /// Identifies the record (store name, or the fetched URL when the
    /// name is unknown)
    pub record: String,
    /// Stage the failure occurred in
    pub kind: FailureKind,
    /// Human-readable failure detail
    pub detail: String,
}

/// Summary of one completed scrape run.
///
/// A returned summary means "run completed", not "every record
/// succeeded": partial enrichment and partial persistence are expected
/// outcomes and show up only in `failures`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeSummary {
    /// Candidates extracted from the rendered listing page
    pub attempted: usize,
    /// Candidates whose website enrichment succeeded
    pub enriched: usize,
    /// Leads durably inserted into the store
    pub saved: usize,
    /// Wall-clock duration of the run in milliseconds
    pub elapsed_ms: u64,
    /// Per-record failures, in the order they occurred
    pub failures: Vec<RecordFailure>,
}
