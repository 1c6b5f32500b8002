//! Lead persistence operations.
//!
//! Provides the `LeadStore` capability trait and the `leads` table
//! operations. Inserts are append-only: no uniqueness key is enforced,
//! so repeated runs over the same request create new rows.

use crate::error::{DatabaseError, Result};
use chrono::{DateTime, Utc};
use leadscout_core::{EnrichedLead, ListingCandidate, SocialLinks, VendorId, WebsiteDetails};
use sqlx::{Pool, Row, Sqlite};

/// Capability for durable insertion of one enriched lead.
#[async_trait::async_trait]
pub trait LeadStore: Send + Sync {
    /// Insert one lead, returning its generated ID.
    ///
    /// # Errors
    /// Returns `DatabaseError` if the insert fails. Callers are expected
    /// to recover per record rather than abort a batch.
    async fn insert(&self, lead: &EnrichedLead) -> Result<String>;
}

/// A lead as durably stored, with its generated ID and insert time.
#[derive(Debug, Clone)]
pub struct StoredLead {
    /// Generated row ID
    pub id: String,
    /// When the row was inserted
    pub created_at: DateTime<Utc>,
    /// The stored lead record
    pub lead: EnrichedLead,
}

/// Insert one enriched lead as a new row.
///
/// # Errors
/// Returns `DatabaseError` if the insert or image serialization fails.
pub async fn insert_lead(pool: &Pool<Sqlite>, lead: &EnrichedLead) -> Result<String> {
    let id = uuid::Uuid::new_v4().to_string();
    let created_at = Utc::now();
    let images_json = serde_json::to_string(&lead.details.images)
        .map_err(|e| DatabaseError::Serialization(format!("failed to encode images: {e}")))?;

    sqlx::query(
        "INSERT INTO leads (id, vendor_id, place_id, store_name, address, category,
                            project_category, phone, google_url, biz_website, rating_text,
                            image_url, stars, number_of_reviews, about, logo_url, email,
                            social_youtube, social_instagram, social_facebook,
                            social_linkedin, images, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(lead.listing.vendor_id.as_str())
    .bind(&lead.listing.place_id)
    .bind(&lead.listing.store_name)
    .bind(&lead.listing.address)
    .bind(&lead.listing.category)
    .bind(&lead.listing.project_category)
    .bind(&lead.listing.phone)
    .bind(&lead.listing.google_url)
    .bind(&lead.listing.biz_website)
    .bind(&lead.listing.rating_text)
    .bind(&lead.listing.image_url)
    .bind(lead.listing.stars)
    .bind(i64::from(lead.listing.number_of_reviews))
    .bind(&lead.details.about)
    .bind(&lead.details.logo_url)
    .bind(&lead.details.email)
    .bind(&lead.details.social_links.youtube)
    .bind(&lead.details.social_links.instagram)
    .bind(&lead.details.social_links.facebook)
    .bind(&lead.details.social_links.linkedin)
    .bind(&images_json)
    .bind(created_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(id)
}

/// Get all stored leads for a vendor, newest first.
///
/// # Errors
/// Returns `DatabaseError` if the query fails.
pub async fn list_by_vendor(pool: &Pool<Sqlite>, vendor_id: &str) -> Result<Vec<StoredLead>> {
    let rows = sqlx::query(
        "SELECT id, vendor_id, place_id, store_name, address, category, project_category,
                phone, google_url, biz_website, rating_text, image_url, stars,
                number_of_reviews, about, logo_url, email, social_youtube,
                social_instagram, social_facebook, social_linkedin, images, created_at
         FROM leads
         WHERE vendor_id = ?
         ORDER BY created_at DESC",
    )
    .bind(vendor_id)
    .fetch_all(pool)
    .await?;

    parse_leads_from_rows(rows)
}

/// Helper function to parse stored leads from database rows.
fn parse_leads_from_rows(rows: Vec<sqlx::sqlite::SqliteRow>) -> Result<Vec<StoredLead>> {
    let mut leads = Vec::new();

    for row in rows {
        let vendor_str: String = row.try_get("vendor_id")?;
        let vendor_id = VendorId::new(&vendor_str)
            .map_err(|e| DatabaseError::Decode(format!("invalid vendor_id '{vendor_str}': {e}")))?;

        let images_json: String = row.try_get("images")?;
        let images: Vec<String> = serde_json::from_str(&images_json).unwrap_or_default();

        let number_of_reviews: i64 = row.try_get("number_of_reviews")?;
        let number_of_reviews = u32::try_from(number_of_reviews).unwrap_or(0);

        let created_at_str: String = row.try_get("created_at")?;
        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc));

        let listing = ListingCandidate {
            place_id: row.try_get("place_id")?,
            address: row.try_get("address")?,
            category: row.try_get("category")?,
            project_category: row.try_get("project_category")?,
            phone: row.try_get("phone")?,
            google_url: row.try_get("google_url")?,
            biz_website: row.try_get("biz_website")?,
            store_name: row.try_get("store_name")?,
            rating_text: row.try_get("rating_text")?,
            image_url: row.try_get("image_url")?,
            vendor_id,
            stars: row.try_get("stars")?,
            number_of_reviews,
        };

        let details = WebsiteDetails {
            about: row.try_get("about")?,
            logo_url: row.try_get("logo_url")?,
            email: row.try_get("email")?,
            social_links: SocialLinks {
                youtube: row.try_get("social_youtube")?,
                instagram: row.try_get("social_instagram")?,
                facebook: row.try_get("social_facebook")?,
                linkedin: row.try_get("social_linkedin")?,
            },
            images,
        };

        leads.push(StoredLead {
            id: row.try_get("id")?,
            created_at,
            lead: EnrichedLead::new(listing, details),
        });
    }

    Ok(leads)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;
    use tempfile::TempDir;

    async fn setup_test_db(dir: &TempDir) -> Database {
        let db = Database::new(dir.path().join("leads.db"))
            .await
            .expect("create database");
        db.run_migrations().await.expect("run migrations");
        db
    }

    fn sample_lead(vendor: &str, store_name: &str) -> EnrichedLead {
        let vendor_id = VendorId::new(vendor).expect("valid vendor id");
        let mut listing = ListingCandidate::empty(vendor_id);
        listing.store_name = store_name.to_string();
        listing.stars = Some(4.5);
        listing.number_of_reviews = 120;

        let details = WebsiteDetails {
            about: "Neighborhood roastery".to_string(),
            email: "hi@example.com".to_string(),
            images: vec!["https://cdn.example.com/1.jpg".to_string()],
            ..WebsiteDetails::default()
        };

        EnrichedLead::new(listing, details)
    }

    #[tokio::test]
    async fn test_insert_and_list_roundtrip() {
        let dir = TempDir::new().expect("create temp dir");
        let db = setup_test_db(&dir).await;

        let lead = sample_lead("vendor-1", "Blue Bottle");
        let id = insert_lead(db.pool(), &lead).await.expect("insert lead");
        assert!(!id.is_empty());

        let stored = list_by_vendor(db.pool(), "vendor-1")
            .await
            .expect("list leads");

        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, id);
        assert_eq!(stored[0].lead.listing.store_name, "Blue Bottle");
        assert_eq!(stored[0].lead.listing.stars, Some(4.5));
        assert_eq!(stored[0].lead.listing.number_of_reviews, 120);
        assert_eq!(stored[0].lead.details.about, "Neighborhood roastery");
        assert_eq!(
            stored[0].lead.details.images,
            vec!["https://cdn.example.com/1.jpg".to_string()]
        );
    }

    #[tokio::test]
    async fn test_inserts_are_append_only() {
        let dir = TempDir::new().expect("create temp dir");
        let db = setup_test_db(&dir).await;

        let lead = sample_lead("vendor-1", "Same Store");
        insert_lead(db.pool(), &lead).await.expect("first insert");
        insert_lead(db.pool(), &lead).await.expect("second insert");

        let stored = list_by_vendor(db.pool(), "vendor-1")
            .await
            .expect("list leads");

        // No dedup key: identical records produce separate rows.
        assert_eq!(stored.len(), 2);
        assert_ne!(stored[0].id, stored[1].id);
    }

    #[tokio::test]
    async fn test_list_scoped_to_vendor() {
        let dir = TempDir::new().expect("create temp dir");
        let db = setup_test_db(&dir).await;

        insert_lead(db.pool(), &sample_lead("vendor-1", "A"))
            .await
            .expect("insert A");
        insert_lead(db.pool(), &sample_lead("vendor-2", "B"))
            .await
            .expect("insert B");

        let stored = list_by_vendor(db.pool(), "vendor-1")
            .await
            .expect("list leads");

        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].lead.listing.store_name, "A");
    }

    #[tokio::test]
    async fn test_insert_via_lead_store_trait() {
        let dir = TempDir::new().expect("create temp dir");
        let db = setup_test_db(&dir).await;

        let store: &dyn LeadStore = &db;
        let id = store
            .insert(&sample_lead("vendor-1", "Via Trait"))
            .await
            .expect("insert via trait");
        assert!(!id.is_empty());
    }

    #[tokio::test]
    async fn test_insert_after_close_fails() {
        let dir = TempDir::new().expect("create temp dir");
        let db = setup_test_db(&dir).await;
        db.pool().close().await;

        let result = insert_lead(db.pool(), &sample_lead("vendor-1", "Too Late")).await;
        assert!(result.is_err());
    }
}
