//! Listing extraction from rendered search-result markup.
//!
//! Walks every anchor that links to a place page, climbs to its parent
//! card element, and reads the display fields out of the card. Every
//! field access is total: a card missing any fragment still yields a
//! candidate with that field at its default.

use leadscout_core::{ListingCandidate, VendorId};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;

const PLACE_LINK_MARKER: &str = "/maps/place/";
const PLACE_ID_PREFIX: &str = "ChI";

fn anchor_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("a[href]").expect("valid selector"))
}

fn headline_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("div.fontHeadlineSmall").expect("valid selector"))
}

fn rating_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("span.fontBodyMedium > span").expect("valid selector"))
}

fn body_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("div.fontBodyMedium").expect("valid selector"))
}

fn website_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("a[data-value=\"Website\"]").expect("valid selector"))
}

fn image_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("img").expect("valid selector"))
}

/// Extract every listing candidate from a rendered results page.
///
/// One candidate is produced per anchor whose `href` contains the place
/// link marker, in document order. `category` is the category the
/// request searched for; it is recorded on each candidate alongside the
/// category parsed from the card itself.
#[must_use]
pub fn extract_listings(markup: &str, category: &str, vendor_id: &VendorId) -> Vec<ListingCandidate> {
    let document = Html::parse_document(markup);

    let mut candidates = Vec::new();
    for anchor in document.select(anchor_selector()) {
        let href = anchor.value().attr("href").unwrap_or_default();
        if !href.contains(PLACE_LINK_MARKER) {
            continue;
        }

        let mut candidate = ListingCandidate::empty(vendor_id.clone());
        candidate.project_category = category.to_string();
        candidate.google_url = href.to_string();

        if let Some(card) = anchor.parent().and_then(ElementRef::wrap) {
            fill_from_card(&mut candidate, card);
        }

        candidate.place_id = place_id_from_url(&candidate.google_url);
        let (stars, number_of_reviews) = parse_rating(&candidate.rating_text);
        candidate.stars = stars;
        candidate.number_of_reviews = number_of_reviews;

        candidates.push(candidate);
    }

    tracing::debug!("Extracted {} listing candidates", candidates.len());
    candidates
}

/// Read the display fields out of one result card.
fn fill_from_card(candidate: &mut ListingCandidate, card: ElementRef<'_>) {
    if let Some(url) = first_attr(card, anchor_selector(), "href") {
        candidate.google_url = url;
    }
    if let Some(url) = first_attr(card, website_selector(), "href") {
        candidate.biz_website = url;
    }
    if let Some(name) = first_text(card, headline_selector()) {
        candidate.store_name = name;
    }
    if let Some(rating) = first_attr(card, rating_selector(), "aria-label") {
        candidate.rating_text = rating;
    }
    if let Some(src) = first_attr(card, image_selector(), "src") {
        candidate.image_url = src;
    }

    let (address_line, phone_line) = metadata_lines(card);
    if let Some(address) = address_line {
        candidate.category = address
            .split('·')
            .next()
            .map(|s| s.trim().to_string())
            .unwrap_or_default();
        candidate.address = address;
    }
    if let Some(line) = phone_line {
        candidate.phone = line
            .split('·')
            .nth(1)
            .map(|s| s.trim().to_string())
            .unwrap_or_default();
    }
}

/// Locate the card's metadata block and return the text of its first
/// and last line elements.
///
/// The metadata block is the last element child of the first body-font
/// container; its first line carries "category · address" and its last
/// line carries "hours · phone". With a single line, both returns are
/// that line's text.
fn metadata_lines(card: ElementRef<'_>) -> (Option<String>, Option<String>) {
    let Some(body) = card.select(body_selector()).next() else {
        return (None, None);
    };
    let Some(block) = body.children().filter_map(ElementRef::wrap).last() else {
        return (None, None);
    };

    let lines: Vec<ElementRef<'_>> = block.children().filter_map(ElementRef::wrap).collect();
    let first = lines.first().map(|el| element_text(*el));
    let last = lines.last().map(|el| element_text(*el));
    (first, last)
}

fn first_attr(scope: ElementRef<'_>, selector: &Selector, name: &str) -> Option<String> {
    scope
        .select(selector)
        .next()
        .and_then(|el| el.value().attr(name))
        .map(ToString::to_string)
}

fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope.select(selector).next().map(element_text)
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Derive the stable place ID from a listing URL.
///
/// The ID is the `ChI`-prefixed token running up to the first query
/// delimiter. Returns `None` when the URL carries no such token.
#[must_use]
pub fn place_id_from_url(url: &str) -> Option<String> {
    let (_, tail) = url.split_once(PLACE_ID_PREFIX)?;
    let token = tail.split('?').next().unwrap_or(tail);
    Some(format!("{PLACE_ID_PREFIX}{token}"))
}

/// Parse a rating annotation like `"4.5 stars 120 Reviews"` into its
/// star value and review count.
///
/// Returns `(None, 0)` for any text that does not match the annotation
/// shape exactly; the two fields are parsed as a pair, never one
/// without the other.
#[must_use]
pub fn parse_rating(rating_text: &str) -> (Option<f64>, u32) {
    static RATING_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = RATING_REGEX.get_or_init(|| {
        Regex::new(r"^\s*(\d+(?:\.\d+)?)\s*stars\s*(\d+(?:,\d+)*)\s*Reviews\s*$")
            .expect("valid regex")
    });

    let Some(caps) = regex.captures(rating_text) else {
        return (None, 0);
    };

    let stars = caps[1].parse::<f64>().ok();
    let reviews = caps[2].replace(',', "").parse::<u32>().ok();
    match (stars, reviews) {
        (Some(stars), Some(reviews)) => (Some(stars), reviews),
        _ => (None, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
        <html><body><div role="feed">
          <div class="card">
            <a href="https://www.google.com/maps/place/Blue+Bottle/data=!ChIJabc123!xyz?authuser=0&hl=en"></a>
            <div class="fontHeadlineSmall">Blue Bottle Coffee</div>
            <span class="fontBodyMedium"><span aria-label="4.5 stars 120 Reviews"></span></span>
            <div class="fontBodyMedium">
              <div class="header"></div>
              <div class="meta">
                <div class="line">Coffee shop · 300 S Congress Ave</div>
                <div class="line">Open 24 hours · +1 512-555-0134</div>
              </div>
            </div>
            <a data-value="Website" href="https://bluebottle.example.com"></a>
            <img src="https://lh5.example.com/photo.jpg" />
          </div>
          <div class="card">
            <a href="/maps/place/Nameless+Spot"></a>
          </div>
        </div></body></html>
    "#;

    fn vendor() -> VendorId {
        VendorId::new("vendor-1").expect("valid vendor id")
    }

    #[test]
    fn test_extracts_full_card() {
        let candidates = extract_listings(FIXTURE, "coffee shops", &vendor());
        assert_eq!(candidates.len(), 2);

        let first = &candidates[0];
        assert_eq!(first.store_name, "Blue Bottle Coffee");
        assert_eq!(first.rating_text, "4.5 stars 120 Reviews");
        assert_eq!(first.stars, Some(4.5));
        assert_eq!(first.number_of_reviews, 120);
        assert_eq!(first.address, "Coffee shop · 300 S Congress Ave");
        assert_eq!(first.category, "Coffee shop");
        assert_eq!(first.project_category, "coffee shops");
        assert_eq!(first.phone, "+1 512-555-0134");
        assert_eq!(first.biz_website, "https://bluebottle.example.com");
        assert_eq!(first.image_url, "https://lh5.example.com/photo.jpg");
        assert_eq!(first.place_id.as_deref(), Some("ChIJabc123!xyz"));
        assert!(first.google_url.contains("/maps/place/Blue+Bottle"));
    }

    #[test]
    fn test_sparse_card_gets_defaults() {
        let candidates = extract_listings(FIXTURE, "coffee shops", &vendor());

        let sparse = &candidates[1];
        assert_eq!(sparse.store_name, "");
        assert_eq!(sparse.address, "");
        assert_eq!(sparse.phone, "");
        assert_eq!(sparse.biz_website, "");
        assert_eq!(sparse.rating_text, "");
        assert_eq!(sparse.stars, None);
        assert_eq!(sparse.number_of_reviews, 0);
        assert_eq!(sparse.place_id, None);
        assert_eq!(sparse.google_url, "/maps/place/Nameless+Spot");
    }

    #[test]
    fn test_non_place_anchors_ignored() {
        let markup = r#"<a href="https://example.com">x</a><a href="/maps/search/q">y</a>"#;
        let candidates = extract_listings(markup, "c", &vendor());
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_empty_markup() {
        assert!(extract_listings("", "c", &vendor()).is_empty());
        assert!(extract_listings("not html at all", "c", &vendor()).is_empty());
    }

    #[test]
    fn test_place_id_from_url() {
        assert_eq!(
            place_id_from_url("https://maps/place/x/ChIJN1t_tDeuEmsRUsoyG83frY4?hl=en"),
            Some("ChIJN1t_tDeuEmsRUsoyG83frY4".to_string())
        );
        assert_eq!(
            place_id_from_url("https://maps/place/x/ChIJabc"),
            Some("ChIJabc".to_string())
        );
        assert_eq!(place_id_from_url("https://maps/place/x"), None);
        assert_eq!(place_id_from_url(""), None);
    }

    #[test]
    fn test_parse_rating_well_formed() {
        assert_eq!(parse_rating("4.5 stars 120 Reviews"), (Some(4.5), 120));
        assert_eq!(parse_rating("5 stars 1 Reviews"), (Some(5.0), 1));
        assert_eq!(parse_rating("4.8 stars 1,204 Reviews"), (Some(4.8), 1204));
    }

    #[test]
    fn test_parse_rating_malformed_defaults_as_pair() {
        assert_eq!(parse_rating(""), (None, 0));
        assert_eq!(parse_rating("No reviews"), (None, 0));
        assert_eq!(parse_rating("stars Reviews"), (None, 0));
        // A parseable star value without a matching review count still
        // yields the full default pair.
        assert_eq!(parse_rating("4.5 stars"), (None, 0));
        assert_eq!(parse_rating("4.5 stars many Reviews"), (None, 0));
    }
}
