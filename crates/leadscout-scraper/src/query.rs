//! Search URL construction.

const SEARCH_BASE: &str = "https://www.google.com/maps/search/";

/// Build the maps search URL for a category in a city.
///
/// The query terms are joined with `+`; runs of whitespace inside
/// either input collapse to single separators.
#[must_use]
pub fn search_url(business_category: &str, city: &str) -> String {
    let query = format!("{business_category} {city}");
    let joined = query.split_whitespace().collect::<Vec<_>>().join("+");
    format!("{SEARCH_BASE}{joined}")
}
