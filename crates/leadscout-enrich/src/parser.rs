//! Total HTML-to-details parser for business websites.
//!
//! Each field extractor is a total function returning an `Option` (or a
//! possibly-empty collection); defaulting happens once, at the
//! [`WebsiteDetails`] construction boundary. Malformed or empty markup
//! yields a fully-defaulted record, never an error.

use leadscout_core::{SocialLinks, WebsiteDetails};
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::OnceLock;
use url::Url;

/// Parse a fetched page into website details.
///
/// `page_url` is used to resolve relative image and logo references;
/// when it is unparsable, relative references are simply dropped.
#[must_use]
pub fn parse_website_details(html: &str, page_url: &str) -> WebsiteDetails {
    let document = Html::parse_document(html);
    let base = Url::parse(page_url).ok();

    WebsiteDetails {
        about: find_about(&document).unwrap_or_default(),
        logo_url: find_logo(&document, base.as_ref()).unwrap_or_default(),
        email: find_email(&document).unwrap_or_default(),
        social_links: find_social_links(&document),
        images: find_images(&document, base.as_ref()),
    }
}

fn find_about(document: &Html) -> Option<String> {
    static META_DESC: OnceLock<Selector> = OnceLock::new();
    static OG_DESC: OnceLock<Selector> = OnceLock::new();
    static PARAGRAPH: OnceLock<Selector> = OnceLock::new();

    let meta_desc = META_DESC
        .get_or_init(|| Selector::parse(r#"meta[name="description"]"#).expect("valid selector"));
    let og_desc = OG_DESC.get_or_init(|| {
        Selector::parse(r#"meta[property="og:description"]"#).expect("valid selector")
    });
    let paragraph = PARAGRAPH.get_or_init(|| Selector::parse("p").expect("valid selector"));

    let from_meta = document
        .select(meta_desc)
        .chain(document.select(og_desc))
        .find_map(|el| el.value().attr("content"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    from_meta.or_else(|| {
        document
            .select(paragraph)
            .map(|el| el.text().collect::<String>().trim().to_string())
            .find(|s| !s.is_empty())
    })
}

fn find_logo(document: &Html, base: Option<&Url>) -> Option<String> {
    static LOGO_IMG: OnceLock<Selector> = OnceLock::new();
    static ICON_LINK: OnceLock<Selector> = OnceLock::new();

    let logo_img =
        LOGO_IMG.get_or_init(|| Selector::parse(r#"img[src*="logo"]"#).expect("valid selector"));
    let icon_link =
        ICON_LINK.get_or_init(|| Selector::parse(r#"link[rel~="icon"]"#).expect("valid selector"));

    let from_img = document
        .select(logo_img)
        .find_map(|el| el.value().attr("src"))
        .and_then(|src| absolutize(base, src));

    from_img.or_else(|| {
        document
            .select(icon_link)
            .find_map(|el| el.value().attr("href"))
            .and_then(|href| absolutize(base, href))
    })
}

fn find_email(document: &Html) -> Option<String> {
    static MAILTO: OnceLock<Selector> = OnceLock::new();
    let mailto =
        MAILTO.get_or_init(|| Selector::parse(r#"a[href^="mailto:"]"#).expect("valid selector"));

    document
        .select(mailto)
        .find_map(|el| el.value().attr("href"))
        .and_then(|href| href.strip_prefix("mailto:"))
        .map(|addr| addr.split('?').next().unwrap_or(addr).trim().to_string())
        .filter(|addr| !addr.is_empty())
}

fn find_social_links(document: &Html) -> SocialLinks {
    static ANCHOR: OnceLock<Selector> = OnceLock::new();
    let anchor = ANCHOR.get_or_init(|| Selector::parse("a[href]").expect("valid selector"));

    let mut links = SocialLinks::default();

    for el in document.select(anchor) {
        let Some(href) = el.value().attr("href") else {
            continue;
        };

        // First occurrence wins for each network.
        if links.youtube.is_empty() && (href.contains("youtube.com") || href.contains("youtu.be")) {
            links.youtube = href.to_string();
        } else if links.instagram.is_empty() && href.contains("instagram.com") {
            links.instagram = href.to_string();
        } else if links.facebook.is_empty() && href.contains("facebook.com") {
            links.facebook = href.to_string();
        } else if links.linkedin.is_empty() && href.contains("linkedin.com") {
            links.linkedin = href.to_string();
        }
    }

    links
}

fn find_images(document: &Html, base: Option<&Url>) -> Vec<String> {
    static IMG: OnceLock<Selector> = OnceLock::new();
    let img = IMG.get_or_init(|| Selector::parse("img[src]").expect("valid selector"));

    let mut seen = HashSet::new();
    let mut images = Vec::new();

    for el in document.select(img) {
        let Some(src) = el.value().attr("src") else {
            continue;
        };
        if let Some(resolved) = absolutize(base, src) {
            if seen.insert(resolved.clone()) {
                images.push(resolved);
            }
        }
    }

    images
}

/// Resolve a reference against the page URL. Inline data URIs and empty
/// references are dropped; relative references without a usable base
/// are dropped too.
fn absolutize(base: Option<&Url>, raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() || raw.starts_with("data:") {
        return None;
    }
    if Url::parse(raw).is_ok() {
        return Some(raw.to_string());
    }
    base.and_then(|b| b.join(raw).ok()).map(|u| u.to_string())
}
