//! Listing-page extraction.
//!
//! The home page lists posts as `.boxtitle` cards. Each card carries an
//! `h2 a` title link and a `.wp-post-image` thumbnail whose real source
//! sits in a lazy-load attribute.

use crate::site::SiteProfile;
use crate::types::ListingItem;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;

/// Lazy-load attribute the site's caching plugin moves real sources into.
pub const LAZY_SRC_ATTR: &str = "data-wpfc-original-src";

fn card_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    SEL.get_or_init(|| Selector::parse(".boxtitle").expect("card selector is valid"))
}

fn title_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    SEL.get_or_init(|| Selector::parse("h2 a").expect("title selector is valid"))
}

fn image_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    SEL.get_or_init(|| Selector::parse(".wp-post-image").expect("image selector is valid"))
}

/// Extract every listing card from the home page HTML.
///
/// Cards with missing parts still produce an item with empty fields; a page
/// without any cards yields an empty list.
pub fn extract_listing(html: &str, site: &SiteProfile) -> Vec<ListingItem> {
    let document = Html::parse_document(html);

    let items: Vec<ListingItem> = document
        .select(card_selector())
        .map(|card| extract_card(card, site))
        .collect();

    tracing::debug!(count = items.len(), "extracted listing cards");
    items
}

fn extract_card(card: ElementRef<'_>, site: &SiteProfile) -> ListingItem {
    let anchor = card.select(title_selector()).next();
    let image = card.select(image_selector()).next();

    let title = anchor.map(|a| text_of(&a)).unwrap_or_default();
    let link = site.local_link(anchor.and_then(|a| a.value().attr("href")));
    let image = image
        .and_then(|img| {
            non_empty(img.value().attr(LAZY_SRC_ATTR)).or_else(|| non_empty(img.value().attr("src")))
        })
        .unwrap_or_default()
        .to_string();

    ListingItem { title, link, image }
}

/// Trimmed text content of an element.
pub(crate) fn text_of(el: &ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// An empty attribute counts as missing, mirroring a falsy fallback chain.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
