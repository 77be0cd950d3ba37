// Copyright 2026 Marquee Contributors
// SPDX-License-Identifier: Apache-2.0

//! Listing page: a grid of movie cards.

use super::{document, escape};
use marquee::ListingItem;
use std::fmt::Write;

/// Render the home page for `items`, stamped with `last_updated`.
pub fn render_listing(items: &[ListingItem], last_updated: &str) -> String {
    let mut cards = String::new();
    for item in items {
        let _ = write!(
            cards,
            "<a class=\"card\" href=\"{link}\">\
             <img src=\"{image}\" alt=\"{title}\" loading=\"lazy\">\
             <h3>{title}</h3></a>\n",
            link = escape(&item.link),
            image = escape(&item.image),
            title = escape(&item.title),
        );
    }

    let body = format!(
        "<main>\n<h1>Movie Listings</h1>\n\
         <p class=\"muted\">This page is rendered on the server for every request.</p>\n\
         <p class=\"muted\">Last updated: {updated}</p>\n\
         <div class=\"grid\">\n{cards}</div>\n</main>",
        updated = escape(last_updated),
    );
    document("Movie Listings", "", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_cards_in_order() {
        let items = vec![
            ListingItem {
                title: "First & Best".into(),
                link: "/post/first/".into(),
                image: "https://img/1.jpg".into(),
            },
            ListingItem {
                title: "Second".into(),
                link: "/post/second/".into(),
                image: String::new(),
            },
        ];
        let html = render_listing(&items, "10:15:00");

        assert!(html.contains("Last updated: 10:15:00"));
        assert!(html.contains(r#"href="/post/first/""#));
        assert!(html.contains("<h3>First &amp; Best</h3>"));
        let first = html.find("/post/first/").unwrap();
        let second = html.find("/post/second/").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_render_empty_grid() {
        let html = render_listing(&[], "now");
        assert!(html.contains("<div class=\"grid\">\n</div>"));
        assert!(!html.contains("class=\"card\""));
    }
}
