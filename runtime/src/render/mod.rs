// Copyright 2026 Marquee Contributors
// SPDX-License-Identifier: Apache-2.0

//! Server-side HTML rendering for the listing and post pages.
//!
//! Pages are assembled with `format!` around a shared shell. Every piece of
//! scraped text passes through [`escape`] before it is interpolated.

pub mod listing_page;
pub mod post_page;

pub use listing_page::render_listing;
pub use post_page::render_post;

const STYLE: &str = include_str!("style.css");

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap `head` extras and `body` markup in a complete document.
pub(crate) fn document(title: &str, head: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n{head}<style>{STYLE}</style>\n</head>\n\
         <body>\n{body}\n</body>\n</html>\n",
        title = escape(title),
    )
}
