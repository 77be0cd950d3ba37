//! Post-detail extraction.
//!
//! A post page has an `h1` title, one or more lazy-loaded `iframe` players
//! and several `.singcont` sections. The second `.singcont` holds the
//! download links as `p > a` anchors labelled like
//! `Download (Link 2 Server-One 720p)`.
//!
//! The section is located by position, not by any stable attribute, so a
//! layout change on the site silently yields zero providers.

use crate::listing::{text_of, LAZY_SRC_ATTR};
use crate::types::{DownloadLink, LinkLabel, Post, ProviderLinks, Quality};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Index of the download section among all `.singcont` elements.
pub const DOWNLOAD_SECTION_INDEX: usize = 1;

fn heading_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    SEL.get_or_init(|| Selector::parse("h1").expect("heading selector is valid"))
}

fn frame_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    SEL.get_or_init(|| Selector::parse("iframe").expect("frame selector is valid"))
}

fn section_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    SEL.get_or_init(|| Selector::parse(".singcont").expect("section selector is valid"))
}

fn anchor_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    SEL.get_or_init(|| Selector::parse("p > a").expect("anchor selector is valid"))
}

fn label_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // ASCII digits only; `\d` would also accept other scripts' numerals.
        Regex::new(r"(?i)\(Link\s+[0-9]+\s+([^\s]+)(?:\s+[0-9]+p)?\)")
            .expect("label regex is valid")
    })
}

/// Extract a post from its detail page.
///
/// Returns `None` when the page has no `h1` or no `iframe`.
pub fn extract_post(html: &str) -> Option<Post> {
    let document = Html::parse_document(html);

    let heading = document.select(heading_selector()).next()?;
    let frames: Vec<ElementRef<'_>> = document.select(frame_selector()).collect();
    if frames.is_empty() {
        return None;
    }

    let title = text_of(&heading);
    let videos = frames
        .iter()
        .map(|f| normalize_video_url(f.value().attr(LAZY_SRC_ATTR).unwrap_or("")))
        .collect();

    let links = match document.select(section_selector()).nth(DOWNLOAD_SECTION_INDEX) {
        Some(section) => collect_section_links(section),
        None => Vec::new(),
    };
    let download_links = group_download_links(links);

    tracing::debug!(
        title = %title,
        videos = frames.len(),
        providers = download_links.len(),
        "extracted post"
    );

    Some(Post {
        title,
        videos,
        download_links,
    })
}

/// Prefix protocol-relative (or otherwise scheme-less) video URLs with `https:`.
pub fn normalize_video_url(raw: &str) -> String {
    if raw.starts_with("https://") || raw.starts_with("http://") {
        raw.to_string()
    } else {
        format!("https:{raw}")
    }
}

/// Collect `p > a` anchors under each direct child of the section, in order.
fn collect_section_links(section: ElementRef<'_>) -> Vec<DownloadLink> {
    section
        .children()
        .filter_map(ElementRef::wrap)
        .flat_map(|child| {
            child
                .select(anchor_selector())
                .filter_map(|a| {
                    let url = a.value().attr("href").filter(|h| !h.is_empty())?;
                    Some(DownloadLink {
                        url: url.to_string(),
                        label: text_of(&a),
                    })
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Parse a download anchor's label.
///
/// The provider is the token after `(Link <n>`, with hyphens removed.
/// The quality bucket comes from `360`/`720` substrings anywhere in the
/// label; the optional `<n>p` in the pattern is matched but not consulted.
pub fn parse_label(label: &str) -> Option<LinkLabel> {
    let caps = label_regex().captures(label)?;
    let provider = caps.get(1).map_or("", |m| m.as_str()).replace('-', "");

    Some(LinkLabel {
        provider,
        quality: Quality::from_label(label),
    })
}

/// Group links by provider, preserving first-seen provider order.
///
/// Links whose label does not parse, or parses without a quality bucket,
/// are dropped.
pub fn group_download_links(links: Vec<DownloadLink>) -> Vec<ProviderLinks> {
    let mut providers: Vec<ProviderLinks> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for link in links {
        let Some(LinkLabel { provider, quality }) = parse_label(&link.label) else {
            tracing::trace!(label = %link.label, "label does not match link pattern");
            continue;
        };
        let Some(quality) = quality else {
            tracing::trace!(label = %link.label, "label has no known quality");
            continue;
        };

        let slot = *index.entry(provider.clone()).or_insert_with(|| {
            providers.push(ProviderLinks::new(provider));
            providers.len() - 1
        });
        providers[slot].push(quality, link);
    }

    providers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(url: &str, label: &str) -> DownloadLink {
        DownloadLink {
            url: url.to_string(),
            label: label.to_string(),
        }
    }

    const POST_HTML: &str = r#"
        <html><body>
          <h1>  The Movie (2024)  </h1>
          <iframe data-wpfc-original-src="//player.example.com/embed/1"></iframe>
          <iframe data-wpfc-original-src="https://player.example.com/embed/2"></iframe>
          <div class="singcont"><p><a href="https://ignored">(Link 1 Ignored 360p)</a></p></div>
          <div class="singcont">
            <div>
              <p><a href="https://dl/1">Download (Link 1 Server-One 360p)</a></p>
              <p><a href="https://dl/2">Download (Link 2 Mega 720p)</a></p>
            </div>
            <p><a href="https://dl/3">Download (Link 3 Server-One 720p)</a></p>
            <p><a href="https://dl/4">Download (Link 4 Mega 1080p)</a></p>
            <p><a href="https://dl/5">Watch online</a></p>
            <p><a>(Link 6 NoHref 360p)</a></p>
            <p><a href="">(Link 8 EmptyHref 360p)</a></p>
            <span><a href="https://dl/7">(Link 7 NotInParagraph 360p)</a></span>
          </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_label_provider_and_quality() {
        let parsed = parse_label("(Link 2 Server-One 360p)").unwrap();
        assert_eq!(parsed.provider, "ServerOne");
        assert_eq!(parsed.quality, Some(Quality::P360));
    }

    #[test]
    fn test_parse_label_case_insensitive_without_quality_group() {
        let parsed = parse_label("click (link 12 g-d-rive) 720").unwrap();
        assert_eq!(parsed.provider, "gdrive");
        assert_eq!(parsed.quality, Some(Quality::P720));
    }

    #[test]
    fn test_parse_label_rejects_unpatterned() {
        assert!(parse_label("Download Server One 360p").is_none());
        assert!(parse_label("(Link Server 360p)").is_none());
        assert!(parse_label("").is_none());
    }

    #[test]
    fn test_parse_label_requires_ascii_link_number() {
        assert!(parse_label("(Link \u{0662} Mega 720p)").is_none());
        assert!(parse_label("(Link 2 Mega \u{0667}20p)").is_none());
        assert!(parse_label("(Link 2 Mega 720p)").is_some());
    }

    #[test]
    fn test_quality_ignores_captured_group() {
        // Captured "1080p" is irrelevant; the 360 substring decides.
        let parsed = parse_label("(Link 3 Mirror360 1080p)").unwrap();
        assert_eq!(parsed.provider, "Mirror360");
        assert_eq!(parsed.quality, Some(Quality::P360));

        let parsed = parse_label("(Link 3 Mirror 1080p)").unwrap();
        assert_eq!(parsed.quality, None);
    }

    #[test]
    fn test_normalize_video_url() {
        assert_eq!(
            normalize_video_url("//cdn.example.com/v.mp4"),
            "https://cdn.example.com/v.mp4"
        );
        assert_eq!(
            normalize_video_url("https://cdn.example.com/v.mp4"),
            "https://cdn.example.com/v.mp4"
        );
        assert_eq!(
            normalize_video_url("http://cdn.example.com/v.mp4"),
            "http://cdn.example.com/v.mp4"
        );
        assert_eq!(normalize_video_url(""), "https:");
    }

    #[test]
    fn test_group_download_links() {
        let grouped = group_download_links(vec![
            link("a", "(Link 1 Server-One 360p)"),
            link("b", "(Link 2 Mega 720p)"),
            link("c", "(Link 3 ServerOne 720p)"),
            link("d", "no pattern 360p"),
            link("e", "(Link 5 Other 480p)"),
        ]);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].name, "ServerOne");
        assert_eq!(grouped[0].links_360, vec![link("a", "(Link 1 Server-One 360p)")]);
        assert_eq!(grouped[0].links_720, vec![link("c", "(Link 3 ServerOne 720p)")]);
        assert_eq!(grouped[1].name, "Mega");
        assert!(grouped[1].links_360.is_empty());
        assert_eq!(grouped[1].links_720.len(), 1);
    }

    #[test]
    fn test_extract_post_full_page() {
        let post = extract_post(POST_HTML).unwrap();
        assert_eq!(post.title, "The Movie (2024)");
        assert_eq!(
            post.videos,
            vec![
                "https://player.example.com/embed/1".to_string(),
                "https://player.example.com/embed/2".to_string(),
            ]
        );

        let names: Vec<&str> = post.download_links.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["ServerOne", "Mega"]);
        assert!(!names.contains(&"EmptyHref"));
        assert!(!names.contains(&"NoHref"));

        let server_one = &post.download_links[0];
        assert_eq!(server_one.links_360[0].url, "https://dl/1");
        assert_eq!(server_one.links_360[0].label, "Download (Link 1 Server-One 360p)");
        assert_eq!(server_one.links_720[0].url, "https://dl/3");

        let mega = &post.download_links[1];
        assert_eq!(mega.links_720.len(), 1);
        assert!(mega.links_360.is_empty());
    }

    #[test]
    fn test_extract_post_requires_heading_and_frame() {
        assert!(extract_post("<h1>Title only</h1>").is_none());
        assert!(extract_post("<iframe data-wpfc-original-src=\"//x\"></iframe>").is_none());
        assert!(extract_post("").is_none());
    }

    #[test]
    fn test_extract_post_without_download_section() {
        let html = r#"<h1>T</h1><iframe></iframe><div class="singcont"><p><a href="x">(Link 1 A 360p)</a></p></div>"#;
        let post = extract_post(html).unwrap();
        assert_eq!(post.videos, vec!["https:".to_string()]);
        assert!(post.download_links.is_empty());
    }

    #[test]
    fn test_anchor_directly_in_child_paragraph() {
        let html = r#"<h1>T</h1><iframe data-wpfc-original-src="//v"></iframe>
            <div class="singcont"></div>
            <div class="singcont"><p><a href="u">(Link 1 Solo 720p)</a></p></div>"#;
        let post = extract_post(html).unwrap();
        assert_eq!(post.download_links.len(), 1);
        assert_eq!(post.download_links[0].name, "Solo");
        assert_eq!(post.download_links[0].links_720[0].url, "u");
    }
}
