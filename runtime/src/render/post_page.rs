// Copyright 2026 Marquee Contributors
// SPDX-License-Identifier: Apache-2.0

//! Post page: players followed by download links grouped per provider.

use super::{document, escape};
use marquee::{DownloadLink, Post, ProviderLinks, Quality};
use std::fmt::Write;

const PLAYER_ALLOW: &str =
    "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture";

/// Render a post page. `None` renders the empty shell.
pub fn render_post(post: Option<&Post>) -> String {
    let empty = Post::default();
    let post = post.unwrap_or(&empty);
    let title = escape(&post.title);

    let head = format!(
        "<meta name=\"description\" content=\"{title}\">\n\
         <meta property=\"og:title\" content=\"{title}\">\n\
         <meta property=\"og:description\" content=\"{title}\">\n\
         <meta property=\"og:image\" content=\"{title}\">\n\
         <link rel=\"canonical\" href=\"{title}\">\n"
    );

    let mut body = format!("<main>\n<h1>{title}</h1>\n<div class=\"players\">\n");
    for (i, video) in post.videos.iter().enumerate() {
        let _ = writeln!(
            body,
            "<div class=\"player\"><iframe src=\"{src}\" title=\"{title} - Player {n}\" \
             allow=\"{PLAYER_ALLOW}\" allowfullscreen></iframe></div>",
            src = escape(video),
            n = i + 1,
        );
    }
    body.push_str("</div>\n");

    for provider in &post.download_links {
        render_provider(&mut body, provider);
    }
    body.push_str("</main>");

    document(&post.title, &head, &body)
}

fn render_provider(out: &mut String, provider: &ProviderLinks) {
    let name = escape(&provider.name);
    let _ = writeln!(out, "<section class=\"provider\">\n<h2>{name}</h2>");
    render_bucket(out, &name, Quality::P360, &provider.links_360);
    render_bucket(out, &name, Quality::P720, &provider.links_720);
    out.push_str("</section>\n");
}

fn render_bucket(out: &mut String, name: &str, quality: Quality, links: &[DownloadLink]) {
    let _ = writeln!(out, "<div>\n<h3>{quality} Quality Links {name}</h3>");
    for (i, link) in links.iter().enumerate() {
        let _ = writeln!(
            out,
            "<a href=\"{href}\" target=\"_blank\" rel=\"noopener noreferrer\">\
             Click To Download (Link {n} {name} {quality})</a>",
            href = escape(&link.url),
            n = i + 1,
        );
    }
    out.push_str("</div>\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Post {
        Post {
            title: "The Movie".into(),
            videos: vec![
                "https://player/1".into(),
                "https://player/2?a=1&b=2".into(),
            ],
            download_links: vec![ProviderLinks {
                name: "ServerOne".into(),
                links_360: vec![DownloadLink {
                    url: "https://dl/1".into(),
                    label: "(Link 1 Server-One 360p)".into(),
                }],
                links_720: vec![
                    DownloadLink {
                        url: "https://dl/2".into(),
                        label: "(Link 2 Server-One 720p)".into(),
                    },
                    DownloadLink {
                        url: "https://dl/3".into(),
                        label: "(Link 3 Server-One 720p)".into(),
                    },
                ],
            }],
        }
    }

    #[test]
    fn test_render_post_players_and_links() {
        let html = render_post(Some(&sample()));

        assert!(html.contains("<title>The Movie</title>"));
        assert!(html.contains(r#"<meta property="og:title" content="The Movie">"#));
        assert!(html.contains(r#"title="The Movie - Player 1""#));
        assert!(html.contains(r#"src="https://player/2?a=1&amp;b=2""#));
        assert!(html.contains("<h3>360p Quality Links ServerOne</h3>"));
        assert!(html.contains("Click To Download (Link 1 ServerOne 360p)"));
        assert!(html.contains("Click To Download (Link 2 ServerOne 720p)"));
        assert!(html.contains(r#"href="https://dl/3" target="_blank""#));
    }

    #[test]
    fn test_render_missing_post_is_empty_shell() {
        let html = render_post(None);
        assert!(html.contains("<h1></h1>"));
        assert!(!html.contains("<iframe"));
        assert!(!html.contains("class=\"provider\""));
    }
}
