// Copyright 2026 Marquee Contributors
// SPDX-License-Identifier: Apache-2.0

//! `marquee post <id>` — scrape and print one post.

use crate::cli::output::{self, Styled};
use crate::config::RuntimeConfig;
use anyhow::{bail, Result};
use marquee::{DownloadLink, Post};

/// Run the post command. A page without title or player is an error.
pub async fn run(config: &RuntimeConfig, id: &str) -> Result<()> {
    let site = config.site_client()?;
    let Some(post) = site.post(id).await? else {
        bail!("post {id:?} not found");
    };

    if output::is_json() {
        output::print_json(&serde_json::to_value(&post)?);
        return Ok(());
    }

    print!("{}", format_post(&post, &Styled::new()));
    Ok(())
}

fn format_post(post: &Post, s: &Styled) -> String {
    let mut out = format!("  {}\n\n", s.bold(&post.title));

    out.push_str("  Players\n");
    for (i, video) in post.videos.iter().enumerate() {
        out.push_str(&format!("    {}. {}\n", i + 1, s.cyan(video)));
    }

    for provider in &post.download_links {
        out.push_str(&format!("\n  {}\n", s.bold(&provider.name)));
        push_bucket(&mut out, "360p", &provider.links_360, s);
        push_bucket(&mut out, "720p", &provider.links_720, s);
    }
    out
}

fn push_bucket(out: &mut String, quality: &str, links: &[DownloadLink], s: &Styled) {
    if links.is_empty() {
        return;
    }
    out.push_str(&format!("    {quality}\n"));
    for link in links {
        out.push_str(&format!("      {} {}\n", link.url, s.dim(&link.label)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee::ProviderLinks;

    #[test]
    fn test_format_post() {
        let mut provider = ProviderLinks::new("Mega");
        provider.links_720.push(DownloadLink {
            url: "https://dl/1".into(),
            label: "(Link 1 Mega 720p)".into(),
        });
        let post = Post {
            title: "Movie".into(),
            videos: vec!["https://v/1".into()],
            download_links: vec![provider],
        };

        let text = format_post(&post, &Styled::with_color(false));
        assert!(text.starts_with("  Movie\n"));
        assert!(text.contains("    1. https://v/1"));
        assert!(text.contains("    720p\n      https://dl/1 (Link 1 Mega 720p)"));
        assert!(!text.contains("360p"));
    }
}
