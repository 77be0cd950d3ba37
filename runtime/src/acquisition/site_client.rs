// Copyright 2026 Marquee Contributors
// SPDX-License-Identifier: Apache-2.0

//! Fetch-then-extract for the two page shapes of the site.
//!
//! The DOM built by `scraper` is `!Send`, so extraction runs inside the
//! synchronous `marquee` functions after the body has been read; nothing
//! parsed is held across an await point.

use super::http_client::{FetchMode, PageSource};
use anyhow::Result;
use marquee::{ListingItem, Post, SiteProfile};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Scrapes listings and posts from one site.
#[derive(Clone)]
pub struct SiteClient {
    site: SiteProfile,
    source: Arc<dyn PageSource>,
    /// Hosts listing images are expected to come from. Empty disables the check.
    image_hosts: Vec<String>,
}

impl SiteClient {
    pub fn new(site: SiteProfile, source: Arc<dyn PageSource>) -> Self {
        Self {
            site,
            source,
            image_hosts: Vec::new(),
        }
    }

    /// Warn about listing images served from hosts outside `hosts`.
    pub fn with_image_hosts(mut self, hosts: Vec<String>) -> Self {
        self.image_hosts = hosts;
        self
    }

    pub fn site(&self) -> &SiteProfile {
        &self.site
    }

    /// Fetch the listing page and extract its cards.
    pub async fn listing(&self) -> Result<Vec<ListingItem>> {
        let url = self.site.listing_url();
        info!(url, "fetching listing");
        let started = Instant::now();

        let html = self.source.fetch_page(url, FetchMode::Default).await?;
        let items = marquee::extract_listing(&html, &self.site);

        debug!(
            count = items.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "listing ready"
        );
        self.check_image_hosts(&items);
        Ok(items)
    }

    /// Fetch one post page. `Ok(None)` means the page has no title or player.
    pub async fn post(&self, id: &str) -> Result<Option<Post>> {
        let url = self.site.post_url(id);
        info!(url = %url, "fetching post");
        let started = Instant::now();

        let html = self.source.fetch_page(&url, FetchMode::NoStore).await?;
        let post = marquee::extract_post(&html);

        match &post {
            Some(p) => debug!(
                videos = p.videos.len(),
                providers = p.download_links.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "post ready"
            ),
            None => debug!(url = %url, "post page has no title or player"),
        }
        Ok(post)
    }

    fn check_image_hosts(&self, items: &[ListingItem]) {
        if self.image_hosts.is_empty() {
            return;
        }
        for item in items.iter().filter(|i| !i.image.is_empty()) {
            let host = url::Url::parse(&item.image)
                .ok()
                .and_then(|u| u.host_str().map(|h| h.to_string()));
            match host {
                Some(h) if self.image_hosts.iter().any(|allowed| allowed == &h) => {}
                _ => warn!(image = %item.image, "listing image from unexpected host"),
            }
        }
    }
}
