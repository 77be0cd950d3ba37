// Copyright 2026 Marquee Contributors
// SPDX-License-Identifier: Apache-2.0

//! Mock posts catalog behind `GET /api/posts`.
//!
//! A fixed in-memory set of post summaries standing in for a database,
//! complete with a simulated query delay.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One record of the mock catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: u32,
    pub title: String,
    pub content: String,
    pub published_at: DateTime<Utc>,
}

/// How a catalog lookup by raw id turned out.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<'a> {
    All(&'a [PostSummary]),
    One(&'a PostSummary),
    NotFound,
}

/// The in-memory catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    posts: Vec<PostSummary>,
    delay: Duration,
}

impl Catalog {
    /// The three fixed records, in insertion order.
    pub fn seeded(delay: Duration) -> Self {
        let posts = vec![
            summary(
                1,
                "Getting Started with Next.js",
                "Learn how to build modern web applications with Next.js, React, and TypeScript.",
                Utc.with_ymd_and_hms(2025, 8, 1, 10, 0, 0),
            ),
            summary(
                2,
                "Understanding ISG in Next.js",
                "A deep dive into Incremental Static Regeneration and how it can improve your Next.js apps.",
                Utc.with_ymd_and_hms(2025, 8, 5, 15, 30, 0),
            ),
            summary(
                3,
                "Building a Blog with Next.js",
                "Step-by-step guide to building a modern blog with Next.js and Markdown.",
                Utc.with_ymd_and_hms(2025, 8, 10, 9, 15, 0),
            ),
        ];
        Self { posts, delay }
    }

    pub fn all(&self) -> &[PostSummary] {
        &self.posts
    }

    pub fn get(&self, id: u32) -> Option<&PostSummary> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// Resolve a raw `id` query value.
    ///
    /// Absent or empty means everything. Otherwise the value is read as a
    /// number (surrounding whitespace allowed, `2.0` equals `2`, `0x2`,
    /// `0o2` and `0b10` too); anything that does not name a record is not
    /// found.
    pub fn lookup(&self, raw_id: Option<&str>) -> Lookup<'_> {
        let raw = match raw_id {
            None | Some("") => return Lookup::All(&self.posts),
            Some(raw) => raw,
        };

        let Some(wanted) = parse_numeric_id(raw) else {
            return Lookup::NotFound;
        };
        match self.posts.iter().find(|p| f64::from(p.id) == wanted) {
            Some(post) => Lookup::One(post),
            None => Lookup::NotFound,
        }
    }

    /// Wait out the simulated query latency.
    pub async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// Read an id the way a loose numeric query value is read: decimal or
/// float notation, or an unsigned `0x`/`0o`/`0b` integer.
fn parse_numeric_id(raw: &str) -> Option<f64> {
    let s = raw.trim();
    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        let Some(head) = s.get(..2) else { break };
        if head.eq_ignore_ascii_case(prefix) {
            let digits = &s[2..];
            if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_alphanumeric()) {
                return None;
            }
            return u64::from_str_radix(digits, radix).ok().map(|n| n as f64);
        }
    }
    s.parse().ok()
}

fn summary(
    id: u32,
    title: &str,
    content: &str,
    published_at: chrono::LocalResult<DateTime<Utc>>,
) -> PostSummary {
    PostSummary {
        id,
        title: title.to_string(),
        content: content.to_string(),
        published_at: published_at.single().unwrap_or_default(),
    }
}
