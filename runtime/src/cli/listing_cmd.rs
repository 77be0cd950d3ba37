// Copyright 2026 Marquee Contributors
// SPDX-License-Identifier: Apache-2.0

//! `marquee listing` — scrape and print the listing page.

use crate::cli::output::{self, Styled};
use crate::config::RuntimeConfig;
use anyhow::Result;
use marquee::ListingItem;

/// Run the listing command.
pub async fn run(config: &RuntimeConfig, limit: Option<usize>) -> Result<()> {
    let site = config.site_client()?;
    let mut items = site.listing().await?;
    if let Some(limit) = limit {
        items.truncate(limit);
    }

    if output::is_json() {
        output::print_json(&serde_json::to_value(&items)?);
        return Ok(());
    }

    print!("{}", format_listing(&items, &Styled::new()));
    Ok(())
}

fn format_listing(items: &[ListingItem], s: &Styled) -> String {
    if items.is_empty() {
        return "  No listings found.\n".to_string();
    }

    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        out.push_str(&format!("  {:>3}. {}\n", i + 1, s.bold(&item.title)));
        out.push_str(&format!("       {}\n", s.cyan(&item.link)));
        if !item.image.is_empty() {
            out.push_str(&format!("       {}\n", s.dim(&item.image)));
        }
    }
    out.push_str(&format!("\n  {} listings\n", items.len()));
    out
}
