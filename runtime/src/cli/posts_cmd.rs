// Copyright 2026 Marquee Contributors
// SPDX-License-Identifier: Apache-2.0

//! `marquee posts` — print the mock posts catalog.

use crate::catalog::{Catalog, Lookup};
use crate::cli::output::{self, Styled};
use anyhow::{bail, Result};
use std::time::Duration;

/// Run the posts command. No artificial delay is applied here.
pub async fn run(id: Option<&str>) -> Result<()> {
    let catalog = Catalog::seeded(Duration::ZERO);
    let s = Styled::new();

    let (posts, value) = match catalog.lookup(id) {
        Lookup::All(all) => (all.to_vec(), serde_json::to_value(all)?),
        Lookup::One(one) => (vec![one.clone()], serde_json::to_value(one)?),
        Lookup::NotFound => bail!("Not found"),
    };

    if output::is_json() {
        output::print_json(&value);
        return Ok(());
    }

    for post in &posts {
        println!("  {:>2}. {}", post.id, s.bold(&post.title));
        println!("      {}", post.content);
        println!("      {}", s.dim(&post.published_at.to_rfc3339()));
    }
    Ok(())
}
