// Copyright 2026 Marquee Contributors
// SPDX-License-Identifier: Apache-2.0

//! `marquee serve` — run the web front end.

use crate::cli::output::{self, Styled};
use crate::config::RuntimeConfig;
use crate::rest::{self, AppState};
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

/// Start the web server and block until shutdown.
pub async fn run(config: RuntimeConfig) -> Result<()> {
    let s = Styled::new();
    let addr = config.bind_addr().await?;

    info!(
        origin = %config.origin,
        "starting Marquee v{}",
        env!("CARGO_PKG_VERSION")
    );

    if !output::is_quiet() && !output::is_json() {
        eprintln!(
            "  {} Marquee v{} scraping {}",
            s.ok_sym(),
            env!("CARGO_PKG_VERSION"),
            s.cyan(&config.origin)
        );
        eprintln!("  Listening on http://{addr}");
    }

    let state = Arc::new(AppState::from_config(config)?);
    rest::start(addr, state).await
}
