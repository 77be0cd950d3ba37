// Copyright 2026 Marquee Contributors
// SPDX-License-Identifier: Apache-2.0

//! Runtime configuration.
//!
//! Every value resolves as: command-line flag, then `MARQUEE_*` environment
//! variable, then built-in default. Unparseable environment values are
//! ignored with a warning.

use anyhow::{Context, Result};
use marquee::{SiteProfile, DEFAULT_ORIGIN};
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use crate::acquisition::http_client::DEFAULT_USER_AGENT;
use crate::acquisition::{HttpClient, SiteClient};

pub const ENV_ORIGIN: &str = "MARQUEE_ORIGIN";
pub const ENV_HOST: &str = "MARQUEE_HOST";
pub const ENV_PORT: &str = "MARQUEE_PORT";
pub const ENV_TIMEOUT_MS: &str = "MARQUEE_TIMEOUT_MS";
pub const ENV_MAX_RETRIES: &str = "MARQUEE_MAX_RETRIES";
pub const ENV_REVALIDATE_SECS: &str = "MARQUEE_REVALIDATE_SECS";
pub const ENV_CATALOG_DELAY_MS: &str = "MARQUEE_CATALOG_DELAY_MS";

/// Resolved configuration for the CLI and web server.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    pub origin: String,
    pub host: String,
    pub port: u16,
    pub timeout_ms: u64,
    pub max_retries: u32,
    pub user_agent: String,
    pub listing_revalidate_secs: u64,
    pub post_revalidate_secs: u64,
    /// Artificial latency of the mock posts endpoint.
    pub catalog_delay_ms: u64,
    pub allowed_image_hosts: Vec<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            timeout_ms: 15_000,
            max_retries: 0,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            listing_revalidate_secs: 60,
            post_revalidate_secs: 60,
            catalog_delay_ms: 300,
            allowed_image_hosts: vec![
                "localhost".to_string(),
                "www.watch-movies.com.pk".to_string(),
            ],
        }
    }
}

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub origin: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl RuntimeConfig {
    /// Resolve from the process environment and CLI overrides.
    pub fn resolve(overrides: &ConfigOverrides) -> Result<Self> {
        Self::resolve_with(overrides, |key| std::env::var(key).ok())
    }

    /// Resolve using `lookup` in place of the process environment.
    pub fn resolve_with<F>(overrides: &ConfigOverrides, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(origin) = lookup(ENV_ORIGIN) {
            cfg.origin = origin;
        }
        if let Some(host) = lookup(ENV_HOST) {
            cfg.host = host;
        }
        if let Some(port) = parse_env(&lookup, ENV_PORT) {
            cfg.port = port;
        }
        if let Some(ms) = parse_env(&lookup, ENV_TIMEOUT_MS) {
            cfg.timeout_ms = ms;
        }
        if let Some(n) = parse_env(&lookup, ENV_MAX_RETRIES) {
            cfg.max_retries = n;
        }
        if let Some(secs) = parse_env(&lookup, ENV_REVALIDATE_SECS) {
            cfg.listing_revalidate_secs = secs;
            cfg.post_revalidate_secs = secs;
        }
        if let Some(ms) = parse_env(&lookup, ENV_CATALOG_DELAY_MS) {
            cfg.catalog_delay_ms = ms;
        }

        if let Some(origin) = &overrides.origin {
            cfg.origin = origin.clone();
        }
        if let Some(host) = &overrides.host {
            cfg.host = host.clone();
        }
        if let Some(port) = overrides.port {
            cfg.port = port;
        }

        // Validate early so a typo fails at startup rather than per request.
        let site = cfg.site()?;
        cfg.origin = site.origin;
        Ok(cfg)
    }

    /// The site profile for the configured origin.
    pub fn site(&self) -> Result<SiteProfile> {
        SiteProfile::new(&self.origin).with_context(|| format!("invalid origin {:?}", self.origin))
    }

    /// A site client backed by a real HTTP client.
    pub fn site_client(&self) -> Result<SiteClient> {
        let http = HttpClient::new(self.timeout_ms, &self.user_agent, self.max_retries);
        Ok(SiteClient::new(self.site()?, Arc::new(http))
            .with_image_hosts(self.allowed_image_hosts.clone()))
    }

    /// Address the web server binds to. `host` may be a name such as
    /// `localhost`; the first resolved address wins.
    pub async fn bind_addr(&self) -> Result<SocketAddr> {
        let raw = format!("{}:{}", self.host, self.port);
        tokio::net::lookup_host((self.host.as_str(), self.port))
            .await
            .with_context(|| format!("invalid listen address {raw:?}"))?
            .next()
            .with_context(|| format!("listen address {raw:?} resolved to nothing"))
    }
}

fn parse_env<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!("ignoring {key}={raw:?}: not a valid value");
            None
        }
    }
}
