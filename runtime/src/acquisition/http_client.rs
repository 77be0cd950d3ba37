// Copyright 2026 Marquee Contributors
// SPDX-License-Identifier: Apache-2.0

//! Async HTTP client wrapping reqwest.
//!
//! Fetches raw page HTML. Handles redirects and timeouts; retry on 5xx,
//! 429 and transport errors is available but off unless configured.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Browser-like user agent; the site serves a stripped page to unknown agents.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                                      AppleWebKit/537.36 (KHTML, like Gecko) \
                                      Chrome/131.0.0.0 Safari/537.36";

/// Response from an HTTP GET request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Final URL after redirects.
    pub final_url: String,
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Per-request cache behaviour for outbound fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Let intermediaries serve a cached copy.
    Default,
    /// Ask intermediaries for a fresh copy (`Cache-Control: no-store`).
    NoStore,
}

/// Something that can return the HTML body of a URL.
///
/// [`HttpClient`] is the real implementation; tests substitute canned pages.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, url: &str, mode: FetchMode) -> Result<String>;
}

/// HTTP client for page acquisition.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    /// HTTP/1.1-only fallback client for hosts that reject HTTP/2.
    h1_client: reqwest::Client,
    timeout: Duration,
    max_retries: u32,
}

impl HttpClient {
    /// Create a new HTTP client.
    pub fn new(timeout_ms: u64, user_agent: &str, max_retries: u32) -> Self {
        let timeout = Duration::from_millis(timeout_ms);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(user_agent)
            .build()
            .unwrap_or_default();

        let h1_client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(user_agent)
            .http1_only()
            .build()
            .unwrap_or_default();

        Self {
            client,
            h1_client,
            timeout,
            max_retries,
        }
    }

    /// Perform a GET request, retrying up to `max_retries` times.
    ///
    /// Falls back to HTTP/1.1 on protocol errors (some CDNs reject HTTP/2).
    pub async fn get(&self, url: &str, mode: FetchMode) -> Result<HttpResponse> {
        match self.get_inner(&self.client, url, mode).await {
            Ok(resp) => Ok(resp),
            Err(e) => {
                let err_str = format!("{e:#}");
                if err_str.contains("http2")
                    || err_str.contains("protocol")
                    || err_str.contains("connection closed")
                {
                    tracing::debug!(url, "retrying over HTTP/1.1 after: {err_str}");
                    self.get_inner(&self.h1_client, url, mode).await
                } else {
                    Err(e)
                }
            }
        }
    }

    async fn get_inner(
        &self,
        client: &reqwest::Client,
        url: &str,
        mode: FetchMode,
    ) -> Result<HttpResponse> {
        let mut retries = 0u32;

        loop {
            let mut req = client.get(url).timeout(self.timeout);
            if mode == FetchMode::NoStore {
                req = req.header(reqwest::header::CACHE_CONTROL, "no-store");
            }

            match req.send().await {
                Ok(r) => {
                    let status = r.status().as_u16();
                    let final_url = r.url().to_string();

                    // Retry on 5xx
                    if status >= 500 && retries < self.max_retries {
                        retries += 1;
                        tokio::time::sleep(backoff(retries)).await;
                        continue;
                    }

                    // Backoff on 429
                    if status == 429 && retries < self.max_retries {
                        retries += 1;
                        let retry_after = r
                            .headers()
                            .get("retry-after")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|s| s.parse::<u64>().ok())
                            .unwrap_or(2);
                        tokio::time::sleep(Duration::from_secs(retry_after.min(10))).await;
                        continue;
                    }

                    let body = r
                        .text()
                        .await
                        .with_context(|| format!("failed to read body of {url}"))?;

                    return Ok(HttpResponse {
                        final_url,
                        status,
                        body,
                    });
                }
                Err(e) => {
                    if retries < self.max_retries {
                        retries += 1;
                        tokio::time::sleep(backoff(retries)).await;
                        continue;
                    }
                    return Err(anyhow::Error::new(e).context(format!("GET {url} failed")));
                }
            }
        }
    }
}

/// Exponential backoff: 500ms, 1s, 2s, ...
fn backoff(attempt: u32) -> Duration {
    Duration::from_millis(500 * 2u64.pow(attempt.saturating_sub(1).min(6)))
}

#[async_trait]
impl PageSource for HttpClient {
    /// Return the body whatever the status; error pages simply extract to nothing.
    async fn fetch_page(&self, url: &str, mode: FetchMode) -> Result<String> {
        let resp = self.get(url, mode).await?;
        if resp.final_url != url {
            tracing::debug!(url, final_url = %resp.final_url, "followed redirect");
        }
        if !resp.is_success() {
            tracing::warn!(url, status = resp.status, "upstream returned non-success status");
        }
        Ok(resp.body)
    }
}
