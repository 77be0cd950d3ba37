// Copyright 2026 Marquee Contributors
// SPDX-License-Identifier: Apache-2.0

//! Page acquisition: raw HTTP fetches and the site-aware client on top.

pub mod http_client;
pub mod site_client;

pub use http_client::{FetchMode, HttpClient, PageSource};
pub use site_client::SiteClient;
