// Copyright 2026 Marquee Contributors
// SPDX-License-Identifier: Apache-2.0

//! CLI subcommand implementations for the Marquee binary.

pub mod listing_cmd;
pub mod output;
pub mod post_cmd;
pub mod posts_cmd;
pub mod serve;
