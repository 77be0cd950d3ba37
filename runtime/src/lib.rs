// Copyright 2026 Marquee Contributors
// SPDX-License-Identifier: Apache-2.0

//! Marquee runtime library — scraping front end for a movie-listing site.
//!
//! This library crate exposes the runtime modules for the binary and for
//! integration testing.

pub mod acquisition;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod render;
pub mod rest;
