// Copyright 2026 Marquee Contributors
// SPDX-License-Identifier: Apache-2.0

//! Shared CLI output formatting: global flags, colors and JSON printing.

use std::io::IsTerminal;

pub const ENV_JSON: &str = "MARQUEE_JSON";
pub const ENV_QUIET: &str = "MARQUEE_QUIET";
pub const ENV_VERBOSE: &str = "MARQUEE_VERBOSE";
pub const ENV_NO_COLOR: &str = "MARQUEE_NO_COLOR";

/// Whether `--json` was given.
pub fn is_json() -> bool {
    std::env::var(ENV_JSON).is_ok()
}

/// Whether `--quiet` was given.
pub fn is_quiet() -> bool {
    std::env::var(ENV_QUIET).is_ok()
}

/// Whether `--verbose` was given.
pub fn is_verbose() -> bool {
    std::env::var(ENV_VERBOSE).is_ok()
}

/// Check if color output is enabled.
pub fn color_enabled() -> bool {
    // Respect NO_COLOR env (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() || std::env::var(ENV_NO_COLOR).is_ok() {
        return false;
    }
    std::io::stdout().is_terminal()
}

/// Pretty-print a JSON value to stdout.
pub fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(_) => println!("{value}"),
    }
}

const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Colored string builder.
pub struct Styled {
    use_color: bool,
}

impl Styled {
    pub fn new() -> Self {
        Self {
            use_color: color_enabled(),
        }
    }

    /// Builder with color forced on or off.
    pub fn with_color(use_color: bool) -> Self {
        Self { use_color }
    }

    /// Green checkmark symbol.
    pub fn ok_sym(&self) -> String {
        if self.use_color {
            format!("{GREEN}\u{2713}{RESET}")
        } else {
            "OK".to_string()
        }
    }

    pub fn cyan(&self, s: &str) -> String {
        self.paint(CYAN, s)
    }

    pub fn dim(&self, s: &str) -> String {
        self.paint(DIM, s)
    }

    pub fn bold(&self, s: &str) -> String {
        self.paint(BOLD, s)
    }

    fn paint(&self, code: &str, s: &str) -> String {
        if self.use_color {
            format!("{code}{s}{RESET}")
        } else {
            s.to_string()
        }
    }
}

impl Default for Styled {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styled_plain() {
        let s = Styled::with_color(false);
        assert_eq!(s.bold("x"), "x");
        assert_eq!(s.ok_sym(), "OK");
    }

    #[test]
    fn test_styled_color() {
        let s = Styled::with_color(true);
        assert_eq!(s.ok_sym(), "\x1b[32m\u{2713}\x1b[0m");
        assert_eq!(s.cyan("x"), "\x1b[36mx\x1b[0m");
    }
}
