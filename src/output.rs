//! Terminal styling for build, ls and order status lines.
//!
//! `--color auto` turns styling off when `NO_COLOR` is set, `CLICOLOR` is
//! `0` or `TERM` is `dumb`, and on when `CLICOLOR_FORCE` is set. Otherwise
//! it follows what the stdout terminal reports.

use std::env;

use console::style;

/// Whether status lines use colors and emoji
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    /// Resolves the `--color` value. Unrecognised values behave like `auto`.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = if color_flag.eq_ignore_ascii_case("always") {
            true
        } else if color_flag.eq_ignore_ascii_case("never") {
            false
        } else {
            terminal_wants_color()
        };
        Self { use_color }
    }

    /// `[OK]`, or a green check mark when styled
    pub fn success_marker(&self) -> String {
        if self.use_color {
            style("✅").green().to_string()
        } else {
            "[OK]".to_string()
        }
    }

    /// Library name, in bold when styled
    pub fn library(&self, name: &str) -> String {
        if self.use_color {
            style(name).bold().to_string()
        } else {
            name.to_string()
        }
    }
}

fn terminal_wants_color() -> bool {
    let set_to = |name: &str, value: &str| env::var(name).map_or(false, |v| v == value);

    if env::var_os("NO_COLOR").is_some() || set_to("CLICOLOR", "0") {
        return false;
    }
    if env::var("CLICOLOR_FORCE").map_or(false, |v| !v.is_empty() && v != "0") {
        return true;
    }
    if set_to("TERM", "dumb") {
        return false;
    }
    console::Term::stdout().features().colors_supported()
}

/// Picks `styled` or `plain` for a status-line prefix.
pub fn emoji<'a>(config: &OutputConfig, styled: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        styled
    } else {
        plain
    }
}
