//! Terminal output for the ledger: one coloured line per event.
//! Errors go to stderr, everything else to stdout.

use std::fmt;
use unicode_width::UnicodeWidthStr;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_CYAN: &str = "\x1b[36m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

/// Headers never get narrower than this.
const MIN_RULE: usize = 40;

fn line<T: fmt::Display>(color: &str, icon: &str, msg: T) -> String {
    format!("{color}{BOLD}{icon} {RESET}{msg}")
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}", line(FG_BLUE, ICON_INFO, msg));
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}", line(FG_GREEN, ICON_OK, msg));
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}", line(FG_YELLOW, ICON_WARN, msg));
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}", line(FG_RED, ICON_ERR, msg));
}

/// Start of a maintenance step (`db --check`, `db --vacuum`, ...).
pub fn step<T: fmt::Display>(msg: T) {
    println!("{FG_CYAN}▶ {msg}…{RESET}");
}

/// Title underlined with `sep`, as wide as the title or `MIN_RULE`.
pub fn header<T: fmt::Display>(title: T, sep: &str) {
    let title = title.to_string();
    let sep = if sep.is_empty() { "-" } else { sep };
    let width = title.width().max(MIN_RULE);
    let rule = sep.repeat(width.div_ceil(sep.width().max(1)));
    println!("\n{FG_BLUE}{BOLD}{title}\n{rule}{RESET}");
}
