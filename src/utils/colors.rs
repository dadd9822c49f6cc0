/// ANSI color helper utilities for terminal output.
use crate::models::access_result::AccessResult;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// allowed → green, denied → red
pub fn color_for_result(result: AccessResult) -> &'static str {
    match result {
        AccessResult::Allowed => GREEN,
        AccessResult::Denied => RED,
    }
}
