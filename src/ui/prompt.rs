//! Terminal input helpers. Only the CLI layer talks to stdin; the core
//! logic receives the answers as plain values.

use super::messages::warning;
use std::io::{self, Write};

/// Read one trimmed line from stdin after printing `label`.
/// EOF or a read error yields an empty string.
pub fn read_line(label: &str) -> String {
    print!("{}", label);
    let _ = io::stdout().flush();

    let mut s = String::new();
    match io::stdin().read_line(&mut s) {
        Ok(_) => s.trim().to_string(),
        Err(_) => String::new(),
    }
}

/// Ask a yes/no confirmation. Anything but "y"/"yes" is a no.
pub fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    let answer = read_line("Do you want to proceed? (yes/no): ");
    matches!(answer.to_lowercase().as_str(), "y" | "yes")
}
