use clap::ValueEnum;
use serde::Serialize;

/// Outcome of an entry decision. Immutable once a record is created.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AccessResult {
    Allowed,
    Denied,
}

impl AccessResult {
    /// Lowercase name, as stored in `access_log.result` and shown to users.
    pub fn ar_as_str(&self) -> &'static str {
        match self {
            AccessResult::Allowed => "allowed",
            AccessResult::Denied => "denied",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "allowed" => Some(AccessResult::Allowed),
            "denied" => Some(AccessResult::Denied),
            _ => None,
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessResult::Allowed)
    }
}
