use super::access_result::AccessResult;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

pub const DATE_FMT: &str = "%Y-%m-%d";
pub const TIME_FMT: &str = "%H:%M:%S";

/// One row of the `access_log` table: a single entry attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRecord {
    pub id: i64,
    pub name: String,
    pub date: NaiveDate,              // ⇔ access_log.date (TEXT "YYYY-MM-DD")
    pub entry_time: NaiveTime,        // ⇔ access_log.entry_time (TEXT "HH:MM:SS")
    pub exit_time: Option<NaiveTime>, // ⇔ access_log.exit_time (NULL until exit)
    pub result: AccessResult,         // ⇔ access_log.result ('allowed' | 'denied')
    pub reason: Option<String>,       // ⇔ access_log.reason (only when denied)
}

impl AccessRecord {
    pub fn date_str(&self) -> String {
        self.date.format(DATE_FMT).to_string()
    }

    pub fn entry_time_str(&self) -> String {
        self.entry_time.format(TIME_FMT).to_string()
    }

    pub fn exit_time_str(&self) -> Option<String> {
        self.exit_time.map(|t| t.format(TIME_FMT).to_string())
    }

    /// An allowed entry that has not been closed by an exit yet.
    pub fn is_open(&self) -> bool {
        self.result.is_allowed() && self.exit_time.is_none()
    }

    /// Wire representation used by the remote archive.
    pub fn to_archived(&self) -> ArchivedRecord {
        ArchivedRecord {
            id: self.id,
            name: self.name.clone(),
            date: self.date_str(),
            entry_time: self.entry_time_str(),
            exit_time: self.exit_time_str(),
            result: self.result,
            reason: self.reason.clone(),
        }
    }
}

/// Flat, string-typed view of a record as sent to the archive server.
#[derive(Debug, Clone, Serialize)]
pub struct ArchivedRecord {
    pub id: i64,
    pub name: String,
    pub date: String,
    pub entry_time: String,
    pub exit_time: Option<String>,
    pub result: AccessResult,
    pub reason: Option<String>,
}
