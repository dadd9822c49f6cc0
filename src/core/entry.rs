use crate::core::clock::Clock;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::insert_record;
use crate::errors::{AppError, AppResult};
use crate::models::access_record::AccessRecord;
use crate::models::access_result::AccessResult;

/// Business logic for recording an entry attempt.
pub struct EntryLogic;

impl EntryLogic {
    /// Check the caller's input without touching the store.
    ///
    /// Returns the trimmed name and the normalised reason: denied entries
    /// need a non-blank reason, allowed entries must not carry one.
    pub fn validate(
        name: &str,
        result: AccessResult,
        reason: Option<&str>,
    ) -> AppResult<(String, Option<String>)> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::EmptyName);
        }

        let reason = reason.map(str::trim).filter(|r| !r.is_empty());

        match (result, reason) {
            (AccessResult::Denied, None) => Err(AppError::MissingReason),
            (AccessResult::Allowed, Some(_)) => Err(AppError::UnexpectedReason),
            (_, r) => Ok((name.to_string(), r.map(str::to_string))),
        }
    }

    /// Create exactly one new record stamped with the clock's date and time.
    pub fn apply(
        pool: &mut DbPool,
        clock: &dyn Clock,
        name: &str,
        result: AccessResult,
        reason: Option<&str>,
    ) -> AppResult<AccessRecord> {
        let (name, reason) = Self::validate(name, result, reason)?;

        let date = clock.today();
        let entry_time = clock.time();

        let id = insert_record(
            &pool.conn,
            &name,
            date,
            entry_time,
            result,
            reason.as_deref(),
        )?;

        let record = AccessRecord {
            id,
            name,
            date,
            entry_time,
            exit_time: None,
            result,
            reason,
        };

        let message = match &record.reason {
            Some(r) => format!("Entry {} at {} ({})", result.ar_as_str(), record.entry_time_str(), r),
            None => format!("Entry {} at {}", result.ar_as_str(), record.entry_time_str()),
        };
        ttlog_quiet(&pool.conn, "entry", &record.name, &message);

        Ok(record)
    }
}
