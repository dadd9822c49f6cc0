use crate::core::clock::Clock;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::{count_older_than, delete_records, load_older_than};
use crate::errors::{AppError, AppResult};
use crate::models::access_record::AccessRecord;
use crate::sync::client::{ArchiveAck, ArchiveClient};
use crate::utils::date;
use chrono::NaiveDate;

pub const DEFAULT_RETENTION_DAYS: i64 = 30;

/// Upper bound for any retention window (a century).
pub const MAX_RETENTION_DAYS: i64 = 36_500;

/// Result of an archive-and-purge run that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveOutcome {
    /// No record is past the retention window.
    NothingToDo,
    /// The operator declined; nothing was sent or deleted.
    Cancelled { pending: usize },
    /// The server acknowledged the batch and it was purged locally.
    Archived {
        sent: usize,
        deleted: usize,
        diagnostic: Option<String>,
    },
}

pub struct RetentionLogic;

impl RetentionLogic {
    /// Records dated strictly before this day are stale.
    pub fn cutoff(today: NaiveDate, cutoff_days: i64) -> AppResult<NaiveDate> {
        if cutoff_days < 0 {
            return Err(AppError::Config(format!(
                "retention_days must not be negative (got {})",
                cutoff_days
            )));
        }
        if cutoff_days > MAX_RETENTION_DAYS {
            return Err(AppError::Config(format!(
                "retention_days must not exceed {} (got {})",
                MAX_RETENTION_DAYS, cutoff_days
            )));
        }
        date::days_before(today, cutoff_days).ok_or_else(|| {
            AppError::Config(format!(
                "retention_days {} reaches past the supported calendar",
                cutoff_days
            ))
        })
    }

    /// A window that may be used for deletion: nothing younger than
    /// `DEFAULT_RETENTION_DAYS` ever leaves the local store.
    pub fn check_purge_window(cutoff_days: i64) -> AppResult<()> {
        if cutoff_days < DEFAULT_RETENTION_DAYS {
            return Err(AppError::Config(format!(
                "archive window must be at least {} days (got {})",
                DEFAULT_RETENTION_DAYS, cutoff_days
            )));
        }
        Ok(())
    }

    /// Every record with `date < today - cutoff_days`, oldest first.
    pub fn select_stale(
        pool: &mut DbPool,
        clock: &dyn Clock,
        cutoff_days: i64,
    ) -> AppResult<Vec<AccessRecord>> {
        let cutoff = Self::cutoff(clock.today(), cutoff_days)?;
        load_older_than(&pool.conn, cutoff)
    }

    pub fn count_stale(pool: &mut DbPool, clock: &dyn Clock, cutoff_days: i64) -> AppResult<i64> {
        let cutoff = Self::cutoff(clock.today(), cutoff_days)?;
        count_older_than(&pool.conn, cutoff)
    }

    /// Send every stale record to the archive as one batch and delete those
    /// exact ids locally once the server acknowledged them.
    ///
    /// `confirm` receives the number of stale records and decides whether
    /// to go on. A window shorter than `DEFAULT_RETENTION_DAYS`, a refused
    /// client (sync disabled, no endpoint) or a failed send returns the
    /// error and leaves the store untouched.
    pub fn archive_and_purge<C, F>(
        pool: &mut DbPool,
        clock: &dyn Clock,
        client: &C,
        cutoff_days: i64,
        confirm: F,
    ) -> AppResult<ArchiveOutcome>
    where
        C: ArchiveClient + ?Sized,
        F: FnOnce(usize) -> bool,
    {
        Self::check_purge_window(cutoff_days)?;

        let stale = Self::select_stale(pool, clock, cutoff_days)?;
        if stale.is_empty() {
            return Ok(ArchiveOutcome::NothingToDo);
        }

        client.check_ready()?;

        if !confirm(stale.len()) {
            return Ok(ArchiveOutcome::Cancelled {
                pending: stale.len(),
            });
        }

        let sync_date = clock.timestamp();
        let ArchiveAck { diagnostic } = match client.send_batch(&stale, &sync_date) {
            Ok(ack) => ack,
            Err(e) => {
                ttlog_quiet(
                    &pool.conn,
                    "archive",
                    &client.target(),
                    &format!("Sync of {} records failed, nothing deleted: {}", stale.len(), e),
                );
                return Err(e);
            }
        };

        let ids: Vec<i64> = stale.iter().map(|r| r.id).collect();
        let deleted = delete_records(&mut pool.conn, &ids)?;

        ttlog_quiet(
            &pool.conn,
            "archive",
            &client.target(),
            &format!("Archived {} records, deleted {} locally", stale.len(), deleted),
        );

        Ok(ArchiveOutcome::Archived {
            sent: stale.len(),
            deleted,
            diagnostic,
        })
    }
}
