use crate::core::clock::Clock;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::{find_open_entry, set_exit_time};
use crate::errors::{AppError, AppResult};
use crate::models::access_record::AccessRecord;

/// What happened to an exit request. Not finding an open entry is a
/// normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitOutcome {
    Closed(AccessRecord),
    NoOpenEntry,
}

pub struct ExitLogic;

impl ExitLogic {
    /// Close today's most recent open allowed entry of `name`.
    ///
    /// When several allowed entries of the same person are open on the same
    /// day, the one with the highest id wins. Denied entries are never
    /// candidates.
    pub fn apply(pool: &mut DbPool, clock: &dyn Clock, name: &str) -> AppResult<ExitOutcome> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::EmptyName);
        }

        let today = clock.today();
        let Some(mut record) = find_open_entry(&pool.conn, name, today)? else {
            return Ok(ExitOutcome::NoOpenEntry);
        };

        let exit_time = clock.time();
        if !set_exit_time(&pool.conn, record.id, exit_time)? {
            return Ok(ExitOutcome::NoOpenEntry);
        }
        record.exit_time = Some(exit_time);

        ttlog_quiet(
            &pool.conn,
            "exit",
            name,
            &format!(
                "Exit at {} (record #{})",
                record.exit_time_str().unwrap_or_default(),
                record.id
            ),
        );

        Ok(ExitOutcome::Closed(record))
    }
}
