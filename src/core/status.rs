use crate::config::Config;
use crate::core::clock::Clock;
use crate::core::retention::RetentionLogic;
use crate::db::pool::DbPool;
use crate::db::queries::count_records;
use crate::errors::AppResult;
use chrono::NaiveDate;

/// Snapshot shown by `status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncStatus {
    pub sync_enabled: bool,
    pub server_url: String,
    pub endpoint_configured: bool,
    pub retention_days: i64,
    pub cutoff: NaiveDate,
    pub stale_records: i64,
    pub total_records: i64,
}

impl SyncStatus {
    /// Whether `archive` would actually contact the server.
    pub fn ready(&self) -> bool {
        self.sync_enabled && self.endpoint_configured
    }
}

pub struct StatusLogic;

impl StatusLogic {
    pub fn collect(pool: &mut DbPool, clock: &dyn Clock, cfg: &Config) -> AppResult<SyncStatus> {
        let cutoff = RetentionLogic::cutoff(clock.today(), cfg.retention_days)?;
        Ok(SyncStatus {
            sync_enabled: cfg.sync.sync_enabled,
            server_url: cfg.sync.server_url.clone(),
            endpoint_configured: cfg.sync.is_endpoint_configured(),
            retention_days: cfg.retention_days,
            cutoff,
            stale_records: RetentionLogic::count_stale(pool, clock, cfg.retention_days)?,
            total_records: count_records(&pool.conn)?,
        })
    }
}
