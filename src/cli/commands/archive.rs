use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::SystemClock;
use crate::core::retention::{ArchiveOutcome, RetentionLogic};
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::sync::client::HttpArchiveClient;
use crate::ui::messages::{error, info, success, warning};
use crate::ui::prompt::ask_confirmation;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Archive { yes, days } = cmd {
        let retention = days.unwrap_or(cfg.retention_days);
        let client = HttpArchiveClient::new(&cfg.sync);
        let mut pool = open_db(&cfg.database)?;

        let confirm = |count: usize| {
            if *yes {
                return true;
            }
            ask_confirmation(&format!(
                "Found {} records older than {} days.\n   They will be sent to the server and deleted locally.",
                count, retention
            ))
        };

        let outcome =
            RetentionLogic::archive_and_purge(&mut pool, &SystemClock, &client, retention, confirm);

        match outcome {
            Ok(ArchiveOutcome::NothingToDo) => {
                info(format!("No records older than {} days to sync.", retention));
            }
            Ok(ArchiveOutcome::Cancelled { .. }) => {
                info("Sync cancelled.");
            }
            Ok(ArchiveOutcome::Archived {
                sent,
                deleted,
                diagnostic,
            }) => {
                success(format!("{} records successfully sent to server!", sent));
                if let Some(msg) = diagnostic {
                    info(format!("Server response: {}", msg));
                }
                success(format!("Deleted {} old records from local database.", deleted));
            }
            Err(e) => {
                error(format!("Sync failed: {}", e));
                warning("Records were NOT deleted locally.");
                return Err(e);
            }
        }
    }

    Ok(())
}
