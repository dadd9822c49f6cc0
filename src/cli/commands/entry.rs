use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::SystemClock;
use crate::core::entry::EntryLogic;
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::models::access_result::AccessResult;
use crate::ui::messages::success;
use crate::ui::prompt::read_line;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Entry {
        name,
        result,
        reason,
    } = cmd
    {
        // Input is checked before anything is opened or prompted.
        if name.trim().is_empty() {
            return Err(crate::errors::AppError::EmptyName);
        }

        let reason = match (result, reason) {
            (AccessResult::Denied, None) => Some(read_line("Enter reason for denial: ")),
            (_, r) => r.clone(),
        };

        let mut pool = open_db(&cfg.database)?;
        let record = EntryLogic::apply(
            &mut pool,
            &SystemClock,
            name,
            *result,
            reason.as_deref(),
        )?;

        success(format!(
            "Entry recorded for {} at {} (result = {})",
            record.name,
            record.entry_time_str(),
            record.result.ar_as_str()
        ));
    }

    Ok(())
}
