use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::SystemClock;
use crate::core::exit::{ExitLogic, ExitOutcome};
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Exit { name } = cmd {
        let mut pool = open_db(&cfg.database)?;

        match ExitLogic::apply(&mut pool, &SystemClock, name)? {
            ExitOutcome::Closed(record) => success(format!(
                "Exit recorded for {} at {}",
                record.name,
                record.exit_time_str().unwrap_or_default()
            )),
            ExitOutcome::NoOpenEntry => warning(format!(
                "No existing entry record found today for {} to mark exit.",
                name.trim()
            )),
        }
    }

    Ok(())
}
