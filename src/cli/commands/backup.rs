use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::ui::prompt::ask_confirmation;
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup {
        file,
        compress,
        force,
    } = cmd
    {
        if Path::new(file).exists()
            && !*force
            && !ask_confirmation(&format!("The file '{}' already exists and will be overwritten.", file))
        {
            info("Backup cancelled by user.");
            return Ok(());
        }

        let final_path = BackupLogic::backup(&cfg.database, file, *compress)?;
        success(format!("Backup created: {}", final_path.display()));
    }

    Ok(())
}
