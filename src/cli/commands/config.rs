use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::config::{ConfigLogic, SyncUpdate};
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use rusqlite::Connection;
use std::path::Path;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config, path: &Path, is_test: bool) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
        set_url,
        set_key,
        enable_sync,
        disable_sync,
    } = cmd
    {
        let update = SyncUpdate {
            server_url: set_url.clone(),
            api_key: set_key.clone(),
            sync_enabled: match (enable_sync, disable_sync) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            },
        };

        let mut updated = cfg.clone();

        if !update.is_empty() {
            let changed = ConfigLogic::apply(&mut updated, &update);

            if changed.is_empty() {
                info("Nothing to update.");
            } else {
                if !is_test {
                    updated.save_to(path)?;
                }
                if Path::new(&updated.database).exists()
                    && let Ok(conn) = Connection::open(&updated.database)
                {
                    ttlog_quiet(&conn, "config", &changed.join(","), "Server settings updated");
                }
                for field in &changed {
                    success(format!("{} updated.", field));
                }
                if changed.contains(&"sync_enabled") {
                    success(format!(
                        "Sync {}.",
                        if updated.sync.sync_enabled { "enabled" } else { "disabled" }
                    ));
                }
            }
        }

        if *print_config {
            println!("📄 Current configuration ({}):\n", path.display());
            println!("{}", ConfigLogic::render(&updated)?);
        }

        if *edit_config {
            let used = ConfigLogic::edit(path, editor)?;
            success(format!("Configuration file edited successfully using '{}'", used));
        }
    }

    Ok(())
}
