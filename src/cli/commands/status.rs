use crate::config::Config;
use crate::core::clock::SystemClock;
use crate::core::status::StatusLogic;
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::colors::{CYAN, GREEN, RED, RESET, YELLOW};

pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut pool = open_db(&cfg.database)?;
    let status = StatusLogic::collect(&mut pool, &SystemClock, cfg)?;

    let flag = |on: bool| {
        if on {
            format!("{GREEN}yes{RESET}")
        } else {
            format!("{RED}no{RESET}")
        }
    };

    header("SYNC STATUS", "=");
    println!("{}• Sync enabled:{} {}", CYAN, RESET, flag(status.sync_enabled));
    println!(
        "{}• Server URL:{} {} ({})",
        CYAN,
        RESET,
        status.server_url,
        if status.endpoint_configured {
            "configured"
        } else {
            "not configured"
        }
    );
    println!(
        "{}• Retention:{} {} days (before {})",
        CYAN, RESET, status.retention_days, status.cutoff
    );
    println!(
        "{}• Records older than {} days:{} {}{}{} of {}",
        CYAN, status.retention_days, RESET, YELLOW, status.stale_records, RESET, status.total_records
    );
    println!("{}• Ready to archive:{} {}", CYAN, RESET, flag(status.ready()));

    Ok(())
}
