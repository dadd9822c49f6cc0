use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::{applied_migrations, run_pending_migrations};
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::{info, step, success, warning};

/// Maintenance on the ledger file. Flags run in the order
/// migrate, info, check, vacuum.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    else {
        return Ok(());
    };

    if !(*migrate || *check || *vacuum || *show_info) {
        info("Nothing to do: pass --migrate, --info, --check or --vacuum.");
        return Ok(());
    }

    let mut pool = DbPool::new(&cfg.database)?;

    if *migrate {
        step("Running migrations");
        run_pending_migrations(&pool.conn)?;
        let applied = applied_migrations(&pool.conn)?;
        for id in &applied {
            println!("    {}", id);
        }
        success(format!("Schema up to date ({} migrations).", applied.len()));
    }

    if *show_info {
        // stats read access_log, which may not exist on a fresh file
        run_pending_migrations(&pool.conn)?;
        stats::print_db_info(&mut pool, &cfg.database)?;
    }

    if *check {
        step("Running integrity check");
        let integrity: String = pool
            .conn
            .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

        if integrity == "ok" {
            success("Integrity check passed.");
        } else {
            warning(format!("Integrity check failed: {}", integrity));
        }
    }

    if *vacuum {
        step("Compacting the ledger (VACUUM)");
        pool.conn.execute_batch("VACUUM;")?;
        success("Vacuum completed.");
    }

    Ok(())
}
