use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension};

/// A single, named schema step. Applied at most once per database; the id
/// is recorded in the `log` table as `migration_applied`.
struct Migration {
    id: &'static str,
    description: &'static str,
    apply: fn(&Connection) -> rusqlite::Result<()>,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        id: "20260301_0001_access_log_schema",
        description: "Created access_log table (versioned schema)",
        apply: create_or_rebuild_access_log,
    },
    Migration {
        id: "20260301_0002_access_log_indexes",
        description: "Added lookup indexes on access_log",
        apply: create_access_log_indexes,
    },
];

const ACCESS_LOG_DDL: &str = r#"
    CREATE TABLE access_log (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        name        TEXT NOT NULL,
        date        TEXT NOT NULL,
        entry_time  TEXT NOT NULL,
        exit_time   TEXT,
        result      TEXT NOT NULL CHECK(result IN ('allowed','denied')),
        reason      TEXT,
        CHECK (exit_time IS NULL OR result = 'allowed'),
        CHECK ((result = 'denied') = (reason IS NOT NULL))
    );
"#;

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )
}

/// Check if the `access_log` table exists.
fn access_log_table_exists(conn: &Connection) -> rusqlite::Result<bool> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='access_log'")?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn is_applied(conn: &Connection, id: &str) -> rusqlite::Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([id], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, m: &Migration) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.id, m.description],
    )?;
    Ok(())
}

/// Create `access_log`, or rebuild an unversioned one into the checked schema.
///
/// Legacy rows are normalised instead of dropped: unknown results become
/// `denied` with a synthetic reason, exits on denied rows are cleared and a
/// missing entry time becomes midnight. Any extra legacy column (`synced`)
/// is left behind.
fn create_or_rebuild_access_log(conn: &Connection) -> rusqlite::Result<()> {
    if !access_log_table_exists(conn)? {
        return conn.execute_batch(ACCESS_LOG_DDL);
    }

    warning("Rebuilding legacy access_log table with the checked schema...");

    conn.execute_batch("ALTER TABLE access_log RENAME TO access_log_old;")?;
    conn.execute_batch(ACCESS_LOG_DDL)?;
    conn.execute_batch(
        r#"
        INSERT INTO access_log (id, name, date, entry_time, exit_time, result, reason)
        SELECT id,
               name,
               date,
               COALESCE(entry_time, '00:00:00'),
               CASE WHEN lower(trim(COALESCE(result, ''))) = 'allowed' THEN exit_time END,
               CASE WHEN lower(trim(COALESCE(result, ''))) = 'allowed' THEN 'allowed' ELSE 'denied' END,
               CASE
                   WHEN lower(trim(COALESCE(result, ''))) = 'allowed' THEN NULL
                   WHEN lower(trim(COALESCE(result, ''))) = 'denied'
                       THEN COALESCE(NULLIF(trim(reason), ''), 'unspecified')
                   ELSE 'legacy result: ' || COALESCE(result, 'none')
               END
        FROM access_log_old;

        DROP TABLE access_log_old;

        UPDATE sqlite_sequence
            SET seq = (SELECT IFNULL(MAX(id), 0) FROM access_log)
        WHERE name = 'access_log';
        "#,
    )?;

    Ok(())
}

fn create_access_log_indexes(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE INDEX IF NOT EXISTS idx_access_log_name_date ON access_log(name, date);
        CREATE INDEX IF NOT EXISTS idx_access_log_date_time ON access_log(date, entry_time);
        "#,
    )
}

fn backup_before_migration(db_path: &str) -> AppResult<()> {
    use chrono::Local;
    use std::fs::{self, File};
    use std::io::Write;
    use zip::CompressionMethod;
    use zip::ZipWriter;
    use zip::write::FileOptions;

    let backup_name = format!(
        "{}-backup_access_log_pre_schema_v1.zip",
        Local::now().format("%Y%m%d_%H%M%S")
    );

    let backup_path = std::path::Path::new(db_path)
        .parent()
        .map(|p| p.join(&backup_name))
        .ok_or_else(|| AppError::Backup(format!("No parent directory for {}", db_path)))?;

    let file = File::create(&backup_path)
        .map_err(|e| AppError::Backup(format!("create {}: {}", backup_path.display(), e)))?;

    let mut zip = ZipWriter::new(file);
    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("database.sqlite", options)
        .map_err(|e| AppError::Backup(format!("start_file: {}", e)))?;

    let db_content = fs::read(db_path)?;
    zip.write_all(&db_content)?;
    zip.finish()
        .map_err(|e| AppError::Backup(format!("finish: {}", e)))?;

    success(format!("📦 Backup created: {}", backup_path.display()));
    Ok(())
}

/// Path of the main database file, empty for in-memory databases.
fn main_db_path(conn: &Connection) -> String {
    conn.query_row("PRAGMA database_list;", [], |row| row.get::<_, String>(2))
        .unwrap_or_default()
}

/// Public entry point: run all pending migrations.
///
/// Idempotent: running it on an up-to-date database changes nothing.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    // A populated access_log without the first migration recorded comes from
    // an unversioned build: take a safety copy before touching it.
    let first = MIGRATIONS[0].id;
    if access_log_table_exists(conn)? && !is_applied(conn, first)? {
        warning("Legacy schema detected, creating safety backup before migration...");

        let db_path = main_db_path(conn);
        if db_path.is_empty() {
            warning("Could not determine DB path, backup skipped.");
        } else {
            backup_before_migration(&db_path)?;
        }
    }

    for m in MIGRATIONS {
        if is_applied(conn, m.id)? {
            continue;
        }

        let tx = conn.unchecked_transaction()?;
        (m.apply)(&tx).map_err(|e| AppError::Migration(format!("{}: {}", m.id, e)))?;
        mark_applied(&tx, m)?;
        tx.commit()?;

        success(format!("Migration applied: {} → {}", m.id, m.description));
    }

    Ok(())
}

/// Ids of the migrations already recorded on this database, oldest first.
pub fn applied_migrations(conn: &Connection) -> AppResult<Vec<String>> {
    ensure_log_table(conn)?;
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
