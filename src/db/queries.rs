use crate::errors::{AppError, AppResult};
use crate::models::access_record::{AccessRecord, DATE_FMT, TIME_FMT};
use crate::models::access_result::AccessResult;
use crate::models::list_range::ListOrder;
use chrono::{NaiveDate, NaiveTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params, params_from_iter};

const RECORD_COLUMNS: &str = "id, name, date, entry_time, exit_time, result, reason";

/// Upper bound of ids bound in a single `DELETE ... IN (...)` statement.
const DELETE_CHUNK: usize = 500;

fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

pub fn map_row(row: &Row) -> Result<AccessRecord> {
    let date_str: String = row.get("date")?;
    let entry_str: String = row.get("entry_time")?;
    let exit_str: Option<String> = row.get("exit_time")?;
    let result_str: String = row.get("result")?;

    let date = NaiveDate::parse_from_str(&date_str, DATE_FMT)
        .map_err(|_| conversion_error(2, AppError::InvalidDate(date_str.clone())))?;

    let entry_time = NaiveTime::parse_from_str(&entry_str, TIME_FMT)
        .map_err(|_| conversion_error(3, AppError::InvalidTime(entry_str.clone())))?;

    let exit_time = match exit_str {
        Some(s) => Some(
            NaiveTime::parse_from_str(&s, TIME_FMT)
                .map_err(|_| conversion_error(4, AppError::InvalidTime(s.clone())))?,
        ),
        None => None,
    };

    let result = AccessResult::from_db_str(&result_str)
        .ok_or_else(|| conversion_error(5, AppError::InvalidResult(result_str.clone())))?;

    Ok(AccessRecord {
        id: row.get("id")?,
        name: row.get("name")?,
        date,
        entry_time,
        exit_time,
        result,
        reason: row.get("reason")?,
    })
}

fn collect(
    conn: &Connection,
    sql: &str,
    args: &[&dyn rusqlite::ToSql],
) -> AppResult<Vec<AccessRecord>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(args, map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Insert a brand-new entry row and return its id.
pub fn insert_record(
    conn: &Connection,
    name: &str,
    date: NaiveDate,
    entry_time: NaiveTime,
    result: AccessResult,
    reason: Option<&str>,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO access_log (name, date, entry_time, exit_time, result, reason)
         VALUES (?1, ?2, ?3, NULL, ?4, ?5)",
        params![
            name,
            date.format(DATE_FMT).to_string(),
            entry_time.format(TIME_FMT).to_string(),
            result.ar_as_str(),
            reason,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_record(conn: &Connection, id: i64) -> AppResult<Option<AccessRecord>> {
    let sql = format!("SELECT {RECORD_COLUMNS} FROM access_log WHERE id = ?1");
    let rec = conn.query_row(&sql, [id], map_row).optional()?;
    Ok(rec)
}

/// Most recent allowed entry of `name` on `date` that has no exit yet.
pub fn find_open_entry(
    conn: &Connection,
    name: &str,
    date: NaiveDate,
) -> AppResult<Option<AccessRecord>> {
    let sql = format!(
        "SELECT {RECORD_COLUMNS} FROM access_log
         WHERE name = ?1 AND date = ?2
           AND exit_time IS NULL
           AND result = 'allowed'
         ORDER BY id DESC
         LIMIT 1"
    );
    let date_str = date.format(DATE_FMT).to_string();
    let rec = conn
        .query_row(&sql, params![name, date_str], map_row)
        .optional()?;
    Ok(rec)
}

/// Close an open allowed entry. Returns `false` if the row was not open.
pub fn set_exit_time(conn: &Connection, id: i64, exit_time: NaiveTime) -> AppResult<bool> {
    let changed = conn.execute(
        "UPDATE access_log
         SET exit_time = ?1
         WHERE id = ?2 AND exit_time IS NULL AND result = 'allowed'",
        params![exit_time.format(TIME_FMT).to_string(), id],
    )?;
    Ok(changed == 1)
}

/// Records with `from <= date <= to`, in the requested order.
pub fn load_range(
    conn: &Connection,
    from: NaiveDate,
    to: NaiveDate,
    order: ListOrder,
) -> AppResult<Vec<AccessRecord>> {
    let order_by = match order {
        ListOrder::ReverseChronological => "date DESC, entry_time DESC, id DESC",
        ListOrder::ByName => "name ASC, entry_time ASC, id ASC",
    };
    let sql = format!(
        "SELECT {RECORD_COLUMNS} FROM access_log
         WHERE date BETWEEN ?1 AND ?2
         ORDER BY {order_by}"
    );
    let from_str = from.format(DATE_FMT).to_string();
    let to_str = to.format(DATE_FMT).to_string();
    collect(conn, &sql, params![from_str, to_str])
}

/// Records strictly older than `cutoff`, oldest first.
pub fn load_older_than(conn: &Connection, cutoff: NaiveDate) -> AppResult<Vec<AccessRecord>> {
    let sql = format!(
        "SELECT {RECORD_COLUMNS} FROM access_log
         WHERE date < ?1
         ORDER BY date ASC, entry_time ASC, id ASC"
    );
    let cutoff_str = cutoff.format(DATE_FMT).to_string();
    collect(conn, &sql, params![cutoff_str])
}

pub fn count_older_than(conn: &Connection, cutoff: NaiveDate) -> AppResult<i64> {
    let n = conn.query_row(
        "SELECT COUNT(*) FROM access_log WHERE date < ?1",
        [cutoff.format(DATE_FMT).to_string()],
        |row| row.get(0),
    )?;
    Ok(n)
}

pub fn count_records(conn: &Connection) -> AppResult<i64> {
    let n = conn.query_row("SELECT COUNT(*) FROM access_log", [], |row| row.get(0))?;
    Ok(n)
}

/// Delete the given ids in one transaction: either every id goes or none.
pub fn delete_records(conn: &mut Connection, ids: &[i64]) -> AppResult<usize> {
    if ids.is_empty() {
        return Ok(0);
    }

    let tx = conn.transaction()?;
    let mut deleted = 0;

    for chunk in ids.chunks(DELETE_CHUNK) {
        let placeholders = vec!["?"; chunk.len()].join(",");
        let sql = format!("DELETE FROM access_log WHERE id IN ({})", placeholders);
        deleted += tx.execute(&sql, params_from_iter(chunk.iter()))?;
    }

    tx.commit()?;
    Ok(deleted)
}
