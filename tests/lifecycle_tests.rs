use chrono::{Duration, NaiveTime};
use raccesslog::core::entry::EntryLogic;
use raccesslog::core::exit::{ExitLogic, ExitOutcome};
use raccesslog::db::queries::{load_record, set_exit_time};
use raccesslog::errors::AppError;
use raccesslog::models::access_result::AccessResult;

mod common;
use common::{allow, clock_at, count, deny, memory_pool};

fn t(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M:%S").unwrap()
}

#[test]
fn test_entry_then_exit_closes_exactly_that_record() {
    let mut pool = memory_pool();
    let clock = clock_at("2026-03-18", "09:00:00");

    let other = allow(&mut pool, &clock, "Bob");
    let rec = allow(&mut pool, &clock, "Alice");
    assert_eq!(rec.entry_time, t("09:00:00"));
    assert_eq!(rec.exit_time, None);
    assert!(rec.is_open());

    clock.advance(Duration::minutes(95));
    let outcome = ExitLogic::apply(&mut pool, &clock, "Alice").unwrap();

    match outcome {
        ExitOutcome::Closed(closed) => {
            assert_eq!(closed.id, rec.id);
            assert_eq!(closed.exit_time, Some(t("10:35:00")));
            assert!(!closed.is_open());
        }
        ExitOutcome::NoOpenEntry => panic!("expected the entry to be closed"),
    }

    let stored = load_record(&pool.conn, rec.id).unwrap().unwrap();
    assert_eq!(stored.exit_time, Some(t("10:35:00")));

    // nothing else was touched
    let bob = load_record(&pool.conn, other.id).unwrap().unwrap();
    assert_eq!(bob, other);
    assert_eq!(count(&pool), 2);
}

#[test]
fn test_exit_picks_most_recent_open_entry() {
    let mut pool = memory_pool();
    let clock = clock_at("2026-03-18", "08:00:00");

    let first = allow(&mut pool, &clock, "Alice");
    clock.advance(Duration::minutes(30));
    let second = allow(&mut pool, &clock, "Alice");
    assert!(second.id > first.id);

    clock.advance(Duration::minutes(30));
    let ExitOutcome::Closed(closed) = ExitLogic::apply(&mut pool, &clock, "Alice").unwrap() else {
        panic!("expected an exit");
    };
    assert_eq!(closed.id, second.id);

    let untouched = load_record(&pool.conn, first.id).unwrap().unwrap();
    assert_eq!(untouched.exit_time, None);

    // the next exit falls back to the older one, then nothing is left
    let ExitOutcome::Closed(closed) = ExitLogic::apply(&mut pool, &clock, "Alice").unwrap() else {
        panic!("expected a second exit");
    };
    assert_eq!(closed.id, first.id);

    assert_eq!(
        ExitLogic::apply(&mut pool, &clock, "Alice").unwrap(),
        ExitOutcome::NoOpenEntry
    );
}

#[test]
fn test_exit_never_closes_a_denied_entry() {
    let mut pool = memory_pool();
    let clock = clock_at("2026-03-18", "08:00:00");

    let denied = deny(&mut pool, &clock, "Mallory", "Expired badge");

    let outcome = ExitLogic::apply(&mut pool, &clock, "Mallory").unwrap();
    assert_eq!(outcome, ExitOutcome::NoOpenEntry);

    let stored = load_record(&pool.conn, denied.id).unwrap().unwrap();
    assert_eq!(stored.exit_time, None);
    assert_eq!(stored.result, AccessResult::Denied);
    assert_eq!(stored.reason.as_deref(), Some("Expired badge"));
}

#[test]
fn test_exit_skips_denied_and_closes_older_allowed_entry() {
    let mut pool = memory_pool();
    let clock = clock_at("2026-03-18", "08:00:00");

    let allowed = allow(&mut pool, &clock, "Alice");
    clock.advance(Duration::hours(1));
    let denied = deny(&mut pool, &clock, "Alice", "Second badge swipe");

    let ExitOutcome::Closed(closed) = ExitLogic::apply(&mut pool, &clock, "Alice").unwrap() else {
        panic!("expected an exit");
    };
    assert_eq!(closed.id, allowed.id);
    assert_eq!(load_record(&pool.conn, denied.id).unwrap().unwrap().exit_time, None);
}

#[test]
fn test_exit_only_considers_today() {
    let mut pool = memory_pool();
    let clock = clock_at("2026-03-17", "18:00:00");
    let yesterday = allow(&mut pool, &clock, "Alice");

    clock.advance(Duration::hours(15));
    assert_eq!(
        ExitLogic::apply(&mut pool, &clock, "Alice").unwrap(),
        ExitOutcome::NoOpenEntry
    );
    assert_eq!(load_record(&pool.conn, yesterday.id).unwrap().unwrap().exit_time, None);
}

#[test]
fn test_exit_for_unknown_name_is_not_an_error() {
    let mut pool = memory_pool();
    let clock = clock_at("2026-03-18", "08:00:00");
    allow(&mut pool, &clock, "Alice");

    assert_eq!(
        ExitLogic::apply(&mut pool, &clock, "Bob").unwrap(),
        ExitOutcome::NoOpenEntry
    );
}

#[test]
fn test_entry_never_merges_with_previous_rows() {
    let mut pool = memory_pool();
    let clock = clock_at("2026-03-18", "08:00:00");

    let a = allow(&mut pool, &clock, "Alice");
    let b = allow(&mut pool, &clock, "Alice");
    let c = deny(&mut pool, &clock, "Alice", "Tailgating");

    assert!(a.id < b.id && b.id < c.id);
    assert_eq!(count(&pool), 3);
}

#[test]
fn test_entry_trims_name_and_reason() {
    let mut pool = memory_pool();
    let clock = clock_at("2026-03-18", "08:00:00");

    let rec = EntryLogic::apply(
        &mut pool,
        &clock,
        "  Alice  ",
        AccessResult::Denied,
        Some("  No appointment "),
    )
    .unwrap();

    assert_eq!(rec.name, "Alice");
    assert_eq!(rec.reason.as_deref(), Some("No appointment"));
    assert_eq!(rec.date_str(), "2026-03-18");
    assert_eq!(rec.entry_time_str(), "08:00:00");
}

#[test]
fn test_entry_validation_never_touches_the_store() {
    let mut pool = memory_pool();
    let clock = clock_at("2026-03-18", "08:00:00");

    let err = EntryLogic::apply(&mut pool, &clock, "Alice", AccessResult::Denied, None).unwrap_err();
    assert!(matches!(err, AppError::MissingReason));

    let err =
        EntryLogic::apply(&mut pool, &clock, "Alice", AccessResult::Denied, Some("   ")).unwrap_err();
    assert!(matches!(err, AppError::MissingReason));

    let err = EntryLogic::apply(&mut pool, &clock, "Alice", AccessResult::Allowed, Some("why"))
        .unwrap_err();
    assert!(matches!(err, AppError::UnexpectedReason));

    let err = EntryLogic::apply(&mut pool, &clock, "   ", AccessResult::Allowed, None).unwrap_err();
    assert!(matches!(err, AppError::EmptyName));

    assert_eq!(count(&pool), 0);
}

#[test]
fn test_exit_rejects_empty_name() {
    let mut pool = memory_pool();
    let clock = clock_at("2026-03-18", "08:00:00");

    let err = ExitLogic::apply(&mut pool, &clock, "  ").unwrap_err();
    assert!(matches!(err, AppError::EmptyName));
}

#[test]
fn test_exit_time_is_set_only_once() {
    let mut pool = memory_pool();
    let clock = clock_at("2026-03-18", "08:00:00");
    let rec = allow(&mut pool, &clock, "Alice");

    assert!(set_exit_time(&pool.conn, rec.id, t("12:00:00")).unwrap());
    assert!(!set_exit_time(&pool.conn, rec.id, t("13:00:00")).unwrap());

    let stored = load_record(&pool.conn, rec.id).unwrap().unwrap();
    assert_eq!(stored.exit_time, Some(t("12:00:00")));
}

#[test]
fn test_store_rejects_exit_on_denied_record() {
    let mut pool = memory_pool();
    let clock = clock_at("2026-03-18", "08:00:00");
    let rec = deny(&mut pool, &clock, "Mallory", "Blacklisted");

    // helper refuses...
    assert!(!set_exit_time(&pool.conn, rec.id, t("09:00:00")).unwrap());

    // ...and so does the table itself
    let raw = pool.conn.execute(
        "UPDATE access_log SET exit_time = '09:00:00' WHERE id = ?1",
        [rec.id],
    );
    assert!(raw.is_err());
}

#[test]
fn test_results_are_stored_lowercase() {
    let mut pool = memory_pool();
    let clock = clock_at("2026-03-18", "09:00:00");
    let a = allow(&mut pool, &clock, "Alice");
    let d = deny(&mut pool, &clock, "Bob", "No badge");

    let stored = |id: i64| -> String {
        pool.conn
            .query_row("SELECT result FROM access_log WHERE id = ?1", [id], |row| {
                row.get(0)
            })
            .unwrap()
    };
    assert_eq!(stored(a.id), "allowed");
    assert_eq!(stored(d.id), "denied");
}
