use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::{Clock, SystemClock};
use crate::core::query::ListLogic;
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::models::access_record::AccessRecord;
use crate::models::access_result::AccessResult;
use crate::models::list_range::{ListOrder, ListRange};
use crate::ui::messages::{header, info};
use crate::utils::colors::{RESET, color_for_result};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        today: _,
        week,
        month,
        date,
    } = cmd
    {
        // Validate the date first: a bad date never reaches the store.
        let range = match date {
            Some(d) => ListRange::parse_date(d)?,
            None if *week => ListRange::ThisWeek,
            None if *month => ListRange::ThisMonth,
            None => ListRange::Today,
        };

        let clock = SystemClock;
        let mut pool = open_db(&cfg.database)?;
        let records = ListLogic::list(&mut pool, &clock, range)?;

        print_records(&range.title(clock.today()), range.order(), &records, cfg);
    }

    Ok(())
}

fn print_records(title: &str, order: ListOrder, records: &[AccessRecord], cfg: &Config) {
    header(title, "=");

    if records.is_empty() {
        info("No records found for this period.");
        return;
    }

    // Single-day listings don't need a date column.
    let with_date = order == ListOrder::ReverseChronological;

    let mut columns = Vec::new();
    if with_date {
        columns.push(Column::new("Date", 10));
    }
    columns.extend([
        Column::new("Name", 20),
        Column::new("Entry", 8),
        Column::new("Exit", 8),
        Column::new("Result", 7),
        Column::new("Reason", 0),
    ]);

    let mut table = Table::new(columns, &cfg.separator_char);
    for r in records {
        let mut row = Vec::new();
        if with_date {
            row.push(r.date_str());
        }
        row.extend([
            r.name.clone(),
            r.entry_time_str(),
            r.exit_time_str().unwrap_or_default(),
            r.result.ar_as_str().to_string(),
            r.reason.clone().unwrap_or_default(),
        ]);
        table.add_row(row);
    }

    print!("{}", table.render());

    let allowed = records.iter().filter(|r| r.result.is_allowed()).count();
    let denied = records.len() - allowed;
    println!(
        "\nTotal records: {} ({}{} allowed{}, {}{} denied{})",
        records.len(),
        color_for_result(AccessResult::Allowed),
        allowed,
        RESET,
        color_for_result(AccessResult::Denied),
        denied,
        RESET
    );
}
