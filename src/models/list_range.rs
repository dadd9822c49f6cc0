use crate::errors::{AppError, AppResult};
use crate::models::access_record::DATE_FMT;
use crate::utils::date;
use chrono::NaiveDate;

/// Period selector for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListRange {
    Today,
    ThisWeek,
    ThisMonth,
    ExactDate(NaiveDate),
}

/// Row ordering applied by a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOrder {
    /// Newest first: date DESC, entry_time DESC.
    ReverseChronological,
    /// Whole-day listing: name ASC, entry_time ASC.
    ByName,
}

impl ListRange {
    /// Parse a strict `YYYY-MM-DD` calendar date into an `ExactDate` range.
    pub fn parse_date(input: &str) -> AppResult<Self> {
        date::parse_date(input)
            .map(ListRange::ExactDate)
            .ok_or_else(|| AppError::InvalidDate(input.trim().to_string()))
    }

    /// Inclusive `(from, to)` bounds relative to `today`.
    pub fn bounds(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            ListRange::Today => (today, today),
            ListRange::ThisWeek => (date::week_start(today), today),
            ListRange::ThisMonth => (date::month_start(today), today),
            ListRange::ExactDate(d) => (*d, *d),
        }
    }

    pub fn order(&self) -> ListOrder {
        match self {
            ListRange::Today | ListRange::ExactDate(_) => ListOrder::ByName,
            ListRange::ThisWeek | ListRange::ThisMonth => ListOrder::ReverseChronological,
        }
    }

    /// Title printed on top of listings.
    pub fn title(&self, today: NaiveDate) -> String {
        let (from, to) = self.bounds(today);
        let (from, to) = (from.format(DATE_FMT), to.format(DATE_FMT));
        match self {
            ListRange::Today => format!("Logs for Today ({})", from),
            ListRange::ThisWeek => format!("Logs for This Week ({} to {})", from, to),
            ListRange::ThisMonth => format!("Logs for This Month ({} to {})", from, to),
            ListRange::ExactDate(_) => format!("Logs for {}", from),
        }
    }
}
