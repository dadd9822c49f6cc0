use crate::core::clock::Clock;
use crate::db::pool::DbPool;
use crate::db::queries::load_range;
use crate::errors::AppResult;
use crate::models::access_record::AccessRecord;
use crate::models::list_range::ListRange;

/// Read-only projections over the ledger.
pub struct ListLogic;

impl ListLogic {
    pub fn list(
        pool: &mut DbPool,
        clock: &dyn Clock,
        range: ListRange,
    ) -> AppResult<Vec<AccessRecord>> {
        let (from, to) = range.bounds(clock.today());
        load_range(&pool.conn, from, to, range.order())
    }

    /// Listing for a user supplied `YYYY-MM-DD`. A malformed or impossible
    /// date is rejected before the store is queried.
    pub fn list_date(
        pool: &mut DbPool,
        clock: &dyn Clock,
        input: &str,
    ) -> AppResult<Vec<AccessRecord>> {
        let range = ListRange::parse_date(input)?;
        Self::list(pool, clock, range)
    }
}
