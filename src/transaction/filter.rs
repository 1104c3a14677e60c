//! The transaction visibility filter shared by every screen.
//!
//! Both the transactions page and the dashboard project the same snapshot
//! through this one function instead of reimplementing date and search
//! filtering per screen.

use super::{DateRange, query::TransactionRow};

/// Produce the transactions visible under `range` and `query`, most recent
/// first.
///
/// - Date filter: a row is kept iff its date-time, truncated to the calendar
///   day, falls within `range` (inclusive). `None` means no date bound.
/// - Search filter (only when `query` is non-empty): case-insensitive
///   substring match against the title, the category name (a row without a
///   category never matches on this clause), or the decimal string form of
///   the amount.
/// - Both filters must pass. An empty result is a valid outcome.
///
/// The result is ordered by descending date-time. Ties keep their relative
/// input order, so callers should pass the snapshot in creation order.
pub fn filter_transactions(
    rows: &[TransactionRow],
    range: Option<DateRange>,
    query: &str,
) -> Vec<TransactionRow> {
    let query = query.trim().to_lowercase();

    let mut visible: Vec<TransactionRow> = rows
        .iter()
        .filter(|row| in_range(row, range) && matches_query(row, &query))
        .cloned()
        .collect();

    // Stable sort keeps input order for same-instant transactions.
    visible.sort_by(|a, b| b.date_time.cmp(&a.date_time));

    visible
}

fn in_range(row: &TransactionRow, range: Option<DateRange>) -> bool {
    match range {
        // Truncating to the calendar day keeps a transaction from slipping out
        // of a range over time-of-day differences.
        Some(range) => range.contains(row.date_time.date()),
        None => true,
    }
}

fn matches_query(row: &TransactionRow, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    row.title.to_lowercase().contains(query)
        || row
            .category_name
            .as_ref()
            .is_some_and(|name| name.to_lowercase().contains(query))
        || row.amount.to_string().contains(query)
}
