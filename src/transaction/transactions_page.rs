//! Defines the route handler for the page that displays, searches, and
//! filters transactions.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use axum_htmx::HxRequest;
use rusqlite::Connection;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error, UserID, alert::Alert, timezone::current_local_date,
};

use super::{
    filter::filter_transactions,
    query::list_transaction_rows,
    range::{RangeSelector, resolve_range},
    summary::summarize,
    view::{TransactionsViewModel, transactions_content, transactions_view},
};

/// The query parameters of the transactions page.
#[derive(Debug, Deserialize)]
pub struct TransactionsQuery {
    /// The range preset to display.
    pub range: Option<RangeSelector>,
    /// The start of a custom range.
    pub start: Option<Date>,
    /// The end of a custom range.
    pub end: Option<Date>,
    /// The free-text search query.
    pub q: Option<String>,
}

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsViewState {
    /// The database connection for reading transactions.
    db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    local_timezone: String,
}

impl FromRef<AppState> for TransactionsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render an overview of the user's transactions under the active date range
/// and search query.
///
/// All filtering goes through the pure pipeline in [super::range],
/// [super::filter], and [super::summary]; this handler only gathers inputs
/// (snapshot, reference date, query params) and renders the result.
///
/// An invalid custom range never changes the displayed data: for htmx requests
/// the handler returns a 400 alert fragment and the previously rendered
/// content stays in place; for full page loads it renders the default range
/// with an error banner.
pub async fn get_transactions_page(
    State(state): State<TransactionsViewState>,
    Extension(user_id): Extension<UserID>,
    HxRequest(is_htmx): HxRequest,
    Query(params): Query<TransactionsQuery>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;
    let selector = params.range.unwrap_or_else(RangeSelector::default_selector);
    let query = params.q.unwrap_or_default();

    let (range, selector, alert) = match resolve_range(selector, params.start, params.end, today)
    {
        Ok(range) => (range, selector, None),
        Err(error) if is_htmx => return Ok(error.into_alert_response()),
        Err(_) => (
            None,
            RangeSelector::default_selector(),
            Some(Alert::error(
                "Invalid custom range",
                "Pick both a start and an end date, with the start on or before the end. \
                Showing all transactions instead.",
            )),
        ),
    };

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;
    let rows = list_transaction_rows(user_id, &connection)
        .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?;
    drop(connection);

    let visible = filter_transactions(&rows, range, &query);
    let summary = summarize(&visible);

    let model = TransactionsViewModel {
        selector,
        custom_start: params.start,
        custom_end: params.end,
        query,
        visible,
        summary,
        alert,
    };

    if is_htmx {
        Ok(transactions_content(&model).into_response())
    } else {
        Ok(transactions_view(&model).into_response())
    }
}
