//! Dashboard HTTP handler and view rendering.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::{Date, Duration, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    AppState, Error, UserID, endpoints,
    html::{HeadElement, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    timezone::current_local_date,
    transaction::{
        DateRange, TransactionRow, filter_transactions, list_transaction_rows, summarize,
        transaction_list_item,
    },
};

use super::{
    cards::summary_cards,
    charts::{DashboardChart, chart_script, chart_view, trend_chart},
    trend::{DEFAULT_MONTHS_BACK, monthly_trend},
};

/// How many of the selected day's transactions to list.
const RECENT_TRANSACTION_COUNT: usize = 5;

/// The query parameters of the dashboard page.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// The day to display. Defaults to today.
    pub date: Option<Date>,
}

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading transactions.
    db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Display a per-day overview of the user's transactions plus the monthly
/// income/expense trend.
///
/// The selected day's list and cards go through the same pure filtering
/// pipeline as the transactions page, with a single-day range.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Extension(user_id): Extension<UserID>,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;
    let selected_date = query.date.unwrap_or(today);

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;
    let rows = list_transaction_rows(user_id, &connection)
        .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?;
    drop(connection);

    let day_range = DateRange {
        start: selected_date,
        end: selected_date,
    };
    let day_rows = filter_transactions(&rows, Some(day_range), "");
    let day_summary = summarize(&day_rows);

    let trend = monthly_trend(&rows, DEFAULT_MONTHS_BACK, today);
    let chart = DashboardChart {
        id: "trend-chart",
        options: trend_chart(&trend).to_string(),
    };

    let head_elements = [
        HeadElement::ScriptLink("/static/echarts-5.6.0.min.js".to_owned()),
        chart_script(&chart),
    ];

    let content = html! {
        (NavBar::new(endpoints::DASHBOARD_VIEW).into_html())

        div class=(PAGE_CONTAINER_STYLE) {
            div class="w-full max-w-md" {
                (day_navigator(selected_date, today, day_summary.count))
                (summary_cards(&day_summary))

                a
                    href=(endpoints::NEW_TRANSACTION_VIEW)
                    class="block w-full mb-6 px-4 py-3 rounded-xl bg-blue-500 \
                    hover:bg-blue-600 text-white text-center font-medium"
                { "Add Transaction" }

                (recent_transactions(&day_rows))
                (chart_view(&chart))
            }
        }
    };

    Ok(base("Dashboard", &head_elements, &content).into_response())
}

fn day_navigator(selected_date: Date, today: Date, transaction_count: usize) -> Markup {
    let previous_href = date_href(selected_date - Duration::days(1));
    let is_today = selected_date == today;

    html! {
        div class="flex items-center justify-between mb-6" {
            a
                href=(previous_href)
                class="p-2 rounded-lg bg-gray-100 hover:bg-gray-200 dark:bg-gray-800 \
                dark:hover:bg-gray-700"
            { "←" }

            div class="text-center" {
                div class="font-medium" { (format_day_label(selected_date, today)) }
                div class="text-sm text-gray-500" {
                    (transaction_count)
                    @if transaction_count == 1 { " transaction" } @else { " transactions" }
                }
            }

            // The day navigator stops at today; future days have nothing to show.
            @if is_today {
                span class="p-2 rounded-lg bg-gray-50 text-gray-300 cursor-not-allowed \
                dark:bg-gray-800" { "→" }
            } @else {
                a
                    href=(date_href(selected_date + Duration::days(1)))
                    class="p-2 rounded-lg bg-gray-100 hover:bg-gray-200 dark:bg-gray-800 \
                    dark:hover:bg-gray-700"
                { "→" }
            }
        }
    }
}

fn recent_transactions(day_rows: &[TransactionRow]) -> Markup {
    html! {
        div class="mb-6" {
            div class="flex items-center justify-between mb-4" {
                h2 class="text-lg font-bold" { "Recent Transactions" }
                a
                    href=(endpoints::TRANSACTIONS_VIEW)
                    class="text-sm text-gray-500 hover:text-gray-700"
                { "View All" }
            }

            @if day_rows.is_empty() {
                div class="text-center py-8 text-gray-500" {
                    div class="text-lg font-medium mb-2" { "No transactions" }
                    div class="text-sm" { "Nothing recorded on this day" }
                }
            } @else {
                ul class="space-y-3" {
                    @for row in day_rows.iter().take(RECENT_TRANSACTION_COUNT) {
                        (transaction_list_item(row))
                    }
                }
            }
        }
    }
}

fn date_href(date: Date) -> String {
    format!("{}?date={date}", endpoints::DASHBOARD_VIEW)
}

const DAY_LABEL_FORMAT: &[BorrowedFormatItem] =
    format_description!("[weekday repr:long], [month repr:short] [day padding:none]");

fn format_day_label(selected_date: Date, today: Date) -> String {
    if selected_date == today {
        "Today".to_owned()
    } else if selected_date == today - Duration::days(1) {
        "Yesterday".to_owned()
    } else {
        selected_date
            .format(DAY_LABEL_FORMAT)
            .expect("invalid day label format")
    }
}

#[cfg(test)]
mod day_label_tests {
    use time::macros::date;

    use super::format_day_label;

    #[test]
    fn today_and_yesterday_get_relative_labels() {
        let today = date!(2024 - 01 - 20);

        assert_eq!(format_day_label(today, today), "Today");
        assert_eq!(format_day_label(date!(2024 - 01 - 19), today), "Yesterday");
    }

    #[test]
    fn older_dates_get_weekday_labels() {
        let today = date!(2024 - 01 - 20);

        assert_eq!(
            format_day_label(date!(2024 - 01 - 15), today),
            "Monday, Jan 15"
        );
    }
}
