//! The page for editing an existing transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::html;
use rusqlite::Connection;
use time::{format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    AppState, Error, UserID,
    category::list_categories,
    endpoints,
    html::{PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
};

use super::{
    core::{TransactionId, get_transaction},
    form::{TransactionFormValues, transaction_form},
};

const DATE_TIME_INPUT_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]");

/// The state needed for the edit transaction page.
#[derive(Debug, Clone)]
pub struct EditTransactionPageState {
    /// The database connection for reading the transaction and categories.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Display the form for editing the transaction with `transaction_id`.
pub async fn get_edit_transaction_page(
    State(state): State<EditTransactionPageState>,
    Extension(user_id): Extension<UserID>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;
    let transaction = get_transaction(transaction_id, user_id, &connection)?;
    let categories = list_categories(user_id, &connection)
        .inspect_err(|error| tracing::error!("could not get categories: {error}"))?;
    drop(connection);

    let values = TransactionFormValues {
        title: transaction.title.clone(),
        amount: transaction.amount.to_string(),
        kind: transaction.kind,
        date_time: transaction
            .date_time
            .format(DATE_TIME_INPUT_FORMAT)
            .expect("invalid date-time input format"),
        category_id: transaction.category_id,
    };
    let update_url = endpoints::format_endpoint(endpoints::TRANSACTION, transaction_id);

    let content = html! {
        (NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html())

        div class=(PAGE_CONTAINER_STYLE) {
            div class="w-full max-w-md" {
                h1 class="text-xl font-bold mb-6" { "Edit Transaction" }
                (transaction_form(("hx-put", &update_url), &values, &categories, "Save Changes"))
            }
        }
    };

    Ok(base("Edit Transaction", &[], &content).into_response())
}
