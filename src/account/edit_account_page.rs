//! The page for editing an existing account.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::html;
use rusqlite::Connection;

use crate::{
    AppState, Error, UserID, endpoints,
    html::{PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
};

use super::{
    core::{AccountId, get_account},
    form::{AccountFormValues, account_form},
};

/// The state needed for the edit account page.
#[derive(Debug, Clone)]
pub struct EditAccountPageState {
    /// The database connection for reading the account.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditAccountPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Display the form for editing the account with `account_id`.
pub async fn get_edit_account_page(
    State(state): State<EditAccountPageState>,
    Extension(user_id): Extension<UserID>,
    Path(account_id): Path<AccountId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;
    let account = get_account(account_id, user_id, &connection)?;
    drop(connection);

    let values = AccountFormValues {
        name: account.name.clone(),
        kind: account.kind,
        balance: account.balance.to_string(),
        account_number: account.account_number.clone(),
    };
    let update_url = endpoints::format_endpoint(endpoints::ACCOUNT, account_id);

    let content = html! {
        (NavBar::new(endpoints::ACCOUNTS_VIEW).into_html())

        div class=(PAGE_CONTAINER_STYLE) {
            div class="w-full max-w-md" {
                h1 class="text-xl font-bold mb-6" { "Edit Account" }
                (account_form(("hx-put", &update_url), &values, "Save Changes"))
            }
        }
    };

    Ok(base("Edit Account", &[], &content).into_response())
}
