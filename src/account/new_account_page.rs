//! The page for creating a new account.

use axum::response::{IntoResponse, Response};
use maud::html;

use crate::{
    endpoints,
    html::{PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
};

use super::{
    core::AccountKind,
    form::{AccountFormValues, account_form},
};

/// Display the form for creating a new account.
pub async fn get_new_account_page() -> Response {
    let values = AccountFormValues {
        name: String::new(),
        kind: AccountKind::Bank,
        balance: String::new(),
        account_number: None,
    };

    let content = html! {
        (NavBar::new(endpoints::ACCOUNTS_VIEW).into_html())

        div class=(PAGE_CONTAINER_STYLE) {
            div class="w-full max-w-md" {
                h1 class="text-xl font-bold mb-6" { "Add Account" }
                (account_form(("hx-post", endpoints::ACCOUNTS_API), &values, "Add Account"))
            }
        }
    };

    base("Add Account", &[], &content).into_response()
}
