//! The page that displays the user's accounts and their total balance.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, PreEscaped, html};
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::{
    AppState, Error, UserID, endpoints,
    html::{BUTTON_DELETE_STYLE, CARD_STYLE, HeadElement, LINK_STYLE, PAGE_CONTAINER_STYLE, base,
        format_currency},
    navigation::NavBar,
};

use super::core::{Account, list_accounts, total_balance};

/// The state needed for the accounts page.
#[derive(Debug, Clone)]
pub struct AccountsViewState {
    /// The database connection for reading accounts.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for AccountsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render an overview of the user's accounts with their total balance.
pub async fn get_accounts_page(
    State(state): State<AccountsViewState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;
    let accounts = list_accounts(user_id, &connection)
        .inspect_err(|error| tracing::error!("could not get accounts: {error}"))?;
    drop(connection);

    let total = total_balance(&accounts);

    let toggle_script = HeadElement::ScriptSource(PreEscaped(
        "function toggleBalances() {
            document.querySelectorAll('.balance-value').forEach(function (el) {
                el.classList.toggle('blur-sm');
            });
        }"
        .to_owned(),
    ));

    let content = html! {
        (NavBar::new(endpoints::ACCOUNTS_VIEW).into_html())

        div class=(PAGE_CONTAINER_STYLE) {
            div class="w-full max-w-md" {
                div class="flex items-center justify-between mb-6" {
                    h1 class="text-xl font-bold" { "My Accounts" }
                    a
                        href=(endpoints::NEW_ACCOUNT_VIEW)
                        class="px-3 py-2 rounded-lg bg-blue-500 hover:bg-blue-600 text-white text-sm"
                    { "Add Account" }
                }

                div class={ (CARD_STYLE) " mb-6" } {
                    div class="flex items-center justify-between" {
                        div class="text-sm font-medium text-gray-500" { "Total Balance" }
                        button
                            onclick="toggleBalances()"
                            class="text-xs text-gray-500 underline bg-transparent border-none \
                            cursor-pointer"
                        { "Show/hide" }
                    }
                    div class={ "balance-value text-2xl font-bold " (balance_color(total)) }
                    { (format_currency(total)) }
                }

                @if accounts.is_empty() {
                    div class="text-center py-8 text-gray-500" {
                        div class="text-lg font-medium mb-2" { "No accounts yet" }
                        div class="text-sm" { "Add an account to start tracking balances" }
                    }
                } @else {
                    ul class="space-y-3" {
                        @for account in &accounts {
                            (account_card(account))
                        }
                    }
                }
            }
        }
    };

    Ok(base("Accounts", &[toggle_script], &content).into_response())
}

fn account_card(account: &Account) -> Markup {
    let edit_url = endpoints::format_endpoint(endpoints::EDIT_ACCOUNT_VIEW, account.id);
    let delete_url = endpoints::format_endpoint(endpoints::ACCOUNT, account.id);

    html! {
        li id={ "account-" (account.id) } class=(CARD_STYLE) {
            div class="flex items-center gap-3" {
                span
                    class={ "w-10 h-10 rounded-lg flex items-center justify-center text-white \
                    font-bold " (account.kind.color()) }
                { (account.kind.label().chars().next().unwrap_or('?')) }

                div class="flex-1" {
                    div class="font-medium" { (account.name) }
                    div class="text-sm text-gray-500" {
                        (account.kind.label())
                        @if let Some(number) = &account.account_number {
                            " · " (number)
                        }
                    }
                }

                span class={ "balance-value font-medium " (balance_color(account.balance)) }
                { (format_currency(account.balance)) }

                div class="flex items-center gap-1" {
                    a href=(edit_url) class=(LINK_STYLE) { "Edit" }
                    button
                        class=(BUTTON_DELETE_STYLE)
                        hx-delete=(delete_url)
                        hx-target={ "#account-" (account.id) }
                        hx-swap="outerHTML"
                        hx-confirm={
                            "Delete \"" (account.name) "\"? This action cannot be undone."
                        }
                        hx-ext="response-targets"
                        "hx-target-4*"="#alert-region"
                    { "Delete" }
                }
            }
        }
    }
}

fn balance_color(balance: Decimal) -> &'static str {
    if balance < Decimal::ZERO {
        "text-red-600 dark:text-red-400"
    } else {
        "text-gray-900 dark:text-white"
    }
}
