//! This file defines the routes for displaying the log-in page and handling
//! log-in requests.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{Form, PrivateCookieJar, cookie::Key};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::Duration;

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
        link,
    },
    user::get_user_by_email,
};

use super::cookie::set_auth_cookie;

const INVALID_CREDENTIALS_ERROR_MSG: &str = "Incorrect email or password.";

/// Display the log-in page.
pub async fn get_log_in_page() -> Markup {
    log_in_page(None, "")
}

fn log_in_page(error_message: Option<&str>, email: &str) -> Markup {
    let content = html! {
        div class=(FORM_CONTAINER_STYLE) {
            h1 class="text-2xl font-bold my-6" { "Sign in to SpendLog" }

            form class="w-full space-y-4" method="post" action=(endpoints::LOG_IN_API) {
                div {
                    label for="email" class=(FORM_LABEL_STYLE) { "Email" }
                    input
                        type="email"
                        name="email"
                        id="email"
                        value=(email)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }
                div {
                    label for="password" class=(FORM_LABEL_STYLE) { "Password" }
                    input
                        type="password"
                        name="password"
                        id="password"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                @if let Some(message) = error_message {
                    p class="text-sm text-red-600 dark:text-red-400" { (message) }
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Sign in" }
            }

            p class="mt-4 text-sm" {
                "Don't have an account yet? "
                (link(endpoints::REGISTER_VIEW, "Register"))
            }
        }
    };

    base("Sign In", &[], &content)
}

/// The state needed to perform a log-in.
#[derive(Debug, Clone)]
pub struct LogInState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,
    /// The database connection for looking up users.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for LogInState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            db_connection: state.db_connection.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<LogInState> for Key {
    fn from_ref(state: &LogInState) -> Self {
        state.cookie_key.clone()
    }
}

/// The form data for a log-in request.
#[derive(Debug, Deserialize)]
pub struct LogInData {
    /// The email the user registered with.
    pub email: String,
    /// The user's password in plain text.
    pub password: String,
}

/// Handler for log-in requests via the POST method.
///
/// On a successful log-in request, the auth cookie is set and the client is
/// redirected to the dashboard page. Otherwise, the log-in page is returned
/// with an error message explaining the problem.
pub async fn post_log_in(
    State(state): State<LogInState>,
    jar: PrivateCookieJar,
    Form(user_data): Form<LogInData>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    let user = match get_user_by_email(&user_data.email, &connection) {
        Ok(user) => user,
        Err(Error::NotFound) => {
            return log_in_page(Some(INVALID_CREDENTIALS_ERROR_MSG), &user_data.email)
                .into_response();
        }
        Err(error) => {
            tracing::error!("Unhandled error while looking up user: {error}");
            return error.into_response();
        }
    };
    drop(connection);

    match user.password_hash.verify(&user_data.password) {
        Ok(true) => {}
        Ok(false) => {
            return log_in_page(Some(INVALID_CREDENTIALS_ERROR_MSG), &user_data.email)
                .into_response();
        }
        Err(error) => {
            tracing::error!("Unhandled error while verifying password: {error}");
            return Error::HashingError(error.to_string()).into_response();
        }
    }

    let jar = set_auth_cookie(jar, user.id, state.cookie_duration);

    (jar, Redirect::to(endpoints::DASHBOARD_VIEW)).into_response()
}
