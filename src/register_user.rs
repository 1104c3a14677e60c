//! The routes for displaying the registration page and registering new users.

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
    AppState, Error, PasswordHash,
    auth::set_auth_cookie,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
        link,
    },
    user::create_user,
};

/// Display the registration page.
pub async fn get_register_page() -> Markup {
    register_page(None, "")
}

fn register_page(error_message: Option<&str>, email: &str) -> Markup {
    let content = html! {
        div class=(FORM_CONTAINER_STYLE) {
            h1 class="text-2xl font-bold my-6" { "Create your SpendLog account" }

            form class="w-full space-y-4" method="post" action=(endpoints::USERS) {
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
                div {
                    label for="confirm_password" class=(FORM_LABEL_STYLE) { "Confirm password" }
                    input
                        type="password"
                        name="confirm_password"
                        id="confirm_password"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                @if let Some(message) = error_message {
                    p class="text-sm text-red-600 dark:text-red-400" { (message) }
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Register" }
            }

            p class="mt-4 text-sm" {
                "Already have an account? "
                (link(endpoints::LOG_IN_VIEW, "Sign in"))
            }
        }
    };

    base("Register", &[], &content)
}

/// The state needed to register a user.
#[derive(Debug, Clone)]
pub struct RegisterState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,
    /// The database connection for creating users.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for RegisterState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            db_connection: state.db_connection.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<RegisterState> for Key {
    fn from_ref(state: &RegisterState) -> Self {
        state.cookie_key.clone()
    }
}

/// The form data for a registration request.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    /// The email to register with.
    pub email: String,
    /// The password in plain text.
    pub password: String,
    /// The password again, to catch typos.
    pub confirm_password: String,
}

/// Handler for registration requests via the POST method.
///
/// On success the new user is logged in and redirected to the dashboard.
/// Otherwise, the registration page is returned with an error message
/// explaining the problem.
pub async fn register_user(
    State(state): State<RegisterState>,
    jar: PrivateCookieJar,
    Form(form): Form<RegisterForm>,
) -> Response {
    let email = form.email.trim();

    if email.is_empty() {
        return register_page(Some("Enter an email address."), email).into_response();
    }

    if form.password != form.confirm_password {
        return register_page(Some("The passwords do not match."), email).into_response();
    }

    let password_hash = match PasswordHash::from_raw_password(&form.password, PasswordHash::DEFAULT_COST)
    {
        Ok(password_hash) => password_hash,
        Err(Error::TooWeak(feedback)) => {
            return register_page(Some(&format!("The password is too weak. {feedback}")), email)
                .into_response();
        }
        Err(error) => {
            tracing::error!("Unhandled error while hashing password: {error}");
            return error.into_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    let user = match create_user(email, password_hash, &connection) {
        Ok(user) => user,
        Err(Error::DuplicateEmail) => {
            return register_page(Some("That email is already registered."), email)
                .into_response();
        }
        Err(error) => {
            tracing::error!("Unhandled error while creating user: {error}");
            return error.into_response();
        }
    };
    drop(connection);

    let jar = set_auth_cookie(jar, user.id, state.cookie_duration);

    (jar, Redirect::to(endpoints::DASHBOARD_VIEW)).into_response()
}
