//! SpendLog is a web app for tracking personal spending across accounts,
//! categories, and day-to-day transactions.
//!
//! This library provides a REST API that directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use rust_decimal::Decimal;
use tokio::signal;

mod account;
mod alert;
mod app_state;
mod auth;
mod category;
mod dashboard;
mod db;
mod endpoints;
mod html;
mod internal_server_error;
mod navigation;
mod not_found;
mod password;
mod register_user;
mod routing;
mod timezone;
mod transaction;
mod user;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use password::{PasswordHash, ValidatedPassword};
pub use routing::build_router;
pub use user::{User, UserID, get_user_by_email, set_user_password};

use crate::{
    alert::Alert, category::CategoryId, internal_server_error::render_internal_server_error,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user provided an invalid email/password combination.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The session cookie is missing from the cookie jar in the request.
    #[error("no session cookie in the cookie jar")]
    CookieMissing,

    /// There was an error parsing a date or date-time string.
    ///
    /// Callers should pass in the original error as a string and the date
    /// string that caused the error.
    #[error("could not parse date-time string \"{1}\": {0}")]
    InvalidDateFormat(String, String),

    /// The user provided a password that is too easy to guess.
    #[error("password is too weak: {0}")]
    TooWeak(String),

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server error.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The email used to register already belongs to another user.
    #[error("the email address is already registered")]
    DuplicateEmail,

    /// A custom date range was missing a bound or had its start after its end.
    ///
    /// Callers must keep the previously applied range rather than clamping or
    /// swapping the bounds.
    #[error("the custom date range is incomplete or has its start after its end")]
    InvalidDateRange,

    /// An empty string was used for a transaction title.
    #[error("Transaction title cannot be empty")]
    EmptyTitle,

    /// An empty string was used for a category name.
    #[error("Category name cannot be empty")]
    EmptyCategoryName,

    /// An empty string was used for an account name.
    #[error("Account name cannot be empty")]
    EmptyAccountName,

    /// An amount string could not be parsed as a decimal number.
    #[error("could not parse \"{0}\" as an amount")]
    InvalidAmount(String),

    /// A negative amount was used to create or edit a transaction.
    ///
    /// Transaction amounts are magnitudes; whether money came in or went out
    /// is carried by the transaction kind.
    #[error("{0} is negative, amounts must be zero or greater")]
    NegativeAmount(Decimal),

    /// The category ID used to create a transaction did not match a category
    /// visible to the user.
    #[error("the category ID does not refer to a valid category")]
    InvalidCategory(Option<CategoryId>),

    /// The icon glyph is not part of the category icon palette.
    #[error("\"{0}\" is not an icon from the palette")]
    InvalidIcon(String),

    /// The color token is not part of the category color palette.
    #[error("\"{0}\" is not a color from the palette")]
    InvalidColor(String),

    /// Tried to edit or delete a default category.
    ///
    /// Default categories are seeded by the application and immutable. The
    /// server enforces this rather than trusting clients to hide the controls.
    #[error("default categories cannot be edited or deleted")]
    DefaultCategoryImmutable,

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the database")]
    UpdateMissingTransaction,

    /// Tried to delete an account that does not exist
    #[error("tried to delete an account that is not in the database")]
    DeleteMissingAccount,

    /// Tried to update an account that does not exist
    #[error("tried to update an account that is not in the database")]
    UpdateMissingAccount,

    /// Tried to delete a category that does not exist
    #[error("tried to delete a category that is not in the database")]
    DeleteMissingCategory,

    /// Tried to update a category that does not exist
    #[error("tried to update a category that is not in the database")]
    UpdateMissingCategory,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("user.email") =>
            {
                Error::DuplicateEmail
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidTimezone(timezone) => render_internal_server_error(
                "Invalid Timezone Settings",
                &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to a valid, canonical timezone string"
                ),
            ),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                render_internal_server_error(
                    "Something went wrong",
                    "An unexpected error occurred, please try again later.",
                )
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::InvalidDateRange => (
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Invalid custom range",
                    "Pick both a start and an end date, with the start on or before the end. \
                    The previous range is still applied.",
                ),
            ),
            Error::EmptyTitle => (
                StatusCode::BAD_REQUEST,
                Alert::error("Invalid transaction", "The title cannot be empty."),
            ),
            Error::EmptyCategoryName => (
                StatusCode::BAD_REQUEST,
                Alert::error("Invalid category", "The name cannot be empty."),
            ),
            Error::EmptyAccountName => (
                StatusCode::BAD_REQUEST,
                Alert::error("Invalid account", "The name cannot be empty."),
            ),
            Error::InvalidAmount(raw) => (
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Invalid amount",
                    &format!("\"{raw}\" is not a valid amount."),
                ),
            ),
            Error::NegativeAmount(amount) => (
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Invalid amount",
                    &format!(
                        "{amount} is negative. Enter the amount as a positive number and choose \
                        expense or income instead."
                    ),
                ),
            ),
            Error::InvalidDateFormat(error, date_string) => (
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Invalid date",
                    &format!("Could not read the date \"{date_string}\": {error}"),
                ),
            ),
            Error::InvalidCategory(category_id) => (
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Invalid category",
                    &format!("Could not find a category with the ID {category_id:?}"),
                ),
            ),
            Error::InvalidIcon(icon) => (
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Invalid icon",
                    &format!("\"{icon}\" is not one of the available icons."),
                ),
            ),
            Error::InvalidColor(color) => (
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Invalid color",
                    &format!("\"{color}\" is not one of the available colors."),
                ),
            ),
            Error::DefaultCategoryImmutable => (
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Cannot change default category",
                    "This is a default category and cannot be edited or deleted. You can create \
                    your own custom categories instead.",
                ),
            ),
            Error::UpdateMissingTransaction => (
                StatusCode::NOT_FOUND,
                Alert::error(
                    "Could not update transaction",
                    "The transaction could not be found.",
                ),
            ),
            Error::DeleteMissingTransaction => (
                StatusCode::NOT_FOUND,
                Alert::error(
                    "Could not delete transaction",
                    "The transaction could not be found. \
                    Try refreshing the page to see if the transaction has already been deleted.",
                ),
            ),
            Error::UpdateMissingAccount => (
                StatusCode::NOT_FOUND,
                Alert::error("Could not update account", "The account could not be found."),
            ),
            Error::DeleteMissingAccount => (
                StatusCode::NOT_FOUND,
                Alert::error(
                    "Could not delete account",
                    "The account could not be found. \
                    Try refreshing the page to see if the account has already been deleted.",
                ),
            ),
            Error::UpdateMissingCategory => (
                StatusCode::NOT_FOUND,
                Alert::error(
                    "Could not update category",
                    "The category could not be found.",
                ),
            ),
            Error::DeleteMissingCategory => (
                StatusCode::NOT_FOUND,
                Alert::error(
                    "Could not delete category",
                    "The category could not be found. \
                    Try refreshing the page to see if the category has already been deleted.",
                ),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::error(
                    "Something went wrong",
                    "An unexpected error occurred, check the server logs for more details.",
                ),
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}
