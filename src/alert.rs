//! Alert fragments for displaying success and error messages to users.
//!
//! Alerts are returned from htmx endpoints and swapped into the page's alert
//! region, leaving the rest of the displayed state untouched.

use maud::{Markup, html};

/// A dismissible error banner.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    /// A short summary, e.g. "Could not delete transaction".
    message: String,
    /// Details explaining the problem and what the user can do about it.
    details: String,
}

impl Alert {
    /// Create a new error alert.
    pub fn error(message: &str, details: &str) -> Self {
        Self {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Render the alert as a banner targeting the page's alert region.
    pub fn into_html(self) -> Markup {
        html! {
            div
                id="alert"
                class="w-full max-w-md mx-auto mb-4 p-4 rounded border \
                border-red-300 bg-red-50 text-red-800 dark:bg-gray-800 \
                dark:border-red-800 dark:text-red-400"
                role="alert"
            {
                p class="font-medium" { (self.message) }
                @if !self.details.is_empty() {
                    p class="text-sm mt-1" { (self.details) }
                }
            }
        }
    }
}
