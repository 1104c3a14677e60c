use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::html;

use crate::html::{PAGE_CONTAINER_STYLE, base};

/// Render a full error page with a short `description` of what went wrong and
/// a `fix` telling the user what they can do about it.
pub fn render_internal_server_error(description: &str, fix: &str) -> Response {
    let content = html! {
        div class=(PAGE_CONTAINER_STYLE) {
            h1 class="text-4xl font-bold mb-4" { "500" }
            h2 class="text-xl font-semibold mb-2" { (description) }
            p { (fix) }
        }
    };

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        base("Something Went Wrong", &[], &content),
    )
        .into_response()
}
