//! The 500 page.

use axum::{http::StatusCode, response::{IntoResponse, Response}};

use crate::html::error_view;

/// The text shown on the internal server error page.
pub(crate) struct InternalServerErrorPage<'a> {
    pub(crate) description: &'a str,
    pub(crate) fix: &'a str,
}

impl Default for InternalServerErrorPage<'_> {
    fn default() -> Self {
        Self {
            description: "Sorry, something went wrong.",
            fix: "Try again later or check the server logs",
        }
    }
}

/// Render `page` as a 500 Internal Server Error response.
pub(crate) fn render_internal_server_error(page: InternalServerErrorPage) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        error_view("Error", "500", page.description, page.fix),
    )
        .into_response()
}
