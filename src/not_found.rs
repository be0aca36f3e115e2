//! The 404 page.

use axum::{http::StatusCode, response::{IntoResponse, Response}};

use crate::html::error_view;

/// The fallback route handler.
pub(crate) async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

/// Get a 404 Not Found response with the shared error page.
pub(crate) fn get_404_not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        error_view(
            "Not Found",
            "404",
            "The page or expense you were looking for does not exist.",
            "Check the address and try again.",
        ),
    )
        .into_response()
}
