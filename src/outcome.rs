//! Tagged results for the write endpoints.
//!
//! Every state-changing handler reduces its work to one of these outcomes,
//! which is turned into a response in a single place so the redirect and
//! notice plumbing stays uniform.

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::PrivateCookieJar;

use crate::{
    Error,
    alert::{Notice, push_notice},
};

/// The result of a state-changing request.
pub(crate) enum WriteOutcome {
    /// Queue `notice` and send the client to `target`.
    Redirect {
        target: String,
        notice: Notice,
    },
    /// The record or records the request referred to do not exist.
    NotFound,
}

impl WriteOutcome {
    pub(crate) fn redirect(target: String, notice: Notice) -> Self {
        Self::Redirect { target, notice }
    }

    /// Convert the outcome into a response, attaching any queued notice to
    /// `jar`.
    pub(crate) fn into_response(self, jar: PrivateCookieJar) -> Response {
        match self {
            WriteOutcome::Redirect { target, notice } => {
                let jar = push_notice(jar, &notice);

                (jar, Redirect::to(&target)).into_response()
            }
            WriteOutcome::NotFound => Error::NotFound.into_response(),
        }
    }
}
