//! User-visible notices carried across redirects.
//!
//! Write handlers queue a notice in a private cookie before redirecting, and
//! the next listing render takes it from the jar and displays it as a banner.

use axum_extra::extract::{PrivateCookieJar, cookie::Cookie};
use maud::{Markup, PreEscaped, html};
use serde::{Deserialize, Serialize};

const NOTICE_COOKIE: &str = "notice";

/// Notice types for styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum NoticeKind {
    Success,
    Error,
}

/// A message to show the user on the next page load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Notice {
    pub(crate) kind: NoticeKind,
    pub(crate) message: String,
}

impl Notice {
    /// Create a new success notice.
    pub(crate) fn success(message: &str) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.to_owned(),
        }
    }

    /// Create a new error notice.
    pub(crate) fn error(message: &str) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.to_owned(),
        }
    }
}

/// Queue `notice` to be shown on the next page load.
pub(crate) fn push_notice(jar: PrivateCookieJar, notice: &Notice) -> PrivateCookieJar {
    match serde_json::to_string(notice) {
        Ok(value) => jar.add(Cookie::build((NOTICE_COOKIE, value)).path("/")),
        Err(error) => {
            tracing::error!("could not serialize notice: {error}");
            jar
        }
    }
}

/// Take the queued notice, clearing it from the cookie jar.
///
/// The returned jar must be included in the response so the cookie removal
/// reaches the client.
pub(crate) fn take_notice(jar: PrivateCookieJar) -> (PrivateCookieJar, Option<Notice>) {
    let Some(cookie) = jar.get(NOTICE_COOKIE) else {
        return (jar, None);
    };

    let notice = serde_json::from_str(cookie.value()).ok();
    let jar = jar.remove(Cookie::build(NOTICE_COOKIE).path("/"));

    (jar, notice)
}

/// Render a notice as a banner.
///
/// Notice messages are trusted strings authored by the application and may
/// contain markup such as `<b>`.
pub(crate) fn notice_banner(notice: &Notice) -> Markup {
    let style = match notice.kind {
        NoticeKind::Success => "alert alert-success",
        NoticeKind::Error => "alert alert-error",
    };

    html!(
        div class=(style) role="alert"
        {
            (PreEscaped(&notice.message))
        }
    )
}
