//! The base page layout and small display helpers shared between views.

use std::sync::OnceLock;

use maud::{DOCTYPE, Markup, PreEscaped, html};
use numfmt::{Formatter, Precision};
use time::OffsetDateTime;
use time::macros::format_description;
use unicode_segmentation::UnicodeSegmentation;

/// The number of visible characters to keep when truncating titles and
/// descriptions in the listing table.
pub(crate) const DISPLAY_TEXT_LIMIT: usize = 24;

/// An extra element to place in the page head.
pub(crate) enum HeadElement {
    /// The file path or URL to a JavaScript script.
    ScriptLink(String),
    /// JavaScript source code.
    ScriptSource(PreEscaped<String>),
}

/// Wrap `content` in the shared page skeleton.
pub(crate) fn base(title: &str, head_elements: &[HeadElement], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Kharcha" }
                link href="/static/main.css" rel="stylesheet";

                @for element in head_elements
                {
                    @match element
                    {
                        HeadElement::ScriptSource(text) => script { (text) }
                        HeadElement::ScriptLink(path) => script src=(path) {}
                    }
                }
            }

            body
            {
                (content)
            }
        }
    }
}

/// A full error page with a large status header, e.g. "404".
pub(crate) fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    let content = html!(
        section class="error-page"
        {
            h1 { (header) }

            p class="error-description" { (description) }

            p class="error-fix" { (fix) }

            a href="/" class="button" { "Back to Homepage" }
        }
    );

    base(title, &[], &content)
}

/// Format a monetary amount with the rupee prefix and comma separators.
pub(crate) fn format_amount(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("Rs. ")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-Rs. ")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    let mut formatted_string = if number < 0.0 {
        negative_fmt.fmt_string(number.abs())
    } else if number > 0.0 {
        positive_fmt.fmt_string(number)
    } else {
        // Zero is hardcoded as "0", so we must specify the formatted string
        // for zero. The comparison badge relies on the zero difference being
        // rendered rather than elided.
        "Rs. 0.00".to_owned()
    };

    // numfmt omits the last trailing zero, so we must add it ourselves.
    // For example, "12.30" is rendered as "12.3" so we append "0".
    if formatted_string.as_bytes()[formatted_string.len() - 3] != b'.' {
        formatted_string = format!("{formatted_string}0");
    }

    formatted_string
}

/// Truncate `text` to at most [DISPLAY_TEXT_LIMIT] visible characters,
/// appending an ellipsis when the text was cut.
pub(crate) fn truncate_text(text: &str) -> String {
    match text.grapheme_indices(true).nth(DISPLAY_TEXT_LIMIT) {
        Some((byte_index, _)) => format!("{}…", &text[..byte_index]),
        None => text.to_owned(),
    }
}

/// Format a payment timestamp for display, e.g. "2026-08-06 14:30".
pub(crate) fn format_payment_time(payment_time: OffsetDateTime) -> String {
    payment_time
        .format(format_description!("[year]-[month]-[day] [hour]:[minute]"))
        .unwrap_or_else(|_| payment_time.to_string())
}
