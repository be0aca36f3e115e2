//! This file defines the templates and a convenience function for creating the navigation bar.

use maud::{Markup, html};

use crate::endpoints;

/// Template for a link in the navigation bar.
///
/// It will change appearance if `is_current` is set to `true`. Only one link
/// should be set as active at any one time.
#[derive(Clone)]
struct Link<'a> {
    url: &'a str,
    title: &'a str,
    is_current: bool,
}

impl Link<'_> {
    fn into_html(self) -> Markup {
        let style = if self.is_current {
            "nav-link nav-link-current"
        } else {
            "nav-link"
        };

        html!( a href=(self.url) class=(style) { (self.title) } )
    }
}

/// The top navigation bar shared by every page.
pub(crate) struct NavBar<'a> {
    links: Vec<Link<'a>>,
}

impl NavBar<'_> {
    /// Get the navigation bar.
    ///
    /// If a link matches `active_endpoint`, then that link will be marked as
    /// active and displayed differently in the HTML.
    pub(crate) fn new(active_endpoint: &str) -> NavBar<'_> {
        let links = vec![
            Link {
                url: endpoints::ROOT,
                title: "Expenses",
                is_current: active_endpoint == endpoints::ROOT
                    || active_endpoint == endpoints::MONTH_INDEX_VIEW,
            },
            Link {
                url: endpoints::ADD_EXPENSE_VIEW,
                title: "Add Expense",
                is_current: active_endpoint == endpoints::ADD_EXPENSE_VIEW,
            },
        ];

        NavBar { links }
    }

    pub(crate) fn into_html(self) -> Markup {
        html!(
            nav class="nav-bar"
            {
                a href="/" class="nav-brand" { "Kharcha" }

                ul class="nav-links"
                {
                    @for link in self.links.into_iter() {
                        li { (link.into_html()) }
                    }
                }
            }
        )
    }
}
