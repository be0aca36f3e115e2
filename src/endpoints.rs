//! The application's endpoint URIs.
//!
//! For endpoints that take parameters, e.g. '/expense/detail/{expense_id}/',
//! use [format_endpoint] or [format_month_endpoint].

use crate::{database_id::ExpenseId, month::MonthKey};

/// The root route which redirects to the current month's index.
pub const ROOT: &str = "/";
/// The paginated listing of a month's expenses.
pub const MONTH_INDEX_VIEW: &str = "/expense/{year}/{month}/";
/// The page showing a single expense in full.
pub const EXPENSE_DETAIL_VIEW: &str = "/expense/detail/{expense_id}/";
/// The page with the form for recording a new expense. POST submits it.
pub const ADD_EXPENSE_VIEW: &str = "/expense/add/";
/// The page with the form for editing an expense. POST submits it.
pub const UPDATE_EXPENSE_VIEW: &str = "/expense/update/{expense_id}/";
/// The route for deleting a single expense. POST only.
pub const DELETE_EXPENSE: &str = "/expense/delete/{expense_id}";
/// The route for deleting every expense in a month. POST only.
pub const DELETE_EXPENSES_MONTHLY: &str = "/expense/delete_expenses_monthly/{year}/{month}/";
/// The daily aggregation chart for a month.
pub const MONTH_CHART_VIEW: &str = "/expense/chart/{year}/{month}/";
/// The route for static files.
pub const STATIC: &str = "/static";

/// Replace the first parameter in `endpoint_path` with `value`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace. If no
/// parameter is found, the original `endpoint_path` is returned.
fn replace_next_param(endpoint_path: &str, value: &str) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        value,
        &endpoint_path[param_end..]
    )
}

/// Replace the ID parameter in `endpoint_path` with `id`.
pub fn format_endpoint(endpoint_path: &str, id: ExpenseId) -> String {
    replace_next_param(endpoint_path, &id.to_string())
}

/// Replace the year and month parameters in `endpoint_path` with `month`.
pub fn format_month_endpoint(endpoint_path: &str, month: MonthKey) -> String {
    let with_year = replace_next_param(endpoint_path, &month.year.to_string());

    replace_next_param(&with_year, &month.month.to_string())
}

// These tests are here so that we know when we call `Uri::from_shared` it
// will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::{endpoints, month::MonthKey};

    use super::{format_endpoint, format_month_endpoint};

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok(), "invalid URI: {uri}");
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::MONTH_INDEX_VIEW);
        assert_endpoint_is_valid_uri(endpoints::EXPENSE_DETAIL_VIEW);
        assert_endpoint_is_valid_uri(endpoints::ADD_EXPENSE_VIEW);
        assert_endpoint_is_valid_uri(endpoints::UPDATE_EXPENSE_VIEW);
        assert_endpoint_is_valid_uri(endpoints::DELETE_EXPENSE);
        assert_endpoint_is_valid_uri(endpoints::DELETE_EXPENSES_MONTHLY);
        assert_endpoint_is_valid_uri(endpoints::MONTH_CHART_VIEW);
        assert_endpoint_is_valid_uri(endpoints::STATIC);
    }

    #[test]
    fn formats_id_parameter() {
        let formatted_path = format_endpoint(endpoints::EXPENSE_DETAIL_VIEW, 42);

        assert_eq!(formatted_path, "/expense/detail/42/");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn formats_year_and_month_parameters() {
        let formatted_path =
            format_month_endpoint(endpoints::MONTH_INDEX_VIEW, MonthKey::new(2021, 1));

        assert_eq!(formatted_path, "/expense/2021/1/");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/hello/world", 1);

        assert_eq!(formatted_path, "/hello/world");
    }
}
