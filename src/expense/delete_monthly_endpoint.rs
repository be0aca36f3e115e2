//! Defines the endpoints for deleting every expense in a month.
//!
//! Like single deletion, the bulk delete only happens over POST. The GET
//! handler queues an error notice and redirects back to the month's listing
//! without touching the store.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    alert::Notice,
    endpoints::{self, format_month_endpoint},
    expense::core::delete_expenses_in_month,
    month::MonthKey,
    outcome::WriteOutcome,
};

/// The state needed to bulk delete expenses.
#[derive(Debug, Clone)]
pub struct DeleteMonthlyState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteMonthlyState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting every expense in a month. Responds with the
/// 404 page when the month holds no expenses.
pub async fn delete_expenses_monthly_endpoint(
    State(state): State<DeleteMonthlyState>,
    Path((year, month)): Path<(i32, u8)>,
    jar: PrivateCookieJar,
) -> Response {
    let month = MonthKey::new(year, month);

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    let transaction = match connection.unchecked_transaction() {
        Ok(transaction) => transaction,
        Err(error) => return Error::from(error).into_response(),
    };

    match delete_expenses_in_month(month, &transaction) {
        Ok(0) => return WriteOutcome::NotFound.into_response(jar),
        Ok(rows_affected) => {
            tracing::info!("deleted {rows_affected} expenses in {}", month.title());
        }
        Err(error) => {
            tracing::error!("could not delete expenses in {}: {error}", month.title());
            return error.into_response();
        }
    }

    if let Err(error) = transaction.commit() {
        return Error::from(error).into_response();
    }

    WriteOutcome::redirect(
        format_month_endpoint(endpoints::MONTH_INDEX_VIEW, month),
        Notice::success("Successfully <b>deleted</b> all of the expense in the requested month!"),
    )
    .into_response(jar)
}

/// The GET handler for the bulk delete route. Takes no action and reports
/// the bad request.
pub async fn delete_expenses_monthly_invalid_method(
    Path((year, month)): Path<(i32, u8)>,
    jar: PrivateCookieJar,
) -> Response {
    let month = MonthKey::new(year, month);

    WriteOutcome::redirect(
        format_month_endpoint(endpoints::MONTH_INDEX_VIEW, month),
        Notice::error("Invalid request to delete an item!"),
    )
    .into_response(jar)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use axum_extra::extract::PrivateCookieJar;
    use time::macros::datetime;

    use crate::{
        app_state::create_cookie_key,
        expense::core::{
            get_expenses_in_month,
            test_utils::{create_test_expense, get_test_connection},
        },
        month::MonthKey,
    };

    use super::{
        DeleteMonthlyState, delete_expenses_monthly_endpoint,
        delete_expenses_monthly_invalid_method,
    };

    fn test_state() -> DeleteMonthlyState {
        DeleteMonthlyState {
            db_connection: Arc::new(Mutex::new(get_test_connection())),
        }
    }

    fn test_jar() -> PrivateCookieJar {
        PrivateCookieJar::new(create_cookie_key("test secret"))
    }

    #[tokio::test]
    async fn deletes_the_whole_month_and_redirects_back() {
        let state = test_state();
        {
            let conn = state.db_connection.lock().unwrap();
            create_test_expense(500.0, datetime!(2021-07-15 12:30 UTC), &conn);
            create_test_expense(1000.0, datetime!(2021-07-16 12:30 UTC), &conn);
            create_test_expense(250.0, datetime!(2021-06-16 12:30 UTC), &conn);
        }

        let response =
            delete_expenses_monthly_endpoint(State(state.clone()), Path((2021, 7)), test_jar())
                .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get("location").unwrap(),
            "/expense/2021/7/"
        );

        let connection = state.db_connection.lock().unwrap();
        assert!(
            get_expenses_in_month(MonthKey::new(2021, 7), &connection)
                .unwrap()
                .is_empty()
        );
        assert_eq!(
            get_expenses_in_month(MonthKey::new(2021, 6), &connection)
                .unwrap()
                .len(),
            1,
            "other months must be untouched"
        );
    }

    #[tokio::test]
    async fn empty_month_responds_with_not_found() {
        let response =
            delete_expenses_monthly_endpoint(State(test_state()), Path((2021, 7)), test_jar())
                .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn get_requests_delete_nothing() {
        let state = test_state();
        {
            let conn = state.db_connection.lock().unwrap();
            create_test_expense(500.0, datetime!(2021-07-15 12:30 UTC), &conn);
        }

        let response =
            delete_expenses_monthly_invalid_method(Path((2021, 7)), test_jar()).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get("location").unwrap(),
            "/expense/2021/7/"
        );

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(
            get_expenses_in_month(MonthKey::new(2021, 7), &connection)
                .unwrap()
                .len(),
            1
        );
    }
}
