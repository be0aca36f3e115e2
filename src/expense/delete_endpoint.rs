//! Defines the endpoints for deleting a single expense.
//!
//! Deletion only happens over POST. The GET handler on the same path exists
//! so that a plain link click cannot destroy data, it queues an error notice
//! and redirects without touching the store.

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
    database_id::ExpenseId,
    endpoints::{self, format_month_endpoint},
    expense::core::{delete_expense, get_expense},
    month::MonthKey,
    outcome::WriteOutcome,
};

/// The state needed to delete an expense.
#[derive(Debug, Clone)]
pub struct DeleteExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting an expense, redirects to the listing for the
/// deleted expense's month on success.
pub async fn delete_expense_endpoint(
    State(state): State<DeleteExpenseState>,
    Path(expense_id): Path<ExpenseId>,
    jar: PrivateCookieJar,
) -> Response {
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

    // Fetch first so the redirect can target the expense's own month.
    let expense = match get_expense(expense_id, &transaction) {
        Ok(expense) => expense,
        Err(Error::NotFound) => return WriteOutcome::NotFound.into_response(jar),
        Err(error) => {
            tracing::error!("could not fetch expense {expense_id}: {error}");
            return error.into_response();
        }
    };

    if let Err(error) = delete_expense(expense_id, &transaction) {
        tracing::error!("could not delete expense {expense_id}: {error}");
        return error.into_response();
    }

    if let Err(error) = transaction.commit() {
        return Error::from(error).into_response();
    }

    let month = MonthKey::from_date(expense.payment_time.date());

    WriteOutcome::redirect(
        format_month_endpoint(endpoints::MONTH_INDEX_VIEW, month),
        Notice::success("Successfully <b>deleted</b> the requested item!"),
    )
    .into_response(jar)
}

/// The GET handler for the delete route. Takes no action and reports the bad
/// request.
pub async fn delete_expense_invalid_method(jar: PrivateCookieJar) -> Response {
    WriteOutcome::redirect(
        endpoints::ROOT.to_owned(),
        Notice::error("Invalid request to delete an item!"),
    )
    .into_response(jar)
}
