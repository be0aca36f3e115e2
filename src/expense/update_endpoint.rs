//! Defines the endpoint for selectively updating an expense.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::{Form, PrivateCookieJar};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    alert::Notice,
    database_id::ExpenseId,
    endpoints::{self, format_month_endpoint},
    expense::core::{ExpensePatch, update_expense},
    month::MonthKey,
    outcome::WriteOutcome,
};

/// The state needed to update an expense.
#[derive(Debug, Clone)]
pub struct UpdateExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The form data for updating an expense.
///
/// Every field is optional, missing or empty fields leave the stored value
/// untouched.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateExpenseForm {
    /// Replacement title, if any.
    #[serde(default)]
    pub title: Option<String>,
    /// Replacement description, if any.
    #[serde(default)]
    pub desc: Option<String>,
    /// Replacement amount, if any.
    #[serde(default)]
    pub price: Option<f64>,
}

impl UpdateExpenseForm {
    /// Convert the submission into a patch, treating empty strings the same
    /// as missing fields.
    fn into_patch(self) -> ExpensePatch {
        ExpensePatch {
            title: self.title.filter(|title| !title.is_empty()),
            description: self.desc.filter(|desc| !desc.is_empty()),
            amount: self.price,
        }
    }
}

/// A route handler for updating an expense, redirects to the listing for the
/// expense's own month on success.
pub async fn update_expense_endpoint(
    State(state): State<UpdateExpenseState>,
    Path(expense_id): Path<ExpenseId>,
    jar: PrivateCookieJar,
    Form(form): Form<UpdateExpenseForm>,
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

    let expense = match update_expense(expense_id, &form.into_patch(), &transaction) {
        Ok(expense) => expense,
        Err(Error::NotFound) => return WriteOutcome::NotFound.into_response(jar),
        Err(error) => {
            tracing::error!("could not update expense {expense_id}: {error}");
            return error.into_response();
        }
    };

    if let Err(error) = transaction.commit() {
        return Error::from(error).into_response();
    }

    // Redirect to the month the expense belongs to, not the month that was
    // being viewed when the edit started.
    let month = MonthKey::from_date(expense.payment_time.date());

    WriteOutcome::redirect(
        format_month_endpoint(endpoints::MONTH_INDEX_VIEW, month),
        Notice::success("Successfully <b>updated</b> the expense!"),
    )
    .into_response(jar)
}
