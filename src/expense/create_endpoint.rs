//! Defines the endpoint for recording a new expense.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
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
    endpoints,
    expense::core::{NewExpense, create_expense},
    outcome::WriteOutcome,
    timezone::local_now,
};

/// The state needed to record an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The form data for recording an expense.
///
/// The payment time is not part of the form, the server stamps it with the
/// current time.
#[derive(Debug, Deserialize)]
pub struct CreateExpenseForm {
    /// A short label for the expense.
    pub title: String,
    /// A text description of what the expense was for.
    pub desc: String,
    /// The amount spent. A non-numeric value fails the whole request.
    pub price: f64,
}

/// A route handler for recording a new expense, redirects to the home view
/// on success.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    jar: PrivateCookieJar,
    Form(form): Form<CreateExpenseForm>,
) -> Response {
    let now = match local_now(&state.local_timezone) {
        Ok(now) => now,
        Err(error) => return error.into_response(),
    };

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

    let new_expense = NewExpense {
        title: form.title,
        description: form.desc,
        amount: form.price,
        payment_time: now,
    };

    if let Err(error) = create_expense(new_expense, &transaction) {
        tracing::error!("could not create expense: {error}");
        return error.into_response();
    }

    if let Err(error) = transaction.commit() {
        return Error::from(error).into_response();
    }

    WriteOutcome::redirect(
        endpoints::ROOT.to_owned(),
        Notice::success("Successfully <b>added</b> the expense!"),
    )
    .into_response(jar)
}
