//! Defines the route handler for the edit-expense form page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    database_id::ExpenseId,
    endpoints::{self, format_endpoint},
    expense::core::{Expense, get_expense},
    html::base,
    navigation::NavBar,
};

/// The state needed for the edit-expense form page.
#[derive(Debug, Clone)]
pub struct UpdatePageState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdatePageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the pre-filled form for editing an expense. Responds with the 404
/// page if the ID does not refer to an expense.
pub async fn get_update_expense_page(
    State(state): State<UpdatePageState>,
    Path(expense_id): Path<ExpenseId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expense = get_expense(expense_id, &connection)?;

    drop(connection);

    Ok(update_view(&expense).into_response())
}

fn update_view(expense: &Expense) -> Markup {
    let nav_bar = NavBar::new(endpoints::UPDATE_EXPENSE_VIEW).into_html();
    let update_url = format_endpoint(endpoints::UPDATE_EXPENSE_VIEW, expense.id);

    let content = html!(
        (nav_bar)

        main class="page"
        {
            section class="form-card"
            {
                h2 { "Update Expense" }

                p { "Leave a field empty to keep its current value." }

                form method="post" action=(update_url)
                {
                    div class="form-field"
                    {
                        label for="title" { "Title" }
                        input type="text" name="title" id="title" value=(expense.title);
                    }

                    div class="form-field"
                    {
                        label for="desc" { "Description" }
                        input type="text" name="desc" id="desc" value=(expense.description);
                    }

                    div class="form-field"
                    {
                        label for="price" { "Price" }
                        input
                            type="number"
                            name="price"
                            id="price"
                            step="any"
                            min="0"
                            value=(expense.amount);
                    }

                    button type="submit" class="button" { "Save" }
                }
            }
        }
    );

    base("Update Expense", &[], &content)
}
