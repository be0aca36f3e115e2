//! Defines the route handler for the single-expense detail page.

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
    endpoints::{self, format_endpoint, format_month_endpoint},
    expense::core::{Expense, get_expense},
    html::{base, format_amount, format_payment_time},
    month::MonthKey,
    navigation::NavBar,
    timezone::local_now,
};

/// The state needed for the expense detail page.
#[derive(Debug, Clone)]
pub struct DetailPageState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,
}

impl FromRef<AppState> for DetailPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render a single expense in full. Responds with the 404 page if the ID
/// does not refer to an expense.
pub async fn get_expense_detail_page(
    State(state): State<DetailPageState>,
    Path(expense_id): Path<ExpenseId>,
) -> Result<Response, Error> {
    let now = local_now(&state.local_timezone)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expense = get_expense(expense_id, &connection)?;

    drop(connection);

    let was_paid_recently = expense.was_paid_recently(now);

    Ok(detail_view(&expense, was_paid_recently).into_response())
}

fn detail_view(expense: &Expense, was_paid_recently: bool) -> Markup {
    let nav_bar = NavBar::new(endpoints::EXPENSE_DETAIL_VIEW).into_html();
    let month = MonthKey::from_date(expense.payment_time.date());
    let month_url = format_month_endpoint(endpoints::MONTH_INDEX_VIEW, month);
    let update_url = format_endpoint(endpoints::UPDATE_EXPENSE_VIEW, expense.id);
    let delete_url = format_endpoint(endpoints::DELETE_EXPENSE, expense.id);

    let content = html!(
        (nav_bar)

        main class="page"
        {
            section class="detail-card"
            {
                h2 { (expense.title) }

                @if was_paid_recently {
                    span class="badge badge-recent" { "Paid recently" }
                }

                p class="detail-amount" { (format_amount(expense.amount)) }

                p { (expense.description) }

                p class="detail-time" { "Paid at " (format_payment_time(expense.payment_time)) }

                p
                {
                    a href=(update_url) class="text-link" { "Edit" }
                    " · "
                    a href=(month_url) class="text-link" { "Back to " (month.title()) }
                }

                form method="post" action=(delete_url) class="inline-form"
                {
                    button type="submit" class="link-button" { "Delete" }
                }
            }
        }
    );

    base(&expense.title, &[], &content)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use time::macros::datetime;

    use crate::{
        Error,
        expense::core::{
            NewExpense, create_expense,
            test_utils::get_test_connection,
        },
    };

    use super::{DetailPageState, get_expense_detail_page};

    fn test_state() -> DetailPageState {
        DetailPageState {
            db_connection: Arc::new(Mutex::new(get_test_connection())),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    #[tokio::test]
    async fn missing_expense_renders_the_404_page() {
        let result = get_expense_detail_page(State(test_state()), Path(1)).await;

        assert_eq!(result.as_ref().err(), Some(&Error::NotFound));

        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn shows_the_full_expense() {
        let state = test_state();
        {
            let conn = state.db_connection.lock().unwrap();
            create_expense(
                NewExpense {
                    title: "Custom Expense Test".to_owned(),
                    description: "a rather long description that is not cut".to_owned(),
                    amount: 1534500.0,
                    payment_time: datetime!(2021-07-15 12:30 UTC),
                },
                &conn,
            )
            .unwrap();
        }

        let response = get_expense_detail_page(State(state), Path(1))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8_lossy(&body).to_string();

        assert!(text.contains("Custom Expense Test"));
        assert!(text.contains("Rs. 1,534,500.00"));
        assert!(text.contains("a rather long description that is not cut"));
        assert!(text.contains("/expense/2021/7/"));
    }
}
