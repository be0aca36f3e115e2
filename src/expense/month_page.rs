//! Defines the route handler for the paginated monthly expense listing.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, Query, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    alert::{Notice, notice_banner, take_notice},
    endpoints::{self, format_endpoint, format_month_endpoint},
    expense::{
        core::{Expense, get_expenses_in_month},
        summary::{MonthlySummary, should_show_add_control, summarize_month},
    },
    html::{base, format_amount, format_payment_time, truncate_text},
    month::MonthKey,
    navigation::NavBar,
    pagination::{Page, PaginationConfig, paginate},
    timezone::local_now,
};

/// The state needed for the month listing page.
#[derive(Debug, Clone)]
pub struct MonthPageState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,
    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for MonthPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The query parameters accepted by the month listing page.
#[derive(Debug, Default, Deserialize)]
pub struct MonthPageQuery {
    /// The requested page number. Invalid values fall back to the default
    /// page rather than failing the request.
    pub page: Option<String>,
}

/// Render the paginated listing of a month's expenses with the comparison
/// badge.
pub async fn get_month_page(
    State(state): State<MonthPageState>,
    Path((year, month)): Path<(i32, u8)>,
    Query(query): Query<MonthPageQuery>,
    jar: PrivateCookieJar,
) -> Result<Response, Error> {
    let now = local_now(&state.local_timezone)?;
    let month = MonthKey::new(year, month);

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expenses = get_expenses_in_month(month, &connection)
        .inspect_err(|error| tracing::error!("could not get expenses: {error}"))?;
    let summary = summarize_month(month, &connection)
        .inspect_err(|error| tracing::error!("could not summarize month: {error}"))?;

    drop(connection);

    let requested_page = query.page.as_deref().and_then(|page| page.parse().ok());
    let page = paginate(expenses, requested_page, &state.pagination_config);
    let show_add_control = should_show_add_control(month, now);
    let (jar, notice) = take_notice(jar);

    Ok((
        jar,
        month_view(month, &page, &summary, show_add_control, notice.as_ref()),
    )
        .into_response())
}

fn month_view(
    month: MonthKey,
    page: &Page<Expense>,
    summary: &MonthlySummary,
    show_add_control: bool,
    notice: Option<&Notice>,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::MONTH_INDEX_VIEW).into_html();
    let previous_month_url = format_month_endpoint(endpoints::MONTH_INDEX_VIEW, summary.previous);
    let chart_url = format_month_endpoint(endpoints::MONTH_CHART_VIEW, month);
    let bulk_delete_url = format_month_endpoint(endpoints::DELETE_EXPENSES_MONTHLY, month);

    let content = html!(
        (nav_bar)

        main class="page"
        {
            @if let Some(notice) = notice {
                (notice_banner(notice))
            }

            section class="summary-card"
            {
                h2 { (month.title()) }

                p class="month-total" { (format_amount(summary.current_total)) " spent this month" }

                p
                {
                    span class={ "badge " (summary.badge.css_class()) }
                    {
                        (format_amount(summary.difference)) " " (summary.badge.tail_text())
                    }
                }

                p class="month-previous-total"
                {
                    "Last month: " (format_amount(summary.previous_total))
                }

                p
                {
                    a href=(previous_month_url) class="text-link" { "View last month" }
                    " · "
                    a href=(chart_url) class="text-link" { "View daily chart" }
                }

                @if show_add_control {
                    a href=(endpoints::ADD_EXPENSE_VIEW) class="button" { "Add Expense" }
                }
            }

            @if page.items.is_empty() {
                p class="empty-state" { "No expenses were found for this month." }
            } @else {
                table class="expense-table"
                {
                    thead
                    {
                        tr
                        {
                            th { "Title" }
                            th { "Description" }
                            th { "Amount" }
                            th { "Paid at" }
                            th { "" }
                        }
                    }

                    tbody
                    {
                        @for expense in &page.items {
                            (expense_row(expense))
                        }
                    }
                }

                (page_controls(month, page))

                form
                    method="post"
                    action=(bulk_delete_url)
                    class="bulk-delete"
                {
                    button type="submit" class="button button-danger"
                    {
                        "Delete all expenses this month"
                    }
                }
            }
        }
    );

    base(&month.title(), &[], &content)
}

fn expense_row(expense: &Expense) -> Markup {
    let detail_url = format_endpoint(endpoints::EXPENSE_DETAIL_VIEW, expense.id);
    let update_url = format_endpoint(endpoints::UPDATE_EXPENSE_VIEW, expense.id);
    let delete_url = format_endpoint(endpoints::DELETE_EXPENSE, expense.id);

    html!(
        tr
        {
            td { (truncate_text(&expense.title)) }
            td { (truncate_text(&expense.description)) }
            td { (format_amount(expense.amount)) }
            td { (format_payment_time(expense.payment_time)) }
            td class="row-actions"
            {
                a href=(detail_url) class="text-link" { "Detail" }
                " "
                a href=(update_url) class="text-link" { "Edit" }
                " "
                form method="post" action=(delete_url) class="inline-form"
                {
                    button type="submit" class="link-button" { "Delete" }
                }
            }
        }
    )
}

fn page_controls(month: MonthKey, page: &Page<Expense>) -> Markup {
    let month_url = format_month_endpoint(endpoints::MONTH_INDEX_VIEW, month);

    html!(
        nav class="pagination"
        {
            @if page.has_previous() {
                a
                    href={ (month_url) "?page=" (page.previous_number()) }
                    class="text-link"
                {
                    "Previous"
                }
            }

            span { "Page " (page.number) " of " (page.page_count) }

            @if page.has_next() {
                a
                    href={ (month_url) "?page=" (page.next_number()) }
                    class="text-link"
                {
                    "Next"
                }
            }
        }
    )
}
