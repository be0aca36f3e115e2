//! Application router configuration.

use axum::{
    Router,
    extract::{FromRef, State},
    response::Redirect,
    routing::get,
};
use tower_http::services::ServeDir;

use crate::{
    AppState, Error, endpoints,
    endpoints::format_month_endpoint,
    expense::{
        create_expense_endpoint, delete_expense_endpoint, delete_expense_invalid_method,
        delete_expenses_monthly_endpoint, delete_expenses_monthly_invalid_method,
        get_add_expense_page, get_expense_detail_page, get_month_chart_page, get_month_page,
        get_update_expense_page, update_expense_endpoint,
    },
    month::MonthKey,
    not_found::get_404_not_found,
    timezone::local_now,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_home))
        .route(endpoints::MONTH_INDEX_VIEW, get(get_month_page))
        .route(endpoints::EXPENSE_DETAIL_VIEW, get(get_expense_detail_page))
        .route(
            endpoints::ADD_EXPENSE_VIEW,
            get(get_add_expense_page).post(create_expense_endpoint),
        )
        .route(
            endpoints::UPDATE_EXPENSE_VIEW,
            get(get_update_expense_page).post(update_expense_endpoint),
        )
        // Deletion must not happen on a plain link click, so GET on these
        // routes reports an error notice instead of deleting.
        .route(
            endpoints::DELETE_EXPENSE,
            get(delete_expense_invalid_method).post(delete_expense_endpoint),
        )
        .route(
            endpoints::DELETE_EXPENSES_MONTHLY,
            get(delete_expenses_monthly_invalid_method).post(delete_expenses_monthly_endpoint),
        )
        .route(endpoints::MONTH_CHART_VIEW, get(get_month_chart_page))
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The state needed to redirect to the current month.
#[derive(Debug, Clone)]
pub struct HomeState {
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,
}

impl FromRef<AppState> for HomeState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The root path '/' redirects to the current month's listing.
async fn get_home(State(state): State<HomeState>) -> Result<Redirect, Error> {
    let now = local_now(&state.local_timezone)?;
    let month = MonthKey::from_date(now.date());

    Ok(Redirect::to(&format_month_endpoint(
        endpoints::MONTH_INDEX_VIEW,
        month,
    )))
}
