//! Daily aggregation of a month's expenses and the chart page that shows it.
//!
//! The chart is generated as JSON configuration for the ECharts library and
//! rendered with an HTML container and JavaScript initialization code.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use charming::{
    Chart,
    component::{Axis, Grid, Title},
    element::{AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger},
    series::Bar,
};
use maud::{Markup, PreEscaped, html};
use rusqlite::Connection;
use time::Date;

use crate::{
    AppState, Error,
    endpoints::{self, format_month_endpoint},
    expense::core::{Expense, get_expenses_in_month},
    html::{HeadElement, base},
    month::MonthKey,
    navigation::NavBar,
};

const CHART_CONTAINER_ID: &str = "daily-expenses-chart";

/// The state needed for the daily chart page.
#[derive(Debug, Clone)]
pub struct ChartPageState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ChartPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the daily aggregation chart for a month.
pub async fn get_month_chart_page(
    State(state): State<ChartPageState>,
    Path((year, month)): Path<(i32, u8)>,
) -> Result<Response, Error> {
    let month = MonthKey::new(year, month);

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expenses = get_expenses_in_month(month, &connection)
        .inspect_err(|error| tracing::error!("could not get expenses: {error}"))?;

    drop(connection);

    let daily_totals = aggregate_by_day(&expenses);
    let chart = daily_expenses_chart(month, &daily_totals);

    Ok(chart_view(month, &chart.to_string()).into_response())
}

/// Aggregate expense amounts by calendar day, in ascending day order.
///
/// Days without expenses are omitted entirely, the series is sparse rather
/// than zero-filled.
pub(super) fn aggregate_by_day(expenses: &[Expense]) -> Vec<(Date, f64)> {
    let mut totals: HashMap<Date, f64> = HashMap::new();

    for expense in expenses {
        *totals.entry(expense.payment_time.date()).or_insert(0.0) += expense.amount;
    }

    let mut daily_totals: Vec<_> = totals.into_iter().collect();
    daily_totals.sort_by_key(|(date, _)| *date);

    daily_totals
}

fn daily_expenses_chart(month: MonthKey, daily_totals: &[(Date, f64)]) -> Chart {
    let labels: Vec<String> = daily_totals
        .iter()
        .map(|(date, _)| date.to_string())
        .collect();
    let values: Vec<f64> = daily_totals.iter().map(|(_, total)| *total).collect();

    Chart::new()
        .title(Title::new().text("Daily expenses").subtext(month.title()))
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Bar::new().name("Spent").data(values))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-IN', {
              style: 'currency',
              currency: 'INR'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values.
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

/// Generates the JavaScript that initializes the chart with responsive
/// resizing.
fn chart_script(chart_options: &str) -> HeadElement {
    let script = format!(
        r#"document.addEventListener('DOMContentLoaded', function() {{
            const chartDom = document.getElementById("{CHART_CONTAINER_ID}");
            const chart = echarts.init(chartDom);
            const option = {chart_options};
            chart.setOption(option);

            window.addEventListener('resize', chart.resize);
        }});"#
    );

    HeadElement::ScriptSource(PreEscaped(script))
}

fn chart_view(month: MonthKey, chart_options: &str) -> Markup {
    let nav_bar = NavBar::new(endpoints::MONTH_CHART_VIEW).into_html();
    let month_url = format_month_endpoint(endpoints::MONTH_INDEX_VIEW, month);

    let content = html!(
        (nav_bar)

        main class="page"
        {
            section class="chart-card"
            {
                div id=(CHART_CONTAINER_ID) class="chart-container" {}

                p
                {
                    a href=(month_url) class="text-link" { "Back to " (month.title()) }
                }
            }
        }
    );

    let scripts = [
        HeadElement::ScriptLink("/static/echarts.6.0.0.min.js".to_owned()),
        chart_script(chart_options),
    ];

    base(&format!("Daily expenses - {}", month.title()), &scripts, &content)
}

#[cfg(test)]
mod aggregation_tests {
    use time::macros::{date, datetime};

    use crate::expense::core::Expense;

    use super::aggregate_by_day;

    fn expense_of(amount: f64, payment_time: time::OffsetDateTime) -> Expense {
        Expense {
            id: 0,
            title: "default title".to_owned(),
            description: "default desc".to_owned(),
            amount,
            payment_time,
        }
    }

    #[test]
    fn sums_amounts_per_day_in_ascending_order() {
        let expenses = vec![
            expense_of(100.0, datetime!(2021-07-15 09:00 UTC)),
            expense_of(50.0, datetime!(2021-07-15 18:00 UTC)),
            expense_of(30.0, datetime!(2021-07-02 10:00 UTC)),
        ];

        let got = aggregate_by_day(&expenses);

        assert_eq!(
            got,
            vec![
                (date!(2021 - 07 - 02), 30.0),
                (date!(2021 - 07 - 15), 150.0),
            ]
        );
    }

    #[test]
    fn days_without_expenses_are_omitted() {
        let expenses = vec![expense_of(100.0, datetime!(2021-07-15 09:00 UTC))];

        let got = aggregate_by_day(&expenses);

        assert_eq!(got.len(), 1);
    }

    #[test]
    fn empty_month_aggregates_to_an_empty_series() {
        assert!(aggregate_by_day(&[]).is_empty());
    }
}

#[cfg(test)]
mod page_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use scraper::{Html, Selector};
    use time::macros::datetime;

    use crate::expense::core::test_utils::{create_test_expense, get_test_connection};

    use super::{ChartPageState, get_month_chart_page};

    fn test_state() -> ChartPageState {
        ChartPageState {
            db_connection: Arc::new(Mutex::new(get_test_connection())),
        }
    }

    async fn render(state: ChartPageState, year: i32, month: u8) -> Html {
        let response = get_month_chart_page(State(state), Path((year, month)))
            .await
            .expect("could not render chart page");

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        Html::parse_document(&String::from_utf8_lossy(&body))
    }

    #[tokio::test]
    async fn renders_the_chart_container_and_script() {
        let state = test_state();
        {
            let conn = state.db_connection.lock().unwrap();
            create_test_expense(500.0, datetime!(2021-07-15 12:30 UTC), &conn);
            create_test_expense(250.0, datetime!(2021-07-15 18:00 UTC), &conn);
        }

        let html = render(state, 2021, 7).await;

        let container_selector = Selector::parse("#daily-expenses-chart").unwrap();
        assert!(html.select(&container_selector).next().is_some());

        assert!(html.html().contains("echarts.init"));
        assert!(html.html().contains("2021-07-15"));
    }

    #[tokio::test]
    async fn empty_month_still_renders() {
        let html = render(test_state(), 2021, 7).await;

        let container_selector = Selector::parse("#daily-expenses-chart").unwrap();
        assert!(html.select(&container_selector).next().is_some());
    }
}
