//! Defines the route handler for the add-expense form page.

use axum::response::{IntoResponse, Response};
use maud::html;

use crate::{
    endpoints,
    html::base,
    navigation::NavBar,
};

/// Render the form for recording a new expense.
pub async fn get_add_expense_page() -> Response {
    let nav_bar = NavBar::new(endpoints::ADD_EXPENSE_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main class="page"
        {
            section class="form-card"
            {
                h2 { "Add Expense" }

                form method="post" action=(endpoints::ADD_EXPENSE_VIEW)
                {
                    div class="form-field"
                    {
                        label for="title" { "Title" }
                        input type="text" name="title" id="title" required;
                    }

                    div class="form-field"
                    {
                        label for="desc" { "Description" }
                        input type="text" name="desc" id="desc" required;
                    }

                    div class="form-field"
                    {
                        label for="price" { "Price" }
                        input type="number" name="price" id="price" step="any" min="0" required;
                    }

                    button type="submit" class="button" { "Save" }
                }
            }
        }
    );

    base("Add Expense", &[], &content).into_response()
}
