//! Defines the core data model and database queries for expenses.

use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime, UtcOffset};

use crate::{Error, database_id::ExpenseId, month::MonthKey};

// ============================================================================
// MODELS
// ============================================================================

/// A single recorded expense.
///
/// To record a new expense, use [NewExpense] with [create_expense].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID of the expense.
    pub id: ExpenseId,
    /// A short label for the expense.
    pub title: String,
    /// A text description of what the expense was for.
    pub description: String,
    /// The amount of money spent. Expected to be non-negative, but the store
    /// does not enforce this.
    pub amount: f64,
    /// When the expense was incurred. Stamped by the server at creation and
    /// never changed by updates.
    pub payment_time: OffsetDateTime,
}

impl Expense {
    /// Whether the expense was paid inside a rolling window of as many days
    /// as the current month has.
    ///
    /// Expenses dated in the future are not considered recent.
    pub fn was_paid_recently(&self, now: OffsetDateTime) -> bool {
        let days_in_this_month = now.month().length(now.year());
        let window_start = now - Duration::days(days_in_this_month as i64);

        window_start <= self.payment_time && self.payment_time <= now
    }
}

/// The fields needed to record a new expense.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// A short label for the expense.
    pub title: String,
    /// A text description of what the expense was for.
    pub description: String,
    /// The amount of money spent.
    pub amount: f64,
    /// When the expense was incurred.
    pub payment_time: OffsetDateTime,
}

/// A partial update of an expense.
///
/// Only the fields that are `Some` overwrite the stored record. The payment
/// time cannot be patched.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExpensePatch {
    /// Replacement title, if any.
    pub title: Option<String>,
    /// Replacement description, if any.
    pub description: Option<String>,
    /// Replacement amount, if any.
    pub amount: Option<f64>,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Record a new expense in the database.
///
/// The payment time is normalized to UTC so that stored timestamps compare
/// consistently.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn create_expense(new_expense: NewExpense, connection: &Connection) -> Result<Expense, Error> {
    let payment_time = new_expense.payment_time.to_offset(UtcOffset::UTC);

    let expense = connection
        .prepare(
            "INSERT INTO expense (title, description, amount, payment_time)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, title, description, amount, payment_time",
        )?
        .query_row(
            params![
                new_expense.title,
                new_expense.description,
                new_expense.amount,
                payment_time,
            ],
            map_expense_row,
        )?;

    Ok(expense)
}

/// Retrieve an expense from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] if there is some other SQL error.
pub(crate) fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare(
            "SELECT id, title, description, amount, payment_time FROM expense WHERE id = :id",
        )?
        .query_one(&[(":id", &id)], map_expense_row)?;

    Ok(expense)
}

/// Get the expenses whose payment time falls in `month`, most recent first.
///
/// An out-of-range month number matches nothing.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub(crate) fn get_expenses_in_month(
    month: MonthKey,
    connection: &Connection,
) -> Result<Vec<Expense>, Error> {
    let Some((start, end)) = month.bounds() else {
        return Ok(Vec::new());
    };

    // Sort by payment time, and then ID to keep the order stable after
    // updates.
    connection
        .prepare(
            "SELECT id, title, description, amount, payment_time FROM expense \
             WHERE payment_time >= ?1 AND payment_time < ?2 \
             ORDER BY payment_time DESC, id ASC",
        )?
        .query_map(params![start, end], map_expense_row)?
        .map(|expense_result| expense_result.map_err(Error::SqlError))
        .collect()
}

/// Sum the amounts of the expenses whose payment time falls in `month`.
///
/// A month with no expenses sums to `0`, never NULL. An out-of-range month
/// number sums to `0` as well.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub(crate) fn sum_expenses_in_month(
    month: MonthKey,
    connection: &Connection,
) -> Result<f64, Error> {
    let Some((start, end)) = month.bounds() else {
        return Ok(0.0);
    };

    connection
        .query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM expense \
             WHERE payment_time >= ?1 AND payment_time < ?2",
            params![start, end],
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}

/// Apply `patch` to the expense with `id` and return the updated record.
///
/// Fields that are `None` in the patch keep their stored values, and the
/// payment time is never changed.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] if there is some other SQL error.
pub(crate) fn update_expense(
    id: ExpenseId,
    patch: &ExpensePatch,
    connection: &Connection,
) -> Result<Expense, Error> {
    let mut expense = get_expense(id, connection)?;

    if let Some(title) = &patch.title {
        expense.title = title.clone();
    }

    if let Some(description) = &patch.description {
        expense.description = description.clone();
    }

    if let Some(amount) = patch.amount {
        expense.amount = amount;
    }

    connection.execute(
        "UPDATE expense SET title = ?1, description = ?2, amount = ?3 WHERE id = ?4",
        params![expense.title, expense.description, expense.amount, id],
    )?;

    Ok(expense)
}

type RowsAffected = usize;

/// Delete the expense with `id`, returning the number of rows removed.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub(crate) fn delete_expense(
    id: ExpenseId,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute("DELETE FROM expense WHERE id = :id", &[(":id", &id)])
        .map_err(|error| error.into())
}

/// Delete every expense whose payment time falls in `month`, returning the
/// number of rows removed.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub(crate) fn delete_expenses_in_month(
    month: MonthKey,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    let Some((start, end)) = month.bounds() else {
        return Ok(0);
    };

    connection
        .execute(
            "DELETE FROM expense WHERE payment_time >= ?1 AND payment_time < ?2",
            params![start, end],
        )
        .map_err(|error| error.into())
}

/// Create the expense table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                amount REAL NOT NULL,
                payment_time TEXT NOT NULL
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('expense', 0)",
        (),
    )?;

    // Index used by the month listing, summary and chart queries.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_expense_payment_time ON expense(payment_time);",
        (),
    )?;

    Ok(())
}

/// Map a database row to an Expense.
pub(crate) fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    Ok(Expense {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        amount: row.get(3)?,
        payment_time: row.get(4)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
pub(crate) mod test_utils {
    use rusqlite::Connection;
    use time::OffsetDateTime;

    use crate::db::initialize;

    use super::{Expense, NewExpense, create_expense};

    pub(crate) fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    pub(crate) fn create_test_expense(
        amount: f64,
        payment_time: OffsetDateTime,
        connection: &Connection,
    ) -> Expense {
        create_expense(
            NewExpense {
                title: "default title".to_owned(),
                description: "default desc".to_owned(),
                amount,
                payment_time,
            },
            connection,
        )
        .expect("could not create test expense")
    }
}

#[cfg(test)]
mod database_tests {
    use time::macros::datetime;

    use crate::{Error, month::MonthKey};

    use super::{
        ExpensePatch, NewExpense, create_expense, delete_expense, delete_expenses_in_month,
        get_expense, get_expenses_in_month, sum_expenses_in_month,
        test_utils::{create_test_expense, get_test_connection},
        update_expense,
    };

    #[test]
    fn create_and_get_round_trip() {
        let conn = get_test_connection();

        let created = create_expense(
            NewExpense {
                title: "Lunch".to_owned(),
                description: "Dosa at the corner place".to_owned(),
                amount: 150.0,
                payment_time: datetime!(2021-07-15 12:30 UTC),
            },
            &conn,
        )
        .unwrap();

        assert_eq!(created.id, 1);

        let got = get_expense(created.id, &conn).unwrap();

        assert_eq!(got, created);
    }

    #[test]
    fn create_normalizes_payment_time_to_utc() {
        let conn = get_test_connection();

        let created = create_test_expense(10.0, datetime!(2021-07-15 12:30 +5:30), &conn);

        assert_eq!(created.payment_time, datetime!(2021-07-15 07:00 UTC));
    }

    #[test]
    fn get_fails_on_invalid_id() {
        let conn = get_test_connection();

        let got = get_expense(1, &conn);

        assert_eq!(got, Err(Error::NotFound));
    }

    #[test]
    fn month_query_filters_and_orders_most_recent_first() {
        let conn = get_test_connection();
        let in_month_earlier = create_test_expense(1.0, datetime!(2021-07-02 09:00 UTC), &conn);
        let in_month_later = create_test_expense(2.0, datetime!(2021-07-20 09:00 UTC), &conn);
        create_test_expense(3.0, datetime!(2021-06-30 23:59 UTC), &conn);
        create_test_expense(4.0, datetime!(2021-08-01 00:00 UTC), &conn);

        let got = get_expenses_in_month(MonthKey::new(2021, 7), &conn).unwrap();

        assert_eq!(got, vec![in_month_later, in_month_earlier]);
    }

    #[test]
    fn month_query_is_empty_for_invalid_month() {
        let conn = get_test_connection();
        create_test_expense(1.0, datetime!(2021-07-02 09:00 UTC), &conn);

        assert_eq!(get_expenses_in_month(MonthKey::new(2021, 0), &conn), Ok(vec![]));
        assert_eq!(get_expenses_in_month(MonthKey::new(2021, 13), &conn), Ok(vec![]));
    }

    #[test]
    fn empty_month_sums_to_zero() {
        let conn = get_test_connection();

        let got = sum_expenses_in_month(MonthKey::new(2021, 7), &conn).unwrap();

        assert_eq!(got, 0.0);
    }

    #[test]
    fn month_sum_adds_amounts() {
        let conn = get_test_connection();
        create_test_expense(500.0, datetime!(2021-07-02 09:00 UTC), &conn);
        create_test_expense(500.0, datetime!(2021-07-10 09:00 UTC), &conn);
        create_test_expense(1000.0, datetime!(2021-07-20 09:00 UTC), &conn);
        create_test_expense(9999.0, datetime!(2021-06-20 09:00 UTC), &conn);

        let got = sum_expenses_in_month(MonthKey::new(2021, 7), &conn).unwrap();

        assert_eq!(got, 2000.0);
    }

    #[test]
    fn update_overwrites_only_patched_fields() {
        let conn = get_test_connection();
        let original = create_test_expense(500.0, datetime!(2021-07-02 09:00 UTC), &conn);

        let updated = update_expense(
            original.id,
            &ExpensePatch {
                amount: Some(1500.0),
                ..Default::default()
            },
            &conn,
        )
        .unwrap();

        assert_eq!(updated.amount, 1500.0);
        assert_eq!(updated.title, original.title);
        assert_eq!(updated.description, original.description);
        assert_eq!(updated.payment_time, original.payment_time);
        assert_eq!(get_expense(original.id, &conn).unwrap(), updated);
    }

    #[test]
    fn update_never_changes_payment_time() {
        let conn = get_test_connection();
        let original = create_test_expense(500.0, datetime!(2021-07-02 09:00 UTC), &conn);

        let updated = update_expense(
            original.id,
            &ExpensePatch {
                title: Some("new title".to_owned()),
                description: Some("new desc".to_owned()),
                amount: Some(1.0),
            },
            &conn,
        )
        .unwrap();

        assert_eq!(updated.payment_time, original.payment_time);
    }

    #[test]
    fn update_fails_on_missing_expense() {
        let conn = get_test_connection();

        let got = update_expense(1337, &ExpensePatch::default(), &conn);

        assert_eq!(got, Err(Error::NotFound));
    }

    #[test]
    fn delete_removes_the_expense() {
        let conn = get_test_connection();
        let expense = create_test_expense(500.0, datetime!(2021-07-02 09:00 UTC), &conn);

        let rows_affected = delete_expense(expense.id, &conn).unwrap();

        assert_eq!(rows_affected, 1);
        assert_eq!(get_expense(expense.id, &conn), Err(Error::NotFound));
    }

    #[test]
    fn bulk_delete_removes_only_the_target_month() {
        let conn = get_test_connection();
        create_test_expense(1.0, datetime!(2021-07-02 09:00 UTC), &conn);
        create_test_expense(2.0, datetime!(2021-07-20 09:00 UTC), &conn);
        let other_month = create_test_expense(3.0, datetime!(2021-06-20 09:00 UTC), &conn);

        let rows_affected = delete_expenses_in_month(MonthKey::new(2021, 7), &conn).unwrap();

        assert_eq!(rows_affected, 2);
        assert_eq!(
            get_expenses_in_month(MonthKey::new(2021, 6), &conn).unwrap(),
            vec![other_month]
        );
    }

    #[test]
    fn bulk_delete_of_empty_month_removes_nothing() {
        let conn = get_test_connection();

        let rows_affected = delete_expenses_in_month(MonthKey::new(2021, 7), &conn).unwrap();

        assert_eq!(rows_affected, 0);
    }
}
