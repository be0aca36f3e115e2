//! Database initialization for the application.

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{Error, expense::create_expense_table};

/// Create the application tables in the database if they do not exist.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_expense_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
