//! Implements a struct that holds the state of the server.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use rusqlite::Connection;
use sha2::{Digest, Sha512};

use crate::{Error, db::initialize, pagination::PaginationConfig};

/// The state of the server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,

    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,

    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,

    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the table for the
    /// expense model. `local_timezone` should be a valid, canonical timezone
    /// name, e.g. "Asia/Kolkata".
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(
        db_connection: Connection,
        cookie_secret: &str,
        local_timezone: &str,
        pagination_config: PaginationConfig,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;

        Ok(Self {
            cookie_key: create_cookie_key(cookie_secret),
            local_timezone: local_timezone.to_owned(),
            pagination_config,
            db_connection: Arc::new(Mutex::new(db_connection)),
        })
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Create a signing key for cookies from a `secret` string.
pub(crate) fn create_cookie_key(secret: &str) -> Key {
    let hash = Sha512::digest(secret);

    Key::from(&hash)
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::pagination::PaginationConfig;

    use super::{AppState, create_cookie_key};

    #[test]
    fn new_state_initializes_the_database() {
        let connection = Connection::open_in_memory().unwrap();

        let state = AppState::new(
            connection,
            "wealth of secrets",
            "Etc/UTC",
            PaginationConfig::default(),
        )
        .expect("could not create app state");

        let connection = state.db_connection.lock().unwrap();
        let count: i64 = connection
            .query_row("SELECT COUNT(*) FROM expense", [], |row| row.get(0))
            .expect("expense table should exist");
        assert_eq!(count, 0);
    }

    #[test]
    fn same_secret_produces_same_key() {
        assert_eq!(create_cookie_key("foo"), create_cookie_key("foo"));
        assert_ne!(create_cookie_key("foo"), create_cookie_key("bar"));
    }
}
