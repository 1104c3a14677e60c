//! Database initialization and small shared helpers for reading rows.

use rusqlite::{Connection, Row};
use rust_decimal::Decimal;

use crate::{
    Error,
    account::create_account_table,
    category::{create_category_table, seed_default_categories},
    transaction::create_transaction_table,
    user::create_user_table,
};

/// Create the tables for the domain models and seed the default categories.
///
/// Safe to call on every start-up; tables are only created when missing and
/// the default categories are only seeded once.
///
/// # Errors
/// Returns an error if any SQL query failed.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    create_user_table(connection)?;
    create_category_table(connection)?;
    create_account_table(connection)?;
    create_transaction_table(connection)?;
    seed_default_categories(connection)?;

    Ok(())
}

/// Read a TEXT column holding an exact decimal amount.
///
/// Amounts are stored as their decimal string form so that no money value
/// passes through binary floating point.
pub(crate) fn decimal_column(row: &Row, index: usize) -> Result<Decimal, rusqlite::Error> {
    let raw: String = row.get(index)?;

    raw.parse().map_err(|error: rust_decimal::Error| {
        rusqlite::Error::FromSqlConversionFailure(
            index,
            rusqlite::types::Type::Text,
            Box::new(error),
        )
    })
}

#[cfg(test)]
mod initialize_tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn sql_is_valid() {
        let connection =
            Connection::open_in_memory().expect("Could not initialise in-memory SQLite database");

        assert!(initialize(&connection).is_ok());
    }

    #[test]
    fn initialize_twice_does_not_duplicate_default_categories() {
        let connection = Connection::open_in_memory().unwrap();
        let count_defaults = |conn: &Connection| -> i64 {
            conn.query_row(
                "SELECT COUNT(id) FROM category WHERE is_default = 1",
                [],
                |row| row.get(0),
            )
            .unwrap()
        };

        initialize(&connection).unwrap();
        let first_count = count_defaults(&connection);

        initialize(&connection).unwrap();
        let second_count = count_defaults(&connection);

        assert!(first_count > 0);
        assert_eq!(first_count, second_count);
    }
}
