//! Defines the core data model and database queries for transactions.

use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{
    PrimitiveDateTime, format_description::BorrowedFormatItem, macros::format_description,
};

use crate::{Error, UserID, category::CategoryId};

/// An alias for transaction IDs.
pub type TransactionId = i64;

/// Whether a transaction took money out (expense) or brought money in (income).
///
/// Amounts are stored as non-negative magnitudes; the kind alone decides the
/// sign of a transaction's contribution to totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money spent.
    Expense,
    /// Money earned.
    Income,
}

impl TransactionKind {
    /// The string stored in the database and used in form values.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }

    /// The label shown to users.
    pub fn label(self) -> &'static str {
        match self {
            Self::Expense => "Expense",
            Self::Income => "Income",
        }
    }

    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value {
            "expense" => Some(Self::Expense),
            "income" => Some(Self::Income),
            _ => None,
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// A short text describing what the transaction was for.
    pub title: String,
    /// The magnitude of money spent or earned. Never negative.
    pub amount: Decimal,
    /// Whether the transaction is an expense or income.
    pub kind: TransactionKind,
    /// When the transaction happened.
    ///
    /// Carries time-of-day; range filtering truncates to the calendar day.
    pub date_time: PrimitiveDateTime,
    /// The ID of the category the transaction belongs to, if any.
    pub category_id: Option<CategoryId>,
}

/// The data needed to create or update a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// A short text describing what the transaction was for.
    pub title: String,
    /// The magnitude of money spent or earned.
    pub amount: Decimal,
    /// Whether the transaction is an expense or income.
    pub kind: TransactionKind,
    /// When the transaction happened.
    pub date_time: PrimitiveDateTime,
    /// The ID of the category the transaction belongs to, if any.
    pub category_id: Option<CategoryId>,
}

/// Create the transaction table.
///
/// # Errors
/// This function will return an error if the SQL query failed.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES user(id),
            title TEXT NOT NULL,
            amount TEXT NOT NULL,
            kind TEXT NOT NULL,
            date_time TEXT NOT NULL,
            category_id INTEGER REFERENCES category(id)
        )",
        (),
    )?;

    Ok(())
}

/// Validate and insert a new transaction for `user_id`.
///
/// # Errors
/// Returns [Error::EmptyTitle] if the title is blank, [Error::NegativeAmount]
/// if the amount is below zero, [Error::InvalidCategory] if the category does
/// not exist or is not visible to the user, or [Error::SqlError] if an SQL
/// related error occurred.
pub fn create_transaction(
    new_transaction: NewTransaction,
    user_id: UserID,
    connection: &Connection,
) -> Result<Transaction, Error> {
    validate_transaction(&new_transaction, user_id, connection)?;

    connection.execute(
        "INSERT INTO \"transaction\" (user_id, title, amount, kind, date_time, category_id) \
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        (
            user_id.as_i64(),
            &new_transaction.title,
            new_transaction.amount.to_string(),
            new_transaction.kind.as_str(),
            new_transaction.date_time,
            new_transaction.category_id,
        ),
    )?;

    Ok(Transaction {
        id: connection.last_insert_rowid(),
        title: new_transaction.title,
        amount: new_transaction.amount,
        kind: new_transaction.kind,
        date_time: new_transaction.date_time,
        category_id: new_transaction.category_id,
    })
}

/// Get the transaction with `transaction_id` belonging to `user_id`.
///
/// # Errors
/// Returns [Error::NotFound] if the transaction does not exist or belongs to
/// another user.
pub fn get_transaction(
    transaction_id: TransactionId,
    user_id: UserID,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .prepare(
            "SELECT id, title, amount, kind, date_time, category_id FROM \"transaction\" \
            WHERE id = ?1 AND user_id = ?2",
        )?
        .query_row((transaction_id, user_id.as_i64()), map_transaction_row)
        .map_err(|error| error.into())
}

/// Replace the data of the transaction with `transaction_id`.
///
/// # Errors
/// Returns [Error::UpdateMissingTransaction] if the transaction does not exist
/// or belongs to another user, plus the validation errors of
/// [create_transaction].
pub fn update_transaction(
    transaction_id: TransactionId,
    new_transaction: NewTransaction,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    validate_transaction(&new_transaction, user_id, connection)?;

    let rows_updated = connection.execute(
        "UPDATE \"transaction\" SET title = ?1, amount = ?2, kind = ?3, date_time = ?4, \
        category_id = ?5 WHERE id = ?6 AND user_id = ?7",
        (
            &new_transaction.title,
            new_transaction.amount.to_string(),
            new_transaction.kind.as_str(),
            new_transaction.date_time,
            new_transaction.category_id,
            transaction_id,
            user_id.as_i64(),
        ),
    )?;

    if rows_updated == 0 {
        return Err(Error::UpdateMissingTransaction);
    }

    Ok(())
}

/// Delete the transaction with `transaction_id`.
///
/// # Errors
/// Returns [Error::DeleteMissingTransaction] if the transaction does not exist
/// or belongs to another user.
pub fn delete_transaction(
    transaction_id: TransactionId,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_deleted = connection.execute(
        "DELETE FROM \"transaction\" WHERE id = ?1 AND user_id = ?2",
        (transaction_id, user_id.as_i64()),
    )?;

    if rows_deleted == 0 {
        return Err(Error::DeleteMissingTransaction);
    }

    Ok(())
}

fn validate_transaction(
    new_transaction: &NewTransaction,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    if new_transaction.title.trim().is_empty() {
        return Err(Error::EmptyTitle);
    }

    if new_transaction.amount.is_sign_negative() && !new_transaction.amount.is_zero() {
        return Err(Error::NegativeAmount(new_transaction.amount));
    }

    if let Some(category_id) = new_transaction.category_id {
        let category_exists: bool = connection.query_row(
            "SELECT EXISTS(SELECT 1 FROM category \
            WHERE id = ?1 AND (user_id IS NULL OR user_id = ?2))",
            (category_id, user_id.as_i64()),
            |row| row.get(0),
        )?;

        if !category_exists {
            return Err(Error::InvalidCategory(Some(category_id)));
        }
    }

    Ok(())
}

pub(crate) fn map_transaction_row(row: &rusqlite::Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        title: row.get(1)?,
        amount: crate::db::decimal_column(row, 2)?,
        kind: kind_column(row, 3)?,
        date_time: row.get(4)?,
        category_id: row.get(5)?,
    })
}

pub(crate) fn kind_column(
    row: &rusqlite::Row,
    index: usize,
) -> Result<TransactionKind, rusqlite::Error> {
    let raw: String = row.get(index)?;

    TransactionKind::parse(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            index,
            rusqlite::types::Type::Text,
            format!("unknown transaction kind \"{raw}\"").into(),
        )
    })
}

const FORM_DATE_TIME_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]");
const FORM_DATE_TIME_FORMAT_WITH_SECONDS: &[BorrowedFormatItem] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// Parse the value of an HTML `datetime-local` input, with or without seconds.
///
/// # Errors
/// Returns [Error::InvalidDateFormat] if `raw` does not match either format.
pub(crate) fn parse_form_date_time(raw: &str) -> Result<PrimitiveDateTime, Error> {
    PrimitiveDateTime::parse(raw, FORM_DATE_TIME_FORMAT_WITH_SECONDS)
        .or_else(|_| PrimitiveDateTime::parse(raw, FORM_DATE_TIME_FORMAT))
        .map_err(|error| Error::InvalidDateFormat(error.to_string(), raw.to_owned()))
}

/// Parse a form amount string as an exact decimal.
///
/// # Errors
/// Returns [Error::InvalidAmount] if `raw` is not a decimal number, or
/// [Error::NegativeAmount] if it is below zero.
pub(crate) fn parse_form_amount(raw: &str) -> Result<Decimal, Error> {
    let amount: Decimal = raw
        .trim()
        .parse()
        .map_err(|_| Error::InvalidAmount(raw.to_owned()))?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(Error::NegativeAmount(amount));
    }

    Ok(amount)
}

#[cfg(test)]
pub(crate) mod test_utils {
    use rusqlite::Connection;

    use crate::{PasswordHash, UserID, db::initialize, user::create_user};

    /// An in-memory database with the schema applied and one registered user.
    pub fn get_test_connection() -> (Connection, UserID) {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        let user = create_user("test@example.com", PasswordHash::new_unchecked("hash"), &conn)
            .unwrap();

        (conn, user.id)
    }
}

#[cfg(test)]
mod transaction_crud_tests {
    use rust_decimal::Decimal;
    use time::macros::datetime;

    use crate::Error;

    use super::{
        NewTransaction, TransactionKind, create_transaction, delete_transaction, get_transaction,
        test_utils::get_test_connection, update_transaction,
    };

    fn sample_transaction() -> NewTransaction {
        NewTransaction {
            title: "Coffee".to_owned(),
            amount: Decimal::from(120),
            kind: TransactionKind::Expense,
            date_time: datetime!(2024-01-15 08:30),
            category_id: None,
        }
    }

    #[test]
    fn create_and_get_round_trip() {
        let (conn, user_id) = get_test_connection();

        let created = create_transaction(sample_transaction(), user_id, &conn).unwrap();
        let fetched = get_transaction(created.id, user_id, &conn).unwrap();

        assert_eq!(created, fetched);
    }

    #[test]
    fn create_rejects_empty_title() {
        let (conn, user_id) = get_test_connection();
        let new_transaction = NewTransaction {
            title: "   ".to_owned(),
            ..sample_transaction()
        };

        let result = create_transaction(new_transaction, user_id, &conn);

        assert_eq!(result, Err(Error::EmptyTitle));
    }

    #[test]
    fn create_rejects_negative_amount() {
        let (conn, user_id) = get_test_connection();
        let new_transaction = NewTransaction {
            amount: Decimal::from(-5),
            ..sample_transaction()
        };

        let result = create_transaction(new_transaction, user_id, &conn);

        assert_eq!(result, Err(Error::NegativeAmount(Decimal::from(-5))));
    }

    #[test]
    fn create_rejects_unknown_category() {
        let (conn, user_id) = get_test_connection();
        let new_transaction = NewTransaction {
            category_id: Some(9999),
            ..sample_transaction()
        };

        let result = create_transaction(new_transaction, user_id, &conn);

        assert_eq!(result, Err(Error::InvalidCategory(Some(9999))));
    }

    #[test]
    fn update_replaces_fields() {
        let (conn, user_id) = get_test_connection();
        let created = create_transaction(sample_transaction(), user_id, &conn).unwrap();

        let updated = NewTransaction {
            title: "Espresso".to_owned(),
            amount: Decimal::from(150),
            kind: TransactionKind::Expense,
            date_time: datetime!(2024-01-16 09:00),
            category_id: None,
        };
        update_transaction(created.id, updated.clone(), user_id, &conn).unwrap();

        let fetched = get_transaction(created.id, user_id, &conn).unwrap();
        assert_eq!(fetched.title, updated.title);
        assert_eq!(fetched.amount, updated.amount);
        assert_eq!(fetched.date_time, updated.date_time);
    }

    #[test]
    fn update_missing_transaction_fails() {
        let (conn, user_id) = get_test_connection();

        let result = update_transaction(1, sample_transaction(), user_id, &conn);

        assert_eq!(result, Err(Error::UpdateMissingTransaction));
    }

    #[test]
    fn delete_removes_transaction() {
        let (conn, user_id) = get_test_connection();
        let created = create_transaction(sample_transaction(), user_id, &conn).unwrap();

        delete_transaction(created.id, user_id, &conn).unwrap();

        assert_eq!(
            get_transaction(created.id, user_id, &conn),
            Err(Error::NotFound)
        );
    }

    #[test]
    fn delete_missing_transaction_fails() {
        let (conn, user_id) = get_test_connection();

        let result = delete_transaction(1, user_id, &conn);

        assert_eq!(result, Err(Error::DeleteMissingTransaction));
    }

    #[test]
    fn amount_survives_round_trip_exactly() {
        let (conn, user_id) = get_test_connection();
        let new_transaction = NewTransaction {
            amount: "123.45".parse().unwrap(),
            ..sample_transaction()
        };

        let created = create_transaction(new_transaction, user_id, &conn).unwrap();
        let fetched = get_transaction(created.id, user_id, &conn).unwrap();

        assert_eq!(fetched.amount, "123.45".parse().unwrap());
    }
}
