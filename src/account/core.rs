//! Defines the core data model and database queries for accounts.

use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Error, UserID, db::decimal_column};

/// An alias for account IDs.
pub type AccountId = i64;

/// The kind of money-holding entity an account is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    /// A current or checking bank account.
    Bank,
    /// A credit card. Balances are typically negative (amount owed).
    Credit,
    /// Physical cash.
    Cash,
    /// A savings account.
    Savings,
    /// Anything else.
    Other,
}

impl AccountKind {
    /// Every account kind, in the order shown in forms.
    pub const ALL: [AccountKind; 5] = [
        Self::Bank,
        Self::Credit,
        Self::Cash,
        Self::Savings,
        Self::Other,
    ];

    /// The string stored in the database and used in form values.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bank => "bank",
            Self::Credit => "credit",
            Self::Cash => "cash",
            Self::Savings => "savings",
            Self::Other => "other",
        }
    }

    /// The label shown to users.
    pub fn label(self) -> &'static str {
        match self {
            Self::Bank => "Bank Account",
            Self::Credit => "Credit Card",
            Self::Cash => "Cash",
            Self::Savings => "Savings",
            Self::Other => "Other",
        }
    }

    /// The badge color for the account card.
    pub fn color(self) -> &'static str {
        match self {
            Self::Bank => "bg-blue-500",
            Self::Credit => "bg-purple-500",
            Self::Cash => "bg-green-500",
            Self::Savings => "bg-orange-500",
            Self::Other => "bg-gray-500",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "bank" => Some(Self::Bank),
            "credit" => Some(Self::Credit),
            "cash" => Some(Self::Cash),
            "savings" => Some(Self::Savings),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// A named money-holding entity with a signed balance.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// The ID of the account.
    pub id: AccountId,
    /// The name of the account.
    pub name: String,
    /// The kind of account.
    pub kind: AccountKind,
    /// The balance. Negative means an amount owed.
    pub balance: Decimal,
    /// An optional display string, e.g. the last digits of the account number.
    pub account_number: Option<String>,
}

/// The data needed to create or update an account.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    /// The name of the account.
    pub name: String,
    /// The kind of account.
    pub kind: AccountKind,
    /// The balance. Negative means an amount owed.
    pub balance: Decimal,
    /// An optional display string, e.g. the last digits of the account number.
    pub account_number: Option<String>,
}

/// Sum the balances of `accounts` for display as a single total.
///
/// Negative balances (credit-card-style debt) subtract from the total; an
/// empty slice yields zero. Exact decimal arithmetic throughout.
pub fn total_balance(accounts: &[Account]) -> Decimal {
    accounts
        .iter()
        .map(|account| account.balance)
        .sum()
}

/// Create the account table.
///
/// # Errors
/// This function will return an error if the SQL query failed.
pub fn create_account_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS account (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES user(id),
            name TEXT NOT NULL,
            kind TEXT NOT NULL,
            balance TEXT NOT NULL,
            account_number TEXT
        )",
        (),
    )?;

    Ok(())
}

/// Validate and insert a new account owned by `user_id`.
///
/// # Errors
/// Returns [Error::EmptyAccountName] if the name is blank, or
/// [Error::SqlError] if an SQL related error occurred.
pub fn create_account(
    new_account: NewAccount,
    user_id: UserID,
    connection: &Connection,
) -> Result<Account, Error> {
    if new_account.name.trim().is_empty() {
        return Err(Error::EmptyAccountName);
    }

    connection.execute(
        "INSERT INTO account (user_id, name, kind, balance, account_number) \
        VALUES (?1, ?2, ?3, ?4, ?5)",
        (
            user_id.as_i64(),
            &new_account.name,
            new_account.kind.as_str(),
            new_account.balance.to_string(),
            &new_account.account_number,
        ),
    )?;

    Ok(Account {
        id: connection.last_insert_rowid(),
        name: new_account.name,
        kind: new_account.kind,
        balance: new_account.balance,
        account_number: new_account.account_number,
    })
}

/// Get all accounts belonging to `user_id` in creation order.
///
/// # Errors
/// Returns [Error::SqlError] if an SQL related error occurred.
pub fn list_accounts(user_id: UserID, connection: &Connection) -> Result<Vec<Account>, Error> {
    connection
        .prepare(
            "SELECT id, name, kind, balance, account_number FROM account \
            WHERE user_id = ?1 ORDER BY id ASC",
        )?
        .query_map([user_id.as_i64()], map_account_row)?
        .map(|row_result| row_result.map_err(Error::SqlError))
        .collect()
}

/// Get the account with `account_id` belonging to `user_id`.
///
/// # Errors
/// Returns [Error::NotFound] if the account does not exist or belongs to
/// another user.
pub fn get_account(
    account_id: AccountId,
    user_id: UserID,
    connection: &Connection,
) -> Result<Account, Error> {
    connection
        .prepare(
            "SELECT id, name, kind, balance, account_number FROM account \
            WHERE id = ?1 AND user_id = ?2",
        )?
        .query_row((account_id, user_id.as_i64()), map_account_row)
        .map_err(|error| error.into())
}

/// Replace the data of the account with `account_id`.
///
/// # Errors
/// Returns [Error::UpdateMissingAccount] if the account does not exist or
/// belongs to another user, or [Error::EmptyAccountName] if the name is blank.
pub fn update_account(
    account_id: AccountId,
    new_account: NewAccount,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    if new_account.name.trim().is_empty() {
        return Err(Error::EmptyAccountName);
    }

    let rows_updated = connection.execute(
        "UPDATE account SET name = ?1, kind = ?2, balance = ?3, account_number = ?4 \
        WHERE id = ?5 AND user_id = ?6",
        (
            &new_account.name,
            new_account.kind.as_str(),
            new_account.balance.to_string(),
            &new_account.account_number,
            account_id,
            user_id.as_i64(),
        ),
    )?;

    if rows_updated == 0 {
        return Err(Error::UpdateMissingAccount);
    }

    Ok(())
}

/// Delete the account with `account_id`.
///
/// # Errors
/// Returns [Error::DeleteMissingAccount] if the account does not exist or
/// belongs to another user.
pub fn delete_account(
    account_id: AccountId,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_deleted = connection.execute(
        "DELETE FROM account WHERE id = ?1 AND user_id = ?2",
        (account_id, user_id.as_i64()),
    )?;

    if rows_deleted == 0 {
        return Err(Error::DeleteMissingAccount);
    }

    Ok(())
}

fn map_account_row(row: &rusqlite::Row) -> Result<Account, rusqlite::Error> {
    let raw_kind: String = row.get(2)?;
    let kind = AccountKind::parse(&raw_kind).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            rusqlite::types::Type::Text,
            format!("unknown account kind \"{raw_kind}\"").into(),
        )
    })?;

    Ok(Account {
        id: row.get(0)?,
        name: row.get(1)?,
        kind,
        balance: decimal_column(row, 3)?,
        account_number: row.get(4)?,
    })
}

#[cfg(test)]
mod total_balance_tests {
    use rust_decimal::Decimal;

    use super::{Account, AccountKind, total_balance};

    fn account(id: i64, balance: &str) -> Account {
        Account {
            id,
            name: format!("Account {id}"),
            kind: AccountKind::Bank,
            balance: balance.parse().unwrap(),
            account_number: None,
        }
    }

    #[test]
    fn sums_all_balances() {
        let accounts = vec![account(1, "100.50"), account(2, "250.75")];

        assert_eq!(total_balance(&accounts), "351.25".parse().unwrap());
    }

    #[test]
    fn negative_balances_subtract() {
        let accounts = vec![account(1, "100"), account(2, "-250")];

        assert_eq!(total_balance(&accounts), Decimal::from(-150));
    }

    #[test]
    fn empty_account_set_yields_zero() {
        assert_eq!(total_balance(&[]), Decimal::ZERO);
    }
}

#[cfg(test)]
mod account_crud_tests {
    use rust_decimal::Decimal;

    use crate::{Error, transaction::test_utils::get_test_connection};

    use super::{
        AccountKind, NewAccount, create_account, delete_account, get_account, list_accounts,
        update_account,
    };

    fn sample_account() -> NewAccount {
        NewAccount {
            name: "Everyday".to_owned(),
            kind: AccountKind::Bank,
            balance: Decimal::from(1000),
            account_number: Some("XX1234".to_owned()),
        }
    }

    #[test]
    fn create_and_get_round_trip() {
        let (conn, user_id) = get_test_connection();

        let created = create_account(sample_account(), user_id, &conn).unwrap();
        let fetched = get_account(created.id, user_id, &conn).unwrap();

        assert_eq!(created, fetched);
    }

    #[test]
    fn create_rejects_blank_name() {
        let (conn, user_id) = get_test_connection();
        let account = NewAccount {
            name: "".to_owned(),
            ..sample_account()
        };

        assert_eq!(
            create_account(account, user_id, &conn),
            Err(Error::EmptyAccountName)
        );
    }

    #[test]
    fn negative_balance_survives_round_trip() {
        let (conn, user_id) = get_test_connection();
        let account = NewAccount {
            name: "Credit card".to_owned(),
            kind: AccountKind::Credit,
            balance: "-432.10".parse().unwrap(),
            account_number: None,
        };

        let created = create_account(account, user_id, &conn).unwrap();
        let fetched = get_account(created.id, user_id, &conn).unwrap();

        assert_eq!(fetched.balance, "-432.10".parse().unwrap());
    }

    #[test]
    fn list_only_returns_own_accounts() {
        let (conn, user_id) = get_test_connection();
        let other_user = crate::user::create_user(
            "other@example.com",
            crate::PasswordHash::new_unchecked("hash"),
            &conn,
        )
        .unwrap();

        create_account(sample_account(), user_id, &conn).unwrap();
        create_account(
            NewAccount {
                name: "Not mine".to_owned(),
                ..sample_account()
            },
            other_user.id,
            &conn,
        )
        .unwrap();

        let accounts = list_accounts(user_id, &conn).unwrap();

        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].name, "Everyday");
    }

    #[test]
    fn update_replaces_fields() {
        let (conn, user_id) = get_test_connection();
        let created = create_account(sample_account(), user_id, &conn).unwrap();

        let updated = NewAccount {
            name: "Emergency fund".to_owned(),
            kind: AccountKind::Savings,
            balance: Decimal::from(5000),
            account_number: None,
        };
        update_account(created.id, updated.clone(), user_id, &conn).unwrap();

        let fetched = get_account(created.id, user_id, &conn).unwrap();
        assert_eq!(fetched.name, updated.name);
        assert_eq!(fetched.kind, updated.kind);
        assert_eq!(fetched.balance, updated.balance);
        assert_eq!(fetched.account_number, None);
    }

    #[test]
    fn update_missing_account_fails() {
        let (conn, user_id) = get_test_connection();

        assert_eq!(
            update_account(1, sample_account(), user_id, &conn),
            Err(Error::UpdateMissingAccount)
        );
    }

    #[test]
    fn delete_removes_account() {
        let (conn, user_id) = get_test_connection();
        let created = create_account(sample_account(), user_id, &conn).unwrap();

        delete_account(created.id, user_id, &conn).unwrap();

        assert_eq!(
            get_account(created.id, user_id, &conn),
            Err(Error::NotFound)
        );
    }

    #[test]
    fn delete_missing_account_fails() {
        let (conn, user_id) = get_test_connection();

        assert_eq!(
            delete_account(1, user_id, &conn),
            Err(Error::DeleteMissingAccount)
        );
    }
}
