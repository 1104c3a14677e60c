//! Database query for the transaction snapshot used by the filtering pipeline.

use rusqlite::Connection;
use rust_decimal::Decimal;
use time::PrimitiveDateTime;

use crate::{Error, UserID, db::decimal_column};

use super::core::{TransactionId, TransactionKind, kind_column};

/// A transaction joined with the display fields of its category.
///
/// This is the row type the pure filtering pipeline operates on: the category
/// name feeds the search filter and the icon/color feed the list rendering. A
/// transaction without a category has `None` in all three and renders with the
/// fallback badge.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// A short text describing what the transaction was for.
    pub title: String,
    /// The magnitude of money spent or earned. Never negative.
    pub amount: Decimal,
    /// Whether the transaction is an expense or income.
    pub kind: TransactionKind,
    /// When the transaction happened.
    pub date_time: PrimitiveDateTime,
    /// The name of the category, if the transaction has one.
    pub category_name: Option<String>,
    /// The icon glyph of the category, if the transaction has one.
    pub category_icon: Option<String>,
    /// The color token of the category, if the transaction has one.
    pub category_color: Option<String>,
}

/// Get the full transaction snapshot for `user_id` in creation order.
///
/// Creation order matters: the filtering pipeline sorts by date with a stable
/// sort, so same-instant transactions keep their relative creation order.
///
/// # Errors
/// Returns [Error::SqlError] if:
/// - SQL query preparation or execution fails
/// - Transaction row mapping fails
pub fn list_transaction_rows(
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<TransactionRow>, Error> {
    connection
        .prepare(
            "SELECT \"transaction\".id, title, amount, \"transaction\".kind, date_time, \
            category.name, category.icon, category.color \
            FROM \"transaction\" \
            LEFT JOIN category ON \"transaction\".category_id = category.id \
            WHERE \"transaction\".user_id = ?1 \
            ORDER BY \"transaction\".id ASC",
        )?
        .query_map([user_id.as_i64()], |row| {
            Ok(TransactionRow {
                id: row.get(0)?,
                title: row.get(1)?,
                amount: decimal_column(row, 2)?,
                kind: kind_column(row, 3)?,
                date_time: row.get(4)?,
                category_name: row.get(5)?,
                category_icon: row.get(6)?,
                category_color: row.get(7)?,
            })
        })?
        .map(|row_result| row_result.map_err(Error::SqlError))
        .collect()
}

#[cfg(test)]
mod list_transaction_rows_tests {
    use rust_decimal::Decimal;
    use time::macros::datetime;

    use crate::{
        category::{NewCategory, create_category},
        transaction::{
            NewTransaction, TransactionKind, core::test_utils::get_test_connection,
            create_transaction,
        },
    };

    use super::list_transaction_rows;

    #[test]
    fn returns_rows_in_creation_order() {
        let (conn, user_id) = get_test_connection();
        for (i, day) in [15u8, 10, 20].into_iter().enumerate() {
            create_transaction(
                NewTransaction {
                    title: format!("transaction #{i}"),
                    amount: Decimal::from(10),
                    kind: TransactionKind::Expense,
                    date_time: datetime!(2024-01-01 12:00).replace_day(day).unwrap(),
                    category_id: None,
                },
                user_id,
                &conn,
            )
            .unwrap();
        }

        let rows = list_transaction_rows(user_id, &conn).unwrap();

        let titles: Vec<_> = rows.iter().map(|row| row.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["transaction #0", "transaction #1", "transaction #2"]
        );
    }

    #[test]
    fn joins_category_display_fields() {
        let (conn, user_id) = get_test_connection();
        let category = create_category(
            NewCategory {
                name: "Groceries".to_owned(),
                kind: TransactionKind::Expense,
                icon: "🛒".to_owned(),
                color: "bg-purple-500".to_owned(),
            },
            user_id,
            &conn,
        )
        .unwrap();

        create_transaction(
            NewTransaction {
                title: "Weekly shop".to_owned(),
                amount: Decimal::from(54),
                kind: TransactionKind::Expense,
                date_time: datetime!(2024-01-15 18:00),
                category_id: Some(category.id),
            },
            user_id,
            &conn,
        )
        .unwrap();
        create_transaction(
            NewTransaction {
                title: "Cash found".to_owned(),
                amount: Decimal::from(5),
                kind: TransactionKind::Income,
                date_time: datetime!(2024-01-16 09:00),
                category_id: None,
            },
            user_id,
            &conn,
        )
        .unwrap();

        let rows = list_transaction_rows(user_id, &conn).unwrap();

        assert_eq!(rows[0].category_name.as_deref(), Some("Groceries"));
        assert_eq!(rows[0].category_icon.as_deref(), Some("🛒"));
        assert_eq!(rows[0].category_color.as_deref(), Some("bg-purple-500"));
        assert_eq!(rows[1].category_name, None);
        assert_eq!(rows[1].category_icon, None);
    }

    #[test]
    fn excludes_other_users_transactions() {
        let (conn, user_id) = get_test_connection();
        let other_user = crate::user::create_user(
            "other@example.com",
            crate::PasswordHash::new_unchecked("hash"),
            &conn,
        )
        .unwrap();

        create_transaction(
            NewTransaction {
                title: "Mine".to_owned(),
                amount: Decimal::from(10),
                kind: TransactionKind::Expense,
                date_time: datetime!(2024-01-15 12:00),
                category_id: None,
            },
            user_id,
            &conn,
        )
        .unwrap();
        create_transaction(
            NewTransaction {
                title: "Theirs".to_owned(),
                amount: Decimal::from(10),
                kind: TransactionKind::Expense,
                date_time: datetime!(2024-01-15 12:00),
                category_id: None,
            },
            other_user.id,
            &conn,
        )
        .unwrap();

        let rows = list_transaction_rows(user_id, &conn).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Mine");
    }
}
