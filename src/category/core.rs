//! Defines the core data model and database queries for categories.

use rusqlite::Connection;

use crate::{Error, UserID, transaction::TransactionKind};

use super::palette::{CATEGORY_COLORS, CATEGORY_ICONS};

/// An alias for category IDs.
pub type CategoryId = i64;

/// A classification for transactions, e.g. "Food", "Salary".
///
/// A category is either owned by a user or a seeded default shared by all
/// users. Default categories cannot be edited or deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    /// The ID of the category.
    pub id: CategoryId,
    /// The name of the category.
    pub name: String,
    /// Whether the category classifies expenses or income.
    pub kind: TransactionKind,
    /// The icon glyph displayed in transaction lists.
    pub icon: String,
    /// The color token for the icon badge.
    pub color: String,
    /// Whether this is a seeded default category.
    pub is_default: bool,
}

/// The data needed to create or update a category.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    /// The name of the category.
    pub name: String,
    /// Whether the category classifies expenses or income.
    pub kind: TransactionKind,
    /// The icon glyph displayed in transaction lists.
    pub icon: String,
    /// The color token for the icon badge.
    pub color: String,
}

/// The categories seeded for every installation.
const DEFAULT_CATEGORIES: &[(&str, &str, &str, &str)] = &[
    ("Food & Drinks", "expense", "🍔", "bg-red-500"),
    ("Transport", "expense", "🚗", "bg-blue-500"),
    ("Shopping", "expense", "🛒", "bg-purple-500"),
    ("Entertainment", "expense", "🎬", "bg-pink-500"),
    ("Bills & Utilities", "expense", "⚡", "bg-yellow-500"),
    ("Health", "expense", "💊", "bg-green-500"),
    ("Salary", "income", "💰", "bg-emerald-500"),
    ("Freelance", "income", "💻", "bg-cyan-500"),
    ("Investments", "income", "📈", "bg-indigo-500"),
    ("Other Income", "income", "💵", "bg-gray-500"),
];

/// Create the category table.
///
/// # Errors
/// This function will return an error if the SQL query failed.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            user_id INTEGER REFERENCES user(id),
            name TEXT NOT NULL,
            kind TEXT NOT NULL,
            icon TEXT NOT NULL,
            color TEXT NOT NULL,
            is_default INTEGER NOT NULL DEFAULT 0
        )",
        (),
    )?;

    Ok(())
}

/// Insert the default categories if they have not been seeded yet.
///
/// Default categories have no owner (`user_id IS NULL`) and are visible to
/// every user.
///
/// # Errors
/// This function will return an error if the SQL query failed.
pub fn seed_default_categories(connection: &Connection) -> Result<(), rusqlite::Error> {
    let already_seeded: bool = connection.query_row(
        "SELECT EXISTS(SELECT 1 FROM category WHERE is_default = 1)",
        [],
        |row| row.get(0),
    )?;

    if already_seeded {
        return Ok(());
    }

    for (name, kind, icon, color) in DEFAULT_CATEGORIES {
        connection.execute(
            "INSERT INTO category (user_id, name, kind, icon, color, is_default) \
            VALUES (NULL, ?1, ?2, ?3, ?4, 1)",
            (name, kind, icon, color),
        )?;
    }

    Ok(())
}

/// Validate and insert a new category owned by `user_id`.
///
/// # Errors
/// Returns [Error::EmptyCategoryName] if the name is blank,
/// [Error::InvalidIcon] or [Error::InvalidColor] if the icon or color is not
/// from the palette, or [Error::SqlError] if an SQL related error occurred.
pub fn create_category(
    new_category: NewCategory,
    user_id: UserID,
    connection: &Connection,
) -> Result<Category, Error> {
    validate_category(&new_category)?;

    connection.execute(
        "INSERT INTO category (user_id, name, kind, icon, color, is_default) \
        VALUES (?1, ?2, ?3, ?4, ?5, 0)",
        (
            user_id.as_i64(),
            &new_category.name,
            new_category.kind.as_str(),
            &new_category.icon,
            &new_category.color,
        ),
    )?;

    Ok(Category {
        id: connection.last_insert_rowid(),
        name: new_category.name,
        kind: new_category.kind,
        icon: new_category.icon,
        color: new_category.color,
        is_default: false,
    })
}

/// Get all categories visible to `user_id`: their own plus the defaults.
///
/// Default categories are listed first, then the user's own, each group in
/// name order.
///
/// # Errors
/// Returns [Error::SqlError] if an SQL related error occurred.
pub fn list_categories(user_id: UserID, connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare(
            "SELECT id, name, kind, icon, color, is_default FROM category \
            WHERE user_id IS NULL OR user_id = ?1 \
            ORDER BY is_default DESC, name ASC",
        )?
        .query_map([user_id.as_i64()], map_category_row)?
        .map(|row_result| row_result.map_err(Error::SqlError))
        .collect()
}

/// Get the category with `category_id` if it is visible to `user_id`.
///
/// # Errors
/// Returns [Error::NotFound] if the category does not exist or belongs to
/// another user.
pub fn get_category(
    category_id: CategoryId,
    user_id: UserID,
    connection: &Connection,
) -> Result<Category, Error> {
    connection
        .prepare(
            "SELECT id, name, kind, icon, color, is_default FROM category \
            WHERE id = ?1 AND (user_id IS NULL OR user_id = ?2)",
        )?
        .query_row((category_id, user_id.as_i64()), map_category_row)
        .map_err(|error| error.into())
}

/// Replace the data of the category with `category_id`.
///
/// Default categories are immutable: updating one fails regardless of the
/// submitted data.
///
/// # Errors
/// Returns [Error::DefaultCategoryImmutable] for default categories,
/// [Error::UpdateMissingCategory] if the category does not exist or belongs to
/// another user, plus the validation errors of [create_category].
pub fn update_category(
    category_id: CategoryId,
    new_category: NewCategory,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    validate_category(&new_category)?;
    reject_default_category(category_id, user_id, connection, Error::UpdateMissingCategory)?;

    let rows_updated = connection.execute(
        "UPDATE category SET name = ?1, kind = ?2, icon = ?3, color = ?4 \
        WHERE id = ?5 AND user_id = ?6",
        (
            &new_category.name,
            new_category.kind.as_str(),
            &new_category.icon,
            &new_category.color,
            category_id,
            user_id.as_i64(),
        ),
    )?;

    if rows_updated == 0 {
        return Err(Error::UpdateMissingCategory);
    }

    Ok(())
}

/// Delete the category with `category_id`.
///
/// Transactions referencing the category keep existing and become
/// uncategorized. Default categories cannot be deleted.
///
/// # Errors
/// Returns [Error::DefaultCategoryImmutable] for default categories, or
/// [Error::DeleteMissingCategory] if the category does not exist or belongs to
/// another user.
pub fn delete_category(
    category_id: CategoryId,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    reject_default_category(category_id, user_id, connection, Error::DeleteMissingCategory)?;

    connection.execute(
        "UPDATE \"transaction\" SET category_id = NULL \
        WHERE category_id = ?1 AND user_id = ?2",
        (category_id, user_id.as_i64()),
    )?;

    let rows_deleted = connection.execute(
        "DELETE FROM category WHERE id = ?1 AND user_id = ?2",
        (category_id, user_id.as_i64()),
    )?;

    if rows_deleted == 0 {
        return Err(Error::DeleteMissingCategory);
    }

    Ok(())
}

/// Fail with [Error::DefaultCategoryImmutable] when `category_id` names a
/// default category, and with `missing_error` when it names nothing visible
/// to the user.
fn reject_default_category(
    category_id: CategoryId,
    user_id: UserID,
    connection: &Connection,
    missing_error: Error,
) -> Result<(), Error> {
    let category = match get_category(category_id, user_id, connection) {
        Ok(category) => category,
        Err(Error::NotFound) => return Err(missing_error),
        Err(error) => return Err(error),
    };

    if category.is_default {
        return Err(Error::DefaultCategoryImmutable);
    }

    Ok(())
}

fn validate_category(new_category: &NewCategory) -> Result<(), Error> {
    if new_category.name.trim().is_empty() {
        return Err(Error::EmptyCategoryName);
    }

    if !CATEGORY_ICONS.contains(&new_category.icon.as_str()) {
        return Err(Error::InvalidIcon(new_category.icon.clone()));
    }

    if !CATEGORY_COLORS.contains(&new_category.color.as_str()) {
        return Err(Error::InvalidColor(new_category.color.clone()));
    }

    Ok(())
}

fn map_category_row(row: &rusqlite::Row) -> Result<Category, rusqlite::Error> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        kind: crate::transaction::kind_column(row, 2)?,
        icon: row.get(3)?,
        color: row.get(4)?,
        is_default: row.get(5)?,
    })
}

#[cfg(test)]
mod category_tests {
    use crate::{
        Error,
        transaction::{TransactionKind, test_utils::get_test_connection},
    };

    use super::{
        NewCategory, create_category, delete_category, get_category, list_categories,
        update_category,
    };

    fn sample_category() -> NewCategory {
        NewCategory {
            name: "Coffee shops".to_owned(),
            kind: TransactionKind::Expense,
            icon: "☕".to_owned(),
            color: "bg-amber-500".to_owned(),
        }
    }

    #[test]
    fn create_and_get_round_trip() {
        let (conn, user_id) = get_test_connection();

        let created = create_category(sample_category(), user_id, &conn).unwrap();
        let fetched = get_category(created.id, user_id, &conn).unwrap();

        assert_eq!(created, fetched);
        assert!(!fetched.is_default);
    }

    #[test]
    fn create_rejects_blank_name() {
        let (conn, user_id) = get_test_connection();
        let category = NewCategory {
            name: " ".to_owned(),
            ..sample_category()
        };

        assert_eq!(
            create_category(category, user_id, &conn),
            Err(Error::EmptyCategoryName)
        );
    }

    #[test]
    fn create_rejects_icon_outside_palette() {
        let (conn, user_id) = get_test_connection();
        let category = NewCategory {
            icon: "x".to_owned(),
            ..sample_category()
        };

        assert_eq!(
            create_category(category, user_id, &conn),
            Err(Error::InvalidIcon("x".to_owned()))
        );
    }

    #[test]
    fn create_rejects_color_outside_palette() {
        let (conn, user_id) = get_test_connection();
        let category = NewCategory {
            color: "hotpink".to_owned(),
            ..sample_category()
        };

        assert_eq!(
            create_category(category, user_id, &conn),
            Err(Error::InvalidColor("hotpink".to_owned()))
        );
    }

    #[test]
    fn list_includes_defaults_and_own_categories() {
        let (conn, user_id) = get_test_connection();
        create_category(sample_category(), user_id, &conn).unwrap();

        let categories = list_categories(user_id, &conn).unwrap();

        assert!(categories.iter().any(|category| category.is_default));
        assert!(
            categories
                .iter()
                .any(|category| category.name == "Coffee shops")
        );
    }

    #[test]
    fn update_rejects_default_category() {
        let (conn, user_id) = get_test_connection();
        let default_category = list_categories(user_id, &conn)
            .unwrap()
            .into_iter()
            .find(|category| category.is_default)
            .unwrap();

        let result = update_category(default_category.id, sample_category(), user_id, &conn);

        assert_eq!(result, Err(Error::DefaultCategoryImmutable));
    }

    #[test]
    fn delete_rejects_default_category() {
        let (conn, user_id) = get_test_connection();
        let default_category = list_categories(user_id, &conn)
            .unwrap()
            .into_iter()
            .find(|category| category.is_default)
            .unwrap();

        let result = delete_category(default_category.id, user_id, &conn);

        assert_eq!(result, Err(Error::DefaultCategoryImmutable));
    }

    #[test]
    fn update_replaces_fields() {
        let (conn, user_id) = get_test_connection();
        let created = create_category(sample_category(), user_id, &conn).unwrap();

        let updated = NewCategory {
            name: "Cafés".to_owned(),
            kind: TransactionKind::Expense,
            icon: "🍽️".to_owned(),
            color: "bg-rose-500".to_owned(),
        };
        update_category(created.id, updated.clone(), user_id, &conn).unwrap();

        let fetched = get_category(created.id, user_id, &conn).unwrap();
        assert_eq!(fetched.name, updated.name);
        assert_eq!(fetched.icon, updated.icon);
        assert_eq!(fetched.color, updated.color);
    }

    #[test]
    fn delete_uncategorizes_referencing_transactions() {
        use rust_decimal::Decimal;
        use time::macros::datetime;

        use crate::transaction::{NewTransaction, create_transaction, get_transaction};

        let (conn, user_id) = get_test_connection();
        let category = create_category(sample_category(), user_id, &conn).unwrap();
        let transaction = create_transaction(
            NewTransaction {
                title: "Flat white".to_owned(),
                amount: Decimal::from(5),
                kind: TransactionKind::Expense,
                date_time: datetime!(2024-01-15 08:30),
                category_id: Some(category.id),
            },
            user_id,
            &conn,
        )
        .unwrap();

        delete_category(category.id, user_id, &conn).unwrap();

        let fetched = get_transaction(transaction.id, user_id, &conn).unwrap();
        assert_eq!(fetched.category_id, None);
    }

    #[test]
    fn delete_missing_category_fails() {
        let (conn, user_id) = get_test_connection();

        assert_eq!(
            delete_category(9999, user_id, &conn),
            Err(Error::DeleteMissingCategory)
        );
    }

    #[test]
    fn categories_are_not_visible_to_other_users() {
        let (conn, user_id) = get_test_connection();
        let other_user = crate::user::create_user(
            "other@example.com",
            crate::PasswordHash::new_unchecked("hash"),
            &conn,
        )
        .unwrap();
        let created = create_category(sample_category(), user_id, &conn).unwrap();

        let result = get_category(created.id, other_user.id, &conn);

        assert_eq!(result, Err(Error::NotFound));
    }
}
