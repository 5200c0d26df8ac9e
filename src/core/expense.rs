//! Personal expense business logic - Handles all expense-related operations.
//!
//! Provides functions for creating, retrieving, updating, and deleting personal
//! expenses, plus text search and category filtering. Expenses are independent
//! rows with no links to other tables; deleting one affects nothing else.
//! All functions are async and return Result types for error handling.

use crate::{
    entities::{Expense, expense},
    errors::{Error, Result},
};
use sea_orm::{Condition, QueryOrder, Set, prelude::*};

/// Creates a new personal expense, performing input validation.
///
/// The title must be non-empty after trimming and the amount must be finite.
/// Positive amounts are the expected convention but are not enforced here.
///
/// # Arguments
/// * `db` - Database connection
/// * `title` - Short description of the expense
/// * `amount` - Amount spent
/// * `category` - Category name (a catalog key, e.g. "Food")
/// * `date` - When the expense occurred
/// * `notes` - Free-form notes, may be empty
pub async fn create_expense(
    db: &DatabaseConnection,
    title: String,
    amount: f64,
    category: String,
    date: DateTimeUtc,
    notes: String,
) -> Result<expense::Model> {
    if title.trim().is_empty() {
        return Err(Error::Config {
            message: "Expense title cannot be empty".to_string(),
        });
    }

    if !amount.is_finite() {
        return Err(Error::InvalidAmount { amount });
    }

    let expense = expense::ActiveModel {
        title: Set(title.trim().to_string()),
        amount: Set(amount),
        category: Set(category),
        date: Set(date),
        notes: Set(notes),
        ..Default::default()
    };

    let result = expense.insert(db).await?;
    Ok(result)
}

/// Finds an expense by its unique ID, returning None if it does not exist.
pub async fn get_expense_by_id(
    db: &DatabaseConnection,
    expense_id: i64,
) -> Result<Option<expense::Model>> {
    Expense::find_by_id(expense_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all expenses ordered by date (newest first).
///
/// This is the default listing the expense screen renders.
pub async fn get_all_expenses(db: &DatabaseConnection) -> Result<Vec<expense::Model>> {
    Expense::find()
        .order_by_desc(expense::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all expenses in a category, ordered by date (newest first).
pub async fn get_expenses_by_category(
    db: &DatabaseConnection,
    category: &str,
) -> Result<Vec<expense::Model>> {
    Expense::find()
        .filter(expense::Column::Category.eq(category))
        .order_by_desc(expense::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Searches expenses whose title or notes contain the query string.
///
/// Matching is a substring match (SQL `LIKE`), case-insensitive for ASCII.
/// Results are ordered by date (newest first).
pub async fn search_expenses(
    db: &DatabaseConnection,
    query: &str,
) -> Result<Vec<expense::Model>> {
    Expense::find()
        .filter(
            Condition::any()
                .add(expense::Column::Title.contains(query))
                .add(expense::Column::Notes.contains(query)),
        )
        .order_by_desc(expense::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Updates every editable field of an existing expense.
///
/// Applies the same validation as [`create_expense`]. Returns the updated
/// model, or `ExpenseNotFound` if the id does not exist.
pub async fn update_expense(
    db: &DatabaseConnection,
    expense_id: i64,
    title: String,
    amount: f64,
    category: String,
    date: DateTimeUtc,
    notes: String,
) -> Result<expense::Model> {
    if title.trim().is_empty() {
        return Err(Error::Config {
            message: "Expense title cannot be empty".to_string(),
        });
    }

    if !amount.is_finite() {
        return Err(Error::InvalidAmount { amount });
    }

    let existing = Expense::find_by_id(expense_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ExpenseNotFound {
            name: expense_id.to_string(),
        })?;

    let mut model: expense::ActiveModel = existing.into();
    model.title = Set(title.trim().to_string());
    model.amount = Set(amount);
    model.category = Set(category);
    model.date = Set(date);
    model.notes = Set(notes);

    model.update(db).await.map_err(Into::into)
}

/// Deletes an expense permanently.
///
/// Returns `ExpenseNotFound` if the id does not exist.
pub async fn delete_expense(db: &DatabaseConnection, expense_id: i64) -> Result<()> {
    let existing = Expense::find_by_id(expense_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ExpenseNotFound {
            name: expense_id.to_string(),
        })?;

    existing.delete(db).await?;
    Ok(())
}
