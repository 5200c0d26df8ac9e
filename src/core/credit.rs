//! Credit business logic - Handles income and other incoming money.
//!
//! Credits mirror personal expenses: independent rows with a source instead
//! of a category. All functions are async and return Result types.

use crate::{
    entities::{Credit, credit},
    errors::{Error, Result},
};
use sea_orm::{Condition, QueryOrder, Set, prelude::*};

/// Creates a new credit entry, performing input validation.
///
/// The title must be non-empty after trimming and the amount must be finite.
pub async fn create_credit(
    db: &DatabaseConnection,
    title: String,
    amount: f64,
    source: String,
    date: DateTimeUtc,
    notes: String,
) -> Result<credit::Model> {
    if title.trim().is_empty() {
        return Err(Error::Config {
            message: "Credit title cannot be empty".to_string(),
        });
    }

    if !amount.is_finite() {
        return Err(Error::InvalidAmount { amount });
    }

    let credit = credit::ActiveModel {
        title: Set(title.trim().to_string()),
        amount: Set(amount),
        source: Set(source),
        date: Set(date),
        notes: Set(notes),
        ..Default::default()
    };

    let result = credit.insert(db).await?;
    Ok(result)
}

/// Finds a credit by its unique ID, returning None if it does not exist.
pub async fn get_credit_by_id(
    db: &DatabaseConnection,
    credit_id: i64,
) -> Result<Option<credit::Model>> {
    Credit::find_by_id(credit_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all credits ordered by date (newest first).
pub async fn get_all_credits(db: &DatabaseConnection) -> Result<Vec<credit::Model>> {
    Credit::find()
        .order_by_desc(credit::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all credits from a source, ordered by date (newest first).
pub async fn get_credits_by_source(
    db: &DatabaseConnection,
    source: &str,
) -> Result<Vec<credit::Model>> {
    Credit::find()
        .filter(credit::Column::Source.eq(source))
        .order_by_desc(credit::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Searches credits whose title or notes contain the query string.
pub async fn search_credits(db: &DatabaseConnection, query: &str) -> Result<Vec<credit::Model>> {
    Credit::find()
        .filter(
            Condition::any()
                .add(credit::Column::Title.contains(query))
                .add(credit::Column::Notes.contains(query)),
        )
        .order_by_desc(credit::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Updates every editable field of an existing credit.
///
/// Applies the same validation as [`create_credit`]. Returns `CreditNotFound`
/// if the id does not exist.
pub async fn update_credit(
    db: &DatabaseConnection,
    credit_id: i64,
    title: String,
    amount: f64,
    source: String,
    date: DateTimeUtc,
    notes: String,
) -> Result<credit::Model> {
    if title.trim().is_empty() {
        return Err(Error::Config {
            message: "Credit title cannot be empty".to_string(),
        });
    }

    if !amount.is_finite() {
        return Err(Error::InvalidAmount { amount });
    }

    let existing = Credit::find_by_id(credit_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::CreditNotFound {
            name: credit_id.to_string(),
        })?;

    let mut model: credit::ActiveModel = existing.into();
    model.title = Set(title.trim().to_string());
    model.amount = Set(amount);
    model.source = Set(source);
    model.date = Set(date);
    model.notes = Set(notes);

    model.update(db).await.map_err(Into::into)
}

/// Deletes a credit permanently. Returns `CreditNotFound` if the id does not exist.
pub async fn delete_credit(db: &DatabaseConnection, credit_id: i64) -> Result<()> {
    let existing = Credit::find_by_id(credit_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::CreditNotFound {
            name: credit_id.to_string(),
        })?;

    existing.delete(db).await?;
    Ok(())
}
