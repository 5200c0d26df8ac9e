//! Shared test utilities for `PocketLedger`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{credit, expense, room, wishlist},
    entities,
    errors::Result,
};
use chrono::{Duration, Utc};
use sea_orm::{DatabaseConnection, prelude::DateTimeUtc};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A timestamp `n` whole days before now. `days_ago(0)` is now.
#[must_use]
pub fn days_ago(n: i64) -> DateTimeUtc {
    Utc::now() - Duration::days(n)
}

/// Creates a test expense with sensible defaults.
///
/// # Arguments
/// * `db` - Database connection
/// * `title` - Expense title
/// * `amount` - Amount spent
///
/// # Defaults
/// * `category`: "Food"
/// * `date`: now
/// * `notes`: empty
pub async fn create_test_expense(
    db: &DatabaseConnection,
    title: &str,
    amount: f64,
) -> Result<entities::expense::Model> {
    expense::create_expense(
        db,
        title.to_string(),
        amount,
        "Food".to_string(),
        Utc::now(),
        String::new(),
    )
    .await
}

/// Creates a test expense with custom category and date.
/// Use this when ordering or period arithmetic matters.
pub async fn create_dated_expense(
    db: &DatabaseConnection,
    title: &str,
    amount: f64,
    category: &str,
    date: DateTimeUtc,
) -> Result<entities::expense::Model> {
    expense::create_expense(
        db,
        title.to_string(),
        amount,
        category.to_string(),
        date,
        String::new(),
    )
    .await
}

/// Creates a test credit with sensible defaults.
///
/// # Arguments
/// * `db` - Database connection
/// * `title` - Credit title
/// * `amount` - Amount received
///
/// # Defaults
/// * `source`: "Salary"
/// * `date`: now
/// * `notes`: empty
pub async fn create_test_credit(
    db: &DatabaseConnection,
    title: &str,
    amount: f64,
) -> Result<entities::credit::Model> {
    credit::create_credit(
        db,
        title.to_string(),
        amount,
        "Salary".to_string(),
        Utc::now(),
        String::new(),
    )
    .await
}

/// Creates a test credit with custom source and date.
pub async fn create_dated_credit(
    db: &DatabaseConnection,
    title: &str,
    amount: f64,
    source: &str,
    date: DateTimeUtc,
) -> Result<entities::credit::Model> {
    credit::create_credit(
        db,
        title.to_string(),
        amount,
        source.to_string(),
        date,
        String::new(),
    )
    .await
}

/// Creates a test wishlist item with sensible defaults.
///
/// # Arguments
/// * `db` - Database connection
/// * `title` - Item title
/// * `price` - Item price
///
/// # Defaults
/// * `category`: "Electronics"
/// * `priority`: "Medium"
/// * `notes`, `image_url`: empty
/// * `target_date`: None
pub async fn create_test_wishlist_item(
    db: &DatabaseConnection,
    title: &str,
    price: f64,
) -> Result<entities::wishlist_item::Model> {
    wishlist::create_wishlist_item(
        db,
        title.to_string(),
        price,
        "Electronics".to_string(),
        "Medium".to_string(),
        String::new(),
        String::new(),
        None,
    )
    .await
}

/// Creates a split room with the given initial members.
/// Returns (room, members) for common split-expense scenarios.
pub async fn create_test_room(
    db: &DatabaseConnection,
    name: &str,
    member_names: &[&str],
) -> Result<(
    entities::split_room::Model,
    Vec<entities::room_member::Model>,
)> {
    room::create_room(
        db,
        name.to_string(),
        member_names.iter().map(ToString::to_string).collect(),
    )
    .await
}

/// Records a shared expense paid by one member and split across the whole
/// room (no explicit participant list).
///
/// # Defaults
/// * `title`: "Test shared expense"
/// * `date`: now
/// * `notes`: empty
pub async fn add_test_split_expense(
    db: &DatabaseConnection,
    room_id: i64,
    payer_member_id: i64,
    amount: f64,
) -> Result<entities::split_expense::Model> {
    room::add_expense(
        db,
        room_id,
        room::NewSplitExpense {
            title: "Test shared expense".to_string(),
            amount,
            payer_member_id,
            participant_member_ids: Vec::new(),
            date: Utc::now(),
            notes: String::new(),
        },
    )
    .await
}
