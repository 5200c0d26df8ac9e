//! Expense entity - Represents a personal expense entry.
//!
//! Each expense has a title, amount, category (a key into the catalog's
//! category table), date, and free-form notes.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expense database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    /// Unique identifier for the expense
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable title (e.g., "Groceries", "Train ticket")
    pub title: String,
    /// Amount spent
    pub amount: f64,
    /// Category name (e.g., "Food", "Travel") - resolved against the catalog
    pub category: String,
    /// When the expense occurred
    pub date: DateTimeUtc,
    /// Free-form notes, may be empty
    pub notes: String,
}

/// Expenses have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
