//! Credit entity - Represents an income entry.
//!
//! Each credit has a title, amount, source (a key into the catalog's
//! credit-source table), date, and free-form notes.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Credit database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "credits")]
pub struct Model {
    /// Unique identifier for the credit
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable title (e.g., "October salary")
    pub title: String,
    /// Amount received
    pub amount: f64,
    /// Source name (e.g., "Salary", "Freelance") - resolved against the catalog
    pub source: String,
    /// When the credit was received
    pub date: DateTimeUtc,
    /// Free-form notes, may be empty
    pub notes: String,
}

/// Credits have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
