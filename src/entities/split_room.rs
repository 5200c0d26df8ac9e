//! Split room entity - A named group of members sharing expenses.
//!
//! A room exclusively owns its members and split expenses; nothing is
//! shared across rooms. Balances and settlement plans are derived views,
//! never stored.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Split room database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "split_rooms")]
pub struct Model {
    /// Unique identifier for the room
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable room name (e.g., "Goa trip")
    pub name: String,
    /// When the room was created
    pub created_date: DateTimeUtc,
}

/// Defines relationships between SplitRoom and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One room has many members
    #[sea_orm(has_many = "super::room_member::Entity")]
    Members,
    /// One room has many split expenses
    #[sea_orm(has_many = "super::split_expense::Entity")]
    Expenses,
}

impl Related<super::room_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Members.def()
    }
}

impl Related<super::split_expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
