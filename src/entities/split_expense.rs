//! Split expense entity - A shared cost recorded inside a split room.
//!
//! `payer_member_id` references a room member by id but deliberately carries
//! no foreign key: removing a member leaves their expenses behind, so the
//! column must be able to hold an id with no matching member row. Balance
//! computation treats such payers as absent.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Split expense database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "split_expenses")]
pub struct Model {
    /// Unique identifier for the expense
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the room this expense was recorded in
    pub room_id: i64,
    /// Short description of what was paid for
    pub title: String,
    /// Amount paid, in the room's implicit currency
    pub amount: f64,
    /// Member id of whoever fronted the money (may be dangling)
    pub payer_member_id: i64,
    /// When the expense occurred
    pub date: DateTimeUtc,
    /// Free-form notes
    pub notes: String,
}

/// Defines relationships between SplitExpense and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each expense belongs to one room
    #[sea_orm(
        belongs_to = "super::split_room::Entity",
        from = "Column::RoomId",
        to = "super::split_room::Column::Id"
    )]
    Room,
    /// An expense lists the members it is split among
    #[sea_orm(has_many = "super::expense_participant::Entity")]
    Participants,
}

impl Related<super::split_room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl Related<super::expense_participant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participants.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
