//! Room member entity - A named participant within a split room.
//!
//! The member's integer id is the join key split expenses use for payer and
//! participant attribution; the display name exists for presentation only.
//! Members have no rename operation.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Room member database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "room_members")]
pub struct Model {
    /// Unique identifier for the member
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the room this member belongs to
    pub room_id: i64,
    /// Display name shown in balances and settlement instructions
    pub name: String,
    /// Contact phone number, empty string when unset
    pub phone_number: String,
    /// Contact email, empty string when unset
    pub email: String,
}

/// Defines relationships between RoomMember and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each member belongs to one room
    #[sea_orm(
        belongs_to = "super::split_room::Entity",
        from = "Column::RoomId",
        to = "super::split_room::Column::Id"
    )]
    Room,
}

impl Related<super::split_room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
