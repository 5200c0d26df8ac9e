//! Expense participant entity - One row per member an expense is split among.
//!
//! Like the payer column on split expenses, `member_id` has no foreign key so
//! participant rows survive member removal. Per-expense balance computation
//! simply drops shares whose member no longer exists.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expense participant database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expense_participants")]
pub struct Model {
    /// Unique identifier for the participant row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the split expense this row belongs to
    pub expense_id: i64,
    /// Member id sharing the expense (may be dangling)
    pub member_id: i64,
}

/// Defines relationships between ExpenseParticipant and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each participant row belongs to one split expense
    #[sea_orm(
        belongs_to = "super::split_expense::Entity",
        from = "Column::ExpenseId",
        to = "super::split_expense::Column::Id"
    )]
    Expense,
}

impl Related<super::split_expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expense.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
