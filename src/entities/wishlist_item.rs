//! Wishlist item entity - Represents something the user intends to buy.
//!
//! Items carry a price, a priority ("High"/"Medium"/"Low" by convention),
//! an optional target date, and a purchased flag that strikes the item
//! through without deleting it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Wishlist item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wishlist_items")]
pub struct Model {
    /// Unique identifier for the item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name of the desired item
    pub title: String,
    /// Expected price
    pub price: f64,
    /// Optional image URL, empty string when unset
    pub image_url: String,
    /// Free-form notes, may be empty
    pub notes: String,
    /// Priority label: `"High"`, `"Medium"`, or `"Low"`; unknown labels sort last
    pub priority: String,
    /// Whether the item has been bought
    pub is_purchased: bool,
    /// When the item was added to the wishlist
    pub date_added: DateTimeUtc,
    /// Optional target purchase date
    pub target_date: Option<DateTimeUtc>,
    /// Category name (e.g., "Electronics", "Books")
    pub category: String,
}

/// Wishlist items have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
