//! Wishlist business logic - Items the user intends to buy.
//!
//! Provides CRUD operations, a purchased toggle, filtered and sorted listings,
//! and value summaries. Priority ordering is not hardcoded: it comes from the
//! catalog so the priority ladder can be reconfigured without a migration.

use crate::{
    config::catalog::Catalog,
    entities::{WishlistItem, wishlist_item},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Which wishlist items a listing includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WishlistFilter {
    /// Every item
    #[default]
    All,
    /// Items not yet purchased
    Pending,
    /// Items already purchased
    Purchased,
}

/// How a wishlist listing is ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WishlistSort {
    /// Newest first
    #[default]
    DateAdded,
    /// Cheapest first
    PriceLowToHigh,
    /// Most expensive first
    PriceHighToLow,
    /// Catalog priority rank, most urgent first
    Priority,
}

/// Creates a new wishlist item, performing input validation.
///
/// The title must be non-empty after trimming and the price must be finite.
/// `date_added` is stamped with the current time.
#[allow(clippy::too_many_arguments)]
pub async fn create_wishlist_item(
    db: &DatabaseConnection,
    title: String,
    price: f64,
    category: String,
    priority: String,
    notes: String,
    image_url: String,
    target_date: Option<DateTimeUtc>,
) -> Result<wishlist_item::Model> {
    if title.trim().is_empty() {
        return Err(Error::Config {
            message: "Wishlist item title cannot be empty".to_string(),
        });
    }

    if !price.is_finite() {
        return Err(Error::InvalidAmount { amount: price });
    }

    let item = wishlist_item::ActiveModel {
        title: Set(title.trim().to_string()),
        price: Set(price),
        image_url: Set(image_url),
        notes: Set(notes),
        priority: Set(priority),
        is_purchased: Set(false),
        date_added: Set(chrono::Utc::now()),
        target_date: Set(target_date),
        category: Set(category),
        ..Default::default()
    };

    let result = item.insert(db).await?;
    Ok(result)
}

/// Finds a wishlist item by its unique ID, returning None if it does not exist.
pub async fn get_wishlist_item_by_id(
    db: &DatabaseConnection,
    item_id: i64,
) -> Result<Option<wishlist_item::Model>> {
    WishlistItem::find_by_id(item_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists wishlist items with the given filter and sort applied.
///
/// Date and price orderings happen in SQL. Priority ordering needs the
/// catalog's rank table, so those listings are fetched newest-first and then
/// stably re-sorted in memory; ties keep their date order.
pub async fn list_wishlist_items(
    db: &DatabaseConnection,
    filter: WishlistFilter,
    sort: WishlistSort,
    catalog: &Catalog,
) -> Result<Vec<wishlist_item::Model>> {
    let query = WishlistItem::find();
    let query = match filter {
        WishlistFilter::All => query,
        WishlistFilter::Pending => query.filter(wishlist_item::Column::IsPurchased.eq(false)),
        WishlistFilter::Purchased => query.filter(wishlist_item::Column::IsPurchased.eq(true)),
    };

    let items = match sort {
        WishlistSort::DateAdded => {
            query
                .order_by_desc(wishlist_item::Column::DateAdded)
                .all(db)
                .await?
        }
        WishlistSort::PriceLowToHigh => {
            query
                .order_by_asc(wishlist_item::Column::Price)
                .all(db)
                .await?
        }
        WishlistSort::PriceHighToLow => {
            query
                .order_by_desc(wishlist_item::Column::Price)
                .all(db)
                .await?
        }
        WishlistSort::Priority => {
            let mut items = query
                .order_by_desc(wishlist_item::Column::DateAdded)
                .all(db)
                .await?;
            items.sort_by_key(|item| catalog.priority_rank(&item.priority));
            items
        }
    };

    Ok(items)
}

/// Flips the purchased flag of a wishlist item and returns the updated model.
///
/// Returns `WishlistItemNotFound` if the id does not exist.
pub async fn toggle_purchased(
    db: &DatabaseConnection,
    item_id: i64,
) -> Result<wishlist_item::Model> {
    let existing = WishlistItem::find_by_id(item_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::WishlistItemNotFound {
            name: item_id.to_string(),
        })?;

    let was_purchased = existing.is_purchased;
    let mut model: wishlist_item::ActiveModel = existing.into();
    model.is_purchased = Set(!was_purchased);

    model.update(db).await.map_err(Into::into)
}

/// Updates every editable field of an existing wishlist item.
///
/// The purchased flag and `date_added` are not touched here; use
/// [`toggle_purchased`] for the former.
#[allow(clippy::too_many_arguments)]
pub async fn update_wishlist_item(
    db: &DatabaseConnection,
    item_id: i64,
    title: String,
    price: f64,
    category: String,
    priority: String,
    notes: String,
    image_url: String,
    target_date: Option<DateTimeUtc>,
) -> Result<wishlist_item::Model> {
    if title.trim().is_empty() {
        return Err(Error::Config {
            message: "Wishlist item title cannot be empty".to_string(),
        });
    }

    if !price.is_finite() {
        return Err(Error::InvalidAmount { amount: price });
    }

    let existing = WishlistItem::find_by_id(item_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::WishlistItemNotFound {
            name: item_id.to_string(),
        })?;

    let mut model: wishlist_item::ActiveModel = existing.into();
    model.title = Set(title.trim().to_string());
    model.price = Set(price);
    model.category = Set(category);
    model.priority = Set(priority);
    model.notes = Set(notes);
    model.image_url = Set(image_url);
    model.target_date = Set(target_date);

    model.update(db).await.map_err(Into::into)
}

/// Deletes a wishlist item permanently.
///
/// Returns `WishlistItemNotFound` if the id does not exist.
pub async fn delete_wishlist_item(db: &DatabaseConnection, item_id: i64) -> Result<()> {
    let existing = WishlistItem::find_by_id(item_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::WishlistItemNotFound {
            name: item_id.to_string(),
        })?;

    existing.delete(db).await?;
    Ok(())
}

/// Total price of items not yet purchased.
#[must_use]
pub fn pending_total(items: &[wishlist_item::Model]) -> f64 {
    items
        .iter()
        .filter(|item| !item.is_purchased)
        .map(|item| item.price)
        .sum()
}

/// Total price of items already purchased.
#[must_use]
pub fn purchased_total(items: &[wishlist_item::Model]) -> f64 {
    items
        .iter()
        .filter(|item| item.is_purchased)
        .map(|item| item.price)
        .sum()
}
