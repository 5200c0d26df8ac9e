//! Database configuration module for `PocketLedger`.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! It provides functions for establishing database connections and creating all necessary tables
//! based on the entity definitions. The module uses `SeaORM`'s `Schema::create_table_from_entity`
//! method to automatically generate SQL statements from the entity models, ensuring that the
//! database schema matches the Rust struct definitions without requiring manual SQL.

use crate::entities::{
    Credit, Expense, ExpenseParticipant, RoomMember, SplitExpense, SplitRoom, WishlistItem,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back to
/// a default local `SQLite` file if not found.
pub fn get_database_url() -> Result<String> {
    Ok(std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://data/pocket_ledger.sqlite".to_string()))
}

/// Establishes a connection to the `SQLite` database using the `DATABASE_URL` environment variable.
///
/// Falls back to a default local `SQLite` file if no environment variable is set.
/// This function handles connection errors and provides a clean interface for database access
/// throughout the application.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url()?;

    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation from entity definitions.
///
/// This function uses the `DeriveEntityModel` macros to automatically generate proper SQL
/// statements for table creation, ensuring the database schema matches the Rust struct definitions.
/// Tables with foreign keys are created after the tables they reference: rooms before
/// members and split expenses, split expenses before participant rows.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let expense_table = schema.create_table_from_entity(Expense);
    let credit_table = schema.create_table_from_entity(Credit);
    let wishlist_item_table = schema.create_table_from_entity(WishlistItem);
    let split_room_table = schema.create_table_from_entity(SplitRoom);
    let room_member_table = schema.create_table_from_entity(RoomMember);
    let split_expense_table = schema.create_table_from_entity(SplitExpense);
    let expense_participant_table = schema.create_table_from_entity(ExpenseParticipant);

    db.execute(builder.build(&expense_table)).await?;
    db.execute(builder.build(&credit_table)).await?;
    db.execute(builder.build(&wishlist_item_table)).await?;
    db.execute(builder.build(&split_room_table)).await?;
    db.execute(builder.build(&room_member_table)).await?;
    db.execute(builder.build(&split_expense_table)).await?;
    db.execute(builder.build(&expense_participant_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        credit::Model as CreditModel, expense::Model as ExpenseModel,
        expense_participant::Model as ExpenseParticipantModel,
        room_member::Model as RoomMemberModel, split_expense::Model as SplitExpenseModel,
        split_room::Model as SplitRoomModel, wishlist_item::Model as WishlistItemModel,
    };
    use sea_orm::{EntityTrait, QuerySelect};

    /// Tests the database connection by executing a simple query
    async fn test_connection(db: &DatabaseConnection) -> Result<()> {
        // Test the connection with a simple query
        let _: Vec<ExpenseModel> = Expense::find().limit(1).all(db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_connection() -> Result<()> {
        // Use in-memory database for testing to avoid schema conflicts with existing database
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that we can execute a query to verify the connection is working
        let _: Vec<ExpenseModel> = Expense::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<ExpenseModel> = Expense::find().limit(1).all(&db).await?;
        let _: Vec<CreditModel> = Credit::find().limit(1).all(&db).await?;
        let _: Vec<WishlistItemModel> = WishlistItem::find().limit(1).all(&db).await?;
        let _: Vec<SplitRoomModel> = SplitRoom::find().limit(1).all(&db).await?;
        let _: Vec<RoomMemberModel> = RoomMember::find().limit(1).all(&db).await?;
        let _: Vec<SplitExpenseModel> = SplitExpense::find().limit(1).all(&db).await?;
        let _: Vec<ExpenseParticipantModel> =
            ExpenseParticipant::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_connection_test() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        test_connection(&db).await?;
        Ok(())
    }
}
