#![allow(clippy::result_large_err)]

use dotenvy::dotenv;
use pocket_ledger::{
    config::{catalog, database},
    core::{ledger, room},
    errors::Result,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the presentation catalog; a missing config.toml is not fatal
    let catalog = catalog::load_default_config().unwrap_or_else(|e| {
        warn!("Could not load config.toml ({}), using built-in catalog", e);
        catalog::Catalog::default()
    });
    info!(
        "Catalog ready: {} categories, {} sources, {} priorities.",
        catalog.categories.len(),
        catalog.sources.len(),
        catalog.priorities.len()
    );

    // 4. Initialize database
    let db = database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;

    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database tables created successfully."))
        .inspect_err(|e| error!("Failed to create database tables: {}", e))?;

    // 5. Log a startup summary of the stored data
    let snapshot = ledger::Ledger::load(&db).await?;
    let rooms = room::list_rooms(&db).await?;
    info!(
        "PocketLedger ready: {} expenses, {} credits, net balance {}, {} split rooms.",
        snapshot.expenses.len(),
        snapshot.credits.len(),
        ledger::format_signed_amount(snapshot.net_balance()),
        rooms.len()
    );

    Ok(())
}
