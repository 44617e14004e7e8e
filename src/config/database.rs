//! Database configuration for the relational trip store.
//!
//! This module handles `SQLite` connection and table creation using `SeaORM`. Table
//! definitions are generated from the entity models with
//! `Schema::create_table_from_entity`, so the schema always matches the structs.

use crate::entities::{BudgetCategoryEntity, MovementEntity, TripEntity};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::info;

/// Default `SQLite` location, created on first use.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://trip_budget.sqlite?mode=rwc";

/// Resolves the database URL.
///
/// `DATABASE_URL` from the environment wins, then the URL from config.toml, then
/// [`DEFAULT_DATABASE_URL`].
#[must_use]
pub fn get_database_url(configured: Option<&str>) -> String {
    std::env::var("DATABASE_URL")
        .ok()
        .or_else(|| configured.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
}

/// Connects to `database_url` and makes sure all tables exist.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    let db = Database::connect(database_url).await?;
    create_tables(&db).await?;
    info!("Connected to database");
    Ok(db)
}

/// Creates the `trips`, `budget_categories` and `movements` tables if they are missing.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    // Parents before children for the foreign keys.
    let mut trip_table = schema.create_table_from_entity(TripEntity);
    let mut budget_category_table = schema.create_table_from_entity(BudgetCategoryEntity);
    let mut movement_table = schema.create_table_from_entity(MovementEntity);

    trip_table.if_not_exists();
    budget_category_table.if_not_exists();
    movement_table.if_not_exists();

    db.execute(builder.build(&trip_table)).await?;
    db.execute(builder.build(&budget_category_table)).await?;
    db.execute(builder.build(&movement_table)).await?;

    Ok(())
}
