//! Shared test utilities.
//!
//! This module provides helpers for setting up test stores and building trips
//! and movements with sensible defaults.

use crate::{
    core::{
        category::CategoryType,
        movement::{Movement, MovementId, NewMovement},
        trip::{NewTrip, Trip, TripId, TripStatus},
    },
    errors::Result,
    store::DatabaseTripStore,
};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A [`DatabaseTripStore`] over a fresh in-memory database.
pub async fn setup_database_store() -> Result<DatabaseTripStore> {
    Ok(DatabaseTripStore::new(setup_test_db().await?))
}

/// Shorthand for a calendar date.
///
/// # Panics
/// Panics on an invalid date; only meant for literals in tests.
#[allow(clippy::expect_used)]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Fixed timestamp all test movements are dated from.
///
/// # Panics
/// Never in practice; the literal is a valid timestamp.
#[allow(clippy::expect_used)]
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 10, 12, 0, 0)
        .single()
        .expect("valid test timestamp")
}

/// A pending trip from 10 to 17 October 2025 with no allocations.
pub fn new_trip(name: &str) -> NewTrip {
    NewTrip::new(name, date(2025, 10, 10), date(2025, 10, 17))
}

/// A stored-looking trip with the given id and no allocations.
pub fn sample_trip(id: TripId) -> Trip {
    Trip {
        id,
        name: format!("Trip {id}"),
        start_date: date(2025, 10, 10),
        end_date: date(2025, 10, 17),
        categories: Vec::new(),
        status: TripStatus::Pending,
        created_at: base_time(),
    }
}

/// A stored-looking movement dated [`base_time`].
pub fn movement(id: MovementId, trip_id: TripId, category: CategoryType, amount: f64) -> Movement {
    Movement {
        id,
        trip_id,
        category,
        name: format!("Movement {id}"),
        amount,
        date: base_time(),
    }
}

/// A new movement dated `offset_secs` after [`base_time`].
pub fn new_movement_at(
    trip_id: TripId,
    category: CategoryType,
    amount: f64,
    offset_secs: i64,
) -> NewMovement {
    NewMovement {
        trip_id,
        category,
        name: format!("{} expense", category.display_name()),
        amount,
        date: base_time() + Duration::seconds(offset_secs),
    }
}
