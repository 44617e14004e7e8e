//! Budget report generation.
//!
//! This module loads a trip and its movements through a [`TripStore`] and
//! aggregates them into a [`BudgetReport`]. The loads are independent reads with
//! no cross-call atomicity; a movement inserted between them may or may not be
//! counted.

use crate::{
    core::{
        aggregation::BudgetSummary,
        movement::{Movement, MovementFilter},
        trip::{Trip, TripId},
    },
    errors::{Error, Result},
    store::TripStore,
};

/// Default number of recent movements included in a report.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Aggregated view of one trip's budget.
#[derive(Debug, Clone)]
pub struct BudgetReport {
    /// The trip being reported on
    pub trip: Trip,
    /// Totals and per-category breakdown
    pub summary: BudgetSummary,
    /// Most recent movements of the trip, newest first
    pub recent_movements: Vec<Movement>,
}

/// Generates a report for `trip_id`.
///
/// # Arguments
/// * `store` - Trip store to read from
/// * `trip_id` - Trip to report on
/// * `recent_limit` - Maximum number of recent movements to include (default 10)
pub async fn trip_report<S: TripStore>(
    store: &S,
    trip_id: TripId,
    recent_limit: Option<usize>,
) -> Result<BudgetReport> {
    let trip = store
        .get_trip(trip_id)
        .await?
        .ok_or(Error::TripNotFound { id: trip_id })?;
    build_report(store, trip, recent_limit).await
}

/// Generates a report for the most recently created trip, `None` when there are no trips.
pub async fn current_trip_report<S: TripStore>(
    store: &S,
    recent_limit: Option<usize>,
) -> Result<Option<BudgetReport>> {
    match store.current_trip().await? {
        Some(trip) => build_report(store, trip, recent_limit).await.map(Some),
        None => Ok(None),
    }
}

async fn build_report<S: TripStore>(
    store: &S,
    trip: Trip,
    recent_limit: Option<usize>,
) -> Result<BudgetReport> {
    let movements = store
        .list_movements(MovementFilter::for_trip(trip.id))
        .await?;
    let summary = BudgetSummary::compute(&trip, &movements);
    let recent_movements = movements
        .into_iter()
        .take(recent_limit.unwrap_or(DEFAULT_RECENT_LIMIT))
        .collect();

    Ok(BudgetReport {
        trip,
        summary,
        recent_movements,
    })
}

/// Generates a progress bar string for visual representation.
///
/// Creates a text-based progress bar like: `[████████░░] 80%`. The bar is clamped to
/// `0..=100`; the printed number is not.
#[must_use]
pub fn format_progress_bar(percent: i64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped = usize::try_from(percent.clamp(0, 100)).unwrap_or(0);

    let filled = (clamped * length + 50) / 100;
    let empty = length.saturating_sub(filled);

    format!("[{}{}] {percent}%", "█".repeat(filled), "░".repeat(empty))
}
