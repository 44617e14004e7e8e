//! Trip model and trip planning.
//!
//! A trip carries its per-category budget allocations directly. The total budget
//! is never stored on the model; it is always the sum of the allocations.

use crate::{
    core::category::CategoryType,
    errors::{Error, Result, ValidationError},
    store::TripStore,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use tracing::info;

/// Identifier assigned to a trip by its store.
pub type TripId = i64;

/// Lifecycle state of a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TripStatus {
    /// Planned, not started
    #[default]
    #[serde(rename = "pendiente")]
    Pending,
    /// Currently travelling
    #[serde(rename = "en-progreso")]
    InProgress,
    /// Finished
    #[serde(rename = "completado")]
    Completed,
}

impl TripStatus {
    /// Stable id used in storage and serialization.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Pending => "pendiente",
            Self::InProgress => "en-progreso",
            Self::Completed => "completado",
        }
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for TripStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        [Self::Pending, Self::InProgress, Self::Completed]
            .into_iter()
            .find(|status| status.id() == s)
            .ok_or_else(|| Error::UnknownStatus { id: s.to_string() })
    }
}

/// Planned allocation for one category within a trip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetCategory {
    /// Category being budgeted
    pub category: CategoryType,
    /// Allocated amount, never negative
    pub amount: f64,
}

/// A planned travel period with its budget allocations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    /// Store-assigned identifier
    pub id: TripId,
    /// Trip name (e.g. "Viaje a San Andrés")
    pub name: String,
    /// First day of the trip
    pub start_date: NaiveDate,
    /// Last day of the trip, never before `start_date`
    pub end_date: NaiveDate,
    /// Allocations in insertion order, at most one per category
    pub categories: Vec<BudgetCategory>,
    /// Lifecycle state
    pub status: TripStatus,
    /// When the trip was created
    pub created_at: DateTime<Utc>,
}

impl Trip {
    /// Sum of all category allocations.
    #[must_use]
    pub fn total_budget(&self) -> f64 {
        self.categories.iter().map(|c| c.amount).sum()
    }

    /// Allocation for `category`, if one exists.
    #[must_use]
    pub fn allocation(&self, category: CategoryType) -> Option<&BudgetCategory> {
        self.categories.iter().find(|c| c.category == category)
    }

    /// Sets the allocation for `category`, replacing an existing amount in place
    /// or appending a new entry.
    pub fn allocate(&mut self, category: CategoryType, amount: f64) {
        upsert_allocation(&mut self.categories, category, amount);
    }
}

/// Data for a trip that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTrip {
    /// Trip name
    pub name: String,
    /// First day of the trip
    pub start_date: NaiveDate,
    /// Last day of the trip
    pub end_date: NaiveDate,
    /// Initial allocations, usually empty
    pub categories: Vec<BudgetCategory>,
    /// Initial status, usually pending
    pub status: TripStatus,
}

impl NewTrip {
    /// A pending trip with no allocations.
    #[must_use]
    pub fn new(name: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            start_date,
            end_date,
            categories: Vec::new(),
            status: TripStatus::Pending,
        }
    }
}

/// Partial update merged shallowly into an existing trip. `None` fields are left as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripUpdate {
    /// New name
    pub name: Option<String>,
    /// New start date
    pub start_date: Option<NaiveDate>,
    /// New end date
    pub end_date: Option<NaiveDate>,
    /// Replacement allocation set
    pub categories: Option<Vec<BudgetCategory>>,
    /// New status
    pub status: Option<TripStatus>,
}

impl TripUpdate {
    /// Update that only replaces the allocations.
    #[must_use]
    pub fn categories(categories: Vec<BudgetCategory>) -> Self {
        Self {
            categories: Some(categories),
            ..Self::default()
        }
    }

    /// Applies this update to `trip` in memory.
    pub fn apply_to(self, trip: &mut Trip) {
        if let Some(name) = self.name {
            trip.name = name;
        }
        if let Some(start_date) = self.start_date {
            trip.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            trip.end_date = end_date;
        }
        if let Some(categories) = self.categories {
            trip.categories = normalize_allocations(categories);
        }
        if let Some(status) = self.status {
            trip.status = status;
        }
    }
}

/// Inserts or replaces the allocation for `category`.
pub fn upsert_allocation(
    categories: &mut Vec<BudgetCategory>,
    category: CategoryType,
    amount: f64,
) {
    match categories.iter_mut().find(|c| c.category == category) {
        Some(existing) => existing.amount = amount,
        None => categories.push(BudgetCategory { category, amount }),
    }
}

/// Collapses duplicate categories: the first position is kept, the last amount wins.
#[must_use]
pub fn normalize_allocations(categories: Vec<BudgetCategory>) -> Vec<BudgetCategory> {
    let mut normalized = Vec::with_capacity(categories.len());
    for entry in categories {
        upsert_allocation(&mut normalized, entry.category, entry.amount);
    }
    normalized
}

/// Input from the "plan a trip" dialog before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripPlan {
    /// Trip name as typed
    pub name: String,
    /// Selected start of the date range
    pub start_date: Option<NaiveDate>,
    /// Selected end of the date range
    pub end_date: Option<NaiveDate>,
}

impl TripPlan {
    /// Checks the plan and turns it into a pending [`NewTrip`] with no allocations.
    pub fn validate(&self) -> std::result::Result<NewTrip, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let (Some(start), Some(end)) = (self.start_date, self.end_date) else {
            return Err(ValidationError::MissingDates);
        };

        if end < start {
            return Err(ValidationError::InvalidDateRange { start, end });
        }

        Ok(NewTrip::new(name, start, end))
    }
}

/// Validates `plan` and stores the resulting trip.
///
/// Nothing is written when validation fails. A storage failure is returned as is
/// so the caller can stay on the planning screen.
pub async fn plan_trip<S: TripStore>(store: &mut S, plan: &TripPlan) -> Result<Trip> {
    let new_trip = plan.validate()?;
    let trip = store.add_trip(new_trip).await?;
    info!(trip_id = trip.id, name = %trip.name, "Trip planned");
    Ok(trip)
}

/// Trips still in the planning stage, in the given order.
#[must_use]
pub fn upcoming_trips(trips: &[Trip]) -> Vec<&Trip> {
    trips
        .iter()
        .filter(|trip| trip.status == TripStatus::Pending)
        .collect()
}
