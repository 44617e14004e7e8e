//! Movement model - single recorded expenses against a trip.

use crate::core::{category::CategoryType, trip::TripId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned to a movement by its store.
pub type MovementId = i64;

/// A recorded expense. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    /// Store-assigned identifier
    pub id: MovementId,
    /// Trip the expense belongs to
    pub trip_id: TripId,
    /// Spending category
    pub category: CategoryType,
    /// What the money was spent on
    pub name: String,
    /// Amount spent, always positive
    pub amount: f64,
    /// When the expense happened
    pub date: DateTime<Utc>,
}

/// Data for a movement that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMovement {
    /// Trip the expense belongs to
    pub trip_id: TripId,
    /// Spending category
    pub category: CategoryType,
    /// What the money was spent on
    pub name: String,
    /// Amount spent
    pub amount: f64,
    /// When the expense happened
    pub date: DateTime<Utc>,
}

/// Ledger filter. `None` means "all".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementFilter {
    /// Only movements of this trip
    pub trip_id: Option<TripId>,
    /// Only movements in this category
    pub category: Option<CategoryType>,
}

impl MovementFilter {
    /// Every movement of one trip.
    #[must_use]
    pub const fn for_trip(trip_id: TripId) -> Self {
        Self {
            trip_id: Some(trip_id),
            category: None,
        }
    }

    /// Restricts the filter to one category.
    #[must_use]
    pub fn with_category(mut self, category: CategoryType) -> Self {
        self.category = Some(category);
        self
    }

    /// Whether `movement` passes the filter.
    #[must_use]
    pub fn matches(&self, movement: &Movement) -> bool {
        self.trip_id.is_none_or(|id| movement.trip_id == id)
            && self.category.is_none_or(|c| movement.category == c)
    }
}
