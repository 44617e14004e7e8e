//! Budget allocation editor.
//!
//! Each of the seven categories is either unallocated or has exactly one
//! allocation on the trip. Submitting an amount for a category upserts that one
//! allocation and writes the whole allocation set back through the store; the
//! total budget is always the live sum.

use crate::{
    core::{
        category::CategoryType,
        trip::{Trip, TripId, TripUpdate},
    },
    errors::{Error, Result, ValidationError},
    store::TripStore,
};
use tracing::{debug, info};

/// Editor over the allocations of one trip.
pub struct BudgetEditor<'a, S: TripStore> {
    store: &'a mut S,
    trip: Trip,
}

impl<'a, S: TripStore> BudgetEditor<'a, S> {
    /// Opens the editor for `trip_id`.
    pub async fn open(store: &'a mut S, trip_id: TripId) -> Result<Self> {
        let trip = store
            .get_trip(trip_id)
            .await?
            .ok_or(Error::TripNotFound { id: trip_id })?;
        Ok(Self { store, trip })
    }

    /// Opens the editor for the most recently created trip, if any.
    pub async fn for_current_trip(store: &'a mut S) -> Result<Option<Self>> {
        let Some(trip) = store.current_trip().await? else {
            return Ok(None);
        };
        Ok(Some(Self { store, trip }))
    }

    /// The trip as last written.
    #[must_use]
    pub const fn trip(&self) -> &Trip {
        &self.trip
    }

    /// Allocated amount for `category`, 0 when unallocated.
    #[must_use]
    pub fn allocated_amount(&self, category: CategoryType) -> f64 {
        self.trip.allocation(category).map_or(0.0, |a| a.amount)
    }

    /// Amount to pre-fill when the category dialog opens.
    #[must_use]
    pub fn prefill(&self, category: CategoryType) -> Option<f64> {
        self.trip.allocation(category).map(|a| a.amount)
    }

    /// Sum of all allocations.
    #[must_use]
    pub fn total_budget(&self) -> f64 {
        self.trip.total_budget()
    }

    /// Whether the budget can be confirmed.
    #[must_use]
    pub fn can_confirm(&self) -> bool {
        self.total_budget() > 0.0
    }

    /// Sets the allocation for `category` from raw user input.
    ///
    /// Currency symbols and thousand separators are ignored ("$1.200.000" is
    /// 1 200 000). The amount must be positive. Other categories are left as they
    /// are.
    pub async fn submit(&mut self, category: CategoryType, raw_amount: &str) -> Result<&Trip> {
        let amount = parse_budget_amount(raw_amount)?;

        let mut categories = self.trip.categories.clone();
        crate::core::trip::upsert_allocation(&mut categories, category, amount);

        self.trip = self
            .store
            .update_trip(self.trip.id, TripUpdate::categories(categories))
            .await?
            .ok_or(Error::TripNotFound { id: self.trip.id })?;

        debug!(trip_id = self.trip.id, %category, amount, "Allocation saved");
        Ok(&self.trip)
    }

    /// Confirms the budget and returns its total.
    ///
    /// The allocation set is written once more so a persisted total matches the
    /// live sum at confirmation time.
    pub async fn confirm(&mut self) -> Result<f64> {
        if !self.can_confirm() {
            return Err(ValidationError::EmptyBudget.into());
        }

        self.trip = self
            .store
            .update_trip(
                self.trip.id,
                TripUpdate::categories(self.trip.categories.clone()),
            )
            .await?
            .ok_or(Error::TripNotFound { id: self.trip.id })?;

        let total = self.total_budget();
        info!(trip_id = self.trip.id, total, "Budget confirmed");
        Ok(total)
    }
}

/// Parses an allocation amount, keeping only its digits and decimal point.
///
/// Currency symbols, spaces and signs are dropped. More than one `.` is
/// ambiguous (`"1.200.000"`) and is rejected rather than guessed at.
pub fn parse_budget_amount(raw: &str) -> std::result::Result<f64, ValidationError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let invalid = || ValidationError::InvalidAmount {
        input: raw.to_string(),
    };

    let amount: f64 = cleaned.parse().map_err(|_| invalid())?;
    if amount > 0.0 && amount.is_finite() {
        Ok(amount)
    } else {
        Err(invalid())
    }
}
