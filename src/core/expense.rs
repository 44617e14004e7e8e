//! Expense registration.
//!
//! Validates the expense form in a fixed order and, when every check passes,
//! appends a movement dated at submission time. A failed check never touches
//! the store.

use crate::{
    core::{
        category::CategoryType,
        movement::{Movement, NewMovement},
        trip::TripId,
    },
    errors::{Result, ValidationError},
    store::TripStore,
};
use chrono::{DateTime, Utc};
use tracing::info;

/// State of the expense form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseForm {
    /// What the money was spent on
    pub name: String,
    /// Selected category
    pub category: Option<CategoryType>,
    /// Amount as typed
    pub amount: String,
    /// Selected trip
    pub trip_id: Option<TripId>,
    bound_trip: Option<TripId>,
}

impl ExpenseForm {
    /// A blank form where the user picks the trip.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A blank form pre-bound to `trip_id`. The binding survives resets.
    #[must_use]
    pub fn for_trip(trip_id: TripId) -> Self {
        Self {
            trip_id: Some(trip_id),
            bound_trip: Some(trip_id),
            ..Self::default()
        }
    }

    /// Checks, in order, name, category, amount and trip.
    pub fn validate(&self) -> std::result::Result<NewMovement, ValidationError> {
        self.validate_at(Utc::now())
    }

    fn validate_at(&self, now: DateTime<Utc>) -> std::result::Result<NewMovement, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let category = self.category.ok_or(ValidationError::MissingCategory)?;
        let amount = parse_expense_amount(&self.amount)?;
        let trip_id = self.trip_id.ok_or(ValidationError::MissingTrip)?;

        Ok(NewMovement {
            trip_id,
            category,
            name: name.to_string(),
            amount,
            date: now,
        })
    }

    /// Clears everything except a pre-bound trip.
    pub fn reset(&mut self) {
        *self = Self {
            trip_id: self.bound_trip,
            bound_trip: self.bound_trip,
            ..Self::default()
        };
    }

    /// Validates the form, stores the movement dated now and resets the form.
    ///
    /// On a validation or storage error the form keeps its input.
    pub async fn register<S: TripStore>(&mut self, store: &mut S) -> Result<Movement> {
        self.register_at(store, Utc::now()).await
    }

    /// [`register`](Self::register) with an explicit timestamp.
    pub async fn register_at<S: TripStore>(
        &mut self,
        store: &mut S,
        now: DateTime<Utc>,
    ) -> Result<Movement> {
        let new_movement = self.validate_at(now)?;
        let movement = store.add_movement(new_movement).await?;
        info!(
            movement_id = movement.id,
            trip_id = movement.trip_id,
            category = %movement.category,
            amount = movement.amount,
            "Expense registered"
        );
        self.reset();
        Ok(movement)
    }
}

/// Parses an expense amount; it must be a finite number greater than zero.
pub fn parse_expense_amount(raw: &str) -> std::result::Result<f64, ValidationError> {
    match raw.trim().parse::<f64>() {
        Ok(amount) if amount > 0.0 && amount.is_finite() => Ok(amount),
        _ => Err(ValidationError::InvalidAmount {
            input: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::{
        errors::Error,
        store::memory::MemoryTripStore,
        test_utils::{base_time, new_trip, setup_database_store},
    };

    fn filled(trip_id: Option<TripId>) -> ExpenseForm {
        ExpenseForm {
            name: "  Hospedaje Johnny Cay ".to_string(),
            category: Some(CategoryType::Lodging),
            amount: "300000".to_string(),
            trip_id,
            ..ExpenseForm::default()
        }
    }

    #[test]
    fn test_validation_order() {
        let mut form = ExpenseForm {
            name: " ".to_string(),
            category: None,
            amount: "-5".to_string(),
            trip_id: None,
            ..ExpenseForm::default()
        };
        assert_eq!(form.validate(), Err(ValidationError::EmptyName));

        form.name = "Taxi".to_string();
        assert_eq!(form.validate(), Err(ValidationError::MissingCategory));

        form.category = Some(CategoryType::Transport);
        assert_eq!(
            form.validate(),
            Err(ValidationError::InvalidAmount { input: "-5".to_string() })
        );

        form.amount = "25000".to_string();
        assert_eq!(form.validate(), Err(ValidationError::MissingTrip));

        form.trip_id = Some(3);
        let movement = form.validate().unwrap();
        assert_eq!(movement.name, "Taxi");
        assert_eq!(movement.amount, 25_000.0);
        assert_eq!(movement.trip_id, 3);
    }

    #[test]
    fn test_parse_expense_amount() {
        assert_eq!(parse_expense_amount("12.5").unwrap(), 12.5);
        assert_eq!(parse_expense_amount(" 300000 ").unwrap(), 300_000.0);
        for bad in ["", "0", "-5", "abc", "NaN", "inf", "1e400"] {
            assert!(parse_expense_amount(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[tokio::test]
    async fn test_negative_amount_creates_no_movement() -> Result<()> {
        let mut store = MemoryTripStore::new();
        let trip = store.add_trip(new_trip("San Andrés")).await?;

        let mut form = filled(Some(trip.id));
        form.amount = "-5".to_string();

        let result = form.register(&mut store).await;
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::InvalidAmount { .. }))
        ));
        assert!(store.movements().is_empty());
        // Input is kept so the user can correct it.
        assert_eq!(form.amount, "-5");
        Ok(())
    }

    #[tokio::test]
    async fn test_register_appends_and_resets() -> Result<()> {
        let mut store = MemoryTripStore::new();
        let trip = store.add_trip(new_trip("San Andrés")).await?;

        let mut form = filled(Some(trip.id));
        let movement = form.register_at(&mut store, base_time()).await?;

        assert_eq!(movement.name, "Hospedaje Johnny Cay");
        assert_eq!(movement.category, CategoryType::Lodging);
        assert_eq!(movement.amount, 300_000.0);
        assert_eq!(movement.date, base_time());
        assert_eq!(store.movements(), [movement]);

        assert_eq!(form, ExpenseForm::new());
        Ok(())
    }

    #[tokio::test]
    async fn test_bound_trip_survives_reset() -> Result<()> {
        let mut store = setup_database_store().await?;
        let trip = store.add_trip(new_trip("Cartagena")).await?;

        let mut form = ExpenseForm::for_trip(trip.id);
        form.name = "Almuerzo".to_string();
        form.category = Some(CategoryType::Food);
        form.amount = "45000".to_string();

        form.register(&mut store).await?;

        assert_eq!(form.trip_id, Some(trip.id));
        assert!(form.name.is_empty());
        assert!(form.category.is_none());
        assert!(form.amount.is_empty());
        Ok(())
    }
}
