//! Trip storage.
//!
//! [`TripStore`] is the single interface the workflows depend on. Two
//! implementations exist: [`memory::MemoryTripStore`] keeps everything for the
//! lifetime of the value, [`database::DatabaseTripStore`] persists to the
//! relational `trips` / `budget_categories` / `movements` tables.

/// SeaORM-backed store
pub mod database;
/// Volatile in-process store
pub mod memory;

use crate::{
    core::{
        movement::{Movement, MovementFilter, NewMovement},
        trip::{NewTrip, Trip, TripId, TripUpdate},
    },
    errors::Result,
};

pub use database::DatabaseTripStore;
pub use memory::MemoryTripStore;

/// Authoritative collection of trips and movements.
///
/// Writes take `&mut self`; the store is owned by whoever composes the
/// application and passed down by reference.
#[allow(async_fn_in_trait)]
pub trait TripStore {
    /// Stores a new trip and returns it with its assigned id.
    async fn add_trip(&mut self, trip: NewTrip) -> Result<Trip>;

    /// Merges `update` into the trip with `id`.
    ///
    /// A provided category list replaces the allocations, and the trip keeps
    /// them in the order given.
    ///
    /// The in-memory store treats an unknown id as a no-op and returns `Ok(None)`.
    /// The database store returns [`Error::TripNotFound`](crate::errors::Error::TripNotFound).
    async fn update_trip(&mut self, id: TripId, update: TripUpdate) -> Result<Option<Trip>>;

    /// Appends a movement. The trip and category are not cross-checked.
    async fn add_movement(&mut self, movement: NewMovement) -> Result<Movement>;

    /// Looks up a trip by id.
    async fn get_trip(&self, id: TripId) -> Result<Option<Trip>>;

    /// All trips in creation order.
    async fn list_trips(&self) -> Result<Vec<Trip>>;

    /// Movements passing `filter`, newest first.
    async fn list_movements(&self, filter: MovementFilter) -> Result<Vec<Movement>>;

    /// The most recently created trip.
    async fn current_trip(&self) -> Result<Option<Trip>> {
        Ok(self.list_trips().await?.pop())
    }
}

/// Newest first: date descending, later ids first on ties.
pub(crate) fn sort_newest_first(movements: &mut [Movement]) {
    movements.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        core::{category::CategoryType, trip::BudgetCategory},
        test_utils::{new_trip, setup_database_store},
    };

    fn allocation(category: CategoryType, amount: f64) -> BudgetCategory {
        BudgetCategory { category, amount }
    }

    fn order(trip: &Trip) -> Vec<CategoryType> {
        trip.categories.iter().map(|c| c.category).collect()
    }

    async fn reorder_allocations<S: TripStore>(store: &mut S) -> Result<()> {
        let trip = store.add_trip(new_trip("Medellín")).await?;
        store
            .update_trip(
                trip.id,
                TripUpdate::categories(vec![
                    allocation(CategoryType::Food, 200.0),
                    allocation(CategoryType::Transport, 100.0),
                ]),
            )
            .await?;

        let updated = store
            .update_trip(
                trip.id,
                TripUpdate::categories(vec![
                    allocation(CategoryType::Transport, 100.0),
                    allocation(CategoryType::Food, 200.0),
                ]),
            )
            .await?
            .unwrap();
        let expected = vec![CategoryType::Transport, CategoryType::Food];
        assert_eq!(order(&updated), expected);

        let stored = store.get_trip(trip.id).await?.unwrap();
        assert_eq!(order(&stored), expected);
        let listed = store.current_trip().await?.unwrap();
        assert_eq!(order(&listed), expected);
        Ok(())
    }

    #[tokio::test]
    async fn test_reorder_allocations_memory_store() -> Result<()> {
        reorder_allocations(&mut MemoryTripStore::new()).await
    }

    #[tokio::test]
    async fn test_reorder_allocations_database_store() -> Result<()> {
        reorder_allocations(&mut setup_database_store().await?).await
    }
}
