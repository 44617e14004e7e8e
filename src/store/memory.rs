//! In-memory trip store.
//!
//! Holds trips and movements for as long as the store value lives. Ids are
//! assigned from per-collection counters starting at 1.

use crate::{
    core::{
        movement::{Movement, MovementFilter, MovementId, NewMovement},
        trip::{NewTrip, Trip, TripId, TripUpdate, normalize_allocations},
    },
    errors::Result,
    store::{TripStore, sort_newest_first},
};
use chrono::Utc;
use tracing::{debug, warn};

/// Volatile store for a single session.
#[derive(Debug, Default, Clone)]
pub struct MemoryTripStore {
    trips: Vec<Trip>,
    movements: Vec<Movement>,
    last_trip_id: TripId,
    last_movement_id: MovementId,
}

impl MemoryTripStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored movement in insertion order.
    #[must_use]
    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }
}

impl TripStore for MemoryTripStore {
    async fn add_trip(&mut self, trip: NewTrip) -> Result<Trip> {
        self.last_trip_id += 1;
        let trip = Trip {
            id: self.last_trip_id,
            name: trip.name,
            start_date: trip.start_date,
            end_date: trip.end_date,
            categories: normalize_allocations(trip.categories),
            status: trip.status,
            created_at: Utc::now(),
        };
        debug!(trip_id = trip.id, "Added trip to memory store");
        self.trips.push(trip.clone());
        Ok(trip)
    }

    async fn update_trip(&mut self, id: TripId, update: TripUpdate) -> Result<Option<Trip>> {
        let Some(trip) = self.trips.iter_mut().find(|trip| trip.id == id) else {
            warn!(trip_id = id, "Update for unknown trip ignored");
            return Ok(None);
        };
        update.apply_to(trip);
        debug!(trip_id = id, "Updated trip in memory store");
        Ok(Some(trip.clone()))
    }

    async fn add_movement(&mut self, movement: NewMovement) -> Result<Movement> {
        self.last_movement_id += 1;
        let movement = Movement {
            id: self.last_movement_id,
            trip_id: movement.trip_id,
            category: movement.category,
            name: movement.name,
            amount: movement.amount,
            date: movement.date,
        };
        debug!(
            movement_id = movement.id,
            trip_id = movement.trip_id,
            "Added movement to memory store"
        );
        self.movements.push(movement.clone());
        Ok(movement)
    }

    async fn get_trip(&self, id: TripId) -> Result<Option<Trip>> {
        Ok(self.trips.iter().find(|trip| trip.id == id).cloned())
    }

    async fn list_trips(&self) -> Result<Vec<Trip>> {
        Ok(self.trips.clone())
    }

    async fn list_movements(&self, filter: MovementFilter) -> Result<Vec<Movement>> {
        let mut movements: Vec<Movement> = self
            .movements
            .iter()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect();
        sort_newest_first(&mut movements);
        Ok(movements)
    }
}
