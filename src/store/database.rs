//! Relational trip store backed by `SeaORM`.
//!
//! Trips live in `trips`, their allocations in `budget_categories` (one row per
//! trip and category, ordered by their `position` column) and expenses in
//! `movements`. Every write
//! that touches allocations also rewrites `trips.total_budget` inside the same
//! database transaction, so the stored total always equals the sum of the rows.

use crate::{
    core::{
        category::CategoryType,
        movement::{Movement, MovementFilter, NewMovement},
        trip::{
            BudgetCategory, NewTrip, Trip, TripId, TripUpdate, normalize_allocations,
        },
    },
    entities::{
        BudgetCategoryEntity, MovementEntity, TripEntity, budget_category, movement, trip,
    },
    errors::{Error, Result},
    store::TripStore,
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

/// Store that proxies every call to the database.
#[derive(Debug, Clone)]
pub struct DatabaseTripStore {
    db: DatabaseConnection,
}

impl DatabaseTripStore {
    /// Wraps an open connection. Tables must already exist.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl TripStore for DatabaseTripStore {
    #[instrument(skip(self, trip), fields(name = %trip.name))]
    async fn add_trip(&mut self, trip: NewTrip) -> Result<Trip> {
        let categories = normalize_allocations(trip.categories);
        let total_budget: f64 = categories.iter().map(|c| c.amount).sum();

        let txn = self.db.begin().await?;

        let row = trip::ActiveModel {
            name: Set(trip.name),
            start_date: Set(trip.start_date),
            end_date: Set(trip.end_date),
            total_budget: Set(total_budget),
            status: Set(trip.status.id().to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut allocation_rows = Vec::with_capacity(categories.len());
        for (index, allocation) in categories.iter().enumerate() {
            let position = position_of(index);
            allocation_rows.push(insert_allocation(&txn, row.id, allocation, position).await?);
        }

        txn.commit().await?;
        debug!(trip_id = row.id, "Inserted trip");

        trip_from_rows(row, allocation_rows)
    }

    #[instrument(skip(self, update))]
    async fn update_trip(&mut self, id: TripId, update: TripUpdate) -> Result<Option<Trip>> {
        let txn = self.db.begin().await?;

        let row = TripEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(Error::TripNotFound { id })?;

        if let Some(categories) = update.categories {
            replace_allocations(&txn, id, &normalize_allocations(categories)).await?;
        }

        let allocation_rows = allocation_rows_for(&txn, id).await?;

        let mut active: trip::ActiveModel = row.into();
        if let Some(name) = update.name {
            active.name = Set(name);
        }
        if let Some(start_date) = update.start_date {
            active.start_date = Set(start_date);
        }
        if let Some(end_date) = update.end_date {
            active.end_date = Set(end_date);
        }
        if let Some(status) = update.status {
            active.status = Set(status.id().to_string());
        }
        // Recomputed on every update so the column cannot drift from the rows.
        active.total_budget = Set(allocation_rows.iter().map(|r| r.amount).sum());

        let row = active.update(&txn).await?;
        txn.commit().await?;
        debug!(trip_id = id, "Updated trip");

        trip_from_rows(row, allocation_rows).map(Some)
    }

    #[instrument(skip(self, movement), fields(trip_id = movement.trip_id))]
    async fn add_movement(&mut self, movement: NewMovement) -> Result<Movement> {
        let row = movement::ActiveModel {
            trip_id: Set(movement.trip_id),
            category: Set(movement.category.id().to_string()),
            name: Set(movement.name),
            amount: Set(movement.amount),
            date: Set(movement.date),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        debug!(movement_id = row.id, "Inserted movement");

        movement_from_row(row)
    }

    async fn get_trip(&self, id: TripId) -> Result<Option<Trip>> {
        let Some(row) = TripEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let allocation_rows = allocation_rows_for(&self.db, id).await?;
        trip_from_rows(row, allocation_rows).map(Some)
    }

    async fn list_trips(&self) -> Result<Vec<Trip>> {
        let rows = TripEntity::find()
            .order_by_asc(trip::Column::Id)
            .all(&self.db)
            .await?;

        let mut allocations: HashMap<i64, Vec<budget_category::Model>> = HashMap::new();
        for allocation in BudgetCategoryEntity::find()
            .order_by_asc(budget_category::Column::Position)
            .order_by_asc(budget_category::Column::Id)
            .all(&self.db)
            .await?
        {
            allocations.entry(allocation.trip_id).or_default().push(allocation);
        }

        rows.into_iter()
            .map(|row| {
                let allocation_rows = allocations.remove(&row.id).unwrap_or_default();
                trip_from_rows(row, allocation_rows)
            })
            .collect()
    }

    async fn list_movements(&self, filter: MovementFilter) -> Result<Vec<Movement>> {
        let mut query = MovementEntity::find();
        if let Some(trip_id) = filter.trip_id {
            query = query.filter(movement::Column::TripId.eq(trip_id));
        }
        if let Some(category) = filter.category {
            query = query.filter(movement::Column::Category.eq(category.id()));
        }

        query
            .order_by_desc(movement::Column::Date)
            .order_by_desc(movement::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(movement_from_row)
            .collect()
    }
}

async fn allocation_rows_for<C>(db: &C, trip_id: TripId) -> Result<Vec<budget_category::Model>>
where
    C: ConnectionTrait,
{
    BudgetCategoryEntity::find()
        .filter(budget_category::Column::TripId.eq(trip_id))
        .order_by_asc(budget_category::Column::Position)
        .order_by_asc(budget_category::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

async fn insert_allocation<C>(
    db: &C,
    trip_id: TripId,
    allocation: &BudgetCategory,
    position: i32,
) -> Result<budget_category::Model>
where
    C: ConnectionTrait,
{
    budget_category::ActiveModel {
        trip_id: Set(trip_id),
        category: Set(allocation.category.id().to_string()),
        amount: Set(allocation.amount),
        position: Set(position),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Brings the allocation rows of `trip_id` in line with `categories`.
///
/// Each row's `position` is its index in `categories`. Existing rows keep their
/// id and are only written when their amount or position changed. Categories
/// missing from `categories` are deleted.
async fn replace_allocations<C>(
    db: &C,
    trip_id: TripId,
    categories: &[BudgetCategory],
) -> Result<()>
where
    C: ConnectionTrait,
{
    let existing = allocation_rows_for(db, trip_id).await?;

    let stale: Vec<i64> = existing
        .iter()
        .filter(|row| !categories.iter().any(|c| c.category.id() == row.category))
        .map(|row| row.id)
        .collect();
    if !stale.is_empty() {
        BudgetCategoryEntity::delete_many()
            .filter(budget_category::Column::Id.is_in(stale))
            .exec(db)
            .await?;
    }

    for (index, allocation) in categories.iter().enumerate() {
        let position = position_of(index);
        match existing.iter().find(|row| row.category == allocation.category.id()) {
            #[allow(clippy::float_cmp)]
            Some(row) if row.amount == allocation.amount && row.position == position => {}
            Some(row) => {
                let mut active: budget_category::ActiveModel = row.clone().into();
                active.amount = Set(allocation.amount);
                active.position = Set(position);
                active.update(db).await?;
            }
            None => {
                insert_allocation(db, trip_id, allocation, position).await?;
            }
        }
    }

    Ok(())
}

/// There are only seven categories, so an index always fits.
fn position_of(index: usize) -> i32 {
    i32::try_from(index).unwrap_or(i32::MAX)
}

fn trip_from_rows(row: trip::Model, allocation_rows: Vec<budget_category::Model>) -> Result<Trip> {
    let categories = allocation_rows
        .into_iter()
        .map(|allocation| -> Result<BudgetCategory> {
            Ok(BudgetCategory {
                category: allocation.category.parse::<CategoryType>()?,
                amount: allocation.amount,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let trip = Trip {
        id: row.id,
        name: row.name,
        start_date: row.start_date,
        end_date: row.end_date,
        categories,
        status: row.status.parse()?,
        created_at: row.created_at,
    };

    let derived = trip.total_budget();
    if (derived - row.total_budget).abs() > f64::EPSILON * derived.max(1.0) {
        warn!(
            trip_id = trip.id,
            stored = row.total_budget,
            derived,
            "Stored total budget differs from allocations, using allocations"
        );
    }

    Ok(trip)
}

fn movement_from_row(row: movement::Model) -> Result<Movement> {
    Ok(Movement {
        id: row.id,
        trip_id: row.trip_id,
        category: row.category.parse()?,
        name: row.name,
        amount: row.amount,
        date: row.date,
    })
}
