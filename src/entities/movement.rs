//! Movement entity - every recorded expense.
//!
//! The store does not look the trip up before inserting; a dangling `trip_id`
//! only fails if the database enforces the foreign key.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Movement database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "movements")]
pub struct Model {
    /// Unique identifier for the movement
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the trip this movement belongs to
    pub trip_id: i64,
    /// Category id (e.g., `"transporte"`)
    pub category: String,
    /// What the money was spent on
    pub name: String,
    /// Amount spent
    pub amount: f64,
    /// When the expense happened
    pub date: DateTimeUtc,
}

/// Defines relationships between Movement and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each movement belongs to one trip
    #[sea_orm(
        belongs_to = "super::trip::Entity",
        from = "Column::TripId",
        to = "super::trip::Column::Id"
    )]
    Trip,
}

impl Related<super::trip::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trip.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
