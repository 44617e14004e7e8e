//! Budget category entity - the allocation for one category of one trip.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Budget allocation database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "budget_categories")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the trip this allocation belongs to
    pub trip_id: i64,
    /// Category id (e.g., `"comida"`)
    pub category: String,
    /// Allocated amount
    pub amount: f64,
    /// Zero-based display position within the trip
    pub position: i32,
}

/// Defines relationships between `BudgetCategory` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each allocation belongs to one trip
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
