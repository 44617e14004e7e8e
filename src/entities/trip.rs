//! Trip entity - one row per planned trip.
//!
//! `total_budget` is a denormalised copy of the sum of the trip's
//! `budget_categories` rows; the store rewrites it whenever allocations change.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Trip database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "trips")]
pub struct Model {
    /// Unique identifier for the trip
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Trip name (e.g., "Viaje a San Andrés")
    pub name: String,
    /// First day of the trip
    pub start_date: Date,
    /// Last day of the trip
    pub end_date: Date,
    /// Sum of the allocation rows at the last write
    pub total_budget: f64,
    /// Status id: `"pendiente"`, `"en-progreso"` or `"completado"`
    pub status: String,
    /// When the trip was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Trip and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One trip has many budget allocations
    #[sea_orm(has_many = "super::budget_category::Entity")]
    BudgetCategories,
    /// One trip has many movements
    #[sea_orm(has_many = "super::movement::Entity")]
    Movements,
}

impl Related<super::budget_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BudgetCategories.def()
    }
}

impl Related<super::movement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Movements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
