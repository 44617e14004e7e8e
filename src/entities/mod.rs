//! Entity module - SeaORM definitions for the relational trip store.
//! These entities mirror the `trips`, `budget_categories` and `movements` tables.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod budget_category;
pub mod movement;
pub mod trip;

// Re-export specific types to avoid conflicts
pub use budget_category::{
    Column as BudgetCategoryColumn, Entity as BudgetCategoryEntity, Model as BudgetCategoryModel,
};
pub use movement::{Column as MovementColumn, Entity as MovementEntity, Model as MovementModel};
pub use trip::{Column as TripColumn, Entity as TripEntity, Model as TripModel};
