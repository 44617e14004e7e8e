//! Core business logic - storage-agnostic trip, budget and expense operations.

/// Spend aggregation over a trip and its movements
pub mod aggregation;
/// Budget allocation editor
pub mod budget;
/// Fixed category catalog
pub mod category;
/// Expense registration form
pub mod expense;
/// Movement model and ledger filter
pub mod movement;
/// Budget reports
pub mod report;
/// Trip model and trip planning
pub mod trip;
