//! Unified error types for the trip budget core.
//!
//! Validation failures are kept in their own enum so callers can show them to the
//! user directly; everything else (storage, configuration, bad stored data) lives
//! in [`Error`].

use thiserror::Error;

/// User input that was rejected before any state was touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Trip or expense name was empty or whitespace only
    #[error("Name cannot be empty")]
    EmptyName,

    /// No spending category was selected
    #[error("A category must be selected")]
    MissingCategory,

    /// Amount did not parse to a positive number
    #[error("Invalid amount: {input:?}")]
    InvalidAmount {
        /// Raw user input
        input: String,
    },

    /// Expense was not bound to a trip and none was selected
    #[error("A trip must be selected")]
    MissingTrip,

    /// Trip plan is missing its start or end date
    #[error("Trip start and end dates are required")]
    MissingDates,

    /// Trip ends before it starts
    #[error("Trip end date {end} is before start date {start}")]
    InvalidDateRange {
        /// Requested start date
        start: chrono::NaiveDate,
        /// Requested end date
        end: chrono::NaiveDate,
    },

    /// Budget confirmation with no allocations
    #[error("Budget total must be greater than zero")]
    EmptyBudget,
}

/// Errors produced by stores, configuration and workflows.
#[derive(Debug, Error)]
pub enum Error {
    /// Rejected user input
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// No trip with the given id
    #[error("Trip not found: {id}")]
    TripNotFound {
        /// Requested trip id
        id: i64,
    },

    /// Stored category id is not one of the fixed categories
    #[error("Unknown category: {id}")]
    UnknownCategory {
        /// Offending id
        id: String,
    },

    /// Stored trip status is not recognised
    #[error("Unknown trip status: {id}")]
    UnknownStatus {
        /// Offending id
        id: String,
    },

    /// Configuration could not be loaded
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the problem
        message: String,
    },
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
