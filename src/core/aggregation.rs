//! Spend aggregation over a trip and its movement ledger.
//!
//! Everything here is pure: callers load the trip and movements from whichever
//! store they use and hand them in. Movements of other trips are ignored, so the
//! full ledger can be passed without pre-filtering.

use crate::core::{category::CategoryType, movement::Movement, trip::Trip};
use serde::Serialize;
use std::collections::HashMap;

/// Total spent on `trip`.
#[must_use]
pub fn total_spent(trip: &Trip, movements: &[Movement]) -> f64 {
    movements
        .iter()
        .filter(|m| m.trip_id == trip.id)
        .map(|m| m.amount)
        .sum()
}

/// Spend on `trip` grouped by category.
///
/// Categories with spend but no allocation are included, so the values always sum
/// to [`total_spent`].
#[must_use]
pub fn spent_by_category(trip: &Trip, movements: &[Movement]) -> HashMap<CategoryType, f64> {
    let mut spent = HashMap::new();
    for movement in movements.iter().filter(|m| m.trip_id == trip.id) {
        *spent.entry(movement.category).or_insert(0.0) += movement.amount;
    }
    spent
}

/// Spend in a single category of `trip`.
#[must_use]
pub fn spent_in_category(trip: &Trip, movements: &[Movement], category: CategoryType) -> f64 {
    movements
        .iter()
        .filter(|m| m.trip_id == trip.id && m.category == category)
        .map(|m| m.amount)
        .sum()
}

/// Spend as a rounded, uncapped percentage of `allocated`.
///
/// Zero or negative allocations report 0 instead of dividing by zero.
// Cast safety: both operands are finite, so the quotient is finite. `as` saturates
// at the i64 bounds for absurd inputs.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn percentage(spent: f64, allocated: f64) -> i64 {
    if allocated <= 0.0 || !allocated.is_finite() || !spent.is_finite() {
        return 0;
    }

    (100.0 * spent / allocated).round() as i64
}

/// [`percentage`] clamped to `0..=100` for progress indicators.
#[must_use]
pub fn display_percentage(spent: f64, allocated: f64) -> i64 {
    percentage(spent, allocated).clamp(0, 100)
}

/// Total spend as an uncapped percentage of the trip's total budget.
#[must_use]
pub fn total_percentage(trip: &Trip, movements: &[Movement]) -> i64 {
    percentage(total_spent(trip, movements), trip.total_budget())
}

/// Spend against one allocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategorySpend {
    /// Budgeted category
    pub category: CategoryType,
    /// Allocated amount
    pub allocated: f64,
    /// Amount spent so far
    pub spent: f64,
    /// Uncapped spent percentage
    pub percentage: i64,
}

impl CategorySpend {
    /// Percentage clamped for a progress bar.
    #[must_use]
    pub fn display_percentage(&self) -> i64 {
        self.percentage.clamp(0, 100)
    }

    /// Allocation left, negative when overspent.
    #[must_use]
    pub fn remaining(&self) -> f64 {
        self.allocated - self.spent
    }
}

/// One row per allocation of `trip`, in allocation order.
#[must_use]
pub fn category_breakdown(trip: &Trip, movements: &[Movement]) -> Vec<CategorySpend> {
    let spent = spent_by_category(trip, movements);
    trip.categories
        .iter()
        .map(|allocation| {
            let category_spent = spent.get(&allocation.category).copied().unwrap_or(0.0);
            CategorySpend {
                category: allocation.category,
                allocated: allocation.amount,
                spent: category_spent,
                percentage: percentage(category_spent, allocation.amount),
            }
        })
        .collect()
}

/// Everything the summary and budget screens show for a trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetSummary {
    /// Sum of all allocations
    pub total_budget: f64,
    /// Sum of all movements of the trip
    pub total_spent: f64,
    /// Uncapped total percentage
    pub total_percentage: i64,
    /// Total percentage clamped to `0..=100`
    pub display_percentage: i64,
    /// Per-allocation breakdown in allocation order
    pub categories: Vec<CategorySpend>,
    /// Spend in categories that have no allocation, in catalog order
    pub unallocated: Vec<(CategoryType, f64)>,
}

impl BudgetSummary {
    /// Aggregates `movements` against `trip`.
    #[must_use]
    pub fn compute(trip: &Trip, movements: &[Movement]) -> Self {
        let spent = spent_by_category(trip, movements);
        let total_budget = trip.total_budget();
        let total_spent: f64 = spent.values().sum();

        let unallocated = CategoryType::ALL
            .into_iter()
            .filter(|category| trip.allocation(*category).is_none())
            .filter_map(|category| spent.get(&category).map(|amount| (category, *amount)))
            .collect();

        Self {
            total_budget,
            total_spent,
            total_percentage: percentage(total_spent, total_budget),
            display_percentage: display_percentage(total_spent, total_budget),
            categories: category_breakdown(trip, movements),
            unallocated,
        }
    }

    /// Budget left, negative when overspent.
    #[must_use]
    pub fn remaining(&self) -> f64 {
        self.total_budget - self.total_spent
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{movement, sample_trip};

    /// Food 200000 / transport 100000 with three movements.
    fn scenario() -> (Trip, Vec<Movement>) {
        let mut trip = sample_trip(1);
        trip.allocate(CategoryType::Food, 200_000.0);
        trip.allocate(CategoryType::Transport, 100_000.0);

        let movements = vec![
            movement(1, 1, CategoryType::Food, 50_000.0),
            movement(2, 1, CategoryType::Food, 30_000.0),
            movement(3, 1, CategoryType::Transport, 100_000.0),
        ];
        (trip, movements)
    }

    #[test]
    fn test_scenario_totals() {
        let (trip, movements) = scenario();

        let by_category = spent_by_category(&trip, &movements);
        assert_eq!(by_category.len(), 2);
        assert_eq!(by_category[&CategoryType::Food], 80_000.0);
        assert_eq!(by_category[&CategoryType::Transport], 100_000.0);

        assert_eq!(trip.total_budget(), 300_000.0);
        assert_eq!(total_spent(&trip, &movements), 180_000.0);
        assert_eq!(percentage(by_category[&CategoryType::Food], 200_000.0), 40);
        assert_eq!(percentage(by_category[&CategoryType::Transport], 100_000.0), 100);
        assert_eq!(total_percentage(&trip, &movements), 60);
    }

    #[test]
    fn test_other_trips_are_ignored() {
        let (trip, mut movements) = scenario();
        movements.push(movement(4, 2, CategoryType::Food, 999_999.0));

        assert_eq!(total_spent(&trip, &movements), 180_000.0);
        assert_eq!(spent_in_category(&trip, &movements, CategoryType::Food), 80_000.0);
    }

    #[test]
    fn test_total_equals_sum_of_categories() {
        let (trip, mut movements) = scenario();
        movements.push(movement(4, 1, CategoryType::Insurance, 12_345.0));
        movements.push(movement(5, 1, CategoryType::Other, 0.5));
        movements.push(movement(6, 3, CategoryType::Other, 7.0));

        let sum: f64 = spent_by_category(&trip, &movements).values().sum();
        assert_eq!(total_spent(&trip, &movements), sum);
    }

    #[test]
    fn test_percentage_zero_allocation() {
        assert_eq!(percentage(0.0, 0.0), 0);
        assert_eq!(percentage(50_000.0, 0.0), 0);
        assert_eq!(percentage(f64::MAX, 0.0), 0);
        assert_eq!(display_percentage(50_000.0, 0.0), 0);
    }

    #[test]
    fn test_percentage_rounding_and_monotonic() {
        assert_eq!(percentage(1.0, 3.0), 33);
        assert_eq!(percentage(2.0, 3.0), 67);
        assert_eq!(percentage(1.0, 200.0), 1);

        let mut previous = i64::MIN;
        for step in 0..=400 {
            let current = percentage(f64::from(step) * 2.5, 300.0);
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn test_overspend_raw_and_clamped() {
        assert_eq!(percentage(150.0, 100.0), 150);
        assert_eq!(display_percentage(150.0, 100.0), 100);
    }

    #[test]
    fn test_stray_movement_without_allocations() {
        let trip = sample_trip(1);
        let movements = vec![movement(1, 1, CategoryType::Entertainment, 42_000.0)];

        assert_eq!(total_spent(&trip, &movements), 42_000.0);
        assert_eq!(total_percentage(&trip, &movements), 0);
        assert!(category_breakdown(&trip, &movements).is_empty());

        let summary = BudgetSummary::compute(&trip, &movements);
        assert_eq!(summary.total_spent, 42_000.0);
        assert_eq!(summary.total_percentage, 0);
        assert_eq!(summary.unallocated, vec![(CategoryType::Entertainment, 42_000.0)]);
    }

    #[test]
    fn test_breakdown_follows_allocation_order() {
        let mut trip = sample_trip(1);
        trip.allocate(CategoryType::Other, 10.0);
        trip.allocate(CategoryType::Lodging, 20.0);
        trip.allocate(CategoryType::Food, 30.0);

        let order: Vec<_> = category_breakdown(&trip, &[])
            .into_iter()
            .map(|row| row.category)
            .collect();
        assert_eq!(
            order,
            vec![CategoryType::Other, CategoryType::Lodging, CategoryType::Food]
        );
    }

    #[test]
    fn test_summary_for_scenario() {
        let (trip, movements) = scenario();
        let summary = BudgetSummary::compute(&trip, &movements);

        assert_eq!(summary.total_budget, 300_000.0);
        assert_eq!(summary.total_spent, 180_000.0);
        assert_eq!(summary.remaining(), 120_000.0);
        assert_eq!(summary.total_percentage, 60);
        assert_eq!(summary.display_percentage, 60);
        assert!(summary.unallocated.is_empty());
        assert_eq!(summary.categories[0].percentage, 40);
        assert_eq!(summary.categories[0].remaining(), 120_000.0);
        assert_eq!(summary.categories[1].display_percentage(), 100);
    }
}
