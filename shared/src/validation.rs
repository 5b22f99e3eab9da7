//! Validation and stock-math utilities for the Recetario Stock Service
//!
//! Pure functions over the roster; the dashboard and the ledger preconditions
//! are built from these.

use rust_decimal::Decimal;
use std::collections::HashSet;

use crate::models::{Doctor, Thresholds};
use crate::types::StockLocation;

// ============================================================================
// Threshold and quantity validations
// ============================================================================

/// Validate a minimum/ideal pair: no negatives, ideal at or above minimum
pub fn validate_thresholds(t: Thresholds) -> Result<(), &'static str> {
    if t.minimum < 0 || t.ideal < 0 {
        return Err("Thresholds cannot be negative");
    }
    if t.ideal < t.minimum {
        return Err("Ideal stock must be at or above the minimum");
    }
    Ok(())
}

/// Validate a distribution/adjustment quantity
pub fn validate_positive_quantity(quantity: i64) -> Result<(), &'static str> {
    if quantity <= 0 {
        return Err("Quantity must be positive");
    }
    Ok(())
}

/// Validate a transfer or order-line quantity (zero allowed)
pub fn validate_non_negative_quantity(quantity: i64) -> Result<(), &'static str> {
    if quantity < 0 {
        return Err("Quantity cannot be negative");
    }
    Ok(())
}

// ============================================================================
// Stock math
// ============================================================================

/// Quantity needed to bring a location back to its ideal stock
pub fn suggested_replenishment(ideal: i64, current: i64) -> i64 {
    (ideal - current).max(0)
}

/// Sum of one location's stock over the whole roster
pub fn total_stock(doctors: &[Doctor], location: StockLocation) -> i64 {
    doctors.iter().map(|d| d.stock_at(location)).sum()
}

/// Doctors strictly below their configured minimum for a location
pub fn below_minimum(doctors: &[Doctor], location: StockLocation) -> Vec<&Doctor> {
    doctors
        .iter()
        .filter(|d| d.is_below_minimum(location))
        .collect()
}

/// Number of doctors low in at least one location. A doctor low in both
/// locations counts once (union, not the sum of the two lists).
pub fn alert_count(doctors: &[Doctor]) -> usize {
    let mut low = HashSet::new();
    for d in doctors {
        if d.is_below_minimum(StockLocation::Counter)
            || d.is_below_minimum(StockLocation::Warehouse)
        {
            low.insert(d.id);
        }
    }
    low.len()
}

/// Per-pad price of a received order, None when nothing was received
pub fn unit_price(total_cost: Decimal, total_quantity: i64) -> Option<Decimal> {
    if total_quantity > 0 {
        Some(total_cost / Decimal::from(total_quantity))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn doctor(counter: i64, min_counter: i64, warehouse: i64, min_warehouse: i64) -> Doctor {
        let mut d = Doctor::new(
            "TEST",
            "Clinica",
            Thresholds { minimum: min_counter, ideal: min_counter + 3 },
            Thresholds { minimum: min_warehouse, ideal: min_warehouse + 10 },
        );
        d.counter_stock = counter;
        d.warehouse_stock = warehouse;
        d
    }

    // ========================================================================
    // Threshold validation
    // ========================================================================

    #[test]
    fn test_validate_thresholds_valid() {
        assert!(validate_thresholds(Thresholds { minimum: 2, ideal: 5 }).is_ok());
        assert!(validate_thresholds(Thresholds { minimum: 0, ideal: 0 }).is_ok());
        assert!(validate_thresholds(Thresholds { minimum: 5, ideal: 5 }).is_ok());
    }

    #[test]
    fn test_validate_thresholds_ideal_below_minimum() {
        assert!(validate_thresholds(Thresholds { minimum: 5, ideal: 2 }).is_err());
    }

    #[test]
    fn test_validate_thresholds_negative() {
        assert!(validate_thresholds(Thresholds { minimum: -1, ideal: 5 }).is_err());
        assert!(validate_thresholds(Thresholds { minimum: 0, ideal: -3 }).is_err());
    }

    #[test]
    fn test_validate_quantities() {
        assert!(validate_positive_quantity(1).is_ok());
        assert!(validate_positive_quantity(0).is_err());
        assert!(validate_positive_quantity(-4).is_err());
        assert!(validate_non_negative_quantity(0).is_ok());
        assert!(validate_non_negative_quantity(-1).is_err());
    }

    // ========================================================================
    // Stock math
    // ========================================================================

    #[test]
    fn test_suggested_replenishment() {
        assert_eq!(suggested_replenishment(5, 2), 3);
        assert_eq!(suggested_replenishment(5, 5), 0);
        // Above ideal suggests nothing, never a negative
        assert_eq!(suggested_replenishment(5, 9), 0);
    }

    #[test]
    fn test_total_stock() {
        let roster = vec![doctor(2, 0, 10, 0), doctor(3, 0, 7, 0)];
        assert_eq!(total_stock(&roster, StockLocation::Counter), 5);
        assert_eq!(total_stock(&roster, StockLocation::Warehouse), 17);
    }

    #[test]
    fn test_below_minimum_boundary() {
        // counter = 1 < minimum = 2 -> low
        let d = doctor(1, 2, 10, 0);
        assert!(d.is_below_minimum(StockLocation::Counter));

        // raising to exactly the minimum clears the alert
        let d = doctor(2, 2, 10, 0);
        assert!(!d.is_below_minimum(StockLocation::Counter));
    }

    #[test]
    fn test_alert_count_union_semantics() {
        // low in counter only, low in warehouse only, low in both, healthy
        let roster = vec![
            doctor(1, 2, 10, 5),
            doctor(5, 2, 0, 5),
            doctor(0, 2, 0, 5),
            doctor(5, 2, 10, 5),
        ];
        // the doctor low in both locations counts once
        assert_eq!(alert_count(&roster), 3);
    }

    #[test]
    fn test_unit_price() {
        assert_eq!(
            unit_price(Decimal::from(4000), 40),
            Some(Decimal::from(100))
        );
        assert_eq!(unit_price(Decimal::from(4000), 0), None);
    }
}
