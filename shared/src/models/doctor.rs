//! Doctor roster models
//!
//! Each professional has their own pad stock in two locations plus the
//! per-location thresholds that drive low-stock alerts and replenishment.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::StockLocation;

/// Minimum/ideal stock configuration for one location
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Thresholds {
    /// Below this quantity the doctor shows up in the alert list
    pub minimum: i64,
    /// Replenishment target used to pre-fill transfer and order drafts
    pub ideal: i64,
}

/// A professional whose prescription pads the office tracks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub name: String,
    pub specialty: String,
    /// Pads in the back warehouse ("Depósito")
    pub warehouse_stock: i64,
    /// Pads at the front counter ("Planta Baja")
    pub counter_stock: i64,
    /// Cumulative pads handed out to patients
    pub pads_on_hand: i64,
    pub last_restock_date: Option<NaiveDate>,
    pub counter_thresholds: Thresholds,
    pub warehouse_thresholds: Thresholds,
}

impl Doctor {
    /// Create a doctor with zero stock and the given thresholds
    pub fn new(
        name: impl Into<String>,
        specialty: impl Into<String>,
        counter_thresholds: Thresholds,
        warehouse_thresholds: Thresholds,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            specialty: specialty.into(),
            warehouse_stock: 0,
            counter_stock: 0,
            pads_on_hand: 0,
            last_restock_date: None,
            counter_thresholds,
            warehouse_thresholds,
        }
    }

    pub fn stock_at(&self, location: StockLocation) -> i64 {
        match location {
            StockLocation::Counter => self.counter_stock,
            StockLocation::Warehouse => self.warehouse_stock,
        }
    }

    pub fn thresholds_at(&self, location: StockLocation) -> Thresholds {
        match location {
            StockLocation::Counter => self.counter_thresholds,
            StockLocation::Warehouse => self.warehouse_thresholds,
        }
    }

    /// Strictly below the configured minimum for the location
    pub fn is_below_minimum(&self, location: StockLocation) -> bool {
        self.stock_at(location) < self.thresholds_at(location).minimum
    }

    /// Quantity needed to bring the location back to its ideal stock
    pub fn suggested_replenishment(&self, location: StockLocation) -> i64 {
        crate::validation::suggested_replenishment(
            self.thresholds_at(location).ideal,
            self.stock_at(location),
        )
    }
}
