//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Physical stock locations in the clinic
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StockLocation {
    /// Front counter ("Planta Baja") where pads are handed to patients
    Counter,
    /// Back warehouse ("Depósito") replenished by purchase orders
    Warehouse,
}

impl StockLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockLocation::Counter => "counter",
            StockLocation::Warehouse => "warehouse",
        }
    }

    /// Label used in movement-log descriptions, as the office writes it
    pub fn label_es(&self) -> &'static str {
        match self {
            StockLocation::Counter => "Planta Baja (PB)",
            StockLocation::Warehouse => "Depósito",
        }
    }
}
