//! Movement log models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::StockLocation;

/// Kinds of stock movements recorded in the activity log
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementKind {
    /// Warehouse ingress from a received purchase order
    Purchase,
    /// Internal replenishment, warehouse to counter
    TransferToCounter,
    /// Pads handed from the counter to a patient
    DistributeToPatient,
    /// A purchase order was placed
    OrderCreated,
    /// Admin override of a counter or threshold field
    ManualAdjust,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Purchase => "PURCHASE",
            MovementKind::TransferToCounter => "TRANSFER_TO_COUNTER",
            MovementKind::DistributeToPatient => "DISTRIBUTE_TO_PATIENT",
            MovementKind::OrderCreated => "ORDER_CREATED",
            MovementKind::ManualAdjust => "MANUAL_ADJUST",
        }
    }
}

/// One append-only audit record. Never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementLog {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub kind: MovementKind,
    pub quantity: i64,
    /// Name of the logged-in user who performed the operation
    pub actor: String,
    pub description: String,
    pub location: StockLocation,
}

impl MovementLog {
    pub fn new(
        kind: MovementKind,
        quantity: i64,
        actor: impl Into<String>,
        description: impl Into<String>,
        location: StockLocation,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            kind,
            quantity,
            actor: actor.into(),
            description: description.into(),
            location,
        }
    }
}
