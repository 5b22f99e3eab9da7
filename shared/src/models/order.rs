//! Purchase order models
//!
//! An order against the print shop: created PENDING with the requested
//! quantities, completed once when the invoice arrives, possibly with a
//! different doctor set and quantities than requested.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Order lifecycle state. COMPLETED is terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Completed,
}

/// One line of an order or invoice
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderItem {
    pub doctor_id: Uuid,
    pub quantity: i64,
}

/// A purchase order to the print shop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: Uuid,
    pub status: OrderStatus,
    pub date_created: NaiveDate,
    /// Requested quantities while PENDING; overwritten with the as-received
    /// list at completion, which is also what drives the warehouse ingress.
    pub items: Vec<OrderItem>,

    // Stamped on completion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_received: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<Decimal>,
    /// total_cost / sum of received quantities, for reporting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Decimal>,
}

impl PurchaseOrder {
    pub fn new(date_created: NaiveDate, items: Vec<OrderItem>) -> Self {
        Self {
            id: Uuid::new_v4(),
            status: OrderStatus::Pending,
            date_created,
            items,
            invoice_number: None,
            supplier: None,
            date_received: None,
            total_cost: None,
            unit_price: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == OrderStatus::Pending
    }

    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}
