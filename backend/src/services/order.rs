//! Purchase order service
//!
//! Creation and queries. Completion lives in the ledger, since receiving an
//! order is first and foremost a stock movement.

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use shared::models::{MovementKind, MovementLog, OrderItem, OrderStatus, PurchaseOrder};
use shared::types::StockLocation;
use shared::validation;

use crate::error::{AppError, AppResult};
use crate::store::StoreHandle;

/// Purchase order service
#[derive(Clone)]
pub struct OrderService {
    store: StoreHandle,
}

/// Input for creating an order
#[derive(Debug, Deserialize)]
pub struct CreateOrderInput {
    pub items: Vec<OrderItem>,
}

impl OrderService {
    /// Create a new OrderService instance
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// Create a PENDING order. Zero-quantity lines are dropped and duplicate
    /// doctor lines combined; an order left empty is rejected.
    pub async fn create(&self, input: CreateOrderInput, actor: &str) -> AppResult<PurchaseOrder> {
        for item in &input.items {
            validation::validate_non_negative_quantity(item.quantity).map_err(|msg| {
                AppError::Validation {
                    field: "items".to_string(),
                    message: msg.to_string(),
                    message_es: "Las cantidades no pueden ser negativas".to_string(),
                }
            })?;
        }

        let mut items: Vec<OrderItem> = Vec::new();
        for item in input.items {
            if item.quantity == 0 {
                continue;
            }
            match items.iter_mut().find(|i| i.doctor_id == item.doctor_id) {
                Some(existing) => existing.quantity += item.quantity,
                None => items.push(item),
            }
        }
        if items.is_empty() {
            return Err(AppError::EmptyOrder);
        }

        let actor = actor.to_string();
        self.store
            .mutate(move |store| {
                for item in &items {
                    if store.doctor(item.doctor_id).is_none() {
                        return Err(AppError::NotFound("Doctor".to_string()));
                    }
                }

                let order = PurchaseOrder::new(Utc::now().date_naive(), items);
                store.push_log(MovementLog::new(
                    MovementKind::OrderCreated,
                    order.total_quantity(),
                    actor.as_str(),
                    format!("Pedido generado #{}", order.id),
                    StockLocation::Warehouse,
                ));
                store.orders.insert(0, order.clone());

                Ok(order)
            })
            .await
    }

    /// Orders, optionally filtered by status. Pending first is the storage
    /// order (newest first); history views sort client-side by receipt date.
    pub async fn list(&self, status: Option<OrderStatus>) -> Vec<PurchaseOrder> {
        let store = self.store.read().await;
        store
            .orders
            .iter()
            .filter(|o| status.map_or(true, |s| o.status == s))
            .cloned()
            .collect()
    }

    pub async fn get(&self, id: Uuid) -> AppResult<PurchaseOrder> {
        self.store
            .read()
            .await
            .order(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Order".to_string()))
    }
}
