//! Stock ledger service
//!
//! The four mutations that move pads around: distribution to a patient,
//! warehouse-to-counter transfers, purchase-order receipt, and manual
//! adjustment. Every mutation keeps both counters non-negative and appends
//! to the movement log. Batch operations validate everything before touching
//! any doctor, so a rejected request leaves the roster untouched.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use shared::models::{Doctor, MovementKind, MovementLog, OrderItem, OrderStatus, PurchaseOrder};
use shared::types::StockLocation;
use shared::validation;

use crate::error::{AppError, AppResult};
use crate::store::StoreHandle;

/// Ledger service for stock mutations
#[derive(Clone)]
pub struct LedgerService {
    store: StoreHandle,
}

/// One warehouse-to-counter transfer line
#[derive(Debug, Clone, Deserialize)]
pub struct TransferRequest {
    pub doctor_id: Uuid,
    pub quantity: i64,
}

/// Invoice data confirming a purchase order. The item list is the
/// as-received one and may differ from what was requested.
#[derive(Debug, Clone, Deserialize)]
pub struct ReceiveInvoice {
    pub invoice_number: String,
    pub supplier: String,
    pub date_received: NaiveDate,
    pub total_cost: Decimal,
    pub items: Vec<OrderItem>,
}

/// Fields a manual adjustment can target
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StockField {
    CounterStock,
    WarehouseStock,
    PadsOnHand,
    CounterMinimum,
    CounterIdeal,
    WarehouseMinimum,
    WarehouseIdeal,
}

impl StockField {
    /// Label used in movement-log descriptions, in the sheet's vocabulary
    fn label(&self) -> &'static str {
        match self {
            StockField::CounterStock => "stock_pb",
            StockField::WarehouseStock => "stock_deposito",
            StockField::PadsOnHand => "entregados",
            StockField::CounterMinimum => "min_pb",
            StockField::CounterIdeal => "ideal_pb",
            StockField::WarehouseMinimum => "min_deposito",
            StockField::WarehouseIdeal => "ideal_deposito",
        }
    }

    fn location(&self) -> StockLocation {
        match self {
            StockField::CounterStock
            | StockField::PadsOnHand
            | StockField::CounterMinimum
            | StockField::CounterIdeal => StockLocation::Counter,
            StockField::WarehouseStock
            | StockField::WarehouseMinimum
            | StockField::WarehouseIdeal => StockLocation::Warehouse,
        }
    }
}

impl LedgerService {
    /// Create a new LedgerService instance
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// Hand pads from the counter to a patient. Hard-blocked when the
    /// counter does not cover the quantity.
    pub async fn distribute_to_patient(
        &self,
        doctor_id: Uuid,
        quantity: i64,
        actor: &str,
    ) -> AppResult<Doctor> {
        validation::validate_positive_quantity(quantity).map_err(|msg| AppError::Validation {
            field: "quantity".to_string(),
            message: msg.to_string(),
            message_es: "La cantidad debe ser positiva".to_string(),
        })?;

        let actor = actor.to_string();
        self.store
            .mutate(move |store| {
                let doctor = store
                    .doctor_mut(doctor_id)
                    .ok_or_else(|| AppError::NotFound("Doctor".to_string()))?;

                if quantity > doctor.counter_stock {
                    return Err(AppError::InsufficientStock {
                        doctor: doctor.name.clone(),
                        requested: quantity,
                        available: doctor.counter_stock,
                    });
                }

                doctor.counter_stock -= quantity;
                doctor.pads_on_hand += quantity;
                doctor.last_restock_date = Some(Utc::now().date_naive());
                let updated = doctor.clone();

                store.push_log(MovementLog::new(
                    MovementKind::DistributeToPatient,
                    quantity,
                    actor.as_str(),
                    updated.name.clone(),
                    StockLocation::Counter,
                ));

                Ok(updated)
            })
            .await
    }

    /// Move pads from the warehouse to the counter for a batch of doctors,
    /// applied together. A line that would leave any warehouse negative
    /// rejects the whole batch with `OverCommit`.
    pub async fn transfer_to_counter(
        &self,
        transfers: &[TransferRequest],
        actor: &str,
    ) -> AppResult<Vec<Doctor>> {
        for t in transfers {
            validation::validate_non_negative_quantity(t.quantity).map_err(|msg| {
                AppError::Validation {
                    field: "quantity".to_string(),
                    message: msg.to_string(),
                    message_es: "La cantidad no puede ser negativa".to_string(),
                }
            })?;
        }

        let transfers = transfers.to_vec();
        let actor = actor.to_string();
        self.store
            .mutate(move |store| {
                // Validate the whole batch against warehouse stock first.
                // Lines for the same doctor are checked as a combined total.
                let mut requested: HashMap<Uuid, i64> = HashMap::new();
                for t in &transfers {
                    *requested.entry(t.doctor_id).or_insert(0) += t.quantity;
                }
                for (doctor_id, total) in &requested {
                    let doctor = store
                        .doctor(*doctor_id)
                        .ok_or_else(|| AppError::NotFound("Doctor".to_string()))?;
                    if *total > doctor.warehouse_stock {
                        return Err(AppError::OverCommit {
                            doctor: doctor.name.clone(),
                            requested: *total,
                            available: doctor.warehouse_stock,
                        });
                    }
                }

                let mut updated = Vec::new();
                for t in &transfers {
                    if t.quantity == 0 {
                        continue;
                    }
                    let doctor = store
                        .doctor_mut(t.doctor_id)
                        .ok_or_else(|| AppError::NotFound("Doctor".to_string()))?;
                    doctor.warehouse_stock -= t.quantity;
                    doctor.counter_stock += t.quantity;
                    let snapshot = doctor.clone();

                    store.push_log(MovementLog::new(
                        MovementKind::TransferToCounter,
                        t.quantity,
                        actor.as_str(),
                        format!("Reposición Masiva: {}", snapshot.name),
                        StockLocation::Counter,
                    ));
                    updated.push(snapshot);
                }

                Ok(updated)
            })
            .await
    }

    /// Complete a PENDING order with the received invoice: warehouse ingress
    /// per invoice item, order stamped COMPLETED with the as-received items.
    /// A second receipt returns `AlreadyCompleted` and mutates nothing.
    pub async fn receive_purchase_order(
        &self,
        order_id: Uuid,
        invoice: ReceiveInvoice,
        actor: &str,
    ) -> AppResult<PurchaseOrder> {
        for item in &invoice.items {
            validation::validate_non_negative_quantity(item.quantity).map_err(|msg| {
                AppError::Validation {
                    field: "items".to_string(),
                    message: msg.to_string(),
                    message_es: "Las cantidades recibidas no pueden ser negativas".to_string(),
                }
            })?;
        }
        if invoice.total_cost < Decimal::ZERO {
            return Err(AppError::Validation {
                field: "total_cost".to_string(),
                message: "Total cost cannot be negative".to_string(),
                message_es: "El costo total no puede ser negativo".to_string(),
            });
        }

        let actor = actor.to_string();
        self.store
            .mutate(move |store| {
                let order = store
                    .order(order_id)
                    .ok_or_else(|| AppError::NotFound("Order".to_string()))?;
                if !order.is_pending() {
                    return Err(AppError::AlreadyCompleted(order_id.to_string()));
                }

                // Every invoice doctor must exist before any stock moves
                for item in &invoice.items {
                    if store.doctor(item.doctor_id).is_none() {
                        return Err(AppError::NotFound("Doctor".to_string()));
                    }
                }

                let received_total: i64 = invoice.items.iter().map(|i| i.quantity).sum();
                let unit_price = validation::unit_price(invoice.total_cost, received_total);

                for item in &invoice.items {
                    let doctor = store
                        .doctor_mut(item.doctor_id)
                        .ok_or_else(|| AppError::NotFound("Doctor".to_string()))?;
                    doctor.warehouse_stock += item.quantity;
                    let name = doctor.name.clone();

                    store.push_log(MovementLog::new(
                        MovementKind::Purchase,
                        item.quantity,
                        actor.as_str(),
                        format!("Ingreso Fac: {} ({})", invoice.invoice_number, name),
                        StockLocation::Warehouse,
                    ));
                }

                let order = store
                    .order_mut(order_id)
                    .ok_or_else(|| AppError::NotFound("Order".to_string()))?;
                order.status = OrderStatus::Completed;
                order.invoice_number = Some(invoice.invoice_number.clone());
                order.supplier = Some(invoice.supplier.clone());
                order.date_received = Some(invoice.date_received);
                order.total_cost = Some(invoice.total_cost);
                order.unit_price = unit_price;
                order.items = invoice.items.clone();

                Ok(order.clone())
            })
            .await
    }

    /// Admin override of a single counter or threshold field
    pub async fn manual_adjust(
        &self,
        doctor_id: Uuid,
        field: StockField,
        value: i64,
        actor: &str,
    ) -> AppResult<Doctor> {
        validation::validate_non_negative_quantity(value).map_err(|msg| AppError::Validation {
            field: "value".to_string(),
            message: msg.to_string(),
            message_es: "El valor no puede ser negativo".to_string(),
        })?;

        let actor = actor.to_string();
        self.store
            .mutate(move |store| {
                let doctor = store
                    .doctor_mut(doctor_id)
                    .ok_or_else(|| AppError::NotFound("Doctor".to_string()))?;

                let previous = match field {
                    StockField::CounterStock => {
                        std::mem::replace(&mut doctor.counter_stock, value)
                    }
                    StockField::WarehouseStock => {
                        std::mem::replace(&mut doctor.warehouse_stock, value)
                    }
                    StockField::PadsOnHand => std::mem::replace(&mut doctor.pads_on_hand, value),
                    StockField::CounterMinimum => {
                        let merged = shared::models::Thresholds {
                            minimum: value,
                            ideal: doctor.counter_thresholds.ideal,
                        };
                        Self::check_thresholds(merged)?;
                        std::mem::replace(&mut doctor.counter_thresholds, merged).minimum
                    }
                    StockField::CounterIdeal => {
                        let merged = shared::models::Thresholds {
                            minimum: doctor.counter_thresholds.minimum,
                            ideal: value,
                        };
                        Self::check_thresholds(merged)?;
                        std::mem::replace(&mut doctor.counter_thresholds, merged).ideal
                    }
                    StockField::WarehouseMinimum => {
                        let merged = shared::models::Thresholds {
                            minimum: value,
                            ideal: doctor.warehouse_thresholds.ideal,
                        };
                        Self::check_thresholds(merged)?;
                        std::mem::replace(&mut doctor.warehouse_thresholds, merged).minimum
                    }
                    StockField::WarehouseIdeal => {
                        let merged = shared::models::Thresholds {
                            minimum: doctor.warehouse_thresholds.minimum,
                            ideal: value,
                        };
                        Self::check_thresholds(merged)?;
                        std::mem::replace(&mut doctor.warehouse_thresholds, merged).ideal
                    }
                };
                let updated = doctor.clone();

                store.push_log(MovementLog::new(
                    MovementKind::ManualAdjust,
                    (value - previous).abs(),
                    actor.as_str(),
                    format!(
                        "Ajuste manual: {} ({} de {} a {})",
                        updated.name,
                        field.label(),
                        previous,
                        value
                    ),
                    field.location(),
                ));

                Ok(updated)
            })
            .await
    }

    fn check_thresholds(merged: shared::models::Thresholds) -> AppResult<()> {
        validation::validate_thresholds(merged).map_err(|msg| AppError::Validation {
            field: "thresholds".to_string(),
            message: msg.to_string(),
            message_es: "Configuración de stock inválida".to_string(),
        })
    }
}
