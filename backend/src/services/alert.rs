//! Alert and aggregation service
//!
//! Everything here is recomputed from the roster on every read; at office
//! scale there is nothing worth caching.

use serde::Serialize;
use uuid::Uuid;

use shared::models::Doctor;
use shared::types::StockLocation;
use shared::validation;

use crate::store::StoreHandle;

/// Aggregation service behind the dashboard
#[derive(Clone)]
pub struct AlertService {
    store: StoreHandle,
}

/// A doctor below their configured minimum for one location
#[derive(Debug, Clone, Serialize)]
pub struct LowStockDoctor {
    pub doctor_id: Uuid,
    pub name: String,
    pub stock: i64,
    pub minimum: i64,
    /// Quantity needed to reach the ideal stock for the location
    pub suggested: i64,
}

/// Dashboard metrics
#[derive(Debug, Serialize)]
pub struct DashboardMetrics {
    pub total_counter: i64,
    pub total_warehouse: i64,
    /// Doctors low in at least one location, counted once each
    pub alert_count: usize,
    pub pending_orders: usize,
    pub below_minimum_counter: Vec<LowStockDoctor>,
    pub below_minimum_warehouse: Vec<LowStockDoctor>,
}

/// A pre-filled transfer or order line
#[derive(Debug, Clone, Serialize)]
pub struct DraftItem {
    pub doctor_id: Uuid,
    pub name: String,
    pub quantity: i64,
}

impl AlertService {
    /// Create a new AlertService instance
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// Compute the dashboard metrics from the current roster
    pub async fn dashboard(&self) -> DashboardMetrics {
        let store = self.store.read().await;
        let doctors = &store.doctors;

        DashboardMetrics {
            total_counter: validation::total_stock(doctors, StockLocation::Counter),
            total_warehouse: validation::total_stock(doctors, StockLocation::Warehouse),
            alert_count: validation::alert_count(doctors),
            pending_orders: store.orders.iter().filter(|o| o.is_pending()).count(),
            below_minimum_counter: low_stock_list(doctors, StockLocation::Counter),
            below_minimum_warehouse: low_stock_list(doctors, StockLocation::Warehouse),
        }
    }

    /// Draft for the batch transfer form: every doctor low at the counter,
    /// pre-filled with the quantity needed to reach their ideal
    pub async fn transfer_draft(&self) -> Vec<DraftItem> {
        self.draft(StockLocation::Counter).await
    }

    /// Draft for a new purchase order: every doctor low in the warehouse
    pub async fn order_draft(&self) -> Vec<DraftItem> {
        self.draft(StockLocation::Warehouse).await
    }

    async fn draft(&self, location: StockLocation) -> Vec<DraftItem> {
        let store = self.store.read().await;
        validation::below_minimum(&store.doctors, location)
            .into_iter()
            .map(|d| DraftItem {
                doctor_id: d.id,
                name: d.name.clone(),
                quantity: d.suggested_replenishment(location),
            })
            .filter(|item| item.quantity > 0)
            .collect()
    }
}

fn low_stock_list(doctors: &[Doctor], location: StockLocation) -> Vec<LowStockDoctor> {
    validation::below_minimum(doctors, location)
        .into_iter()
        .map(|d| LowStockDoctor {
            doctor_id: d.id,
            name: d.name.clone(),
            stock: d.stock_at(location),
            minimum: d.thresholds_at(location).minimum,
            suggested: d.suggested_replenishment(location),
        })
        .collect()
}
