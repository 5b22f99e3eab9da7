//! Movement log service: queries, statistics and CSV export

use serde::{Deserialize, Serialize};

use shared::models::{MovementKind, MovementLog};
use shared::types::StockLocation;

use crate::error::{AppError, AppResult};
use crate::store::StoreHandle;

/// Movement log service
#[derive(Clone)]
pub struct MovementService {
    store: StoreHandle,
}

/// Query filter for the movement list
#[derive(Debug, Default, Deserialize)]
pub struct MovementFilter {
    pub kind: Option<MovementKind>,
    pub location: Option<StockLocation>,
    pub limit: Option<usize>,
}

/// Entry count and total quantity for one movement kind
#[derive(Debug, Serialize)]
pub struct KindSummary {
    pub kind: MovementKind,
    pub entries: usize,
    pub total_quantity: i64,
}

/// Entry count and total quantity for one location
#[derive(Debug, Serialize)]
pub struct LocationSummary {
    pub location: StockLocation,
    pub entries: usize,
    pub total_quantity: i64,
}

/// Aggregates for the stats page
#[derive(Debug, Serialize)]
pub struct MovementStats {
    pub total_entries: usize,
    /// Pads handed to patients overall
    pub distributed_to_patients: i64,
    /// Pads moved from warehouse to counter overall
    pub transferred_to_counter: i64,
    /// Pads received from the print shop overall
    pub purchased: i64,
    pub by_kind: Vec<KindSummary>,
    pub by_location: Vec<LocationSummary>,
}

const ALL_KINDS: [MovementKind; 5] = [
    MovementKind::Purchase,
    MovementKind::TransferToCounter,
    MovementKind::DistributeToPatient,
    MovementKind::OrderCreated,
    MovementKind::ManualAdjust,
];

const ALL_LOCATIONS: [StockLocation; 2] = [StockLocation::Counter, StockLocation::Warehouse];

impl MovementService {
    /// Create a new MovementService instance
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// Movement entries, newest first
    pub async fn list(&self, filter: MovementFilter) -> Vec<MovementLog> {
        let store = self.store.read().await;
        store
            .logs
            .iter()
            .filter(|log| filter.kind.map_or(true, |k| log.kind == k))
            .filter(|log| filter.location.map_or(true, |l| log.location == l))
            .take(filter.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }

    /// Aggregate totals for the stats page
    pub async fn stats(&self) -> MovementStats {
        let store = self.store.read().await;
        let logs = &store.logs;

        let sum_kind = |kind: MovementKind| -> i64 {
            logs.iter()
                .filter(|l| l.kind == kind)
                .map(|l| l.quantity)
                .sum()
        };

        MovementStats {
            total_entries: logs.len(),
            distributed_to_patients: sum_kind(MovementKind::DistributeToPatient),
            transferred_to_counter: sum_kind(MovementKind::TransferToCounter),
            purchased: sum_kind(MovementKind::Purchase),
            by_kind: ALL_KINDS
                .iter()
                .map(|&kind| KindSummary {
                    kind,
                    entries: logs.iter().filter(|l| l.kind == kind).count(),
                    total_quantity: sum_kind(kind),
                })
                .collect(),
            by_location: ALL_LOCATIONS
                .iter()
                .map(|&location| LocationSummary {
                    location,
                    entries: logs.iter().filter(|l| l.location == location).count(),
                    total_quantity: logs
                        .iter()
                        .filter(|l| l.location == location)
                        .map(|l| l.quantity)
                        .sum(),
                })
                .collect(),
        }
    }

    /// Export the whole log as CSV, newest first
    pub async fn export_csv(&self) -> AppResult<String> {
        let store = self.store.read().await;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record([
                "id",
                "timestamp",
                "kind",
                "quantity",
                "actor",
                "description",
                "location",
            ])
            .map_err(|e| AppError::Internal(format!("CSV write failed: {}", e)))?;

        for log in &store.logs {
            writer
                .write_record([
                    log.id.to_string(),
                    log.timestamp.to_rfc3339(),
                    log.kind.as_str().to_string(),
                    log.quantity.to_string(),
                    log.actor.clone(),
                    log.description.clone(),
                    log.location.label_es().to_string(),
                ])
                .map_err(|e| AppError::Internal(format!("CSV write failed: {}", e)))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV write failed: {}", e)))?;
        String::from_utf8(bytes).map_err(|e| AppError::Internal(format!("CSV encoding: {}", e)))
    }
}
