//! Movement log tests: filtering, stats aggregation and CSV export

use recetario_backend::services::ledger::{StockField, TransferRequest};
use recetario_backend::services::movement::MovementFilter;
use recetario_backend::services::{LedgerService, MovementService};
use recetario_backend::store::{Store, StoreHandle};
use shared::models::{Doctor, MovementKind, Thresholds};
use shared::types::StockLocation;

fn doctor(name: &str, counter: i64, warehouse: i64) -> Doctor {
    let mut d = Doctor::new(
        name,
        "Clinica",
        Thresholds { minimum: 2, ideal: 5 },
        Thresholds { minimum: 5, ideal: 150 },
    );
    d.counter_stock = counter;
    d.warehouse_stock = warehouse;
    d
}

async fn seeded_handle() -> (StoreHandle, uuid::Uuid) {
    let d = doctor("POSSE MARIA VIRGINIA", 5, 20);
    let id = d.id;
    let store = Store {
        doctors: vec![d],
        ..Store::default()
    };
    let handle = StoreHandle::ephemeral(store);

    let ledger = LedgerService::new(handle.clone());
    ledger
        .transfer_to_counter(&[TransferRequest { doctor_id: id, quantity: 4 }], "Admin")
        .await
        .unwrap();
    ledger.distribute_to_patient(id, 2, "Maria").await.unwrap();
    ledger.distribute_to_patient(id, 1, "Maria").await.unwrap();
    ledger
        .manual_adjust(id, StockField::WarehouseStock, 40, "Admin")
        .await
        .unwrap();

    (handle, id)
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let (handle, _) = seeded_handle().await;
    let logs = MovementService::new(handle).list(Default::default()).await;

    assert_eq!(logs.len(), 4);
    assert_eq!(logs[0].kind, MovementKind::ManualAdjust);
    assert_eq!(logs[3].kind, MovementKind::TransferToCounter);
}

#[tokio::test]
async fn test_list_filters_by_kind_and_limit() {
    let (handle, _) = seeded_handle().await;
    let service = MovementService::new(handle);

    let distributions = service
        .list(MovementFilter {
            kind: Some(MovementKind::DistributeToPatient),
            ..Default::default()
        })
        .await;
    assert_eq!(distributions.len(), 2);

    let limited = service
        .list(MovementFilter {
            limit: Some(1),
            ..Default::default()
        })
        .await;
    assert_eq!(limited.len(), 1);
}

#[tokio::test]
async fn test_list_filters_by_location() {
    let (handle, _) = seeded_handle().await;
    let warehouse_only = MovementService::new(handle)
        .list(MovementFilter {
            location: Some(StockLocation::Warehouse),
            ..Default::default()
        })
        .await;
    assert_eq!(warehouse_only.len(), 1);
    assert_eq!(warehouse_only[0].kind, MovementKind::ManualAdjust);
}

#[tokio::test]
async fn test_stats_totals_per_kind() {
    let (handle, _) = seeded_handle().await;
    let stats = MovementService::new(handle).stats().await;

    assert_eq!(stats.total_entries, 4);
    assert_eq!(stats.distributed_to_patients, 3);
    assert_eq!(stats.transferred_to_counter, 4);
    assert_eq!(stats.purchased, 0);

    let distribute = stats
        .by_kind
        .iter()
        .find(|k| k.kind == MovementKind::DistributeToPatient)
        .unwrap();
    assert_eq!(distribute.entries, 2);
    assert_eq!(distribute.total_quantity, 3);
}

#[tokio::test]
async fn test_csv_export_has_header_and_all_rows() {
    let (handle, _) = seeded_handle().await;
    let csv = MovementService::new(handle).export_csv().await.unwrap();

    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 5); // header + 4 entries
    assert!(lines[0].starts_with("id,timestamp,kind,quantity,actor"));
    assert!(csv.contains("DISTRIBUTE_TO_PATIENT"));
    assert!(csv.contains("Planta Baja (PB)"));
}
