//! Alert and aggregation tests
//!
//! Totals, the below-minimum boundary, the union semantics of the alert
//! count, and the pre-filled replenishment drafts.

use recetario_backend::services::ledger::StockField;
use recetario_backend::services::{AlertService, LedgerService};
use recetario_backend::store::{Store, StoreHandle};
use shared::models::{Doctor, Thresholds};

fn doctor_with(
    name: &str,
    counter: i64,
    min_counter: i64,
    ideal_counter: i64,
    warehouse: i64,
    min_warehouse: i64,
    ideal_warehouse: i64,
) -> Doctor {
    let mut d = Doctor::new(
        name,
        "Clinica",
        Thresholds { minimum: min_counter, ideal: ideal_counter },
        Thresholds { minimum: min_warehouse, ideal: ideal_warehouse },
    );
    d.counter_stock = counter;
    d.warehouse_stock = warehouse;
    d
}

fn handle_with(doctors: Vec<Doctor>) -> StoreHandle {
    let store = Store {
        doctors,
        ..Store::default()
    };
    StoreHandle::ephemeral(store)
}

#[tokio::test]
async fn test_dashboard_totals_sum_the_roster() {
    let handle = handle_with(vec![
        doctor_with("A", 3, 2, 5, 12, 5, 150),
        doctor_with("B", 1, 2, 5, 80, 5, 150),
    ]);

    let metrics = AlertService::new(handle).dashboard().await;
    assert_eq!(metrics.total_counter, 4);
    assert_eq!(metrics.total_warehouse, 92);
}

#[tokio::test]
async fn test_alert_count_counts_each_doctor_once() {
    // B is low at the counter, C is low in the warehouse
    let handle = handle_with(vec![
        doctor_with("B", 1, 2, 5, 50, 5, 150),
        doctor_with("C", 5, 2, 5, 0, 5, 150),
    ]);

    let metrics = AlertService::new(handle).dashboard().await;
    assert_eq!(metrics.alert_count, 2);
    assert_eq!(metrics.below_minimum_counter.len(), 1);
    assert_eq!(metrics.below_minimum_warehouse.len(), 1);
}

#[tokio::test]
async fn test_doctor_low_in_both_locations_is_not_double_counted() {
    let handle = handle_with(vec![
        doctor_with("A", 0, 2, 5, 0, 5, 150),
        doctor_with("B", 5, 2, 5, 50, 5, 150),
    ]);

    let metrics = AlertService::new(handle).dashboard().await;
    // A appears in both lists but counts once
    assert_eq!(metrics.below_minimum_counter.len(), 1);
    assert_eq!(metrics.below_minimum_warehouse.len(), 1);
    assert_eq!(metrics.alert_count, 1);
}

#[tokio::test]
async fn test_below_minimum_boundary_flips_at_the_threshold() {
    let low = doctor_with("A", 1, 2, 5, 50, 5, 150);
    let id = low.id;
    let handle = handle_with(vec![low]);
    let alerts = AlertService::new(handle.clone());

    let metrics = alerts.dashboard().await;
    assert_eq!(metrics.below_minimum_counter.len(), 1);
    assert_eq!(metrics.below_minimum_counter[0].doctor_id, id);

    // Raising the counter to exactly the minimum clears the alert
    LedgerService::new(handle)
        .manual_adjust(id, StockField::CounterStock, 2, "Admin")
        .await
        .unwrap();
    let metrics = alerts.dashboard().await;
    assert!(metrics.below_minimum_counter.is_empty());
    assert_eq!(metrics.alert_count, 0);
}

#[tokio::test]
async fn test_transfer_draft_prefills_ideal_minus_current() {
    let handle = handle_with(vec![
        doctor_with("A", 1, 2, 5, 50, 5, 150),  // needs 4
        doctor_with("B", 4, 2, 5, 50, 5, 150),  // healthy
    ]);

    let draft = AlertService::new(handle).transfer_draft().await;
    assert_eq!(draft.len(), 1);
    assert_eq!(draft[0].name, "A");
    assert_eq!(draft[0].quantity, 4);
}

#[tokio::test]
async fn test_order_draft_targets_warehouse_ideal() {
    let handle = handle_with(vec![
        doctor_with("A", 5, 2, 5, 3, 5, 150),   // needs 147
        doctor_with("B", 5, 2, 5, 200, 5, 150), // healthy
    ]);

    let draft = AlertService::new(handle).order_draft().await;
    assert_eq!(draft.len(), 1);
    assert_eq!(draft[0].name, "A");
    assert_eq!(draft[0].quantity, 147);
}

#[tokio::test]
async fn test_empty_roster_has_empty_dashboard() {
    let metrics = AlertService::new(handle_with(vec![])).dashboard().await;
    assert_eq!(metrics.total_counter, 0);
    assert_eq!(metrics.total_warehouse, 0);
    assert_eq!(metrics.alert_count, 0);
    assert!(metrics.below_minimum_counter.is_empty());
}
