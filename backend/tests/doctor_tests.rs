//! Doctor registry tests

use uuid::Uuid;

use recetario_backend::error::AppError;
use recetario_backend::services::doctor::{CreateDoctorInput, UpdateDoctorInput};
use recetario_backend::services::ledger::ReceiveInvoice;
use recetario_backend::services::order::CreateOrderInput;
use recetario_backend::services::{DoctorService, LedgerService, MovementService, OrderService};
use recetario_backend::store::{Store, StoreHandle};
use shared::models::OrderItem;

use chrono::NaiveDate;
use rust_decimal::Decimal;

fn handle() -> StoreHandle {
    StoreHandle::ephemeral(Store::default())
}

fn create_input(name: &str) -> CreateDoctorInput {
    CreateDoctorInput {
        name: name.to_string(),
        specialty: "Pediatra".to_string(),
        ideal_counter: 5,
        min_counter: 2,
        ideal_warehouse: 150,
        min_warehouse: 5,
    }
}

#[tokio::test]
async fn test_create_assigns_fresh_id_and_zero_stock() {
    let service = DoctorService::new(handle());

    let doctor = service.create(create_input("BENZAL ELISABET")).await.unwrap();
    assert_eq!(doctor.counter_stock, 0);
    assert_eq!(doctor.warehouse_stock, 0);
    assert_eq!(doctor.pads_on_hand, 0);
    assert_eq!(doctor.counter_thresholds.minimum, 2);
    assert_eq!(doctor.warehouse_thresholds.ideal, 150);

    let listed = service.list().await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, doctor.id);
}

#[tokio::test]
async fn test_create_rejects_blank_name() {
    let service = DoctorService::new(handle());
    let err = service.create(create_input("   ")).await.unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));
}

#[tokio::test]
async fn test_create_rejects_ideal_below_minimum() {
    let service = DoctorService::new(handle());
    let mut input = create_input("CABRAL CRISTINA");
    input.ideal_counter = 1; // below min_counter = 2
    assert!(matches!(
        service.create(input).await.unwrap_err(),
        AppError::Validation { .. }
    ));
}

#[tokio::test]
async fn test_create_rejects_negative_thresholds() {
    let service = DoctorService::new(handle());
    let mut input = create_input("CHARIF SILVANA");
    input.min_warehouse = -1;
    assert!(matches!(
        service.create(input).await.unwrap_err(),
        AppError::Validation { .. }
    ));
}

#[tokio::test]
async fn test_update_merges_partial_fields() {
    let service = DoctorService::new(handle());
    let doctor = service.create(create_input("DRUBE JULIO")).await.unwrap();

    let updated = service
        .update(
            doctor.id,
            UpdateDoctorInput {
                specialty: Some("Traumatologo".to_string()),
                ideal_counter: Some(8),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "DRUBE JULIO");
    assert_eq!(updated.specialty, "Traumatologo");
    assert_eq!(updated.counter_thresholds.ideal, 8);
    // untouched fields keep their values
    assert_eq!(updated.counter_thresholds.minimum, 2);
    assert_eq!(updated.warehouse_thresholds.ideal, 150);
}

#[tokio::test]
async fn test_update_validates_merged_thresholds() {
    let service = DoctorService::new(handle());
    let doctor = service.create(create_input("ERAZU JOSE")).await.unwrap();

    // raising only the minimum above the existing ideal must fail
    let err = service
        .update(
            doctor.id,
            UpdateDoctorInput {
                min_counter: Some(9),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));

    // raising both together is fine
    let updated = service
        .update(
            doctor.id,
            UpdateDoctorInput {
                min_counter: Some(9),
                ideal_counter: Some(12),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.counter_thresholds.minimum, 9);
}

#[tokio::test]
async fn test_update_unknown_doctor_is_not_found() {
    let service = DoctorService::new(handle());
    let err = service
        .update(Uuid::new_v4(), UpdateDoctorInput::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_remove_then_get_is_not_found() {
    let service = DoctorService::new(handle());
    let doctor = service.create(create_input("GOMEZ JUAN JOSE")).await.unwrap();

    service.remove(doctor.id).await.unwrap();
    assert!(matches!(
        service.get(doctor.id).await.unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        service.remove(doctor.id).await.unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[tokio::test]
async fn test_remove_keeps_history_but_blocks_pending_receipt() {
    let store = handle();
    let doctors = DoctorService::new(store.clone());
    let orders = OrderService::new(store.clone());
    let ledger = LedgerService::new(store.clone());

    let doctor = doctors.create(create_input("GUIA JUAN CARLOS")).await.unwrap();
    ledger
        .manual_adjust(
            doctor.id,
            recetario_backend::services::ledger::StockField::CounterStock,
            5,
            "Admin",
        )
        .await
        .unwrap();
    ledger
        .distribute_to_patient(doctor.id, 1, "Maria")
        .await
        .unwrap();
    let order = orders
        .create(
            CreateOrderInput {
                items: vec![OrderItem { doctor_id: doctor.id, quantity: 50 }],
            },
            "Admin",
        )
        .await
        .unwrap();

    doctors.remove(doctor.id).await.unwrap();

    // History keeps the dangling id
    let logs = MovementService::new(store.clone()).list(Default::default()).await;
    assert_eq!(logs.len(), 3);

    // Receiving the pending order now fails before any stock moves
    let err = ledger
        .receive_purchase_order(
            order.id,
            ReceiveInvoice {
                invoice_number: "0001-0000009".to_string(),
                supplier: "Imprenta Central".to_string(),
                date_received: NaiveDate::from_ymd_opt(2024, 11, 2).expect("date"),
                total_cost: Decimal::from(3500),
                items: vec![OrderItem { doctor_id: doctor.id, quantity: 50 }],
            },
            "Admin",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
