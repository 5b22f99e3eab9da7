//! HTTP handlers for stock ledger operations

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use shared::models::Doctor;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::ledger::{StockField, TransferRequest};
use crate::services::LedgerService;
use crate::AppState;

#[derive(Deserialize)]
pub struct DistributeRequest {
    pub quantity: i64,
}

#[derive(Deserialize)]
pub struct BatchTransferRequest {
    pub transfers: Vec<TransferRequest>,
}

#[derive(Deserialize)]
pub struct ManualAdjustRequest {
    pub doctor_id: Uuid,
    pub field: StockField,
    pub value: i64,
}

/// Hand pads from the counter to a patient
pub async fn distribute_to_patient(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(doctor_id): Path<Uuid>,
    Json(body): Json<DistributeRequest>,
) -> AppResult<Json<Doctor>> {
    let service = LedgerService::new(state.store.clone());
    let doctor = service
        .distribute_to_patient(doctor_id, body.quantity, &current_user.0.name)
        .await?;
    Ok(Json(doctor))
}

/// Apply a batch of warehouse-to-counter transfers
pub async fn transfer_to_counter(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<BatchTransferRequest>,
) -> AppResult<Json<Vec<Doctor>>> {
    let service = LedgerService::new(state.store.clone());
    let updated = service
        .transfer_to_counter(&body.transfers, &current_user.0.name)
        .await?;
    Ok(Json(updated))
}

/// Admin override of a counter or threshold field
pub async fn manual_adjust(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<ManualAdjustRequest>,
) -> AppResult<Json<Doctor>> {
    let service = LedgerService::new(state.store.clone());
    let doctor = service
        .manual_adjust(body.doctor_id, body.field, body.value, &current_user.0.name)
        .await?;
    Ok(Json(doctor))
}
