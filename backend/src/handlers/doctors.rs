//! HTTP handlers for the doctor registry

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use shared::models::Doctor;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::doctor::{CreateDoctorInput, UpdateDoctorInput};
use crate::services::DoctorService;
use crate::AppState;

/// List the roster
pub async fn list_doctors(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<Doctor>>> {
    let service = DoctorService::new(state.store.clone());
    Ok(Json(service.list().await))
}

/// Register a doctor
pub async fn create_doctor(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Json(input): Json<CreateDoctorInput>,
) -> AppResult<Json<Doctor>> {
    let service = DoctorService::new(state.store.clone());
    let doctor = service.create(input).await?;
    Ok(Json(doctor))
}

/// Get one doctor
pub async fn get_doctor(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(doctor_id): Path<Uuid>,
) -> AppResult<Json<Doctor>> {
    let service = DoctorService::new(state.store.clone());
    let doctor = service.get(doctor_id).await?;
    Ok(Json(doctor))
}

/// Update identity or thresholds
pub async fn update_doctor(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(doctor_id): Path<Uuid>,
    Json(input): Json<UpdateDoctorInput>,
) -> AppResult<Json<Doctor>> {
    let service = DoctorService::new(state.store.clone());
    let doctor = service.update(doctor_id, input).await?;
    Ok(Json(doctor))
}

/// Remove a doctor from the roster
pub async fn delete_doctor(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(doctor_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = DoctorService::new(state.store.clone());
    service.remove(doctor_id).await?;
    Ok(Json(()))
}
