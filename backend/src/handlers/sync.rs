//! HTTP handlers for sheet sync

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::sync::{PullSummary, PushSummary};
use crate::services::SyncService;
use crate::store::SyncState;
use crate::AppState;

/// Replace the local roster with the sheet's
pub async fn pull_from_sheet(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<PullSummary>> {
    let service = SyncService::new(state.store.clone(), &state.config.sheet)?;
    let summary = service.pull().await?;
    Ok(Json(summary))
}

/// Upload the current roster to the sheet (the force-sync control)
pub async fn push_to_sheet(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<PushSummary>> {
    let service = SyncService::new(state.store.clone(), &state.config.sheet)?;
    let summary = service.push().await?;
    Ok(Json(summary))
}

/// Outcome of the most recent push and pull. Works even before a sheet
/// endpoint is configured.
pub async fn sync_status(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<SyncState>> {
    Ok(Json(state.store.read().await.sync.clone()))
}
