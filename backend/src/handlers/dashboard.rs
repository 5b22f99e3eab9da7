//! HTTP handlers for the dashboard

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::alert::{DashboardMetrics, DraftItem};
use crate::services::AlertService;
use crate::AppState;

/// Dashboard metrics: totals, alert count and the two low-stock lists
pub async fn get_dashboard(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<DashboardMetrics>> {
    let service = AlertService::new(state.store.clone());
    Ok(Json(service.dashboard().await))
}

/// Pre-filled batch transfer for doctors low at the counter
pub async fn get_transfer_draft(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<DraftItem>>> {
    let service = AlertService::new(state.store.clone());
    Ok(Json(service.transfer_draft().await))
}

/// Pre-filled purchase order for doctors low in the warehouse
pub async fn get_order_draft(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<DraftItem>>> {
    let service = AlertService::new(state.store.clone());
    Ok(Json(service.order_draft().await))
}
