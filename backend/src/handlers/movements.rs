//! HTTP handlers for the movement log

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use shared::models::MovementKind;
use shared::types::StockLocation;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::movement::{MovementFilter, MovementStats};
use crate::services::MovementService;
use crate::AppState;

#[derive(Deserialize)]
pub struct MovementQuery {
    pub kind: Option<MovementKind>,
    pub location: Option<StockLocation>,
    pub limit: Option<usize>,
    pub format: Option<String>, // "json" or "csv"
}

/// List movement entries, newest first. `?format=csv` downloads the log.
pub async fn list_movements(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<MovementQuery>,
) -> AppResult<impl IntoResponse> {
    let service = MovementService::new(state.store.clone());

    if query.format.as_deref() == Some("csv") {
        let csv = service.export_csv().await?;
        return Ok((
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"movimientos.csv\"",
                ),
            ],
            csv,
        )
            .into_response());
    }

    let filter = MovementFilter {
        kind: query.kind,
        location: query.location,
        limit: query.limit,
    };
    Ok(Json(service.list(filter).await).into_response())
}

/// Aggregates for the stats page
pub async fn movement_stats(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<MovementStats>> {
    let service = MovementService::new(state.store.clone());
    Ok(Json(service.stats().await))
}
