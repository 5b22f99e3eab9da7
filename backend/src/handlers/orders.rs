//! HTTP handlers for purchase orders

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use shared::models::{OrderStatus, PurchaseOrder};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::ledger::ReceiveInvoice;
use crate::services::order::CreateOrderInput;
use crate::services::{LedgerService, OrderService};
use crate::AppState;

#[derive(Deserialize)]
pub struct OrderListQuery {
    pub status: Option<OrderStatus>,
}

/// List orders, optionally by status
pub async fn list_orders(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<Vec<PurchaseOrder>>> {
    let service = OrderService::new(state.store.clone());
    Ok(Json(service.list(query.status).await))
}

/// Create a PENDING order
pub async fn create_order(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateOrderInput>,
) -> AppResult<Json<PurchaseOrder>> {
    let service = OrderService::new(state.store.clone());
    let order = service.create(input, &current_user.0.name).await?;
    Ok(Json(order))
}

/// Get one order
pub async fn get_order(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<PurchaseOrder>> {
    let service = OrderService::new(state.store.clone());
    let order = service.get(order_id).await?;
    Ok(Json(order))
}

/// Complete a PENDING order with the received invoice
pub async fn receive_order(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(order_id): Path<Uuid>,
    Json(invoice): Json<ReceiveInvoice>,
) -> AppResult<Json<PurchaseOrder>> {
    let service = LedgerService::new(state.store.clone());
    let order = service
        .receive_purchase_order(order_id, invoice, &current_user.0.name)
        .await?;
    Ok(Json(order))
}
