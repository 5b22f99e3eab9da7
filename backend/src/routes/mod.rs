//! Route definitions for the Recetario Stock Service

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{
    handlers,
    middleware::{require_admin, session_middleware},
    AppState,
};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Distribution surface - the one page both roles can use
        .nest("/distribution", distribution_routes())
        // Admin - doctor registry
        .nest("/doctors", doctor_routes())
        // Admin - ledger operations
        .nest("/stock", stock_routes())
        // Admin - purchase orders
        .nest("/orders", order_routes())
        // Admin - movement log and stats
        .nest("/movements", movement_routes())
        // Admin - dashboard
        .nest("/dashboard", dashboard_routes())
        // Admin - sheet sync
        .nest("/sync", sync_routes())
}

/// Distribution routes (admin and secretary)
fn distribution_routes() -> Router<AppState> {
    Router::new()
        .route("/doctors", get(handlers::list_doctors))
        .route(
            "/doctors/:doctor_id/distribute",
            post(handlers::distribute_to_patient),
        )
        .route_layer(middleware::from_fn(session_middleware))
}

/// Doctor registry routes (admin)
fn doctor_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_doctors).post(handlers::create_doctor))
        .route(
            "/:doctor_id",
            get(handlers::get_doctor)
                .put(handlers::update_doctor)
                .delete(handlers::delete_doctor),
        )
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn(session_middleware))
}

/// Stock ledger routes (admin)
fn stock_routes() -> Router<AppState> {
    Router::new()
        .route("/transfers", post(handlers::transfer_to_counter))
        .route("/adjust", post(handlers::manual_adjust))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn(session_middleware))
}

/// Purchase order routes (admin)
fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_orders).post(handlers::create_order))
        .route("/:order_id", get(handlers::get_order))
        .route("/:order_id/receive", post(handlers::receive_order))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn(session_middleware))
}

/// Movement log routes (admin)
fn movement_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_movements))
        .route("/stats", get(handlers::movement_stats))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn(session_middleware))
}

/// Dashboard routes (admin)
fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_dashboard))
        .route("/transfer-draft", get(handlers::get_transfer_draft))
        .route("/order-draft", get(handlers::get_order_draft))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn(session_middleware))
}

/// Sheet sync routes (admin)
fn sync_routes() -> Router<AppState> {
    Router::new()
        .route("/pull", post(handlers::pull_from_sheet))
        .route("/push", post(handlers::push_to_sheet))
        .route("/status", get(handlers::sync_status))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn(session_middleware))
}
