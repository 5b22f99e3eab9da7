//! Error handling for the Recetario Stock Service
//!
//! Provides consistent error responses in Spanish and English

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authorization errors
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_es: String,
    },

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Business logic errors
    #[error("Insufficient stock for {doctor}: requested {requested}, available {available}")]
    InsufficientStock {
        doctor: String,
        requested: i64,
        available: i64,
    },

    #[error("Transfer exceeds warehouse stock for {doctor}: requested {requested}, available {available}")]
    OverCommit {
        doctor: String,
        requested: i64,
        available: i64,
    },

    #[error("Order has no items")]
    EmptyOrder,

    #[error("Order {0} was already completed")]
    AlreadyCompleted(String),

    // External service errors
    #[error("Sheet sync failed: {0}")]
    SheetSyncFailure(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_es: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail {
                    code: "UNAUTHORIZED".to_string(),
                    message_en: msg.clone(),
                    message_es: "No autorizado".to_string(),
                    field: None,
                },
            ),
            AppError::InsufficientPermissions => (
                StatusCode::FORBIDDEN,
                ErrorDetail {
                    code: "INSUFFICIENT_PERMISSIONS".to_string(),
                    message_en: "You do not have permission to perform this action".to_string(),
                    message_es: "No tiene permisos para realizar esta acción".to_string(),
                    field: None,
                },
            ),
            AppError::Validation {
                field,
                message,
                message_es,
            } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: message.clone(),
                    message_es: message_es.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message_en: format!("{} not found", resource),
                    message_es: format!("No se encontró {}", resource),
                    field: None,
                },
            ),
            AppError::InsufficientStock {
                doctor,
                requested,
                available,
            } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "INSUFFICIENT_STOCK".to_string(),
                    message_en: format!(
                        "Insufficient counter stock for {}: requested {}, available {}",
                        doctor, requested, available
                    ),
                    message_es: format!(
                        "Stock insuficiente en Planta Baja para {}: solicitado {}, disponible {}",
                        doctor, requested, available
                    ),
                    field: None,
                },
            ),
            AppError::OverCommit {
                doctor,
                requested,
                available,
            } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "OVER_COMMIT".to_string(),
                    message_en: format!(
                        "Transfer exceeds warehouse stock for {}: requested {}, available {}",
                        doctor, requested, available
                    ),
                    message_es: format!(
                        "El traslado supera el stock de Depósito para {}: solicitado {}, disponible {}",
                        doctor, requested, available
                    ),
                    field: None,
                },
            ),
            AppError::EmptyOrder => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "EMPTY_ORDER".to_string(),
                    message_en: "An order needs at least one item".to_string(),
                    message_es: "El pedido necesita al menos un médico".to_string(),
                    field: Some("items".to_string()),
                },
            ),
            AppError::AlreadyCompleted(order_id) => (
                StatusCode::CONFLICT,
                ErrorDetail {
                    code: "ALREADY_COMPLETED".to_string(),
                    message_en: format!("Order {} was already completed", order_id),
                    message_es: format!("El pedido {} ya fue recibido", order_id),
                    field: None,
                },
            ),
            AppError::SheetSyncFailure(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "SHEET_SYNC_FAILURE".to_string(),
                    message_en: format!("Sheet sync failed: {}", msg),
                    message_es: format!("Falló la sincronización con la planilla: {}", msg),
                    field: None,
                },
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "CONFIGURATION_ERROR".to_string(),
                    message_en: format!("Configuration error: {}", msg),
                    message_es: format!("Error de configuración: {}", msg),
                    field: None,
                },
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message_en: msg.clone(),
                    message_es: "Error interno del servidor".to_string(),
                    field: None,
                },
            ),
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message_en: "An internal server error occurred".to_string(),
                    message_es: "Error interno del servidor".to_string(),
                    field: None,
                },
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
