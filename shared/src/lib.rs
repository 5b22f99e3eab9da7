//! Shared types and models for the Recetario Stock Service
//!
//! This crate contains the domain types shared between the backend and any
//! future frontend binding: the doctor roster, purchase orders, the movement
//! log, and the pure stock-math helpers the dashboard is built on.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
