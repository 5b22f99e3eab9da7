//! HTTP handlers for the Recetario Stock Service

pub mod dashboard;
pub mod doctors;
pub mod movements;
pub mod orders;
pub mod stock;
pub mod sync;

pub use dashboard::*;
pub use doctors::*;
pub use movements::*;
pub use orders::*;
pub use stock::*;
pub use sync::*;
