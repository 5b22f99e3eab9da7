//! Domain models for the Recetario Stock Service

pub mod doctor;
pub mod movement;
pub mod order;
pub mod user;

pub use doctor::*;
pub use movement::*;
pub use order::*;
pub use user::*;
