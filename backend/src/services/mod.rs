//! Business logic services for the Recetario Stock Service

pub mod alert;
pub mod doctor;
pub mod ledger;
pub mod movement;
pub mod order;
pub mod sync;

pub use alert::AlertService;
pub use doctor::DoctorService;
pub use ledger::LedgerService;
pub use movement::MovementService;
pub use order::OrderService;
pub use sync::SyncService;
