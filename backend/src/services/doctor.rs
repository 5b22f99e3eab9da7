//! Doctor registry service

use serde::Deserialize;
use uuid::Uuid;

use shared::models::{Doctor, Thresholds};
use shared::validation;

use crate::error::{AppError, AppResult};
use crate::store::StoreHandle;

/// Registry service for the doctor roster
#[derive(Clone)]
pub struct DoctorService {
    store: StoreHandle,
}

/// Input for registering a doctor
#[derive(Debug, Deserialize)]
pub struct CreateDoctorInput {
    pub name: String,
    pub specialty: String,
    pub ideal_counter: i64,
    pub min_counter: i64,
    pub ideal_warehouse: i64,
    pub min_warehouse: i64,
}

/// Partial update of identity or thresholds. Stock counters change through
/// the ledger, not here.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateDoctorInput {
    pub name: Option<String>,
    pub specialty: Option<String>,
    pub ideal_counter: Option<i64>,
    pub min_counter: Option<i64>,
    pub ideal_warehouse: Option<i64>,
    pub min_warehouse: Option<i64>,
}

impl DoctorService {
    /// Create a new DoctorService instance
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// Register a doctor with zero stock and the given thresholds
    pub async fn create(&self, input: CreateDoctorInput) -> AppResult<Doctor> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Name is required".to_string(),
                message_es: "El nombre es obligatorio".to_string(),
            });
        }

        let counter_thresholds = Thresholds {
            minimum: input.min_counter,
            ideal: input.ideal_counter,
        };
        let warehouse_thresholds = Thresholds {
            minimum: input.min_warehouse,
            ideal: input.ideal_warehouse,
        };
        Self::check_thresholds(counter_thresholds)?;
        Self::check_thresholds(warehouse_thresholds)?;

        let doctor = Doctor::new(
            name,
            input.specialty.trim().to_string(),
            counter_thresholds,
            warehouse_thresholds,
        );

        let created = doctor.clone();
        self.store
            .mutate(move |store| store.doctors.insert(0, doctor))
            .await;

        Ok(created)
    }

    /// Merge the given fields into an existing doctor, validating the
    /// resulting threshold pairs
    pub async fn update(&self, id: Uuid, input: UpdateDoctorInput) -> AppResult<Doctor> {
        self.store
            .mutate(move |store| {
                let doctor = store
                    .doctor_mut(id)
                    .ok_or_else(|| AppError::NotFound("Doctor".to_string()))?;

                let counter_thresholds = Thresholds {
                    minimum: input.min_counter.unwrap_or(doctor.counter_thresholds.minimum),
                    ideal: input.ideal_counter.unwrap_or(doctor.counter_thresholds.ideal),
                };
                let warehouse_thresholds = Thresholds {
                    minimum: input
                        .min_warehouse
                        .unwrap_or(doctor.warehouse_thresholds.minimum),
                    ideal: input
                        .ideal_warehouse
                        .unwrap_or(doctor.warehouse_thresholds.ideal),
                };
                Self::check_thresholds(counter_thresholds)?;
                Self::check_thresholds(warehouse_thresholds)?;

                if let Some(name) = &input.name {
                    let name = name.trim();
                    if name.is_empty() {
                        return Err(AppError::Validation {
                            field: "name".to_string(),
                            message: "Name cannot be empty".to_string(),
                            message_es: "El nombre no puede quedar vacío".to_string(),
                        });
                    }
                    doctor.name = name.to_string();
                }
                if let Some(specialty) = &input.specialty {
                    doctor.specialty = specialty.trim().to_string();
                }
                doctor.counter_thresholds = counter_thresholds;
                doctor.warehouse_thresholds = warehouse_thresholds;

                Ok(doctor.clone())
            })
            .await
    }

    /// Remove a doctor. Movement-log entries and completed order lines keep
    /// the dangling id; pending orders that still reference the doctor fail
    /// at receipt.
    pub async fn remove(&self, id: Uuid) -> AppResult<()> {
        self.store
            .mutate(move |store| {
                let before = store.doctors.len();
                store.doctors.retain(|d| d.id != id);
                if store.doctors.len() == before {
                    return Err(AppError::NotFound("Doctor".to_string()));
                }
                Ok(())
            })
            .await
    }

    pub async fn list(&self) -> Vec<Doctor> {
        self.store.read().await.doctors.clone()
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Doctor> {
        self.store
            .read()
            .await
            .doctor(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Doctor".to_string()))
    }

    fn check_thresholds(thresholds: Thresholds) -> AppResult<()> {
        validation::validate_thresholds(thresholds).map_err(|msg| AppError::Validation {
            field: "thresholds".to_string(),
            message: msg.to_string(),
            message_es: "Configuración de stock inválida".to_string(),
        })
    }
}
