//! Client for the office's Apps-Script sheet endpoint
//!
//! The sheet is the office's only shared persistence: a GET returns the
//! roster as a JSON array of flat records, a POST replaces it. Column names
//! have drifted across prototype generations and numbers sometimes arrive
//! as strings, so every row goes through one normalising adapter that
//! coerces malformed values to 0 instead of failing the whole fetch.

use std::time::Duration;

use reqwest::Client;
use serde_json::{json, Value};
use uuid::Uuid;

use shared::models::{Doctor, Thresholds};

use crate::config::SheetConfig;
use crate::error::{AppError, AppResult};

// Column aliases seen across the sheet's history, canonical name first
const NAME_FIELDS: &[&str] = &["nombre", "name"];
const SPECIALTY_FIELDS: &[&str] = &["especialidad", "specialty"];
const COUNTER_STOCK_FIELDS: &[&str] = &["stock_pb_actual", "stock_pb", "stockPBActual"];
const WAREHOUSE_STOCK_FIELDS: &[&str] =
    &["stock_deposito_actual", "stock_deposito", "stock_dep"];
const ON_HAND_FIELDS: &[&str] = &["entregados", "pads_on_hand"];
const MIN_COUNTER_FIELDS: &[&str] = &["min_pb"];
const IDEAL_COUNTER_FIELDS: &[&str] = &["ideal_pb"];
const MIN_WAREHOUSE_FIELDS: &[&str] = &["min_deposito"];
const IDEAL_WAREHOUSE_FIELDS: &[&str] = &["ideal_deposito"];

/// Sheet endpoint client
#[derive(Clone)]
pub struct SheetClient {
    client: Client,
    endpoint: String,
    retry_attempts: u32,
    retry_delay: Duration,
}

impl SheetClient {
    /// Create a client from configuration. Fails when no endpoint is set.
    pub fn new(config: &SheetConfig) -> AppResult<Self> {
        let endpoint = config
            .endpoint
            .clone()
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| AppError::Configuration("sheet.endpoint is not set".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            retry_attempts: config.retry_attempts,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        })
    }

    /// Fetch and normalise the roster
    pub async fn fetch_roster(&self) -> AppResult<Vec<Doctor>> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| AppError::SheetSyncFailure(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::SheetSyncFailure(format!(
                "GET returned {}",
                response.status()
            )));
        }

        let rows: Vec<Value> = response
            .json()
            .await
            .map_err(|e| AppError::SheetSyncFailure(format!("Invalid JSON: {}", e)))?;

        Ok(rows.iter().map(doctor_from_row).collect())
    }

    /// Upload the full roster. Retries a bounded number of times and
    /// surfaces the last failure; local state is never touched.
    pub async fn push_roster(&self, doctors: &[Doctor]) -> AppResult<()> {
        let payload: Vec<Value> = doctors.iter().map(doctor_to_row).collect();

        let mut last_error = String::new();
        for attempt in 0..=self.retry_attempts {
            if attempt > 0 {
                tokio::time::sleep(self.retry_delay).await;
            }
            match self.client.post(&self.endpoint).json(&payload).send().await {
                Ok(response) if response.status().is_success() => return Ok(()),
                Ok(response) => last_error = format!("POST returned {}", response.status()),
                Err(e) => last_error = e.to_string(),
            }
            tracing::warn!(attempt, "Sheet push attempt failed: {}", last_error);
        }

        Err(AppError::SheetSyncFailure(last_error))
    }
}

/// Normalise one sheet row into the canonical doctor record
pub fn doctor_from_row(row: &Value) -> Doctor {
    let mut doctor = Doctor::new(
        text_field(row, NAME_FIELDS),
        text_field(row, SPECIALTY_FIELDS),
        Thresholds {
            minimum: int_field(row, MIN_COUNTER_FIELDS),
            ideal: int_field(row, IDEAL_COUNTER_FIELDS),
        },
        Thresholds {
            minimum: int_field(row, MIN_WAREHOUSE_FIELDS),
            ideal: int_field(row, IDEAL_WAREHOUSE_FIELDS),
        },
    );
    doctor.id = row_id(row);
    doctor.counter_stock = int_field(row, COUNTER_STOCK_FIELDS);
    doctor.warehouse_stock = int_field(row, WAREHOUSE_STOCK_FIELDS);
    doctor.pads_on_hand = int_field(row, ON_HAND_FIELDS);
    doctor.last_restock_date = row
        .get("ultima_reposicion")
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok());
    doctor
}

/// Serialise a doctor into the sheet's canonical column names
pub fn doctor_to_row(doctor: &Doctor) -> Value {
    json!({
        "id": doctor.id,
        "nombre": doctor.name,
        "especialidad": doctor.specialty,
        "stock_pb_actual": doctor.counter_stock,
        "stock_deposito_actual": doctor.warehouse_stock,
        "entregados": doctor.pads_on_hand,
        "min_pb": doctor.counter_thresholds.minimum,
        "ideal_pb": doctor.counter_thresholds.ideal,
        "min_deposito": doctor.warehouse_thresholds.minimum,
        "ideal_deposito": doctor.warehouse_thresholds.ideal,
        "ultima_reposicion": doctor.last_restock_date,
    })
}

/// Stable id for a row. Sheet ids predate UUIDs ("1", "2", ...), so anything
/// that does not parse is mapped through a name-based UUID, which keeps the
/// same row resolving to the same id on every pull.
fn row_id(row: &Value) -> Uuid {
    let raw = match row.get("id") {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };
    if let Ok(id) = Uuid::parse_str(&raw) {
        return id;
    }
    Uuid::new_v5(&Uuid::NAMESPACE_OID, raw.as_bytes())
}

fn first_field<'a>(row: &'a Value, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| row.get(*name))
}

fn text_field(row: &Value, names: &[&str]) -> String {
    first_field(row, names)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Coerce a numeric cell that may arrive as a number, a numeric string, or
/// garbage. Malformed or negative values become 0.
fn int_field(row: &Value, names: &[&str]) -> i64 {
    let value = match first_field(row, names) {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => match s.trim().parse::<i64>() {
            Ok(n) => Some(n),
            Err(_) => {
                tracing::warn!("Unparseable sheet value {:?} for {:?}, using 0", s, names[0]);
                None
            }
        },
        _ => None,
    };
    value.unwrap_or(0).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_with_canonical_fields() {
        let row = json!({
            "id": "3e1c4aa1-9a39-4a1e-93d2-6f2c8a3cf001",
            "nombre": "AGUDO SARACHAGA LUIS",
            "especialidad": "Otorrinolaringologo",
            "stock_pb_actual": 3,
            "stock_deposito_actual": 12,
            "min_pb": 2,
            "ideal_pb": 5,
            "min_deposito": 5,
            "ideal_deposito": 150,
        });

        let doctor = doctor_from_row(&row);
        assert_eq!(doctor.name, "AGUDO SARACHAGA LUIS");
        assert_eq!(doctor.counter_stock, 3);
        assert_eq!(doctor.warehouse_stock, 12);
        assert_eq!(doctor.counter_thresholds.minimum, 2);
        assert_eq!(doctor.counter_thresholds.ideal, 5);
        assert_eq!(doctor.warehouse_thresholds.ideal, 150);
    }

    #[test]
    fn test_row_with_drifted_field_names() {
        let row = json!({
            "id": "7",
            "name": "ALONSO RODOLFO",
            "specialty": "Dermatologo",
            "stock_pb": "4",
            "stock_dep": "20",
            "min_pb": "2",
            "ideal_pb": "5",
        });

        let doctor = doctor_from_row(&row);
        assert_eq!(doctor.name, "ALONSO RODOLFO");
        assert_eq!(doctor.counter_stock, 4);
        assert_eq!(doctor.warehouse_stock, 20);
        assert_eq!(doctor.counter_thresholds.minimum, 2);
    }

    #[test]
    fn test_numbers_as_strings_are_coerced() {
        let row = json!({ "id": "1", "nombre": "X", "stock_pb_actual": "17" });
        assert_eq!(doctor_from_row(&row).counter_stock, 17);
    }

    #[test]
    fn test_malformed_numbers_default_to_zero() {
        let row = json!({
            "id": "1",
            "nombre": "X",
            "stock_pb_actual": "n/a",
            "stock_deposito_actual": null,
            "min_pb": {},
        });

        let doctor = doctor_from_row(&row);
        assert_eq!(doctor.counter_stock, 0);
        assert_eq!(doctor.warehouse_stock, 0);
        assert_eq!(doctor.counter_thresholds.minimum, 0);
    }

    #[test]
    fn test_negative_values_are_clamped() {
        let row = json!({ "id": "1", "nombre": "X", "stock_pb_actual": -5 });
        assert_eq!(doctor_from_row(&row).counter_stock, 0);
    }

    #[test]
    fn test_non_uuid_ids_stay_stable_across_pulls() {
        let row = json!({ "id": "23", "nombre": "X" });
        let a = doctor_from_row(&row).id;
        let b = doctor_from_row(&row).id;
        assert_eq!(a, b);

        let other = json!({ "id": "24", "nombre": "X" });
        assert_ne!(a, doctor_from_row(&other).id);
    }

    #[test]
    fn test_numeric_ids_match_string_ids() {
        let numeric = json!({ "id": 23, "nombre": "X" });
        let string = json!({ "id": "23", "nombre": "X" });
        assert_eq!(doctor_from_row(&numeric).id, doctor_from_row(&string).id);
    }

    #[test]
    fn test_roundtrip_through_sheet_row() {
        let mut doctor = Doctor::new(
            "GOMEZ JUAN JOSE",
            "Urologo",
            Thresholds { minimum: 2, ideal: 5 },
            Thresholds { minimum: 5, ideal: 150 },
        );
        doctor.counter_stock = 4;
        doctor.warehouse_stock = 80;
        doctor.pads_on_hand = 12;

        let restored = doctor_from_row(&doctor_to_row(&doctor));
        assert_eq!(restored.id, doctor.id);
        assert_eq!(restored.name, doctor.name);
        assert_eq!(restored.counter_stock, 4);
        assert_eq!(restored.warehouse_stock, 80);
        assert_eq!(restored.pads_on_hand, 12);
        assert_eq!(restored.warehouse_thresholds.ideal, 150);
    }
}
