//! In-memory application state and its JSON snapshot file
//!
//! All three collections are owned here; order items and log entries refer to
//! doctors by id only. The snapshot is rewritten after every mutation and
//! loaded on startup, so a restart keeps the office's history.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{RwLock, RwLockReadGuard};
use uuid::Uuid;

use shared::models::{Doctor, MovementLog, PurchaseOrder};

/// All application data
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Store {
    pub doctors: Vec<Doctor>,
    pub orders: Vec<PurchaseOrder>,
    /// Newest first
    pub logs: Vec<MovementLog>,

    /// Runtime sync bookkeeping, not part of the snapshot
    #[serde(skip)]
    pub sync: SyncState,
}

/// Outcome of the most recent push/pull against the sheet endpoint
#[derive(Debug, Default, Clone, Serialize)]
pub struct SyncState {
    pub last_push: Option<SyncOutcome>,
    pub last_pull: Option<SyncOutcome>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SyncOutcome {
    pub at: DateTime<Utc>,
    pub ok: bool,
    pub detail: String,
}

impl SyncOutcome {
    pub fn success(detail: impl Into<String>) -> Self {
        Self {
            at: Utc::now(),
            ok: true,
            detail: detail.into(),
        }
    }

    pub fn failure(detail: impl Into<String>) -> Self {
        Self {
            at: Utc::now(),
            ok: false,
            detail: detail.into(),
        }
    }
}

impl Store {
    /// Load the snapshot at `path`, starting empty when the file does not
    /// exist yet or cannot be parsed (a corrupt snapshot is logged and
    /// ignored rather than taking the service down).
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(store) => store,
                Err(e) => {
                    tracing::warn!("Ignoring unreadable snapshot {}: {}", path.display(), e);
                    Store::default()
                }
            },
            Err(_) => Store::default(),
        }
    }

    /// Write the snapshot. Best effort: failures are logged, never fatal.
    pub fn persist(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!("Could not create {}: {}", parent.display(), e);
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(raw) => {
                if let Err(e) = std::fs::write(path, raw) {
                    tracing::warn!("Could not write snapshot {}: {}", path.display(), e);
                }
            }
            Err(e) => tracing::warn!("Could not serialize snapshot: {}", e),
        }
    }

    pub fn doctor(&self, id: Uuid) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id == id)
    }

    pub fn doctor_mut(&mut self, id: Uuid) -> Option<&mut Doctor> {
        self.doctors.iter_mut().find(|d| d.id == id)
    }

    pub fn order(&self, id: Uuid) -> Option<&PurchaseOrder> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn order_mut(&mut self, id: Uuid) -> Option<&mut PurchaseOrder> {
        self.orders.iter_mut().find(|o| o.id == id)
    }

    /// Append an audit entry, newest first
    pub fn push_log(&mut self, entry: MovementLog) {
        self.logs.insert(0, entry);
    }
}

/// Handle the services read and mutate state through
#[derive(Clone)]
pub struct StoreHandle {
    inner: Arc<RwLock<Store>>,
    data_file: Option<PathBuf>,
}

impl StoreHandle {
    pub fn new(store: Store, data_file: Option<PathBuf>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
            data_file,
        }
    }

    /// In-memory handle with no snapshot file
    pub fn ephemeral(store: Store) -> Self {
        Self::new(store, None)
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, Store> {
        self.inner.read().await
    }

    /// Run a mutation under the write lock, then snapshot to disk
    pub async fn mutate<T>(&self, f: impl FnOnce(&mut Store) -> T) -> T {
        let mut guard = self.inner.write().await;
        let out = f(&mut guard);
        if let Some(path) = &self.data_file {
            guard.persist(path);
        }
        out
    }
}
