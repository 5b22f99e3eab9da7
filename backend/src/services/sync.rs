//! Sheet sync service
//!
//! The sheet is the shared store between sessions; this service moves the
//! roster both ways. A failed push never rolls back local state: the data
//! stays mutated locally and the user retries from the force-sync control.

use serde::Serialize;

use crate::config::SheetConfig;
use crate::error::AppResult;
use crate::external::SheetClient;
use crate::store::{StoreHandle, SyncOutcome, SyncState};

/// Sync orchestration over the sheet endpoint
#[derive(Clone)]
pub struct SyncService {
    store: StoreHandle,
    client: SheetClient,
}

/// Result of a pull
#[derive(Debug, Serialize)]
pub struct PullSummary {
    pub imported: usize,
}

/// Result of a push
#[derive(Debug, Serialize)]
pub struct PushSummary {
    pub uploaded: usize,
}

impl SyncService {
    /// Create a sync service; fails when no sheet endpoint is configured
    pub fn new(store: StoreHandle, config: &SheetConfig) -> AppResult<Self> {
        Ok(Self {
            client: SheetClient::new(config)?,
            store,
        })
    }

    /// Replace the local roster with the sheet's. Orders and the movement
    /// log are local-only and untouched.
    pub async fn pull(&self) -> AppResult<PullSummary> {
        match self.client.fetch_roster().await {
            Ok(doctors) => {
                let imported = doctors.len();
                self.store
                    .mutate(|store| {
                        store.doctors = doctors;
                        store.sync.last_pull =
                            Some(SyncOutcome::success(format!("{} doctors imported", imported)));
                    })
                    .await;
                Ok(PullSummary { imported })
            }
            Err(e) => {
                self.store
                    .mutate(|store| {
                        store.sync.last_pull = Some(SyncOutcome::failure(e.to_string()));
                    })
                    .await;
                Err(e)
            }
        }
    }

    /// Upload the current roster to the sheet
    pub async fn push(&self) -> AppResult<PushSummary> {
        let doctors = self.store.read().await.doctors.clone();

        match self.client.push_roster(&doctors).await {
            Ok(()) => {
                self.store
                    .mutate(|store| {
                        store.sync.last_push = Some(SyncOutcome::success(format!(
                            "{} doctors uploaded",
                            doctors.len()
                        )));
                    })
                    .await;
                Ok(PushSummary {
                    uploaded: doctors.len(),
                })
            }
            Err(e) => {
                self.store
                    .mutate(|store| {
                        store.sync.last_push = Some(SyncOutcome::failure(e.to_string()));
                    })
                    .await;
                Err(e)
            }
        }
    }

    /// Outcome and time of the most recent push and pull
    pub async fn status(&self) -> SyncState {
        self.store.read().await.sync.clone()
    }
}
