//! In-process store used in offline mode

use super::traits::SubmissionStore;
use crate::state::{NewSubmission, StoredSubmission};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// Keeps inserted submissions in memory for the lifetime of the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<StoredSubmission>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the records; a poisoned lock is logged and recovered
    fn lock(&self) -> MutexGuard<'_, Vec<StoredSubmission>> {
        self.records.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("Memory store lock was poisoned; continuing with its records");
            poisoned.into_inner()
        })
    }

    /// Copy of every stored record, oldest first
    pub fn records(&self) -> Vec<StoredSubmission> {
        self.lock().clone()
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn insert(&self, record: &NewSubmission) -> Result<StoredSubmission> {
        let stored = StoredSubmission {
            id: Some(Uuid::new_v4().to_string()),
            record: record.clone(),
            created_at: Some(Utc::now()),
        };
        self.lock().push(stored.clone());
        Ok(stored)
    }

    fn describe(&self) -> String {
        format!("offline (in-memory, {} kept)", self.lock().len())
    }
}
