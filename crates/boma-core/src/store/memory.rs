//! In-memory record store for tests and offline demo runs.

use chrono::Utc;
use rand::distributions::{Alphanumeric, DistString};
use std::sync::{Mutex, PoisonError};

use crate::error::StoreError;
use crate::model::project::{Project, ProjectDraft};
use crate::store::RecordStore;

/// Record store holding the collection in process memory.
///
/// Identifiers are assigned at insert time, mirroring the hosted store's
/// behavior; everything is discarded when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<Project>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing record set (fixtures).
    #[must_use]
    pub fn with_records(records: Vec<Project>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    fn assign_id(existing: &[Project]) -> String {
        loop {
            let suffix =
                Alphanumeric.sample_string(&mut rand::thread_rng(), 6).to_ascii_lowercase();
            let id = format!("pr-{suffix}");
            if !existing.iter().any(|record| record.id == id) {
                return id;
            }
        }
    }
}

impl RecordStore for MemoryStore {
    fn list_all(&self) -> Result<Vec<Project>, StoreError> {
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(records.clone())
    }

    fn create(&self, draft: &ProjectDraft) -> Result<String, StoreError> {
        let mut record = Project::from_draft(draft, Utc::now().timestamp_micros())?;
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        record.id = Self::assign_id(&records);
        let id = record.id.clone();
        records.push(record);
        Ok(id)
    }
}
