//! Adapter over the hosted document store.

use chrono::Utc;

use crate::backend::{Backend, Document};
use crate::error::StoreError;
use crate::model::project::{Project, ProjectDraft};
use crate::store::{PROJECTS_COLLECTION, RecordStore};

/// Record store backed by the hosted platform's document store.
pub struct RemoteStore<'a> {
    backend: &'a Backend,
}

impl<'a> RemoteStore<'a> {
    #[must_use]
    pub fn new(backend: &'a Backend) -> Self {
        Self { backend }
    }

    fn decode(document: Document) -> Result<Project, StoreError> {
        let Document { id, fields } = document;
        let mut project: Project =
            serde_json::from_value(fields).map_err(|err| StoreError::MalformedRecord {
                id: id.clone(),
                reason: err.to_string(),
            })?;
        project.id = id;
        project
            .check()
            .map_err(|reason| StoreError::MalformedRecord {
                id: project.id.clone(),
                reason,
            })?;
        Ok(project)
    }
}

impl RecordStore for RemoteStore<'_> {
    fn list_all(&self) -> Result<Vec<Project>, StoreError> {
        let documents = self.backend.documents().list(PROJECTS_COLLECTION)?;
        let records = documents
            .into_iter()
            .map(Self::decode)
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(count = records.len(), "fetched project collection");
        Ok(records)
    }

    fn create(&self, draft: &ProjectDraft) -> Result<String, StoreError> {
        let record = Project::from_draft(draft, Utc::now().timestamp_micros())?;
        let id = self
            .backend
            .documents()
            .insert(PROJECTS_COLLECTION, record.wire_fields())?;
        tracing::info!(%id, name = %draft.name, "created project record");
        Ok(id)
    }
}
