//! Record store adapter for the `projects` collection.
//!
//! [`RecordStore`] is the seam between the presentation layer and wherever
//! the records live: [`remote::RemoteStore`] talks to the hosted document
//! store, [`memory::MemoryStore`] backs tests and offline demo runs. Both
//! expose exactly two operations — bulk read and single insert. There is no
//! update or delete.

pub mod memory;
pub mod remote;

use crate::error::StoreError;
use crate::model::project::{Project, ProjectDraft};

/// Name of the collection holding project records.
pub const PROJECTS_COLLECTION: &str = "projects";

/// The two operations the tracker performs against its records.
pub trait RecordStore {
    /// Fetch the full collection. Callers replace their in-memory set
    /// wholesale with the result and must not assume any ordering.
    fn list_all(&self) -> Result<Vec<Project>, StoreError>;

    /// Insert one record built from `draft` with store defaults applied
    /// (`spent = 0`, `progress = 0`, `status = Planned`, `start = now`).
    /// Returns the store-assigned identifier. Not retried on failure.
    fn create(&self, draft: &ProjectDraft) -> Result<String, StoreError>;
}
