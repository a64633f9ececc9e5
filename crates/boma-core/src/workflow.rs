//! Create-form workflow.
//!
//! The form moves `Idle -> Editing -> Submitting`, then back to `Idle` on
//! success (draft reset to defaults) or back to `Editing` on failure with
//! the error surfaced. The guard runs before any store call; a draft that
//! fails it never generates a write, and the failure is always reported —
//! there is no silent no-op.

use crate::model::project::ProjectDraft;
use crate::store::RecordStore;

/// Where the create form currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowState {
    /// Form closed; no draft held.
    #[default]
    Idle,
    /// Form open, draft mutable.
    Editing,
    /// Create call in flight.
    Submitting,
}

/// State machine behind the create form.
#[derive(Debug, Default)]
pub struct CreateFlow {
    state: FlowState,
    draft: ProjectDraft,
    error: Option<String>,
}

impl CreateFlow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> FlowState {
        self.state
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state != FlowState::Idle
    }

    #[must_use]
    pub fn draft(&self) -> &ProjectDraft {
        &self.draft
    }

    /// Mutable draft access, available only while editing.
    pub fn draft_mut(&mut self) -> Option<&mut ProjectDraft> {
        (self.state == FlowState::Editing).then_some(&mut self.draft)
    }

    /// The message surfaced by the last failed guard or store call.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Open the form with a fresh default draft. A form that is already open
    /// is left untouched.
    pub fn open(&mut self) {
        if self.state == FlowState::Idle {
            self.draft = ProjectDraft::default();
            self.error = None;
            self.state = FlowState::Editing;
        }
    }

    /// Close the form and discard the draft.
    pub fn cancel(&mut self) {
        if self.state == FlowState::Editing {
            *self = Self::default();
        }
    }

    /// Run the guard, then the store call. Returns the new record's id on
    /// success; on any failure the form stays open with the error surfaced
    /// and nothing is retried.
    pub fn submit(&mut self, store: &dyn RecordStore) -> Option<String> {
        if self.state != FlowState::Editing {
            return None;
        }
        if let Err(err) = self.draft.validate() {
            self.error = Some(err.to_string());
            return None;
        }

        self.state = FlowState::Submitting;
        match store.create(&self.draft) {
            Ok(id) => {
                *self = Self::default();
                Some(id)
            }
            Err(err) => {
                tracing::warn!(%err, "project create failed");
                self.error = Some(format!("{err}. {}", err.suggestion()));
                self.state = FlowState::Editing;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CreateFlow, FlowState};
    use crate::error::StoreError;
    use crate::model::project::{Project, ProjectDraft};
    use crate::store::RecordStore;
    use crate::store::memory::MemoryStore;

    /// Store that rejects every write, for failure-path tests.
    struct RejectingStore;

    impl RecordStore for RejectingStore {
        fn list_all(&self) -> Result<Vec<Project>, StoreError> {
            Ok(Vec::new())
        }

        fn create(&self, _draft: &ProjectDraft) -> Result<String, StoreError> {
            Err(StoreError::WriteRejected {
                status: 403,
                reason: "Forbidden".into(),
            })
        }
    }

    fn fill_valid(flow: &mut CreateFlow) {
        let draft = flow.draft_mut().expect("editing");
        draft.name = "Borehole A".into();
        draft.constituency = "Kawempe North".into();
        draft.budget = 5_000_000;
        draft.end = "2025-12-31".into();
    }

    #[test]
    fn starts_idle_with_no_draft_access() {
        let mut flow = CreateFlow::new();
        assert_eq!(flow.state(), FlowState::Idle);
        assert!(!flow.is_open());
        assert!(flow.draft_mut().is_none());
    }

    #[test]
    fn open_edit_cancel_discards_the_draft() {
        let mut flow = CreateFlow::new();
        flow.open();
        assert_eq!(flow.state(), FlowState::Editing);
        fill_valid(&mut flow);

        flow.cancel();
        assert_eq!(flow.state(), FlowState::Idle);

        flow.open();
        assert!(flow.draft().name.is_empty());
    }

    #[test]
    fn reopening_an_open_form_keeps_the_draft() {
        let mut flow = CreateFlow::new();
        flow.open();
        fill_valid(&mut flow);
        flow.open();
        assert_eq!(flow.draft().name, "Borehole A");
    }

    #[test]
    fn failed_guard_surfaces_a_message_and_writes_nothing() {
        let store = MemoryStore::new();
        let mut flow = CreateFlow::new();
        flow.open();
        fill_valid(&mut flow);
        flow.draft_mut().expect("editing").budget = 0;

        assert!(flow.submit(&store).is_none());
        assert_eq!(flow.state(), FlowState::Editing);
        assert!(flow.error().expect("surfaced").contains("budget"));
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn successful_submit_closes_and_resets() {
        let store = MemoryStore::new();
        let mut flow = CreateFlow::new();
        flow.open();
        fill_valid(&mut flow);

        let id = flow.submit(&store).expect("created");
        assert_eq!(flow.state(), FlowState::Idle);
        assert!(flow.error().is_none());

        let records = store.list_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, id);

        flow.open();
        assert!(flow.draft().name.is_empty());
    }

    #[test]
    fn rejected_write_returns_to_editing_with_the_error() {
        let mut flow = CreateFlow::new();
        flow.open();
        fill_valid(&mut flow);

        assert!(flow.submit(&RejectingStore).is_none());
        assert_eq!(flow.state(), FlowState::Editing);
        assert!(flow.error().expect("surfaced").contains("403"));
        assert_eq!(flow.draft().name, "Borehole A");
    }

    #[test]
    fn submit_while_idle_is_inert() {
        let store = MemoryStore::new();
        let mut flow = CreateFlow::new();
        assert!(flow.submit(&store).is_none());
        assert!(store.list_all().unwrap().is_empty());
    }
}
