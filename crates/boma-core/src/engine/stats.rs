use serde::Serialize;

use crate::model::project::{Project, Status};

/// Summary tiles over the full record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub projects: usize,
    pub total_budget: u64,
    pub active: usize,
    pub completed: usize,
}

/// Reduce the record set to its summary tiles. Empty input yields zeros.
#[must_use]
pub fn aggregate(records: &[Project]) -> Totals {
    let mut totals = Totals::default();
    for record in records {
        totals.projects += 1;
        totals.total_budget = totals.total_budget.saturating_add(record.budget);
        match record.status {
            Status::Active => totals.active += 1,
            Status::Completed => totals.completed += 1,
            Status::Planned | Status::OnHold => {}
        }
    }
    totals
}
