//! Terminal dashboard.
//!
//! A full-screen view over the project collection:
//!
//! - [`dashboard::Dashboard`] — summary tiles, search, status filter, and
//!   the cards/table toggle.
//! - [`create_dialog::CreateDialog`] — modal form driving the create
//!   workflow.

pub mod create_dialog;
pub mod dashboard;

use anyhow::Result;
use boma_core::store::RecordStore;

/// Run the dashboard until the user quits.
pub fn run(store: &dyn RecordStore) -> Result<()> {
    let mut terminal = ratatui::init();
    let result = dashboard::Dashboard::new(store).run(&mut terminal);
    ratatui::restore();
    result
}
