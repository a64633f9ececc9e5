//! `boma create` — create a new project record.
//!
//! The guard runs before the backend is even opened, so a bad draft never
//! costs a connection. After a successful insert the full collection is
//! re-fetched and the new size reported; local state is never merged.

use boma_core::error::StoreError;
use boma_core::model::project::{Category, ProjectDraft};
use boma_core::store::RecordStore;
use clap::Args;
use serde::Serialize;
use std::io::Write;

use crate::output::{CliError, OutputMode, render, render_error};

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Project name.
    #[arg(short, long)]
    pub name: String,

    /// Category: infrastructure, education, health, water-sanitation,
    /// youth, or economic.
    #[arg(short, long, default_value = "infrastructure")]
    pub category: String,

    /// Constituency the project is filed under.
    #[arg(long)]
    pub constituency: String,

    /// Budget in UGX; must be greater than zero.
    #[arg(short, long)]
    pub budget: u64,

    /// Planned end date (YYYY-MM-DD).
    #[arg(short, long)]
    pub end: String,

    /// Optional description.
    #[arg(short, long, default_value = "")]
    pub description: String,
}

/// Report payload for `boma create`.
#[derive(Debug, Serialize)]
struct CreateReport {
    id: String,
    projects: usize,
}

pub fn run_create(args: &CreateArgs, output: OutputMode) -> anyhow::Result<()> {
    let category: Category = match args.category.parse() {
        Ok(category) => category,
        Err(err) => {
            render_error(
                output,
                &CliError::with_details(
                    err.to_string(),
                    "Use infrastructure, education, health, water-sanitation, youth, or economic",
                    "invalid_category",
                ),
            )?;
            anyhow::bail!("{err}");
        }
    };

    let draft = ProjectDraft {
        name: args.name.clone(),
        category,
        constituency: args.constituency.clone(),
        budget: args.budget,
        end: args.end.clone(),
        description: args.description.clone(),
    };
    if let Err(err) = draft.validate() {
        return super::fail(output, &StoreError::from(err));
    }

    let store = super::open_remote(output)?;
    let id = match store.create(&draft) {
        Ok(id) => id,
        Err(err) => return super::fail(output, &err),
    };

    // Refresh cycle: trust the latest full read rather than patching locally.
    let records = match store.list_all() {
        Ok(records) => records,
        Err(err) => return super::fail(output, &err),
    };

    let report = CreateReport {
        id,
        projects: records.len(),
    };
    render(output, &report, |report, w: &mut dyn Write| {
        writeln!(
            w,
            "✓ Created project {} ({} on record)",
            report.id, report.projects
        )
    })
}
