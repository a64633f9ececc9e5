//! `boma check` — verify configuration and probe the backend.
//!
//! Exercises all three capability handles: credentials (auth host), the
//! document store (a full listing of the projects collection), and file
//! storage (object addressing in the configured bucket).

use boma_core::backend::Backend;
use boma_core::store::RecordStore;
use boma_core::store::remote::RemoteStore;
use clap::Args;
use serde::Serialize;
use std::io::Write;

use crate::output::{OutputMode, render};

/// Arguments for `boma check`.
#[derive(Args, Debug, Default)]
pub struct CheckArgs {}

/// Report payload for `boma check`.
#[derive(Debug, Serialize)]
struct CheckReport {
    project_id: String,
    auth_host: String,
    storage_bucket: String,
    sample_object_url: String,
    documents_reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    projects: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    documents_error: Option<String>,
}

pub fn run_check(_args: &CheckArgs, output: OutputMode) -> anyhow::Result<()> {
    let backend = match Backend::shared() {
        Ok(backend) => backend,
        Err(err) => return super::fail(output, &err),
    };

    let store = RemoteStore::new(backend);
    let (projects, documents_error) = match store.list_all() {
        Ok(records) => (Some(records.len()), None),
        Err(err) => (None, Some(format!("{err}. {}", err.suggestion()))),
    };

    let report = CheckReport {
        project_id: backend.config().project_id.clone(),
        auth_host: backend.auth().auth_host().to_string(),
        storage_bucket: backend.storage().bucket().to_string(),
        sample_object_url: backend.storage().object_url("health/ping"),
        documents_reachable: documents_error.is_none(),
        projects,
        documents_error,
    };
    render(output, &report, |report, w| render_check_human(report, w))?;

    if report.documents_reachable {
        Ok(())
    } else {
        anyhow::bail!("document store unreachable")
    }
}

fn render_check_human(report: &CheckReport, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "Backend check for project '{}'", report.project_id)?;
    writeln!(w, "  auth host:      {}", report.auth_host)?;
    writeln!(w, "  storage bucket: {}", report.storage_bucket)?;
    writeln!(w, "  object URLs:    {}", report.sample_object_url)?;
    match (&report.projects, &report.documents_error) {
        (Some(count), _) => writeln!(w, "  documents:      reachable ({count} projects)"),
        (None, Some(error)) => writeln!(w, "  documents:      UNREACHABLE — {error}"),
        (None, None) => writeln!(w, "  documents:      unknown"),
    }
}
