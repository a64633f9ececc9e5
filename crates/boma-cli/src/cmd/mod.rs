//! CLI command handlers.

pub mod board;
pub mod check;
pub mod create;
pub mod list;
pub mod stats;

use boma_core::backend::Backend;
use boma_core::error::StoreError;
use boma_core::store::remote::RemoteStore;

use crate::output::{CliError, OutputMode, render_error};

/// Render a store error and bail with it.
pub(crate) fn fail<T>(output: OutputMode, err: &StoreError) -> anyhow::Result<T> {
    render_error(output, &CliError::from(err))?;
    anyhow::bail!("{err}")
}

/// Open the process-wide backend handle wrapped in the remote record store,
/// rendering any configuration failure before bailing.
pub(crate) fn open_remote(output: OutputMode) -> anyhow::Result<RemoteStore<'static>> {
    match Backend::shared() {
        Ok(backend) => Ok(RemoteStore::new(backend)),
        Err(err) => fail(output, &err),
    }
}
