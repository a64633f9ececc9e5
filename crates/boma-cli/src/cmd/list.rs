//! `boma list` — list project records with filtering.

use boma_core::engine::filter::{self, StatusFilter};
use boma_core::model::project::Project;
use boma_core::store::RecordStore;
use clap::Args;

use crate::output::{CliError, OutputMode, render_error, render_list};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Case-insensitive match against project name or constituency.
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Filter by status: planned, active, completed, on-hold, or all.
    #[arg(long, default_value = "all")]
    pub status: String,
}

pub fn run_list(args: &ListArgs, output: OutputMode) -> anyhow::Result<()> {
    let status: StatusFilter = match args.status.parse() {
        Ok(status) => status,
        Err(err) => {
            render_error(
                output,
                &CliError::with_details(
                    err.to_string(),
                    "Use planned, active, completed, on-hold, or all",
                    "invalid_status",
                ),
            )?;
            anyhow::bail!("{err}");
        }
    };

    let store = super::open_remote(output)?;
    let records = match store.list_all() {
        Ok(records) => records,
        Err(err) => return super::fail(output, &err),
    };

    let view: Vec<&Project> = filter::apply(&records, &args.search, status);
    render_list(&view, output)?;
    if output.is_pretty() {
        println!("{} of {} projects", view.len(), records.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_args_defaults() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: ListArgs,
        }
        let w = Wrapper::parse_from(["test"]);
        assert!(w.args.search.is_empty());
        assert_eq!(w.args.status, "all");
    }

    #[test]
    fn status_values_parse_like_the_filter() {
        assert!("all".parse::<StatusFilter>().is_ok());
        assert!("on-hold".parse::<StatusFilter>().is_ok());
        assert!("stalled".parse::<StatusFilter>().is_err());
    }
}
