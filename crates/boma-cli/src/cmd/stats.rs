//! `boma stats` — summary tiles over the full collection.

use boma_core::engine::currency::format_ugx;
use boma_core::engine::stats::{Totals, aggregate};
use boma_core::store::RecordStore;
use clap::Args;
use serde::Serialize;
use std::io::Write;

use crate::output::{OutputMode, render};

/// Arguments for `boma stats`.
#[derive(Args, Debug, Default)]
pub struct StatsArgs {}

/// Report payload for `boma stats`.
#[derive(Debug, Serialize)]
pub struct StatsReport {
    #[serde(flatten)]
    pub totals: Totals,
    pub total_budget_ugx: String,
}

pub fn run_stats(_args: &StatsArgs, output: OutputMode) -> anyhow::Result<()> {
    let store = super::open_remote(output)?;
    let records = match store.list_all() {
        Ok(records) => records,
        Err(err) => return super::fail(output, &err),
    };

    let totals = aggregate(&records);
    let report = StatsReport {
        totals,
        total_budget_ugx: format_ugx(totals.total_budget),
    };
    render(output, &report, |report, w| render_stats_human(report, w))
}

fn render_stats_human(report: &StatsReport, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "Constituency projects")?;
    writeln!(w, "  projects:   {}", report.totals.projects)?;
    writeln!(w, "  active:     {}", report.totals.active)?;
    writeln!(w, "  completed:  {}", report.totals.completed)?;
    writeln!(w, "  budget:     {}", report.total_budget_ugx)
}

#[cfg(test)]
mod tests {
    use super::{StatsReport, render_stats_human};
    use boma_core::engine::stats::Totals;

    #[test]
    fn human_report_lists_all_tiles() {
        let report = StatsReport {
            totals: Totals {
                projects: 12,
                total_budget: 1_200_000_000,
                active: 4,
                completed: 3,
            },
            total_budget_ugx: "UGX 1.2B".into(),
        };
        let mut buf = Vec::new();
        render_stats_human(&report, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("projects:   12"));
        assert!(text.contains("UGX 1.2B"));
    }

    #[test]
    fn json_report_flattens_the_totals() {
        let report = StatsReport {
            totals: Totals {
                projects: 2,
                total_budget: 999,
                active: 1,
                completed: 0,
            },
            total_budget_ugx: "UGX 999".into(),
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["projects"], 2);
        assert_eq!(value["total_budget"], 999);
        assert_eq!(value["total_budget_ugx"], "UGX 999");
    }
}
