//! Shared output layer for pretty/text/JSON parity across the CLI commands.
//!
//! Every command handler receives an [`OutputMode`]: pretty output for
//! humans, compact rows for pipes, or JSON for machines.
//!
//! Resolution precedence (highest wins):
//! 1. `--format` / hidden `--json` flag
//! 2. `FORMAT` env var → `"pretty"` | `"text"` | `"json"`
//! 3. Default: pretty if stdout is a TTY, text if piped.

use boma_core::engine::currency::format_ugx;
use boma_core::error::StoreError;
use boma_core::model::project::Project;
use clap::ValueEnum;
use serde::Serialize;
use std::io::{self, IsTerminal, Write};

/// The three output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Human-optimized output (cards, sections).
    Pretty,
    /// Plain rows for pipes and scripts.
    Text,
    /// Machine-readable JSON.
    Json,
}

impl OutputMode {
    /// Returns `true` if pretty output was requested.
    #[must_use]
    pub fn is_pretty(self) -> bool {
        matches!(self, Self::Pretty)
    }
}

/// Core resolution logic, separated from I/O for testability.
fn resolve_output_mode_inner(
    format_flag: Option<OutputMode>,
    json_flag: bool,
    format_env: Option<&str>,
    is_tty: bool,
) -> OutputMode {
    if let Some(mode) = format_flag {
        return mode;
    }
    if json_flag {
        return OutputMode::Json;
    }
    if let Some(value) = format_env {
        match value.to_lowercase().as_str() {
            "json" => return OutputMode::Json,
            "text" => return OutputMode::Text,
            "pretty" => return OutputMode::Pretty,
            _ => {} // unknown value falls through to TTY detection
        }
    }
    if is_tty { OutputMode::Pretty } else { OutputMode::Text }
}

/// Resolve the output mode from CLI flags, environment, and TTY defaults.
#[must_use]
pub fn resolve_output_mode(format_flag: Option<OutputMode>, json_flag: bool) -> OutputMode {
    let env_value = std::env::var("FORMAT").ok();
    let is_tty = io::stdout().is_terminal();
    resolve_output_mode_inner(format_flag, json_flag, env_value.as_deref(), is_tty)
}

/// A structured error with a remediation suggestion and machine code.
#[derive(Debug, Serialize)]
pub struct CliError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl CliError {
    /// Create an error with a suggestion and error code.
    pub fn with_details(
        message: impl Into<String>,
        suggestion: impl Into<String>,
        error_code: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            suggestion: Some(suggestion.into()),
            error_code: Some(error_code.into()),
        }
    }
}

impl From<&StoreError> for CliError {
    fn from(err: &StoreError) -> Self {
        Self {
            message: err.to_string(),
            suggestion: Some(err.suggestion().to_string()),
            error_code: Some(err.error_code().to_string()),
        }
    }
}

/// Render a serializable value to stdout in the requested format.
///
/// In JSON mode the value is serialized with `serde_json`; otherwise the
/// `human_fn` closure produces the text output.
pub fn render<T: Serialize>(
    mode: OutputMode,
    value: &T,
    human_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut out, value)?;
            writeln!(out)?;
        }
        OutputMode::Pretty | OutputMode::Text => human_fn(value, &mut out)?,
    }
    Ok(())
}

/// Render an error to stderr in the requested format.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    match mode {
        OutputMode::Json => {
            let wrapper = serde_json::json!({ "error": error });
            serde_json::to_writer_pretty(&mut out, &wrapper)?;
            writeln!(out)?;
        }
        OutputMode::Pretty | OutputMode::Text => {
            writeln!(out, "error: {}", error.message)?;
            if let Some(ref suggestion) = error.suggestion {
                writeln!(out, "  suggestion: {suggestion}")?;
            }
        }
    }
    Ok(())
}

/// Trait implemented by CLI result types renderable in all modes.
pub trait Renderable {
    /// Render for human consumption.
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()>;

    /// Render as a self-contained JSON object.
    fn render_json(&self, w: &mut dyn Write) -> io::Result<()>;

    /// Render as a single text row, columns matching [`table_headers`].
    ///
    /// [`table_headers`]: Renderable::table_headers
    fn render_table(&self, w: &mut dyn Write) -> io::Result<()>;

    /// Column headers for text mode.
    fn table_headers() -> &'static [&'static str]
    where
        Self: Sized;
}

/// Render a list of [`Renderable`] items to stdout.
///
/// JSON mode wraps the items in an array; text mode prints a header row
/// followed by one row per item; pretty mode renders items sequentially.
pub fn render_list<R: Renderable>(items: &[&R], mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match mode {
        OutputMode::Pretty => {
            for item in items {
                item.render_human(&mut out)?;
            }
        }
        OutputMode::Text => {
            if !items.is_empty() {
                writeln!(out, "{}", R::table_headers().join("\t"))?;
            }
            for item in items {
                item.render_table(&mut out)?;
            }
        }
        OutputMode::Json => {
            write!(out, "[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(out, ",")?;
                }
                writeln!(out)?;
                item.render_json(&mut out)?;
            }
            writeln!(out, "\n]")?;
        }
    }
    Ok(())
}

impl Renderable for Project {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{}  [{}]", self.name, self.status)?;
        writeln!(w, "  {} · {}", self.constituency, self.category)?;
        writeln!(
            w,
            "  {}  ·  {}% complete  ·  ends {}",
            format_ugx(self.budget),
            self.progress,
            self.end_date()
        )?;
        writeln!(w)
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        let value = serde_json::to_string(self)?;
        write!(w, "{value}")
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}%\t{}\t{}",
            self.id,
            self.name,
            self.constituency,
            self.category,
            self.budget,
            self.progress,
            self.status,
            self.end_date()
        )
    }

    fn table_headers() -> &'static [&'static str] {
        &[
            "ID",
            "NAME",
            "CONSTITUENCY",
            "CATEGORY",
            "BUDGET",
            "PROGRESS",
            "STATUS",
            "END",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boma_core::model::project::{Category, Status};

    fn sample_project() -> Project {
        Project {
            id: "pr-9xk2ta".into(),
            name: "Borehole A".into(),
            category: Category::WaterSanitation,
            constituency: "Kawempe North".into(),
            budget: 5_000_000,
            spent: 0,
            progress: 40,
            status: Status::Active,
            start_us: 0,
            end_us: 1_767_139_200_000_000,
            description: None,
        }
    }

    #[test]
    fn resolve_format_flag_wins_over_json_and_env() {
        let mode = resolve_output_mode_inner(Some(OutputMode::Text), true, Some("pretty"), true);
        assert_eq!(mode, OutputMode::Text);
    }

    #[test]
    fn resolve_json_flag_wins_over_env() {
        let mode = resolve_output_mode_inner(None, true, Some("pretty"), true);
        assert_eq!(mode, OutputMode::Json);
    }

    #[test]
    fn resolve_format_env_values() {
        for (value, expected) in [
            ("json", OutputMode::Json),
            ("TEXT", OutputMode::Text),
            ("pretty", OutputMode::Pretty),
        ] {
            assert_eq!(
                resolve_output_mode_inner(None, false, Some(value), false),
                expected
            );
        }
    }

    #[test]
    fn resolve_unknown_env_falls_through_to_tty() {
        assert_eq!(
            resolve_output_mode_inner(None, false, Some("fancy"), true),
            OutputMode::Pretty
        );
        assert_eq!(
            resolve_output_mode_inner(None, false, Some("fancy"), false),
            OutputMode::Text
        );
    }

    #[test]
    fn resolve_defaults_follow_the_tty() {
        assert_eq!(
            resolve_output_mode_inner(None, false, None, true),
            OutputMode::Pretty
        );
        assert_eq!(
            resolve_output_mode_inner(None, false, None, false),
            OutputMode::Text
        );
    }

    #[test]
    fn cli_error_carries_store_error_details() {
        let err = StoreError::BackendUnavailable {
            reason: "connection refused".into(),
        };
        let cli_err = CliError::from(&err);
        assert!(cli_err.message.contains("connection refused"));
        assert_eq!(cli_err.error_code.as_deref(), Some("E3001"));
        assert!(cli_err.suggestion.is_some());
    }

    #[test]
    fn project_table_row_matches_headers() {
        let project = sample_project();
        let mut buf = Vec::new();
        project.render_table(&mut buf).unwrap();
        let row = String::from_utf8(buf).unwrap();
        assert_eq!(
            row.trim_end().split('\t').count(),
            Project::table_headers().len()
        );
        assert!(row.contains("pr-9xk2ta"));
        assert!(row.contains("2025-12-31"));
    }

    #[test]
    fn project_human_card_shows_budget_and_status() {
        let project = sample_project();
        let mut buf = Vec::new();
        project.render_human(&mut buf).unwrap();
        let card = String::from_utf8(buf).unwrap();
        assert!(card.contains("UGX 5M"));
        assert!(card.contains("[Active]"));
        assert!(card.contains("Water & Sanitation"));
    }

    #[test]
    fn project_json_row_is_a_valid_object() {
        let project = sample_project();
        let mut buf = Vec::new();
        project.render_json(&mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["id"], "pr-9xk2ta");
        assert_eq!(value["status"], "Active");
    }
}
