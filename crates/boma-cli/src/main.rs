#![forbid(unsafe_code)]

mod cmd;
mod output;
mod tui;

use clap::{Parser, Subcommand};
use output::OutputMode;
use std::env;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "boma: constituency development project tracker",
    long_about = None
)]
struct Cli {
    /// Output format (default: pretty on a TTY, text when piped).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "List project records",
        long_about = "List project records with optional search and status filters.",
        after_help = "EXAMPLES:\n    # All projects\n    boma list\n\n    # Active water projects in Kawempe\n    boma list --search kawempe --status active\n\n    # Machine-readable output\n    boma list --json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        about = "Create a new project record",
        long_about = "Create a new project record. The record starts Planned with no spend \
                      and no progress; the collection is re-fetched afterwards.",
        after_help = "EXAMPLES:\n    # Create a borehole project\n    boma create --name \"Borehole A\" --constituency \"Kawempe North\" \\\n        --category water-sanitation --budget 5000000 --end 2025-12-31\n\n    # Machine-readable output\n    boma create --name \"Borehole A\" --constituency \"Kawempe North\" \\\n        --budget 5000000 --end 2025-12-31 --json"
    )]
    Create(cmd::create::CreateArgs),

    #[command(
        about = "Show summary statistics",
        long_about = "Show the summary tiles: project count, active, completed, total budget.",
        after_help = "EXAMPLES:\n    boma stats\n    boma stats --json"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        about = "Verify configuration and backend reachability",
        long_about = "Verify the BOMA_* configuration and probe the auth, document store, \
                      and file storage handles.",
        after_help = "EXAMPLES:\n    boma check\n    boma check --json"
    )]
    Check(cmd::check::CheckArgs),

    #[command(
        about = "Open the full-screen dashboard",
        long_about = "Open the interactive dashboard: summary tiles, search, status filter, \
                      cards/table toggle, and the create form.",
        after_help = "EXAMPLES:\n    # Against the configured backend\n    boma board\n\n    # Offline demo against an in-memory store\n    boma board --memory"
    )]
    Board(cmd::board::BoardArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("BOMA_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "boma=debug,info"
        } else {
            "boma=info,warn"
        })
    });

    let format = env::var("BOMA_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);
    match format.as_str() {
        "json" => registry.with(fmt::layer().json().with_ansi(false)).init(),
        _ => registry.with(fmt::layer().compact()).init(),
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let output = output::resolve_output_mode(cli.format, cli.json);

    match cli.command {
        Commands::List(ref args) => cmd::list::run_list(args, output),
        Commands::Create(ref args) => cmd::create::run_create(args, output),
        Commands::Stats(ref args) => cmd::stats::run_stats(args, output),
        Commands::Check(ref args) => cmd::check::run_check(args, output),
        Commands::Board(ref args) => cmd::board::run_board(args, output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_flag_parses_globally() {
        let cli = Cli::parse_from(["boma", "list", "--json"]);
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::List(_)));
    }

    #[test]
    fn format_flag_parses_before_subcommand() {
        let cli = Cli::parse_from(["boma", "--format", "text", "stats"]);
        assert_eq!(cli.format, Some(OutputMode::Text));
    }

    #[test]
    fn create_subcommand_parses() {
        let cli = Cli::parse_from([
            "boma",
            "create",
            "--name",
            "Borehole A",
            "--constituency",
            "Kawempe North",
            "--budget",
            "5000000",
            "--end",
            "2025-12-31",
        ]);
        assert!(matches!(cli.command, Commands::Create(_)));
    }

    #[test]
    fn board_memory_flag_parses() {
        let cli = Cli::parse_from(["boma", "board", "--memory"]);
        let Commands::Board(args) = cli.command else {
            panic!("expected board");
        };
        assert!(args.memory);
    }
}
