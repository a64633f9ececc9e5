//! `boma board` — full-screen dashboard.

use boma_core::store::memory::MemoryStore;
use clap::Args;

use crate::output::OutputMode;
use crate::tui;

#[derive(Args, Debug, Default)]
pub struct BoardArgs {
    /// Run against a transient in-memory store (no backend required;
    /// records are discarded on exit).
    #[arg(long)]
    pub memory: bool,
}

pub fn run_board(args: &BoardArgs, output: OutputMode) -> anyhow::Result<()> {
    if args.memory {
        tracing::info!("running the dashboard against a transient in-memory store");
        let store = MemoryStore::new();
        return tui::run(&store);
    }
    let store = super::open_remote(output)?;
    tui::run(&store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_args_default_to_remote() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: BoardArgs,
        }
        let w = Wrapper::parse_from(["test"]);
        assert!(!w.args.memory);
    }
}
