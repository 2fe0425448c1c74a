//! CLI entry-point for inspecting the resolved configuration.

use anyhow::Result;
use clap::Args as ClapArgs;

use crate::config::Settings;

/// Args for the `config` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Print only the AI backend view.
    #[arg(long)]
    pub ai: bool,
}

pub fn run(args: Args, settings: &Settings) -> Result<()> {
    let rendered = if args.ai {
        serde_json::to_string_pretty(&settings.ai_config())?
    } else {
        serde_json::to_string_pretty(&settings.redacted())?
    };
    println!("{rendered}");
    Ok(())
}
