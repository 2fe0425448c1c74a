//! Command-line interface wiring for dingo-marketing.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::{
    config::{Environment, Settings},
    logging,
};

pub mod config;
pub mod demo;
pub mod serve;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Dingo Marketing API server and demo client", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    ///
    /// Only the commands that serve or inspect the service build [`Settings`];
    /// a configuration error aborts them before anything is bound.
    pub async fn dispatch(self, env: Environment) -> Result<()> {
        match self.command {
            Commands::Serve(args) => {
                let settings = Arc::new(Settings::from_env(&env)?);
                serve::run(args, &env, settings).await
            }
            Commands::Demo(args) => {
                logging::init_tracing("warn")?;
                demo::run(args, &env).await
            }
            Commands::Config(args) => {
                logging::init_tracing("info")?;
                let settings = Settings::from_env(&env)?;
                config::run(args, &settings)
            }
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the API server.
    Serve(serve::Args),
    /// Walk through the demonstration scenarios against a running server.
    Demo(demo::Args),
    /// Print the resolved configuration with credentials masked.
    Config(config::Args),
}
