//! Entry point wiring CLI dispatch to the launcher, demo client and config view.

use anyhow::Result;
use dingo_marketing::{cli::Cli, config::Environment};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let env = Environment::capture()?;
    cli.dispatch(env).await
}
