//! CLI entry-point for the interactive demonstration client.

use std::{io, time::Duration};

use anyhow::Result;
use clap::Args as ClapArgs;
use tokio::io::BufReader;
use tracing::{info, instrument};

use crate::{
    api::docs::DOCS_PATH,
    config::Environment,
    demo::{DemoRunner, HttpTransport, Pacing, DEFAULT_BASE_URL},
};

/// Args for the `demo` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// API base URL including the version prefix [env: DINGO_API_URL]
    #[arg(long)]
    pub base_url: Option<String>,
    /// Scenario to run without prompting (0 runs all).
    #[arg(long)]
    pub scenario: Option<String>,
    /// Skip the pauses between dependent calls.
    #[arg(long)]
    pub fast: bool,
    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 120)]
    pub timeout_secs: u64,
}

impl Args {
    pub fn resolve_base_url(&self, env: &Environment) -> String {
        self.base_url
            .clone()
            .or_else(|| env.get("DINGO_API_URL").map(str::to_string))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }
}

/// Root URL of the service without the `/api/vN` suffix.
fn service_root(base_url: &str) -> &str {
    base_url
        .trim_end_matches('/')
        .rsplit_once("/api/")
        .map_or(base_url, |(root, _)| root)
}

#[instrument(skip(env))]
pub async fn run(args: Args, env: &Environment) -> Result<()> {
    let base_url = args.resolve_base_url(env);
    info!(%base_url, "starting demonstration");

    let transport = HttpTransport::new(&base_url, Duration::from_secs(args.timeout_secs))?;
    let pacing = if args.fast {
        Pacing::none()
    } else {
        Pacing::standard()
    };
    let docs_url = format!("{}{DOCS_PATH}", service_root(&base_url));
    let mut runner = DemoRunner::new(transport, io::stdout(), pacing).with_docs_url(docs_url);
    let mut input = BufReader::new(tokio::io::stdin());

    tokio::select! {
        result = runner.run_menu(&mut input, args.scenario.as_deref()) => {
            result?;
            Ok(())
        }
        _ = tokio::signal::ctrl_c() => {
            println!("\n\n👋 Demonstration cancelled");
            // The stdin reader thread would keep the runtime from shutting down.
            std::process::exit(0);
        }
    }
}
