//! CLI entry-point for launching the HTTP service.
//!
//! Each bind parameter resolves as: explicit flag, then environment, then the
//! built-in default.

use std::{fmt, str::FromStr, sync::Arc};

use anyhow::Result;
use clap::{Args as ClapArgs, ValueEnum};
use thiserror::Error;
use tracing::{error, info, instrument};

use crate::{
    api::{self, AppState, RuntimeInfo},
    config::{parse_bool, Environment, Settings},
    logging,
};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;

/// Run the Axum server.
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct Args {
    /// Server host address [env: HOST] [default: 127.0.0.1]
    #[arg(long)]
    pub host: Option<String>,
    /// Server port [env: PORT] [default: 8000]
    #[arg(long)]
    pub port: Option<u16>,
    /// Enable auto-reload (development mode) [env: RELOAD]
    #[arg(long)]
    pub reload: bool,
    /// Enable debug mode; implies --reload [env: DEBUG]
    #[arg(long)]
    pub debug: bool,
    /// Log level [env: LOG_LEVEL] [default: info]
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ();

    /// Case-insensitive; `warn` is accepted for `warning`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LaunchError {
    #[error("environment variable {key}={value:?} is not a valid {expected}")]
    InvalidEnv {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Fully resolved launch parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOptions {
    pub host: String,
    pub port: u16,
    pub reload: bool,
    pub debug: bool,
    pub log_level: LogLevel,
}

impl LaunchOptions {
    pub fn resolve(args: &Args, env: &Environment) -> Result<Self, LaunchError> {
        let host = match &args.host {
            Some(host) => host.clone(),
            None => env.get("HOST").unwrap_or(DEFAULT_HOST).to_string(),
        };
        let port = match args.port {
            Some(port) => port,
            None => env_value(env, "PORT", "port number", |raw| {
                raw.trim().parse::<u16>().ok()
            })?
            .unwrap_or(DEFAULT_PORT),
        };
        let debug =
            args.debug || env_value(env, "DEBUG", "boolean", parse_bool)?.unwrap_or(false);
        let reload = args.reload
            || debug
            || env_value(env, "RELOAD", "boolean", parse_bool)?.unwrap_or(false);
        let log_level = match args.log_level {
            Some(level) => level,
            None => env_value(env, "LOG_LEVEL", "log level", |raw| {
                raw.parse::<LogLevel>().ok()
            })?
            .unwrap_or_default(),
        };

        Ok(Self {
            host,
            port,
            reload,
            debug,
            log_level,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn env_value<T>(
    env: &Environment,
    key: &'static str,
    expected: &'static str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, LaunchError> {
    match env.get(key) {
        None => Ok(None),
        Some(raw) => parse(raw).map(Some).ok_or_else(|| LaunchError::InvalidEnv {
            key,
            value: raw.to_string(),
            expected,
        }),
    }
}

#[instrument(skip(env, settings))]
pub async fn run(args: Args, env: &Environment, settings: Arc<Settings>) -> Result<()> {
    let options = LaunchOptions::resolve(&args, env)?;
    logging::init_tracing(options.log_level.directive())?;
    print_banner(&options);

    let listener = api::bind(&options.host, options.port).await?;
    if options.reload {
        info!("reload mode on: restart the process to pick up code changes");
    }
    let state = AppState::new(
        settings,
        RuntimeInfo {
            debug: options.debug,
            reload: options.reload,
        },
    );
    api::run(listener, state, shutdown_signal()).await?;

    println!("\n👋 Server stopped");
    Ok(())
}

fn print_banner(options: &LaunchOptions) {
    let base = options.base_url();
    println!("🚀 Starting Dingo Marketing API Server");
    println!("📍 Address: {base}");
    println!("📚 API Docs: {base}{}", api::docs::DOCS_PATH);
    println!("🔗 API Base: {base}{}", api::API_PREFIX);
    println!(
        "🔧 Debug Mode: {}",
        if options.debug { "Enabled" } else { "Disabled" }
    );
    println!("📝 Log Level: {}", options.log_level.as_str().to_uppercase());
    println!("{}", "-".repeat(50));
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "cannot listen for ctrl-c; shutdown only by termination");
        std::future::pending::<()>().await;
    }
    info!("interrupt received, shutting down");
}
