//! Executes scenarios against a [`Transport`] and drives the interactive menu.

use std::io::{self, Write};

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{info, instrument, warn};

use super::{
    render,
    scenarios::{Pacing, Scenario},
    transport::{ClientError, Transport},
};

#[derive(Debug, Error)]
pub enum DemoError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("console I/O failed: {0}")]
    Console(#[from] io::Error),
}

/// How a scenario ended when no transport error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioOutcome {
    Completed,
    /// A step answered with a non-200 status; later steps were skipped.
    Halted { step: &'static str, status: u16 },
}

/// Parsed menu input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    All,
    One(Scenario),
    Invalid,
}

impl Selection {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Selection::Invalid;
        }
        if raw == "0" {
            return Selection::All;
        }
        raw.parse::<usize>()
            .ok()
            .and_then(Scenario::from_number)
            .map_or(Selection::Invalid, Selection::One)
    }
}

pub struct DemoRunner<T, W> {
    transport: T,
    out: W,
    pacing: Pacing,
    docs_url: Option<String>,
}

impl<T: Transport, W: Write> DemoRunner<T, W> {
    pub fn new(transport: T, out: W, pacing: Pacing) -> Self {
        Self {
            transport,
            out,
            pacing,
            docs_url: None,
        }
    }

    /// Mention `url` in the closing tip of the menu.
    pub fn with_docs_url(mut self, url: impl Into<String>) -> Self {
        self.docs_url = Some(url.into());
        self
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run every step of `scenario`, stopping at the first non-200 answer.
    #[instrument(skip(self))]
    pub async fn run_scenario(&mut self, scenario: Scenario) -> Result<ScenarioOutcome, DemoError> {
        render::print_section(&mut self.out, scenario.heading())?;
        writeln!(self.out, "📝 Scenario Description:")?;
        for line in scenario.description() {
            writeln!(self.out, "- {line}")?;
        }

        for step in scenario.steps()? {
            let delay = self.pacing.delay(step.pause_before);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            writeln!(self.out, "\n{}", step.announce)?;
            self.out.flush()?;

            let response = self.transport.send(&step.request).await?;
            if !render::print_response(&mut self.out, step.title, &response)? {
                warn!(step = step.title, status = response.status, "scenario halted");
                return Ok(ScenarioOutcome::Halted {
                    step: step.title,
                    status: response.status,
                });
            }
        }
        info!("scenario completed");
        Ok(ScenarioOutcome::Completed)
    }

    /// Show the menu, then run what was picked.
    ///
    /// `preselected` replaces the prompt. Running all scenarios waits for a
    /// line on `input` between scenarios.
    pub async fn run_menu<R>(
        &mut self,
        input: &mut R,
        preselected: Option<&str>,
    ) -> Result<(), DemoError>
    where
        R: AsyncBufRead + Unpin,
    {
        writeln!(self.out, "🎉 Welcome to the Dingo Marketing AI Agent System!")?;
        writeln!(
            self.out,
            "This demonstration will showcase the system's main features and use cases"
        )?;
        writeln!(self.out, "\n📋 Available Demonstration Scenarios:")?;
        for (idx, scenario) in Scenario::ALL.iter().enumerate() {
            writeln!(self.out, "  {}. {}", idx + 1, scenario.name())?;
        }
        writeln!(self.out, "  0. All Demos")?;

        let choice = match preselected {
            Some(choice) => choice.to_string(),
            None => {
                write!(
                    self.out,
                    "\nPlease select the scenario to demonstrate (0-{}): ",
                    Scenario::ALL.len()
                )?;
                self.out.flush()?;
                read_line(input).await?
            }
        };

        match Selection::parse(&choice) {
            Selection::All => {
                for scenario in Scenario::ALL {
                    self.run_reported(scenario).await?;
                    write!(self.out, "\nPress Enter to continue to the next demo...")?;
                    self.out.flush()?;
                    read_line(input).await?;
                }
            }
            Selection::One(scenario) => self.run_reported(scenario).await?,
            Selection::Invalid => {
                writeln!(self.out, "❌ Invalid Choice")?;
                return Ok(());
            }
        }

        self.print_closing()
    }

    pub fn print_closing(&mut self) -> Result<(), DemoError> {
        writeln!(self.out, "\n🎯 Demonstration complete!")?;
        if let Some(url) = &self.docs_url {
            writeln!(
                self.out,
                "💡 Tip: You can view the API documentation for more features: {url}"
            )?;
        }
        self.out.flush()?;
        Ok(())
    }

    /// Run one scenario; transport failures are printed instead of returned.
    async fn run_reported(&mut self, scenario: Scenario) -> Result<(), DemoError> {
        match self.run_scenario(scenario).await {
            Ok(_) => Ok(()),
            Err(DemoError::Client(err)) => {
                warn!(scenario = scenario.name(), error = %err, "scenario failed");
                writeln!(self.out, "\n❌ Error occurred during the demonstration: {err}")?;
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}

async fn read_line<R: AsyncBufRead + Unpin>(input: &mut R) -> Result<String, DemoError> {
    let mut line = String::new();
    input.read_line(&mut line).await?;
    Ok(line.trim().to_string())
}
