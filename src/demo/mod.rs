//! Demonstration client for the service's REST surface.

pub mod render;
pub mod runner;
pub mod scenarios;
pub mod transport;

pub use runner::{DemoError, DemoRunner, ScenarioOutcome, Selection};
pub use scenarios::{Pacing, Pause, Scenario, Step};
pub use transport::{ApiRequest, ApiResponse, ClientError, HttpTransport, Method, Transport};

/// Base URL used when neither `--base-url` nor `DINGO_API_URL` is given.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/api/v1";
