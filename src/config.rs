//! Runtime configuration for dingo-marketing.
//!
//! Values come from the process environment and an optional `.env` file. Both
//! are read once at startup into an [`Environment`] snapshot; [`Settings`] is
//! built from that snapshot and never mutated afterwards.

use std::{collections::BTreeMap, env, fmt, path::Path, str::FromStr};

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::{json, Value};
use thiserror::Error;

/// Dotenv file looked up in the working directory.
pub const DOTENV_FILE: &str = ".env";

/// Origins allowed by default: the local dev servers used by the frontend.
pub const DEFAULT_CORS_ORIGINS: [&str; 7] = [
    "http://127.0.0.1:5500",
    "http://localhost:8080",
    "http://127.0.0.1:8080",
    "http://localhost:8000",
    "http://127.0.0.1:8000",
    "http://localhost:5500",
    "http://localhost:3000",
];

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Every variable with a typed field on [`Settings`].
pub const KNOWN_KEYS: [&str; 26] = [
    "DEBUG",
    "HOST",
    "PORT",
    "LOG_LEVEL",
    "DATABASE_URL",
    "ENABLE_SCHEDULER",
    "SCHEDULER_TIMEZONE",
    "USER_PROFILING_ENABLED",
    "USER_PROFILING_CACHE_TTL",
    "CAMPAIGN_MAX_DAILY_POSTS",
    "CAMPAIGN_MIN_INTERVAL_MINUTES",
    "OPENAI_API_KEY",
    "OPENAI_MODEL_NAME",
    "OPENAI_BASE_URL",
    "MAX_TOKENS",
    "TEMPERATURE",
    "SERPER_API_KEY",
    "SCRAPING_USER_AGENT",
    "SCRAPING_TIMEOUT",
    "SCRAPING_MAX_RETRIES",
    "GITHUB_TOKEN",
    "GITHUB_REPOSITORY",
    "TWITTER_API_KEY",
    "TWITTER_API_SECRET",
    "LINKEDIN_API_KEY",
    "CORS_ORIGINS",
];

/// Errors raised while building the configuration snapshot.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read dotenv file: {0}")]
    Dotenv(#[from] dotenvy::Error),
    #[error("invalid configuration: {}", join_issues(.0))]
    Validation(Vec<FieldIssue>),
}

/// A single variable whose value could not be coerced to its declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub key: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={:?} is not a valid {}", self.key, self.value, self.expected)
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Variables visible to the process, captured once.
///
/// Process variables shadow entries of the same name from the dotenv file.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    process: BTreeMap<String, String>,
    dotenv: IndexMap<String, String>,
}

impl Environment {
    /// Capture the process environment plus `./.env` when present.
    pub fn capture() -> Result<Self, ConfigError> {
        Self::capture_from(DOTENV_FILE)
    }

    /// Capture the process environment plus the given dotenv file when present.
    pub fn capture_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let dotenv = read_dotenv(path.as_ref())?;
        let process = env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect();
        Ok(Self { process, dotenv })
    }

    /// Snapshot made of process-style variables only.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            process: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            dotenv: IndexMap::new(),
        }
    }

    /// Add entries as if they had been read from a dotenv file.
    pub fn with_dotenv<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.dotenv
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Case-sensitive lookup; process variables win over the dotenv file.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.process
            .get(key)
            .or_else(|| self.dotenv.get(key))
            .map(String::as_str)
    }

    fn dotenv_extras(&self) -> IndexMap<String, String> {
        self.dotenv
            .iter()
            .filter(|(key, _)| !KNOWN_KEYS.contains(&key.as_str()))
            .map(|(key, _)| {
                let value = self.get(key).unwrap_or_default().to_string();
                (key.clone(), value)
            })
            .collect()
    }
}

fn read_dotenv(path: &Path) -> Result<IndexMap<String, String>, ConfigError> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(err) if err.not_found() => return Ok(IndexMap::new()),
        Err(err) => return Err(err.into()),
    };
    let mut entries = IndexMap::new();
    for item in iter {
        let (key, value) = item?;
        entries.insert(key, value);
    }
    Ok(entries)
}

/// A credential that never shows up in logs or debug output.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_set(&self) -> bool {
        !self.0.trim().is_empty()
    }

    /// `***` followed by the last four characters; empty stays empty.
    pub fn redacted(&self) -> String {
        if self.0.is_empty() {
            return String::new();
        }
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 4 {
            "***".to_string()
        } else {
            let suffix: String = chars[chars.len() - 4..].iter().collect();
            format!("***{suffix}")
        }
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret({:?})", self.redacted())
    }
}

impl Serialize for Secret {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.redacted())
    }
}

/// Parse the boolean spellings accepted in environment variables.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" | "on" => Some(true),
        "false" | "f" | "0" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

/// Application configuration snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub debug: bool,
    pub host: String,
    pub port: u16,
    pub log_level: String,
    /// Location of the document store used by the service.
    pub database_url: String,
    pub enable_scheduler: bool,
    pub scheduler_timezone: String,
    pub user_profiling_enabled: bool,
    /// Seconds a computed user profile stays cached.
    pub user_profiling_cache_ttl: u64,
    pub campaign_max_daily_posts: u32,
    pub campaign_min_interval_minutes: u32,
    pub openai_api_key: Secret,
    pub openai_model_name: String,
    pub openai_base_url: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub serper_api_key: Secret,
    pub scraping_user_agent: String,
    /// Seconds.
    pub scraping_timeout: u64,
    pub scraping_max_retries: u32,
    pub github_token: Secret,
    pub github_repository: String,
    pub twitter_api_key: Secret,
    pub twitter_api_secret: Secret,
    pub linkedin_api_key: Secret,
    pub cors_origins: Vec<String>,
    /// Dotenv entries with no typed field, kept in file order.
    pub extra: IndexMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "INFO".to_string(),
            database_url: "dingo_marketing.json".to_string(),
            enable_scheduler: true,
            scheduler_timezone: "Asia/Shanghai".to_string(),
            user_profiling_enabled: true,
            user_profiling_cache_ttl: 3600,
            campaign_max_daily_posts: 10,
            campaign_min_interval_minutes: 60,
            openai_api_key: Secret::default(),
            openai_model_name: "deepseek-chat".to_string(),
            openai_base_url: "https://api.deepseek.com/v1".to_string(),
            max_tokens: 4000,
            temperature: 0.7,
            serper_api_key: Secret::default(),
            scraping_user_agent: DEFAULT_USER_AGENT.to_string(),
            scraping_timeout: 30,
            scraping_max_retries: 3,
            github_token: Secret::default(),
            github_repository: String::new(),
            twitter_api_key: Secret::default(),
            twitter_api_secret: Secret::default(),
            linkedin_api_key: Secret::default(),
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
            extra: IndexMap::new(),
        }
    }
}

/// Connection parameters for the OpenAI-compatible text generation backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AiConfig {
    pub model: String,
    pub api_key: Secret,
    pub base_url: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl Settings {
    /// Build the snapshot from captured variables.
    ///
    /// All invalid values are reported together; nothing is returned unless
    /// every known field coerces.
    pub fn from_env(env: &Environment) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let mut r = FieldReader {
            env,
            issues: Vec::new(),
        };

        let settings = Self {
            debug: r.boolean("DEBUG", defaults.debug),
            host: r.string("HOST", &defaults.host),
            port: r.number("PORT", defaults.port, "port number"),
            log_level: r.string("LOG_LEVEL", &defaults.log_level),
            database_url: r.string("DATABASE_URL", &defaults.database_url),
            enable_scheduler: r.boolean("ENABLE_SCHEDULER", defaults.enable_scheduler),
            scheduler_timezone: r.string("SCHEDULER_TIMEZONE", &defaults.scheduler_timezone),
            user_profiling_enabled: r
                .boolean("USER_PROFILING_ENABLED", defaults.user_profiling_enabled),
            user_profiling_cache_ttl: r.number(
                "USER_PROFILING_CACHE_TTL",
                defaults.user_profiling_cache_ttl,
                "non-negative integer",
            ),
            campaign_max_daily_posts: r.number(
                "CAMPAIGN_MAX_DAILY_POSTS",
                defaults.campaign_max_daily_posts,
                "non-negative integer",
            ),
            campaign_min_interval_minutes: r.number(
                "CAMPAIGN_MIN_INTERVAL_MINUTES",
                defaults.campaign_min_interval_minutes,
                "non-negative integer",
            ),
            openai_api_key: r.secret("OPENAI_API_KEY"),
            openai_model_name: r.string("OPENAI_MODEL_NAME", &defaults.openai_model_name),
            openai_base_url: r.string("OPENAI_BASE_URL", &defaults.openai_base_url),
            max_tokens: r.number("MAX_TOKENS", defaults.max_tokens, "non-negative integer"),
            temperature: r.number("TEMPERATURE", defaults.temperature, "number"),
            serper_api_key: r.secret("SERPER_API_KEY"),
            scraping_user_agent: r.string("SCRAPING_USER_AGENT", &defaults.scraping_user_agent),
            scraping_timeout: r.number(
                "SCRAPING_TIMEOUT",
                defaults.scraping_timeout,
                "non-negative integer",
            ),
            scraping_max_retries: r.number(
                "SCRAPING_MAX_RETRIES",
                defaults.scraping_max_retries,
                "non-negative integer",
            ),
            github_token: r.secret("GITHUB_TOKEN"),
            github_repository: r.string("GITHUB_REPOSITORY", &defaults.github_repository),
            twitter_api_key: r.secret("TWITTER_API_KEY"),
            twitter_api_secret: r.secret("TWITTER_API_SECRET"),
            linkedin_api_key: r.secret("LINKEDIN_API_KEY"),
            cors_origins: r.list("CORS_ORIGINS", &defaults.cors_origins),
            extra: env.dotenv_extras(),
        };

        if r.issues.is_empty() {
            Ok(settings)
        } else {
            Err(ConfigError::Validation(r.issues))
        }
    }

    /// The subset of settings the AI content backend needs.
    pub fn ai_config(&self) -> AiConfig {
        AiConfig {
            model: self.openai_model_name.clone(),
            api_key: self.openai_api_key.clone(),
            base_url: self.openai_base_url.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }

    /// Integrations paired with whether their credential is present.
    pub fn configured_tools(&self) -> Vec<(&'static str, bool)> {
        vec![
            ("ai_content_generation", self.openai_api_key.is_set()),
            (
                "github",
                self.github_token.is_set() && !self.github_repository.trim().is_empty(),
            ),
            ("web_search", self.serper_api_key.is_set()),
            (
                "twitter",
                self.twitter_api_key.is_set() && self.twitter_api_secret.is_set(),
            ),
            ("linkedin", self.linkedin_api_key.is_set()),
        ]
    }

    /// Every field keyed by its variable name, credentials masked.
    pub fn redacted(&self) -> Value {
        json!({
            "DEBUG": self.debug,
            "HOST": self.host,
            "PORT": self.port,
            "LOG_LEVEL": self.log_level,
            "DATABASE_URL": self.database_url,
            "ENABLE_SCHEDULER": self.enable_scheduler,
            "SCHEDULER_TIMEZONE": self.scheduler_timezone,
            "USER_PROFILING_ENABLED": self.user_profiling_enabled,
            "USER_PROFILING_CACHE_TTL": self.user_profiling_cache_ttl,
            "CAMPAIGN_MAX_DAILY_POSTS": self.campaign_max_daily_posts,
            "CAMPAIGN_MIN_INTERVAL_MINUTES": self.campaign_min_interval_minutes,
            "OPENAI_API_KEY": self.openai_api_key,
            "OPENAI_MODEL_NAME": self.openai_model_name,
            "OPENAI_BASE_URL": self.openai_base_url,
            "MAX_TOKENS": self.max_tokens,
            "TEMPERATURE": self.temperature,
            "SERPER_API_KEY": self.serper_api_key,
            "SCRAPING_USER_AGENT": self.scraping_user_agent,
            "SCRAPING_TIMEOUT": self.scraping_timeout,
            "SCRAPING_MAX_RETRIES": self.scraping_max_retries,
            "GITHUB_TOKEN": self.github_token,
            "GITHUB_REPOSITORY": self.github_repository,
            "TWITTER_API_KEY": self.twitter_api_key,
            "TWITTER_API_SECRET": self.twitter_api_secret,
            "LINKEDIN_API_KEY": self.linkedin_api_key,
            "CORS_ORIGINS": self.cors_origins,
            "extra": self.extra,
        })
    }
}

/// Reads typed values and collects every coercion failure.
struct FieldReader<'a> {
    env: &'a Environment,
    issues: Vec<FieldIssue>,
}

impl FieldReader<'_> {
    fn string(&mut self, key: &'static str, default: &str) -> String {
        self.env.get(key).unwrap_or(default).to_string()
    }

    fn secret(&mut self, key: &'static str) -> Secret {
        Secret::new(self.env.get(key).unwrap_or_default())
    }

    fn boolean(&mut self, key: &'static str, default: bool) -> bool {
        let env = self.env;
        let Some(raw) = env.get(key) else {
            return default;
        };
        parse_bool(raw).unwrap_or_else(|| {
            self.reject(key, raw, "boolean");
            default
        })
    }

    fn number<T: FromStr>(&mut self, key: &'static str, default: T, expected: &'static str) -> T {
        let env = self.env;
        let Some(raw) = env.get(key) else {
            return default;
        };
        raw.trim().parse().unwrap_or_else(|_| {
            self.reject(key, raw, expected);
            default
        })
    }

    fn list(&mut self, key: &'static str, default: &[String]) -> Vec<String> {
        let env = self.env;
        let Some(raw) = env.get(key) else {
            return default.to_vec();
        };
        let trimmed = raw.trim();
        if trimmed.starts_with('[') {
            return serde_json::from_str::<Vec<String>>(trimmed).unwrap_or_else(|_| {
                self.reject(key, raw, "JSON array of strings");
                default.to_vec()
            });
        }
        trimmed
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn reject(&mut self, key: &'static str, raw: &str, expected: &'static str) {
        self.issues.push(FieldIssue {
            key,
            value: raw.to_string(),
            expected,
        });
    }
}
