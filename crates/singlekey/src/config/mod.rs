use std::env;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// SingleKey deployment the client talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Production,
    Sandbox,
}

impl Environment {
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Production => "https://platform.singlekey.com",
            Self::Sandbox => "https://sandbox.singlekey.com",
        }
    }

    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Ok(Self::Production),
            "sandbox" | "test" => Ok(Self::Sandbox),
            _ => Err(ConfigError::InvalidEnvironment(value.to_string())),
        }
    }
}

/// Settings fixed for the lifetime of a [`crate::SingleKeyClient`].
#[derive(Clone)]
pub struct ClientConfig {
    pub api_token: String,
    pub environment: Environment,
    pub timeout: Duration,
    pub base_url_override: Option<String>,
}

impl ClientConfig {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            environment: Environment::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            base_url_override: None,
        }
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Points the client at an arbitrary host instead of the environment URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    pub fn base_url(&self) -> &str {
        match self.base_url_override.as_deref() {
            Some(url) => url.trim_end_matches('/'),
            None => self.environment.base_url(),
        }
    }

    /// Reads `SINGLEKEY_*` variables, loading a `.env` file first when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let api_token = env::var("SINGLEKEY_API_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let environment = match env::var("SINGLEKEY_ENV") {
            Ok(value) => Environment::parse(&value)?,
            Err(_) => Environment::default(),
        };

        let timeout_secs = match env::var("SINGLEKEY_TIMEOUT_SECS") {
            Ok(value) => value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTimeout(value))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let base_url_override = env::var("SINGLEKEY_BASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        Ok(Self {
            api_token,
            environment,
            timeout: Duration::from_secs(timeout_secs),
            base_url_override,
        })
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_token", &"<redacted>")
            .field("environment", &self.environment)
            .field("timeout", &self.timeout)
            .field("base_url_override", &self.base_url_override)
            .finish()
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl TelemetryConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let log_level = env::var("SINGLEKEY_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        Self { log_level }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    MissingToken,
    InvalidEnvironment(String),
    InvalidTimeout(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingToken => write!(f, "SINGLEKEY_API_TOKEN must be set"),
            ConfigError::InvalidEnvironment(value) => write!(
                f,
                "SINGLEKEY_ENV must be 'production' or 'sandbox', got '{}'",
                value
            ),
            ConfigError::InvalidTimeout(value) => write!(
                f,
                "SINGLEKEY_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
