use serde_json::Error as JsonError;
use singlekey::telemetry::TelemetryError;
use singlekey::{ConfigError, SingleKeyError};
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Api(SingleKeyError),
    Io(std::io::Error),
    Request(JsonError),
}

impl AppError {
    /// Field-level errors worth listing under the main message.
    pub fn field_errors(&self) -> &[String] {
        match self {
            AppError::Api(err) => err.errors(),
            _ => &[],
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Api(SingleKeyError::Validation { message, .. }) => {
                write!(f, "validation failed: {}", message)
            }
            AppError::Api(err) => write!(f, "API error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Request(err) => write!(f, "invalid request file: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Api(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Request(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<SingleKeyError> for AppError {
    fn from(value: SingleKeyError) -> Self {
        Self::Api(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<JsonError> for AppError {
    fn from(value: JsonError) -> Self {
        Self::Request(value)
    }
}
