use crate::config::ConfigError;
use crate::domain::Capability;
use crate::services::{AuthError, RepresentativeError, StaffError, StudentError};
use crate::storage::StoreError;
use crate::telemetry::TelemetryError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    Store(StoreError),
    Auth(AuthError),
    Staff(StaffError),
    Representative(RepresentativeError),
    Student(StudentError),
    MissingCredentials,
    Forbidden(Capability),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Csv(err) => write!(f, "csv error: {}", err),
            AppError::Json(err) => write!(f, "json error: {}", err),
            AppError::Store(err) => write!(f, "{}", err),
            AppError::Auth(err) => write!(f, "{}", err),
            AppError::Staff(err) => write!(f, "{}", err),
            AppError::Representative(err) => write!(f, "{}", err),
            AppError::Student(err) => write!(f, "{}", err),
            AppError::MissingCredentials => {
                write!(f, "this command requires --user and --password")
            }
            AppError::Forbidden(capability) => {
                write!(f, "your account may not {}", capability.label())
            }
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Csv(err) => Some(err),
            AppError::Json(err) => Some(err),
            AppError::Store(err) => Some(err),
            AppError::Auth(err) => Some(err),
            AppError::Staff(err) => Some(err),
            AppError::Representative(err) => Some(err),
            AppError::Student(err) => Some(err),
            AppError::MissingCredentials | AppError::Forbidden(_) => None,
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

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for AppError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<AuthError> for AppError {
    fn from(value: AuthError) -> Self {
        Self::Auth(value)
    }
}

impl From<StaffError> for AppError {
    fn from(value: StaffError) -> Self {
        Self::Staff(value)
    }
}

impl From<RepresentativeError> for AppError {
    fn from(value: RepresentativeError) -> Self {
        Self::Representative(value)
    }
}

impl From<StudentError> for AppError {
    fn from(value: StudentError) -> Self {
        Self::Student(value)
    }
}
