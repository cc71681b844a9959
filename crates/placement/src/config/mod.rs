use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Distinguishes runtime behavior for different stages of the desk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Production => "production",
        }
    }
}

/// Log filter used when neither `RUST_LOG` nor `PLACEMENT_LOG_LEVEL` is set.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub data: DataConfig,
    pub policy: PlacementPolicy,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let dir = env::var("PLACEMENT_DATA_DIR").unwrap_or_else(|_| "data".to_string());

        let defaults = PlacementPolicy::default();
        let policy = PlacementPolicy {
            max_pending_applications: read_limit(
                "PLACEMENT_MAX_APPLICATIONS",
                defaults.max_pending_applications,
            )?,
            max_internships_per_representative: read_limit(
                "PLACEMENT_MAX_INTERNSHIPS",
                defaults.max_internships_per_representative,
            )?,
            max_slots: defaults.max_slots,
        };

        let log_level = env::var("PLACEMENT_LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());

        Ok(Self {
            environment,
            data: DataConfig::new(dir),
            policy,
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn read_limit(var: &'static str, default: usize) -> Result<usize, ConfigError> {
    match env::var(var) {
        Ok(value) => match value.trim().parse::<usize>() {
            Ok(limit) if limit > 0 => Ok(limit),
            _ => Err(ConfigError::InvalidLimit { var, value }),
        },
        Err(_) => Ok(default),
    }
}

/// Location of the CSV data files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataConfig {
    pub dir: PathBuf,
    pub files: DataFiles,
}

impl DataConfig {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            files: DataFiles::default(),
        }
    }

    pub fn students_path(&self) -> PathBuf {
        self.dir.join(&self.files.students)
    }

    pub fn staff_path(&self) -> PathBuf {
        self.dir.join(&self.files.staff)
    }

    pub fn representatives_path(&self) -> PathBuf {
        self.dir.join(&self.files.representatives)
    }

    pub fn internships_path(&self) -> PathBuf {
        self.dir.join(&self.files.internships)
    }

    pub fn applications_path(&self) -> PathBuf {
        self.dir.join(&self.files.applications)
    }

    pub fn withdrawals_path(&self) -> PathBuf {
        self.dir.join(&self.files.withdrawals)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// File names inside the data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFiles {
    pub students: String,
    pub staff: String,
    pub representatives: String,
    pub internships: String,
    pub applications: String,
    pub withdrawals: String,
}

impl Default for DataFiles {
    fn default() -> Self {
        Self {
            students: "student.csv".to_string(),
            staff: "staff.csv".to_string(),
            representatives: "company_representative.csv".to_string(),
            internships: "internship.csv".to_string(),
            applications: "application.csv".to_string(),
            withdrawals: "withdrawal.csv".to_string(),
        }
    }
}

/// Limits enforced by the role services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementPolicy {
    pub max_pending_applications: usize,
    pub max_internships_per_representative: usize,
    pub max_slots: u8,
}

impl Default for PlacementPolicy {
    fn default() -> Self {
        Self {
            max_pending_applications: 3,
            max_internships_per_representative: 5,
            max_slots: 10,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidLimit { var: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidLimit { var, value } => {
                write!(f, "{var} must be a positive integer, found '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
