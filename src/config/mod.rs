//! Configuration for the payrun pipeline.
//!
//! All settings come from environment variables with defaults, so a bare
//! `payrun run` works against the demo data layout. Validation happens
//! once at startup; an invalid value aborts the run before any file is
//! touched.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// Default archive directory for delivered payslips.
pub const DEFAULT_ARCHIVE_DIR: &str = "data/archive";
/// Default employee directory file.
pub const DEFAULT_EMPLOYEES_FILE: &str = "data/employees.json";

fn default_max_attempts() -> u32 {
    3
}

fn default_base_delay_secs() -> f64 {
    0.5
}

/// Main configuration for payrun.
#[derive(Debug, Clone)]
pub struct Config {
    /// Redis endpoint for the dedup backing store. `None` selects the
    /// in-process backend without attempting a connection.
    pub redis_url: Option<String>,
    /// Directory that delivered payslips are archived into.
    pub archive_dir: PathBuf,
    /// Path to the employee directory JSON file.
    pub employees_file: PathBuf,
    /// Maximum delivery attempts per file (>= 1).
    pub max_attempts: u32,
    /// Base delay for exponential backoff between delivery attempts.
    pub base_delay: Duration,
    /// Simulated delivery failure rate, demo/test use only.
    pub fail_rate: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_url: None,
            archive_dir: PathBuf::from(DEFAULT_ARCHIVE_DIR),
            employees_file: PathBuf::from(DEFAULT_EMPLOYEES_FILE),
            max_attempts: default_max_attempts(),
            base_delay: Duration::from_secs_f64(default_base_delay_secs()),
            fail_rate: 0.0,
        }
    }
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Recognized variables: `REDIS_URL`, `ARCHIVE_DIR`, `EMPLOYEES_FILE`,
    /// `RETRY_MAX_ATTEMPTS`, `RETRY_BASE_DELAY`, `FAIL_RATE`. Every
    /// variable is optional; parse failures and out-of-range values are
    /// fatal for the run.
    pub fn from_env() -> Result<Self, ConfigError> {
        let redis_url = env::var("REDIS_URL").ok().filter(|s| !s.is_empty());

        let archive_dir = env::var("ARCHIVE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_ARCHIVE_DIR));

        let employees_file = env::var("EMPLOYEES_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_EMPLOYEES_FILE));

        let max_attempts: u32 = parse_var("RETRY_MAX_ATTEMPTS", default_max_attempts())?;
        let base_delay_secs: f64 = parse_var("RETRY_BASE_DELAY", default_base_delay_secs())?;
        let fail_rate: f64 = parse_var("FAIL_RATE", 0.0)?;

        // Validate before constructing: Duration::from_secs_f64 panics on
        // negative input.
        if max_attempts < 1 {
            return Err(ConfigError::InvalidMaxAttempts {
                value: max_attempts,
            });
        }
        if !base_delay_secs.is_finite() || base_delay_secs < 0.0 {
            return Err(ConfigError::InvalidBaseDelay {
                value: base_delay_secs,
            });
        }
        if !(0.0..=1.0).contains(&fail_rate) {
            return Err(ConfigError::InvalidFailRate { value: fail_rate });
        }

        Ok(Self {
            redis_url,
            archive_dir,
            employees_file,
            max_attempts,
            base_delay: Duration::from_secs_f64(base_delay_secs),
            fail_rate,
        })
    }
}

/// Parse an environment variable, falling back to a default when unset.
fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::VarParse { name, value: raw }),
        Err(_) => Ok(default),
    }
}
