//! # Configuration Management
//!
//! Explicit configuration for the provider adapters. All ambient environment
//! reads happen here, once, in [`Settings::from_env`]; the adapters themselves
//! only ever see the resulting struct.

use crate::errors::{GantryError, Result};

/// Cluster identifier the host resolver queries (required for resolution)
pub const ENV_CLUSTER: &str = "GANTRY_CLUSTER";
/// Explicit Docker host override; bypasses fleet resolution entirely
pub const ENV_DOCKER_HOST: &str = "GANTRY_DOCKER_HOST";
/// Test-only Docker host override; takes precedence over every other source
pub const ENV_TEST_DOCKER_HOST: &str = "GANTRY_TEST_DOCKER_HOST";
/// Development mode flag; selects public instead of private instance addresses
pub const ENV_DEVELOPMENT: &str = "GANTRY_DEVELOPMENT";
/// Log level filter directive for [`crate::observability::init_tracing`]
pub const ENV_LOG_LEVEL: &str = "GANTRY_LOG_LEVEL";
/// Log output format: `text` (default) or `json`
pub const ENV_LOG_FORMAT: &str = "GANTRY_LOG_FORMAT";

/// Provider adapter configuration
#[derive(Debug, Clone)]
pub struct Settings {
    /// Cluster whose container-instance fleet hosts the Docker daemons
    pub cluster: Option<String>,

    /// Explicit Docker host; when set, resolution is skipped
    pub docker_host: Option<String>,

    /// Test escape hatch; replaces whatever host was chosen
    pub test_docker_host: Option<String>,

    /// When true, the resolver picks public instead of private addresses
    pub development: bool,

    /// Log level filter directive (e.g. `info`, `gantry=debug`)
    pub log_level: String,

    /// Emit logs as JSON instead of human-readable text
    pub log_json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cluster: None,
            docker_host: None,
            test_docker_host: None,
            development: false,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl Settings {
    /// Create configuration from `GANTRY_*` environment variables
    pub fn from_env() -> Result<Self> {
        let log_format = non_empty_var(ENV_LOG_FORMAT).unwrap_or_else(|| "text".to_string());
        let log_json = match log_format.as_str() {
            "json" => true,
            "text" => false,
            other => {
                return Err(GantryError::config(format!(
                    "invalid {} value '{}': expected 'text' or 'json'",
                    ENV_LOG_FORMAT, other
                )))
            }
        };

        Ok(Self {
            cluster: non_empty_var(ENV_CLUSTER),
            docker_host: non_empty_var(ENV_DOCKER_HOST),
            test_docker_host: non_empty_var(ENV_TEST_DOCKER_HOST),
            development: flag_var(ENV_DEVELOPMENT),
            log_level: non_empty_var(ENV_LOG_LEVEL).unwrap_or_else(|| "info".to_string()),
            log_json,
        })
    }
}

/// Read an environment variable, treating unset and empty as absent.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

/// Read a boolean flag variable. Accepts `true` and `1`; anything else is off.
fn flag_var(name: &str) -> bool {
    matches!(std::env::var(name).as_deref(), Ok("true") | Ok("1"))
}
