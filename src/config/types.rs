// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::time::Duration;

use crate::classify::ParsePolicy;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    #[serde(default)]
    pub classify: ClassifyConfig,
    pub fact: FactConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Minimum level written (error, warn, info, debug)
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

impl PerformanceConfig {
    /// Time budget for a single request, also the shutdown drain limit
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(std::cmp::max(self.read_timeout, self.write_timeout))
    }
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    /// Health check configuration
    #[serde(default)]
    pub health: HealthConfig,
}

/// Health check configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HealthConfig {
    /// Enable health check endpoints
    #[serde(default = "default_health_enabled")]
    pub enabled: bool,
    /// Liveness probe path (default: /healthz)
    #[serde(default = "default_healthz_path")]
    pub liveness_path: String,
    /// Readiness probe path (default: /readyz)
    #[serde(default = "default_readyz_path")]
    pub readiness_path: String,
}

#[allow(clippy::missing_const_for_fn)]
fn default_health_enabled() -> bool {
    true
}

#[allow(clippy::missing_const_for_fn)]
fn default_healthz_path() -> String {
    "/healthz".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_readyz_path() -> String {
    "/readyz".to_string()
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: default_health_enabled(),
            liveness_path: default_healthz_path(),
            readiness_path: default_readyz_path(),
        }
    }
}

/// Input validation configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ClassifyConfig {
    #[serde(default)]
    pub parse_policy: ParsePolicy,
}

/// Trivia service configuration
#[derive(Debug, Deserialize, Clone)]
pub struct FactConfig {
    pub base_url: String,
    pub topic: String,
    /// Lookup timeout in milliseconds. 0 leaves only the request budget,
    /// `max(read_timeout, write_timeout)`, in force.
    pub timeout_ms: u64,
    /// Returned instead of `null` when the lookup fails
    #[serde(default)]
    pub fallback_text: Option<String>,
}

impl Default for FactConfig {
    fn default() -> Self {
        Self {
            base_url: "http://numbersapi.com".to_string(),
            topic: "math".to_string(),
            timeout_ms: 5000,
            fallback_text: None,
        }
    }
}
