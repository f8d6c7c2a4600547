// Configuration module entry point
// Loads the immutable service configuration and holds the shared runtime state

mod state;
mod types;

use config::builder::DefaultState;
use config::ConfigBuilder;
use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, FactConfig};

/// Default config file name (without extension)
pub const DEFAULT_CONFIG_PATH: &str = "config";

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    let fact = FactConfig::default();
    builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 4000)?
        .set_default("logging.level", "info")?
        .set_default("logging.access_log", true)?
        .set_default("performance.keep_alive_timeout", 75)?
        .set_default("performance.read_timeout", 30)?
        .set_default("performance.write_timeout", 30)?
        .set_default("http.server_name", "number-classifier")?
        .set_default("classify.parse_policy", "lenient")?
        .set_default("fact.base_url", fact.base_url)?
        .set_default("fact.topic", fact.topic)?
        .set_default("fact.timeout_ms", fact.timeout_ms)
}

impl Config {
    /// Load configuration from specified file path (without extension).
    ///
    /// Precedence: defaults < file < `SERVER_*` environment < `PORT`.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = with_defaults(config::Config::builder())?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("SERVER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from TOML text layered over the defaults
    #[cfg(test)]
    pub fn from_toml_str(toml: &str) -> Result<Self, config::ConfigError> {
        with_defaults(config::Config::builder())?
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ParsePolicy;
    use std::sync::Mutex;

    // Tests touching process environment run one at a time
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const MISSING_CONFIG: &str = "no-such-config-file";

    fn clear_env() {
        std::env::remove_var("PORT");
        std::env::remove_var("SERVER_FACT__TOPIC");
        std::env::remove_var("SERVER_SERVER__HOST");
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::from_toml_str("").unwrap();
        assert_eq!(cfg.server.port, 4000);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.workers, None);
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert_eq!(cfg.classify.parse_policy, ParsePolicy::Lenient);
        assert_eq!(cfg.fact.base_url, "http://numbersapi.com");
        assert_eq!(cfg.fact.topic, "math");
        assert_eq!(cfg.fact.timeout_ms, 5000);
        assert_eq!(cfg.fact.fallback_text, None);
        assert!(cfg.http.health.enabled);
        assert_eq!(cfg.http.health.liveness_path, "/healthz");
    }

    #[test]
    fn test_file_overrides() {
        let cfg = Config::from_toml_str(
            r#"
            [server]
            port = 8080
            workers = 2

            [classify]
            parse_policy = "strict"

            [fact]
            timeout_ms = 0
            fallback_text = "No fun fact available."
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.workers, Some(2));
        assert_eq!(cfg.classify.parse_policy, ParsePolicy::Strict);
        assert_eq!(cfg.fact.timeout_ms, 0);
        assert_eq!(
            cfg.fact.fallback_text.as_deref(),
            Some("No fun fact available.")
        );
    }

    #[test]
    fn test_unknown_parse_policy_rejected() {
        let result = Config::from_toml_str("[classify]\nparse_policy = \"fuzzy\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_socket_addr() {
        let cfg = Config::from_toml_str("[server]\nhost = \"127.0.0.1\"").unwrap();
        assert_eq!(cfg.socket_addr().unwrap().to_string(), "127.0.0.1:4000");

        let cfg = Config::from_toml_str("[server]\nhost = \"not a host\"").unwrap();
        assert!(cfg.socket_addr().is_err());
    }

    #[test]
    fn test_request_timeout_uses_larger_value() {
        let cfg = Config::from_toml_str("[performance]\nread_timeout = 5\nwrite_timeout = 9")
            .unwrap();
        assert_eq!(cfg.performance.request_timeout().as_secs(), 9);
    }

    #[test]
    fn test_load_without_file_or_port_uses_4000() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        clear_env();

        let cfg = Config::load_from(MISSING_CONFIG).unwrap();
        assert_eq!(cfg.server.port, 4000);
        assert_eq!(cfg.fact.topic, "math");
    }

    #[test]
    fn test_port_env_overrides_default() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        clear_env();
        std::env::set_var("PORT", "8123");

        let result = Config::load_from(MISSING_CONFIG);
        clear_env();
        assert_eq!(result.unwrap().server.port, 8123);
    }

    #[test]
    fn test_invalid_port_env_rejected() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        clear_env();
        std::env::set_var("PORT", "not-a-port");

        let result = Config::load_from(MISSING_CONFIG);
        clear_env();
        assert!(result.is_err());
    }

    #[test]
    fn test_prefixed_env_sets_nested_keys() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        clear_env();
        std::env::set_var("SERVER_FACT__TOPIC", "trivia");
        std::env::set_var("SERVER_SERVER__HOST", "127.0.0.1");

        let result = Config::load_from(MISSING_CONFIG);
        clear_env();
        let cfg = result.unwrap();
        assert_eq!(cfg.fact.topic, "trivia");
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 4000);
    }
}
