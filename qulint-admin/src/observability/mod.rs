//! Observability (structured logging)
//!
//! Logs are written to stderr so generated statements printed on stdout stay
//! clean enough to pipe or paste.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize logging with defaults for the current build
///
/// Sets up:
/// - Pretty formatting in debug builds, JSON in release builds
/// - Environment-based log level filtering (`RUST_LOG`)
///
/// # Example
///
/// ```rust,no_run
/// use qulint_admin::observability;
///
/// # fn main() -> anyhow::Result<()> {
/// observability::init()?;
/// tracing::info!("scaffolding started");
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init() -> anyhow::Result<()> {
    init_with(&ObservabilityConfig::default())
}

/// Initialize logging from an explicit configuration
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init_with(config: &ObservabilityConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_directive));

    let registry = tracing_subscriber::registry().with(env_filter);
    if config.json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    }

    Ok(())
}

/// Observability configuration
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub default_directive: String,

    /// Emit JSON lines instead of pretty output
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self {
                default_directive: "info,qulint_admin=debug".to_string(),
                json: false,
            }
        } else {
            Self {
                default_directive: "warn".to_string(),
                json: true,
            }
        }
    }
}

impl ObservabilityConfig {
    /// Create a config with the given default filter directive
    pub fn new(default_directive: impl Into<String>) -> Self {
        Self {
            default_directive: default_directive.into(),
            ..Default::default()
        }
    }

    /// Emit JSON lines
    #[must_use]
    pub const fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Raise the default level to `debug` for this crate
    #[must_use]
    pub fn verbose(mut self) -> Self {
        self.default_directive = "info,qulint_admin=debug,qulint_admin_cli_lib=debug".to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_build() {
        let config = ObservabilityConfig::default();
        assert_eq!(config.json, !cfg!(debug_assertions));
        assert!(!config.default_directive.is_empty());
    }

    #[test]
    fn test_builder() {
        let config = ObservabilityConfig::new("trace").with_json(true);
        assert_eq!(config.default_directive, "trace");
        assert!(config.json);

        let verbose = config.verbose();
        assert!(verbose.default_directive.contains("qulint_admin=debug"));
    }

    #[test]
    fn test_second_init_fails() {
        let config = ObservabilityConfig::new("off");
        let _ = init_with(&config);
        assert!(init_with(&config).is_err());
    }
}
