//! # CLI Configuration
//!
//! Defaults for the command-line tool, loaded from environment variables.

use secret_env_codec::constants::{DEFAULT_FORMAT, DEFAULT_LOG_LEVEL, DEFAULT_SECRET_NAME};
use secret_env_codec::Format;

/// Command-line defaults
///
/// Flags always win; these values only fill in what was not passed.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Secret name used when neither `--name` nor `--output` is given
    pub default_secret_name: String,
    /// Encode format used when `--format` is not given
    pub default_format: Format,
    /// Log level (error, warn, info, debug, trace) when `RUST_LOG` is unset
    pub log_level: String,
    /// Enable color in log output
    pub log_enable_color: bool,
}

impl CliConfig {
    /// Load configuration from environment variables with defaults
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default_format: Format = DEFAULT_FORMAT.parse().unwrap_or_default();
        Self {
            default_secret_name: lookup("SECRET_ENV_DEFAULT_NAME")
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SECRET_NAME.to_string()),
            default_format: var_or_default(&lookup, "SECRET_ENV_FORMAT", default_format),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            log_enable_color: lookup("LOG_ENABLE_COLOR")
                .map(|v| {
                    let v_lower = v.to_lowercase();
                    v_lower == "true" || v_lower == "1" || v_lower == "yes" || v_lower == "on"
                })
                .unwrap_or(false),
        }
    }
}

/// Read a variable and parse it, falling back to `default` when unset or invalid
fn var_or_default<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    lookup(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
