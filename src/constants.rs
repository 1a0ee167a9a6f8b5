//! # Constants
//!
//! Shared constants for the Secret envelope and the command-line defaults.
//!
//! The CLI defaults can be overridden via environment variables (see
//! `CliConfig::from_env` in the binary).

/// `apiVersion` of every generated Secret
pub const SECRET_API_VERSION: &str = "v1";

/// `kind` of every generated Secret
pub const SECRET_KIND: &str = "Secret";

/// `type` of every generated Secret
/// Only opaque secrets are produced; tls and dockerconfigjson are out of scope
pub const SECRET_TYPE: &str = "Opaque";

/// Name of the manifest field holding the base64-encoded entries
pub const SECRET_DATA_FIELD: &str = "data";

/// Secret name used when neither `--name` nor `--output` is given
pub const DEFAULT_SECRET_NAME: &str = "mysecret";

/// Encode format used when `--format` is not given
pub const DEFAULT_FORMAT: &str = "yaml";

/// Log level used when `RUST_LOG` is not set
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Output file suffixes that are recognized as already carrying a format
pub const MANIFEST_SUFFIXES: [&str; 2] = [".yaml", ".json"];
