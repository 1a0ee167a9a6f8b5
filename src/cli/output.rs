//! # Output Paths
//!
//! File naming rules for the command-line tool. The library only deals in
//! bytes; everything that knows about paths and suffixes lives here.

use secret_env_codec::constants::MANIFEST_SUFFIXES;
use secret_env_codec::Format;
use std::path::Path;

/// Whether `path` already ends in `.yaml` or `.json`
pub fn has_manifest_suffix(path: &str) -> bool {
    MANIFEST_SUFFIXES
        .iter()
        .any(|suffix| path.ends_with(suffix))
}

/// Remove a trailing `.yaml`/`.json`, if any
pub fn trim_manifest_suffix(path: &str) -> &str {
    MANIFEST_SUFFIXES
        .iter()
        .find_map(|suffix| path.strip_suffix(suffix))
        .unwrap_or(path)
}

/// Path the encoded manifest is written to: `<output>.<format>` unless the
/// output already carries a manifest suffix
pub fn encode_output_path(output: &str, format: Format) -> String {
    if has_manifest_suffix(output) {
        output.to_string()
    } else {
        format!("{output}.{}", format.extension())
    }
}

/// Secret name: `--name`, else the output file name without its suffix,
/// else the configured default
pub fn resolve_secret_name(name: Option<&str>, output: Option<&str>, default: &str) -> String {
    if let Some(name) = name.filter(|n| !n.is_empty()) {
        return name.to_string();
    }

    output
        .and_then(|out| Path::new(out).file_name())
        .and_then(|file| file.to_str())
        .map(trim_manifest_suffix)
        .filter(|stem| !stem.is_empty())
        .map_or_else(|| default.to_string(), str::to_string)
}
