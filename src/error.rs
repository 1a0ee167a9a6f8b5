//! # Errors
//!
//! Error types for encoding and decoding secrets.
//!
//! Every failure is terminal for the operation that raised it: no partial
//! output is ever returned alongside an error.

use crate::format::Format;
use std::string::FromUtf8Error;
use thiserror::Error;

/// Malformed input: an env-file line, or YAML/JSON document syntax
///
/// Document syntax errors carry the underlying parser's error untouched so
/// its message (including line/column) is surfaced verbatim.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: cannot separate key from value in {content:?}")]
    MissingSeparator { line: usize, content: String },
    #[error("line {line}: invalid key {key:?}")]
    InvalidKey { line: usize, key: String },
    #[error("line {line}: unterminated {quote} quoted value for key {key:?}")]
    UnterminatedQuote {
        line: usize,
        key: String,
        quote: char,
    },
    #[error("line {line}: unexpected characters after closing quote: {trailing:?}")]
    TrailingCharacters { line: usize, trailing: String },
    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

/// Error type for the encode and decode pipelines
#[derive(Debug, Error)]
pub enum CodecError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("unexpected type: {found} in {context}")]
    UnexpectedType {
        context: String,
        found: &'static str,
    },
    #[error("illegal base64 data for key {key:?}: {source}")]
    InvalidBase64 {
        key: String,
        #[source]
        source: base64::DecodeError,
    },
    #[error("decoded value for key {key:?} is not valid UTF-8: {source}")]
    InvalidUtf8 {
        key: String,
        #[source]
        source: FromUtf8Error,
    },
    #[error("failed to serialize secret as {format}: {message}")]
    Serialize { format: Format, message: String },
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of a [`CodecError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    UnexpectedType,
    InvalidEncoding,
    Serialize,
    Io,
}

impl CodecError {
    pub(crate) fn unexpected_type(context: impl Into<String>, found: &'static str) -> Self {
        CodecError::UnexpectedType {
            context: context.into(),
            found,
        }
    }

    /// Classify this error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::Parse(_) => ErrorKind::Parse,
            CodecError::UnexpectedType { .. } => ErrorKind::UnexpectedType,
            CodecError::InvalidBase64 { .. } | CodecError::InvalidUtf8 { .. } => {
                ErrorKind::InvalidEncoding
            }
            CodecError::Serialize { .. } => ErrorKind::Serialize,
            CodecError::Io(_) => ErrorKind::Io,
        }
    }

    /// Get remediation guidance for this error
    #[must_use]
    pub fn remediation(&self) -> String {
        match self {
            CodecError::Parse(ParseError::Yaml(_) | ParseError::Json(_)) => {
                "Check the manifest syntax, or pass --format if the file extension is misleading"
                    .to_string()
            }
            CodecError::Parse(_) => {
                "Each non-comment line must look like KEY=VALUE (optionally prefixed with `export`)"
                    .to_string()
            }
            CodecError::UnexpectedType { context, .. } => {
                format!(
                    "Check {context}: a Secret is a mapping whose `data` maps string keys to base64 strings"
                )
            }
            CodecError::InvalidBase64 { key, .. } => {
                format!("Value of {key:?} must be standard base64 (stringData is not supported)")
            }
            CodecError::InvalidUtf8 { key, .. } => {
                format!("Value of {key:?} holds binary data, which cannot be written to an env file")
            }
            CodecError::Serialize { .. } => "This is a bug; please report it".to_string(),
            CodecError::Io(e) => format!("Input could not be read: {e}"),
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T, E = CodecError> = std::result::Result<T, E>;
