//! # Formats
//!
//! Manifest serialization formats and their codecs.
//!
//! [`Format`] is the closed set of supported formats. Each variant maps to
//! one [`DocumentCodec`] implementation, which the encode/decode pipelines
//! use through a trait object.

use crate::document::Document;
use crate::error::{CodecError, ParseError, Result};
use crate::secret::Secret;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::str::FromStr;
use thiserror::Error;

/// Manifest serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    #[default]
    Yaml,
    Json,
}

/// Returned when parsing an unknown format name
#[derive(Debug, Error)]
#[error("format must be either yaml or json, got {0:?}")]
pub struct UnknownFormatError(pub String);

impl Format {
    /// File extension (without the dot)
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Format::Yaml => "yaml",
            Format::Json => "json",
        }
    }

    /// Pick a format from a file name: `.json` means JSON, anything else YAML
    #[must_use]
    pub fn from_path_hint(path: &str) -> Self {
        if path.to_ascii_lowercase().ends_with(".json") {
            Format::Json
        } else {
            Format::Yaml
        }
    }

    /// The codec implementing this format
    #[must_use]
    pub fn codec(self) -> &'static dyn DocumentCodec {
        match self {
            Format::Yaml => &YamlCodec,
            Format::Json => &JsonCodec,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Format {
    type Err = UnknownFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(Format::Yaml),
            "json" => Ok(Format::Json),
            _ => Err(UnknownFormatError(s.to_string())),
        }
    }
}

/// Serializes Secrets to, and parses documents from, one format
pub trait DocumentCodec {
    /// The format this codec handles
    fn format(&self) -> Format;

    /// Render a Secret manifest, base64-encoding its values
    ///
    /// # Errors
    ///
    /// `Serialize` if the serializer fails.
    fn encode_secret(&self, secret: &Secret) -> Result<Vec<u8>>;

    /// Parse a document into its loosely-typed form
    ///
    /// # Errors
    ///
    /// `Parse` with the underlying parser's error for malformed input.
    fn decode_document(&self, input: &mut dyn Read) -> Result<Document>;
}

/// YAML codec backed by `serde_yaml`
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

impl DocumentCodec for YamlCodec {
    fn format(&self) -> Format {
        Format::Yaml
    }

    fn encode_secret(&self, secret: &Secret) -> Result<Vec<u8>> {
        let yaml = serde_yaml::to_string(&secret.to_manifest()).map_err(|e| {
            CodecError::Serialize {
                format: Format::Yaml,
                message: e.to_string(),
            }
        })?;
        Ok(yaml.into_bytes())
    }

    /// Only the first document of a multi-document stream is read; an empty
    /// stream is `null`.
    fn decode_document(&self, input: &mut dyn Read) -> Result<Document> {
        let Some(first) = serde_yaml::Deserializer::from_reader(input).next() else {
            return Ok(Document::Null);
        };
        let value = serde_yaml::Value::deserialize(first).map_err(ParseError::Yaml)?;
        Ok(Document::from(value))
    }
}

/// JSON codec backed by `serde_json`
///
/// Output is tab-indented for readability.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl DocumentCodec for JsonCodec {
    fn format(&self) -> Format {
        Format::Json
    }

    fn encode_secret(&self, secret: &Secret) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        secret
            .to_manifest()
            .serialize(&mut serializer)
            .map_err(|e| CodecError::Serialize {
                format: Format::Json,
                message: e.to_string(),
            })?;
        Ok(buf)
    }

    fn decode_document(&self, input: &mut dyn Read) -> Result<Document> {
        let value: serde_json::Value = serde_json::from_reader(input).map_err(ParseError::Json)?;
        Ok(Document::from(value))
    }
}
