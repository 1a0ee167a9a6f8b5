//! # Decode
//!
//! Kubernetes Secret manifest → env file.
//!
//! The manifest is parsed generically, normalized to a string-keyed map, and
//! its `data` entries are base64-decoded, shell-escaped and rendered as
//! sorted `KEY=VALUE` lines.

use crate::constants::SECRET_DATA_FIELD;
use crate::document::Document;
use crate::error::{CodecError, Result};
use crate::format::{DocumentCodec, Format, JsonCodec, YamlCodec};
use crate::secret::SecretData;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use std::io::Read;
use tracing::debug;

/// Standard alphabet with padding, tolerating non-zero trailing bits
const SECRET_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// How decoded lines are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    /// `KEY=ESCAPED_VALUE`
    #[default]
    Bare,
    /// `KEY="ESCAPED_VALUE"`, which parses back to the original value
    Quoted,
}

/// Decode a Secret manifest in the given format into env lines
///
/// # Errors
///
/// `Parse` for malformed documents, `UnexpectedType` when the document or
/// its `data` is not a mapping, `InvalidBase64`/`InvalidUtf8` for values
/// that are not base64-encoded text.
pub fn decode<R: Read>(input: R, format: Format) -> Result<Vec<u8>> {
    decode_with(input, format.codec())
}

/// Like [`decode`], with an explicit codec
///
/// # Errors
///
/// See [`decode`].
pub fn decode_with<R: Read>(input: R, decoder: &dyn DocumentCodec) -> Result<Vec<u8>> {
    decode_with_style(input, decoder, LineStyle::Bare)
}

/// Like [`decode_with`], choosing how lines are rendered
///
/// # Errors
///
/// See [`decode`].
pub fn decode_with_style<R: Read>(
    mut input: R,
    decoder: &dyn DocumentCodec,
    style: LineStyle,
) -> Result<Vec<u8>> {
    let document = decoder.decode_document(&mut input)?;
    let data = extract_data(document)?;
    debug!(
        "Decoded {} entries from {} manifest",
        data.len(),
        decoder.format()
    );
    Ok(render_lines(&data, style).into_bytes())
}

/// Parse a JSON document
///
/// # Errors
///
/// `Parse` if the input is not valid JSON.
pub fn decode_json<R: Read>(mut input: R) -> Result<Document> {
    JsonCodec.decode_document(&mut input)
}

/// Parse a YAML document
///
/// # Errors
///
/// `Parse` if the input is not valid YAML.
pub fn decode_yaml<R: Read>(mut input: R) -> Result<Document> {
    YamlCodec.decode_document(&mut input)
}

/// Pull the decoded `data` table out of a parsed manifest
///
/// A missing or `null` `data` field yields an empty table.
///
/// # Errors
///
/// See [`decode`].
pub fn extract_data(document: Document) -> Result<SecretData> {
    let mut manifest = document.into_string_map("the document")?;

    let entries = match manifest.remove(SECRET_DATA_FIELD) {
        None | Some(Document::Null) => return Ok(SecretData::new()),
        Some(data) => data.into_string_map("`data`")?,
    };

    let mut secrets = SecretData::new();
    for (key, value) in entries {
        let encoded = value.into_scalar_string(&format!("`data.{key}`"))?;
        // Wrapped base64 (line breaks every 76 columns) is accepted
        let encoded: Vec<u8> = encoded
            .bytes()
            .filter(|b| !matches!(b, b'\r' | b'\n'))
            .collect();
        let decoded = match SECRET_BASE64.decode(&encoded) {
            Ok(bytes) => bytes,
            Err(source) => return Err(CodecError::InvalidBase64 { key, source }),
        };
        let decoded = match String::from_utf8(decoded) {
            Ok(text) => text,
            Err(source) => return Err(CodecError::InvalidUtf8 { key, source }),
        };
        secrets.insert(key, decoded);
    }
    Ok(secrets)
}

/// Render entries as env lines, sorted by full line text and joined by `\n`
#[must_use]
pub fn render_lines(data: &SecretData, style: LineStyle) -> String {
    let mut lines: Vec<String> = data
        .iter()
        .map(|(key, value)| {
            let escaped = double_quote_escape(value);
            match style {
                LineStyle::Bare => format!("{key}={escaped}"),
                LineStyle::Quoted => format!("{key}=\"{escaped}\""),
            }
        })
        .collect();
    lines.sort();
    lines.join("\n")
}

/// Escape a value for use inside a double-quoted shell string
///
/// `\`, `"`, `` ` ``, `$` and `!` get a backslash prefix; newline and
/// carriage return become the literal sequences `\n` and `\r`.
#[must_use]
pub fn double_quote_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' | '"' | '`' | '$' | '!' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}
