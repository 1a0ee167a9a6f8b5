//! # Env File Parser
//!
//! Parses `KEY=VALUE` lines into a [`SecretData`] table.
//!
//! ## Supported Syntax
//!
//! - Blank lines and `#` comment lines are skipped
//! - `export KEY=VALUE` (the `export` keyword is dropped)
//! - `KEY: VALUE` when the colon comes before any `=`
//! - Unquoted values are trimmed; ` # comment` suffixes are removed
//! - `'single quoted'` values are taken literally
//! - `"double quoted"` values understand `\n`, `\r`, `\t`, `\\`, `\"`, `\$`,
//!   `\!` and an escaped backtick
//! - Quoted values may span several lines
//!
//! Variable references (`$OTHER`) are never expanded, and the process
//! environment is never consulted.

use crate::error::{ParseError, Result};
use crate::secret::SecretData;
use std::io::Read;
use tracing::debug;

/// Parse an env file from a reader
///
/// # Errors
///
/// `Io` if the stream cannot be read or is not UTF-8, `Parse` for malformed
/// lines.
pub fn parse_env<R: Read>(mut input: R) -> Result<SecretData> {
    let mut content = String::new();
    input.read_to_string(&mut content)?;
    Ok(parse_env_str(&content)?)
}

/// Parse env file content held in memory
///
/// # Errors
///
/// See [`ParseError`] for the line-level failures.
pub fn parse_env_str(content: &str) -> Result<SecretData, ParseError> {
    let mut secrets = SecretData::new();
    let mut lines = content.lines().enumerate();

    while let Some((idx, raw)) = lines.next() {
        let line_no = idx + 1;
        // Trailing whitespace may belong to a quoted value that continues on
        // the next line, so only the leading side is trimmed here
        let line = raw.trim_start();

        // Skip comments and empty lines
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = strip_export(line);
        let Some((key, after_separator)) = split_key_value(line) else {
            return Err(ParseError::MissingSeparator {
                line: line_no,
                content: raw.to_string(),
            });
        };

        let key = key.trim();
        if key.is_empty() || key.contains(char::is_whitespace) {
            return Err(ParseError::InvalidKey {
                line: line_no,
                key: key.to_string(),
            });
        }

        let rest = after_separator.trim_start();
        let value = match rest.chars().next() {
            Some(quote @ ('"' | '\'')) => {
                let mut buffer = rest[1..].to_string();
                loop {
                    if let Some(end) = find_closing_quote(&buffer, quote) {
                        let trailing = buffer[end + 1..].trim();
                        if !trailing.is_empty() && !trailing.starts_with('#') {
                            return Err(ParseError::TrailingCharacters {
                                line: line_no,
                                trailing: trailing.to_string(),
                            });
                        }
                        let inner = &buffer[..end];
                        break if quote == '"' {
                            unescape_double_quoted(inner)
                        } else {
                            inner.to_string()
                        };
                    }

                    // Multi-line value: keep consuming until the quote closes
                    match lines.next() {
                        Some((_, next)) => {
                            buffer.push('\n');
                            buffer.push_str(next);
                        }
                        None => {
                            return Err(ParseError::UnterminatedQuote {
                                line: line_no,
                                key: key.to_string(),
                                quote,
                            });
                        }
                    }
                }
            }
            _ => strip_inline_comment(after_separator).trim().to_string(),
        };

        secrets.insert(key.to_string(), value);
    }

    debug!("Parsed {} entries from env input", secrets.len());
    Ok(secrets)
}

/// Drop a leading `export` keyword
fn strip_export(line: &str) -> &str {
    line.strip_prefix("export")
        .filter(|rest| rest.starts_with(char::is_whitespace))
        .map_or(line, str::trim_start)
}

/// Split on the first `=`, or on a `:` that precedes every `=`
fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let separator = match (line.find('='), line.find(':')) {
        (Some(eq), Some(colon)) => eq.min(colon),
        (Some(idx), None) | (None, Some(idx)) => idx,
        (None, None) => return None,
    };
    Some((&line[..separator], &line[separator + 1..]))
}

/// Byte offset of the quote closing a value, skipping `\"` inside double quotes
fn find_closing_quote(s: &str, quote: char) -> Option<usize> {
    if quote == '\'' {
        return s.find('\'');
    }

    let mut escaped = false;
    for (idx, c) in s.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => return Some(idx),
            _ => {}
        }
    }
    None
}

fn unescape_double_quoted(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(escaped @ ('\\' | '"' | '$' | '`' | '!')) => out.push(escaped),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Cut an unquoted value at the first `#` that follows whitespace
fn strip_inline_comment(value: &str) -> &str {
    let mut previous_is_space = false;
    for (idx, c) in value.char_indices() {
        if c == '#' && previous_is_space {
            return &value[..idx];
        }
        previous_is_space = c.is_whitespace();
    }
    value
}
