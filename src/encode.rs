//! # Encode
//!
//! env file → Kubernetes Secret manifest.

use crate::envfile::parse_env;
use crate::error::Result;
use crate::format::{DocumentCodec, Format, JsonCodec, YamlCodec};
use crate::secret::Secret;
use std::io::Read;
use tracing::debug;

/// Parse env lines from `input` and render them as a Secret named `name`
///
/// # Errors
///
/// `Parse` for malformed env lines, `Io` if the input cannot be read.
pub fn encode<R: Read>(input: R, format: Format, name: &str) -> Result<Vec<u8>> {
    encode_with(input, format.codec(), name)
}

/// Like [`encode`], with an explicit codec
///
/// # Errors
///
/// See [`encode`].
pub fn encode_with<R: Read>(input: R, encoder: &dyn DocumentCodec, name: &str) -> Result<Vec<u8>> {
    let data = parse_env(input)?;
    debug!(
        "Encoding {} entries into Secret {:?} as {}",
        data.len(),
        name,
        encoder.format()
    );
    encoder.encode_secret(&Secret::new(name, data))
}

/// Render a Secret as tab-indented JSON
///
/// # Errors
///
/// `Serialize` if serialization fails.
pub fn encode_json(secret: &Secret) -> Result<Vec<u8>> {
    JsonCodec.encode_secret(secret)
}

/// Render a Secret as YAML
///
/// # Errors
///
/// `Serialize` if serialization fails.
pub fn encode_yaml(secret: &Secret) -> Result<Vec<u8>> {
    YamlCodec.encode_secret(secret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::secret::SecretData;

    const JSON_EMPTY: &str = "{
\t\"apiVersion\": \"v1\",
\t\"data\": {},
\t\"kind\": \"Secret\",
\t\"metadata\": {
\t\t\"name\": \"json-empty\"
\t},
\t\"type\": \"Opaque\"
}";

    const JSON_ONE: &str = "{
\t\"apiVersion\": \"v1\",
\t\"data\": {
\t\t\"a\": \"Yg==\"
\t},
\t\"kind\": \"Secret\",
\t\"metadata\": {
\t\t\"name\": \"json-one\"
\t},
\t\"type\": \"Opaque\"
}";

    const YAML_EMPTY: &str = "apiVersion: v1
data: {}
kind: Secret
metadata:
  name: yaml-empty
type: Opaque
";

    const YAML_ONE: &str = "apiVersion: v1
data:
  a: Yg==
kind: Secret
metadata:
  name: yaml-one
type: Opaque
";

    fn one_entry(name: &str) -> Secret {
        Secret::new(name, SecretData::from([("a".to_string(), "b".to_string())]))
    }

    #[test]
    fn test_encode_json_empty() {
        let out = encode_json(&Secret::new("json-empty", SecretData::new())).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), JSON_EMPTY);
    }

    #[test]
    fn test_encode_json_one() {
        let out = encode_json(&one_entry("json-one")).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), JSON_ONE);
    }

    #[test]
    fn test_encode_yaml_empty() {
        let out = encode_yaml(&Secret::new("yaml-empty", SecretData::new())).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), YAML_EMPTY);
    }

    #[test]
    fn test_encode_yaml_one() {
        let out = encode_yaml(&one_entry("yaml-one")).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), YAML_ONE);
    }

    #[test]
    fn test_encode_from_reader() {
        let cases = [
            ("", Format::Json, "json-empty", JSON_EMPTY),
            ("", Format::Yaml, "yaml-empty", YAML_EMPTY),
            ("a=b", Format::Json, "json-one", JSON_ONE),
            ("a=b", Format::Yaml, "yaml-one", YAML_ONE),
        ];

        for (input, format, name, expected) in cases {
            let out = encode(input.as_bytes(), format, name).unwrap();
            assert_eq!(
                String::from_utf8(out).unwrap(),
                expected,
                "encoding {input:?} as {format} should match"
            );
        }
    }

    #[test]
    fn test_encode_rejects_line_without_separator() {
        let err = encode("-1".as_bytes(), Format::Yaml, "error-test").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.to_string().contains("cannot separate key from value"));
    }

    #[test]
    fn test_encode_with_explicit_codec() {
        let out = encode_with("a=b".as_bytes(), &JsonCodec, "json-one").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), JSON_ONE);
    }
}
