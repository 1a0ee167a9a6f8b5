//! # Secret Env Codec
//!
//! Converts between env files (`KEY=VALUE` lines) and Kubernetes `Secret`
//! manifests (YAML or JSON) whose `data` values are base64-encoded.
//!
//! ## Encode
//!
//! ```rust
//! use secret_env_codec::{encode, Format};
//!
//! let manifest = encode("a=b".as_bytes(), Format::Json, "my-secret").unwrap();
//! assert!(String::from_utf8(manifest).unwrap().contains("\"a\": \"Yg==\""));
//! ```
//!
//! ## Decode
//!
//! ```rust
//! use secret_env_codec::{decode, Format};
//!
//! let manifest = "apiVersion: v1\nkind: Secret\ndata:\n  a: Yg==\n";
//! let env = decode(manifest.as_bytes(), Format::Yaml).unwrap();
//! assert_eq!(env, b"a=b");
//! ```
//!
//! Both directions are pure, single-pass transformations: the caller owns
//! every file handle and the library holds no global state.

pub mod constants;
pub mod decode;
pub mod document;
pub mod encode;
pub mod envfile;
pub mod error;
pub mod format;
pub mod secret;

pub use decode::{
    decode, decode_json, decode_with, decode_with_style, decode_yaml, double_quote_escape,
    extract_data, render_lines, LineStyle,
};
pub use document::Document;
pub use encode::{encode, encode_json, encode_with, encode_yaml};
pub use envfile::{parse_env, parse_env_str};
pub use error::{CodecError, ErrorKind, ParseError, Result};
pub use format::{DocumentCodec, Format, JsonCodec, UnknownFormatError, YamlCodec};
pub use secret::{Secret, SecretData, SecretManifest, SecretMetadata};
