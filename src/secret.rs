//! # Secret
//!
//! The Secret value table and the Kubernetes `Secret` manifest shape.

use crate::constants::{SECRET_API_VERSION, SECRET_KIND, SECRET_TYPE};
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw (unencoded) secret values keyed by name
///
/// A sorted map keeps generated manifests and decoded env files stable
/// across runs.
pub type SecretData = BTreeMap<String, String>;

/// A named set of secret values, ready to be encoded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Secret {
    pub name: String,
    pub data: SecretData,
}

impl Secret {
    #[must_use]
    pub fn new(name: impl Into<String>, data: SecretData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Build the manifest, base64-encoding every value
    #[must_use]
    pub fn to_manifest(&self) -> SecretManifest {
        let data = self
            .data
            .iter()
            .map(|(key, value)| (key.clone(), general_purpose::STANDARD.encode(value)))
            .collect();

        SecretManifest {
            api_version: SECRET_API_VERSION.to_string(),
            data,
            kind: SECRET_KIND.to_string(),
            metadata: SecretMetadata {
                name: self.name.clone(),
            },
            secret_type: SECRET_TYPE.to_string(),
        }
    }
}

/// Kubernetes `Secret` manifest (opaque secrets only)
///
/// Fields are declared in alphabetical order so both serializers emit
/// `apiVersion`, `data`, `kind`, `metadata`, `type`. `data` is always
/// serialized, as `{}` when empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretManifest {
    pub api_version: String,
    /// Base64-encoded values
    pub data: BTreeMap<String, String>,
    pub kind: String,
    pub metadata: SecretMetadata,
    #[serde(rename = "type")]
    pub secret_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretMetadata {
    pub name: String,
}
