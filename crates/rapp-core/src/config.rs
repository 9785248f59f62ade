//! Envelope codec configuration

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// What to do when a stored fingerprint does not match the reader's shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MismatchPolicy {
    /// Report no value; callers treat it as a cache miss and recompute
    #[default]
    ReturnEmpty,
    /// Fail with [`CodecError::IncompatibleSchema`](crate::CodecError::IncompatibleSchema)
    RaiseError,
}

impl MismatchPolicy {
    /// Canonical configuration name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReturnEmpty => "returnEmpty",
            Self::RaiseError => "raiseError",
        }
    }
}

impl fmt::Display for MismatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized mismatch policy name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mismatch policy {0:?} (expected returnEmpty or raiseError)")]
pub struct UnknownPolicy(pub String);

impl FromStr for MismatchPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "returnEmpty" | "return_empty" | "return-empty" => Ok(Self::ReturnEmpty),
            "raiseError" | "raise_error" | "raise-error" => Ok(Self::RaiseError),
            other => Err(UnknownPolicy(other.to_owned())),
        }
    }
}

/// Envelope codec settings
///
/// Deserializes from camelCase keys; missing keys take their defaults, so an
/// empty map yields [`EnvelopeConfig::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnvelopeConfig {
    /// Behavior on fingerprint mismatch
    pub on_mismatch: MismatchPolicy,
}

impl EnvelopeConfig {
    /// Config that raises on mismatch
    pub const fn strict() -> Self {
        Self { on_mismatch: MismatchPolicy::RaiseError }
    }

    /// Replace the mismatch policy
    #[must_use]
    pub const fn on_mismatch(mut self, policy: MismatchPolicy) -> Self {
        self.on_mismatch = policy;
        self
    }
}
