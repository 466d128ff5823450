//! Unified error type for a `load()` call.
//!
//! Every failure path — boundary I/O, decryption, parsing, passphrase
//! resolution — converges on [`LoadError`] so the public API has a single
//! error type. Each variant carries the numeric code its message quotes,
//! stable across the public surface for callers that branch on it.

use thiserror::Error;

use crate::core::envelope::EnvelopeError;
use crate::core::parser::ParseError;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    #[error("failed to read {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("decrypt error: {0}")]
    Decrypt(String),

    #[error("envelope detected but no passphrase was found")]
    KeyRequired,

    #[error("passphrase must not be empty")]
    KeyInvalid,

    #[error("crypto support is not available: {0}")]
    CryptoInit(String),
}

impl LoadError {
    /// The stable numeric code for this error kind, per the taxonomy this
    /// crate publishes (code 7, memory, and code 8, JsonParse, are reserved
    /// and never produced).
    pub fn code(&self) -> u8 {
        match self {
            LoadError::FileNotFound { .. } => 1,
            LoadError::FileRead { .. } => 2,
            LoadError::Parse(_) => 3,
            LoadError::Decrypt(_) => 4,
            LoadError::KeyRequired => 5,
            LoadError::KeyInvalid => 6,
            LoadError::CryptoInit(_) => 9,
        }
    }
}

impl From<EnvelopeError> for LoadError {
    fn from(err: EnvelopeError) -> Self {
        match err {
            EnvelopeError::KeyInvalid => LoadError::KeyInvalid,
            EnvelopeError::Decrypt(msg) => LoadError::Decrypt(msg),
            EnvelopeError::CryptoInit(msg) => LoadError::CryptoInit(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_the_published_taxonomy() {
        assert_eq!(LoadError::FileNotFound { path: "x".into() }.code(), 1);
        assert_eq!(
            LoadError::FileRead {
                path: "x".into(),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied)
            }
            .code(),
            2
        );
        assert_eq!(LoadError::Decrypt("wrong key or tampered data".into()).code(), 4);
        assert_eq!(LoadError::KeyRequired.code(), 5);
        assert_eq!(LoadError::KeyInvalid.code(), 6);
        assert_eq!(LoadError::CryptoInit("disabled".into()).code(), 9);
    }
}
