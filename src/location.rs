//! Geographic location encoding for the `uule` parameter.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::{Result, SearchError};

const UULE_PREFIX: &str = "w+CAIQICI";

/// Length key: the character at index `n` marks a canonical name of `n` bytes.
const LENGTH_KEY: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// A location that results should be localized to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Google canonical name, e.g. `"Paris,Ile-de-France,France"`.
    Canonical(String),
    /// A `uule` token produced elsewhere, passed through untouched.
    Token(String),
}

impl Location {
    /// Location from a canonical name.
    pub fn canonical(name: impl Into<String>) -> Self {
        Self::Canonical(name.into())
    }

    /// Location from a pre-encoded token.
    pub fn token(token: impl Into<String>) -> Self {
        Self::Token(token.into())
    }

    /// Returns the `uule` value for this location.
    pub fn uule(&self) -> Result<String> {
        match self {
            Self::Token(token) => Ok(token.clone()),
            Self::Canonical(name) => {
                let name = name.trim();
                let key = LENGTH_KEY.get(name.len()).ok_or_else(|| {
                    SearchError::InvalidParameter(format!(
                        "canonical location name is {} bytes, at most {} supported",
                        name.len(),
                        LENGTH_KEY.len() - 1
                    ))
                })?;
                Ok(format!(
                    "{}{}{}",
                    UULE_PREFIX,
                    char::from(*key),
                    STANDARD.encode(name)
                ))
            }
        }
    }
}
