//! Private key encoding.
//!
//! Turning key material into a PEM block is left to the caller through
//! [`PrivateKeyEncoder`]. Implementations for P-256 keys are provided.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use kasane_pem::Pem;
use p256::SecretKey;
use pkcs8::{EncodePrivateKey, LineEnding};
use rand_core::OsRng;
use thiserror::Error;

const LEGACY_PEM: &str = "legacy-pem";
const PKCS8: &str = "pkcs8";

/// Output encoding requested from a [`PrivateKeyEncoder`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum KeyFormat {
    /// `PRIVATE KEY` / `ENCRYPTED PRIVATE KEY`
    #[default]
    Pkcs8,
    /// Algorithm specific block such as `EC PRIVATE KEY` or `RSA PRIVATE KEY`
    LegacyPem,
}

impl KeyFormat {
    /// `"legacy-pem"` (any case) selects [`KeyFormat::LegacyPem`]; everything
    /// else, including an empty hint, selects [`KeyFormat::Pkcs8`].
    pub fn from_hint(hint: &str) -> Self {
        if hint.eq_ignore_ascii_case(LEGACY_PEM) {
            KeyFormat::LegacyPem
        } else {
            KeyFormat::Pkcs8
        }
    }
}

impl Display for KeyFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyFormat::Pkcs8 => write!(f, "{}", PKCS8),
            KeyFormat::LegacyPem => write!(f, "{}", LEGACY_PEM),
        }
    }
}

impl FromStr for KeyFormat {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(KeyFormat::from_hint(s))
    }
}

#[derive(Debug, Error)]
pub enum KeyEncodingError {
    #[error("password protection is not supported for {format} keys")]
    EncryptionNotSupported { format: KeyFormat },

    #[error("key serialization failed: {0}")]
    Serialization(String),

    #[error(transparent)]
    Pem(#[from] kasane_pem::Error),
}

/// Produces the PEM block for a signing key.
///
/// `password` is `None` for an unencrypted block and `Some` for a
/// password-protected one.
pub trait PrivateKeyEncoder {
    fn encode_private_key(
        &self,
        password: Option<&[u8]>,
        format: KeyFormat,
    ) -> Result<Pem, KeyEncodingError>;
}

impl PrivateKeyEncoder for SecretKey {
    fn encode_private_key(
        &self,
        password: Option<&[u8]>,
        format: KeyFormat,
    ) -> Result<Pem, KeyEncodingError> {
        let encoded = match (format, password) {
            (KeyFormat::Pkcs8, None) => self
                .to_pkcs8_pem(LineEnding::LF)
                .map_err(|e| KeyEncodingError::Serialization(e.to_string()))?,
            (KeyFormat::Pkcs8, Some(password)) => self
                .to_pkcs8_encrypted_pem(&mut OsRng, password, LineEnding::LF)
                .map_err(|e| KeyEncodingError::Serialization(e.to_string()))?,
            (KeyFormat::LegacyPem, None) => self
                .to_sec1_pem(LineEnding::LF)
                .map_err(|e| KeyEncodingError::Serialization(e.to_string()))?,
            (KeyFormat::LegacyPem, Some(_)) => {
                return Err(KeyEncodingError::EncryptionNotSupported { format });
            }
        };
        Ok(encoded.parse::<Pem>()?)
    }
}

impl PrivateKeyEncoder for p256::ecdsa::SigningKey {
    fn encode_private_key(
        &self,
        password: Option<&[u8]>,
        format: KeyFormat,
    ) -> Result<Pem, KeyEncodingError> {
        SecretKey::from(self).encode_private_key(password, format)
    }
}
