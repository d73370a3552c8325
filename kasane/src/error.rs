use kasane_pem::Label;
use thiserror::Error;

use crate::key::KeyEncodingError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("the collection can only contain one private key")]
    DuplicateKey,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("failed to decode certificate: {0}")]
    CertificateDecode(String),

    #[error("failed to encode private key: {0}")]
    KeyEncoding(#[from] KeyEncodingError),

    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The private key block is intact but its label is not one the runtime
    /// exporter can load (e.g. `ENCRYPTED PRIVATE KEY`).
    #[error("unsupported private key type: {0}")]
    UnsupportedKey(Label),

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error(transparent)]
    Pem(#[from] kasane_pem::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
