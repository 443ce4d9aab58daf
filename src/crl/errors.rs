use thiserror::Error;

use crate::crypto;
use crate::armor::PemError;

/// CRL-related errors
#[derive(Error, Debug)]
pub enum CrlError {
    #[error("CRL decoding failed: {0}")]
    Decode(#[from] rasn::error::DecodeError),

    #[error("CRL encoding failed: {0}")]
    Encode(#[from] rasn::error::EncodeError),

    #[error("CRL structure mismatch: {0}")]
    SchemaMismatch(String),

    #[error("PEM error: {0}")]
    Pem(#[from] PemError),

    #[error("Missing key material: {0}")]
    MissingKeyMaterial(&'static str),

    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Malformed algorithm parameters: {0}")]
    MalformedParameters(String),

    #[error("Crypto engine error: {0}")]
    CryptoEngine(#[from] crypto::Error),

    #[error("Export failed: {0}")]
    Export(#[from] serde_json::Error),
}

/// Convenient Result type alias
pub type CrlResult<T> = Result<T, CrlError>;
