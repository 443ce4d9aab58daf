use openssl::error::ErrorStack;
use thiserror::Error;

pub type CryptoResult<T> = Result<T, Error>;

/// Error type for cryptographic operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid data format or corrupted data
    #[error("Invalid data: {0}")]
    Invalid(String),

    /// Unsupported curve
    #[error("Unsupported curve: {0}")]
    UnsupportedCurve(String),

    /// Unsupported hash or signature algorithm
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Key type the engine cannot work with
    #[error("Unsupported key: {0}")]
    UnsupportedKey(String),

    /// Internal OpenSSL error
    #[error("OpenSSL error: {0}")]
    OpenSsl(#[from] ErrorStack),

    /// Failure encoding an algorithm identifier
    #[error("Encoding error: {0}")]
    Encode(#[from] rasn::error::EncodeError),
}
