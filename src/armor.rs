//! PEM armor (RFC 7468) for CRLs, certificates and keys.

use pem::{EncodeConfig, LineEnding, Pem};
use thiserror::Error;

const BEGIN_MARKER: &[u8] = b"-----BEGIN ";

#[derive(Error, Debug)]
pub enum PemError {
    #[error("invalid PEM: {0}")]
    Parse(#[from] pem::PemError),

    #[error("expected label {expected:?}, found {found:?}")]
    UnexpectedLabel { expected: String, found: String },
}

/// Decode a PEM block carrying the given label
pub fn decode(label: &str, text: impl AsRef<[u8]>) -> Result<Vec<u8>, PemError> {
    let block = pem::parse(text)?;
    if block.tag() != label {
        return Err(PemError::UnexpectedLabel {
            expected: label.to_string(),
            found: block.tag().to_string(),
        });
    }
    Ok(block.into_contents())
}

/// Wrap DER bytes in a PEM block with the given label
pub fn encode(label: &str, der: &[u8]) -> String {
    pem::encode_config(
        &Pem::new(label, der),
        EncodeConfig::new().set_line_ending(LineEnding::LF),
    )
}

/// Accept either PEM text with the given label or raw DER bytes
pub fn decode_or_der(label: &str, input: &[u8]) -> Result<Vec<u8>, PemError> {
    if input
        .windows(BEGIN_MARKER.len())
        .any(|window| window == BEGIN_MARKER)
    {
        decode(label, input)
    } else {
        Ok(input.to_vec())
    }
}
