mod curves;
pub mod ecdsa;
mod engine;
mod errors;
mod keys;
pub mod rsa;

pub use curves::Curve;
pub use ecdsa::EcdsaSig;
pub use engine::{
    CryptoEngine, KeyFormat, KeyImportParams, KeyUsage, OpenSslEngine, SignatureDefaults,
    SignatureParams,
};
pub use errors::{CryptoResult, Error};
pub use keys::{KeyKind, SigningKey, VerifyingKey};

use crate::asn1::oid;
use openssl::hash::MessageDigest as Digest;
use std::fmt;
use std::str::FromStr;

/// Hash algorithms supported for CRL signatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlg {
    /// SHA-1
    Sha1,
    /// SHA-224
    Sha224,
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}

impl HashAlg {
    /// Get the output size in bytes
    pub fn output_size(self) -> usize {
        match self {
            HashAlg::Sha1 => 20,
            HashAlg::Sha224 => 28,
            HashAlg::Sha256 => 32,
            HashAlg::Sha384 => 48,
            HashAlg::Sha512 => 64,
        }
    }

    /// The hash algorithm's own object identifier
    pub fn oid(self) -> &'static [u32] {
        match self {
            HashAlg::Sha1 => oid::SHA1,
            HashAlg::Sha224 => oid::SHA224,
            HashAlg::Sha256 => oid::SHA256,
            HashAlg::Sha384 => oid::SHA384,
            HashAlg::Sha512 => oid::SHA512,
        }
    }
}

impl From<HashAlg> for Digest {
    fn from(hash_alg: HashAlg) -> Self {
        match hash_alg {
            HashAlg::Sha1 => Digest::sha1(),
            HashAlg::Sha224 => Digest::sha224(),
            HashAlg::Sha256 => Digest::sha256(),
            HashAlg::Sha384 => Digest::sha384(),
            HashAlg::Sha512 => Digest::sha512(),
        }
    }
}

impl fmt::Display for HashAlg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HashAlg::Sha1 => "SHA-1",
            HashAlg::Sha224 => "SHA-224",
            HashAlg::Sha256 => "SHA-256",
            HashAlg::Sha384 => "SHA-384",
            HashAlg::Sha512 => "SHA-512",
        };
        write!(f, "{name}")
    }
}

impl FromStr for HashAlg {
    type Err = Error;

    /// Accepts "SHA-256", "sha256", "Sha-256" and the like
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "");
        match normalized.as_str() {
            "SHA1" => Ok(HashAlg::Sha1),
            "SHA224" => Ok(HashAlg::Sha224),
            "SHA256" => Ok(HashAlg::Sha256),
            "SHA384" => Ok(HashAlg::Sha384),
            "SHA512" => Ok(HashAlg::Sha512),
            _ => Err(Error::UnsupportedAlgorithm(format!("unknown hash: {s}"))),
        }
    }
}

/// Signature schemes a CRL can be signed with.
///
/// Each scheme differs in how its parameters are derived and how the
/// signature value is laid out on the wire, so callers dispatch on this
/// once instead of comparing algorithm names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureScheme {
    /// RSASSA-PKCS1-v1_5
    RsaPkcs1v15,
    /// RSASSA-PSS
    RsaPss,
    /// ECDSA over a named curve
    Ecdsa,
}

impl fmt::Display for SignatureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SignatureScheme::RsaPkcs1v15 => "RSASSA-PKCS1-v1_5",
            SignatureScheme::RsaPss => "RSA-PSS",
            SignatureScheme::Ecdsa => "ECDSA",
        };
        write!(f, "{name}")
    }
}
