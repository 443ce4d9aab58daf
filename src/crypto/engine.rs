use crate::algorithms;
use crate::crypto::errors::{CryptoResult, Error};
use crate::crypto::keys::{KeyKind, SigningKey, VerifyingKey};
use crate::crypto::{Curve, EcdsaSig, HashAlg, SignatureScheme, ecdsa, rsa};
use openssl::pkey::{Id, PKey};
use rasn_pkix::AlgorithmIdentifier;
use tracing::debug;

/// Encodings accepted by [`CryptoEngine::import_public_key`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFormat {
    /// DER-encoded SubjectPublicKeyInfo
    Spki,
}

/// Operations an imported key may be used for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyUsage {
    Sign,
    Verify,
}

/// Algorithm parameters needed to import a public key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyImportParams {
    Rsa { scheme: SignatureScheme },
    Ec { curve: Curve },
}

/// Parameters for a single sign or verify call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureParams {
    RsaPkcs1v15 { hash: HashAlg },
    RsaPss {
        hash: HashAlg,
        mgf1_hash: HashAlg,
        salt_length: usize,
    },
    Ecdsa { hash: HashAlg, curve: Curve },
}

impl SignatureParams {
    pub fn scheme(&self) -> SignatureScheme {
        match self {
            SignatureParams::RsaPkcs1v15 { .. } => SignatureScheme::RsaPkcs1v15,
            SignatureParams::RsaPss { .. } => SignatureScheme::RsaPss,
            SignatureParams::Ecdsa { .. } => SignatureScheme::Ecdsa,
        }
    }

    pub fn hash(&self) -> HashAlg {
        match *self {
            SignatureParams::RsaPkcs1v15 { hash }
            | SignatureParams::RsaPss { hash, .. }
            | SignatureParams::Ecdsa { hash, .. } => hash,
        }
    }
}

/// Parameters an engine picks for a key and hash, together with the
/// algorithm identifier that describes them on the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureDefaults {
    pub params: SignatureParams,
    pub algorithm: AlgorithmIdentifier,
}

/// Signature primitives used to sign and verify CRLs.
///
/// ECDSA signatures cross this boundary in fixed-width `r || s` form. Callers
/// are responsible for converting to and from the DER `Ecdsa-Sig-Value` used
/// inside certificates and CRLs.
pub trait CryptoEngine {
    type PrivateKey;
    type PublicKey;

    /// Choose signature parameters for `key` and `hash`
    fn default_signature_parameters(
        &self,
        key: &Self::PrivateKey,
        hash: HashAlg,
    ) -> CryptoResult<SignatureDefaults>;

    /// Import a public key for the given usages
    fn import_public_key(
        &self,
        format: KeyFormat,
        data: &[u8],
        params: &KeyImportParams,
        usages: &[KeyUsage],
    ) -> CryptoResult<Self::PublicKey>;

    /// Sign `data` and return the raw signature
    fn sign(
        &self,
        data: &[u8],
        key: &Self::PrivateKey,
        params: &SignatureParams,
    ) -> CryptoResult<Vec<u8>>;

    /// Check `signature` over `data`
    fn verify(
        &self,
        params: &SignatureParams,
        key: &Self::PublicKey,
        signature: &[u8],
        data: &[u8],
    ) -> CryptoResult<bool>;
}

/// [`CryptoEngine`] backed by OpenSSL
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenSslEngine;

impl OpenSslEngine {
    pub fn new() -> Self {
        Self
    }
}

fn check_key_fits(kind: KeyKind, params: &SignatureParams) -> CryptoResult<()> {
    let fits = match (kind, params) {
        (KeyKind::Rsa, SignatureParams::RsaPkcs1v15 { .. }) => true,
        (KeyKind::Rsa | KeyKind::RsaPss, SignatureParams::RsaPss { .. }) => true,
        (KeyKind::Ec(key_curve), SignatureParams::Ecdsa { curve, .. }) => key_curve == *curve,
        _ => false,
    };
    if fits {
        Ok(())
    } else {
        Err(Error::UnsupportedKey(format!(
            "{kind:?} key cannot be used for {}",
            params.scheme()
        )))
    }
}

impl CryptoEngine for OpenSslEngine {
    type PrivateKey = SigningKey;
    type PublicKey = VerifyingKey;

    fn default_signature_parameters(
        &self,
        key: &SigningKey,
        hash: HashAlg,
    ) -> CryptoResult<SignatureDefaults> {
        let params = match key.kind() {
            KeyKind::Rsa => SignatureParams::RsaPkcs1v15 { hash },
            KeyKind::RsaPss => SignatureParams::RsaPss {
                hash,
                mgf1_hash: hash,
                salt_length: hash.output_size(),
            },
            KeyKind::Ec(curve) => SignatureParams::Ecdsa { hash, curve },
        };
        let algorithm = algorithms::signature_algorithm_identifier(&params)?;
        Ok(SignatureDefaults { params, algorithm })
    }

    fn import_public_key(
        &self,
        format: KeyFormat,
        data: &[u8],
        params: &KeyImportParams,
        usages: &[KeyUsage],
    ) -> CryptoResult<VerifyingKey> {
        if !usages.contains(&KeyUsage::Verify) {
            return Err(Error::Invalid(
                "public keys can only be imported for verification".into(),
            ));
        }

        let pkey = match format {
            KeyFormat::Spki => PKey::public_key_from_der(data)?,
        };

        let kind = match *params {
            KeyImportParams::Rsa { scheme } => {
                if pkey.id() != Id::RSA && pkey.id() != Id::RSA_PSS {
                    return Err(Error::UnsupportedKey(format!(
                        "expected an RSA key, got {:?}",
                        pkey.id()
                    )));
                }
                if scheme == SignatureScheme::RsaPss {
                    KeyKind::RsaPss
                } else {
                    KeyKind::Rsa
                }
            }
            KeyImportParams::Ec { curve } => {
                if pkey.id() != Id::EC {
                    return Err(Error::UnsupportedKey(format!(
                        "expected an EC key, got {:?}",
                        pkey.id()
                    )));
                }
                let ec_key = pkey.ec_key()?;
                let key_curve = Curve::try_from(ec_key.group())?;
                if key_curve != curve {
                    return Err(Error::Invalid(format!(
                        "key is on {key_curve}, parameters name {curve}"
                    )));
                }
                KeyKind::Ec(curve)
            }
        };

        debug!("Imported {kind:?} public key");
        Ok(VerifyingKey::new(kind, pkey))
    }

    fn sign(
        &self,
        data: &[u8],
        key: &SigningKey,
        params: &SignatureParams,
    ) -> CryptoResult<Vec<u8>> {
        check_key_fits(key.kind(), params)?;
        let pkey = key.as_openssl_pkey();

        match *params {
            SignatureParams::RsaPkcs1v15 { hash } => rsa::sign_pkcs1(pkey, data, hash),
            SignatureParams::RsaPss {
                hash,
                mgf1_hash,
                salt_length,
            } => rsa::sign_pss(pkey, data, hash, mgf1_hash, salt_length),
            SignatureParams::Ecdsa { hash, curve } => {
                Ok(ecdsa::sign(pkey, curve, data, hash)?.to_fixed())
            }
        }
    }

    fn verify(
        &self,
        params: &SignatureParams,
        key: &VerifyingKey,
        signature: &[u8],
        data: &[u8],
    ) -> CryptoResult<bool> {
        check_key_fits(key.kind(), params)?;
        let pkey = key.as_openssl_pkey();

        match *params {
            SignatureParams::RsaPkcs1v15 { hash } => rsa::verify_pkcs1(pkey, data, signature, hash),
            SignatureParams::RsaPss {
                hash,
                mgf1_hash,
                salt_length,
            } => rsa::verify_pss(pkey, data, signature, hash, mgf1_hash, salt_length),
            SignatureParams::Ecdsa { hash, curve } => {
                if signature.len() != curve.signature_size() {
                    debug!(
                        "ECDSA signature is {} bytes, expected {}",
                        signature.len(),
                        curve.signature_size()
                    );
                    return Ok(false);
                }
                let signature = EcdsaSig::from_fixed(curve, signature)?;
                ecdsa::verify(pkey, curve, data, &signature, hash)
            }
        }
    }
}
