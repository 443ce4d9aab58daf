use crate::crypto::curves::Curve;
use crate::crypto::errors::{CryptoResult, Error};
use openssl::ec::EcKey;
use openssl::pkey::{Id, PKey, Private, Public};
use openssl::rsa::Rsa;
use std::fmt;

/// The kind of key held by a [`SigningKey`] or [`VerifyingKey`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// RSA key used with PKCS#1 v1.5 padding
    Rsa,
    /// RSA key used with PSS padding
    RsaPss,
    /// EC key on a named curve
    Ec(Curve),
}

impl KeyKind {
    fn of_private(pkey: &PKey<Private>) -> CryptoResult<Self> {
        match pkey.id() {
            Id::RSA => Ok(KeyKind::Rsa),
            Id::RSA_PSS => Ok(KeyKind::RsaPss),
            Id::EC => {
                let ec_key = pkey.ec_key()?;
                Ok(KeyKind::Ec(ec_key.group().try_into()?))
            }
            other => Err(Error::UnsupportedKey(format!("{other:?}"))),
        }
    }
}

/// Private key used to sign CRLs
#[derive(Clone)]
pub struct SigningKey {
    kind: KeyKind,
    openssl_key: PKey<Private>,
}

impl SigningKey {
    /// Generate a new RSA key of the given size in bits
    pub fn generate_rsa(bits: u32) -> CryptoResult<Self> {
        let rsa = Rsa::generate(bits)?;
        Ok(Self {
            kind: KeyKind::Rsa,
            openssl_key: PKey::from_rsa(rsa)?,
        })
    }

    /// Generate a new EC key on the given curve
    pub fn generate_ec(curve: Curve) -> CryptoResult<Self> {
        let group = curve.to_ec_group()?;
        let ec_key = EcKey::generate(&group)?;
        Ok(Self {
            kind: KeyKind::Ec(curve),
            openssl_key: PKey::from_ec_key(ec_key)?,
        })
    }

    /// Import key from PKCS#8 DER format
    pub fn from_pkcs8_der(der_bytes: impl AsRef<[u8]>) -> CryptoResult<Self> {
        let pkey = PKey::private_key_from_der(der_bytes.as_ref())?;
        Self::from_pkey(pkey)
    }

    /// Import key from PKCS#8 PEM format
    pub fn from_pkcs8_pem(pem_bytes: impl AsRef<[u8]>) -> CryptoResult<Self> {
        let pkey = PKey::private_key_from_pem(pem_bytes.as_ref())?;
        Self::from_pkey(pkey)
    }

    /// Wrap an existing OpenSSL private key
    pub fn from_pkey(pkey: PKey<Private>) -> CryptoResult<Self> {
        Ok(Self {
            kind: KeyKind::of_private(&pkey)?,
            openssl_key: pkey,
        })
    }

    /// Sign with RSASSA-PSS instead of PKCS#1 v1.5
    pub fn with_pss(self) -> CryptoResult<Self> {
        match self.kind {
            KeyKind::Rsa | KeyKind::RsaPss => Ok(Self {
                kind: KeyKind::RsaPss,
                ..self
            }),
            KeyKind::Ec(curve) => Err(Error::UnsupportedKey(format!(
                "PSS requires an RSA key, got an EC key on {curve}"
            ))),
        }
    }

    /// Get the kind of this key
    pub fn kind(&self) -> KeyKind {
        self.kind
    }

    /// Export the public half in SubjectPublicKeyInfo DER format
    pub fn public_key_der(&self) -> CryptoResult<Vec<u8>> {
        Ok(self.openssl_key.public_key_to_der()?)
    }

    /// Export key in PKCS#8 DER format
    pub fn to_pkcs8_der(&self) -> CryptoResult<Vec<u8>> {
        Ok(self.openssl_key.private_key_to_pkcs8()?)
    }

    /// Get the OpenSSL PKey
    pub fn as_openssl_pkey(&self) -> &PKey<Private> {
        &self.openssl_key
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("kind", &self.kind)
            .field("key_data", &"[REDACTED]")
            .finish()
    }
}

/// Public key imported by the engine for verification
#[derive(Clone, Debug)]
pub struct VerifyingKey {
    kind: KeyKind,
    openssl_key: PKey<Public>,
}

impl VerifyingKey {
    pub(crate) fn new(kind: KeyKind, openssl_key: PKey<Public>) -> Self {
        Self { kind, openssl_key }
    }

    /// Get the kind of this key
    pub fn kind(&self) -> KeyKind {
        self.kind
    }

    /// Get the OpenSSL PKey of this public key
    pub fn as_openssl_pkey(&self) -> &PKey<Public> {
        &self.openssl_key
    }
}
