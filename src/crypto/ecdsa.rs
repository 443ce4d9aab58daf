use crate::crypto::HashAlg;
use crate::crypto::curves::Curve;
use crate::crypto::errors::{CryptoResult, Error};
use openssl::bn::BigNum;
use openssl::ecdsa::EcdsaSig as OpenSslEcdsaSig;
use openssl::pkey::{HasPrivate, HasPublic, PKeyRef};
use openssl::sign::{Signer, Verifier};
use std::fmt;

/// ECDSA signature held in both of its encodings.
///
/// Certificates and CRLs carry `Ecdsa-Sig-Value ::= SEQUENCE { r INTEGER, s INTEGER }`,
/// while the engine works on the fixed-width `r || s` concatenation where each half is
/// zero-padded to the curve's coordinate size.
#[derive(Clone, PartialEq, Eq)]
pub struct EcdsaSig {
    // The curve used for this signature
    curve: Curve,
    // DER-encoded signature data
    der_data: Vec<u8>,
    // Raw signature components (r, s), each padded to the coordinate size
    raw_components: (Vec<u8>, Vec<u8>),
}

impl EcdsaSig {
    /// Create signature from DER-encoded signature data
    pub fn from_der(curve: Curve, der_data: impl AsRef<[u8]>) -> CryptoResult<Self> {
        let ecdsa_sig = OpenSslEcdsaSig::from_der(der_data.as_ref())?;
        let width = curve.coordinate_size();

        if ecdsa_sig.r().num_bytes() as usize > width || ecdsa_sig.s().num_bytes() as usize > width
        {
            return Err(Error::Invalid(format!(
                "signature component exceeds {width} bytes for {curve}"
            )));
        }

        let r = ecdsa_sig.r().to_vec_padded(width as i32)?;
        let s = ecdsa_sig.s().to_vec_padded(width as i32)?;

        Ok(Self {
            curve,
            der_data: der_data.as_ref().to_vec(),
            raw_components: (r, s),
        })
    }

    /// Create signature from the fixed-width concatenation `r || s`
    pub fn from_fixed(curve: Curve, raw: impl AsRef<[u8]>) -> CryptoResult<Self> {
        let raw = raw.as_ref();
        if raw.len() != curve.signature_size() {
            return Err(Error::Invalid(format!(
                "expected {} signature bytes for {curve}, got {}",
                curve.signature_size(),
                raw.len()
            )));
        }

        let (r, s) = raw.split_at(curve.coordinate_size());
        let ecdsa_sig =
            OpenSslEcdsaSig::from_private_components(BigNum::from_slice(r)?, BigNum::from_slice(s)?)?;
        let der_data = ecdsa_sig.to_der()?;

        Ok(Self {
            curve,
            der_data,
            raw_components: (r.to_vec(), s.to_vec()),
        })
    }

    /// Get the curve used for this signature
    pub fn curve(&self) -> Curve {
        self.curve
    }

    /// Get DER-encoded signature data
    pub fn as_der(&self) -> &[u8] {
        &self.der_data
    }

    /// Get the fixed-width concatenation `r || s`
    pub fn to_fixed(&self) -> Vec<u8> {
        let (r, s) = &self.raw_components;
        let mut combined = Vec::with_capacity(r.len() + s.len());
        combined.extend_from_slice(r);
        combined.extend_from_slice(s);
        combined
    }

    /// Convert DER encoded signature to hex string representation
    pub fn to_hex(&self) -> String {
        hex::encode(&self.der_data)
    }
}

impl fmt::Debug for EcdsaSig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcdsaSig")
            .field("curve", &self.curve)
            .field("size", &self.der_data.len())
            .field("hex", &self.to_hex())
            .finish()
    }
}

/// Sign data with an EC private key and return the signature
pub fn sign<T: HasPrivate>(
    private_key: &PKeyRef<T>,
    curve: Curve,
    data: impl AsRef<[u8]>,
    hash_alg: HashAlg,
) -> CryptoResult<EcdsaSig> {
    let mut signer = Signer::new(hash_alg.into(), private_key)?;
    signer.update(data.as_ref())?;
    let signature_der = signer.sign_to_vec()?;

    EcdsaSig::from_der(curve, signature_der)
}

/// Verify a signature against data using an EC public key
pub fn verify<T: HasPublic>(
    public_key: &PKeyRef<T>,
    curve: Curve,
    data: impl AsRef<[u8]>,
    signature: &EcdsaSig,
    hash_alg: HashAlg,
) -> CryptoResult<bool> {
    if signature.curve() != curve {
        return Err(Error::Invalid(
            "Signature curve does not match key curve".to_string(),
        ));
    }

    let mut verifier = Verifier::new(hash_alg.into(), public_key)?;
    verifier.update(data.as_ref())?;
    Ok(verifier.verify(signature.as_der())?)
}
