use crate::asn1::oid;
use crate::crypto::errors::{CryptoResult, Error};
use openssl::ec::{EcGroup, EcGroupRef};
use openssl::nid::Nid;
use std::fmt;

/// Named curves accepted for ECDSA CRL signatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Curve {
    /// NIST P-256 (secp256r1)
    NistP256,
    /// NIST P-384 (secp384r1)
    NistP384,
    /// NIST P-521 (secp521r1)
    NistP521,
    /// Brainpool P-256r1
    BrainpoolP256r1,
    /// Brainpool P-384r1
    BrainpoolP384r1,
    /// Brainpool P-512r1
    BrainpoolP512r1,
}

impl Curve {
    /// Get the OpenSSL NID for this curve
    pub fn to_nid(self) -> Nid {
        match self {
            Curve::NistP256 => Nid::X9_62_PRIME256V1,
            Curve::NistP384 => Nid::SECP384R1,
            Curve::NistP521 => Nid::SECP521R1,
            Curve::BrainpoolP256r1 => Nid::BRAINPOOL_P256R1,
            Curve::BrainpoolP384r1 => Nid::BRAINPOOL_P384R1,
            Curve::BrainpoolP512r1 => Nid::BRAINPOOL_P512R1,
        }
    }

    /// Create an OpenSSL EcGroup for this curve
    pub fn to_ec_group(self) -> CryptoResult<EcGroup> {
        Ok(EcGroup::from_curve_name(self.to_nid())?)
    }

    /// Size in bytes of one field element, and so of each of `r` and `s`
    /// in a fixed-width signature
    pub fn coordinate_size(self) -> usize {
        match self {
            Curve::NistP256 | Curve::BrainpoolP256r1 => 32,
            Curve::NistP384 | Curve::BrainpoolP384r1 => 48,
            Curve::NistP521 => 66,
            Curve::BrainpoolP512r1 => 64,
        }
    }

    /// Get the fixed-width (r || s) signature size in bytes
    pub fn signature_size(self) -> usize {
        2 * self.coordinate_size()
    }

    /// Get the named-curve OID carried in SubjectPublicKeyInfo parameters
    pub fn oid(self) -> &'static [u32] {
        match self {
            Curve::NistP256 => oid::NIST_P256,
            Curve::NistP384 => oid::NIST_P384,
            Curve::NistP521 => oid::NIST_P521,
            Curve::BrainpoolP256r1 => oid::BRAINPOOL_P256R1,
            Curve::BrainpoolP384r1 => oid::BRAINPOOL_P384R1,
            Curve::BrainpoolP512r1 => oid::BRAINPOOL_P512R1,
        }
    }

    /// Parse curve from its named-curve OID
    pub fn from_oid(curve_oid: &[u32]) -> CryptoResult<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|curve| curve.oid() == curve_oid)
            .ok_or_else(|| {
                Error::UnsupportedCurve(format!("Unknown OID: {}", oid::to_dotted(curve_oid)))
            })
    }

    /// Get all supported curves
    pub fn all() -> &'static [Curve] {
        &[
            Curve::NistP256,
            Curve::NistP384,
            Curve::NistP521,
            Curve::BrainpoolP256r1,
            Curve::BrainpoolP384r1,
            Curve::BrainpoolP512r1,
        ]
    }
}

impl TryFrom<&EcGroupRef> for Curve {
    type Error = Error;

    fn try_from(group: &EcGroupRef) -> Result<Self, Self::Error> {
        let nid = group
            .curve_name()
            .ok_or_else(|| Error::UnsupportedCurve("explicit curve parameters".into()))?;
        Self::all()
            .iter()
            .copied()
            .find(|curve| curve.to_nid() == nid)
            .ok_or_else(|| Error::UnsupportedCurve(format!("{:?}", nid.short_name())))
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Curve::NistP256 => "NIST P-256 (secp256r1)",
            Curve::NistP384 => "NIST P-384 (secp384r1)",
            Curve::NistP521 => "NIST P-521 (secp521r1)",
            Curve::BrainpoolP256r1 => "Brainpool P-256r1",
            Curve::BrainpoolP384r1 => "Brainpool P-384r1",
            Curve::BrainpoolP512r1 => "Brainpool P-512r1",
        };
        write!(f, "{name}")
    }
}
