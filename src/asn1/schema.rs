//! ASN.1 structures of an X.509 CRL (RFC 5280 §5.1) and of the
//! RSASSA-PSS parameters (RFC 4055 §3.1).
//!
//! `Name`, `AlgorithmIdentifier` and `Time` come from `rasn-pkix`. The CRL
//! structures are declared here instead of reusing `rasn_pkix::CertificateList`
//! so that absent optional fields stay absent and the signed body can be
//! captured as raw bytes.
//!
//! Extensions and the RSASSA-PSS fields are captured as raw elements and
//! decoded one by one afterwards. A malformed element behind an explicit tag
//! would otherwise be read as an absent field.

use rasn::error::EncodeError;
use rasn::prelude::*;
use rasn_pkix::{AlgorithmIdentifier, Name, Time};

/// CertificateList ::= SEQUENCE {
///     tbsCertList          TBSCertList,
///     signatureAlgorithm   AlgorithmIdentifier,
///     signatureValue       BIT STRING
/// }
///
/// `tbs_cert_list` is kept as the complete encoded element so the signed
/// byte range survives decoding untouched.
#[derive(Debug, Clone, PartialEq, Eq, AsnType, Encode, Decode)]
pub struct CertificateListSchema {
    pub tbs_cert_list: Any,
    pub signature_algorithm: AlgorithmIdentifier,
    pub signature_value: BitString,
}

/// TBSCertList ::= SEQUENCE {
///     version                 Version OPTIONAL,
///     signature               AlgorithmIdentifier,
///     issuer                  Name,
///     thisUpdate              Time,
///     nextUpdate              Time OPTIONAL,
///     revokedCertificates     SEQUENCE OF SEQUENCE { ... } OPTIONAL,
///     crlExtensions           [0] EXPLICIT Extensions OPTIONAL
/// }
#[derive(Debug, Clone, PartialEq, Eq, AsnType, Encode, Decode)]
pub struct TbsCertListSchema {
    pub version: Option<Integer>,
    pub signature: AlgorithmIdentifier,
    pub issuer: Name,
    pub this_update: Time,
    pub next_update: Option<Time>,
    pub revoked_certificates: Option<SequenceOf<RevokedCertificateSchema>>,
    /// Raw `Extension` elements
    #[rasn(tag(explicit(0)))]
    pub crl_extensions: Option<SequenceOf<Any>>,
}

/// One entry of `revokedCertificates`
#[derive(Debug, Clone, PartialEq, Eq, AsnType, Encode, Decode)]
pub struct RevokedCertificateSchema {
    pub user_certificate: Integer,
    pub revocation_date: Time,
    /// Raw `Extension` elements
    pub crl_entry_extensions: Option<SequenceOf<Any>>,
}

/// RSASSA-PSS-params ::= SEQUENCE {
///     hashAlgorithm      [0] HashAlgorithm      DEFAULT sha1,
///     maskGenAlgorithm   [1] MaskGenAlgorithm   DEFAULT mgf1SHA1,
///     saltLength         [2] INTEGER            DEFAULT 20,
///     trailerField       [3] TrailerField       DEFAULT trailerFieldBC
/// }
///
/// Defaults are represented as `None` and resolved by the caller. Each
/// present field holds the raw element found inside its tag.
#[derive(Debug, Clone, PartialEq, Eq, Default, AsnType, Encode, Decode)]
pub struct RsaPssParams {
    #[rasn(tag(explicit(0)))]
    pub hash_algorithm: Option<Any>,
    #[rasn(tag(explicit(1)))]
    pub mask_gen_algorithm: Option<Any>,
    #[rasn(tag(explicit(2)))]
    pub salt_length: Option<Any>,
    #[rasn(tag(explicit(3)))]
    pub trailer_field: Option<Any>,
}

/// Content octets of an INTEGER, i.e. its minimal big-endian two's complement form
pub fn integer_bytes(value: &Integer) -> Result<Vec<u8>, EncodeError> {
    let der = rasn::der::encode(value)?;
    // skip the tag and length octets
    let header = match der.get(1) {
        Some(&len) if len & 0x80 != 0 => 2 + usize::from(len & 0x7f),
        _ => 2,
    };
    Ok(der.get(header..).unwrap_or_default().to_vec())
}

/// Value of a non-negative INTEGER that fits in a `u64`
pub fn integer_to_u64(value: &Integer) -> Option<u64> {
    let bytes = integer_bytes(value).ok()?;
    if bytes.first().is_some_and(|b| b & 0x80 != 0) {
        return None;
    }
    let significant: Vec<u8> = bytes.into_iter().skip_while(|&b| b == 0).collect();
    if significant.len() > 8 {
        return None;
    }
    Some(significant.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
}
