//! Algorithm resolution for CRL signatures.
//!
//! Maps algorithm identifiers to the closed set of [`SignatureScheme`]s and
//! derives what the crypto engine needs beyond a bare name: the hash, RSA-PSS
//! salt length, the EC named curve, and the ECDSA signature layout.

use std::fmt;

use rasn::prelude::{ObjectIdentifier as Oid, *};
use rasn_pkix::{AlgorithmIdentifier, SubjectPublicKeyInfo};

use crate::asn1::oid;
use crate::asn1::schema::{RsaPssParams, integer_to_u64};
use crate::crl::{CrlError, CrlResult};
use crate::crypto::{
    self, CryptoResult, Curve, EcdsaSig, HashAlg, KeyImportParams, SignatureParams,
    SignatureScheme,
};

/// Salt length assumed when RSASSA-PSS parameters omit it
pub const PSS_DEFAULT_SALT_LENGTH: usize = 20;

/// Hash assumed when RSASSA-PSS parameters omit it
pub const PSS_DEFAULT_HASH: HashAlg = HashAlg::Sha1;

const DER_NULL: [u8; 2] = [0x05, 0x00];

/// Public key algorithms found in SubjectPublicKeyInfo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAlgorithm {
    Rsa,
    Ec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmKind {
    /// Signature algorithm. `hash` is `None` when the hash is carried in parameters.
    Signature {
        scheme: SignatureScheme,
        hash: Option<HashAlg>,
    },
    PublicKey(KeyAlgorithm),
    Hash(HashAlg),
}

/// An entry of the algorithm table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmDescriptor {
    pub oid: &'static [u32],
    pub name: &'static str,
    pub kind: AlgorithmKind,
}

const fn signature_entry(
    oid: &'static [u32],
    name: &'static str,
    scheme: SignatureScheme,
    hash: Option<HashAlg>,
) -> AlgorithmDescriptor {
    AlgorithmDescriptor {
        oid,
        name,
        kind: AlgorithmKind::Signature { scheme, hash },
    }
}

const fn hash_entry(oid: &'static [u32], name: &'static str, hash: HashAlg) -> AlgorithmDescriptor {
    AlgorithmDescriptor {
        oid,
        name,
        kind: AlgorithmKind::Hash(hash),
    }
}

static ALGORITHMS: &[AlgorithmDescriptor] = &[
    signature_entry(
        oid::SHA1_WITH_RSA,
        "sha1WithRSAEncryption",
        SignatureScheme::RsaPkcs1v15,
        Some(HashAlg::Sha1),
    ),
    signature_entry(
        oid::SHA224_WITH_RSA,
        "sha224WithRSAEncryption",
        SignatureScheme::RsaPkcs1v15,
        Some(HashAlg::Sha224),
    ),
    signature_entry(
        oid::SHA256_WITH_RSA,
        "sha256WithRSAEncryption",
        SignatureScheme::RsaPkcs1v15,
        Some(HashAlg::Sha256),
    ),
    signature_entry(
        oid::SHA384_WITH_RSA,
        "sha384WithRSAEncryption",
        SignatureScheme::RsaPkcs1v15,
        Some(HashAlg::Sha384),
    ),
    signature_entry(
        oid::SHA512_WITH_RSA,
        "sha512WithRSAEncryption",
        SignatureScheme::RsaPkcs1v15,
        Some(HashAlg::Sha512),
    ),
    signature_entry(oid::RSASSA_PSS, "RSASSA-PSS", SignatureScheme::RsaPss, None),
    signature_entry(
        oid::ECDSA_WITH_SHA1,
        "ecdsa-with-SHA1",
        SignatureScheme::Ecdsa,
        Some(HashAlg::Sha1),
    ),
    signature_entry(
        oid::ECDSA_WITH_SHA224,
        "ecdsa-with-SHA224",
        SignatureScheme::Ecdsa,
        Some(HashAlg::Sha224),
    ),
    signature_entry(
        oid::ECDSA_WITH_SHA256,
        "ecdsa-with-SHA256",
        SignatureScheme::Ecdsa,
        Some(HashAlg::Sha256),
    ),
    signature_entry(
        oid::ECDSA_WITH_SHA384,
        "ecdsa-with-SHA384",
        SignatureScheme::Ecdsa,
        Some(HashAlg::Sha384),
    ),
    signature_entry(
        oid::ECDSA_WITH_SHA512,
        "ecdsa-with-SHA512",
        SignatureScheme::Ecdsa,
        Some(HashAlg::Sha512),
    ),
    AlgorithmDescriptor {
        oid: oid::RSA_ENCRYPTION,
        name: "rsaEncryption",
        kind: AlgorithmKind::PublicKey(KeyAlgorithm::Rsa),
    },
    AlgorithmDescriptor {
        oid: oid::EC_PUBLIC_KEY,
        name: "id-ecPublicKey",
        kind: AlgorithmKind::PublicKey(KeyAlgorithm::Ec),
    },
    hash_entry(oid::SHA1, "sha1", HashAlg::Sha1),
    hash_entry(oid::SHA224, "sha224", HashAlg::Sha224),
    hash_entry(oid::SHA256, "sha256", HashAlg::Sha256),
    hash_entry(oid::SHA384, "sha384", HashAlg::Sha384),
    hash_entry(oid::SHA512, "sha512", HashAlg::Sha512),
];

/// RSASSA-PSS parameters after defaults are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PssParameters {
    pub hash: HashAlg,
    pub mgf1_hash: HashAlg,
    pub salt_length: usize,
}

impl Default for PssParameters {
    fn default() -> Self {
        Self {
            hash: PSS_DEFAULT_HASH,
            mgf1_hash: PSS_DEFAULT_HASH,
            salt_length: PSS_DEFAULT_SALT_LENGTH,
        }
    }
}

fn oid_slice(oid: &Oid) -> &[u32] {
    oid
}

/// Look up an algorithm by object identifier
pub fn resolve_by_oid(oid: &[u32]) -> Option<&'static AlgorithmDescriptor> {
    ALGORITHMS.iter().find(|descriptor| descriptor.oid == oid)
}

fn unsupported(algorithm: &Oid) -> CrlError {
    CrlError::UnsupportedAlgorithm(oid::to_dotted(oid_slice(algorithm)))
}

fn signature_kind(
    algorithm: &AlgorithmIdentifier,
) -> CrlResult<(SignatureScheme, Option<HashAlg>)> {
    match resolve_by_oid(oid_slice(&algorithm.algorithm)).map(|d| d.kind) {
        Some(AlgorithmKind::Signature { scheme, hash }) => Ok((scheme, hash)),
        _ => Err(unsupported(&algorithm.algorithm)),
    }
}

/// Signature scheme named by a signature algorithm identifier
pub fn signature_scheme(algorithm: &AlgorithmIdentifier) -> CrlResult<SignatureScheme> {
    Ok(signature_kind(algorithm)?.0)
}

/// Hash used by a signature algorithm.
///
/// The hash is implied by the OID for every scheme except RSASSA-PSS, where it
/// is read from the parameters.
pub fn resolve_hash_algorithm(algorithm: &AlgorithmIdentifier) -> CrlResult<HashAlg> {
    match signature_kind(algorithm)? {
        (_, Some(hash)) => Ok(hash),
        (SignatureScheme::RsaPss, None) => Ok(pss_parameters(algorithm)?.hash),
        _ => Err(unsupported(&algorithm.algorithm)),
    }
}

fn hash_from_identifier(identifier: &AlgorithmIdentifier) -> CrlResult<HashAlg> {
    match resolve_by_oid(oid_slice(&identifier.algorithm)).map(|d| d.kind) {
        Some(AlgorithmKind::Hash(hash)) => Ok(hash),
        _ => Err(unsupported(&identifier.algorithm)),
    }
}

fn pss_field<T: Decode>(raw: &Any, field: &str) -> CrlResult<T> {
    rasn::der::decode(raw.as_ref())
        .map_err(|e| CrlError::MalformedParameters(format!("RSASSA-PSS-params {field}: {e}")))
}

fn malformed_pss(detail: impl fmt::Display) -> CrlError {
    CrlError::MalformedParameters(format!("RSASSA-PSS-params {detail}"))
}

/// Extract RSASSA-PSS parameters, applying the RFC 4055 defaults for absent fields.
///
/// Every present field must decode as its declared type. The salt length
/// must fit an `i32`, the widest value the signing backend accepts.
pub fn pss_parameters(algorithm: &AlgorithmIdentifier) -> CrlResult<PssParameters> {
    let Some(encoded) = &algorithm.parameters else {
        return Ok(PssParameters::default());
    };

    let encoded: &[u8] = encoded.as_ref();
    let params: RsaPssParams = rasn::der::decode(encoded).map_err(malformed_pss)?;
    if rasn::der::encode(&params).map_err(malformed_pss)? != encoded {
        return Err(malformed_pss("contain unrecognized fields"));
    }

    let hash = match &params.hash_algorithm {
        Some(raw) => hash_from_identifier(&pss_field(raw, "hashAlgorithm")?)?,
        None => PSS_DEFAULT_HASH,
    };

    let mgf1_hash = match &params.mask_gen_algorithm {
        None => PSS_DEFAULT_HASH,
        Some(raw) => {
            let mgf: AlgorithmIdentifier = pss_field(raw, "maskGenAlgorithm")?;
            if oid_slice(&mgf.algorithm) != oid::MGF1 {
                return Err(unsupported(&mgf.algorithm));
            }
            let inner = mgf
                .parameters
                .as_ref()
                .ok_or_else(|| malformed_pss("MGF1 without hash algorithm"))?;
            hash_from_identifier(&pss_field(inner, "MGF1 hash")?)?
        }
    };

    let salt_length = match &params.salt_length {
        Some(raw) => {
            let salt: Integer = pss_field(raw, "saltLength")?;
            integer_to_u64(&salt)
                .and_then(|salt| i32::try_from(salt).ok())
                .and_then(|salt| usize::try_from(salt).ok())
                .ok_or_else(|| malformed_pss(format!("salt length {salt:?} out of range")))?
        }
        None => PSS_DEFAULT_SALT_LENGTH,
    };

    if let Some(raw) = &params.trailer_field {
        let trailer: Integer = pss_field(raw, "trailerField")?;
        if integer_to_u64(&trailer) != Some(1) {
            return Err(malformed_pss(format!("trailer field {trailer:?}")));
        }
    }

    Ok(PssParameters {
        hash,
        mgf1_hash,
        salt_length,
    })
}

/// Named curve carried in the parameters of an EC SubjectPublicKeyInfo
pub fn named_curve(parameters: Option<&Any>) -> CrlResult<Curve> {
    let parameters = parameters
        .ok_or_else(|| CrlError::MalformedParameters("EC key without curve parameters".into()))?;
    let curve_oid: Oid = rasn::der::decode(parameters.as_ref()).map_err(|e| {
        CrlError::MalformedParameters(format!("EC key parameters are not a named curve: {e}"))
    })?;
    Curve::from_oid(oid_slice(&curve_oid)).map_err(|e| CrlError::UnsupportedAlgorithm(e.to_string()))
}

fn key_algorithm(spki: &SubjectPublicKeyInfo) -> CrlResult<KeyAlgorithm> {
    let key_oid = oid_slice(&spki.algorithm.algorithm);
    if key_oid == oid::RSASSA_PSS {
        return Ok(KeyAlgorithm::Rsa);
    }
    match resolve_by_oid(key_oid).map(|d| d.kind) {
        Some(AlgorithmKind::PublicKey(key)) => Ok(key),
        _ => Err(unsupported(&spki.algorithm.algorithm)),
    }
}

/// Build the import parameters for `spki` under the given signature scheme
pub fn key_import_params(
    spki: &SubjectPublicKeyInfo,
    scheme: SignatureScheme,
) -> CrlResult<KeyImportParams> {
    match (key_algorithm(spki)?, scheme) {
        (KeyAlgorithm::Rsa, SignatureScheme::RsaPkcs1v15 | SignatureScheme::RsaPss) => {
            Ok(KeyImportParams::Rsa { scheme })
        }
        (KeyAlgorithm::Ec, SignatureScheme::Ecdsa) => Ok(KeyImportParams::Ec {
            curve: named_curve(spki.algorithm.parameters.as_ref())?,
        }),
        (key, scheme) => Err(CrlError::UnsupportedAlgorithm(format!(
            "{key:?} key cannot verify a {scheme} signature"
        ))),
    }
}

/// Final verification parameters and the signature bytes in the engine's layout.
///
/// ECDSA signatures are converted from DER `SEQUENCE { r, s }` to fixed-width `r || s`.
pub fn verification_parameters(
    algorithm: &AlgorithmIdentifier,
    hash: HashAlg,
    import: &KeyImportParams,
    signature: &[u8],
) -> CrlResult<(SignatureParams, Vec<u8>)> {
    match signature_scheme(algorithm)? {
        SignatureScheme::RsaPkcs1v15 => {
            Ok((SignatureParams::RsaPkcs1v15 { hash }, signature.to_vec()))
        }
        SignatureScheme::RsaPss => {
            let pss = pss_parameters(algorithm)?;
            Ok((
                SignatureParams::RsaPss {
                    hash: pss.hash,
                    mgf1_hash: pss.mgf1_hash,
                    salt_length: pss.salt_length,
                },
                signature.to_vec(),
            ))
        }
        SignatureScheme::Ecdsa => {
            let KeyImportParams::Ec { curve } = *import else {
                return Err(CrlError::UnsupportedAlgorithm(
                    "ECDSA signature with a non-EC key".into(),
                ));
            };
            let fixed = EcdsaSig::from_der(curve, signature)?.to_fixed();
            Ok((SignatureParams::Ecdsa { hash, curve }, fixed))
        }
    }
}

/// Convert an engine signature to its wire form
pub fn signature_to_wire(params: &SignatureParams, raw: &[u8]) -> CrlResult<Vec<u8>> {
    match *params {
        SignatureParams::Ecdsa { curve, .. } => {
            Ok(EcdsaSig::from_fixed(curve, raw)?.as_der().to_vec())
        }
        SignatureParams::RsaPkcs1v15 { .. } | SignatureParams::RsaPss { .. } => Ok(raw.to_vec()),
    }
}

/// AlgorithmIdentifier for an OID constant
pub fn algorithm_identifier(oid: &'static [u32], parameters: Option<Any>) -> AlgorithmIdentifier {
    AlgorithmIdentifier {
        algorithm: Oid::new_unchecked(oid.into()),
        parameters,
    }
}

fn der_any<T: Encode>(value: &T) -> CryptoResult<Any> {
    Ok(Any::new(rasn::der::encode(value)?))
}

fn hash_identifier(hash: HashAlg) -> AlgorithmIdentifier {
    algorithm_identifier(hash.oid(), Some(Any::new(DER_NULL.to_vec())))
}

fn signature_oid(scheme: SignatureScheme, hash: HashAlg) -> Option<&'static [u32]> {
    ALGORITHMS
        .iter()
        .find(|d| {
            d.kind
                == AlgorithmKind::Signature {
                    scheme,
                    hash: Some(hash),
                }
        })
        .map(|d| d.oid)
}

/// Signature AlgorithmIdentifier describing `params`.
///
/// PKCS#1 v1.5 identifiers carry NULL parameters, ECDSA identifiers carry
/// none, and RSASSA-PSS parameters omit every field equal to its default.
pub fn signature_algorithm_identifier(
    params: &SignatureParams,
) -> CryptoResult<AlgorithmIdentifier> {
    let missing = |scheme: SignatureScheme, hash: HashAlg| {
        crypto::Error::UnsupportedAlgorithm(format!("no {scheme} algorithm for {hash}"))
    };

    match *params {
        SignatureParams::RsaPkcs1v15 { hash } => {
            let oid = signature_oid(SignatureScheme::RsaPkcs1v15, hash)
                .ok_or_else(|| missing(SignatureScheme::RsaPkcs1v15, hash))?;
            Ok(algorithm_identifier(oid, Some(Any::new(DER_NULL.to_vec()))))
        }
        SignatureParams::Ecdsa { hash, .. } => {
            let oid = signature_oid(SignatureScheme::Ecdsa, hash)
                .ok_or_else(|| missing(SignatureScheme::Ecdsa, hash))?;
            Ok(algorithm_identifier(oid, None))
        }
        SignatureParams::RsaPss {
            hash,
            mgf1_hash,
            salt_length,
        } => {
            let mut pss = RsaPssParams::default();
            if hash != PSS_DEFAULT_HASH {
                pss.hash_algorithm = Some(der_any(&hash_identifier(hash))?);
            }
            if mgf1_hash != PSS_DEFAULT_HASH {
                let mgf1_params = der_any(&hash_identifier(mgf1_hash))?;
                let mgf1 = algorithm_identifier(oid::MGF1, Some(mgf1_params));
                pss.mask_gen_algorithm = Some(der_any(&mgf1)?);
            }
            if salt_length != PSS_DEFAULT_SALT_LENGTH {
                let salt = i32::try_from(salt_length).map_err(|_| {
                    crypto::Error::Invalid(format!("PSS salt length {salt_length} out of range"))
                })?;
                pss.salt_length = Some(der_any(&Integer::from(i64::from(salt)))?);
            }
            let encoded = rasn::der::encode(&pss)?;
            Ok(algorithm_identifier(oid::RSASSA_PSS, Some(Any::new(encoded))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pss_identifier(params: Option<Vec<u8>>) -> AlgorithmIdentifier {
        algorithm_identifier(oid::RSASSA_PSS, params.map(Any::new))
    }

    #[test]
    fn test_resolve_by_oid() {
        let descriptor = resolve_by_oid(oid::SHA256_WITH_RSA).unwrap();
        assert_eq!(descriptor.name, "sha256WithRSAEncryption");
        assert_eq!(
            descriptor.kind,
            AlgorithmKind::Signature {
                scheme: SignatureScheme::RsaPkcs1v15,
                hash: Some(HashAlg::Sha256)
            }
        );

        assert_eq!(
            resolve_by_oid(oid::SHA384).unwrap().kind,
            AlgorithmKind::Hash(HashAlg::Sha384)
        );
        assert!(resolve_by_oid(&[1, 2, 3]).is_none());
    }

    #[test]
    fn test_hash_from_signature_oid() {
        let ecdsa = algorithm_identifier(oid::ECDSA_WITH_SHA384, None);
        assert_eq!(resolve_hash_algorithm(&ecdsa).unwrap(), HashAlg::Sha384);

        let rsa = algorithm_identifier(oid::SHA1_WITH_RSA, Some(Any::new(DER_NULL.to_vec())));
        assert_eq!(resolve_hash_algorithm(&rsa).unwrap(), HashAlg::Sha1);
    }

    #[test]
    fn test_unknown_signature_algorithm() {
        let unknown = algorithm_identifier(&[1, 2, 840, 113549, 1, 1, 4], None);
        let err = resolve_hash_algorithm(&unknown).unwrap_err();
        assert!(matches!(err, CrlError::UnsupportedAlgorithm(_)));
        assert!(err.to_string().contains("1.2.840.113549.1.1.4"));

        // A hash OID is not a signature algorithm
        let bare_hash = algorithm_identifier(oid::SHA256, None);
        assert!(signature_scheme(&bare_hash).is_err());
    }

    #[test]
    fn test_pss_defaults_when_parameters_absent() {
        let params = pss_parameters(&pss_identifier(None)).unwrap();
        assert_eq!(params.salt_length, 20);
        assert_eq!(params.hash, HashAlg::Sha1);

        // SEQUENCE {} also means all defaults
        let params = pss_parameters(&pss_identifier(Some(vec![0x30, 0x00]))).unwrap();
        assert_eq!(params, PssParameters::default());
    }

    #[test]
    fn test_pss_malformed_parameters() {
        let cases = [
            DER_NULL.to_vec(),
            vec![0x30, 0x03, 0x02, 0x01],
            // [0] hashAlgorithm holding INTEGER 5
            vec![0x30, 0x05, 0xa0, 0x03, 0x02, 0x01, 0x05],
            // [1] maskGenAlgorithm holding BOOLEAN TRUE
            vec![0x30, 0x05, 0xa1, 0x03, 0x01, 0x01, 0xff],
            // [2] saltLength holding an OCTET STRING
            vec![0x30, 0x05, 0xa2, 0x03, 0x04, 0x01, 0x14],
            // [3] trailerField holding NULL
            vec![0x30, 0x04, 0xa3, 0x02, 0x05, 0x00],
            // [4] is not a field of RSASSA-PSS-params
            vec![0x30, 0x05, 0xa4, 0x03, 0x02, 0x01, 0x01],
        ];
        for encoded in cases {
            let err = pss_parameters(&pss_identifier(Some(encoded.clone()))).unwrap_err();
            assert!(
                matches!(err, CrlError::MalformedParameters(_)),
                "{encoded:02x?}: {err}"
            );
        }
    }

    #[test]
    fn test_pss_salt_length_must_fit_i32() {
        // [2] INTEGER 2147483647
        let max = vec![0x30, 0x08, 0xa2, 0x06, 0x02, 0x04, 0x7f, 0xff, 0xff, 0xff];
        assert_eq!(
            pss_parameters(&pss_identifier(Some(max))).unwrap().salt_length,
            i32::MAX as usize
        );

        // [2] INTEGER 2147483648 and INTEGER 4294967316
        for encoded in [
            vec![0x30, 0x09, 0xa2, 0x07, 0x02, 0x05, 0x00, 0x80, 0x00, 0x00, 0x00],
            vec![0x30, 0x09, 0xa2, 0x07, 0x02, 0x05, 0x01, 0x00, 0x00, 0x00, 0x14],
        ] {
            let err = pss_parameters(&pss_identifier(Some(encoded))).unwrap_err();
            assert!(matches!(err, CrlError::MalformedParameters(_)));
        }

        let oversized = SignatureParams::RsaPss {
            hash: HashAlg::Sha256,
            mgf1_hash: HashAlg::Sha256,
            salt_length: i32::MAX as usize + 1,
        };
        assert!(matches!(
            signature_algorithm_identifier(&oversized),
            Err(crypto::Error::Invalid(_))
        ));
    }

    #[test]
    fn test_pss_mask_hash_defaults_to_sha1() {
        // SEQUENCE { [0] { sha256, NULL } }, maskGenAlgorithm and saltLength absent
        let encoded = vec![
            0x30, 0x11, 0xa0, 0x0f, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03,
            0x04, 0x02, 0x01, 0x05, 0x00,
        ];
        let identifier = pss_identifier(Some(encoded.clone()));

        assert_eq!(
            pss_parameters(&identifier).unwrap(),
            PssParameters {
                hash: HashAlg::Sha256,
                mgf1_hash: HashAlg::Sha1,
                salt_length: 20,
            }
        );

        let params = SignatureParams::RsaPss {
            hash: HashAlg::Sha256,
            mgf1_hash: HashAlg::Sha1,
            salt_length: 20,
        };
        let rebuilt = signature_algorithm_identifier(&params).unwrap();
        let rebuilt: &[u8] = rebuilt.parameters.as_ref().unwrap().as_ref();
        assert_eq!(rebuilt, encoded.as_slice());
    }

    #[test]
    fn test_pss_identifier_roundtrip() {
        let cases = [
            (HashAlg::Sha256, HashAlg::Sha256, 32),
            (HashAlg::Sha1, HashAlg::Sha1, 20),
            (HashAlg::Sha512, HashAlg::Sha512, 20),
            (HashAlg::Sha384, HashAlg::Sha1, 48),
        ];
        for (hash, mgf1_hash, salt_length) in cases {
            let params = SignatureParams::RsaPss {
                hash,
                mgf1_hash,
                salt_length,
            };
            let identifier = signature_algorithm_identifier(&params).unwrap();

            assert_eq!(oid_slice(&identifier.algorithm), oid::RSASSA_PSS);
            assert_eq!(resolve_hash_algorithm(&identifier).unwrap(), hash);
            assert_eq!(
                pss_parameters(&identifier).unwrap(),
                PssParameters {
                    hash,
                    mgf1_hash,
                    salt_length
                }
            );
        }
    }

    #[test]
    fn test_pss_default_params_encode_empty() {
        let params = SignatureParams::RsaPss {
            hash: HashAlg::Sha1,
            mgf1_hash: HashAlg::Sha1,
            salt_length: 20,
        };
        let identifier = signature_algorithm_identifier(&params).unwrap();
        let encoded: &[u8] = identifier.parameters.as_ref().unwrap().as_ref();
        assert_eq!(encoded, &[0x30, 0x00]);
    }

    #[test]
    fn test_pkcs1_identifier_has_null_parameters() {
        let identifier = signature_algorithm_identifier(&SignatureParams::RsaPkcs1v15 {
            hash: HashAlg::Sha512,
        })
        .unwrap();
        assert_eq!(oid_slice(&identifier.algorithm), oid::SHA512_WITH_RSA);
        let encoded: &[u8] = identifier.parameters.as_ref().unwrap().as_ref();
        assert_eq!(encoded, &DER_NULL);

        let identifier = signature_algorithm_identifier(&SignatureParams::Ecdsa {
            hash: HashAlg::Sha256,
            curve: Curve::NistP256,
        })
        .unwrap();
        assert_eq!(oid_slice(&identifier.algorithm), oid::ECDSA_WITH_SHA256);
        assert!(identifier.parameters.is_none());
    }

    #[test]
    fn test_named_curve() {
        let p384 = Any::new(rasn::der::encode(&Oid::new_unchecked(oid::NIST_P384.into())).unwrap());
        assert_eq!(named_curve(Some(&p384)).unwrap(), Curve::NistP384);

        assert!(matches!(
            named_curve(None),
            Err(CrlError::MalformedParameters(_))
        ));
        assert!(matches!(
            named_curve(Some(&Any::new(DER_NULL.to_vec()))),
            Err(CrlError::MalformedParameters(_))
        ));

        let secp256k1 = Any::new(rasn::der::encode(&Oid::new_unchecked(vec![1, 3, 132, 0, 10].into())).unwrap());
        assert!(matches!(
            named_curve(Some(&secp256k1)),
            Err(CrlError::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn test_ecdsa_signature_reshaping() {
        // SEQUENCE { INTEGER 1, INTEGER 2 }
        let der = [0x30, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x02];
        let algorithm = algorithm_identifier(oid::ECDSA_WITH_SHA256, None);
        let import = KeyImportParams::Ec {
            curve: Curve::NistP256,
        };

        let (params, fixed) =
            verification_parameters(&algorithm, HashAlg::Sha256, &import, &der).unwrap();
        assert_eq!(fixed.len(), 64);
        assert_eq!(fixed[31], 1);
        assert_eq!(fixed[63], 2);
        assert!(fixed[..31].iter().chain(&fixed[32..63]).all(|&b| b == 0));

        assert_eq!(signature_to_wire(&params, &fixed).unwrap(), der.to_vec());
    }

    #[test]
    fn test_key_must_fit_scheme() {
        let spki = SubjectPublicKeyInfo {
            algorithm: algorithm_identifier(oid::RSA_ENCRYPTION, Some(Any::new(DER_NULL.to_vec()))),
            subject_public_key: BitString::new(),
        };
        assert!(matches!(
            key_import_params(&spki, SignatureScheme::Ecdsa),
            Err(CrlError::UnsupportedAlgorithm(_))
        ));
        assert_eq!(
            key_import_params(&spki, SignatureScheme::RsaPss).unwrap(),
            KeyImportParams::Rsa {
                scheme: SignatureScheme::RsaPss
            }
        );
    }
}
