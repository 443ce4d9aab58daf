//! Object Identifiers (OIDs) used by CRL decoding, signing and verification.

// PKCS#1 (RFC 8017)
pub const RSA_ENCRYPTION: &[u32] = &[1, 2, 840, 113549, 1, 1, 1];
pub const SHA1_WITH_RSA: &[u32] = &[1, 2, 840, 113549, 1, 1, 5];
pub const MGF1: &[u32] = &[1, 2, 840, 113549, 1, 1, 8];
pub const RSASSA_PSS: &[u32] = &[1, 2, 840, 113549, 1, 1, 10];
pub const SHA256_WITH_RSA: &[u32] = &[1, 2, 840, 113549, 1, 1, 11];
pub const SHA384_WITH_RSA: &[u32] = &[1, 2, 840, 113549, 1, 1, 12];
pub const SHA512_WITH_RSA: &[u32] = &[1, 2, 840, 113549, 1, 1, 13];
pub const SHA224_WITH_RSA: &[u32] = &[1, 2, 840, 113549, 1, 1, 14];

// ANSI X9.62 (RFC 5480, RFC 5758)
pub const EC_PUBLIC_KEY: &[u32] = &[1, 2, 840, 10045, 2, 1];
pub const ECDSA_WITH_SHA1: &[u32] = &[1, 2, 840, 10045, 4, 1];
pub const ECDSA_WITH_SHA224: &[u32] = &[1, 2, 840, 10045, 4, 3, 1];
pub const ECDSA_WITH_SHA256: &[u32] = &[1, 2, 840, 10045, 4, 3, 2];
pub const ECDSA_WITH_SHA384: &[u32] = &[1, 2, 840, 10045, 4, 3, 3];
pub const ECDSA_WITH_SHA512: &[u32] = &[1, 2, 840, 10045, 4, 3, 4];

// Hash algorithms
pub const SHA1: &[u32] = &[1, 3, 14, 3, 2, 26];
pub const SHA256: &[u32] = &[2, 16, 840, 1, 101, 3, 4, 2, 1];
pub const SHA384: &[u32] = &[2, 16, 840, 1, 101, 3, 4, 2, 2];
pub const SHA512: &[u32] = &[2, 16, 840, 1, 101, 3, 4, 2, 3];
pub const SHA224: &[u32] = &[2, 16, 840, 1, 101, 3, 4, 2, 4];

// Named curves
pub const NIST_P256: &[u32] = &[1, 2, 840, 10045, 3, 1, 7];
pub const NIST_P384: &[u32] = &[1, 3, 132, 0, 34];
pub const NIST_P521: &[u32] = &[1, 3, 132, 0, 35];
pub const BRAINPOOL_P256R1: &[u32] = &[1, 3, 36, 3, 3, 2, 8, 1, 1, 7];
pub const BRAINPOOL_P384R1: &[u32] = &[1, 3, 36, 3, 3, 2, 8, 1, 1, 11];
pub const BRAINPOOL_P512R1: &[u32] = &[1, 3, 36, 3, 3, 2, 8, 1, 1, 13];

// CRL and CRL entry extensions (RFC 5280 §5.2, §5.3)
pub const CRL_NUMBER: &[u32] = &[2, 5, 29, 20];
pub const REASON_CODE: &[u32] = &[2, 5, 29, 21];
pub const INVALIDITY_DATE: &[u32] = &[2, 5, 29, 24];
pub const DELTA_CRL_INDICATOR: &[u32] = &[2, 5, 29, 27];

/// Render an OID in dotted-decimal form.
pub fn to_dotted(oid: &[u32]) -> String {
    oid.iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_dotted() {
        assert_eq!(to_dotted(SHA256_WITH_RSA), "1.2.840.113549.1.1.11");
        assert_eq!(to_dotted(NIST_P384), "1.3.132.0.34");
        assert_eq!(to_dotted(&[]), "");
    }
}
