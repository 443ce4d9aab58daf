use chrono::{DateTime, Utc};
use rasn::prelude::{ObjectIdentifier as Oid, *};
use rasn_pkix::{AlgorithmIdentifier, Name, Time};

use super::extensions::{ParsedExtension, RevocationReason};
use crate::asn1::oid;

/// CRL version. Absent on the wire means v1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Version {
    #[default]
    V1,
    V2,
}

impl Version {
    /// Version number as written in RFC 5280 (1 or 2)
    pub fn number(self) -> u8 {
        match self {
            Version::V1 => 1,
            Version::V2 => 2,
        }
    }
}

/// A CRL or CRL entry extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    pub oid: Oid,
    pub critical: bool,
    /// Contents of the `extnValue` OCTET STRING
    pub raw_value: Vec<u8>,
    /// Set when an interpreter understood the extension
    pub parsed_value: Option<ParsedExtension>,
}

impl Extension {
    pub fn new(oid: Oid, critical: bool, raw_value: impl Into<Vec<u8>>) -> Self {
        Self {
            oid,
            critical,
            raw_value: raw_value.into(),
            parsed_value: None,
        }
    }

    pub fn is_understood(&self) -> bool {
        self.parsed_value.is_some()
    }

    pub(crate) fn has_oid(&self, wanted: &[u32]) -> bool {
        let own: &[u32] = &self.oid;
        own == wanted
    }
}

/// An entry of `revokedCertificates`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevokedCertificate {
    pub serial_number: Integer,
    pub revocation_date: Time,
    pub entry_extensions: Option<Vec<Extension>>,
}

impl RevokedCertificate {
    pub fn new(serial_number: Integer, revocation_date: Time) -> Self {
        Self {
            serial_number,
            revocation_date,
            entry_extensions: None,
        }
    }

    fn parsed(&self, wanted: &[u32]) -> Option<&ParsedExtension> {
        self.entry_extensions
            .as_deref()?
            .iter()
            .find(|ext| ext.has_oid(wanted))?
            .parsed_value
            .as_ref()
    }

    /// Revocation reason, if the reason code extension is present and understood
    pub fn reason(&self) -> Option<RevocationReason> {
        match self.parsed(oid::REASON_CODE)? {
            ParsedExtension::ReasonCode(reason) => Some(*reason),
            _ => None,
        }
    }

    /// Invalidity date, if the extension is present and understood
    pub fn invalidity_date(&self) -> Option<DateTime<Utc>> {
        match self.parsed(oid::INVALIDITY_DATE)? {
            ParsedExtension::InvalidityDate(date) => Some(date.with_timezone(&Utc)),
            _ => None,
        }
    }
}

/// The signed body of a CRL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TbsCertList {
    pub version: Version,
    /// Signature algorithm as declared inside the signed body
    pub signature: AlgorithmIdentifier,
    pub issuer: Name,
    pub this_update: Time,
    pub next_update: Option<Time>,
    /// `Some(vec![])` and `None` encode differently and are kept apart
    pub revoked_certificates: Option<Vec<RevokedCertificate>>,
    pub crl_extensions: Option<Vec<Extension>>,
}

impl TbsCertList {
    /// A v1 body with every optional field absent
    pub fn new(signature: AlgorithmIdentifier, issuer: Name, this_update: Time) -> Self {
        Self {
            version: Version::V1,
            signature,
            issuer,
            this_update,
            next_update: None,
            revoked_certificates: None,
            crl_extensions: None,
        }
    }

    /// Whether the body carries anything that RFC 5280 only allows in v2 CRLs.
    ///
    /// Encoding does not enforce this; callers set `version` themselves.
    pub fn requires_v2(&self) -> bool {
        let entry_extensions = self
            .revoked_certificates
            .iter()
            .flatten()
            .any(|entry| entry.entry_extensions.is_some());
        entry_extensions || self.crl_extensions.is_some()
    }

    /// CRL number, if present and understood
    pub fn crl_number(&self) -> Option<&Integer> {
        self.crl_extensions
            .as_deref()?
            .iter()
            .filter_map(|ext| ext.parsed_value.as_ref())
            .find_map(|parsed| match parsed {
                ParsedExtension::CrlNumber(number) => Some(number),
                _ => None,
            })
    }
}

/// A signed X.509 CRL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateList {
    pub tbs: TbsCertList,
    /// Exact bytes of the TBS element as decoded or as last signed
    pub(crate) tbs_bytes: Option<Vec<u8>>,
    /// Algorithm actually used for `signature_value`
    pub signature_algorithm: AlgorithmIdentifier,
    /// Signature in wire form (DER `SEQUENCE { r, s }` for ECDSA)
    pub signature_value: Vec<u8>,
}

impl CertificateList {
    /// An unsigned CRL around `tbs`. `signature_algorithm` mirrors the body until signed.
    pub fn new(tbs: TbsCertList) -> Self {
        Self {
            signature_algorithm: tbs.signature.clone(),
            tbs,
            tbs_bytes: None,
            signature_value: Vec::new(),
        }
    }

    /// Bytes covered by the signature, if the CRL was decoded or signed
    pub fn tbs_bytes(&self) -> Option<&[u8]> {
        self.tbs_bytes.as_deref()
    }
}

/// Convert either ASN.1 time variant to UTC
pub fn time_to_utc(time: &Time) -> DateTime<Utc> {
    match time {
        Time::Utc(utc) => *utc,
        Time::General(general) => general.with_timezone(&Utc),
    }
}
