//! Human-readable export of a CRL.
//!
//! Fields absent from the model are absent from the export, never `null`.

use rasn::prelude::{Any, Ia5String};
use rasn_pkix::{AlgorithmIdentifier, DirectoryString, Name, Time};
use serde::Serialize;
use serde_json::json;

use super::errors::CrlResult;
use super::extensions::ParsedExtension;
use super::types::{CertificateList, Extension, RevokedCertificate, TbsCertList, Version};
use crate::algorithms;
use crate::asn1::oid;
use crate::asn1::schema::integer_bytes;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateListExport {
    pub tbs_cert_list: TbsCertListExport,
    pub signature_algorithm: AlgorithmExport,
    pub signature_value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TbsCertListExport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u8>,
    pub signature: AlgorithmExport,
    pub issuer: Vec<Vec<AttributeExport>>,
    pub this_update: TimeExport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_update: Option<TimeExport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revoked_certificates: Option<Vec<RevokedCertificateExport>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crl_extensions: Option<Vec<ExtensionExport>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlgorithmExport {
    pub oid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeExport {
    #[serde(rename = "type")]
    pub attribute_type: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeExport {
    #[serde(rename = "type")]
    pub time_type: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevokedCertificateExport {
    pub serial_number: String,
    pub revocation_date: TimeExport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crl_entry_extensions: Option<Vec<ExtensionExport>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionExport {
    pub oid: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub critical: bool,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed: Option<serde_json::Value>,
}

fn algorithm(identifier: &AlgorithmIdentifier) -> AlgorithmExport {
    AlgorithmExport {
        oid: oid::to_dotted(&identifier.algorithm),
        name: algorithms::resolve_by_oid(&identifier.algorithm).map(|d| d.name),
        parameters: identifier
            .parameters
            .as_ref()
            .map(|parameters| hex::encode::<&[u8]>(parameters.as_ref())),
    }
}

fn time(value: &Time) -> TimeExport {
    match value {
        Time::Utc(utc) => TimeExport {
            time_type: "utcTime",
            value: utc.to_rfc3339(),
        },
        Time::General(general) => TimeExport {
            time_type: "generalizedTime",
            value: general.to_rfc3339(),
        },
    }
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

// UTF8, Printable and IA5 strings are shown as text, anything else as hex DER
fn attribute_value(value: &Any) -> String {
    let der: &[u8] = value.as_ref();
    match rasn::ber::decode::<DirectoryString>(der) {
        Ok(DirectoryString::Utf8(utf8)) => utf8,
        Ok(DirectoryString::Printable(printable)) => text(printable.as_bytes()),
        Ok(_) => hex::encode(der),
        Err(_) => rasn::ber::decode::<Ia5String>(der)
            .map(|ia5| text(ia5.as_iso646_bytes()))
            .unwrap_or_else(|_| hex::encode(der)),
    }
}

fn name(value: &Name) -> Vec<Vec<AttributeExport>> {
    let Name::RdnSequence(rdns) = value;
    rdns.iter()
        .map(|rdn| {
            rdn.to_vec()
                .iter()
                .map(|attribute| AttributeExport {
                    attribute_type: oid::to_dotted(&attribute.r#type),
                    value: attribute_value(&attribute.value),
                })
                .collect()
        })
        .collect()
}

fn parsed(value: &ParsedExtension) -> CrlResult<serde_json::Value> {
    Ok(match value {
        ParsedExtension::CrlNumber(number) => json!({ "crlNumber": hex::encode(integer_bytes(number)?) }),
        ParsedExtension::DeltaCrlIndicator(base) => {
            json!({ "baseCrlNumber": hex::encode(integer_bytes(base)?) })
        }
        ParsedExtension::ReasonCode(reason) => json!({ "reason": reason }),
        ParsedExtension::InvalidityDate(date) => json!({ "invalidityDate": date.to_rfc3339() }),
        ParsedExtension::Custom(text) => json!({ "custom": text }),
    })
}

fn extensions(extensions: Option<&Vec<Extension>>) -> CrlResult<Option<Vec<ExtensionExport>>> {
    extensions
        .map(|extensions| {
            extensions
                .iter()
                .map(|ext| {
                    Ok(ExtensionExport {
                        oid: oid::to_dotted(&ext.oid),
                        critical: ext.critical,
                        value: hex::encode(&ext.raw_value),
                        parsed: ext.parsed_value.as_ref().map(parsed).transpose()?,
                    })
                })
                .collect::<CrlResult<Vec<_>>>()
        })
        .transpose()
}

fn revoked(entry: &RevokedCertificate) -> CrlResult<RevokedCertificateExport> {
    Ok(RevokedCertificateExport {
        serial_number: hex::encode(integer_bytes(&entry.serial_number)?),
        revocation_date: time(&entry.revocation_date),
        crl_entry_extensions: extensions(entry.entry_extensions.as_ref())?,
    })
}

impl TbsCertList {
    pub fn to_export(&self) -> CrlResult<TbsCertListExport> {
        Ok(TbsCertListExport {
            version: match self.version {
                Version::V1 => None,
                Version::V2 => Some(self.version.number()),
            },
            signature: algorithm(&self.signature),
            issuer: name(&self.issuer),
            this_update: time(&self.this_update),
            next_update: self.next_update.as_ref().map(time),
            revoked_certificates: self
                .revoked_certificates
                .as_ref()
                .map(|entries| entries.iter().map(revoked).collect::<CrlResult<Vec<_>>>())
                .transpose()?,
            crl_extensions: extensions(self.crl_extensions.as_ref())?,
        })
    }
}

impl CertificateList {
    pub fn to_export(&self) -> CrlResult<CertificateListExport> {
        Ok(CertificateListExport {
            tbs_cert_list: self.tbs.to_export()?,
            signature_algorithm: algorithm(&self.signature_algorithm),
            signature_value: hex::encode(&self.signature_value),
        })
    }

    pub fn to_json(&self) -> CrlResult<serde_json::Value> {
        Ok(serde_json::to_value(self.to_export()?)?)
    }
}
