use rasn::prelude::*;
use tracing::debug;

use super::errors::{CrlError, CrlResult};
use super::extensions::ExtensionRegistry;
use super::types::{CertificateList, Extension, RevokedCertificate, TbsCertList, Version};
use super::PEM_LABEL;
use crate::asn1::schema::{CertificateListSchema, RevokedCertificateSchema, TbsCertListSchema};
use crate::armor;

impl Version {
    fn from_wire(version: Option<&Integer>) -> CrlResult<Self> {
        match version {
            None => Ok(Version::V1),
            Some(v) if *v == Integer::from(0) => Ok(Version::V1),
            Some(v) if *v == Integer::from(1) => Ok(Version::V2),
            Some(v) => Err(CrlError::SchemaMismatch(format!(
                "unsupported CRL version {v:?}"
            ))),
        }
    }

    fn to_wire(self) -> Option<Integer> {
        match self {
            Version::V1 => None,
            Version::V2 => Some(Integer::from(1)),
        }
    }
}

// Extension ::= SEQUENCE { extnID, critical BOOLEAN DEFAULT FALSE, extnValue }
//
// The element is split into its components first so that a component with an
// unexpected tag is an error instead of a defaulted `critical`.
fn extension_from_wire(element: &Any, registry: &ExtensionRegistry) -> CrlResult<Extension> {
    let components: SequenceOf<Any> = rasn::ber::decode(element.as_ref())?;
    let (extn_id, critical, extn_value) = match components.as_slice() {
        [extn_id, extn_value] => (extn_id, None, extn_value),
        [extn_id, critical, extn_value] => (extn_id, Some(critical), extn_value),
        other => {
            return Err(CrlError::SchemaMismatch(format!(
                "extension with {} components",
                other.len()
            )));
        }
    };

    let oid: ObjectIdentifier = rasn::ber::decode(extn_id.as_ref())?;
    let critical = match critical {
        Some(critical) => rasn::ber::decode::<bool>(critical.as_ref())?,
        None => false,
    };
    let raw_value = rasn::ber::decode::<OctetString>(extn_value.as_ref())?.to_vec();
    let parsed_value = registry.interpret(&oid, &raw_value)?;

    Ok(Extension {
        oid,
        critical,
        raw_value,
        parsed_value,
    })
}

// Extensions ::= SEQUENCE SIZE (1..MAX) OF Extension
fn reject_empty<T>(extensions: &[T]) -> CrlResult<()> {
    if extensions.is_empty() {
        return Err(CrlError::SchemaMismatch("empty extensions list".into()));
    }
    Ok(())
}

fn extensions_from_wire(
    extensions: Option<SequenceOf<Any>>,
    registry: &ExtensionRegistry,
) -> CrlResult<Option<Vec<Extension>>> {
    let Some(extensions) = extensions else {
        return Ok(None);
    };
    reject_empty(&extensions)?;

    extensions
        .iter()
        .map(|element| extension_from_wire(element, registry))
        .collect::<CrlResult<Vec<_>>>()
        .map(Some)
}

fn extensions_to_wire(extensions: Option<&Vec<Extension>>) -> CrlResult<Option<SequenceOf<Any>>> {
    extensions
        .map(|extensions| {
            reject_empty(extensions)?;
            extensions
                .iter()
                .map(|ext| {
                    let element = rasn::der::encode(&rasn_pkix::Extension {
                        extn_id: ext.oid.clone(),
                        critical: ext.critical,
                        extn_value: OctetString::from(ext.raw_value.clone()),
                    })?;
                    Ok(Any::new(element))
                })
                .collect::<CrlResult<Vec<_>>>()
        })
        .transpose()
}

impl RevokedCertificate {
    fn from_schema(entry: RevokedCertificateSchema, registry: &ExtensionRegistry) -> CrlResult<Self> {
        Ok(Self {
            serial_number: entry.user_certificate,
            revocation_date: entry.revocation_date,
            entry_extensions: extensions_from_wire(entry.crl_entry_extensions, registry)?,
        })
    }

    fn to_schema(&self) -> CrlResult<RevokedCertificateSchema> {
        Ok(RevokedCertificateSchema {
            user_certificate: self.serial_number.clone(),
            revocation_date: self.revocation_date.clone(),
            crl_entry_extensions: extensions_to_wire(self.entry_extensions.as_ref())?,
        })
    }
}

impl TbsCertList {
    /// Build the model from a decoded TBSCertList, interpreting extensions with `registry`
    pub fn from_schema(schema: TbsCertListSchema, registry: &ExtensionRegistry) -> CrlResult<Self> {
        let revoked_certificates = schema
            .revoked_certificates
            .map(|entries| {
                entries
                    .into_iter()
                    .map(|entry| RevokedCertificate::from_schema(entry, registry))
                    .collect::<CrlResult<Vec<_>>>()
            })
            .transpose()?;

        Ok(Self {
            version: Version::from_wire(schema.version.as_ref())?,
            signature: schema.signature,
            issuer: schema.issuer,
            this_update: schema.this_update,
            next_update: schema.next_update,
            revoked_certificates,
            crl_extensions: extensions_from_wire(schema.crl_extensions, registry)?,
        })
    }

    /// Assemble the TBSCertList structure from the current field values.
    ///
    /// `version` is only emitted for v2, and every optional field only when set.
    pub fn to_schema(&self) -> CrlResult<TbsCertListSchema> {
        let revoked_certificates = self
            .revoked_certificates
            .as_ref()
            .map(|entries| {
                entries
                    .iter()
                    .map(RevokedCertificate::to_schema)
                    .collect::<CrlResult<Vec<_>>>()
            })
            .transpose()?;

        Ok(TbsCertListSchema {
            version: self.version.to_wire(),
            signature: self.signature.clone(),
            issuer: self.issuer.clone(),
            this_update: self.this_update.clone(),
            next_update: self.next_update.clone(),
            revoked_certificates,
            crl_extensions: extensions_to_wire(self.crl_extensions.as_ref())?,
        })
    }

    /// Fresh DER encoding of the body
    pub fn to_der(&self) -> CrlResult<Vec<u8>> {
        Ok(rasn::der::encode(&self.to_schema()?)?)
    }

    pub fn from_der(der: impl AsRef<[u8]>) -> CrlResult<Self> {
        Self::from_der_with(der, &ExtensionRegistry::default())
    }

    pub fn from_der_with(der: impl AsRef<[u8]>, registry: &ExtensionRegistry) -> CrlResult<Self> {
        let schema: TbsCertListSchema = rasn::ber::decode(der.as_ref())?;
        Self::from_schema(schema, registry)
    }
}

impl CertificateList {
    /// Decode a DER (or BER) encoded CRL without interpreting any extension
    pub fn from_der(der: impl AsRef<[u8]>) -> CrlResult<Self> {
        Self::from_der_with(der, &ExtensionRegistry::default())
    }

    /// Decode a CRL, interpreting extensions with `registry`.
    ///
    /// The TBS element is kept byte for byte as it appeared in the input.
    pub fn from_der_with(der: impl AsRef<[u8]>, registry: &ExtensionRegistry) -> CrlResult<Self> {
        let outer: CertificateListSchema = rasn::ber::decode(der.as_ref())?;

        if outer.signature_value.len() % 8 != 0 {
            return Err(CrlError::SchemaMismatch(
                "signature value is not a whole number of octets".into(),
            ));
        }

        let tbs_bytes: &[u8] = outer.tbs_cert_list.as_ref();
        let tbs = TbsCertList::from_der_with(tbs_bytes, registry)?;

        debug!(
            "Decoded {:?} CRL with {} revoked entries",
            tbs.version,
            tbs.revoked_certificates.as_ref().map_or(0, Vec::len)
        );

        Ok(Self {
            tbs,
            tbs_bytes: Some(tbs_bytes.to_vec()),
            signature_algorithm: outer.signature_algorithm,
            signature_value: outer.signature_value.as_raw_slice().to_vec(),
        })
    }

    pub fn from_pem(pem_text: &str) -> CrlResult<Self> {
        Self::from_pem_with(pem_text, &ExtensionRegistry::default())
    }

    pub fn from_pem_with(pem_text: &str, registry: &ExtensionRegistry) -> CrlResult<Self> {
        let der = armor::decode(PEM_LABEL, pem_text)?;
        Self::from_der_with(der, registry)
    }

    /// Assemble the outer CertificateList structure.
    ///
    /// Unless `regenerate_tbs` is set, stored TBS bytes are reused verbatim so
    /// the signed range is unchanged. Without stored bytes the body is encoded
    /// from its fields.
    pub fn to_schema(&self, regenerate_tbs: bool) -> CrlResult<CertificateListSchema> {
        let tbs_cert_list = match (&self.tbs_bytes, regenerate_tbs) {
            (Some(stored), false) => Any::new(stored.clone()),
            _ => Any::new(self.tbs.to_der()?),
        };

        Ok(CertificateListSchema {
            tbs_cert_list,
            signature_algorithm: self.signature_algorithm.clone(),
            signature_value: BitString::from_vec(self.signature_value.clone()),
        })
    }

    pub fn to_der(&self, regenerate_tbs: bool) -> CrlResult<Vec<u8>> {
        Ok(rasn::der::encode(&self.to_schema(regenerate_tbs)?)?)
    }

    pub fn to_pem(&self, regenerate_tbs: bool) -> CrlResult<String> {
        Ok(armor::encode(PEM_LABEL, &self.to_der(regenerate_tbs)?))
    }
}
