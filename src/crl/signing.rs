use rasn_pkix::SubjectPublicKeyInfo;
use tracing::{debug, info, warn};

use super::errors::{CrlError, CrlResult};
use super::revocation::CertificateView;
use super::types::{CertificateList, Extension};
use crate::algorithms;
use crate::crypto::{CryptoEngine, HashAlg, KeyFormat, KeyUsage};

/// Where the public key for CRL verification comes from
#[derive(Clone, Copy)]
pub enum VerificationSource<'a> {
    /// The issuer's certificate. Its subject must equal the CRL issuer.
    IssuerCertificate(&'a dyn CertificateView),
    /// A public key supplied directly. No name check is made.
    PublicKey(&'a SubjectPublicKeyInfo),
}

impl<'a> VerificationSource<'a> {
    /// Pick the single key source out of optional inputs
    pub fn from_parts(
        issuer_certificate: Option<&'a dyn CertificateView>,
        public_key: Option<&'a SubjectPublicKeyInfo>,
    ) -> CrlResult<Self> {
        match (issuer_certificate, public_key) {
            (Some(certificate), None) => Ok(Self::IssuerCertificate(certificate)),
            (None, Some(public_key)) => Ok(Self::PublicKey(public_key)),
            (None, None) => Err(CrlError::MissingKeyMaterial(
                "an issuer certificate or a public key is required",
            )),
            (Some(_), Some(_)) => Err(CrlError::MissingKeyMaterial(
                "give either an issuer certificate or a public key, not both",
            )),
        }
    }
}

fn first_unknown_critical<'e>(
    extensions: impl IntoIterator<Item = &'e Extension>,
) -> Option<&'e Extension> {
    extensions
        .into_iter()
        .find(|ext| ext.critical && !ext.is_understood())
}

impl CertificateList {
    fn unknown_critical_extension(&self) -> Option<&Extension> {
        let crl_extensions = self.tbs.crl_extensions.iter().flatten();
        let entry_extensions = self
            .tbs
            .revoked_certificates
            .iter()
            .flatten()
            .flat_map(|entry| entry.entry_extensions.iter().flatten());
        first_unknown_critical(crl_extensions.chain(entry_extensions))
    }

    /// Verify the CRL signature.
    ///
    /// Returns `Ok(false)` when the issuer certificate's subject differs from
    /// the CRL issuer, when a critical extension was not understood, when the
    /// CRL holds no signed bytes, or when the signature does not match.
    /// Unknown algorithms, malformed parameters and engine failures are errors.
    pub fn verify<E: CryptoEngine>(
        &self,
        engine: &E,
        source: VerificationSource<'_>,
    ) -> CrlResult<bool> {
        let spki = match source {
            VerificationSource::IssuerCertificate(certificate) => {
                if certificate.subject() != &self.tbs.issuer {
                    info!("Issuer certificate subject does not match CRL issuer");
                    return Ok(false);
                }
                certificate.subject_public_key_info()
            }
            VerificationSource::PublicKey(spki) => spki,
        };

        if let Some(ext) = self.unknown_critical_extension() {
            warn!(
                "Refusing CRL with unrecognized critical extension {}",
                crate::asn1::oid::to_dotted(&ext.oid)
            );
            return Ok(false);
        }

        let hash = algorithms::resolve_hash_algorithm(&self.signature_algorithm)?;
        let scheme = algorithms::signature_scheme(&self.signature_algorithm)?;
        let import_params = algorithms::key_import_params(spki, scheme)?;

        let spki_der = rasn::der::encode(spki)?;
        let public_key =
            engine.import_public_key(KeyFormat::Spki, &spki_der, &import_params, &[KeyUsage::Verify])?;

        let (params, signature) = algorithms::verification_parameters(
            &self.signature_algorithm,
            hash,
            &import_params,
            &self.signature_value,
        )?;

        let Some(tbs_bytes) = self.tbs_bytes() else {
            debug!("CRL has no signed bytes to verify");
            return Ok(false);
        };

        let verified = engine.verify(&params, &public_key, &signature, tbs_bytes)?;
        info!("CRL signature ({}, {hash}) verified: {verified}", params.scheme());
        Ok(verified)
    }

    /// Sign the CRL with `key`.
    ///
    /// Sets the body's `signature` and the outer `signature_algorithm`, encodes
    /// the body and signs that encoding. The signed bytes and `signature_value`
    /// are replaced together once the engine succeeds. The algorithm fields are
    /// not rolled back: if encoding or the engine fails they keep their new
    /// values while the signed bytes and `signature_value` keep their old ones.
    pub fn sign<E: CryptoEngine>(
        &mut self,
        engine: &E,
        key: &E::PrivateKey,
        hash: HashAlg,
    ) -> CrlResult<()> {
        let defaults = engine.default_signature_parameters(key, hash)?;

        self.tbs.signature = defaults.algorithm.clone();
        self.signature_algorithm = defaults.algorithm;

        let tbs_bytes = self.tbs.to_der()?;
        let raw_signature = engine.sign(&tbs_bytes, key, &defaults.params)?;
        let signature_value = algorithms::signature_to_wire(&defaults.params, &raw_signature)?;

        self.tbs_bytes = Some(tbs_bytes);
        self.signature_value = signature_value;

        info!("Signed CRL with {} ({hash})", defaults.params.scheme());
        Ok(())
    }
}
