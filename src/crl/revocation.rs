use chrono::{DateTime, Utc};
use rasn::prelude::Integer;
use rasn_pkix::{Certificate, Name, SubjectPublicKeyInfo};
use tracing::{debug, info};

use super::types::{CertificateList, RevokedCertificate, time_to_utc};

/// The parts of a certificate that revocation checks and CRL verification consume
pub trait CertificateView {
    fn issuer(&self) -> &Name;
    fn serial_number(&self) -> &Integer;
    fn subject(&self) -> &Name;
    fn subject_public_key_info(&self) -> &SubjectPublicKeyInfo;
}

impl CertificateView for Certificate {
    fn issuer(&self) -> &Name {
        &self.tbs_certificate.issuer
    }

    fn serial_number(&self) -> &Integer {
        &self.tbs_certificate.serial_number
    }

    fn subject(&self) -> &Name {
        &self.tbs_certificate.subject
    }

    fn subject_public_key_info(&self) -> &SubjectPublicKeyInfo {
        &self.tbs_certificate.subject_public_key_info
    }
}

impl CertificateList {
    /// Check whether `certificate` is listed as revoked by this CRL.
    ///
    /// A certificate from a different issuer is never revoked by this CRL.
    /// Entry extensions such as the reason code are not consulted.
    pub fn is_revoked(&self, certificate: &dyn CertificateView) -> bool {
        if certificate.issuer() != &self.tbs.issuer {
            debug!("Certificate issuer does not match CRL issuer");
            return false;
        }

        match self.find_revoked(certificate.serial_number()) {
            Some(entry) => {
                info!(
                    "Certificate with serial {:?} is revoked",
                    certificate.serial_number()
                );
                if let Some(reason) = entry.reason() {
                    info!("Revocation reason: {:?}", reason);
                }
                true
            }
            None => false,
        }
    }

    /// First entry listing `serial_number`
    pub fn find_revoked(&self, serial_number: &Integer) -> Option<&RevokedCertificate> {
        self.tbs
            .revoked_certificates
            .as_deref()?
            .iter()
            .find(|entry| &entry.serial_number == serial_number)
    }

    /// Whether `time` falls between thisUpdate and nextUpdate.
    ///
    /// Without nextUpdate the CRL stays current from thisUpdate on.
    pub fn is_current_at(&self, time: DateTime<Utc>) -> bool {
        if time_to_utc(&self.tbs.this_update) > time {
            debug!("CRL thisUpdate is in the future");
            return false;
        }

        match &self.tbs.next_update {
            Some(next_update) if time_to_utc(next_update) < time => {
                debug!("CRL nextUpdate has passed");
                false
            }
            _ => true,
        }
    }
}
