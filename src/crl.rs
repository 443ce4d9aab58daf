mod codec;
mod errors;
pub mod export;
pub mod extensions;
mod revocation;
mod signing;
mod types;

pub use errors::{CrlError, CrlResult};
pub use extensions::{ExtensionInterpreter, ExtensionRegistry, ParsedExtension, RevocationReason};
pub use revocation::CertificateView;
pub use signing::VerificationSource;
pub use types::{
    CertificateList, Extension, RevokedCertificate, TbsCertList, Version, time_to_utc,
};

/// PEM label of an X.509 CRL
pub const PEM_LABEL: &str = "X509 CRL";
