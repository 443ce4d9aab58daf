pub mod algorithms;
pub mod armor;
pub mod asn1;
pub mod config;
pub mod crl;
pub mod crypto;
pub mod telemetry;

pub use crl::{
    CertificateList, CertificateView, CrlError, CrlResult, ExtensionRegistry, TbsCertList,
    VerificationSource,
};
pub use crypto::{CryptoEngine, HashAlg, OpenSslEngine, SigningKey};
