#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use openssl::asn1::{Asn1Integer, Asn1Time};
use openssl::bn::BigNum;
use openssl::hash::MessageDigest;
use openssl::x509::{X509, X509NameBuilder};
use pkix_crl::algorithms::algorithm_identifier;
use pkix_crl::asn1::oid;
use pkix_crl::crl::{CertificateView, RevokedCertificate, TbsCertList, Version};
use pkix_crl::crypto::SigningKey;
use rasn::prelude::{BitString, Integer};
use rasn_pkix::{Certificate, Name, SubjectPublicKeyInfo, Time};

/// Distinguished name with a single common name, encoded by OpenSSL
pub fn name(common_name: &str) -> Name {
    let mut builder = X509NameBuilder::new().unwrap();
    builder.append_entry_by_text("CN", common_name).unwrap();
    let der = builder.build().to_der().unwrap();
    rasn::der::decode(&der).unwrap()
}

pub fn utc(year: i32, month: u32, day: u32) -> Time {
    Time::Utc(Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap())
}

pub fn serial(value: u32) -> Integer {
    Integer::from(value)
}

/// Self-signed CA certificate for `key` with subject and issuer `common_name`
pub fn issuer_certificate(common_name: &str, key: &SigningKey) -> Certificate {
    let mut name_builder = X509NameBuilder::new().unwrap();
    name_builder.append_entry_by_text("CN", common_name).unwrap();
    let x509_name = name_builder.build();

    let serial = BigNum::from_u32(1).unwrap();
    let serial = Asn1Integer::from_bn(&serial).unwrap();

    let mut builder = X509::builder().unwrap();
    builder.set_version(2).unwrap();
    builder.set_serial_number(&serial).unwrap();
    builder.set_subject_name(&x509_name).unwrap();
    builder.set_issuer_name(&x509_name).unwrap();
    builder.set_pubkey(key.as_openssl_pkey()).unwrap();
    builder
        .set_not_before(&Asn1Time::days_from_now(0).unwrap())
        .unwrap();
    builder
        .set_not_after(&Asn1Time::days_from_now(365).unwrap())
        .unwrap();
    builder
        .sign(key.as_openssl_pkey(), MessageDigest::sha256())
        .unwrap();

    let der = builder.build().to_der().unwrap();
    rasn::der::decode(&der).unwrap()
}

/// SubjectPublicKeyInfo of `key`
pub fn public_key_info(key: &SigningKey) -> SubjectPublicKeyInfo {
    rasn::der::decode(&key.public_key_der().unwrap()).unwrap()
}

/// Minimal certificate stand-in for revocation checks
pub struct TestCertificate {
    pub issuer: Name,
    pub serial_number: Integer,
    pub subject: Name,
    pub spki: SubjectPublicKeyInfo,
}

impl TestCertificate {
    pub fn new(issuer_cn: &str, serial_number: u32) -> Self {
        Self {
            issuer: name(issuer_cn),
            serial_number: serial(serial_number),
            subject: name("leaf"),
            spki: SubjectPublicKeyInfo {
                algorithm: algorithm_identifier(oid::RSA_ENCRYPTION, None),
                subject_public_key: BitString::new(),
            },
        }
    }
}

impl CertificateView for TestCertificate {
    fn issuer(&self) -> &Name {
        &self.issuer
    }

    fn serial_number(&self) -> &Integer {
        &self.serial_number
    }

    fn subject(&self) -> &Name {
        &self.subject
    }

    fn subject_public_key_info(&self) -> &SubjectPublicKeyInfo {
        &self.spki
    }
}

/// v2 body from `issuer_cn` revoking serials 42 and 100
pub fn sample_tbs(issuer_cn: &str) -> TbsCertList {
    let mut tbs = TbsCertList::new(
        algorithm_identifier(oid::SHA256_WITH_RSA, None),
        name(issuer_cn),
        utc(2024, 1, 1),
    );
    tbs.version = Version::V2;
    tbs.next_update = Some(utc(2024, 2, 1));
    tbs.revoked_certificates = Some(vec![
        RevokedCertificate::new(serial(42), utc(2023, 12, 15)),
        RevokedCertificate::new(serial(100), utc(2023, 12, 20)),
    ]);
    tbs
}

/// Wrap `content` in a DER SEQUENCE header
pub fn der_sequence(content: &[u8]) -> Vec<u8> {
    let mut out = vec![0x30];
    let len = content.len();
    if len < 0x80 {
        out.push(len as u8);
    } else if len <= 0xff {
        out.extend_from_slice(&[0x81, len as u8]);
    } else {
        out.extend_from_slice(&[0x82, (len >> 8) as u8, len as u8]);
    }
    out.extend_from_slice(content);
    out
}
