mod common;

use common::{der_sequence, name, sample_tbs, utc};
use pkix_crl::algorithms::algorithm_identifier;
use pkix_crl::asn1::oid;
use pkix_crl::crl::{CertificateList, Extension, ExtensionRegistry, TbsCertList, Version};
use pkix_crl::crypto::{CryptoEngine, Curve, OpenSslEngine, SigningKey};
use pkix_crl::HashAlg;
use rasn::prelude::{BitString, ObjectIdentifier as Oid};

#[test]
fn regenerated_encoding_round_trips_every_field() {
    let mut tbs = sample_tbs("Round Trip CA");
    tbs.crl_extensions = Some(vec![Extension::new(
        Oid::new_unchecked(oid::CRL_NUMBER.into()),
        false,
        vec![0x02, 0x01, 0x03],
    )]);
    let list = CertificateList::new(tbs);

    let decoded = CertificateList::from_der(list.to_der(true).unwrap()).unwrap();
    assert_eq!(decoded.tbs, list.tbs);
    assert_eq!(decoded.signature_algorithm, list.signature_algorithm);
    assert_eq!(decoded.signature_value, list.signature_value);
}

#[test]
fn absent_fields_stay_absent() {
    let tbs = TbsCertList::new(
        algorithm_identifier(oid::ECDSA_WITH_SHA256, None),
        name("Sparse CA"),
        utc(2024, 1, 1),
    );
    let list = CertificateList::new(tbs);

    let decoded = CertificateList::from_der(list.to_der(true).unwrap()).unwrap();
    assert_eq!(decoded.tbs.version, Version::V1);
    assert!(decoded.tbs.next_update.is_none());
    assert!(decoded.tbs.revoked_certificates.is_none());
    assert!(decoded.tbs.crl_extensions.is_none());
}

#[test]
fn empty_revoked_list_differs_from_absent() {
    let absent = TbsCertList::new(
        algorithm_identifier(oid::ECDSA_WITH_SHA256, None),
        name("Empty CA"),
        utc(2024, 1, 1),
    );
    let mut empty = absent.clone();
    empty.revoked_certificates = Some(Vec::new());

    let absent_der = CertificateList::new(absent).to_der(true).unwrap();
    let empty_der = CertificateList::new(empty).to_der(true).unwrap();
    assert_ne!(absent_der, empty_der);

    let absent = CertificateList::from_der(&absent_der).unwrap();
    let empty = CertificateList::from_der(&empty_der).unwrap();
    assert_eq!(absent.tbs.revoked_certificates, None);
    assert_eq!(empty.tbs.revoked_certificates, Some(Vec::new()));
    assert_ne!(absent.tbs, empty.tbs);
}

#[test]
fn default_version_is_never_encoded() {
    let mut tbs = sample_tbs("Version CA");
    tbs.version = Version::V1;
    let v1 = tbs.to_der().unwrap();

    tbs.version = Version::V2;
    let v2 = tbs.to_der().unwrap();

    // Header of the body, then either the version INTEGER or the signature SEQUENCE
    let header = if v1[1] & 0x80 != 0 { 2 + usize::from(v1[1] & 0x7f) } else { 2 };
    assert_eq!(v1[header], 0x30);

    let header = if v2[1] & 0x80 != 0 { 2 + usize::from(v2[1] & 0x7f) } else { 2 };
    assert_eq!(&v2[header..header + 3], &[0x02, 0x01, 0x01]);
}

#[test]
fn stored_tbs_bytes_are_reused_verbatim() {
    let engine = OpenSslEngine::new();
    let key = SigningKey::generate_ec(Curve::NistP256).unwrap();
    let defaults = engine
        .default_signature_parameters(&key, HashAlg::Sha256)
        .unwrap();

    let tbs = TbsCertList::new(
        defaults.algorithm.clone(),
        name("Long Form CA"),
        utc(2024, 1, 1),
    );
    let fresh = tbs.to_der().unwrap();
    assert!(fresh[1] < 0x80);

    // Same body with a non-minimal long-form length
    let mut long_form = vec![0x30, 0x81, fresh[1]];
    long_form.extend_from_slice(&fresh[2..]);

    let raw = engine.sign(&long_form, &key, &defaults.params).unwrap();
    let signature =
        pkix_crl::algorithms::signature_to_wire(&defaults.params, &raw).unwrap();

    let mut outer = long_form.clone();
    outer.extend(rasn::der::encode(&defaults.algorithm).unwrap());
    outer.extend(rasn::der::encode(&BitString::from_vec(signature)).unwrap());
    let input = der_sequence(&outer);

    let decoded = CertificateList::from_der(&input).unwrap();
    assert_eq!(decoded.tbs_bytes().unwrap(), long_form.as_slice());
    assert_eq!(decoded.tbs, tbs);

    // Stored bytes pass through untouched, a regenerated body does not
    assert_eq!(decoded.to_der(false).unwrap(), input);
    let regenerated = decoded.to_der(true).unwrap();
    assert_ne!(regenerated, input);

    let public_key = common::public_key_info(&key);
    let source = pkix_crl::VerificationSource::PublicKey(&public_key);
    assert!(decoded.verify(&engine, source).unwrap());

    let reencoded = CertificateList::from_der(&regenerated).unwrap();
    assert!(!reencoded.verify(&engine, source).unwrap());
}

#[test]
fn mutated_fields_do_not_change_stored_bytes() {
    let engine = OpenSslEngine::new();
    let key = SigningKey::generate_rsa(2048).unwrap();

    let mut list = CertificateList::new(sample_tbs("Mutation CA"));
    list.sign(&engine, &key, HashAlg::Sha256).unwrap();
    let signed = list.to_der(false).unwrap();

    let mut decoded = CertificateList::from_der(&signed).unwrap();
    decoded.tbs.next_update = None;

    assert_eq!(decoded.to_der(false).unwrap(), signed);
    let regenerated = CertificateList::from_der(decoded.to_der(true).unwrap()).unwrap();
    assert!(regenerated.tbs.next_update.is_none());
}

#[test]
fn pem_round_trip() {
    let list = CertificateList::new(sample_tbs("PEM CA"));
    let pem = list.to_pem(true).unwrap();
    assert!(pem.starts_with("-----BEGIN X509 CRL-----"));

    let decoded = CertificateList::from_pem(&pem).unwrap();
    assert_eq!(decoded.tbs, list.tbs);
}

#[test]
fn standard_registry_interprets_extensions() {
    let mut tbs = sample_tbs("Registry CA");
    if let Some(entries) = tbs.revoked_certificates.as_mut() {
        entries[0].entry_extensions = Some(vec![Extension::new(
            Oid::new_unchecked(oid::REASON_CODE.into()),
            false,
            vec![0x0a, 0x01, 0x04],
        )]);
    }
    let der = CertificateList::new(tbs).to_der(true).unwrap();

    let plain = CertificateList::from_der(&der).unwrap();
    let entry = plain.find_revoked(&common::serial(42)).unwrap();
    assert!(entry.reason().is_none());

    let interpreted = CertificateList::from_der_with(&der, &ExtensionRegistry::standard()).unwrap();
    let entry = interpreted.find_revoked(&common::serial(42)).unwrap();
    assert_eq!(
        entry.reason(),
        Some(pkix_crl::crl::RevocationReason::Superseded)
    );
}

#[test]
fn garbage_is_a_decode_error() {
    let err = CertificateList::from_der([0x04, 0x02, 0x00, 0x00]).unwrap_err();
    assert!(matches!(err, pkix_crl::CrlError::Decode(_)));
}

fn flip_critical_flag(der: &mut [u8]) {
    // BOOLEAN TRUE followed by the extnValue OCTET STRING
    let at = der
        .windows(4)
        .position(|window| window == [0x01, 0x01, 0xff, 0x04])
        .unwrap();
    der[at] = 0x05;
}

#[test]
fn malformed_critical_flag_is_rejected() {
    let key = SigningKey::generate_rsa(2048).unwrap();
    let mut tbs = sample_tbs("Flag CA");
    tbs.crl_extensions = Some(vec![Extension::new(
        Oid::new_unchecked(vec![1, 3, 6, 1, 4, 1, 99999, 3].into()),
        true,
        vec![0x05, 0x00],
    )]);
    let mut crl = CertificateList::new(tbs);
    crl.sign(&OpenSslEngine::new(), &key, HashAlg::Sha256).unwrap();

    let mut der = crl.to_der(false).unwrap();
    assert!(CertificateList::from_der(&der).is_ok());

    flip_critical_flag(&mut der);
    assert!(CertificateList::from_der(&der).is_err());
}

#[test]
fn malformed_entry_critical_flag_is_rejected() {
    let mut tbs = sample_tbs("Entry Flag CA");
    if let Some(entries) = tbs.revoked_certificates.as_mut() {
        entries[0].entry_extensions = Some(vec![Extension::new(
            Oid::new_unchecked(vec![1, 3, 6, 1, 4, 1, 99999, 4].into()),
            true,
            vec![0x05, 0x00],
        )]);
    }

    let mut der = CertificateList::new(tbs).to_der(true).unwrap();
    assert!(CertificateList::from_der(&der).is_ok());

    flip_critical_flag(&mut der);
    assert!(CertificateList::from_der(&der).is_err());
}
