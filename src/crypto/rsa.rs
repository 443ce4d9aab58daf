use crate::crypto::HashAlg;
use crate::crypto::errors::{CryptoResult, Error};
use openssl::pkey::{HasPrivate, HasPublic, PKeyRef};
use openssl::rsa::Padding;
use openssl::sign::{RsaPssSaltlen, Signer, Verifier};

/// Sign data using RSASSA-PKCS1-v1_5
pub fn sign_pkcs1<T: HasPrivate>(
    private_key: &PKeyRef<T>,
    data: impl AsRef<[u8]>,
    hash_alg: HashAlg,
) -> CryptoResult<Vec<u8>> {
    let mut signer = Signer::new(hash_alg.into(), private_key)?;
    signer.set_rsa_padding(Padding::PKCS1)?;
    signer.update(data.as_ref())?;
    Ok(signer.sign_to_vec()?)
}

/// Verify an RSASSA-PKCS1-v1_5 signature
pub fn verify_pkcs1<T: HasPublic>(
    public_key: &PKeyRef<T>,
    data: impl AsRef<[u8]>,
    signature: &[u8],
    hash_alg: HashAlg,
) -> CryptoResult<bool> {
    let mut verifier = Verifier::new(hash_alg.into(), public_key)?;
    verifier.set_rsa_padding(Padding::PKCS1)?;
    verifier.update(data.as_ref())?;
    Ok(verifier.verify(signature)?)
}

fn pss_salt(salt_length: usize) -> CryptoResult<RsaPssSaltlen> {
    i32::try_from(salt_length)
        .map(RsaPssSaltlen::custom)
        .map_err(|_| Error::Invalid(format!("PSS salt length {salt_length} out of range")))
}

/// Sign data using RSASSA-PSS.
///
/// `mgf1_hash` is the hash fed to the MGF1 mask generator, which RFC 4055
/// allows to differ from the message hash.
pub fn sign_pss<T: HasPrivate>(
    private_key: &PKeyRef<T>,
    data: impl AsRef<[u8]>,
    hash_alg: HashAlg,
    mgf1_hash: HashAlg,
    salt_length: usize,
) -> CryptoResult<Vec<u8>> {
    let mut signer = Signer::new(hash_alg.into(), private_key)?;
    signer.set_rsa_padding(Padding::PKCS1_PSS)?;
    signer.set_rsa_pss_saltlen(pss_salt(salt_length)?)?;
    signer.set_rsa_mgf1_md(mgf1_hash.into())?;
    signer.update(data.as_ref())?;
    Ok(signer.sign_to_vec()?)
}

/// Verify an RSASSA-PSS signature
pub fn verify_pss<T: HasPublic>(
    public_key: &PKeyRef<T>,
    data: impl AsRef<[u8]>,
    signature: &[u8],
    hash_alg: HashAlg,
    mgf1_hash: HashAlg,
    salt_length: usize,
) -> CryptoResult<bool> {
    let mut verifier = Verifier::new(hash_alg.into(), public_key)?;
    verifier.set_rsa_padding(Padding::PKCS1_PSS)?;
    verifier.set_rsa_pss_saltlen(pss_salt(salt_length)?)?;
    verifier.set_rsa_mgf1_md(mgf1_hash.into())?;
    verifier.update(data.as_ref())?;
    Ok(verifier.verify(signature)?)
}
