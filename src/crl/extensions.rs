//! Interpretation of CRL and CRL entry extensions.
//!
//! An extension counts as understood once an interpreter has produced a
//! [`ParsedExtension`] for it. Verification refuses CRLs that carry critical
//! extensions nobody understood.

use chrono::{DateTime, FixedOffset};
use rasn::error::DecodeError;
use rasn::prelude::*;
use serde::Serialize;

use crate::asn1::oid;

/// reasonCode ::= CRLReason (RFC 5280 §5.3.1)
#[derive(AsnType, Encode, Decode, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[rasn(enumerated)]
#[serde(rename_all = "camelCase")]
pub enum RevocationReason {
    Unspecified = 0,
    KeyCompromise = 1,
    CaCompromise = 2,
    AffiliationChanged = 3,
    Superseded = 4,
    CessationOfOperation = 5,
    CertificateHold = 6,
    RemoveFromCrl = 8,
    PrivilegeWithdrawn = 9,
    AaCompromise = 10,
}

/// Value produced by an extension interpreter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedExtension {
    CrlNumber(Integer),
    DeltaCrlIndicator(Integer),
    ReasonCode(RevocationReason),
    InvalidityDate(DateTime<FixedOffset>),
    /// Output of a caller-supplied interpreter
    Custom(String),
}

/// Parses the contents of an extension's `extnValue`
pub type ExtensionInterpreter = fn(&[u8]) -> Result<ParsedExtension, DecodeError>;

/// Interpreters keyed by extension OID.
///
/// The default registry is empty, so no extension is understood.
#[derive(Debug, Clone, Default)]
pub struct ExtensionRegistry {
    interpreters: Vec<(&'static [u32], ExtensionInterpreter)>,
}

impl ExtensionRegistry {
    /// Registry understanding CRL Number, Delta CRL Indicator, Reason Code and Invalidity Date
    pub fn standard() -> Self {
        Self::default()
            .with(oid::CRL_NUMBER, crl_number)
            .with(oid::DELTA_CRL_INDICATOR, delta_crl_indicator)
            .with(oid::REASON_CODE, reason_code)
            .with(oid::INVALIDITY_DATE, invalidity_date)
    }

    /// Add or replace the interpreter for `oid`
    pub fn with(mut self, oid: &'static [u32], interpreter: ExtensionInterpreter) -> Self {
        self.interpreters.retain(|(known, _)| *known != oid);
        self.interpreters.push((oid, interpreter));
        self
    }

    pub fn understands(&self, oid: &[u32]) -> bool {
        self.interpreters.iter().any(|(known, _)| *known == oid)
    }

    /// Run the interpreter registered for `oid`, if any
    pub fn interpret(
        &self,
        oid: &[u32],
        raw_value: &[u8],
    ) -> Result<Option<ParsedExtension>, DecodeError> {
        self.interpreters
            .iter()
            .find(|(known, _)| *known == oid)
            .map(|(_, interpreter)| interpreter(raw_value))
            .transpose()
    }
}

fn crl_number(raw: &[u8]) -> Result<ParsedExtension, DecodeError> {
    rasn::der::decode(raw).map(ParsedExtension::CrlNumber)
}

fn delta_crl_indicator(raw: &[u8]) -> Result<ParsedExtension, DecodeError> {
    rasn::der::decode(raw).map(ParsedExtension::DeltaCrlIndicator)
}

fn reason_code(raw: &[u8]) -> Result<ParsedExtension, DecodeError> {
    rasn::der::decode(raw).map(ParsedExtension::ReasonCode)
}

fn invalidity_date(raw: &[u8]) -> Result<ParsedExtension, DecodeError> {
    rasn::der::decode::<GeneralizedTime>(raw).map(ParsedExtension::InvalidityDate)
}
