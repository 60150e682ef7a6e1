//! Transaction record types shared by every statement vendor

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::FinparseError;

/// A field value that is either canonical or still in the vendor's own text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Parsed<T> {
    Canonical(T),
    Verbatim(String),
}

impl<T> Parsed<T> {
    pub fn verbatim(s: impl Into<String>) -> Self {
        Parsed::Verbatim(s.into())
    }

    pub fn canonical(&self) -> Option<&T> {
        match self {
            Parsed::Canonical(v) => Some(v),
            Parsed::Verbatim(_) => None,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Parsed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parsed::Canonical(v) => v.fmt(f),
            Parsed::Verbatim(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Credit,
    Debit,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Credit => "Credit",
            Direction::Debit => "Debit",
        }
    }
}

/// Transfer channel of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mode {
    Upi,
    Neft,
    Imps,
    Atm,
    Pos,
    Interest,
    Cheque,
    ServiceCharge,
    Reversal,
    Unknown,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Upi => "UPI",
            Mode::Neft => "NEFT",
            Mode::Imps => "IMPS",
            Mode::Atm => "ATM",
            Mode::Pos => "POS",
            Mode::Interest => "INTEREST",
            Mode::Cheque => "CHEQUE",
            Mode::ServiceCharge => "SERVICE_CHARGE",
            Mode::Reversal => "REVERSAL",
            Mode::Unknown => "UNKNOWN",
        }
    }
}

/// Canonical output of the extractors (vendor-agnostic)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: Option<Parsed<NaiveDate>>,
    /// HH:MM or HH:MM:SS depending on the vendor
    pub time: Option<Parsed<NaiveTime>>,
    pub direction: Direction,
    pub mode: Mode,
    pub counterparty: Option<String>,
    pub amount: Option<Parsed<Decimal>>,
    /// Running balance after the transaction; wallets have none.
    pub balance: Option<Parsed<Decimal>>,
    /// UPI / IMPS reference number
    pub reference_id: Option<String>,
    /// Counterparty handle (`name@bank`)
    pub identity_id: Option<String>,
    pub bank_code: Option<String>,
    pub cheque_no: Option<String>,
    pub raw_particulars: String,
}

impl Transaction {
    /// Empty record with only the mandatory fields set.
    pub fn new(direction: Direction, mode: Mode) -> Self {
        Self {
            date: None,
            time: None,
            direction,
            mode,
            counterparty: None,
            amount: None,
            balance: None,
            reference_id: None,
            identity_id: None,
            bank_code: None,
            cheque_no: None,
            raw_particulars: String::new(),
        }
    }
}

/// Statement vendors understood by the router
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VendorKind {
    /// Canara Bank passbook / account statement
    Canara,
    /// Google Pay transaction history
    GPay,
}

impl VendorKind {
    pub const ALL: [VendorKind; 2] = [VendorKind::Canara, VendorKind::GPay];

    pub fn name(&self) -> &'static str {
        match self {
            VendorKind::Canara => "canara",
            VendorKind::GPay => "gpay",
        }
    }
}

impl fmt::Display for VendorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VendorKind {
    type Err = FinparseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "canara" => Ok(VendorKind::Canara),
            "gpay" | "google-pay" | "googlepay" => Ok(VendorKind::GPay),
            _ => Err(FinparseError::UnknownVendor(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivacyLevel {
    Full,
    #[default]
    Masked,
    Anonymized,
}

impl FromStr for PrivacyLevel {
    type Err = FinparseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(PrivacyLevel::Full),
            "masked" => Ok(PrivacyLevel::Masked),
            "anonymized" | "anonymised" => Ok(PrivacyLevel::Anonymized),
            _ => Err(FinparseError::UnknownPrivacyLevel(s.to_string())),
        }
    }
}

/// Whether blocks lacking a date or amount are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    #[default]
    Strict,
    Lenient,
}

impl FromStr for Strictness {
    type Err = FinparseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Strictness::Strict),
            "lenient" => Ok(Strictness::Lenient),
            _ => Err(FinparseError::UnknownStrictness(s.to_string())),
        }
    }
}
