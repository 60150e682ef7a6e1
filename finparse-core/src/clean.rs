//! Best-effort canonicalization of extracted records.
//!
//! Each field is converted independently; a value that cannot be parsed is
//! kept in its vendor-native form.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use crate::model::{Parsed, Transaction};

const DATE_FORMATS: &[&str] = &[
    "%d-%m-%Y",
    "%d%b,%Y",
    "%d %b, %Y",
    "%d %b %Y",
    "%d/%m/%Y",
    "%Y-%m-%d",
];

const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M", "%I:%M%p", "%I:%M %p"];

pub fn clean(txn: Transaction) -> Transaction {
    Transaction {
        date: txn.date.map(clean_date),
        time: txn.time.map(clean_time),
        counterparty: txn.counterparty.as_deref().and_then(title_case),
        amount: txn.amount.map(clean_amount),
        balance: txn.balance.map(clean_amount),
        ..txn
    }
}

pub fn clean_date(date: Parsed<NaiveDate>) -> Parsed<NaiveDate> {
    match date {
        Parsed::Verbatim(raw) => parse_date(&raw)
            .map(Parsed::Canonical)
            .unwrap_or(Parsed::Verbatim(raw)),
        canonical => canonical,
    }
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

pub fn clean_time(time: Parsed<NaiveTime>) -> Parsed<NaiveTime> {
    match time {
        Parsed::Verbatim(raw) => parse_time(&raw)
            .map(Parsed::Canonical)
            .unwrap_or(Parsed::Verbatim(raw)),
        canonical => canonical,
    }
}

pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim().to_ascii_uppercase();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(&raw, fmt).ok())
}

pub fn clean_amount(amount: Parsed<Decimal>) -> Parsed<Decimal> {
    match amount {
        Parsed::Verbatim(raw) => parse_amount(&raw)
            .map(Parsed::Canonical)
            .unwrap_or(Parsed::Verbatim(raw)),
        canonical => canonical,
    }
}

/// `"₹1,250.50"` -> `1250.50`
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let digits: String = raw
        .trim()
        .trim_start_matches('₹')
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    if digits.is_empty() {
        return None;
    }
    Decimal::from_str(&digits).ok()
}

/// `"JOHN  DOE"` -> `"John Doe"`; blank input yields `None`.
pub fn title_case(s: &str) -> Option<String> {
    let words: Vec<String> = s
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect();
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}
