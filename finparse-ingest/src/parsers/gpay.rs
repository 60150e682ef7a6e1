//! Google Pay transaction history parser (text)
//!
//! Extracted text has no line structure worth keeping; each receipt reads
//!   05Mar,2024 Paidto Jane Doe ₹250 ... 10:15PM ... UPITransactionID:ABC123
//! with the spaces inside keywords sometimes missing. One pass of the full
//! receipt pattern both segments and extracts.

use finparse_core::{Direction, Mode, Parsed, Policy, SensitivityMap, Transaction, TxnField};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::extract::{Extraction, Extractor, Rejection};
use crate::segment::{pattern_blocks, Segmenter, TransactionBlock};

pub static SENSITIVITY: SensitivityMap =
    SensitivityMap::new(&[(TxnField::ReferenceId, Policy::Mask)]);

const MANDATORY: &[&str] = &["date", "verb", "name", "amount", "time", "txn"];

#[derive(Debug, Clone, Copy, Default)]
pub struct GPayReceipts;

fn receipt_re() -> &'static Regex {
    static RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(concat!(
            r"(?s)(?P<date>\b\d{1,2}\s?[A-Za-z]{3},\s?\d{4})\s+",
            r"(?P<verb>Paid\s?to|Received\s?from)\s*",
            r"(?P<name>[A-Za-z0-9\s.&']+?)\s*",
            r"₹(?P<amount>\d[\d,]*(?:\.\d{1,2})?)",
            r".*?(?P<time>\b\d{1,2}:\d{2}\s?[AaPp][Mm])",
            r".*?UPI\s?Transaction\s?ID\s?:\s*(?P<txn>\w+)",
        ))
        .expect("Valid regex")
    });
    &RE
}

fn group<'a>(caps: &Captures<'a>, name: &str) -> Option<&'a str> {
    caps.name(name)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
}

impl Segmenter for GPayReceipts {
    fn segment(&self, normalized: &str) -> Vec<TransactionBlock> {
        pattern_blocks(normalized, receipt_re(), MANDATORY)
    }
}

impl Extractor for GPayReceipts {
    fn extract(&self, block: &TransactionBlock) -> Result<Extraction, Rejection> {
        let caps = receipt_re()
            .captures(&block.text)
            .ok_or(Rejection::NoMatch)?;
        let verb = group(&caps, "verb").ok_or(Rejection::MissingDirection)?;
        let (direction, label) = if verb.starts_with("Paid") {
            (Direction::Debit, "Paid to")
        } else {
            (Direction::Credit, "Received from")
        };

        let name = group(&caps, "name");
        let mut txn = Transaction::new(direction, Mode::Upi);
        txn.date = group(&caps, "date").map(Parsed::verbatim);
        txn.time = group(&caps, "time").map(Parsed::verbatim);
        txn.amount = group(&caps, "amount").map(Parsed::verbatim);
        txn.counterparty = name.map(str::to_string);
        txn.reference_id = group(&caps, "txn").map(str::to_string);
        txn.raw_particulars = match name {
            Some(name) => format!("{label} {name}"),
            None => label.to_string(),
        };

        Ok(Extraction {
            transaction: txn,
            anomalies: Vec::new(),
        })
    }
}
