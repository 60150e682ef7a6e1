//! Block -> transaction extraction contract and shared field rules.

use std::fmt;

use finparse_core::{Mode, Parsed, Transaction};
use rust_decimal::Decimal;

use crate::segment::TransactionBlock;
use crate::token::{Token, TokenKind};

/// Why a block produced no transaction (or was dropped by the pipeline).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum Rejection {
    #[error("block does not match the vendor's transaction pattern")]
    NoMatch,
    #[error("no credit/debit direction could be derived")]
    MissingDirection,
    #[error("no transaction date")]
    MissingDate,
    #[error("no transaction amount")]
    MissingAmount,
}

/// A heuristic assumption that did not hold for a block. The transaction is
/// still produced; these are surfaced for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anomaly {
    /// Amount/balance positions assume exactly two currency tokens.
    UnexpectedAmountCount(usize),
    /// Positional counterparty split found fewer segments than expected.
    ShortPath { mode: Mode, segments: usize },
    /// Identity handle re-derived from its path position.
    IdentityFallback,
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::UnexpectedAmountCount(n) => write!(f, "{n} currency tokens (expected 2)"),
            Anomaly::ShortPath { mode, segments } => {
                write!(f, "{} path has only {segments} segment(s)", mode.as_str())
            }
            Anomaly::IdentityFallback => f.write_str("identity handle taken from path position"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub transaction: Transaction,
    pub anomalies: Vec<Anomaly>,
}

pub trait Extractor: Send + Sync {
    fn extract(&self, block: &TransactionBlock) -> Result<Extraction, Rejection>;
}

/// Amount and balance by position: last currency token is the balance, the
/// one before it the amount. A single token is a balance only.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AmountPair {
    pub amount: Option<String>,
    pub balance: Option<String>,
    pub count: usize,
}

impl AmountPair {
    pub fn from_tokens(src: &str, tokens: &[Token]) -> Self {
        let amounts: Vec<&str> = tokens
            .iter()
            .filter(|t| t.is(TokenKind::Amount))
            .map(|t| t.text(src))
            .collect();
        let n = amounts.len();
        Self {
            balance: amounts.last().map(|s| s.to_string()),
            amount: (n >= 2).then(|| amounts[n - 2].to_string()),
            count: n,
        }
    }

    pub fn anomaly(&self) -> Option<Anomaly> {
        (self.count != 2).then_some(Anomaly::UnexpectedAmountCount(self.count))
    }
}

pub(crate) fn verbatim_decimal(s: Option<String>) -> Option<Parsed<Decimal>> {
    s.map(Parsed::Verbatim)
}
