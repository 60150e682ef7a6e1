//! End-to-end statement processing:
//! normalize -> segment -> extract -> clean -> accept -> record -> redact.
//!
//! The pipeline is synchronous and holds only `'static` read-only tables, so
//! one instance can be shared across threads.

use std::collections::HashMap;

use finparse_core::{clean, PrivacyLevel, Record, Strictness, Transaction, VendorKind};
use finparse_privacy::redact_all;

use crate::extract::{Anomaly, Rejection};
use crate::normalize::{join_pages, normalize};
use crate::vendor::{route, route_named, VendorProfile};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    pub privacy: PrivacyLevel,
    pub strictness: Strictness,
}

/// Per-run counters. Rejected blocks and broken heuristics never fail a run;
/// they are reported here instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    pub blocks: usize,
    pub accepted: usize,
    pub rejections: HashMap<Rejection, usize>,
    /// `(block index, anomaly)` for accepted and rejected blocks alike
    pub anomalies: Vec<(usize, Anomaly)>,
}

impl Diagnostics {
    pub fn rejected(&self) -> usize {
        self.rejections.values().sum()
    }

    pub fn rejected_for(&self, reason: Rejection) -> usize {
        self.rejections.get(&reason).copied().unwrap_or(0)
    }

    pub fn no_transactions(&self) -> bool {
        self.accepted == 0
    }

    fn reject(&mut self, reason: Rejection) {
        *self.rejections.entry(reason).or_insert(0) += 1;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatementOutput {
    /// Cleaned transactions, unredacted, in source order
    pub transactions: Vec<Transaction>,
    /// Export records after redaction, aligned with `transactions`
    pub records: Vec<Record>,
    pub diagnostics: Diagnostics,
}

pub struct Pipeline {
    profile: &'static VendorProfile,
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(kind: VendorKind, options: PipelineOptions) -> Self {
        Self {
            profile: route(kind),
            options,
        }
    }

    pub fn for_vendor_name(name: &str, options: PipelineOptions) -> finparse_core::Result<Self> {
        Ok(Self {
            profile: route_named(name)?,
            options,
        })
    }

    pub fn vendor(&self) -> VendorKind {
        self.profile.kind
    }

    pub fn options(&self) -> PipelineOptions {
        self.options
    }

    /// Process a statement given as its page texts.
    pub fn run<S: AsRef<str>>(&self, pages: &[S]) -> StatementOutput {
        self.run_text(&join_pages(pages))
    }

    /// Process a statement already joined into one text.
    pub fn run_text(&self, raw: &str) -> StatementOutput {
        let normalized = normalize(raw);
        let blocks = self.profile.segmenter.segment(&normalized);
        let mut diagnostics = Diagnostics {
            blocks: blocks.len(),
            ..Diagnostics::default()
        };
        let mut transactions = Vec::with_capacity(blocks.len());

        for block in &blocks {
            let extraction = match self.profile.extractor.extract(block) {
                Ok(extraction) => extraction,
                Err(reason) => {
                    tracing::debug!(block = block.index, %reason, "block rejected");
                    diagnostics.reject(reason);
                    continue;
                }
            };
            for anomaly in extraction.anomalies {
                tracing::debug!(block = block.index, %anomaly, "heuristic did not hold");
                diagnostics.anomalies.push((block.index, anomaly));
            }

            let txn = clean(extraction.transaction);
            if let Err(reason) = self.accept(&txn) {
                tracing::debug!(block = block.index, %reason, "block rejected");
                diagnostics.reject(reason);
                continue;
            }
            transactions.push(txn);
        }
        diagnostics.accepted = transactions.len();

        if diagnostics.no_transactions() {
            tracing::warn!(
                vendor = %self.profile.kind,
                blocks = diagnostics.blocks,
                "no transactions found"
            );
        } else {
            tracing::info!(
                vendor = %self.profile.kind,
                accepted = diagnostics.accepted,
                rejected = diagnostics.rejected(),
                "statement parsed"
            );
        }

        let records: Vec<Record> = transactions.iter().map(Record::from_transaction).collect();
        let records = redact_all(&records, self.options.privacy, self.profile.sensitivity);
        StatementOutput {
            transactions,
            records,
            diagnostics,
        }
    }

    /// Direction is guaranteed by the type; strict mode also wants a date and
    /// an amount.
    fn accept(&self, txn: &Transaction) -> Result<(), Rejection> {
        if self.options.strictness == Strictness::Lenient {
            return Ok(());
        }
        if txn.date.is_none() {
            return Err(Rejection::MissingDate);
        }
        if txn.amount.is_none() {
            return Err(Rejection::MissingAmount);
        }
        Ok(())
    }
}
