//! Flat, string-valued view of a transaction handed to serializers.
//!
//! Every key of [`TxnField::ALL`] is present on a fresh record; absent values
//! are kept as `None` so that CSV columns stay uniform across records. Only
//! redaction removes keys.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::model::Transaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TxnField {
    Date,
    Time,
    Direction,
    Mode,
    Counterparty,
    Amount,
    Balance,
    ReferenceId,
    IdentityId,
    BankCode,
    ChequeNo,
    RawParticulars,
}

impl TxnField {
    pub const ALL: [TxnField; 12] = [
        TxnField::Date,
        TxnField::Time,
        TxnField::Direction,
        TxnField::Mode,
        TxnField::Counterparty,
        TxnField::Amount,
        TxnField::Balance,
        TxnField::ReferenceId,
        TxnField::IdentityId,
        TxnField::BankCode,
        TxnField::ChequeNo,
        TxnField::RawParticulars,
    ];

    /// Stable column / key name
    pub fn as_str(&self) -> &'static str {
        match self {
            TxnField::Date => "date",
            TxnField::Time => "time",
            TxnField::Direction => "direction",
            TxnField::Mode => "mode",
            TxnField::Counterparty => "counterparty",
            TxnField::Amount => "amount",
            TxnField::Balance => "balance",
            TxnField::ReferenceId => "reference_id",
            TxnField::IdentityId => "identity_id",
            TxnField::BankCode => "bank_code",
            TxnField::ChequeNo => "cheque_no",
            TxnField::RawParticulars => "raw_particulars",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(TxnField, Option<String>)>,
}

impl Record {
    pub fn from_pairs(fields: Vec<(TxnField, Option<String>)>) -> Self {
        Self { fields }
    }

    pub fn from_transaction(txn: &Transaction) -> Self {
        let fields = TxnField::ALL
            .iter()
            .map(|&field| {
                let value = match field {
                    TxnField::Date => txn.date.as_ref().map(|d| d.to_string()),
                    TxnField::Time => txn.time.as_ref().map(|t| t.to_string()),
                    TxnField::Direction => Some(txn.direction.as_str().to_string()),
                    TxnField::Mode => Some(txn.mode.as_str().to_string()),
                    TxnField::Counterparty => txn.counterparty.clone(),
                    TxnField::Amount => txn.amount.as_ref().map(|a| a.to_string()),
                    TxnField::Balance => txn.balance.as_ref().map(|b| b.to_string()),
                    TxnField::ReferenceId => txn.reference_id.clone(),
                    TxnField::IdentityId => txn.identity_id.clone(),
                    TxnField::BankCode => txn.bank_code.clone(),
                    TxnField::ChequeNo => txn.cheque_no.clone(),
                    TxnField::RawParticulars => Some(txn.raw_particulars.clone()),
                };
                (field, value)
            })
            .collect();
        Self { fields }
    }

    pub fn iter(&self) -> impl Iterator<Item = (TxnField, Option<&str>)> {
        self.fields.iter().map(|(f, v)| (*f, v.as_deref()))
    }

    pub fn contains(&self, field: TxnField) -> bool {
        self.fields.iter().any(|(f, _)| *f == field)
    }

    /// `None` when the key is missing, `Some(None)` when present without value.
    pub fn get(&self, field: TxnField) -> Option<Option<&str>> {
        self.fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_deref())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, value) in &self.fields {
            map.serialize_entry(field.as_str(), value)?;
        }
        map.end()
    }
}
