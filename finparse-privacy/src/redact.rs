//! Policy-driven redaction of output records.
//!
//! Redaction never mutates its input and carries no state between records,
//! so a batch gives the same per-record result in any order or size.

use finparse_core::{Policy, PrivacyLevel, Record, SensitivityMap, TxnField};

use crate::mask::mask_value;

pub fn redact(record: &Record, level: PrivacyLevel, policy: &SensitivityMap) -> Record {
    let fields: Vec<(TxnField, Option<String>)> = match level {
        PrivacyLevel::Full => return record.clone(),
        PrivacyLevel::Masked => record
            .iter()
            .filter_map(|(field, value)| match policy.policy_for(field) {
                Some(Policy::Drop) => None,
                Some(Policy::Mask) => Some((field, value.map(mask_value))),
                None => Some((field, value.map(str::to_string))),
            })
            .collect(),
        PrivacyLevel::Anonymized => record
            .iter()
            .filter(|(field, _)| !policy.is_sensitive(*field))
            .map(|(field, value)| (field, value.map(str::to_string)))
            .collect(),
    };
    Record::from_pairs(fields)
}

pub fn redact_all(records: &[Record], level: PrivacyLevel, policy: &SensitivityMap) -> Vec<Record> {
    records.iter().map(|r| redact(r, level, policy)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    static POLICY: SensitivityMap = SensitivityMap::new(&[
        (TxnField::ReferenceId, Policy::Mask),
        (TxnField::IdentityId, Policy::Mask),
        (TxnField::ChequeNo, Policy::Drop),
    ]);

    fn record() -> Record {
        Record::from_pairs(vec![
            (TxnField::Date, Some("2023-02-01".to_string())),
            (TxnField::Amount, Some("500.00".to_string())),
            (TxnField::ReferenceId, Some("303212345678".to_string())),
            (TxnField::IdentityId, Some("jo**@okicici".to_string())),
            (TxnField::ChequeNo, Some("000123".to_string())),
            (TxnField::BankCode, None),
        ])
    }

    #[test]
    fn test_full_is_identity() {
        assert_eq!(redact(&record(), PrivacyLevel::Full, &POLICY), record());
    }

    #[test]
    fn test_masked_drops_and_masks() {
        let out = redact(&record(), PrivacyLevel::Masked, &POLICY);
        assert!(!out.contains(TxnField::ChequeNo));
        assert_eq!(out.get(TxnField::ReferenceId), Some(Some("************")));
        assert_eq!(out.get(TxnField::IdentityId), Some(Some("jo**@okicici")));
        assert_eq!(out.get(TxnField::Amount), Some(Some("500.00")));
        assert_eq!(out.get(TxnField::BankCode), Some(None));
    }

    #[test]
    fn test_masked_keeps_absent_sensitive_value_absent() {
        let rec = Record::from_pairs(vec![(TxnField::IdentityId, None)]);
        let out = redact(&rec, PrivacyLevel::Masked, &POLICY);
        assert_eq!(out.get(TxnField::IdentityId), Some(None));
    }

    #[test]
    fn test_anonymized_removes_every_sensitive_key() {
        let out = redact(&record(), PrivacyLevel::Anonymized, &POLICY);
        for field in POLICY.sensitive_fields() {
            assert!(!out.contains(field), "{} leaked", field.as_str());
        }
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_masked_twice_is_stable() {
        let once = redact(&record(), PrivacyLevel::Masked, &POLICY);
        let twice = redact(&once, PrivacyLevel::Masked, &POLICY);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_input_not_mutated() {
        let original = record();
        let _ = redact(&original, PrivacyLevel::Anonymized, &POLICY);
        assert_eq!(original, record());
    }
}
