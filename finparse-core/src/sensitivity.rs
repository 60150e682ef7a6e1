//! Per-vendor field sensitivity tables used by the redactor.

use crate::record::TxnField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Removed at the masked level
    Drop,
    /// Value obscured at the masked level
    Mask,
}

/// Immutable field -> policy table; one per vendor.
#[derive(Debug)]
pub struct SensitivityMap {
    rules: &'static [(TxnField, Policy)],
}

impl SensitivityMap {
    pub const fn new(rules: &'static [(TxnField, Policy)]) -> Self {
        Self { rules }
    }

    pub fn policy_for(&self, field: TxnField) -> Option<Policy> {
        self.rules
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, p)| *p)
    }

    pub fn is_sensitive(&self, field: TxnField) -> bool {
        self.policy_for(field).is_some()
    }

    pub fn sensitive_fields(&self) -> impl Iterator<Item = TxnField> + '_ {
        self.rules.iter().map(|(f, _)| *f)
    }

    pub fn rules(&self) -> &'static [(TxnField, Policy)] {
        self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static MAP: SensitivityMap = SensitivityMap::new(&[
        (TxnField::ReferenceId, Policy::Mask),
        (TxnField::ChequeNo, Policy::Drop),
    ]);

    #[test]
    fn test_lookup() {
        assert_eq!(MAP.policy_for(TxnField::ReferenceId), Some(Policy::Mask));
        assert_eq!(MAP.policy_for(TxnField::ChequeNo), Some(Policy::Drop));
        assert_eq!(MAP.policy_for(TxnField::Amount), None);
        assert!(!MAP.is_sensitive(TxnField::Date));
        assert_eq!(MAP.sensitive_fields().count(), 2);
    }
}
