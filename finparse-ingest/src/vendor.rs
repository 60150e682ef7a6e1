//! Vendor router: statement kind -> segmenter, extractor and sensitivity map.

use finparse_core::{SensitivityMap, VendorKind};

use crate::extract::Extractor;
use crate::parsers::{canara, gpay, CanaraPassbook, GPayReceipts};
use crate::segment::Segmenter;

/// Everything the pipeline needs to process one vendor's statements.
pub struct VendorProfile {
    pub kind: VendorKind,
    pub segmenter: &'static dyn Segmenter,
    pub extractor: &'static dyn Extractor,
    pub sensitivity: &'static SensitivityMap,
}

static CANARA: VendorProfile = VendorProfile {
    kind: VendorKind::Canara,
    segmenter: &CanaraPassbook,
    extractor: &CanaraPassbook,
    sensitivity: &canara::SENSITIVITY,
};

static GPAY: VendorProfile = VendorProfile {
    kind: VendorKind::GPay,
    segmenter: &GPayReceipts,
    extractor: &GPayReceipts,
    sensitivity: &gpay::SENSITIVITY,
};

pub fn route(kind: VendorKind) -> &'static VendorProfile {
    match kind {
        VendorKind::Canara => &CANARA,
        VendorKind::GPay => &GPAY,
    }
}

/// Resolve a user-supplied vendor name; unknown names fail before any text is read.
pub fn route_named(name: &str) -> finparse_core::Result<&'static VendorProfile> {
    Ok(route(name.parse()?))
}

pub fn profiles() -> impl Iterator<Item = &'static VendorProfile> {
    VendorKind::ALL.into_iter().map(route)
}

#[cfg(test)]
mod tests {
    use super::*;
    use finparse_core::{FinparseError, TxnField};

    #[test]
    fn test_route_is_total() {
        for kind in VendorKind::ALL {
            assert_eq!(route(kind).kind, kind);
        }
        assert_eq!(profiles().count(), VendorKind::ALL.len());
    }

    #[test]
    fn test_route_named() {
        assert_eq!(route_named("Canara").unwrap().kind, VendorKind::Canara);
        assert_eq!(route_named("google-pay").unwrap().kind, VendorKind::GPay);
        assert!(matches!(
            route_named("hdfc"),
            Err(FinparseError::UnknownVendor(name)) if name == "hdfc"
        ));
    }

    #[test]
    fn test_sensitivity_tables() {
        let canara = route(VendorKind::Canara).sensitivity;
        assert!(canara.is_sensitive(TxnField::ChequeNo));
        assert!(canara.is_sensitive(TxnField::IdentityId));
        assert!(!canara.is_sensitive(TxnField::Amount));

        let gpay = route(VendorKind::GPay).sensitivity;
        assert!(gpay.is_sensitive(TxnField::ReferenceId));
        assert!(!gpay.is_sensitive(TxnField::RawParticulars));
    }
}
