//! Configuration errors. Text-shape problems are never errors: they degrade
//! to absent fields or rejected blocks.

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FinparseError {
    #[error("unknown statement vendor: {0} (expected one of: canara, gpay)")]
    UnknownVendor(String),

    #[error("unknown privacy level: {0} (expected full, masked or anonymized)")]
    UnknownPrivacyLevel(String),

    #[error("unknown strictness: {0} (expected strict or lenient)")]
    UnknownStrictness(String),
}

pub type Result<T> = std::result::Result<T, FinparseError>;
