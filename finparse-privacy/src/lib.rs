//! finparse-privacy: masking and sensitivity-policy redaction of output records

pub mod mask;
pub mod redact;

pub use mask::mask_value;
pub use redact::{redact, redact_all};
