//! finparse-core: transaction model, record cleaner and sensitivity tables.

pub mod clean;
pub mod error;
pub mod model;
pub mod record;
pub mod sensitivity;

pub use clean::clean;
pub use error::{FinparseError, Result};
pub use model::{Direction, Mode, Parsed, PrivacyLevel, Strictness, Transaction, VendorKind};
pub use record::{Record, TxnField};
pub use sensitivity::{Policy, SensitivityMap};
