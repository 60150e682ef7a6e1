//! Vendor-specific segmenters and extractors.

pub mod canara;
pub mod gpay;

pub use canara::CanaraPassbook;
pub use gpay::GPayReceipts;
