//! finparse-ingest: statement text normalization, transaction segmentation and
//! vendor-specific field extraction.

pub mod channel;
pub mod extract;
pub mod normalize;
pub mod parsers;
pub mod pipeline;
pub mod segment;
pub mod token;
pub mod vendor;

pub use extract::{Anomaly, Extraction, Extractor, Rejection};
pub use normalize::{join_pages, normalize};
pub use pipeline::{Diagnostics, Pipeline, PipelineOptions, StatementOutput};
pub use segment::{Segmenter, TransactionBlock};
pub use vendor::{profiles, route, route_named, VendorProfile};
