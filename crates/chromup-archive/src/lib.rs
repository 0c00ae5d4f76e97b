//! Release archive extraction for chromup.
//!
//! Browser release archives wrap their payload in a single top-level
//! directory. Extraction strips that wrapper so the payload lands directly
//! under the destination root, and refuses any entry whose path would
//! resolve outside it.
//!
//! # Architecture
//!
//! - `format.rs` - decoder selection by file extension
//! - `sanitize.rs` - wrapper stripping and path containment
//! - `extract.rs` - the shared extraction pipeline
//! - `extract/` - per-format entry sources

pub use error::{Error, Result};
pub use extract::{ExtractOptions, ExtractReport, extract_archive};
pub use format::ArchiveFormat;
pub use sanitize::{resolve_under, strip_wrapper};

mod error;
pub mod extract;
mod format;
mod sanitize;
