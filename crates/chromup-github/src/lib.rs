//! GitHub release metadata and asset download.
//!
//! Only the fields the updater consumes are modeled; everything else in the
//! release document is ignored.

pub use client::ReleaseClient;
pub use error::{Error, Result};
pub use release::{Asset, Release};

mod client;
mod error;
mod release;
