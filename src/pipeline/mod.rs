//! Pipeline entry points.
//!
//! - `run_sync`: Download the sheet export, then convert it
//! - `run_transform`: Convert an existing CSV byte store into JSON documents

pub mod sync;
pub mod transform;

pub use sync::{SyncReport, run_sync};
pub use transform::{RowFailure, TransformSummary, run_transform};
