// src/services/mod.rs

//! Services: fetching the sheet export and transforming its rows.

pub mod fetcher;
pub mod transformer;

pub use fetcher::{FetchReport, GoogleSheetFetcher, SheetSource};
pub use transformer::{build_document, describe, transform_row};
