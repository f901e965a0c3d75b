// src/lib.rs

//! gem-sync Library
//!
//! Downloads a gemstone catalogue from a Google Sheets CSV export and writes
//! one JSON metadata document per row.

pub mod error;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
