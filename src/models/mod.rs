// src/models/mod.rs

//! Domain models for the sync application.

mod config;
mod document;
mod record;

// Re-export all public types
pub use config::{HttpConfig, PathsConfig, SheetLocator, SyncConfig};
pub use document::{Attribute, GemDocument, TraitValue};
pub use record::{Column, ColumnIndex, GemRecord};
