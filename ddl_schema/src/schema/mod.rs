//! Schema module for ddl_schema
//!
//! This module splits dumps into table fragments, extracts fields from them
//! and renders the resulting records.

pub mod builder;
pub mod extractor;
pub mod generator;
pub mod splitter;
pub mod types;

// Re-export key types
pub use builder::TableBuilder;
pub use extractor::{extract, FieldPatterns};
pub use generator::OutputGenerator;
pub use splitter::{split, split_with};
pub use types::{ColumnRecord, DumpSchema, TableRecord, PRIMARY_KEY_MARKER};
