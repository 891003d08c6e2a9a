//! Utilities for ddl_schema
//!
//! This module provides the file-reading and logging helpers around the pipeline.

pub mod fs;
pub mod logging;

// Re-export key utility functions
pub use fs::{find_dump_files, read_dump};
pub use logging::init_logging;
