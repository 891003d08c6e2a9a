//! ddl_schema: table and column metadata from MySQL `CREATE TABLE` dumps
//!
//! ddl_schema reads a textual dump offline and extracts, per table, its name,
//! comment and column definitions (name, type, constraint, comment), so that
//! documentation or code generators can work without a live database.

pub mod config;
pub mod error;
pub mod schema;
pub mod utils;

use std::path::{Path, PathBuf};

// Re-export main types for easier access
pub use config::{ColumnLayout, Config, ExtractConfig, LineEndings, OutputFormat};
pub use error::{Error, Result};
pub use schema::builder::TableBuilder;
pub use schema::generator::OutputGenerator;
pub use schema::types::{ColumnRecord, DumpSchema, TableRecord};

/// Read all table records from a dump file, using the default options
pub fn read_table_info_from_sql(path: impl AsRef<Path>) -> Result<Vec<TableRecord>> {
    SchemaExtractor::default().extract_file(path)
}

/// Read all table records from dump text, using the default options
pub fn read_table_info_from_sql_text(text: &str) -> Vec<TableRecord> {
    SchemaExtractor::default().extract_text(text)
}

/// Runs the split and build pipeline with a fixed set of options
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaExtractor {
    options: ExtractConfig,
}

impl SchemaExtractor {
    /// Create a new extractor from extraction options
    pub fn new(options: ExtractConfig) -> Self {
        Self { options }
    }

    /// Create an extractor from a full configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.extract)
    }

    pub fn options(&self) -> &ExtractConfig {
        &self.options
    }

    /// Extract table records from dump text
    pub fn extract_text(&self, text: &str) -> Vec<TableRecord> {
        let fragments = schema::splitter::split_with(text, self.options.line_endings);
        TableBuilder::new(self.options).build(&fragments)
    }

    /// Extract table records from a dump file
    pub fn extract_file(&self, path: impl AsRef<Path>) -> Result<Vec<TableRecord>> {
        let path = path.as_ref();
        let text = utils::fs::read_dump(path)?;
        let tables = self.extract_text(&text);

        tracing::info!(path = %path.display(), tables = tables.len(), "Extracted tables from dump");
        Ok(tables)
    }

    /// Extract table records from every `.sql` file under a directory, in path order
    pub fn extract_dir(&self, dir: impl AsRef<Path>) -> Result<Vec<(PathBuf, Vec<TableRecord>)>> {
        utils::fs::find_dump_files(dir.as_ref())?
            .into_iter()
            .map(|path| -> Result<(PathBuf, Vec<TableRecord>)> {
                let tables = self.extract_file(&path)?;
                Ok((path, tables))
            })
            .collect()
    }

    /// Extract a dump into a name-indexed schema
    pub fn extract_schema(&self, text: &str) -> DumpSchema {
        self.extract_text(text).into_iter().collect()
    }
}
