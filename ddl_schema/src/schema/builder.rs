//! Table builder
//!
//! Turns the fragments produced by the splitter into table records.

use tracing::{debug, trace};

use crate::config::{ColumnLayout, ExtractConfig};
use crate::schema::extractor::{capture, FieldPatterns};
use crate::schema::splitter::ENGINE;
use crate::schema::types::{ColumnRecord, TableRecord};

const PRIMARY_KEY_PREFIX: &str = "PRIMARY KEY";

/// Builds table records from dump fragments
#[derive(Debug, Clone, Copy, Default)]
pub struct TableBuilder {
    options: ExtractConfig,
}

impl TableBuilder {
    /// Create a new table builder
    pub fn new(options: ExtractConfig) -> Self {
        Self { options }
    }

    /// Build one record per table fragment.
    ///
    /// Fragment 0 is the dump preamble and is never read as a table. With the
    /// compact layout only fragments containing `ENGINE` produce a record; the
    /// legacy layout returns `fragments.len() - 1` slots, leaving a default
    /// record wherever the fragment was not a table.
    pub fn build(&self, fragments: &[String]) -> Vec<TableRecord> {
        let tables = fragments
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, fragment)| fragment.contains(ENGINE));

        match self.options.column_layout {
            ColumnLayout::Compact => tables
                .map(|(_, fragment)| self.build_table(fragment))
                .collect(),
            ColumnLayout::Legacy => {
                let mut result = vec![TableRecord::default(); fragments.len().saturating_sub(1)];
                for (i, fragment) in tables {
                    result[i - 1] = self.build_table(fragment);
                }
                result
            }
        }
    }

    /// Parse a single table fragment
    pub fn build_table(&self, fragment: &str) -> TableRecord {
        let patterns = FieldPatterns::get();
        let mut table = TableRecord::new(
            capture(&patterns.quoted_name, 1, fragment),
            capture(&patterns.table_comment, 1, fragment),
        );

        let lines: Vec<&str> = fragment.split('\n').collect();
        let legacy = self.options.column_layout == ColumnLayout::Legacy;
        if legacy {
            table.columns = vec![ColumnRecord::default(); lines.len()];
        }

        let mut primary_keys: Vec<String> = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            let line = line.trim_start_matches(' ');

            if line.starts_with('\'') && i > 0 {
                let column = parse_column(line);
                if legacy {
                    table.columns[i] = column;
                } else if !column.is_empty() {
                    table.columns.push(column);
                }
            } else if line.starts_with(PRIMARY_KEY_PREFIX) {
                primary_keys = self.primary_key_names(line);
                trace!(table = %table.name, keys = ?primary_keys, "Found primary key");
            }
        }

        annotate_primary_keys(&mut table.columns, &primary_keys);

        debug!(
            table = %table.name,
            columns = table.real_columns().count(),
            "Built table record"
        );
        table
    }

    /// Names declared by a `PRIMARY KEY (...)` line.
    ///
    /// Without composite support the key must name exactly one column.
    fn primary_key_names(&self, line: &str) -> Vec<String> {
        let patterns = FieldPatterns::get();

        if !self.options.composite_primary_keys {
            let name = capture(&patterns.primary_key, 1, line);
            return if name.is_empty() {
                Vec::new()
            } else {
                vec![name.to_string()]
            };
        }

        capture(&patterns.primary_key_list, 1, line)
            .split(',')
            .map(|name| name.trim().trim_matches('\''))
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Parse a column definition line such as
/// `'tid' int(11) NOT NULL DEFAULT '0' COMMENT 'Platform id',`
fn parse_column(line: &str) -> ColumnRecord {
    let patterns = FieldPatterns::get();

    let mut constraint = capture(&patterns.column_constraint, 1, line);
    if constraint.is_empty() {
        constraint = capture(&patterns.column_constraint_tail, 1, line);
    }

    ColumnRecord::new(
        capture(&patterns.quoted_name, 1, line),
        capture(&patterns.column_type, 1, line),
        capture(&patterns.column_comment, 1, line),
        constraint,
    )
}

fn annotate_primary_keys(columns: &mut [ColumnRecord], primary_keys: &[String]) {
    if primary_keys.is_empty() {
        return;
    }

    for column in columns.iter_mut().filter(|c| !c.is_empty()) {
        if primary_keys.iter().any(|key| *key == column.name) {
            column.mark_primary_key();
        }
    }
}

/// Build table records with the default options
pub fn build(fragments: &[String]) -> Vec<TableRecord> {
    TableBuilder::default().build(fragments)
}
