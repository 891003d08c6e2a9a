//! Type definitions for extracted schema records

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Marker prepended to the constraint of the primary key column
pub const PRIMARY_KEY_MARKER: &str = "PRIMARY KEY ; ";

/// One column definition line of a `CREATE TABLE` statement.
///
/// Every field is best-effort text; an empty string means "not extracted".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRecord {
    pub name: String,
    pub types: String,
    pub comment: String,
    pub constraint: String,
}

impl ColumnRecord {
    /// Create a new column record
    pub fn new(name: &str, types: &str, comment: &str, constraint: &str) -> Self {
        Self {
            name: name.to_string(),
            types: types.to_string(),
            comment: comment.to_string(),
            constraint: constraint.to_string(),
        }
    }

    /// True for the placeholder slots of the legacy layout
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.types.is_empty()
            && self.comment.is_empty()
            && self.constraint.is_empty()
    }

    pub fn is_primary_key(&self) -> bool {
        self.constraint.starts_with(PRIMARY_KEY_MARKER)
    }

    /// Prefix the constraint with the primary key marker
    pub(crate) fn mark_primary_key(&mut self) {
        self.constraint.insert_str(0, PRIMARY_KEY_MARKER);
    }
}

/// One table extracted from a dump
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRecord {
    pub name: String,
    pub comment: String,
    pub columns: Vec<ColumnRecord>,
}

impl TableRecord {
    /// Create a new table with the given name and comment
    pub fn new(name: &str, comment: &str) -> Self {
        Self {
            name: name.to_string(),
            comment: comment.to_string(),
            columns: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// All column slots, including empty placeholders in the legacy layout
    pub fn columns(&self) -> &[ColumnRecord] {
        &self.columns
    }

    /// Column records that came from an actual column definition line
    pub fn real_columns(&self) -> impl Iterator<Item = &ColumnRecord> {
        self.columns.iter().filter(|column| !column.is_empty())
    }

    /// The first column carrying the primary key marker
    pub fn primary_key(&self) -> Option<&ColumnRecord> {
        self.columns.iter().find(|column| column.is_primary_key())
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&ColumnRecord> {
        self.real_columns().find(|column| column.name == name)
    }

    /// A zero-valued record, as left in unused legacy slots
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.comment.is_empty() && self.columns.is_empty()
    }
}

/// Tables of one dump, keyed by name in dump order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DumpSchema {
    pub tables: IndexMap<String, TableRecord>,
}

impl DumpSchema {
    /// Create a new empty dump schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table; a later table with the same name replaces the earlier one
    pub fn add_table(&mut self, table: TableRecord) {
        self.tables.insert(table.name.clone(), table);
    }

    pub fn get(&self, name: &str) -> Option<&TableRecord> {
        self.tables.get(name)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableRecord> {
        self.tables.values()
    }
}

impl FromIterator<TableRecord> for DumpSchema {
    /// Unnamed records (legacy empty slots) are skipped
    fn from_iter<I: IntoIterator<Item = TableRecord>>(iter: I) -> Self {
        let mut schema = DumpSchema::new();
        for table in iter.into_iter().filter(|table| !table.name.is_empty()) {
            schema.add_table(table);
        }
        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orders() -> TableRecord {
        let mut table = TableRecord::new("orders", "Orders table");
        table.columns.push(ColumnRecord::default());
        let mut id = ColumnRecord::new("id", "int(11)", "ID", " NOT NULL");
        id.mark_primary_key();
        table.columns.push(id);
        table
            .columns
            .push(ColumnRecord::new("total", "decimal(10,2)", "Total", " NOT NULL"));
        table
    }

    #[test]
    fn new_takes_fields_in_declaration_order() {
        let column = ColumnRecord::new("id", "int(11)", "ID", " NOT NULL");
        assert_eq!(
            column,
            ColumnRecord {
                name: "id".to_string(),
                types: "int(11)".to_string(),
                comment: "ID".to_string(),
                constraint: " NOT NULL".to_string(),
            }
        );
    }

    #[test]
    fn accessors_skip_placeholders() {
        let table = orders();
        assert_eq!(table.columns().len(), 3);
        assert_eq!(table.real_columns().count(), 2);
        assert_eq!(table.primary_key().map(|c| c.name.as_str()), Some("id"));
        assert_eq!(table.column("total").unwrap().types, "decimal(10,2)");
        assert!(table.column("missing").is_none());
    }

    #[test]
    fn primary_key_marker_is_prepended() {
        let table = orders();
        let id = table.column("id").unwrap();
        assert_eq!(id.constraint, "PRIMARY KEY ;  NOT NULL");
        assert!(!table.column("total").unwrap().is_primary_key());
    }

    #[test]
    fn dump_schema_skips_unnamed_tables() {
        let schema: DumpSchema = vec![orders(), TableRecord::default()].into_iter().collect();
        assert_eq!(schema.len(), 1);
        assert!(schema.get("orders").is_some());
    }
}
