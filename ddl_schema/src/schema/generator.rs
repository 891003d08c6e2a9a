//! Output generator
//!
//! Renders extracted table records as JSON, YAML, TOML or Markdown documentation.

use serde::Serialize;

use crate::config::{OutputConfig, OutputFormat};
use crate::error::Result;
use crate::schema::types::{ColumnRecord, TableRecord};

/// Top-level wrapper so formats without bare arrays (TOML) can hold the list
#[derive(Serialize)]
struct TableList<'a> {
    tables: &'a [TableRecord],
}

/// Renders table records in the configured output format
pub struct OutputGenerator<'a> {
    config: &'a OutputConfig,
}

impl<'a> OutputGenerator<'a> {
    /// Create a new output generator
    pub fn new(config: &'a OutputConfig) -> Self {
        Self { config }
    }

    /// Render all tables as one document
    pub fn render(&self, tables: &[TableRecord]) -> Result<String> {
        let pretty = self.config.pretty;

        let rendered = match self.config.format {
            OutputFormat::Json if pretty => serde_json::to_string_pretty(&TableList { tables })?,
            OutputFormat::Json => serde_json::to_string(&TableList { tables })?,
            OutputFormat::Yaml => serde_yaml::to_string(&TableList { tables })?,
            OutputFormat::Toml if pretty => toml::to_string_pretty(&TableList { tables })?,
            OutputFormat::Toml => toml::to_string(&TableList { tables })?,
            OutputFormat::Markdown => self.generate_markdown(tables),
        };

        Ok(rendered)
    }

    /// Generate Markdown documentation, one section per table
    pub fn generate_markdown(&self, tables: &[TableRecord]) -> String {
        let sections: Vec<String> = tables
            .iter()
            .filter(|table| !table.is_empty())
            .map(|table| self.generate_table_markdown(table))
            .collect();

        sections.join("\n")
    }

    fn generate_table_markdown(&self, table: &TableRecord) -> String {
        let mut doc = format!("## {}\n\n", table.name);

        if !table.comment.is_empty() {
            doc.push_str(&format!("{}\n\n", table.comment));
        }

        doc.push_str("| Column | Type | Constraint | Comment |\n");
        doc.push_str("| --- | --- | --- | --- |\n");
        for column in table.real_columns() {
            doc.push_str(&self.generate_column_row(column));
        }

        doc
    }

    fn generate_column_row(&self, column: &ColumnRecord) -> String {
        format!(
            "| {} | {} | {} | {} |\n",
            escape_cell(&column.name),
            escape_cell(&column.types),
            escape_cell(&column.constraint),
            escape_cell(&column.comment),
        )
    }
}

/// Make raw extracted text safe inside a Markdown table cell
fn escape_cell(text: &str) -> String {
    text.trim()
        .trim_end_matches(',')
        .replace('|', "\\|")
        .replace(['\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tables() -> Vec<TableRecord> {
        let mut orders = TableRecord::new("orders", "Orders table");
        orders.columns.push(ColumnRecord::default());
        orders
            .columns
            .push(ColumnRecord::new("id", "int(11)", "ID", "PRIMARY KEY ;  NOT NULL"));
        orders.columns.push(ColumnRecord::new(
            "state",
            "enum('a','b')",
            "a|b",
            "NOT NULL,\r",
        ));
        vec![orders, TableRecord::default()]
    }

    fn config(format: OutputFormat) -> OutputConfig {
        OutputConfig {
            format,
            ..OutputConfig::default()
        }
    }

    #[test]
    fn markdown_documents_real_columns() {
        let config = config(OutputFormat::Markdown);
        let doc = OutputGenerator::new(&config).render(&tables()).unwrap();
        assert_eq!(
            doc,
            "## orders\n\n\
             Orders table\n\n\
             | Column | Type | Constraint | Comment |\n\
             | --- | --- | --- | --- |\n\
             | id | int(11) | PRIMARY KEY ;  NOT NULL | ID |\n\
             | state | enum('a','b') | NOT NULL | a\\|b |\n"
        );
    }

    #[test]
    fn json_round_trips() {
        let config = config(OutputFormat::Json);
        let json = OutputGenerator::new(&config).render(&tables()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["tables"][0]["name"], "orders");
        assert_eq!(value["tables"][0]["columns"][1]["types"], "int(11)");
        assert_eq!(value["tables"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn toml_and_yaml_render() {
        let toml_config = config(OutputFormat::Toml);
        let toml_out = OutputGenerator::new(&toml_config).render(&tables()).unwrap();
        assert!(toml_out.contains("[[tables]]"));
        assert!(toml_out.contains("name = \"orders\""));

        let yaml_config = config(OutputFormat::Yaml);
        let yaml_out = OutputGenerator::new(&yaml_config).render(&tables()).unwrap();
        assert!(yaml_out.contains("name: orders"));
    }
}
