//! Fragment splitter
//!
//! Cuts a raw dump into one text fragment per `CREATE TABLE` statement.

use tracing::{debug, trace};

use crate::config::LineEndings;

/// Statement keyword the dump is split on
pub const CREATE_TABLE: &str = "CREATE TABLE";

/// Keyword a fragment must contain to count as a table
pub const ENGINE: &str = "ENGINE";

const CRLF_TERMINATOR: &str = ";\r\n";
const LF_TERMINATOR: &str = ";\n";

/// Split a dump into table fragments.
///
/// Backticks are normalized to single quotes first. The result has one entry
/// per `CREATE TABLE` segment plus the preamble at index 0; segments without
/// `ENGINE` are replaced by empty strings, table segments are cut at their
/// first `;\r\n`.
pub fn split(dump_text: &str) -> Vec<String> {
    split_with(dump_text, LineEndings::Crlf)
}

/// Split a dump, choosing which statement terminators end a fragment
pub fn split_with(dump_text: &str, line_endings: LineEndings) -> Vec<String> {
    let normalized = dump_text.replace('`', "'");

    let fragments: Vec<String> = normalized
        .split(CREATE_TABLE)
        .map(|segment| {
            if segment.contains(ENGINE) {
                truncate_at_terminator(segment, line_endings).to_string()
            } else {
                String::new()
            }
        })
        .collect();

    debug!(
        segments = fragments.len(),
        tables = fragments.iter().filter(|f| !f.is_empty()).count(),
        "Split dump into fragments"
    );

    fragments
}

fn truncate_at_terminator(segment: &str, line_endings: LineEndings) -> &str {
    let cut = match line_endings {
        LineEndings::Crlf => segment.find(CRLF_TERMINATOR),
        LineEndings::Any => {
            [CRLF_TERMINATOR, LF_TERMINATOR]
                .iter()
                .filter_map(|terminator| segment.find(terminator))
                .min()
        }
    };

    match cut {
        Some(end) => &segment[..end],
        None => {
            trace!("Fragment has no statement terminator, keeping it whole");
            segment
        }
    }
}
