//! Query resolution and validation module for csvjoin
//!
//! The query reaches the engine through three steps handled here:
//!
//! 1. **Resolution** - a query string naming an existing file is replaced by
//!    that file's contents; anything else is taken verbatim
//! 2. **Validation** - only read statements (`select`, `with`, `values`) are
//!    accepted; everything else is refused before touching the database, with
//!    a diagnostic pointing at the --adhoc escape hatch
//! 3. **Advisory scan** - an accepted query containing a mutating keyword
//!    still executes, but earns a warning suggesting --adhoc instead
//!
//! Execution itself lives in the database module; this module never holds a
//! connection.

use std::fs;
use std::path::Path;

use regex::Regex;

use crate::error::{CsvJoinError, CsvJoinResult};

/// Resolve the query text from the command-line argument
///
/// If the supplied string is a path to an existing file, the file's full
/// contents become the query; otherwise the string itself is the query.
/// Resolution happens once, immediately before validation and execution.
pub fn resolve_query_text(arg: &str) -> CsvJoinResult<String> {
    let path = Path::new(arg);
    if path.is_file() {
        Ok(fs::read_to_string(path)?)
    } else {
        Ok(arg.to_string())
    }
}

/// Validate that the query text looks like a read statement
///
/// Accepts text beginning (case-insensitively, leading whitespace allowed)
/// with `select`, `with`, or `values`, followed by whitespace or `(`.
/// Anything else is rejected without executing it; the --adhoc path exists
/// for exactly those statements.
pub fn validate_read_query(sql: &str) -> CsvJoinResult<()> {
    let read_statement = Regex::new(r"(?i)^\s*(select|with|values)[\s(]")?;
    if read_statement.is_match(sql) {
        Ok(())
    } else {
        let summary: String = sql.trim().chars().take(60).collect();
        Err(CsvJoinError::QueryRejected(summary))
    }
}

/// Scan an accepted query for mutating keywords
///
/// Returns the first whole word among `update`, `delete`, and `merge` found
/// anywhere in the text, for a non-fatal advisory; the query still executes.
pub fn mutating_keyword(sql: &str) -> CsvJoinResult<Option<String>> {
    let keyword = Regex::new(r"(?i)\b(update|delete|merge)\b")?;
    Ok(keyword
        .find(sql)
        .map(|found| found.as_str().to_lowercase()))
}
