//! Table loading module for csvjoin
//!
//! This module turns `[alias=]path` specifications from the command line into
//! tables in the target database. It provides:
//!
//! - Parsing of table specifications, with alias derivation from the file name
//! - Home-directory (`~`) expansion for source paths
//! - The table-creation modes (fail/replace/append)
//! - Delegation of CSV parsing and column typing to the engine's CSV reader
//!
//! No schema is declared anywhere: column names come from the file's header
//! row and column types from the engine's sniffer.

use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::config::AppConfig;
use crate::database::Database;
use crate::error::{CsvJoinError, CsvJoinResult};

/// Behavior when loading a table whose name already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TableMode {
    /// Error out if the table exists
    Fail,
    /// Drop and recreate the table, discarding prior contents
    Replace,
    /// Insert into the existing schema (creates the table on first load)
    Append,
}

/// A single `[alias=]path` table specification
///
/// Created once per command-line occurrence, consumed by the loader, and not
/// mutated thereafter. When no alias is given it is derived from the file's
/// base name: the extension is stripped and remaining `.` characters are
/// replaced with `_` so most file names yield a usable SQL identifier. The
/// tool performs no validation beyond that substitution; an alias that is
/// still unusable is a user error surfaced by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSpec {
    /// Table name the file is loaded under
    alias: String,
    /// Source path, after home-directory expansion
    path: PathBuf,
}

impl TableSpec {
    /// Parse a table specification into alias and source path
    ///
    /// Handles two formats:
    /// 1. `alias=file_path` - Explicit alias and file path
    /// 2. `file_path` - Alias derived from the file name
    ///
    /// # Arguments
    /// * `spec` - Table specification in one of the supported formats
    ///
    /// # Returns
    /// * `Ok(TableSpec)` - Parsed alias and path
    /// * `Err` - If the specification has an empty alias or no usable file name
    pub fn parse(spec: &str) -> CsvJoinResult<Self> {
        if let Some((alias, file_path)) = spec.split_once('=') {
            if alias.is_empty() || file_path.is_empty() {
                return Err(CsvJoinError::InvalidTableSpec(spec.to_string()));
            }
            Ok(Self {
                alias: alias.to_string(),
                path: expand_home(file_path),
            })
        } else {
            let path = expand_home(spec);
            let stem = path
                .file_stem()
                .ok_or_else(|| CsvJoinError::InvalidTableSpec(spec.to_string()))?;
            let alias = stem.to_string_lossy().replace('.', "_");
            if alias.is_empty() {
                return Err(CsvJoinError::InvalidTableSpec(spec.to_string()));
            }
            Ok(Self { alias, path })
        }
    }

    /// Get the table alias
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Get the source path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Expand a leading home-directory shorthand in a path
///
/// `~` and `~/...` resolve against `$HOME`; everything else passes through
/// unchanged, including `~user` forms.
fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home);
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(path)
}

/// Quote an identifier for use in generated statements
///
/// Loaded table names are always quoted, so aliases survive the engine's
/// keyword and case rules; queries referring to unusual aliases must quote
/// them the same way.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Quote a string literal for use in generated statements
fn quote_literal(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// Loads table specifications into the database, in command-line order
///
/// Each load is a single engine statement and commits independently; a
/// failure aborts the run but does not roll back previously loaded tables.
pub struct TableLoader<'a> {
    /// Target database
    db: &'a Database,
    /// Shared configuration (delimiter, table mode, diagnostics)
    config: &'a AppConfig,
}

impl<'a> TableLoader<'a> {
    /// Create a loader bound to a database and configuration
    pub fn new(db: &'a Database, config: &'a AppConfig) -> Self {
        Self { db, config }
    }

    /// Load one table specification into the database
    ///
    /// The file is parsed by the engine's CSV reader with the configured
    /// delimiter; column types are whatever the sniffer infers. The
    /// table-creation mode decides what happens when the alias already names
    /// a table.
    ///
    /// # Arguments
    /// * `spec` - Parsed table specification
    ///
    /// # Returns
    /// * `Ok(())` if the table was created or appended to
    /// * `Err` for unreadable files, creation conflicts under `fail` mode, or
    ///   any other engine error
    pub fn load(&self, spec: &TableSpec) -> CsvJoinResult<()> {
        // Surface missing/unreadable files as I/O errors before the engine
        // wraps them in its own phrasing.
        std::fs::metadata(spec.path())?;

        let source = format!(
            "select * from read_csv({}, delim = {}, header = true)",
            quote_literal(&spec.path().to_string_lossy()),
            quote_literal(self.config.delimiter()),
        );
        let target = quote_ident(spec.alias());

        let statement = match self.config.table_mode() {
            TableMode::Fail => format!("create table {target} as {source}"),
            TableMode::Replace => format!("create or replace table {target} as {source}"),
            TableMode::Append => {
                if self.db.table_exists(spec.alias())? {
                    format!("insert into {target} {source}")
                } else {
                    format!("create table {target} as {source}")
                }
            }
        };

        self.config.trace(&format!(
            "loading table '{}' from {}",
            spec.alias(),
            spec.path().display()
        ));
        self.db.execute(&statement)
    }
}
