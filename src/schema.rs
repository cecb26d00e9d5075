//! Schema augmentation module for csvjoin
//!
//! After the tables are loaded and before the query runs, this module applies
//! user-supplied schema statements in two ordered sub-phases:
//!
//! 1. **Indexes** - each `--index` fragment (`table(col,...)`) is completed
//!    into a full `create index` statement under a generated name
//! 2. **Views and ad-hoc statements** - executed verbatim; this is the
//!    intentional escape hatch for DDL/DML the query guard rail rejects
//!
//! Any failure in either sub-phase is fatal and aborts the run.

use rand::Rng;

use crate::config::AppConfig;
use crate::database::Database;
use crate::error::CsvJoinResult;

/// Prefix for generated index names
const INDEX_NAME_PREFIX: &str = "idx_";

/// Default number of random letters in a generated index name
const INDEX_SUFFIX_LEN: usize = 8;

/// Shortest random suffix ever generated, regardless of the requested length
const MIN_INDEX_SUFFIX_LEN: usize = 3;

/// Generate a collision-avoiding index name
///
/// The name is the given prefix followed by random lowercase letters. The
/// randomness is cosmetic collision avoidance, not a security control; the
/// only guaranteed property is that the suffix is never shorter than three
/// letters.
pub fn random_index_name(prefix: &str, suffix_len: usize) -> String {
    let suffix_len = suffix_len.max(MIN_INDEX_SUFFIX_LEN);
    let mut rng = rand::thread_rng();
    let suffix: String = (0..suffix_len)
        .map(|_| char::from(rng.gen_range(b'a'..=b'z')))
        .collect();
    format!("{prefix}{suffix}")
}

/// Applies index, view, and ad-hoc statements against the database
pub struct SchemaAugmenter<'a> {
    /// Target database
    db: &'a Database,
    /// Shared configuration (diagnostics)
    config: &'a AppConfig,
}

impl<'a> SchemaAugmenter<'a> {
    /// Create an augmenter bound to a database and configuration
    pub fn new(db: &'a Database, config: &'a AppConfig) -> Self {
        Self { db, config }
    }

    /// Apply all schema statements, in sub-phase order
    ///
    /// Indexes run first, then views, then ad-hoc statements, each group in
    /// the order its flags appeared on the command line. Every statement
    /// commits as soon as the engine executes it.
    ///
    /// # Arguments
    /// * `indexes` - `table(col,...)` fragments for index creation
    /// * `views` - verbatim view-definition statements
    /// * `adhoc` - verbatim DDL/DML statements
    ///
    /// # Returns
    /// * `Ok(())` if every statement executed
    /// * `Err` with the engine's diagnostic for the first failing statement
    pub fn apply(&self, indexes: &[String], views: &[String], adhoc: &[String]) -> CsvJoinResult<()> {
        for fragment in indexes {
            self.create_index(fragment)?;
        }
        for statement in views.iter().chain(adhoc.iter()) {
            self.config.trace(&format!("executing: {statement}"));
            self.db.execute(statement)?;
        }
        Ok(())
    }

    /// Complete and execute one index fragment
    ///
    /// The fragment must contain everything after `on` in a `create index`
    /// statement: the table name, the column list, and any trailing clauses.
    fn create_index(&self, fragment: &str) -> CsvJoinResult<()> {
        let name = random_index_name(INDEX_NAME_PREFIX, INDEX_SUFFIX_LEN);
        let statement = format!("create index {name} on {fragment}");
        self.config.trace(&format!("executing: {statement}"));
        self.db.execute(&statement)
    }
}
