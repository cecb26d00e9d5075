//! Database module for csvjoin
//!
//! This module wraps the embedded SQL engine connection that owns all tables
//! for the lifetime of the process. It serves as the single interface for
//! statement execution and query materialization; all relational semantics
//! (CSV sniffing, joins, indexing, planning) are supplied by the engine.

use duckdb::{params, Connection};

use crate::config::AppConfig;
use crate::error::CsvJoinResult;
use crate::result::{ResultSet, Value};

/// Handle to the target database for the duration of one invocation
///
/// The handle is acquired once at startup and released on every exit path:
/// explicitly via `close()` on success, or by drop when an error unwinds the
/// pipeline. The engine auto-commits each statement, so every table load and
/// schema statement is durable as soon as it returns.
pub struct Database {
    /// The engine connection
    conn: Connection,
}

impl Database {
    /// Open a connection to the requested target
    ///
    /// `:memory:` (the default) opens an ephemeral in-process instance that
    /// is discarded at exit. Any other value is handed to the engine as-is:
    /// a plain path opens or creates a file-backed database, and a value
    /// containing `//` is a full connection URL to an external resource.
    ///
    /// # Arguments
    /// * `target` - Database target from the command line
    /// * `config` - Application configuration (for diagnostic traces)
    ///
    /// # Returns
    /// * `Ok(Database)` if the target could be opened
    /// * `Err` if the target is unreachable
    pub fn open(target: &str, config: &AppConfig) -> CsvJoinResult<Self> {
        let conn = if target == ":memory:" {
            config.trace("opening in-memory database");
            Connection::open_in_memory()?
        } else {
            if target.contains("//") {
                config.trace(&format!("opening external database url: {target}"));
            } else {
                config.trace(&format!("opening database file: {target}"));
            }
            Connection::open(target)?
        };

        Ok(Self { conn })
    }

    /// Execute a statement (or semicolon-separated batch) without a result
    ///
    /// Used for table loads, index creation, views, and ad-hoc DDL/DML.
    ///
    /// # Arguments
    /// * `sql` - The statement text to execute
    ///
    /// # Returns
    /// * `Ok(())` if the engine accepted and executed the statement
    /// * `Err` with the engine's diagnostic otherwise
    pub fn execute(&self, sql: &str) -> CsvJoinResult<()> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    /// Check whether a table with the given name exists
    ///
    /// Used by the append table-creation mode to decide between creating a
    /// fresh table and inserting into the existing schema.
    pub fn table_exists(&self, name: &str) -> CsvJoinResult<bool> {
        let count: i64 = self.conn.query_row(
            "select count(*) from information_schema.tables where table_name = ?",
            params![name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Execute a query and materialize the full result set
    ///
    /// Column names are captured from the executed statement even when the
    /// query returns no rows, so header-only renderings stay correct.
    ///
    /// # Arguments
    /// * `sql` - The (already validated) query text
    ///
    /// # Returns
    /// * `Ok(ResultSet)` with every row of the result
    /// * `Err` with the engine's diagnostic if execution fails
    pub fn query(&self, sql: &str) -> CsvJoinResult<ResultSet> {
        let mut stmt = self.conn.prepare(sql)?;

        // Collect every row first, probing the column count from the row
        // itself: Rows holds a mutable borrow on the statement, so column
        // metadata can only be read after that borrow ends.
        let mut collected: Vec<Vec<Value>> = Vec::new();
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let mut cells = Vec::new();
            for idx in 0.. {
                match row.get::<_, duckdb::types::Value>(idx) {
                    Ok(value) => cells.push(Value::from_engine(value)),
                    Err(_) => break,
                }
            }
            collected.push(cells);
        }
        drop(rows);

        // Column names are available once the statement has been executed,
        // including for results with zero rows.
        let columns: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();

        let mut result = ResultSet::new(columns);
        for row in collected {
            result.add_row(row);
        }
        Ok(result)
    }

    /// Close the database handle
    ///
    /// Consumes the handle and reports any final engine error. Error paths
    /// that never reach this point release the connection by drop.
    pub fn close(self) -> CsvJoinResult<()> {
        self.conn.close().map_err(|(_, err)| err)?;
        Ok(())
    }
}
