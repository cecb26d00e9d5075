//! csvjoin - an SQL-based command-line utility for joining delimited files
//!
//! This tool loads CSV and delimiter-separated files as tables into an
//! embedded SQL database, optionally augments the schema with indexes, views,
//! and ad-hoc statements, executes a single read query, and renders the
//! result on stdout.
//!
//! # Overview
//!
//! csvjoin gives a person with flat files and SQL knowledge a disposable
//! relational view over those files, without a database server or schema
//! setup. All relational semantics (CSV typing, joins, indexing, planning)
//! come from the embedded engine; csvjoin is the plumbing around it.
//!
//! # Program Flow
//!
//! 1. Parse command-line arguments
//! 2. Open the target database (in-memory by default)
//! 3. Load each declared table specification, in order
//! 4. Apply index, view, and ad-hoc statements, in order
//! 5. Resolve, validate, and execute the query
//! 6. Render the result in the selected output format
//!
//! Every fatal error prints a single `# `-prefixed diagnostic line on stderr
//! and exits nonzero; the database handle is released on every exit path.

use std::io;
use std::process;

use anyhow::{Context, Result};

use csvjoin::cli;
use csvjoin::config::AppConfig;
use csvjoin::database::Database;
use csvjoin::loader::{TableLoader, TableSpec};
use csvjoin::query;
use csvjoin::render::{OutputFormat, Renderer};
use csvjoin::schema::SchemaAugmenter;

/// Main entry point for the csvjoin utility
///
/// Delegates to `run` and maps any failure to the documented contract: one
/// diagnostic line on stderr, exit code 1. Multi-line engine diagnostics are
/// truncated to their first line so stderr stays greppable.
fn main() {
    if let Err(err) = run() {
        let message = format!("{err:#}");
        let line = message.lines().next().unwrap_or("unknown error");
        eprintln!("# {line}");
        process::exit(1);
    }
}

/// Run the five-stage pipeline
///
/// Data flows strictly left to right: arguments, table loading, schema
/// augmentation, query execution, rendering. There is no feedback loop and
/// no state beyond the chosen database target.
///
/// # Returns
/// * `Ok(())` if all operations completed successfully
/// * `Err` with context if any stage fails
fn run() -> Result<()> {
    // Stage 1: parse command-line arguments and build the shared configuration
    let args = cli::parse_args()?;
    let format =
        OutputFormat::from_flags(args.json, args.csv, args.html, args.markdown, args.pivot);
    let config = AppConfig::new(
        args.debug,
        args.delimiter.clone(),
        args.table_creation_mode,
        format,
    );
    config.trace(&format!("arguments: {args:?}"));

    // Stage 2: acquire the database handle, held for the process lifetime
    let db = Database::open(&args.db, &config)
        .with_context(|| format!("failed to open database '{}'", args.db))?;

    // Stage 2b: load each table specification in command-line order.
    // Each load commits on its own; a failure here leaves earlier tables in place.
    let loader = TableLoader::new(&db, &config);
    for spec_text in &args.tables {
        let spec = TableSpec::parse(spec_text)?;
        loader
            .load(&spec)
            .with_context(|| format!("failed to load table '{spec_text}'"))?;
    }

    // Stage 3: indexes first, then views and ad-hoc statements
    let augmenter = SchemaAugmenter::new(&db, &config);
    augmenter
        .apply(&args.indexes, &args.views, &args.adhoc)
        .context("failed to apply schema statement")?;

    // Stage 4: resolve the query text, guard it, execute it
    let sql = query::resolve_query_text(&args.sql)
        .with_context(|| format!("failed to resolve query '{}'", args.sql))?;
    query::validate_read_query(&sql)?;
    if let Some(word) = query::mutating_keyword(&sql)? {
        eprintln!(
            "# warning: query contains '{word}'; --adhoc is more appropriate for mutating statements"
        );
    }
    config.trace(&format!("executing query: {sql}"));
    let result = db.query(&sql).context("query failed")?;
    config.trace(&format!("query returned {} rows", result.row_count()));

    // Stage 5: render to stdout and flush
    let renderer = Renderer::new(&config);
    let stdout = io::stdout();
    renderer.render(&result, &mut stdout.lock())?;

    db.close()?;
    Ok(())
}
