//! CLI argument parsing module for csvjoin
//!
//! This module handles parsing command-line arguments using the clap crate.
//! It defines the command-line interface structure and behavior for the application,
//! enabling users to declare input tables, schema statements, the query to run,
//! and the output format for its result.
//!
//! Key features of the CLI:
//! - Repeatable table specifications with optional alias overrides
//! - Repeatable index/view/ad-hoc schema statements, applied in order
//! - A single required query, given inline or as a path to a SQL file
//! - Mutually prioritized output format flags (json, csv, html, markdown)
//! - Diagnostic output control via the --debug flag

use anyhow::Result;
use clap::Parser;

use crate::loader::TableMode;

/// Command-line arguments for csvjoin
///
/// This struct represents all configurable aspects of the application through
/// command-line parameters. It is automatically populated by clap based on
/// the provided arguments.
///
/// One historical spelling conflict is resolved here: `-d` belongs to the
/// database target, so table specifications keep `--data` as their only
/// legacy alias and `--csv` retains its output-format meaning.
#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Load delimited files as SQL tables, run a query, render the result"
)]
pub struct CsvJoinArgs {
    /// Input tables - format: [alias=]file_path
    ///
    /// Each specification loads one delimited file as a table. When no alias
    /// is given, the file's base name (extension stripped, remaining dots
    /// replaced with underscores) becomes the table name.
    /// Example: -t users=data/people.csv or just -t data/products.csv
    #[clap(
        short = 't',
        long = "table",
        visible_alias = "data",
        help = "Input table as [alias=]file_path"
    )]
    pub tables: Vec<String>,

    /// Index-creation fragments - format: table(col,...)
    ///
    /// Each fragment is completed into `create index <generated-name> on <fragment>`
    /// with a collision-avoiding generated name, and executed after all tables
    /// have been loaded.
    #[clap(
        short = 'i',
        long = "index",
        help = "Create an index from a table(col,...) fragment"
    )]
    pub indexes: Vec<String>,

    /// View-definition statements, executed verbatim
    ///
    /// Full `create view ...` statements. These run after index creation and
    /// before the query, in the order given on the command line.
    #[clap(short = 'v', long = "view", help = "View definition, executed verbatim")]
    pub views: Vec<String>,

    /// Ad-hoc DDL/DML statements, executed verbatim
    ///
    /// The escape hatch for statements the query guard rail would reject,
    /// such as `update`, `delete`, or arbitrary DDL.
    #[clap(
        short = 'a',
        long = "adhoc",
        help = "Ad-hoc DDL/DML statement, executed verbatim"
    )]
    pub adhoc: Vec<String>,

    /// Database target
    ///
    /// Defaults to an in-memory instance discarded at process exit. A file
    /// path keeps the database across runs; a value containing `//` is passed
    /// through to the engine as a full connection URL.
    #[clap(
        short = 'd',
        long = "db",
        visible_aliases = ["database", "engine"],
        default_value = ":memory:",
        help = "Database target (default in-memory)"
    )]
    pub db: String,

    /// The query to execute
    ///
    /// Either a literal SQL string or a path to a file containing one; a
    /// string naming an existing file is replaced by that file's contents.
    #[clap(
        short = 'q',
        long = "sql",
        visible_alias = "query",
        help = "SQL query, or path to a file containing one"
    )]
    pub sql: String,

    /// Field delimiter for input files
    #[clap(
        short = 'b',
        long = "delimiter",
        default_value = ",",
        help = "Field delimiter for input files"
    )]
    pub delimiter: String,

    /// How to create a table whose name already exists
    #[clap(
        long = "table-creation-mode",
        value_enum,
        default_value_t = TableMode::Replace,
        help = "Behavior when a table already exists"
    )]
    pub table_creation_mode: TableMode,

    /// Emit the result as JSON records
    #[clap(short = 'J', long = "json", help = "Emit JSON records")]
    pub json: bool,

    /// Emit the result as CSV
    #[clap(long = "csv", help = "Emit CSV")]
    pub csv: bool,

    /// Emit the result as an HTML table
    #[clap(long = "html", help = "Emit an HTML table")]
    pub html: bool,

    /// Emit the result as a Markdown table
    #[clap(long = "markdown", help = "Emit a Markdown table")]
    pub markdown: bool,

    /// Transpose the default table rendering
    #[clap(long = "pivot", help = "Transpose the default table rendering")]
    pub pivot: bool,

    /// Enable diagnostic trace output
    ///
    /// When enabled, `# `-prefixed trace lines describing table loading,
    /// schema augmentation, and query execution are written to stderr.
    #[clap(short = 'X', long = "debug", help = "Emit diagnostic trace lines on stderr")]
    pub debug: bool,
}

/// Parse command-line arguments into the CsvJoinArgs structure
///
/// This function uses clap to handle argument parsing, validation, and help text generation.
/// It automatically generates usage information, handles errors for missing required arguments,
/// and properly validates supported options.
///
/// # Returns
/// * `Ok(CsvJoinArgs)` - Command-line arguments successfully parsed
/// * `Err` - Error during argument parsing (handled by clap, usually results in help text display)
pub fn parse_args() -> Result<CsvJoinArgs> {
    Ok(CsvJoinArgs::parse())
}
