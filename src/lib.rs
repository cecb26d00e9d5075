//! csvjoin library crate
//!
//! This is the library component of csvjoin, an SQL-based command-line
//! utility that loads delimited files as tables into an embedded SQL
//! database, executes a read query, and renders the result. The library
//! provides:
//!
//! - Table specifications (`[alias=]path`) with alias derivation and
//!   home-directory expansion
//! - Table loading through the engine's CSV reader, with fail/replace/append
//!   creation modes
//! - Schema augmentation: generated-name index creation plus verbatim view
//!   and ad-hoc statements
//! - Query resolution (inline SQL or a SQL file), read-statement validation,
//!   and mutating-keyword advisories
//! - Result materialization and rendering as aligned text, JSON records,
//!   CSV, HTML, Markdown, or a pivoted table
//!
//! The library deliberately contains no relational logic of its own: parsing,
//! typing, joins, indexing, and planning all belong to the embedded engine.

pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod loader;
pub mod query;
pub mod render;
pub mod result;
pub mod schema;
