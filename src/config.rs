//! Configuration module for csvjoin
//!
//! This module provides a centralized configuration structure for the application.
//! It handles global settings that are passed down through the application rather
//! than using global state or passing individual settings.

use crate::loader::TableMode;
use crate::render::OutputFormat;

/// Application configuration
///
/// This struct encapsulates all global configuration settings for the application.
/// It is created at startup and passed to components that need access to configuration.
/// This approach avoids global mutable state and makes dependencies explicit.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Whether to emit diagnostic trace lines on stderr
    debug: bool,

    /// Field delimiter for input files
    delimiter: String,

    /// How to create tables that already exist (fail/replace/append)
    table_mode: TableMode,

    /// Output format for the query result
    format: OutputFormat,
}

impl AppConfig {
    /// Create a new application configuration
    ///
    /// # Arguments
    /// * `debug` - Whether to emit diagnostic trace lines on stderr
    /// * `delimiter` - Field delimiter for input files
    /// * `table_mode` - Table-creation mode applied while loading
    /// * `format` - Output format for the query result
    pub fn new(debug: bool, delimiter: String, table_mode: TableMode, format: OutputFormat) -> Self {
        Self {
            debug,
            delimiter,
            table_mode,
            format,
        }
    }

    /// Get the debug flag
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Get the input field delimiter
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Get the table-creation mode
    pub fn table_mode(&self) -> TableMode {
        self.table_mode
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Emit a diagnostic trace line on stderr when debug mode is enabled
    ///
    /// All diagnostic lines share the `# ` prefix so they can be told apart
    /// from rendered query output on stdout.
    pub fn trace(&self, message: &str) {
        if self.debug {
            eprintln!("# {message}");
        }
    }
}
