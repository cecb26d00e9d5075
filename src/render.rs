//! Result rendering module for csvjoin
//!
//! This module turns a materialized result set into one of the supported
//! output formats:
//!
//! - Default: a plain aligned table with no column or row truncation,
//!   optionally pivoted (rows and columns transposed)
//! - JSON: an array of field-to-value records
//! - CSV: a header row followed by data rows, no row-index column
//! - HTML: a table element, no row-index column
//! - Markdown: a pipe table, no row-index column
//!
//! Format selection is mutually exclusive and resolved in a fixed priority
//! order. Renderers write to a caller-supplied writer so tests can capture
//! output; only the empty-set diagnostic goes to stderr.

use std::io::Write;

use comfy_table::presets::{ASCII_MARKDOWN, NOTHING};
use comfy_table::Table;

use crate::config::AppConfig;
use crate::error::CsvJoinResult;
use crate::result::{ResultSet, Value};

/// Output format for the query result
///
/// When several format flags are set at once, the priority order is fixed:
/// JSON, then CSV, then HTML, then Markdown, then the default table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON records (array of field-to-value objects)
    Json,
    /// CSV with a header row
    Csv,
    /// HTML table
    Html,
    /// Markdown table
    Markdown,
    /// Plain aligned table, optionally transposed
    Table {
        /// Transpose rows and columns before rendering
        pivot: bool,
    },
}

impl OutputFormat {
    /// Resolve the format from the command-line flags, in priority order
    pub fn from_flags(json: bool, csv: bool, html: bool, markdown: bool, pivot: bool) -> Self {
        if json {
            OutputFormat::Json
        } else if csv {
            OutputFormat::Csv
        } else if html {
            OutputFormat::Html
        } else if markdown {
            OutputFormat::Markdown
        } else {
            OutputFormat::Table { pivot }
        }
    }
}

/// Renders a result set in the configured output format
pub struct Renderer<'a> {
    /// Shared configuration (format selection, diagnostics)
    config: &'a AppConfig,
}

impl<'a> Renderer<'a> {
    /// Create a renderer bound to the application configuration
    pub fn new(config: &'a AppConfig) -> Self {
        Self { config }
    }

    /// Render the result set to the given writer
    ///
    /// The writer is flushed before returning, so output is complete as soon
    /// as this function succeeds. An empty result set under the default
    /// table format prints `# empty set.` to stderr and nothing to the
    /// writer; the structured formats render their natural empty shape
    /// (an empty JSON array, a lone CSV header row, and so on).
    pub fn render(&self, result: &ResultSet, out: &mut dyn Write) -> CsvJoinResult<()> {
        match self.config.format() {
            OutputFormat::Json => self.render_json(result, out)?,
            OutputFormat::Csv => self.render_csv(result, out)?,
            OutputFormat::Html => self.render_html(result, out)?,
            OutputFormat::Markdown => self.render_markdown(result, out)?,
            OutputFormat::Table { pivot } => self.render_table(result, pivot, out)?,
        }
        out.flush()?;
        Ok(())
    }

    /// Serialize rows as an array of field-to-value objects
    fn render_json(&self, result: &ResultSet, out: &mut dyn Write) -> CsvJoinResult<()> {
        let mut records = Vec::with_capacity(result.row_count());
        for row in result.rows() {
            let mut record = serde_json::Map::new();
            for (column, cell) in result.columns().iter().zip(row.iter()) {
                record.insert(column.clone(), serde_json::to_value(cell)?);
            }
            records.push(serde_json::Value::Object(record));
        }
        serde_json::to_writer(&mut *out, &records)?;
        writeln!(out)?;
        Ok(())
    }

    /// Serialize with a header row; NULL cells become empty fields
    fn render_csv(&self, result: &ResultSet, out: &mut dyn Write) -> CsvJoinResult<()> {
        let mut writer = csv::Writer::from_writer(&mut *out);
        writer.write_record(result.columns())?;
        for row in result.rows() {
            let record: Vec<String> = row
                .iter()
                .map(|cell| if cell.is_null() { String::new() } else { cell.to_string() })
                .collect();
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Serialize as an HTML table with escaped cell contents
    fn render_html(&self, result: &ResultSet, out: &mut dyn Write) -> CsvJoinResult<()> {
        writeln!(out, "<table>")?;
        writeln!(out, "  <thead>")?;
        write!(out, "    <tr>")?;
        for column in result.columns() {
            write!(out, "<th>{}</th>", html_escape(column))?;
        }
        writeln!(out, "</tr>")?;
        writeln!(out, "  </thead>")?;
        writeln!(out, "  <tbody>")?;
        for row in result.rows() {
            write!(out, "    <tr>")?;
            for cell in row {
                write!(out, "<td>{}</td>", html_escape(&cell.to_string()))?;
            }
            writeln!(out, "</tr>")?;
        }
        writeln!(out, "  </tbody>")?;
        writeln!(out, "</table>")?;
        Ok(())
    }

    /// Serialize as a Markdown pipe table
    fn render_markdown(&self, result: &ResultSet, out: &mut dyn Write) -> CsvJoinResult<()> {
        let mut table = Table::new();
        table.load_preset(ASCII_MARKDOWN);
        table.set_header(result.columns());
        for row in result.rows() {
            table.add_row(row.iter().map(|cell| cell.to_string()));
        }
        writeln!(out, "{table}")?;
        Ok(())
    }

    /// Render the default aligned table, unabbreviated
    ///
    /// With `pivot`, the table is transposed: one output row per source
    /// column, leading with the column name.
    fn render_table(&self, result: &ResultSet, pivot: bool, out: &mut dyn Write) -> CsvJoinResult<()> {
        if result.is_empty() {
            eprintln!("# empty set.");
            return Ok(());
        }

        let mut table = Table::new();
        table.load_preset(NOTHING);
        if pivot {
            for (idx, column) in result.columns().iter().enumerate() {
                let mut cells = Vec::with_capacity(result.row_count() + 1);
                cells.push(column.clone());
                for row in result.rows() {
                    cells.push(row[idx].to_string());
                }
                table.add_row(cells);
            }
        } else {
            table.set_header(result.columns());
            for row in result.rows() {
                table.add_row(row.iter().map(|cell| cell.to_string()));
            }
        }
        writeln!(out, "{table}")?;
        Ok(())
    }
}

/// Escape text for embedding in HTML markup
fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::TableMode;

    fn sample_result() -> ResultSet {
        let mut set = ResultSet::new(vec!["name".to_string(), "val".to_string()]);
        set.add_row(vec![Value::Text("a".to_string()), Value::Integer(1)]);
        set.add_row(vec![Value::Text("b".to_string()), Value::Integer(2)]);
        set
    }

    fn render_with(format: OutputFormat, result: &ResultSet) -> String {
        let config = AppConfig::new(false, ",".to_string(), TableMode::Replace, format);
        let renderer = Renderer::new(&config);
        let mut out = Vec::new();
        renderer.render(result, &mut out).expect("render");
        String::from_utf8(out).expect("utf8 output")
    }

    #[test]
    fn json_records_in_column_order() {
        let out = render_with(OutputFormat::Json, &sample_result());
        assert_eq!(
            out.trim_end(),
            r#"[{"name":"a","val":1},{"name":"b","val":2}]"#
        );
    }

    #[test]
    fn json_empty_set_is_empty_array() {
        let empty = ResultSet::new(vec!["name".to_string()]);
        let out = render_with(OutputFormat::Json, &empty);
        assert_eq!(out.trim_end(), "[]");
    }

    #[test]
    fn csv_has_header_and_rows() {
        let out = render_with(OutputFormat::Csv, &sample_result());
        assert_eq!(out, "name,val\na,1\nb,2\n");
    }

    #[test]
    fn csv_null_is_empty_field() {
        let mut set = ResultSet::new(vec!["x".to_string(), "y".to_string()]);
        set.add_row(vec![Value::Null, Value::Integer(3)]);
        let out = render_with(OutputFormat::Csv, &set);
        assert_eq!(out, "x,y\n,3\n");
    }

    #[test]
    fn html_escapes_cells() {
        let mut set = ResultSet::new(vec!["markup".to_string()]);
        set.add_row(vec![Value::Text("<b>&\"x\"</b>".to_string())]);
        let out = render_with(OutputFormat::Html, &set);
        assert!(out.starts_with("<table>"));
        assert!(out.contains("<th>markup</th>"));
        assert!(out.contains("<td>&lt;b&gt;&amp;&quot;x&quot;&lt;/b&gt;</td>"));
    }

    #[test]
    fn markdown_is_a_pipe_table() {
        let out = render_with(OutputFormat::Markdown, &sample_result());
        let mut lines = out.lines();
        let header = lines.next().expect("header line");
        let separator = lines.next().expect("separator line");
        assert!(header.contains("name") && header.contains("val"));
        assert!(separator.contains("---"));
        assert!(out.contains("| a"));
    }

    #[test]
    fn default_table_is_aligned_and_complete() {
        let out = render_with(OutputFormat::Table { pivot: false }, &sample_result());
        assert!(out.contains("name"));
        assert!(out.contains("val"));
        assert!(out.contains("a"));
        assert!(out.contains("2"));
        // No borders in the plain preset
        assert!(!out.contains('|'));
        assert!(!out.contains('+'));
    }

    #[test]
    fn empty_table_produces_no_stdout() {
        let empty = ResultSet::new(vec!["name".to_string()]);
        let out = render_with(OutputFormat::Table { pivot: false }, &empty);
        assert!(out.is_empty());
    }

    #[test]
    fn pivot_leads_each_row_with_the_column_name() {
        let out = render_with(OutputFormat::Table { pivot: true }, &sample_result());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].trim_start().starts_with("name"));
        assert!(lines[0].contains('a') && lines[0].contains('b'));
        assert!(lines[1].trim_start().starts_with("val"));
        assert!(lines[1].contains('1') && lines[1].contains('2'));
    }

    #[test]
    fn format_priority_is_fixed() {
        assert_eq!(
            OutputFormat::from_flags(true, true, true, true, true),
            OutputFormat::Json
        );
        assert_eq!(
            OutputFormat::from_flags(false, true, true, true, false),
            OutputFormat::Csv
        );
        assert_eq!(
            OutputFormat::from_flags(false, false, true, true, false),
            OutputFormat::Html
        );
        assert_eq!(
            OutputFormat::from_flags(false, false, false, true, false),
            OutputFormat::Markdown
        );
        assert_eq!(
            OutputFormat::from_flags(false, false, false, false, true),
            OutputFormat::Table { pivot: true }
        );
    }
}
