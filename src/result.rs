//! Result set module for csvjoin
//!
//! This module provides the in-memory representation of a query result:
//!
//! - A `Value` enum covering the cell types the tool renders (null, boolean,
//!   integer, float, text)
//! - Conversion from the embedded engine's native values, including temporal
//!   and decimal types which are rendered to text
//! - The `ResultSet` container holding ordered column names and rows
//!
//! The result set exists only for the duration of rendering; nothing in this
//! module touches the database.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime};
use duckdb::types::{TimeUnit, Value as EngineValue};
use serde::Serialize;

/// Represents a value in a result cell
///
/// This enum provides the cell types the renderers distinguish. Numeric and
/// boolean cells keep their native type so JSON output stays typed; every
/// other engine type (dates, timestamps, decimals, blobs, nested values) is
/// converted to text up front.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Represents a NULL or missing value
    Null,
    /// Boolean value (true/false)
    Boolean(bool),
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit floating point number
    Float(f64),
    /// UTF-8 string
    Text(String),
}

impl Value {
    /// Convert a native engine value into a renderable cell value
    ///
    /// Integer widths collapse to `i64` where they fit; anything wider, and
    /// every type without a JSON-native representation, becomes text.
    pub fn from_engine(value: EngineValue) -> Self {
        match value {
            EngineValue::Null => Value::Null,
            EngineValue::Boolean(b) => Value::Boolean(b),
            EngineValue::TinyInt(i) => Value::Integer(i64::from(i)),
            EngineValue::SmallInt(i) => Value::Integer(i64::from(i)),
            EngineValue::Int(i) => Value::Integer(i64::from(i)),
            EngineValue::BigInt(i) => Value::Integer(i),
            EngineValue::HugeInt(i) => match i64::try_from(i) {
                Ok(narrow) => Value::Integer(narrow),
                Err(_) => Value::Text(i.to_string()),
            },
            EngineValue::UTinyInt(i) => Value::Integer(i64::from(i)),
            EngineValue::USmallInt(i) => Value::Integer(i64::from(i)),
            EngineValue::UInt(i) => Value::Integer(i64::from(i)),
            EngineValue::UBigInt(i) => match i64::try_from(i) {
                Ok(narrow) => Value::Integer(narrow),
                Err(_) => Value::Text(i.to_string()),
            },
            EngineValue::Float(f) => Value::Float(f64::from(f)),
            EngineValue::Double(f) => Value::Float(f),
            EngineValue::Decimal(d) => Value::Text(d.to_string()),
            EngineValue::Text(s) => Value::Text(s),
            EngineValue::Blob(bytes) => Value::Text(String::from_utf8_lossy(&bytes).into_owned()),
            EngineValue::Date32(days) => Value::Text(format_date(days)),
            EngineValue::Time64(unit, raw) => Value::Text(format_time(unit, raw)),
            EngineValue::Timestamp(unit, raw) => Value::Text(format_timestamp(unit, raw)),
            EngineValue::Interval {
                months,
                days,
                nanos,
            } => Value::Text(format!(
                "{months} months {days} days {} microseconds",
                nanos / 1_000
            )),
            other => Value::Text(format!("{other:?}")),
        }
    }

    /// Whether this cell is NULL
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// Display renders a cell the way the table-oriented formats print it.
///
/// NULL cells print as the literal `NULL`; the CSV renderer substitutes an
/// empty field instead.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(float) => write!(f, "{}", float),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Days between 0001-01-01 (chrono's day 1) and the Unix epoch.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Render an engine DATE (days since the Unix epoch) as `YYYY-MM-DD`
fn format_date(days: i32) -> String {
    match NaiveDate::from_num_days_from_ce_opt(UNIX_EPOCH_DAYS_FROM_CE + days) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => days.to_string(),
    }
}

/// Convert a raw temporal count in the given unit to microseconds
fn to_micros(unit: TimeUnit, raw: i64) -> i64 {
    match unit {
        TimeUnit::Second => raw.saturating_mul(1_000_000),
        TimeUnit::Millisecond => raw.saturating_mul(1_000),
        TimeUnit::Microsecond => raw,
        TimeUnit::Nanosecond => raw / 1_000,
    }
}

/// Render an engine TIME as `HH:MM:SS` with fractional seconds when present
fn format_time(unit: TimeUnit, raw: i64) -> String {
    let micros = to_micros(unit, raw);
    let seconds = u32::try_from(micros / 1_000_000).unwrap_or(0);
    let nanos = u32::try_from((micros % 1_000_000) * 1_000).unwrap_or(0);
    match NaiveTime::from_num_seconds_from_midnight_opt(seconds, nanos) {
        Some(time) => time.format("%H:%M:%S%.f").to_string(),
        None => raw.to_string(),
    }
}

/// Render an engine TIMESTAMP as `YYYY-MM-DD HH:MM:SS` with fractional
/// seconds when present
fn format_timestamp(unit: TimeUnit, raw: i64) -> String {
    let micros = to_micros(unit, raw);
    match DateTime::from_timestamp_micros(micros) {
        Some(ts) => ts.format("%Y-%m-%d %H:%M:%S%.f").to_string(),
        None => raw.to_string(),
    }
}

/// The typed tabular output of a query
///
/// An ordered sequence of rows, each an ordered sequence of cell values,
/// together with the column names reported by the engine. Column names are
/// captured even when the result has no rows, so header-only output (CSV)
/// still renders correctly.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    /// Column names in result order
    columns: Vec<String>,
    /// Rows in result order; each row has one cell per column
    rows: Vec<Vec<Value>>,
}

impl ResultSet {
    /// Create an empty result set with the given column names
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row of cell values
    pub fn add_row(&mut self, row: Vec<Value>) {
        self.rows.push(row);
    }

    /// Get the column names in result order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Get the rows in result order
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Whether the result set contains no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_integers_collapse_to_i64() {
        assert_eq!(
            Value::from_engine(EngineValue::TinyInt(7)),
            Value::Integer(7)
        );
        assert_eq!(
            Value::from_engine(EngineValue::BigInt(-42)),
            Value::Integer(-42)
        );
        assert_eq!(
            Value::from_engine(EngineValue::UBigInt(u64::MAX)),
            Value::Text(u64::MAX.to_string())
        );
        assert_eq!(
            Value::from_engine(EngineValue::HugeInt(1)),
            Value::Integer(1)
        );
    }

    #[test]
    fn dates_render_iso() {
        // 2024-03-05 is 19787 days after the Unix epoch
        assert_eq!(format_date(19_787), "2024-03-05");
        assert_eq!(format_date(0), "1970-01-01");
    }

    #[test]
    fn times_render_hms() {
        // 01:02:03 in microseconds since midnight
        assert_eq!(format_time(TimeUnit::Microsecond, 3_723_000_000), "01:02:03");
    }

    #[test]
    fn null_displays_as_literal() {
        assert_eq!(Value::Null.to_string(), "NULL");
        assert!(Value::Null.is_null());
        assert!(!Value::Integer(0).is_null());
    }

    #[test]
    fn values_serialize_untagged() {
        let row = vec![
            Value::Text("a".to_string()),
            Value::Integer(1),
            Value::Null,
            Value::Boolean(true),
        ];
        let json = serde_json::to_string(&row).expect("serializable");
        assert_eq!(json, r#"["a",1,null,true]"#);
    }

    #[test]
    fn result_set_tracks_shape() {
        let mut set = ResultSet::new(vec!["name".to_string(), "val".to_string()]);
        assert!(set.is_empty());
        set.add_row(vec![Value::Text("a".to_string()), Value::Integer(1)]);
        assert_eq!(set.row_count(), 1);
        assert_eq!(set.column_count(), 2);
        assert!(!set.is_empty());
    }
}
