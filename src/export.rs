//! Output formatting for extracted records.
//!
//! The extractor never talks to a database. It prints SQL text for the
//! `elwaReadings` table, or a JSON array, and lets the caller pipe it wherever it
//! needs to go.

use serde::Serialize;

use crate::pipeline::DailyRecord;

const TABLE: &str = "elwaReadings";
const SOURCE: &str = "screenshot";

/// Knobs for `sql_statements`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SqlOptions {
    /// Emit `DELETE FROM elwaReadings;` before the inserts.
    pub delete_existing: bool,
    /// Keep days whose value is 0 instead of skipping them.
    pub include_zero_days: bool,
}

impl Default for SqlOptions {
    fn default() -> Self {
        Self {
            delete_existing: true,
            include_zero_days: false,
        }
    }
}

fn sql_value(value: Option<f64>) -> String {
    value.map_or_else(|| "NULL".to_string(), |v| v.to_string())
}

/// One `INSERT OR REPLACE` for a record. Solar share equals the total; grid share is 0.
pub fn insert_statement(record: &DailyRecord) -> String {
    let value = sql_value(record.value);
    format!(
        "INSERT OR REPLACE INTO {TABLE} (date, energyKwh, energySolarKwh, energyGridKwh, temp1, temp2, source, notes) \
         VALUES ('{}', {value}, {value}, 0, NULL, NULL, '{SOURCE}', NULL);",
        record.date.format("%Y-%m-%d"),
    )
}

/// `energyKwh` is `NOT NULL`, so absent records are always skipped.
pub fn sql_statements(records: &[DailyRecord], options: SqlOptions) -> Vec<String> {
    let mut statements = Vec::with_capacity(records.len() + 1);
    if options.delete_existing {
        statements.push(format!("DELETE FROM {TABLE};"));
    }
    statements.extend(
        records
            .iter()
            .filter(|record| record.value.is_some())
            .filter(|record| options.include_zero_days || record.has_data())
            .map(insert_statement),
    );
    statements
}

#[derive(Serialize)]
struct JsonRecord {
    date: String,
    kwh: Option<f64>,
}

/// Pretty-printed JSON array of `{ "date": "YYYY-MM-DD", "kwh": value }`.
pub fn json_records(records: &[DailyRecord]) -> serde_json::Result<String> {
    let rows: Vec<JsonRecord> = records
        .iter()
        .map(|record| JsonRecord {
            date: record.date.format("%Y-%m-%d").to_string(),
            kwh: record.value,
        })
        .collect();
    serde_json::to_string_pretty(&rows)
}
