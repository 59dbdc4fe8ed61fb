//! Header-indexed string rows, as returned by the spreadsheet, parsed into typed tables.
//!
//! Parsing happens here once so nothing downstream sees a raw coordinate or
//! date string.

use serde_json::Value;

use crate::{
    data_types::{
        coordinate::Coordinate,
        progress::{ProgressRecord, ProgressTable},
        segment::{SegmentRecord, SegmentTable},
        Meters,
    },
    error::{AppError, AppResult},
    util::DateTimeUtils,
};

const PROGRESS_TABLE: &str = "progress";
const SEGMENTS_TABLE: &str = "segments";

pub struct Rows {
    table: &'static str,
    header: Vec<String>,
    data: Vec<Vec<String>>,
}

impl Rows {
    /// First row is the header. Empty input yields a table without columns.
    pub fn new(table: &'static str, mut values: Vec<Vec<String>>) -> Self {
        let header = if values.is_empty() {
            Vec::new()
        } else {
            values.remove(0).into_iter().map(|h| h.trim().to_string()).collect()
        };

        Self {
            table,
            header,
            data: values,
        }
    }

    /// Same as [`Rows::new`] for the JSON cells of a Sheets `values` array.
    pub fn from_json(table: &'static str, values: Vec<Vec<Value>>) -> Self {
        let values = values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect();

        Rows::new(table, values)
    }

    fn column(&self, name: &'static str) -> AppResult<usize> {
        self.header
            .iter()
            .position(|h| h == name)
            .ok_or(AppError::MissingColumn {
                table: self.table,
                column: name,
            })
    }

    fn optional_column(&self, name: &'static str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    /// Non-blank rows with their 1-based sheet row number (header is row 1).
    fn rows(&self) -> impl Iterator<Item = (usize, &Vec<String>)> {
        self.data
            .iter()
            .enumerate()
            .map(|(index, row)| (index + 2, row))
            .filter(|(_, row)| row.iter().any(|cell| !cell.trim().is_empty()))
    }
}

// Rows come back shorter than the header when trailing cells are empty.
fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(|c| c.trim()).unwrap_or("")
}

fn cell_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Whole meters; tolerates thousand separators and truncates decimals.
///
/// A comma is only a thousands separator (`16,000`); a decimal comma is rejected.
pub fn parse_meters(value: &str) -> Option<Meters> {
    let cleaned: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{a0}' && *c != '\u{202f}')
        .collect();
    let cleaned = strip_grouping(&cleaned)?;

    if let Ok(meters) = cleaned.parse::<Meters>() {
        return Some(meters);
    }

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|m| m.is_finite() && *m >= 0.0)
        .map(|m| m.trunc() as Meters)
}

fn strip_grouping(value: &str) -> Option<String> {
    if !value.contains(',') {
        return Some(value.to_string());
    }

    let (whole, fraction) = match value.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (value, None),
    };

    let digits = |group: &str| group.chars().all(|c| c.is_ascii_digit());
    let mut groups = whole.split(',');
    let head = groups.next()?;

    let grouped = (1..=3).contains(&head.len())
        && digits(head)
        && groups.all(|group| group.len() == 3 && digits(group));
    if !grouped || fraction.map_or(false, |f| f.contains(',')) {
        return None;
    }

    let mut stripped = whole.replace(',', "");
    if let Some(fraction) = fraction {
        stripped.push('.');
        stripped.push_str(fraction);
    }

    Some(stripped)
}

pub fn parse_progress(rows: &Rows) -> AppResult<ProgressTable> {
    let date_col = rows.column("Date")?;
    let sum_col = rows.column("Cumulative_sum")?;

    let mut records = Vec::new();
    for (row_number, row) in rows.rows() {
        let date_cell = cell(row, date_col);
        if date_cell.is_empty() {
            continue;
        }

        let date = DateTimeUtils::parse_date(date_cell)?;

        let sum_cell = cell(row, sum_col);
        let cumulative_m = if sum_cell.is_empty() {
            None
        } else {
            Some(parse_meters(sum_cell).ok_or_else(|| AppError::InvalidDistance {
                table: PROGRESS_TABLE,
                row: row_number,
                value: sum_cell.to_string(),
            })?)
        };

        records.push(ProgressRecord { date, cumulative_m });
    }

    Ok(ProgressTable::new(records))
}

pub fn parse_segments(rows: &Rows) -> AppResult<SegmentTable> {
    let threshold_col = rows.column("Cumul_dist")?;
    let start_col = rows.column("Start_point")?;
    let finish_col = rows.column("Finish_point")?;
    let start_caption_col = rows.column("Start_caption")?;
    let finish_caption_col = rows.column("Finish_caption")?;
    let description_col = rows.column("Description")?;
    let length_col = rows.optional_column("Distance");

    let distance = |row_number: usize, value: &str| -> AppResult<Meters> {
        parse_meters(value).ok_or_else(|| AppError::InvalidDistance {
            table: SEGMENTS_TABLE,
            row: row_number,
            value: value.to_string(),
        })
    };

    let mut segments = Vec::new();
    for (row_number, row) in rows.rows() {
        let length_m = match length_col.map(|col| cell(row, col)) {
            Some(value) if !value.is_empty() => distance(row_number, value)?,
            _ => 0,
        };

        segments.push(SegmentRecord {
            threshold_m: distance(row_number, cell(row, threshold_col))?,
            length_m,
            start: cell(row, start_col).parse()?,
            finish: cell(row, finish_col).parse::<Coordinate>()?,
            start_caption: cell(row, start_caption_col).to_string(),
            finish_caption: cell(row, finish_caption_col).to_string(),
            description: cell(row, description_col).to_string(),
        });
    }

    SegmentTable::new(segments)
}
