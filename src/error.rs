//! Crate-wide error type.

use chrono::NaiveDate;
use thiserror::Error;

use crate::data_types::Meters;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("HTTP transfer failed: {0}")]
    Curl(#[from] curl::Error),

    #[error("remote source answered {status}: {message}")]
    Remote { status: u32, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("table '{table}' has no column '{column}'")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },

    #[error("invalid coordinate '{value}': {reason}")]
    InvalidCoordinate { value: String, reason: String },

    #[error("invalid date '{0}'")]
    InvalidDate(String),

    #[error("invalid distance '{value}' in table '{table}', row {row}")]
    InvalidDistance {
        table: &'static str,
        row: usize,
        value: String,
    },

    #[error("invalid segment table: {0}")]
    InvalidSegmentTable(String),

    #[error("polyline encoding failed: {0}")]
    Polyline(String),

    #[error("no progress data for {0}")]
    NoProgressForDate(NaiveDate),

    #[error("challenge complete: {distance} m swum, last segment ends at {final_threshold} m")]
    ChallengeComplete {
        distance: Meters,
        final_threshold: Meters,
    },

    #[error("segment table is empty")]
    NoSegments,

    #[error("segment index {index} out of range ({len} segments)")]
    SegmentIndexOutOfRange { index: usize, len: usize },
}

impl AppError {
    /// HTTP status code a web surface should answer with.
    pub fn http_status(&self) -> u16 {
        match self {
            AppError::InvalidDate(_) => 400,
            AppError::NoProgressForDate(_) => 404,
            AppError::Curl(_)
            | AppError::Remote { .. }
            | AppError::Json(_)
            | AppError::MissingColumn { .. }
            | AppError::InvalidCoordinate { .. }
            | AppError::InvalidDistance { .. }
            | AppError::InvalidSegmentTable(_)
            | AppError::NoSegments => 502,
            _ => 500,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
