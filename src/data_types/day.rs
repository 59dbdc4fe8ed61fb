use std::sync::Arc;

use chrono::NaiveDate;
use serde_derive::Serialize;

use super::{map::MapView, Meters};

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeStatus {
    Swimming,
    /// Cumulative distance reached the last threshold.
    Finished,
}

/// Result of rendering one selected day.
#[derive(Debug, Serialize, Clone)]
pub struct DayView {
    pub date: NaiveDate,
    pub overall_m: Meters,
    pub segment_index: usize,
    pub segment_count: usize,
    pub segment_length_m: Meters,
    pub within_segment_m: Meters,
    pub remaining_m: Meters,
    pub description: String,
    pub status: ChallengeStatus,
    pub map: Arc<MapView>,
}
