use chrono::NaiveDate;

use crate::{
    data_types::{
        progress::ProgressTable,
        segment::{SegmentRecord, SegmentTable},
        Meters,
    },
    error::{AppError, AppResult},
    logvbln,
};

/// Maps a cumulative distance onto the segment table.
pub struct SegmentLocator;

impl SegmentLocator {
    const CC: &str = "SegmentLocator";

    /// Forward-filled cumulative meters on `date`.
    pub fn progress_at(date: NaiveDate, progress: &ProgressTable) -> AppResult<Meters> {
        progress
            .get(date)
            .ok_or(AppError::NoProgressForDate(date))
    }

    /// The next segment to be entered: the smallest threshold strictly above `distance`.
    pub fn locate_segment(
        distance: Meters,
        segments: &SegmentTable,
    ) -> AppResult<(&SegmentRecord, usize)> {
        let found = segments
            .iter()
            .enumerate()
            .filter(|(_, segment)| segment.threshold_m > distance)
            .min_by_key(|(_, segment)| segment.threshold_m);

        match found {
            Some((index, segment)) => {
                logvbln!("{} m falls into segment {} (ends at {} m)", distance, index, segment.threshold_m);
                Ok((segment, index))
            }
            None => Err(AppError::ChallengeComplete {
                distance,
                final_threshold: segments.total_m(),
            }),
        }
    }

    /// Meters swum inside segment `index`.
    pub fn within_segment_progress(
        distance: Meters,
        index: usize,
        segments: &SegmentTable,
    ) -> AppResult<Meters> {
        if index >= segments.len() {
            return Err(AppError::SegmentIndexOutOfRange {
                index,
                len: segments.len(),
            });
        }

        if index == 0 {
            return Ok(distance);
        }

        let previous = segments
            .get(index - 1)
            .map(|segment| segment.threshold_m)
            .unwrap_or_default();

        Ok(distance.saturating_sub(previous))
    }
}
