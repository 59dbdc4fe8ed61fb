use crate::{
    data_types::{progress::ProgressTable, segment::SegmentTable},
    error::AppResult,
};

use super::{
    rows::{parse_progress, parse_segments, Rows},
    ChallengeSource,
};

/// Holds sheet-shaped rows in memory. Every fetch parses them again, like a
/// remote fetch would.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    progress: Vec<Vec<String>>,
    segments: Vec<Vec<String>>,
}

impl InMemorySource {
    pub fn new(progress: Vec<Vec<String>>, segments: Vec<Vec<String>>) -> Self {
        Self { progress, segments }
    }

    pub fn from_strs(progress: &[&[&str]], segments: &[&[&str]]) -> Self {
        let owned = |rows: &[&[&str]]| -> Vec<Vec<String>> {
            rows.iter()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect()
        };

        Self::new(owned(progress), owned(segments))
    }
}

impl ChallengeSource for InMemorySource {
    fn fetch_progress(&self) -> AppResult<ProgressTable> {
        parse_progress(&Rows::new("progress", self.progress.clone()))
    }

    fn fetch_segments(&self) -> AppResult<SegmentTable> {
        parse_segments(&Rows::new("segments", self.segments.clone()))
    }
}
