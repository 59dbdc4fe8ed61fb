use serde_derive::{Deserialize, Serialize};

use super::{coordinate::Coordinate, Meters};
use crate::error::{AppError, AppResult};

/// One leg (strait) of the challenge.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SegmentRecord {
    /// Cumulative meters at the end of this segment.
    pub threshold_m: Meters,
    /// Nominal length. Zero means "not given" and is derived by [`SegmentTable::new`].
    pub length_m: Meters,
    pub start: Coordinate,
    pub finish: Coordinate,
    pub start_caption: String,
    pub finish_caption: String,
    pub description: String,
}

/// Non-empty, strictly increasing list of segments.
#[derive(Debug, Clone)]
pub struct SegmentTable {
    segments: Vec<SegmentRecord>,
}

impl SegmentTable {
    pub fn new(mut segments: Vec<SegmentRecord>) -> AppResult<Self> {
        if segments.is_empty() {
            return Err(AppError::NoSegments);
        }

        let mut previous: Meters = 0;
        for (index, segment) in segments.iter_mut().enumerate() {
            if segment.threshold_m <= previous {
                return Err(AppError::InvalidSegmentTable(format!(
                    "threshold {} of segment {} does not exceed the previous one ({})",
                    segment.threshold_m, index, previous
                )));
            }

            if segment.length_m == 0 {
                segment.length_m = segment.threshold_m - previous;
            }

            previous = segment.threshold_m;
        }

        Ok(Self { segments })
    }

    pub fn get(&self, index: usize) -> Option<&SegmentRecord> {
        self.segments.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SegmentRecord> {
        self.segments.iter()
    }

    pub fn last(&self) -> &SegmentRecord {
        // Non-empty by construction.
        &self.segments[self.segments.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn total_m(&self) -> Meters {
        self.last().threshold_m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(threshold_m: Meters, length_m: Meters) -> SegmentRecord {
        SegmentRecord {
            threshold_m,
            length_m,
            start: Coordinate::new(0.0, 0.0).unwrap(),
            finish: Coordinate::new(0.0, 0.1).unwrap(),
            start_caption: String::new(),
            finish_caption: String::new(),
            description: String::new(),
        }
    }

    #[test]
    fn derives_missing_lengths() {
        let table = SegmentTable::new(vec![segment(1000, 0), segment(3000, 0), segment(6000, 2500)])
            .unwrap();

        let lengths: Vec<Meters> = table.iter().map(|s| s.length_m).collect();
        assert_eq!(lengths, vec![1000, 2000, 2500]);
        assert_eq!(table.total_m(), 6000);
    }

    #[test]
    fn rejects_repeated_thresholds() {
        let res = SegmentTable::new(vec![segment(1000, 0), segment(1000, 0)]);
        assert!(matches!(res, Err(AppError::InvalidSegmentTable(_))));
    }

    #[test]
    fn rejects_empty_table() {
        assert!(matches!(SegmentTable::new(vec![]), Err(AppError::NoSegments)));
    }
}
