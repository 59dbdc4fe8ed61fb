mod test_utils;

use chrono::NaiveDate;
use straits_covered::data_types::progress::{ProgressRecord, ProgressTable};
use straits_covered::error::AppError;
use straits_covered::processors::locator::SegmentLocator;
use test_utils::three_segments;

#[test]
fn locate_segment_uses_strict_thresholds() {
    let segments = three_segments();

    let index_for = |distance| SegmentLocator::locate_segment(distance, &segments).map(|(_, i)| i);

    assert_eq!(index_for(0).unwrap(), 0);
    assert_eq!(index_for(500).unwrap(), 0);
    assert_eq!(index_for(999).unwrap(), 0);
    assert_eq!(index_for(1000).unwrap(), 1);
    assert_eq!(index_for(3500).unwrap(), 2);
    assert_eq!(index_for(5999).unwrap(), 2);
}

#[test]
fn locate_segment_returns_the_matching_record() {
    let segments = three_segments();
    let (segment, index) = SegmentLocator::locate_segment(1500, &segments).unwrap();
    assert_eq!(index, 1);
    assert_eq!(segment.threshold_m, 3000);
}

#[test]
fn distance_past_every_threshold_is_challenge_complete() {
    let segments = three_segments();

    for distance in [6000, 9000] {
        match SegmentLocator::locate_segment(distance, &segments) {
            Err(AppError::ChallengeComplete {
                distance: d,
                final_threshold,
            }) => {
                assert_eq!(d, distance);
                assert_eq!(final_threshold, 6000);
            }
            other => panic!("expected ChallengeComplete, got {:?}", other.map(|(_, i)| i)),
        }
    }
}

#[test]
fn within_segment_progress_subtracts_previous_threshold() {
    let segments = three_segments();

    assert_eq!(SegmentLocator::within_segment_progress(500, 0, &segments).unwrap(), 500);
    assert_eq!(SegmentLocator::within_segment_progress(1500, 1, &segments).unwrap(), 500);
    assert_eq!(SegmentLocator::within_segment_progress(1000, 1, &segments).unwrap(), 0);
    assert_eq!(SegmentLocator::within_segment_progress(3500, 2, &segments).unwrap(), 500);

    assert!(matches!(
        SegmentLocator::within_segment_progress(100, 3, &segments),
        Err(AppError::SegmentIndexOutOfRange { index: 3, len: 3 })
    ));
}

#[test]
fn progress_lookup_after_forward_fill() {
    let day = |d| NaiveDate::from_ymd_opt(2025, 1, d).unwrap();
    let table = ProgressTable::new(vec![
        ProgressRecord { date: day(13), cumulative_m: None },
        ProgressRecord { date: day(14), cumulative_m: Some(2000) },
        ProgressRecord { date: day(15), cumulative_m: None },
    ]);

    assert_eq!(SegmentLocator::progress_at(day(15), &table).unwrap(), 2000);
    assert!(matches!(
        SegmentLocator::progress_at(day(13), &table),
        Err(AppError::NoProgressForDate(d)) if d == day(13)
    ));
    assert!(matches!(
        SegmentLocator::progress_at(day(20), &table),
        Err(AppError::NoProgressForDate(_))
    ));
}
