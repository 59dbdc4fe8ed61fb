#![allow(dead_code)]

use straits_covered::data_types::{
    coordinate::Coordinate,
    segment::{SegmentRecord, SegmentTable},
    Meters,
};
use straits_covered::database::memory::InMemorySource;

pub fn coord(lat: f64, lon: f64) -> Coordinate {
    Coordinate::new(lat, lon).unwrap()
}

pub fn segment(threshold_m: Meters, start: Coordinate, finish: Coordinate) -> SegmentRecord {
    SegmentRecord {
        threshold_m,
        length_m: 0,
        start,
        finish,
        start_caption: String::new(),
        finish_caption: String::new(),
        description: String::new(),
    }
}

/// Thresholds 1000, 3000, 6000 on short legs near the Urals.
pub fn three_segments() -> SegmentTable {
    SegmentTable::new(vec![
        segment(1000, coord(55.0, 60.0), coord(55.0, 60.016)),
        segment(3000, coord(55.0, 60.016), coord(55.018, 60.016)),
        segment(6000, coord(55.018, 60.016), coord(55.018, 60.063)),
    ])
    .unwrap()
}

pub const SEGMENT_HEADER: &[&str] = &[
    "Cumul_dist",
    "Distance",
    "Start_point",
    "Finish_point",
    "Start_caption",
    "Finish_caption",
    "Description",
];

pub fn club_source() -> InMemorySource {
    InMemorySource::from_strs(
        &[
            &["Date", "Cumulative_sum"],
            &["13.01.2025", ""],
            &["14.01.2025", "2000"],
            &["15.01.2025", ""],
            &["16.01.2025", "18500"],
            &["17.01.2025", "40000"],
        ],
        &[
            SEGMENT_HEADER,
            &["17000", "17000", "55.0,60.0", "55.1,60.2", "Shore", "", "First strait"],
            &["30000", "", "55.1,60.2", "55.1,60.0", "", "Island", "Second strait"],
        ],
    )
}
