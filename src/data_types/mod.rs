pub mod coordinate;
pub mod day;
pub mod map;
pub mod progress;
pub mod segment;

/// Distances in the sheets are whole meters.
pub type Meters = u64;
