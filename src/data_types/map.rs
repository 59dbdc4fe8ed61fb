use serde_derive::{Deserialize, Serialize};

use super::coordinate::Coordinate;
use crate::error::{AppError, AppResult};

// Google encoded polyline precision (1e-5 degrees).
const POLYLINE_PRECISION: u32 = 5;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SwimmerIcon {
    Left,
    Right,
}

impl SwimmerIcon {
    /// Eastward headings (0..=180) face right.
    pub fn for_bearing(bearing: f64) -> Self {
        if (0.0..=180.0).contains(&bearing) {
            SwimmerIcon::Right
        } else {
            SwimmerIcon::Left
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Marker {
    pub coord: Coordinate,
    pub caption: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PolylineStyle {
    pub color: String,
    pub weight: u8,
    pub opacity: f32,
    pub dash_array: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct MapPolyline {
    pub points: Vec<Coordinate>,
    pub encoded: String,
    pub tooltip: String,
    pub style: PolylineStyle,
}

impl MapPolyline {
    pub fn new(points: Vec<Coordinate>, tooltip: String, style: PolylineStyle) -> AppResult<Self> {
        let encoded = polyline::encode_coordinates(
            points.iter().map(|c| c.to_coord()),
            POLYLINE_PRECISION,
        )
        .map_err(AppError::Polyline)?;

        Ok(Self {
            points,
            encoded,
            tooltip,
            style,
        })
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PositionMarker {
    pub coord: Coordinate,
    pub icon: SwimmerIcon,
    pub popup: String,
    pub bearing: f64,
}

/// Everything a map widget needs to draw one day of the challenge.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: u8,
    pub markers: Vec<Marker>,
    pub route: MapPolyline,
    pub travelled: MapPolyline,
    pub position: PositionMarker,
}
