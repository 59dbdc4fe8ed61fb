use std::{fmt::Display, str::FromStr};

use geo_types::{Coord, Point};
use serde_derive::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Latitude/longitude pair in decimal degrees.
///
/// Serialized as `[lat, lon]`, the order map widgets expect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "[f64; 2]", try_from = "[f64; 2]")]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> AppResult<Self> {
        let invalid = |reason: &str| AppError::InvalidCoordinate {
            value: format!("{},{}", lat, lon),
            reason: reason.to_string(),
        };

        if !lat.is_finite() || !lon.is_finite() {
            return Err(invalid("not a finite number"));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(invalid("latitude outside [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(invalid("longitude outside [-180, 180]"));
        }

        Ok(Self { lat, lon })
    }

    // Geodesic results are already in range up to rounding; wrap rather than fail.
    pub(crate) fn normalized(lat: f64, lon: f64) -> Self {
        let lon = if (-180.0..=180.0).contains(&lon) {
            lon
        } else {
            (lon + 180.0).rem_euclid(360.0) - 180.0
        };

        Self {
            lat: lat.clamp(-90.0, 90.0),
            lon,
        }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    pub fn to_point(self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }

    pub fn from_point(point: Point<f64>) -> Self {
        Self::normalized(point.y(), point.x())
    }

    /// `x` is longitude, `y` latitude, as the polyline codec expects.
    pub fn to_coord(self) -> Coord<f64> {
        Coord {
            x: self.lon,
            y: self.lat,
        }
    }
}

impl FromStr for Coordinate {
    type Err = AppError;

    /// Parses the sheet format `"lat,long"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| AppError::InvalidCoordinate {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 2 {
            return Err(invalid("expected exactly two comma separated values"));
        }

        let lat: f64 = parts[0]
            .parse()
            .map_err(|_| invalid("latitude is not a number"))?;
        let lon: f64 = parts[1]
            .parse()
            .map_err(|_| invalid("longitude is not a number"))?;

        Coordinate::new(lat, lon).map_err(|err| match err {
            AppError::InvalidCoordinate { reason, .. } => invalid(&reason),
            other => other,
        })
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(coordinate: Coordinate) -> Self {
        [coordinate.lat, coordinate.lon]
    }
}

impl TryFrom<[f64; 2]> for Coordinate {
    type Error = AppError;

    fn try_from(value: [f64; 2]) -> Result<Self, Self::Error> {
        Coordinate::new(value[0], value[1])
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6},{:.6}", self.lat, self.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sheet_format() {
        let c: Coordinate = "36.0055, -5.6035".parse().unwrap();
        assert_eq!(c.lat(), 36.0055);
        assert_eq!(c.lon(), -5.6035);
    }

    #[test]
    fn rejects_malformed_strings() {
        for bad in ["", "36.0", "36.0,-5.6,1.0", "north,east", "36.0,", " , "] {
            let res = bad.parse::<Coordinate>();
            assert!(
                matches!(res, Err(AppError::InvalidCoordinate { .. })),
                "'{}' should not parse",
                bad
            );
        }
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!("91.0,10.0".parse::<Coordinate>().is_err());
        assert!("10.0,180.5".parse::<Coordinate>().is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn point_conversion_swaps_axes() {
        let c = Coordinate::new(55.0, 60.0).unwrap();
        let p = c.to_point();
        assert_eq!(p.x(), 60.0);
        assert_eq!(p.y(), 55.0);
        assert_eq!(Coordinate::from_point(p), c);
    }

    #[test]
    fn normalized_wraps_longitude() {
        let c = Coordinate::normalized(10.0, 190.0);
        assert!((c.lon() - -170.0).abs() < 1e-9);
    }

    #[test]
    fn serializes_as_lat_lon_pair() {
        let c = Coordinate::new(55.1, 60.2).unwrap();
        assert_eq!(serde_json::to_string(&c).unwrap(), "[55.1,60.2]");
        let back: Coordinate = serde_json::from_str("[55.1,60.2]").unwrap();
        assert_eq!(back, c);
        assert!(serde_json::from_str::<Coordinate>("[95.0,0.0]").is_err());
    }
}
