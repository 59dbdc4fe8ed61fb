use geo::{Bearing, Destination, Distance, Geodesic};
use std::f64::consts::PI;

use crate::data_types::coordinate::Coordinate;

pub struct GeoUtils;

impl GeoUtils {
    /// Initial compass bearing from `start` to `end` on a sphere, in [0, 360).
    ///
    /// Coincident points have no defined bearing; the result is finite but
    /// meaningless.
    pub fn bearing(start: Coordinate, end: Coordinate) -> f64 {
        let lat1 = GeoUtils::deg2rad(start.lat());
        let lat2 = GeoUtils::deg2rad(end.lat());
        let diff_long = GeoUtils::deg2rad(end.lon() - start.lon());

        let x = diff_long.sin() * lat2.cos();
        let y = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * diff_long.cos();

        // atan2 is in (-180, 180]
        (GeoUtils::rad2deg(x.atan2(y)) + 360.0) % 360.0
    }

    /// Initial azimuth of the WGS-84 geodesic from `start` to `end`, in [0, 360).
    pub fn geodesic_bearing(start: Coordinate, end: Coordinate) -> f64 {
        let azimuth = Geodesic::bearing(start.to_point(), end.to_point());
        GeoUtils::normalize_bearing(azimuth)
    }

    /// Point reached after `distance_km` along the geodesic leaving `start` at `bearing`.
    pub fn destination_point(start: Coordinate, bearing: f64, distance_km: f64) -> Coordinate {
        let point = Geodesic::destination(start.to_point(), bearing, distance_km * 1000.0);
        Coordinate::from_point(point)
    }

    /// Point `distance_km` along the path from `start` toward `end`.
    pub fn destination_toward(start: Coordinate, end: Coordinate, distance_km: f64) -> Coordinate {
        let bearing = GeoUtils::geodesic_bearing(start, end);
        GeoUtils::destination_point(start, bearing, distance_km)
    }

    /// Ellipsoidal (Karney) distance in kilometers.
    pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
        Geodesic::distance(a.to_point(), b.to_point()) / 1000.0
    }

    pub fn midpoint(start: Coordinate, end: Coordinate) -> Coordinate {
        GeoUtils::destination_toward(start, end, GeoUtils::distance_km(start, end) / 2.0)
    }

    /// `steps + 1` points from `start` to `end`, evenly spaced by distance along the geodesic.
    pub fn path_points(start: Coordinate, end: Coordinate, steps: usize) -> PathPoints {
        PathPoints {
            start,
            end,
            bearing: GeoUtils::geodesic_bearing(start, end),
            total_km: GeoUtils::distance_km(start, end),
            steps: steps.max(1),
            next: 0,
        }
    }

    pub fn deg2rad(deg: f64) -> f64 {
        deg * PI / 180.0
    }

    pub fn rad2deg(rad: f64) -> f64 {
        rad * 180.0 / PI
    }

    fn normalize_bearing(deg: f64) -> f64 {
        let normalized = deg.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360 for tiny negatives
        if normalized >= 360.0 {
            0.0
        } else {
            normalized
        }
    }
}

/// Lazy iterator behind [`GeoUtils::path_points`]. Clone it to restart.
#[derive(Debug, Clone)]
pub struct PathPoints {
    start: Coordinate,
    end: Coordinate,
    bearing: f64,
    total_km: f64,
    steps: usize,
    next: usize,
}

impl Iterator for PathPoints {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > self.steps {
            return None;
        }

        let index = self.next;
        self.next += 1;

        let point = if index == 0 {
            self.start
        } else if index == self.steps {
            self.end
        } else {
            let distance = self.total_km * index as f64 / self.steps as f64;
            GeoUtils::destination_point(self.start, self.bearing, distance)
        };

        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.steps + 1).saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PathPoints {}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    fn meters_apart(a: Coordinate, b: Coordinate) -> f64 {
        GeoUtils::distance_km(a, b) * 1000.0
    }

    #[test]
    fn bearing_cardinal_directions() {
        assert!(GeoUtils::bearing(c(0.0, 0.0), c(10.0, 0.0)).abs() < 1e-9);
        assert!((GeoUtils::bearing(c(0.0, 10.0), c(0.0, 20.0)) - 90.0).abs() < 1e-9);
        assert!((GeoUtils::bearing(c(10.0, 0.0), c(0.0, 0.0)) - 180.0).abs() < 1e-9);
        assert!((GeoUtils::bearing(c(0.0, 20.0), c(0.0, 10.0)) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn bearing_is_always_in_compass_range() {
        let points = [
            c(55.0, 60.0),
            c(55.1, 60.2),
            c(-33.8, 151.1),
            c(36.0, -5.6),
            c(0.0, 179.9),
            c(0.0, -179.9),
            c(89.0, 0.0),
        ];

        for a in points {
            for b in points {
                if a == b {
                    continue;
                }
                let bearing = GeoUtils::bearing(a, b);
                assert!((0.0..360.0).contains(&bearing), "{} -> {}: {}", a, b, bearing);
                let geodesic = GeoUtils::geodesic_bearing(a, b);
                assert!((0.0..360.0).contains(&geodesic), "{} -> {}: {}", a, b, geodesic);
            }
        }
    }

    #[test]
    fn reciprocal_bearing_on_the_equator() {
        let a = c(0.0, 10.0);
        let b = c(0.0, 12.0);
        let forward = GeoUtils::bearing(a, b);
        let back = GeoUtils::bearing(b, a);
        assert!(((forward + 180.0) % 360.0 - back).abs() < 1e-9);
    }

    #[test]
    fn coincident_points_give_finite_bearing() {
        let a = c(55.0, 60.0);
        assert!(GeoUtils::bearing(a, a).is_finite());
    }

    #[test]
    fn spherical_bearing_close_to_geodesic_for_short_legs() {
        let a = c(55.0, 60.0);
        let b = c(55.1, 60.2);
        let diff = (GeoUtils::bearing(a, b) - GeoUtils::geodesic_bearing(a, b)).abs();
        assert!(diff < 0.5, "diff {}", diff);
    }

    #[test]
    fn distance_is_symmetric_and_ellipsoidal() {
        let a = c(55.0, 60.0);
        let b = c(55.1, 60.2);
        assert!((GeoUtils::distance_km(a, b) - GeoUtils::distance_km(b, a)).abs() < 1e-9);

        // One degree of longitude on the WGS-84 equator
        let equator = GeoUtils::distance_km(c(0.0, 0.0), c(0.0, 1.0));
        assert!((equator - 111.319_491).abs() < 1e-3, "{}", equator);
    }

    #[test]
    fn destination_round_trip() {
        let pairs = [
            (c(55.0, 60.0), c(55.1, 60.2)),
            (c(36.0055, -5.6035), c(35.92, -5.48)),
            (c(50.0, -1.0), c(49.0, 2.5)),
        ];

        for (a, b) in pairs {
            let reached = GeoUtils::destination_point(
                a,
                GeoUtils::geodesic_bearing(a, b),
                GeoUtils::distance_km(a, b),
            );
            assert!(meters_apart(reached, b) < 0.5, "{} -> {} reached {}", a, b, reached);
        }
    }

    #[test]
    fn destination_toward_stays_on_the_line() {
        let a = c(55.0, 60.0);
        let b = c(55.1, 60.2);
        let total = GeoUtils::distance_km(a, b);
        let p = GeoUtils::destination_toward(a, b, 2.0);

        assert!((GeoUtils::distance_km(a, p) - 2.0).abs() < 1e-6);
        assert!((GeoUtils::distance_km(p, b) - (total - 2.0)).abs() < 1e-6);
    }

    #[test]
    fn midpoint_is_halfway() {
        let a = c(55.0, 60.0);
        let b = c(55.1, 60.2);
        let m = GeoUtils::midpoint(a, b);
        assert!((GeoUtils::distance_km(a, m) - GeoUtils::distance_km(m, b)).abs() < 1e-6);
    }

    #[test]
    fn path_points_count_and_endpoints() {
        let a = c(55.0, 60.0);
        let b = c(55.1, 60.2);

        for steps in [1, 10, 100] {
            let points: Vec<Coordinate> = GeoUtils::path_points(a, b, steps).collect();
            assert_eq!(points.len(), steps + 1);
            assert_eq!(points[0], a);
            assert_eq!(points[steps], b);
        }

        let zero: Vec<Coordinate> = GeoUtils::path_points(a, b, 0).collect();
        assert_eq!(zero, vec![a, b]);
    }

    #[test]
    fn path_points_follow_the_geodesic() {
        let a = c(50.0, -1.0);
        let b = c(49.0, 2.5);
        let points: Vec<Coordinate> = GeoUtils::path_points(a, b, 10).collect();

        let polyline_km: f64 = points
            .windows(2)
            .map(|w| GeoUtils::distance_km(w[0], w[1]))
            .sum();
        let direct_km = GeoUtils::distance_km(a, b);

        assert!((polyline_km - direct_km).abs() / direct_km < 1e-3);

        // Evenly spaced by distance
        let first_leg = GeoUtils::distance_km(points[0], points[1]);
        assert!((first_leg - direct_km / 10.0).abs() < 1e-6);
    }

    #[test]
    fn path_points_are_restartable() {
        let iter = GeoUtils::path_points(c(55.0, 60.0), c(55.1, 60.2), 10);
        assert_eq!(iter.len(), 11);

        let first: Vec<Coordinate> = iter.clone().collect();
        let second: Vec<Coordinate> = iter.collect();
        assert_eq!(first, second);
    }
}
