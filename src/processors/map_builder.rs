use crate::{
    data_types::{
        coordinate::Coordinate,
        map::{MapPolyline, MapView, Marker, PolylineStyle, PositionMarker, SwimmerIcon},
        segment::SegmentRecord,
        Meters,
    },
    error::AppResult,
    logvbln,
    util::{
        geo::GeoUtils,
        settings::{ChallengeSettings, MapSettings},
    },
};

/// Builds the map for one segment and the distance swum inside it.
pub struct MapBuilder<'a> {
    map: &'a MapSettings,
    challenge: &'a ChallengeSettings,
}

impl<'a> MapBuilder<'a> {
    const CC: &'static str = "MapBuilder";

    pub fn new(map: &'a MapSettings, challenge: &'a ChallengeSettings) -> Self {
        Self { map, challenge }
    }

    /// Where the swimmer marker goes: the nominal progress ratio applied to
    /// the geodesic length of the segment.
    pub fn position_on_segment(segment: &SegmentRecord, travelled_m: Meters) -> Coordinate {
        let dist_on_map = GeoUtils::distance_km(segment.start, segment.finish) * 1000.0;

        let portion = if segment.length_m == 0 {
            1.0
        } else {
            (travelled_m as f64 / segment.length_m as f64).clamp(0.0, 1.0)
        };

        let graphical_distance = (portion * dist_on_map).round();

        GeoUtils::destination_toward(segment.start, segment.finish, graphical_distance / 1000.0)
    }

    pub fn build(&self, segment: &SegmentRecord, travelled_m: Meters) -> AppResult<MapView> {
        let start = segment.start;
        let finish = segment.finish;

        let current_point = MapBuilder::position_on_segment(segment, travelled_m);
        let bearing = GeoUtils::bearing(start, finish);
        let remaining_m = segment.length_m.saturating_sub(travelled_m);

        logvbln!(
            "segment {} -> {}: {} of {} m, bearing {:.1}",
            start,
            finish,
            travelled_m,
            segment.length_m,
            bearing
        );

        let markers = vec![
            Marker {
                coord: start,
                caption: caption(&self.challenge.default_start_caption, &segment.start_caption),
            },
            Marker {
                coord: finish,
                caption: caption(&self.challenge.default_finish_caption, &segment.finish_caption),
            },
        ];

        let travelled = MapPolyline::new(
            GeoUtils::path_points(start, current_point, self.map.travelled_steps).collect(),
            self.map
                .travelled_tooltip
                .replace("{travelled}", &travelled_m.to_string()),
            PolylineStyle {
                color: "#FF0000".to_string(),
                weight: 4,
                opacity: 1.0,
                dash_array: None,
            },
        )?;

        let route = MapPolyline::new(
            GeoUtils::path_points(start, finish, self.map.route_steps).collect(),
            self.map
                .route_tooltip
                .replace("{length}", &segment.length_m.to_string()),
            PolylineStyle {
                color: "#008000".to_string(),
                weight: 2,
                opacity: 0.3,
                dash_array: Some("5".to_string()),
            },
        )?;

        Ok(MapView {
            center: GeoUtils::midpoint(start, finish),
            zoom: self.map.zoom,
            markers,
            route,
            travelled,
            position: PositionMarker {
                coord: current_point,
                icon: SwimmerIcon::for_bearing(bearing),
                popup: self
                    .map
                    .position_popup
                    .replace("{remaining}", &remaining_m.to_string()),
                bearing,
            },
        })
    }
}

fn caption(default: &str, custom: &str) -> String {
    let custom = custom.trim();

    if custom.is_empty() {
        default.to_string()
    } else {
        format!("{}: {}", default, custom)
    }
}
