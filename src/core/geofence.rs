//! Pure geofence membership predicate.
//!
//! Never errors: GPS hardware intermittently reports invalid fixes, and a
//! check-in attempt must not hard-fail on one. Any coordinate outside
//! WGS84 bounds (or non-finite) is simply "not inside".

use crate::models::coordinate::Coordinate;
use crate::models::geofence::Geofence;

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance in meters (haversine).
pub fn distance_m(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Ray-cast point-in-polygon over (lat, lon) treated as planar.
/// Fine at site scale; boundary points may fall either side.
fn point_in_polygon(p: Coordinate, vertices: &[Coordinate]) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = vertices.len() - 1;

    for i in 0..vertices.len() {
        let vi = vertices[i];
        let vj = vertices[j];

        let crosses = (vi.lat > p.lat) != (vj.lat > p.lat);
        if crosses {
            let x = (vj.lon - vi.lon) * (p.lat - vi.lat) / (vj.lat - vi.lat) + vi.lon;
            if p.lon < x {
                inside = !inside;
            }
        }
        j = i;
    }

    inside
}

/// Is the coordinate inside the project's allowed work area.
pub fn is_within(coord: Coordinate, fence: &Geofence) -> bool {
    if !coord.is_valid() {
        return false;
    }

    match fence {
        Geofence::Circle { center, radius_m } => {
            center.is_valid() && *radius_m >= 0.0 && distance_m(coord, *center) <= *radius_m
        }
        Geofence::Polygon { vertices } => point_in_polygon(coord, vertices),
    }
}

/// Advisory verdict for a clock event against a set of candidate fences:
/// inside any fence → Some(true); outside all → Some(false); nothing to
/// check (no coordinate supplied, or no fence on record) → None.
pub fn verdict(coord: Option<Coordinate>, fences: &[Geofence]) -> Option<bool> {
    let coord = coord?;
    if fences.is_empty() {
        return None;
    }
    Some(fences.iter().any(|f| is_within(coord, f)))
}
