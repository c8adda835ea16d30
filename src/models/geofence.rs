use super::coordinate::Coordinate;
use serde::{Deserialize, Serialize};

/// A project site's allowed work area.
///
/// Loaded from the project registry (site file in the CLI); the engine only
/// ever asks "is this point inside".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum Geofence {
    Circle {
        center: Coordinate,
        radius_m: f64,
    },
    Polygon {
        vertices: Vec<Coordinate>,
    },
}
