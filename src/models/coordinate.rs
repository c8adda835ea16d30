use serde::{Deserialize, Serialize};

/// A GPS fix as reported by the client device.
///
/// Out-of-range values are representable on purpose: field devices
/// occasionally deliver garbage fixes and a clock-in must never hard-fail
/// on one. Validity is checked where it matters (geofence membership).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// True when both components are finite and inside WGS84 bounds.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && self.lat.abs() <= 90.0
            && self.lon.abs() <= 180.0
    }

    /// Parse a CLI-style "lat,lon" pair.
    pub fn from_pair(s: &str) -> Option<Self> {
        let (lat, lon) = s.split_once(',')?;
        let lat: f64 = lat.trim().parse().ok()?;
        let lon: f64 = lon.trim().parse().ok()?;
        Some(Self { lat, lon })
    }
}
