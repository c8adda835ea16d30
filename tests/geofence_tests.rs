use fieldledger::core::geofence::{distance_m, is_within, verdict};
use fieldledger::models::coordinate::Coordinate;
use fieldledger::models::geofence::Geofence;

fn circle(lat: f64, lon: f64, radius_m: f64) -> Geofence {
    Geofence::Circle {
        center: Coordinate::new(lat, lon),
        radius_m,
    }
}

fn square() -> Geofence {
    Geofence::Polygon {
        vertices: vec![
            Coordinate::new(45.000, 7.000),
            Coordinate::new(45.000, 7.010),
            Coordinate::new(45.010, 7.010),
            Coordinate::new(45.010, 7.000),
        ],
    }
}

#[test]
fn test_distance_between_identical_points_is_zero() {
    let p = Coordinate::new(45.0703, 7.6869);
    assert_eq!(distance_m(p, p), 0.0);
}

#[test]
fn test_distance_one_degree_latitude() {
    // One degree of latitude is about 111 km everywhere.
    let a = Coordinate::new(45.0, 7.0);
    let b = Coordinate::new(46.0, 7.0);
    let d = distance_m(a, b);
    assert!((d - 111_000.0).abs() < 500.0, "got {d}");
}

#[test]
fn test_point_inside_circle() {
    let fence = circle(45.0703, 7.6869, 250.0);
    assert!(is_within(Coordinate::new(45.0703, 7.6869), &fence));
    // ~110 m north of center.
    assert!(is_within(Coordinate::new(45.0713, 7.6869), &fence));
    // ~1.1 km north.
    assert!(!is_within(Coordinate::new(45.0803, 7.6869), &fence));
}

#[test]
fn test_point_inside_polygon() {
    let fence = square();
    assert!(is_within(Coordinate::new(45.005, 7.005), &fence));
    assert!(!is_within(Coordinate::new(45.020, 7.005), &fence));
    assert!(!is_within(Coordinate::new(44.999, 7.005), &fence));
}

#[test]
fn test_degenerate_polygon_contains_nothing() {
    let fence = Geofence::Polygon {
        vertices: vec![Coordinate::new(45.0, 7.0), Coordinate::new(45.0, 7.1)],
    };
    assert!(!is_within(Coordinate::new(45.0, 7.05), &fence));
}

#[test]
fn test_invalid_fix_is_never_inside() {
    let fence = circle(45.0703, 7.6869, 250.0);
    assert!(!is_within(Coordinate::new(91.0, 7.6869), &fence));
    assert!(!is_within(Coordinate::new(45.0703, 181.0), &fence));
    assert!(!is_within(Coordinate::new(f64::NAN, 7.6869), &fence));
    assert!(!is_within(Coordinate::new(f64::INFINITY, 7.6869), &fence));
}

#[test]
fn test_negative_radius_is_never_inside() {
    let fence = circle(45.0703, 7.6869, -1.0);
    assert!(!is_within(Coordinate::new(45.0703, 7.6869), &fence));
}

#[test]
fn test_verdict_requires_a_fix_and_a_fence() {
    let fences = [circle(45.0703, 7.6869, 250.0), square()];

    assert_eq!(verdict(None, &fences), None);
    assert_eq!(verdict(Some(Coordinate::new(45.005, 7.005)), &[]), None);

    // Inside any one fence is enough.
    assert_eq!(
        verdict(Some(Coordinate::new(45.005, 7.005)), &fences),
        Some(true)
    );
    assert_eq!(
        verdict(Some(Coordinate::new(48.0, 2.0)), &fences),
        Some(false)
    );
}
