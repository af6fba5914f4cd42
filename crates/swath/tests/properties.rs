//! Property tests for the planner's geometric guarantees.

use proptest::prelude::*;

use swath::geometry::{rotate_points, METERS_PER_DEG_LAT};
use swath::{
    generate_flight_line, plan_mission, sweep_aligned, Diagnostics, MissionRequest, MissionType, Point,
    Polygon, StripSegment, SweepConfig,
};

fn rect(lon0: f64, lat0: f64, width: f64, height: f64) -> Polygon {
    Polygon::from_coords(&[
        [lon0, lat0],
        [lon0, lat0 + height],
        [lon0 + width, lat0 + height],
        [lon0 + width, lat0],
    ])
}

/// Scan segments as `(west, east)` pairs, sorted south to north.
///
/// Pairs on the bottom probe (which only grazes the boundary) are left out;
/// whether that probe yields a pair depends on rounding in the last bit.
fn interior_segments(waypoints: &[Point], bottom_lat: f64) -> Vec<(Point, Point)> {
    let mut segments: Vec<(Point, Point)> = waypoints
        .chunks_exact(2)
        .map(|pair| {
            if pair[0].lon <= pair[1].lon {
                (pair[0], pair[1])
            } else {
                (pair[1], pair[0])
            }
        })
        .filter(|(a, _)| (a.lat - bottom_lat).abs() > 1e-9)
        .collect();
    segments.sort_by(|a, b| a.0.lat.total_cmp(&b.0.lat).then(a.0.lon.total_cmp(&b.0.lon)));
    segments
}

fn close(a: Point, b: Point) -> bool {
    (a.lon - b.lon).abs() < 1e-6 && (a.lat - b.lat).abs() < 1e-6
}

proptest! {
    #[test]
    fn normalize_is_idempotent(
        coords in prop::collection::vec((0i32..3, 0i32..3), 0..8),
        closing_copies in 0usize..3,
    ) {
        let mut vertices: Vec<Point> = coords.iter().map(|&(x, y)| Point::new(x as f64, y as f64)).collect();
        if let Some(&first) = vertices.first() {
            vertices.extend(std::iter::repeat(first).take(closing_copies));
        }
        let polygon = Polygon::new(vertices);
        let once = polygon.normalized();
        prop_assert_eq!(once.normalized(), once.clone());
        prop_assert_eq!(once.is_empty(), polygon.is_empty());
    }

    #[test]
    fn rotating_input_and_heading_rotates_output(
        lon0 in -10.0f64..10.0,
        lat0 in -50.0f64..50.0,
        width in 0.002f64..0.02,
        rows in 2usize..8,
        spacing in 20.0f64..80.0,
        theta in -180.0f64..180.0,
    ) {
        // Top edge sits half a spacing above the last scanline
        let height = (rows as f64 + 0.5) * spacing / METERS_PER_DEG_LAT;
        let polygon = rect(lon0, lat0, width, height);
        let pivot = polygon.centroid().unwrap();
        let start = Point::new(lon0 - 0.001, lat0 - 0.001);
        let diag = Diagnostics::silent();

        let base = generate_flight_line(SweepConfig::new(polygon.clone(), spacing, start), &diag);
        let turned = generate_flight_line(
            SweepConfig::new(polygon.rotated(pivot, theta), spacing, start.rotated(pivot, theta))
                .with_heading(theta),
            &diag,
        );

        let expected = interior_segments(&base.waypoints, lat0);
        let actual = interior_segments(&rotate_points(&turned.waypoints, pivot, -theta), lat0);

        prop_assert_eq!(expected.len(), actual.len());
        for (e, a) in expected.iter().zip(&actual) {
            prop_assert!(close(e.0, a.0) && close(e.1, a.1), "{:?} vs {:?}", e, a);
        }
        prop_assert!(close(turned.path[0], start.rotated(pivot, theta)));
    }

    #[test]
    fn skewed_quad_full_path_is_rotation_invariant(
        lon0 in -10.0f64..10.0,
        lat0 in -50.0f64..50.0,
        theta in -180.0f64..180.0,
    ) {
        // No horizontal edges, and no vertex sits on an interior scanline
        let polygon = Polygon::from_coords(&[
            [lon0, lat0 + 0.0003],
            [lon0 + 0.004, lat0],
            [lon0 + 0.005, lat0 + 0.0042],
            [lon0 + 0.0008, lat0 + 0.0035],
        ]);
        let pivot = polygon.centroid().unwrap();
        let start = Point::new(lon0 - 0.001, lat0 - 0.001);
        let end = Point::new(lon0 + 0.006, lat0 - 0.001);
        let diag = Diagnostics::silent();

        let base = generate_flight_line(
            SweepConfig::new(polygon.clone(), 37.0, start).with_end(Some(end)),
            &diag,
        );
        let turned = generate_flight_line(
            SweepConfig::new(polygon.rotated(pivot, theta), 37.0, start.rotated(pivot, theta))
                .with_end(Some(end.rotated(pivot, theta)))
                .with_heading(theta),
            &diag,
        );

        let expected = rotate_points(&base.path, pivot, theta);
        prop_assert_eq!(expected.len(), turned.path.len());
        for (e, a) in expected.iter().zip(&turned.path) {
            prop_assert!(close(*e, *a), "{:?} vs {:?}", e, a);
        }
    }

    #[test]
    fn margin_beyond_cap_equals_cap(
        margin in 5000.0f64..1.0e7,
        spacing in 20.0f64..200.0,
    ) {
        let polygon = rect(1.0, 1.0, 0.01, 0.01);
        let start = Point::new(0.99, 0.99);
        let capped = sweep_aligned(&polygon, spacing, start, None, 5000.0);
        let over = sweep_aligned(&polygon, spacing, start, None, margin);
        prop_assert_eq!(capped, over);
    }

    #[test]
    fn convex_sweep_alternates_and_climbs(
        lon0 in -20.0f64..20.0,
        lat0 in -60.0f64..60.0,
        width in 0.001f64..0.05,
        height in 0.001f64..0.05,
        spacing in 10.0f64..300.0,
    ) {
        let polygon = rect(lon0, lat0, width, height);
        let sweep = sweep_aligned(&polygon, spacing, Point::new(lon0, lat0), None, 0.0);
        prop_assert_eq!(sweep.pass_pairs.len(), 1);

        let pairs: Vec<&[Point]> = sweep.waypoints.chunks_exact(2).collect();
        for (i, pair) in pairs.iter().enumerate() {
            prop_assert_eq!(pair[0].lat, pair[1].lat);
            if i % 2 == 0 {
                prop_assert!(pair[0].lon < pair[1].lon);
            } else {
                prop_assert!(pair[0].lon > pair[1].lon);
            }
        }
        for window in pairs.windows(2) {
            let (prev, next) = (window[0], window[1]);
            prop_assert!(prev[0].lat < next[0].lat);
            // Each pass starts on the side the previous one ended
            prop_assert!(prev[1].distance(next[0]) <= prev[1].distance(next[1]));
        }
    }

    #[test]
    fn strip_path_is_sum_of_trimmed_segments(
        lengths in prop::collection::vec(0.002f64..0.02, 1..5),
        spacing in 20.0f64..80.0,
    ) {
        let mut lon = 0.0;
        let segments: Vec<StripSegment> = lengths
            .iter()
            .enumerate()
            .map(|(i, len)| {
                let (west, east) = (lon, lon + len);
                lon = east;
                StripSegment {
                    index: i as i64,
                    p1: Some(Point::new(west, 0.0)),
                    p2: Some(Point::new(east, 0.0)),
                    corners: vec![
                        Point::new(west, 0.001),
                        Point::new(east, 0.001),
                        Point::new(east, -0.001),
                        Point::new(west, -0.001),
                    ],
                }
            })
            .collect();

        let request = MissionRequest {
            mission_type: MissionType::Strip,
            segments,
            ..MissionRequest::new(Polygon::default(), spacing, Point::new(0.0, 0.0))
        };
        let plan = plan_mission(&request, &Diagnostics::silent()).unwrap();

        prop_assert_eq!(plan.lines.len(), lengths.len());
        let expected: usize = plan
            .lines
            .iter()
            .filter(|line| line.path.len() >= 2)
            .map(|line| line.path.len() - 2)
            .sum();
        prop_assert_eq!(plan.path.len(), expected);
    }
}
