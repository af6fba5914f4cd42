//! Probe line intersection against polygon edges.
//!
//! This is the HOT PATH - every scanline tests every polygon edge.

use crate::geometry::{Point, Polygon};

// ============================================================================
// SEGMENT-SEGMENT INTERSECTION
// ============================================================================
//
// ## Rust Lesson #25: Option instead of sentinel values
//
// A crossing either exists or it doesn't. `Option<Point>` makes the caller
// handle the "no crossing" case; there is no `null` to forget about.

/// A crossing of a probe line with one polygon edge.
///
/// Edge `i` runs from vertex `i` to vertex `i + 1`; the last edge wraps
/// back to vertex 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub point: Point,
    pub edge_index: usize,
}

/// Intersect segment `p1-p2` with segment `p3-p4`.
///
/// Returns `None` for parallel or collinear segments (zero denominator) and
/// when either parameter falls outside `[0, 1]`.
#[inline]
pub fn segment_intersection(p1: Point, p2: Point, p3: Point, p4: Point) -> Option<Point> {
    let (x1, y1) = (p1.lon, p1.lat);
    let (x2, y2) = (p2.lon, p2.lat);
    let (x3, y3) = (p3.lon, p3.lat);
    let (x4, y4) = (p4.lon, p4.lat);

    let denom = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);

    // Parallel or coincident lines
    if denom == 0.0 {
        return None;
    }

    let t = ((x1 - x3) * (y3 - y4) - (y1 - y3) * (x3 - x4)) / denom;
    let u = -((x1 - x2) * (y1 - y3) - (y1 - y2) * (x1 - x3)) / denom;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(Point::new(x1 + t * (x2 - x1), y1 + t * (y2 - y1)))
    } else {
        None
    }
}

// ============================================================================
// PROBE-POLYGON INTERSECTION
// ============================================================================

/// Find every crossing of the probe segment with the polygon boundary,
/// closing edge included. Results are in edge order, not sorted.
///
/// A ring with fewer than two vertices has no edges and yields nothing.
pub fn polygon_intersections(probe: (Point, Point), polygon: &Polygon) -> Vec<Intersection> {
    if polygon.len() < 2 {
        return Vec::new();
    }

    polygon
        .edges()
        .filter_map(|(edge_index, a, b)| {
            segment_intersection(probe.0, probe.1, a, b).map(|point| Intersection { point, edge_index })
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
