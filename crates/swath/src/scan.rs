//! Scanline coverage in a horizontally aligned frame.
//!
//! Probe lines run at constant latitude across the polygon's bounding box,
//! one every `spacing` meters. Each probe's crossings are paired up left to
//! right and the pairs are stitched into a back-and-forth route. Arbitrary
//! headings are handled by rotating into this frame first (see `frame`),
//! so there is only one code path here.
//!
//! ## Concave polygons
//!
//! A probe through a U-shaped area crosses the boundary four times. Pair
//! `k` on every scanline (the `k`-th lobe from the left) is collected into
//! pass `k`, and passes are flown one after the other. Odd passes are built
//! north to south so the drone does not fly back to the bottom before
//! starting the next lobe.

use std::collections::VecDeque;

use crate::geometry::{meters_per_deg_lon, Point, Polygon, METERS_PER_DEG_LAT};
use crate::intersect::{polygon_intersections, Intersection};

/// How far the probe line overhangs the bounding box on each side (degrees).
pub const PROBE_EPSILON_DEG: f64 = 0.01;

/// Upper bound for the boundary overshoot, in meters.
pub const MAX_MARGIN_M: f64 = 5000.0;

/// Clamp a margin to `[0, MAX_MARGIN_M]`. Non-finite input means no margin.
#[inline]
pub fn clamp_margin(margin: f64) -> f64 {
    if margin.is_finite() {
        margin.clamp(0.0, MAX_MARGIN_M)
    } else {
        0.0
    }
}

/// One rank of crossing pairs collected across all scanlines.
#[derive(Debug, Clone, Default)]
pub struct Pass {
    pairs: VecDeque<[Intersection; 2]>,
}

impl Pass {
    /// Add the pair `(left, right)` found at rank `rank` on the next
    /// scanline north.
    ///
    /// Even ranks append in natural order; odd ranks prepend reversed, so
    /// the pass reads north to south.
    fn add(&mut self, rank: usize, left: Intersection, right: Intersection) {
        if rank % 2 == 0 {
            self.pairs.push_back([left, right]);
        } else {
            self.pairs.push_front([right, left]);
        }
    }

    pub fn pairs(&self) -> impl Iterator<Item = &[Intersection; 2]> {
        self.pairs.iter()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Result of an aligned sweep.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AlignedSweep {
    pub path: Vec<Point>,
    pub waypoints: Vec<Point>,
    /// Scanlines that crossed the polygon at least twice.
    pub scanlines: usize,
    /// Pair count of each pass, in flight order.
    pub pass_pairs: Vec<usize>,
}

/// Build a zigzag route over `polygon`, scanning along constant latitude.
///
/// The route starts at `start`, visits every crossing pair, and lands at
/// `end` (or back at `start`). An empty polygon, or one no probe crosses,
/// degrades to a direct start-to-end line.
pub fn sweep_aligned(
    polygon: &Polygon,
    spacing: f64,
    start: Point,
    end: Option<Point>,
    margin: f64,
) -> AlignedSweep {
    let end = end.unwrap_or(start);

    let Some(bbox) = polygon.bounding_box() else {
        return direct_sweep(start, end);
    };

    let spacing_deg = spacing / METERS_PER_DEG_LAT;
    if !(spacing_deg.is_finite() && spacing_deg > 0.0) {
        return direct_sweep(start, end);
    }

    let margin = clamp_margin(margin);
    let probe_west = bbox.min.lon - PROBE_EPSILON_DEG;
    let probe_east = bbox.max.lon + PROBE_EPSILON_DEG;

    let mut passes: Vec<Pass> = Vec::new();
    let mut scanlines = 0;

    // Index-based so rounding does not accumulate over long areas
    let latitudes = (0u64..)
        .map(|i| bbox.min.lat + i as f64 * spacing_deg)
        .take_while(|lat| *lat <= bbox.max.lat);

    for lat in latitudes {
        let probe = (Point::new(probe_west, lat), Point::new(probe_east, lat));
        let mut hits = polygon_intersections(probe, polygon);
        if hits.len() < 2 {
            continue;
        }
        hits.sort_by(|a, b| a.point.lon.total_cmp(&b.point.lon));
        scanlines += 1;

        let margin_deg = if margin > 0.0 {
            margin / meters_per_deg_lon(lat)
        } else {
            0.0
        };

        // A trailing odd crossing (vertex graze) has no partner and is dropped
        for (rank, pair) in hits.chunks_exact(2).enumerate() {
            let mut left = pair[0];
            let mut right = pair[1];
            left.point.lon -= margin_deg;
            right.point.lon += margin_deg;

            if passes.len() <= rank {
                passes.push(Pass::default());
            }
            passes[rank].add(rank, left, right);
        }
    }

    if passes.iter().all(Pass::is_empty) {
        return direct_sweep(start, end);
    }

    let pair_count: usize = passes.iter().map(Pass::len).sum();
    let mut path = Vec::with_capacity(pair_count * 2 + 2);
    let mut waypoints = Vec::with_capacity(pair_count * 2);
    path.push(start);

    // Forward/backward alternates across the whole route, not per pass
    let mut forward = true;
    for pass in &passes {
        for [a, b] in pass.pairs() {
            let (first, second) = if forward { (a, b) } else { (b, a) };
            path.push(first.point);
            path.push(second.point);
            waypoints.push(first.point);
            waypoints.push(second.point);
            forward = !forward;
        }
    }

    path.push(end);

    AlignedSweep {
        path,
        waypoints,
        scanlines,
        pass_pairs: passes.iter().map(Pass::len).collect(),
    }
}

/// Straight line from takeoff to landing, no scanning.
fn direct_sweep(start: Point, end: Point) -> AlignedSweep {
    let (path, waypoints) = if end == start {
        (vec![start], Vec::new())
    } else {
        (vec![start, end], vec![end])
    };

    AlignedSweep { path, waypoints, scanlines: 0, pass_pairs: Vec::new() }
}

// ============================================================================
// TESTS
// ============================================================================
