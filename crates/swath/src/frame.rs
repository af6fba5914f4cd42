//! Arbitrary scan headings on top of the aligned scanline engine.
//!
//! The polygon and both anchors are rotated by `-heading` about the
//! polygon's vertex centroid, swept horizontally, and the result rotated
//! back by `+heading` about the same pivot. Because both rotations share
//! one pivot, the round trip leaves the geometry where it started whatever
//! the sign convention of `heading`.

use crate::diagnostics::Diagnostics;
use crate::flight::{FlightLine, LateralOffset, SweepConfig};
use crate::geometry::{normalize_angle, rotate_points, Point};
use crate::scan::sweep_aligned;

/// Generate one flight line for `config`.
pub fn generate_flight_line(config: SweepConfig, diag: &Diagnostics<'_>) -> FlightLine {
    let landing = config.landing();
    let SweepConfig { polygon, spacing, start, end, heading, margin, options } = config;

    let polygon = polygon.normalized();
    let pivot = polygon.centroid().unwrap_or(start);

    let aligned = polygon.rotated(pivot, -heading);
    let aligned_start = start.rotated(pivot, -heading);
    let aligned_end = end.map(|p| p.rotated(pivot, -heading));

    let sweep = sweep_aligned(&aligned, spacing, aligned_start, aligned_end, margin);

    diag.debug(format_args!(
        "heading {:.2}: {} scanlines, passes {:?}, {} waypoints",
        normalize_angle(heading),
        sweep.scanlines,
        sweep.pass_pairs,
        sweep.waypoints.len(),
    ));

    let scanned = !sweep.pass_pairs.is_empty();
    let mut path = rotate_points(&sweep.path, pivot, heading);
    let mut waypoints = rotate_points(&sweep.waypoints, pivot, heading);

    // Anchors are the caller's own coordinates, not their rotated round trip
    if let Some(first) = path.first_mut() {
        *first = start;
    }
    if path.len() > 1 {
        if let Some(last) = path.last_mut() {
            *last = landing;
        }
    }
    if !scanned {
        waypoints = if landing == start { Vec::new() } else { vec![landing] };
    }

    if let Some(offset) = options.lateral_offset.filter(|_| scanned) {
        apply_lateral_offset(&mut path, &mut waypoints, offset);
        diag.debug(format_args!(
            "lateral offset {:.3} m toward {:.2}",
            offset.meters, offset.direction_deg
        ));
    }

    FlightLine {
        path,
        waypoints,
        capture_points: None,
        capture_interval: options.capture_interval,
        heading: normalize_angle(heading),
        options,
    }
}

/// Shift scan points by `offset`, leaving the takeoff and landing anchors.
fn apply_lateral_offset(path: &mut [Point], waypoints: &mut [Point], offset: LateralOffset) {
    if offset.meters == 0.0 || !offset.meters.is_finite() {
        return;
    }

    let shift = |p: &mut Point| *p = p.offset_by(offset.meters, offset.direction_deg);

    if path.len() > 2 {
        let last = path.len() - 1;
        path[1..last].iter_mut().for_each(shift);
    }
    waypoints.iter_mut().for_each(shift);
}
