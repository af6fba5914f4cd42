//! Strip (corridor) missions.
//!
//! A corridor arrives pre-cut into segments, each a rectangle with a
//! centerline `p1 -> p2`. Every segment is swept on its own along its
//! centerline bearing, then the per-segment routes are stitched into one.
//!
//! ## Rust Lesson #24: Parallel Map, Ordered Collect
//!
//! Segments don't depend on each other, so they go through rayon's
//! `par_iter()`. `collect()` on an indexed parallel iterator keeps input
//! order no matter which thread finishes first, so `lines[i]` is always
//! segment `i`.

use rayon::prelude::*;

use super::{MissionParams, MissionType};
use crate::diagnostics::Diagnostics;
use crate::flight::{FlightLine, FlightPlan, LineOptions, SweepConfig};
use crate::frame::generate_flight_line;
use crate::geometry::{Point, Polygon};
use crate::projection::planar_bearing;

/// One corridor segment as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StripSegment {
    pub index: i64,
    /// Centerline start.
    pub p1: Option<Point>,
    /// Centerline end.
    pub p2: Option<Point>,
    /// `(leftFront, leftBack, rightBack, rightFront)`.
    pub corners: Vec<Point>,
}

/// A segment that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ValidSegment {
    pub index: i64,
    pub p1: Point,
    pub p2: Point,
    pub corners: [Point; 4],
}

impl ValidSegment {
    fn from_segment(segment: &StripSegment) -> Result<Self, &'static str> {
        let p1 = segment.p1.filter(Point::is_finite).ok_or("missing or non-finite p1")?;
        let p2 = segment.p2.filter(Point::is_finite).ok_or("missing or non-finite p2")?;

        let corners: Vec<Point> = segment
            .corners
            .iter()
            .copied()
            .filter(Point::is_finite)
            .take(4)
            .collect();
        let corners: [Point; 4] = corners.try_into().map_err(|_| "fewer than 4 usable corners")?;

        Ok(Self { index: segment.index, p1, p2, corners })
    }

    /// The corner rectangle, closed by repeating its first corner.
    fn polygon(&self) -> Polygon {
        let mut vertices = self.corners.to_vec();
        vertices.push(self.corners[0]);
        Polygon::new(vertices)
    }

    fn heading(&self) -> f64 {
        planar_bearing(self.p1, self.p2)
    }
}

/// Split segments into the usable ones and a count of the rest.
pub(crate) fn validate_segments(
    segments: &[StripSegment],
    diag: &Diagnostics<'_>,
) -> (Vec<ValidSegment>, usize) {
    let mut valid = Vec::with_capacity(segments.len());
    let mut rejected = 0;

    for segment in segments {
        match ValidSegment::from_segment(segment) {
            Ok(segment) => valid.push(segment),
            Err(reason) => {
                rejected += 1;
                diag.warn(format_args!("dropping strip segment {}: {}", segment.index, reason));
            }
        }
    }

    (valid, rejected)
}

pub(crate) fn plan(params: &MissionParams, diag: &Diagnostics<'_>) -> FlightPlan {
    let options = LineOptions {
        mission: MissionType::Strip,
        capture_interval: params.capture_interval,
        ..LineOptions::default()
    };

    let lines: Vec<FlightLine> = params
        .segments
        .par_iter()
        .map(|segment| {
            let heading = segment.heading();
            diag.debug(format_args!("strip segment {} heading {:.2}", segment.index, heading));
            let config = SweepConfig::new(segment.polygon(), params.spacing, segment.p1)
                .with_end(Some(segment.p2))
                .with_heading(heading)
                .with_options(options);
            generate_flight_line(config, diag)
        })
        .collect();

    stitch(lines, params.capture_interval)
}

/// Concatenate per-segment routes, dropping each segment's own anchors.
fn stitch(lines: Vec<FlightLine>, capture_interval: Option<f64>) -> FlightPlan {
    let mut path = Vec::new();
    let mut waypoints = Vec::new();
    let mut capture_points: Option<Vec<Point>> = None;

    for line in &lines {
        if line.path.len() >= 2 {
            path.extend_from_slice(&line.path[1..line.path.len() - 1]);
        }
        // Waypoints go in untrimmed. A segment nothing crosses degrades to
        // `[p1, p2]` with waypoint `p2`, which then has no matching path point.
        waypoints.extend_from_slice(&line.waypoints);
        if let Some(points) = &line.capture_points {
            capture_points.get_or_insert_with(Vec::new).extend_from_slice(points);
        }
    }

    FlightPlan {
        mission: MissionType::Strip,
        path,
        waypoints,
        capture_points,
        capture_interval,
        lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::testing::Capture;
    use crate::mission::{plan_mission, MissionRequest};
    use log::Level;

    /// Segment running east from `lon0` to `lon1` along the equator, 0.002 wide.
    fn east_segment(index: i64, lon0: f64, lon1: f64) -> StripSegment {
        StripSegment {
            index,
            p1: Some(Point::new(lon0, 0.0)),
            p2: Some(Point::new(lon1, 0.0)),
            corners: vec![
                Point::new(lon0, 0.001),
                Point::new(lon1, 0.001),
                Point::new(lon1, -0.001),
                Point::new(lon0, -0.001),
            ],
        }
    }

    fn strip_request(segments: Vec<StripSegment>) -> MissionRequest {
        MissionRequest {
            mission_type: MissionType::Strip,
            segments,
            ..MissionRequest::new(Polygon::default(), 40.0, Point::new(0.0, 0.0))
        }
    }

    #[test]
    fn rejects_short_corner_lists() {
        let mut segment = east_segment(0, 0.0, 0.01);
        segment.corners.truncate(3);
        assert!(ValidSegment::from_segment(&segment).is_err());

        segment.corners.push(Point::new(f64::NAN, 0.0));
        assert!(ValidSegment::from_segment(&segment).is_err());
    }

    #[test]
    fn extra_corners_are_ignored() {
        let mut segment = east_segment(0, 0.0, 0.01);
        segment.corners.insert(1, Point::new(f64::NAN, 1.0));
        segment.corners.push(Point::new(9.0, 9.0));
        let valid = ValidSegment::from_segment(&segment).unwrap();
        assert_eq!(valid.corners[1], Point::new(0.01, 0.001));
        assert_eq!(valid.polygon().len(), 5);
    }

    #[test]
    fn missing_centerline_is_rejected() {
        let mut segment = east_segment(0, 0.0, 0.01);
        segment.p2 = None;
        assert!(ValidSegment::from_segment(&segment).is_err());
    }

    #[test]
    fn invalid_segments_are_dropped_with_a_warning() {
        let capture = Capture::default();
        let mut broken = east_segment(1, 0.01, 0.02);
        broken.p1 = None;
        let request = strip_request(vec![east_segment(0, 0.0, 0.01), broken]);

        let plan = plan_mission(&request, &Diagnostics::new(&capture)).unwrap();
        assert_eq!(plan.lines.len(), 1);
        assert_eq!(capture.messages_at(Level::Warn).len(), 1);
    }

    #[test]
    fn all_invalid_is_fatal() {
        let mut broken = east_segment(0, 0.0, 0.01);
        broken.corners.clear();
        let err = plan_mission(&strip_request(vec![broken]), &Diagnostics::silent()).unwrap_err();
        assert_eq!(err, crate::error::PlanError::NoValidSegments { rejected: 1 });
    }

    #[test]
    fn stitched_path_drops_segment_anchors() {
        let request = strip_request(vec![east_segment(0, 0.0, 0.01), east_segment(1, 0.01, 0.02)]);
        let plan = plan_mission(&request, &Diagnostics::silent()).unwrap();

        let expected: usize = plan
            .lines
            .iter()
            .filter(|l| l.path.len() >= 2)
            .map(|l| l.path.len() - 2)
            .sum();
        assert_eq!(plan.path.len(), expected);
        let waypoint_total: usize = plan.lines.iter().map(|l| l.waypoints.len()).sum();
        assert_eq!(plan.waypoints.len(), waypoint_total);
        assert!(plan.capture_points.is_none());
    }

    #[test]
    fn uncrossed_segment_keeps_its_landing_waypoint() {
        // Zero-width rectangle on the centerline: no probe crosses it
        let mut flat = east_segment(1, 0.01, 0.02);
        flat.corners = vec![
            Point::new(0.01, 0.0),
            Point::new(0.02, 0.0),
            Point::new(0.02, 0.0),
            Point::new(0.01, 0.0),
        ];
        let request = strip_request(vec![east_segment(0, 0.0, 0.01), flat]);
        let plan = plan_mission(&request, &Diagnostics::silent()).unwrap();

        let p2 = Point::new(0.02, 0.0);
        assert_eq!(plan.lines[1].path, vec![Point::new(0.01, 0.0), p2]);
        assert_eq!(plan.lines[1].waypoints, vec![p2]);
        assert_eq!(plan.waypoints.last(), Some(&p2));
        assert!(!plan.path.contains(&p2));
    }

    #[test]
    fn lines_keep_segment_order_and_anchors() {
        let segments: Vec<_> = (0..6)
            .map(|i| east_segment(i, i as f64 * 0.01, (i + 1) as f64 * 0.01))
            .collect();
        let plan = plan_mission(&strip_request(segments), &Diagnostics::silent()).unwrap();
        assert_eq!(plan.lines.len(), 6);
        for (i, line) in plan.lines.iter().enumerate() {
            assert_eq!(line.path.first(), Some(&Point::new(i as f64 * 0.01, 0.0)));
            assert_eq!(line.path.last(), Some(&Point::new((i + 1) as f64 * 0.01, 0.0)));
        }
    }

    #[test]
    fn heading_follows_centerline() {
        let mut north = east_segment(0, 0.0, 0.0);
        north.p2 = Some(Point::new(0.0, 0.01));
        let valid = ValidSegment::from_segment(&north).unwrap();
        assert!((valid.heading() - 90.0).abs() < 1e-9);
        assert!(ValidSegment::from_segment(&east_segment(0, 0.0, 0.01)).unwrap().heading().abs() < 1e-9);
    }

    #[test]
    fn capture_interval_is_carried_to_the_merged_plan() {
        let request = MissionRequest {
            capture_interval: Some(18.0),
            ..strip_request(vec![east_segment(0, 0.0, 0.01)])
        };
        let plan = plan_mission(&request, &Diagnostics::silent()).unwrap();
        assert_eq!(plan.capture_interval, Some(18.0));
        assert_eq!(plan.lines[0].capture_interval, Some(18.0));
    }
}
