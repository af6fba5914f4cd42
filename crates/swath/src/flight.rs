//! Flight line and plan types shared by the engine and the mission variants.

use crate::geometry::{path_length, Point, Polygon};
use crate::mission::MissionType;

/// Ground displacement applied to a line's scan points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LateralOffset {
    /// Distance in meters.
    pub meters: f64,
    /// Direction in degrees, flat lon/lat convention (0 = +lon, 90 = +lat).
    pub direction_deg: f64,
}

/// Per-line settings that ride along with the geometry.
///
/// These used to be loose nullable parameters; keeping them together means
/// every layer passes the same value through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineOptions {
    pub mission: MissionType,
    /// Photo spacing in meters. Carried through, never derived here.
    pub capture_interval: Option<f64>,
    /// Gimbal tilt recorded for the line (0 for top-down).
    pub gimbal_pitch_deg: f64,
    pub lateral_offset: Option<LateralOffset>,
}

/// Everything needed to sweep one polygon at one heading.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    pub polygon: Polygon,
    /// Distance between scanlines in meters.
    pub spacing: f64,
    pub start: Point,
    /// Landing point. `None` lands back at `start`.
    pub end: Option<Point>,
    /// Scan direction in degrees.
    pub heading: f64,
    /// Overshoot past the boundary in meters, clamped to `[0, 5000]`.
    pub margin: f64,
    pub options: LineOptions,
}

impl SweepConfig {
    pub fn new(polygon: Polygon, spacing: f64, start: Point) -> Self {
        Self {
            polygon,
            spacing,
            start,
            end: None,
            heading: 0.0,
            margin: 0.0,
            options: LineOptions::default(),
        }
    }

    pub fn with_end(mut self, end: Option<Point>) -> Self {
        self.end = end;
        self
    }

    pub fn with_heading(mut self, heading: f64) -> Self {
        self.heading = heading;
        self
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_options(mut self, options: LineOptions) -> Self {
        self.options = options;
        self
    }

    /// Where the line lands.
    #[inline]
    pub fn landing(&self) -> Point {
        self.end.unwrap_or(self.start)
    }
}

/// One generated flight line.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightLine {
    /// Full route: takeoff, every scan point, landing.
    pub path: Vec<Point>,
    /// Scan turn points only.
    pub waypoints: Vec<Point>,
    pub capture_points: Option<Vec<Point>>,
    pub capture_interval: Option<f64>,
    /// Heading the line was generated with, in degrees.
    pub heading: f64,
    pub options: LineOptions,
}

impl FlightLine {
    /// Route length in meters.
    pub fn length(&self) -> f64 {
        path_length(&self.path)
    }
}

/// The answer to a mission request: a primary route plus its variants.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightPlan {
    pub mission: MissionType,
    pub path: Vec<Point>,
    pub waypoints: Vec<Point>,
    pub capture_points: Option<Vec<Point>>,
    pub capture_interval: Option<f64>,
    /// 1 line for mapping, 5 for oblique, one per valid segment for strip.
    pub lines: Vec<FlightLine>,
}

impl FlightPlan {
    /// Plan whose primary route is one of its own lines.
    pub fn with_primary(mission: MissionType, primary: usize, lines: Vec<FlightLine>) -> Self {
        let (path, waypoints, capture_points, capture_interval) = match lines.get(primary) {
            Some(line) => (
                line.path.clone(),
                line.waypoints.clone(),
                line.capture_points.clone(),
                line.capture_interval,
            ),
            None => (Vec::new(), Vec::new(), None, None),
        };

        Self { mission, path, waypoints, capture_points, capture_interval, lines }
    }

    /// Primary route length in meters.
    pub fn length(&self) -> f64 {
        path_length(&self.path)
    }
}
