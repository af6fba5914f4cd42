//! JSON response shape.

use serde::Serialize;
use swath::{FlightLine, FlightPlan, Point};

type Coord = [f64; 2];

/// The planner's answer in wire form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    pub mission_type: &'static str,
    pub path: Vec<Coord>,
    pub waypoints: Vec<Coord>,
    pub capture_points: Vec<Coord>,
    pub capture_interval: Option<f64>,
    /// Primary route length in meters
    pub path_length: f64,
    pub lines: Vec<LineResponse>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineResponse {
    pub path: Vec<Coord>,
    pub waypoints: Vec<Coord>,
    pub capture_points: Vec<Coord>,
    pub heading: f64,
}

fn coords(points: &[Point]) -> Vec<Coord> {
    points.iter().map(|p| [p.lon, p.lat]).collect()
}

fn capture_coords(points: Option<&[Point]>) -> Vec<Coord> {
    points.map(coords).unwrap_or_default()
}

impl From<&FlightLine> for LineResponse {
    fn from(line: &FlightLine) -> Self {
        Self {
            path: coords(&line.path),
            waypoints: coords(&line.waypoints),
            capture_points: capture_coords(line.capture_points.as_deref()),
            heading: line.heading,
        }
    }
}

impl From<&FlightPlan> for PlanResponse {
    fn from(plan: &FlightPlan) -> Self {
        Self {
            mission_type: plan.mission.name(),
            path: coords(&plan.path),
            waypoints: coords(&plan.waypoints),
            capture_points: capture_coords(plan.capture_points.as_deref()),
            capture_interval: plan.capture_interval,
            path_length: plan.length(),
            lines: plan.lines.iter().map(LineResponse::from).collect(),
        }
    }
}
