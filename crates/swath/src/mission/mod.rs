//! Mission types, request validation and dispatch.
//!
//! A [`MissionRequest`] is validated exactly once, before any geometry runs.
//! Fatal problems come back as [`PlanError`]; soft ones (an empty survey
//! area, a broken strip segment) are logged and planning carries on.

mod mapping;
mod oblique;
mod strip;

pub use oblique::{clamp_tilt, MAX_TILT_DEG};
pub use strip::StripSegment;

use crate::diagnostics::Diagnostics;
use crate::error::PlanError;
use crate::flight::{FlightPlan, SweepConfig};
use crate::geometry::{Point, Polygon};
use crate::scan::clamp_margin;

use strip::ValidSegment;

/// Available mission types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MissionType {
    /// Single top-down boustrophedon sweep.
    #[default]
    Mapping,
    /// Five sweeps for tilted-camera capture.
    Oblique,
    /// Corridor coverage stitched from per-segment rectangles.
    Strip,
}

impl MissionType {
    /// All mission types.
    pub fn all() -> &'static [MissionType] {
        &[MissionType::Mapping, MissionType::Oblique, MissionType::Strip]
    }

    /// Mission name as used on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            MissionType::Mapping => "mapping",
            MissionType::Oblique => "oblique",
            MissionType::Strip => "strip",
        }
    }

    /// Brief description for listings.
    pub fn description(&self) -> &'static str {
        match self {
            MissionType::Mapping => "Top-down lawnmower sweep over the survey polygon",
            MissionType::Oblique => "Top-down plus four tilted sweeps (forward, reverse, right, left)",
            MissionType::Strip => "Corridor sweep stitched from per-segment rectangles",
        }
    }

    /// Parse mission type from string.
    pub fn from_name(name: &str) -> Option<MissionType> {
        match name.to_lowercase().as_str() {
            "mapping" | "map" | "survey" => Some(MissionType::Mapping),
            "oblique" | "tilt" => Some(MissionType::Oblique),
            "strip" | "corridor" => Some(MissionType::Strip),
            _ => None,
        }
    }
}

/// A planning request as it arrives from the boundary.
///
/// Optional fields mirror the wire format; [`plan_mission`] fills in the
/// defaults (angle 0, margin 0, land at takeoff, no tilt, no offset).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MissionRequest {
    /// Survey area. May be empty for strip missions.
    pub polygon: Polygon,
    /// Scanline spacing in meters.
    pub spacing: f64,
    pub start_point: Option<Point>,
    pub end_point: Option<Point>,
    /// Scan heading in degrees.
    pub angle: Option<f64>,
    /// Boundary overshoot in meters.
    pub margin: Option<f64>,
    pub mission_type: MissionType,
    /// Gimbal tilt in degrees, oblique only.
    pub gimbal_tilt: Option<f64>,
    /// Lateral ground offset in meters, oblique only.
    pub lateral_offset: Option<f64>,
    /// Photo spacing in meters, passed through untouched.
    pub capture_interval: Option<f64>,
    /// Corridor segments, strip only.
    pub segments: Vec<StripSegment>,
}

impl MissionRequest {
    pub fn new(polygon: Polygon, spacing: f64, start_point: Point) -> Self {
        Self {
            polygon,
            spacing,
            start_point: Some(start_point),
            ..Self::default()
        }
    }
}

/// Validated, defaulted request parameters.
#[derive(Debug, Clone)]
pub(crate) struct MissionParams {
    pub polygon: Polygon,
    pub spacing: f64,
    pub start: Point,
    pub end: Option<Point>,
    pub angle: f64,
    pub margin: f64,
    pub capture_interval: Option<f64>,
    pub gimbal_tilt: f64,
    pub lateral_offset: f64,
    pub segments: Vec<ValidSegment>,
}

impl MissionParams {
    fn validate(request: &MissionRequest, diag: &Diagnostics<'_>) -> Result<Self, PlanError> {
        let start = match request.start_point {
            None => return Err(PlanError::InvalidStartPoint("missing".to_string())),
            Some(p) if !p.is_finite() => {
                return Err(PlanError::InvalidStartPoint(format!("[{}, {}]", p.lon, p.lat)));
            }
            Some(p) => p,
        };

        if !(request.spacing.is_finite() && request.spacing > 0.0) {
            return Err(PlanError::InvalidSpacing(request.spacing));
        }

        let end = match request.end_point {
            Some(p) if !p.is_finite() => {
                diag.warn(format_args!("ignoring non-finite end point, landing at takeoff"));
                None
            }
            other => other,
        };

        let vertices: Vec<Point> = request
            .polygon
            .vertices
            .iter()
            .copied()
            .filter(Point::is_finite)
            .collect();
        let dropped = request.polygon.len() - vertices.len();
        if dropped > 0 {
            diag.warn(format_args!("dropped {} non-finite polygon vertices", dropped));
        }
        let polygon = Polygon::new(vertices);

        let segments = if request.mission_type == MissionType::Strip {
            let (valid, rejected) = strip::validate_segments(&request.segments, diag);
            if valid.is_empty() {
                return Err(PlanError::NoValidSegments { rejected });
            }
            valid
        } else {
            if polygon.is_empty() {
                diag.warn(format_args!(
                    "{} mission without a survey polygon, flying start to end directly",
                    request.mission_type.name()
                ));
            }
            Vec::new()
        };

        Ok(Self {
            polygon,
            spacing: request.spacing,
            start,
            end,
            angle: finite_or(request.angle, 0.0),
            margin: clamp_margin(finite_or(request.margin, 0.0)),
            capture_interval: request.capture_interval.filter(|v| v.is_finite()),
            gimbal_tilt: clamp_tilt(finite_or(request.gimbal_tilt, 0.0)),
            lateral_offset: finite_or(request.lateral_offset, 0.0),
            segments,
        })
    }

    /// Sweep of the request polygon at `heading`, options left at default.
    fn sweep_config(&self, heading: f64) -> SweepConfig {
        SweepConfig::new(self.polygon.clone(), self.spacing, self.start)
            .with_end(self.end)
            .with_heading(heading)
            .with_margin(self.margin)
    }
}

#[inline]
fn finite_or(value: Option<f64>, fallback: f64) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(fallback)
}

/// Validate `request` and plan it with the matching strategy.
pub fn plan_mission(request: &MissionRequest, diag: &Diagnostics<'_>) -> Result<FlightPlan, PlanError> {
    let params = MissionParams::validate(request, diag)?;

    let plan = match request.mission_type {
        MissionType::Mapping => mapping::plan(&params, diag),
        MissionType::Oblique => oblique::plan(&params, diag),
        MissionType::Strip => strip::plan(&params, diag),
    };

    diag.info(format_args!(
        "{} plan: {} path points, {} waypoints, {} lines, {:.1} m",
        plan.mission.name(),
        plan.path.len(),
        plan.waypoints.len(),
        plan.lines.len(),
        plan.length(),
    ));

    Ok(plan)
}
