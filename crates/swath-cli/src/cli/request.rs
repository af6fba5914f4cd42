//! Request files.
//!
//! Requests are JSON or YAML documents using the camelCase field names of
//! the wire format. Coordinates stay loose (`Vec<f64>`) here; anything that
//! is not a usable `[lon, lat]` pair becomes a NaN point, and the planner
//! decides whether that is fatal or just dropped.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use swath::{MissionRequest, MissionType, Point, Polygon, StripSegment};

/// A mission request as written on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestFile {
    /// Survey polygon as `[lon, lat]` pairs. May be empty for strip missions.
    #[serde(default)]
    pub polygon: Vec<Vec<f64>>,

    /// Scanline spacing in meters
    #[serde(default)]
    pub spacing: Option<f64>,

    #[serde(default)]
    pub start_point: Option<Vec<f64>>,

    #[serde(default)]
    pub end_point: Option<Vec<f64>>,

    /// Scan heading (degrees)
    #[serde(default)]
    pub angle: Option<f64>,

    /// Boundary overshoot (meters)
    #[serde(default)]
    pub margin: Option<f64>,

    /// "mapping", "oblique" or "strip"
    #[serde(default)]
    pub mission_type: Option<String>,

    /// Gimbal tilt (degrees), oblique only
    #[serde(default, alias = "gimbalTilt")]
    pub gimbal_yaw: Option<f64>,

    /// Lateral ground offset (meters), oblique only
    #[serde(default)]
    pub lateral_offset: Option<f64>,

    #[serde(default)]
    pub capture_interval: Option<f64>,

    #[serde(default)]
    pub segments: Vec<SegmentFile>,
}

/// One corridor segment as written on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SegmentFile {
    #[serde(default)]
    pub index: i64,
    #[serde(default)]
    pub p1: Option<Vec<f64>>,
    #[serde(default)]
    pub p2: Option<Vec<f64>>,
    #[serde(default)]
    pub corners: Vec<Vec<f64>>,
}

/// Read a request from `path`, or from stdin when `path` is `-`.
///
/// `.yaml`/`.yml` files are parsed as YAML, everything else (stdin
/// included) as JSON.
pub fn load_request(path: &Path) -> Result<RequestFile> {
    if path == Path::new("-") {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("failed to read request from stdin")?;
        return parse_json(&content, "stdin");
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read request {}", path.display()))?;

    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
        .unwrap_or(false);

    if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse YAML request {}", path.display()))
    } else {
        parse_json(&content, &path.display().to_string())
    }
}

fn parse_json(content: &str, source: &str) -> Result<RequestFile> {
    serde_json::from_str(content).with_context(|| format!("failed to parse JSON request {}", source))
}

/// A `[lon, lat]` pair, or a NaN point the planner will reject.
fn loose_point(coords: &[f64]) -> Point {
    Point::from_slice(coords).unwrap_or(Point::new(f64::NAN, f64::NAN))
}

impl RequestFile {
    /// Resolve the mission type name. Unknown names are an error, not a fallback.
    pub fn mission_type(&self) -> Result<MissionType> {
        match &self.mission_type {
            None => Ok(MissionType::default()),
            Some(name) => match MissionType::from_name(name) {
                Some(mission) => Ok(mission),
                None => bail!("unknown mission type '{}'", name),
            },
        }
    }

    /// Convert to the planner's request type.
    pub fn to_mission_request(&self) -> Result<MissionRequest> {
        let polygon = Polygon::new(self.polygon.iter().map(|c| loose_point(c)).collect());

        let segments = self
            .segments
            .iter()
            .map(|s| StripSegment {
                index: s.index,
                p1: s.p1.as_deref().and_then(Point::from_slice),
                p2: s.p2.as_deref().and_then(Point::from_slice),
                corners: s.corners.iter().map(|c| loose_point(c)).collect(),
            })
            .collect();

        Ok(MissionRequest {
            polygon,
            spacing: self.spacing.unwrap_or(f64::NAN),
            start_point: self.start_point.as_deref().map(loose_point),
            end_point: self.end_point.as_deref().map(loose_point),
            angle: self.angle,
            margin: self.margin,
            mission_type: self.mission_type()?,
            gimbal_tilt: self.gimbal_yaw,
            lateral_offset: self.lateral_offset,
            capture_interval: self.capture_interval,
            segments,
        })
    }
}
