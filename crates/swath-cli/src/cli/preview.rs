//! SVG/PNG previews of a flight plan.
//!
//! Coordinates are drawn in local meters: an equirectangular projection
//! about the survey centroid, Y flipped so north is up. Good enough to eyeball
//! a plan a few kilometers across, not a map.

use std::path::Path;

use anyhow::{Context, Result};
use swath::geometry::{METERS_PER_DEG_LAT, METERS_PER_DEG_LON};
use swath::{FlightPlan, MissionRequest, Point};

/// Pixel width of the preview canvas.
const CANVAS_WIDTH: f64 = 800.0;

/// Local meter projection around one origin.
struct LocalFrame {
    origin: Point,
    lon_scale: f64,
}

impl LocalFrame {
    fn new(origin: Point) -> Self {
        Self {
            origin,
            lon_scale: origin.lat.to_radians().cos() * METERS_PER_DEG_LON,
        }
    }

    fn project(&self, p: Point) -> (f64, f64) {
        (
            (p.lon - self.origin.lon) * self.lon_scale,
            -(p.lat - self.origin.lat) * METERS_PER_DEG_LAT,
        )
    }
}

/// Projected polylines grouped by how they are drawn.
struct Scene {
    outlines: Vec<Vec<(f64, f64)>>,
    variants: Vec<Vec<(f64, f64)>>,
    primary: Vec<(f64, f64)>,
    takeoff: Option<(f64, f64)>,
}

impl Scene {
    fn build(request: &MissionRequest, plan: &FlightPlan) -> Self {
        let origin = request
            .polygon
            .centroid()
            .filter(Point::is_finite)
            .or(request.start_point.filter(Point::is_finite))
            .or_else(|| plan.path.first().copied())
            .unwrap_or(Point::new(0.0, 0.0));
        let frame = LocalFrame::new(origin);
        let project = |points: &[Point]| -> Vec<(f64, f64)> {
            points
                .iter()
                .filter(|p| p.is_finite())
                .map(|p| frame.project(*p))
                .collect()
        };

        let mut outlines = Vec::new();
        let polygon = request.polygon.normalized();
        if !polygon.is_empty() {
            let mut ring = project(&polygon.vertices);
            if let Some(&first) = ring.first() {
                ring.push(first);
            }
            outlines.push(ring);
        }
        for segment in &request.segments {
            let mut ring = project(&segment.corners);
            if let Some(&first) = ring.first() {
                ring.push(first);
            }
            outlines.push(ring);
        }

        // Mapping's single line is the primary path itself
        let variants = if plan.lines.len() > 1 {
            plan.lines.iter().map(|line| project(&line.path)).collect()
        } else {
            Vec::new()
        };

        Self {
            outlines,
            variants,
            primary: project(&plan.path),
            takeoff: request.start_point.filter(Point::is_finite).map(|p| frame.project(p)),
        }
    }

    /// `(min_x, min_y, width, height)` of everything drawn.
    fn bounds(&self) -> (f64, f64, f64, f64) {
        let all = self
            .outlines
            .iter()
            .chain(&self.variants)
            .flatten()
            .chain(&self.primary)
            .chain(&self.takeoff);

        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for &(x, y) in all {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        if !min_x.is_finite() {
            return (0.0, 0.0, 1.0, 1.0);
        }

        let pad = (max_x - min_x).max(max_y - min_y) * 0.05 + 1.0;
        (min_x - pad, min_y - pad, max_x - min_x + 2.0 * pad, max_y - min_y + 2.0 * pad)
    }
}

fn points_attr(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{:.2},{:.2}", x, y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render the plan over its survey area as a standalone SVG document.
pub fn plan_to_svg(request: &MissionRequest, plan: &FlightPlan) -> String {
    let scene = Scene::build(request, plan);
    let (min_x, min_y, width, height) = scene.bounds();
    let stroke = width.max(height) / 300.0;
    let canvas_height = (CANVAS_WIDTH * height / width).clamp(1.0, 4.0 * CANVAS_WIDTH);

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="{:.2} {:.2} {:.2} {:.2}">
"#,
        CANVAS_WIDTH, canvas_height, min_x, min_y, width, height
    ));

    svg.push_str(&format!(
        "<g id=\"survey\" stroke=\"#2b6cb0\" stroke-width=\"{:.3}\" fill=\"#ebf8ff\">\n",
        stroke
    ));
    for ring in scene.outlines.iter().filter(|r| r.len() >= 2) {
        svg.push_str(&format!("  <polygon points=\"{}\"/>\n", points_attr(ring)));
    }
    svg.push_str("</g>\n");

    svg.push_str(&format!(
        "<g id=\"variants\" stroke=\"#a0aec0\" stroke-width=\"{:.3}\" fill=\"none\" stroke-linejoin=\"round\">\n",
        stroke * 0.6
    ));
    for line in scene.variants.iter().filter(|l| l.len() >= 2) {
        svg.push_str(&format!("  <polyline points=\"{}\"/>\n", points_attr(line)));
    }
    svg.push_str("</g>\n");

    if scene.primary.len() >= 2 {
        svg.push_str(&format!(
            "<g id=\"path\" stroke=\"#c53030\" stroke-width=\"{:.3}\" fill=\"none\" stroke-linejoin=\"round\">\n  <polyline points=\"{}\"/>\n</g>\n",
            stroke,
            points_attr(&scene.primary)
        ));
    }

    if let Some((x, y)) = scene.takeoff {
        svg.push_str(&format!(
            "<circle id=\"takeoff\" cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.3}\" fill=\"#2f855a\"/>\n",
            x,
            y,
            stroke * 3.0
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

/// Rasterize `svg` with resvg and write it as PNG. Returns the pixel size.
pub fn write_png(svg: &str, png_path: &Path, scale: f64) -> Result<(u32, u32)> {
    use resvg::usvg;
    use tiny_skia::Pixmap;

    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &options).context("failed to parse preview SVG")?;

    let size = tree.size();
    let width = (size.width() as f64 * scale).round().max(1.0) as u32;
    let height = (size.height() as f64 * scale).round().max(1.0) as u32;

    let mut pixmap = Pixmap::new(width, height)
        .with_context(|| format!("could not create a {}x{} pixmap", width, height))?;
    pixmap.fill(tiny_skia::Color::WHITE);

    let transform = tiny_skia::Transform::from_scale(scale as f32, scale as f32);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    pixmap
        .save_png(png_path)
        .with_context(|| format!("failed to write {}", png_path.display()))?;

    Ok((width, height))
}
