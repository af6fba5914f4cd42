//! Core geometry types for swath.
//!
//! Everything here works on WGS84 longitude/latitude pairs in degrees.
//! Distances come back in meters (haversine), while rotation happens in
//! the flat lon/lat plane. Curvature only re-enters through the
//! meters-per-degree conversions used for spacing, margin and offsets.
//!
//! ## Rust Lesson #3: Structs & Derives
//!
//! `#[derive(Debug, Clone, Copy, PartialEq)]` on a two-float struct gives us
//! printing, implicit copies and `==` for free. `Copy` is fine here because a
//! `Point` is just 16 bytes on the stack.

use std::f64::consts::PI;

/// Mean Earth radius used by the haversine distance.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Meters per degree of latitude (also used for scanline spacing).
pub const METERS_PER_DEG_LAT: f64 = 111_000.0;

/// Meters per degree of longitude at the equator.
pub const METERS_PER_DEG_LON: f64 = 111_320.0;

/// A longitude/latitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub lon: f64,
    pub lat: f64,
}

/// Axis-aligned bounds over a polygon's vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

/// An ordered ring of vertices describing a simple (possibly concave) area.
///
/// The caller may repeat the first vertex at the end to mark closure;
/// [`Polygon::normalized`] drops it before any computation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    pub vertices: Vec<Point>,
}

// ============================================================================
// POINT
// ============================================================================

impl Point {
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Build a point from a `[lon, lat, ...]` slice.
    ///
    /// Returns `None` for fewer than two values or non-finite coordinates.
    /// Extra values (an altitude, say) are ignored.
    pub fn from_slice(coords: &[f64]) -> Option<Self> {
        match coords {
            [lon, lat, ..] if lon.is_finite() && lat.is_finite() => Some(Self::new(*lon, *lat)),
            _ => None,
        }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }

    /// Great-circle distance in meters (haversine).
    pub fn distance(&self, other: Point) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }

    /// Rotate around `pivot` by `angle_deg` in the flat lon/lat plane.
    ///
    /// Positive angles are clockwise in screen space (y down), which is the
    /// convention the map client uses for headings. Rotating by `-a` then
    /// `+a` about the same pivot returns the original point.
    #[inline]
    pub fn rotated(&self, pivot: Point, angle_deg: f64) -> Point {
        let angle_rad = angle_deg * PI / 180.0;
        let (sin, cos) = angle_rad.sin_cos();
        let dx = self.lon - pivot.lon;
        let dy = self.lat - pivot.lat;
        Point::new(
            dx * cos - dy * sin + pivot.lon,
            dx * sin + dy * cos + pivot.lat,
        )
    }

    /// Move this point by a ground distance along a flat-plane direction.
    ///
    /// `direction_deg` uses the same angle convention as [`Point::rotated`]:
    /// 0 points along +lon, 90 along +lat.
    pub fn offset_by(&self, meters: f64, direction_deg: f64) -> Point {
        let (sin, cos) = direction_deg.to_radians().sin_cos();
        Point::new(
            self.lon + meters * cos / meters_per_deg_lon(self.lat),
            self.lat + meters * sin / METERS_PER_DEG_LAT,
        )
    }
}

/// Meters per degree of longitude at `lat`, floored so the poles stay finite.
#[inline]
pub fn meters_per_deg_lon(lat: f64) -> f64 {
    lat.to_radians().cos().abs().max(1e-6) * METERS_PER_DEG_LON
}

/// Wrap an angle in degrees into `[0, 360)`.
#[inline]
pub fn normalize_angle(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}

/// Total length of a polyline in meters. Zero for fewer than two points.
pub fn path_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Rotate every point around `pivot`.
pub fn rotate_points(points: &[Point], pivot: Point, angle_deg: f64) -> Vec<Point> {
    points.iter().map(|p| p.rotated(pivot, angle_deg)).collect()
}

// ============================================================================
// BOUNDING BOX
// ============================================================================

impl BoundingBox {
    /// Grow the box by `margin` degrees on every side.
    pub fn expanded(&self, margin: f64) -> BoundingBox {
        BoundingBox {
            min: Point::new(self.min.lon - margin, self.min.lat - margin),
            max: Point::new(self.max.lon + margin, self.max.lat + margin),
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        (self.min.lon..=self.max.lon).contains(&point.lon)
            && (self.min.lat..=self.max.lat).contains(&point.lat)
    }
}

// ============================================================================
// POLYGON
// ============================================================================

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    /// Build from raw `[lon, lat]` pairs.
    pub fn from_coords(coords: &[[f64; 2]]) -> Self {
        Self::new(coords.iter().map(|c| Point::new(c[0], c[1])).collect())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Drop trailing copies of the first vertex.
    ///
    /// At least one vertex always survives, so applying this twice gives
    /// the same ring as applying it once.
    pub fn normalized(&self) -> Polygon {
        let mut vertices = self.vertices.clone();
        while vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        Polygon::new(vertices)
    }

    /// Min/max reduction over the vertices. `None` for an empty polygon.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        if self.vertices.is_empty() {
            return None;
        }

        let min_lon = self.vertices.iter().map(|p| p.lon).fold(f64::INFINITY, f64::min);
        let min_lat = self.vertices.iter().map(|p| p.lat).fold(f64::INFINITY, f64::min);
        let max_lon = self.vertices.iter().map(|p| p.lon).fold(f64::NEG_INFINITY, f64::max);
        let max_lat = self.vertices.iter().map(|p| p.lat).fold(f64::NEG_INFINITY, f64::max);

        Some(BoundingBox {
            min: Point::new(min_lon, min_lat),
            max: Point::new(max_lon, max_lat),
        })
    }

    /// Arithmetic mean of the vertices (not area weighted).
    pub fn centroid(&self) -> Option<Point> {
        if self.vertices.is_empty() {
            return None;
        }

        let n = self.vertices.len() as f64;
        let sum_lon: f64 = self.vertices.iter().map(|p| p.lon).sum();
        let sum_lat: f64 = self.vertices.iter().map(|p| p.lat).sum();
        Some(Point::new(sum_lon / n, sum_lat / n))
    }

    /// Rotate every vertex around `pivot`.
    pub fn rotated(&self, pivot: Point, angle_deg: f64) -> Polygon {
        Polygon::new(rotate_points(&self.vertices, pivot, angle_deg))
    }

    /// Iterate edges as `(index, from, to)`, including the closing edge
    /// from the last vertex back to the first.
    pub fn edges(&self) -> impl Iterator<Item = (usize, Point, Point)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (i, self.vertices[i], self.vertices[(i + 1) % n]))
    }
}

// ============================================================================
// TESTS
// ============================================================================
