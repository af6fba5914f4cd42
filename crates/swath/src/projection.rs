//! Web Mercator (EPSG:3857) helpers.
//!
//! Used where an angle has to be measured in meters rather than degrees:
//! a bearing taken with `atan2` on raw lon/lat is skewed by `cos(lat)` away
//! from the equator, the same bearing on Mercator coordinates is not
//! (the projection is conformal).

use std::f64::consts::FRAC_PI_2;

use crate::geometry::{normalize_angle, Point};

/// WGS84 semi-major axis in meters.
pub const WGS84_A: f64 = 6_378_137.0;

/// Latitude limit of the square Web Mercator world.
pub const MERCATOR_MAX_LAT_DEG: f64 = 85.051_128_78;

/// Project to Web Mercator meters `(x, y)`.
pub fn to_mercator(point: Point) -> (f64, f64) {
    let lat = point
        .lat
        .clamp(-MERCATOR_MAX_LAT_DEG, MERCATOR_MAX_LAT_DEG)
        .to_radians();
    let x = WGS84_A * point.lon.to_radians();
    let y = WGS84_A * (0.5 * (FRAC_PI_2 + lat)).tan().ln();
    (x, y)
}

/// Planar bearing from `from` to `to` in degrees, `[0, 360)`.
///
/// 0 points east, 90 north, matching the rotation convention of the sweep
/// frame, so the result can be fed straight in as a heading.
pub fn planar_bearing(from: Point, to: Point) -> f64 {
    let (x1, y1) = to_mercator(from);
    let (x2, y2) = to_mercator(to);
    normalize_angle((y2 - y1).atan2(x2 - x1).to_degrees())
}
