//! Oblique capture: five sweeps over the same area.
//!
//! One top-down reference line plus four tilted lines (forward, reverse,
//! right, left). The tilted lines are pushed sideways by the caller's
//! precomputed ground offset so the camera footprint, not the aircraft,
//! lands on the survey grid.

use rayon::prelude::*;

use super::{MissionParams, MissionType};
use crate::diagnostics::Diagnostics;
use crate::flight::{FlightLine, FlightPlan, LateralOffset, LineOptions};
use crate::frame::generate_flight_line;
use crate::geometry::normalize_angle;

/// Largest gimbal tilt accepted, in degrees.
pub const MAX_TILT_DEG: f64 = 89.9;

/// Clamp a gimbal tilt to `[0, MAX_TILT_DEG]`. Non-finite becomes 0.
pub fn clamp_tilt(tilt: f64) -> f64 {
    if tilt.is_finite() {
        tilt.clamp(0.0, MAX_TILT_DEG)
    } else {
        0.0
    }
}

struct Variant {
    label: &'static str,
    /// Heading relative to the requested angle.
    delta: f64,
    tilted: bool,
}

/// Output order of `lines`. Clients index into it, so it never changes.
const VARIANTS: [Variant; 5] = [
    Variant { label: "top-down", delta: 0.0, tilted: false },
    Variant { label: "forward", delta: 0.0, tilted: true },
    Variant { label: "reverse", delta: 180.0, tilted: true },
    Variant { label: "right", delta: 90.0, tilted: true },
    Variant { label: "left", delta: -90.0, tilted: true },
];

pub(crate) fn plan(params: &MissionParams, diag: &Diagnostics<'_>) -> FlightPlan {
    let lines: Vec<FlightLine> = VARIANTS
        .par_iter()
        .map(|variant| variant_line(params, variant, diag))
        .collect();

    FlightPlan::with_primary(MissionType::Oblique, 0, lines)
}

fn variant_line(params: &MissionParams, variant: &Variant, diag: &Diagnostics<'_>) -> FlightLine {
    let heading = params.angle + variant.delta;

    let options = if variant.tilted {
        LineOptions {
            mission: MissionType::Oblique,
            capture_interval: params.capture_interval,
            gimbal_pitch_deg: params.gimbal_tilt,
            lateral_offset: Some(LateralOffset {
                meters: params.lateral_offset,
                direction_deg: normalize_angle(heading + 180.0),
            }),
        }
    } else {
        LineOptions {
            mission: MissionType::Oblique,
            capture_interval: params.capture_interval,
            ..LineOptions::default()
        }
    };

    diag.debug(format_args!(
        "oblique {} line at {:.2} deg, pitch {:.1}",
        variant.label,
        normalize_angle(heading),
        options.gimbal_pitch_deg
    ));

    generate_flight_line(params.sweep_config(heading).with_options(options), diag)
}
