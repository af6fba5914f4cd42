//! Mapping: one top-down sweep, straight through the rotation frame.

use super::{MissionParams, MissionType};
use crate::diagnostics::Diagnostics;
use crate::flight::{FlightPlan, LineOptions};
use crate::frame::generate_flight_line;

pub(crate) fn plan(params: &MissionParams, diag: &Diagnostics<'_>) -> FlightPlan {
    let options = LineOptions {
        mission: MissionType::Mapping,
        capture_interval: params.capture_interval,
        ..LineOptions::default()
    };
    let line = generate_flight_line(params.sweep_config(params.angle).with_options(options), diag);
    FlightPlan::with_primary(MissionType::Mapping, 0, vec![line])
}
