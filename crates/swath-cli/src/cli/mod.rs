//! CLI command implementations.
//!
//! - `plan` - Plan a mission from a request file, emit JSON or an SVG/PNG preview
//! - `missions` - List available mission types

pub mod plan;
pub mod preview;
pub mod request;
pub mod response;

pub use plan::{cmd_missions, cmd_plan, PlanArgs};
