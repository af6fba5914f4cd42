//! # swath
//!
//! Coverage-path planning for polygonal survey areas.
//!
//! Give it a region, a scanline spacing, a takeoff point and a heading, and
//! it lays a back-and-forth ("lawnmower") route over the region. Mission
//! strategies build on that one route: oblique capture flies it five ways,
//! strip missions stitch it together segment by segment along a corridor.
//!
//! ```text
//! MissionRequest -> plan_mission -> frame (rotate) -> scan (sweep) -> frame (rotate back)
//!                                -> mapping | oblique | strip -> FlightPlan
//! ```
//!
//! ## Rust Lesson #7: Modules
//!
//! Rust modules are like ES6 modules but more explicit:
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level
//!
//! Unlike Node.js, you must explicitly declare every module.

pub mod diagnostics;
pub mod error;
pub mod flight;
pub mod frame;
pub mod geometry;
pub mod intersect;
pub mod mission;
pub mod projection;
pub mod scan;

// Re-export common types at crate root for convenience.
pub use diagnostics::Diagnostics;
pub use error::PlanError;
pub use flight::{FlightLine, FlightPlan, LateralOffset, LineOptions, SweepConfig};
pub use frame::generate_flight_line;
pub use geometry::{BoundingBox, Point, Polygon};
pub use mission::{plan_mission, MissionRequest, MissionType, StripSegment};
pub use scan::{sweep_aligned, AlignedSweep};
