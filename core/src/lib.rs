//! Detection registry and derived views for the ExoNeural classifier console.
//!
//! Classifier replies are validated once at the boundary, turned into typed
//! [`registry::Detection`] records, and served back as filtered, sorted and
//! aggregated views for the map, logbook and analysis surfaces.

pub mod classifier_interface;
pub mod math;
pub mod prelude;
pub mod registry;
pub mod telemetry;

pub use prelude::{BoundaryError, BoundaryResult, FallbackDefaults};
pub use registry::{Classification, Detection, DetectionId, PlanetRegistry, Stats};
