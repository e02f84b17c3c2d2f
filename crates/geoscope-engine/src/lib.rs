//! Update-and-LOD scheduling engine for GEOSCOPE.
//!
//! Owns the live entity population, runs one scheduling pass per tick
//! (distance, tier, throttle, then conditional transform refresh), and
//! pushes plain-data render commands. Completely headless, with no renderer
//! or windowing dependency, enabling deterministic testing.

pub mod attachments;
pub mod registry;
pub mod scheduler;
pub mod transform;

pub use geoscope_core as core;
pub use registry::{EntityRegistry, RegistryConfig};
pub use transform::TransformState;
