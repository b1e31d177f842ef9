//! Sharable properties and the apply/defaults algorithms

pub mod sharable;
pub mod defaults;
pub mod registry;
pub mod apply;

pub use sharable::{Phase, Sharable};
pub use registry::{clamp_health, ApplyContext, SharableDef, REGISTRY};
pub use apply::{apply_defaults, apply_profile};
