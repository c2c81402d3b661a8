//! Particle field that morphs between a conical "tree" and a spherical-shell
//! "universe".
//!
//! The crate has no rendering dependency. A renderer drives
//! [`field::ParticleField::tick`] once per frame and copies the per-batch
//! [`field::InstanceTransform`]s into its instanced draw calls.

pub mod color;
pub mod config;
pub mod field;
pub mod generate;
pub mod interaction;
pub mod math;
pub mod particle;
pub mod trigger;
pub mod wish;

pub use config::{ConfigError, FieldConfig};
pub use field::{Batch, InstanceTransform, ParticleField};
pub use interaction::{ExplodeToggle, HoverObserver, NoHover, PickTarget, PointerRouter};
pub use particle::{Particle, ShapeKind};
