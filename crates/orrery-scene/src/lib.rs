//! Scene graph for orbiting celestial bodies.
//!
//! A [`Scene`] is a forest of [`CelestialBody`] nodes built once from the
//! configuration's body tree. Each frame the owner advances every node's
//! orbit/spin accumulators and runs a depth-first draw traversal that
//! composes each node's transform onto its parent's and submits one draw
//! through the [`BodyRenderer`] capability.

mod body;
mod builder;
mod error;
mod renderer;

pub use body::CelestialBody;
pub use builder::{Scene, SceneParams, build_system};
pub use error::SceneError;
pub use renderer::{BodyRenderer, MeshHandle, TextureHandle};
