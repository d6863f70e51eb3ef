//! The scene tree: a generational arena of typed nodes.
//!
//! Nodes carry a rectangle in their parent's content coordinate space
//! and a [`NodeKind`] payload. Once per frame the renderer compiles the
//! tree pre-order into a flat command queue; between frames application
//! code mutates nodes freely through [`Scene`].

mod arena;
mod error;
mod node;

pub use arena::{NodeId, Scene};
pub use error::SceneError;
pub use node::{Animation, AnimationFrames, FillMode, Gradient, Node, NodeKind, TextContent};
