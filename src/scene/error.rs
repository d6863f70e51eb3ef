//! Structural error types for scene mutation.

use thiserror::Error;

use super::arena::NodeId;

/// Errors from scene-tree mutation and node access.
///
/// Structural errors indicate a logic error in the calling code and are
/// always surfaced, never silently recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SceneError {
    /// The node handle is stale or was never allocated.
    #[error("node {0:?} not found")]
    NotFound(NodeId),

    /// The node is not a child of the given parent.
    #[error("node {child:?} is not a child of {parent:?}")]
    NotAChild {
        /// The node that was expected to be a child.
        child: NodeId,
        /// The presumed parent.
        parent: NodeId,
    },

    /// A child index was out of range.
    #[error("index {index} out of range for {len} children")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of children present.
        len: usize,
    },

    /// The node is already attached to a parent.
    #[error("node {0:?} is already attached to a parent")]
    AlreadyAttached(NodeId),

    /// Attaching here would make the tree cyclic.
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    Cycle {
        /// The node being attached.
        child: NodeId,
        /// The target parent, which lies inside the child's subtree.
        parent: NodeId,
    },

    /// Text nodes are leaves and reject children.
    #[error("text nodes cannot hold children")]
    LeafNode,

    /// An animation frame index was out of range.
    #[error("frame index {index} out of range for {len} frames")]
    FrameOutOfRange {
        /// Requested frame index.
        index: usize,
        /// Number of frames in the animation.
        len: usize,
    },

    /// The operation applies to a different node kind.
    #[error("operation does not apply to this node kind")]
    KindMismatch,
}
