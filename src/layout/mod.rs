//! Layout engines: margin-relative, ratio, dock, and grid.
//!
//! A layout node repositions its direct children from its parent's
//! rectangle immediately before its children compile, so geometry is
//! current for the same frame's visuals. Children are positioned in the
//! parent's content coordinate space with origin (0, 0).
//!
//! Each engine keeps a per-child config table keyed by node id with a
//! default used when absent. Entries are purged when a child is removed
//! through the scene's own operations; [`crate::Scene::collect_stale`]
//! sweeps entries orphaned any other way.

mod config;
mod engine;

pub use config::{DockLayout, DockMode, GridLayout, Margins, RatioLayout, Ratios, RelativeLayout};

pub(crate) use engine::run_layout;
