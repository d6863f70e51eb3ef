//! Per-child layout configuration tables.

use std::collections::HashMap;

use crate::scene::NodeId;

/// Optional pixel margins for a margin-relative child.
///
/// Two opposing margins set together also determine the in-between
/// dimension; a single margin only anchors that edge.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Margins {
    /// Distance from the parent's left edge.
    pub left: Option<i32>,
    /// Distance from the parent's top edge.
    pub top: Option<i32>,
    /// Distance from the parent's right edge.
    pub right: Option<i32>,
    /// Distance from the parent's bottom edge.
    pub bottom: Option<i32>,
}

/// Margin-relative layout: children anchored by pixel margins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RelativeLayout {
    table: HashMap<NodeId, Margins>,
    /// Margins applied to children with no table entry.
    pub default: Margins,
}

impl RelativeLayout {
    /// Empty layout with all-`None` defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a child's margins, replacing any previous entry.
    pub fn set_margin(&mut self, child: NodeId, margins: Margins) {
        self.table.insert(child, margins);
    }

    pub(crate) fn margin_of(&self, child: NodeId) -> Margins {
        self.table.get(&child).copied().unwrap_or(self.default)
    }

    pub(crate) fn purge(&mut self, child: NodeId) {
        self.table.remove(&child);
    }

    pub(crate) fn retain(&mut self, keep: impl Fn(NodeId) -> bool) {
        self.table.retain(|id, _| keep(*id));
    }

    pub(crate) fn clear_config(&mut self) {
        self.table.clear();
    }

    /// True when no child has an explicit entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Optional parent-size fractions for a ratio child.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Ratios {
    /// Left edge as a fraction of parent width.
    pub left: Option<f32>,
    /// Top edge as a fraction of parent height.
    pub top: Option<f32>,
    /// Width as a fraction of parent width.
    pub width: Option<f32>,
    /// Height as a fraction of parent height.
    pub height: Option<f32>,
}

/// Ratio layout: children sized and placed as fractions of the parent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RatioLayout {
    table: HashMap<NodeId, Ratios>,
    /// Ratios applied to children with no table entry.
    pub default: Ratios,
}

impl RatioLayout {
    /// Empty layout with all-`None` defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a child's ratios, replacing any previous entry.
    pub fn set_ratio(&mut self, child: NodeId, ratios: Ratios) {
        self.table.insert(child, ratios);
    }

    pub(crate) fn ratio_of(&self, child: NodeId) -> Ratios {
        self.table.get(&child).copied().unwrap_or(self.default)
    }

    pub(crate) fn purge(&mut self, child: NodeId) {
        self.table.remove(&child);
    }

    pub(crate) fn retain(&mut self, keep: impl Fn(NodeId) -> bool) {
        self.table.retain(|id, _| keep(*id));
    }

    pub(crate) fn clear_config(&mut self) {
        self.table.clear();
    }

    /// True when no child has an explicit entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// How a dock child claims space from the shrinking free rectangle.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum DockMode {
    /// Not docked; the child keeps its own rectangle.
    #[default]
    None,
    /// Claim a strip at the free rectangle's left edge.
    Left,
    /// Claim a strip at the free rectangle's top edge.
    Top,
    /// Claim a strip at the free rectangle's right edge.
    Right,
    /// Claim a strip at the free rectangle's bottom edge.
    Bottom,
    /// Consume all remaining free space.
    Fill,
}

/// Dock layout: children consume a shrinking free rectangle in order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DockLayout {
    table: HashMap<NodeId, DockMode>,
}

impl DockLayout {
    /// Empty layout; children default to [`DockMode::None`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a child's dock mode, replacing any previous entry.
    pub fn set_dock_mode(&mut self, child: NodeId, mode: DockMode) {
        self.table.insert(child, mode);
    }

    pub(crate) fn mode_of(&self, child: NodeId) -> DockMode {
        self.table.get(&child).copied().unwrap_or_default()
    }

    pub(crate) fn purge(&mut self, child: NodeId) {
        self.table.remove(&child);
    }

    pub(crate) fn retain(&mut self, keep: impl Fn(NodeId) -> bool) {
        self.table.retain(|id, _| keep(*id));
    }

    pub(crate) fn clear_config(&mut self) {
        self.table.clear();
    }

    /// True when no child has an explicit entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Grid layout: declared rows/columns, one cell per child.
///
/// Track sizes: `0` = auto-fill, `0 < v < 1` = fraction of the parent
/// dimension, `>= 1` = fixed pixels.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridLayout {
    rows: Vec<f32>,
    columns: Vec<f32>,
    cells: HashMap<NodeId, (usize, usize)>,
}

impl GridLayout {
    /// Empty grid with no tracks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `rows` x `columns` auto-fill tracks, replacing any
    /// previous declaration.
    pub fn set_size(&mut self, rows: usize, columns: usize) {
        self.rows = vec![0.0; rows];
        self.columns = vec![0.0; columns];
    }

    /// Set one row's track size.
    ///
    /// # Panics
    /// If `row` does not name a declared row.
    pub fn set_row_height(&mut self, row: usize, height: f32) {
        self.rows[row] = height;
    }

    /// Set one column's track size.
    ///
    /// # Panics
    /// If `column` does not name a declared column.
    pub fn set_column_width(&mut self, column: usize, width: f32) {
        self.columns[column] = width;
    }

    /// Assign a child to a (row, column) cell.
    pub fn set_cell(&mut self, child: NodeId, row: usize, column: usize) {
        self.cells.insert(child, (row, column));
    }

    pub(crate) fn cell_of(&self, child: NodeId) -> (usize, usize) {
        self.cells.get(&child).copied().unwrap_or((0, 0))
    }

    pub(crate) fn rows(&self) -> &[f32] {
        &self.rows
    }

    pub(crate) fn columns(&self) -> &[f32] {
        &self.columns
    }

    pub(crate) fn purge(&mut self, child: NodeId) {
        self.cells.remove(&child);
    }

    pub(crate) fn retain(&mut self, keep: impl Fn(NodeId) -> bool) {
        self.cells.retain(|id, _| keep(*id));
    }

    pub(crate) fn clear_config(&mut self) {
        self.cells.clear();
    }

    /// True when no child has an explicit cell.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::scene::{NodeKind, Scene};

    #[test]
    fn test_default_used_when_absent() {
        let mut scene = Scene::new(10, 10);
        let a = scene.create(NodeKind::Blank, Rect::ZERO);
        let mut layout = RelativeLayout::new();
        layout.default.left = Some(4);
        assert_eq!(layout.margin_of(a).left, Some(4));
        layout.set_margin(
            a,
            Margins {
                left: Some(9),
                ..Margins::default()
            },
        );
        assert_eq!(layout.margin_of(a).left, Some(9));
    }

    #[test]
    fn test_grid_set_size_resets_tracks() {
        let mut grid = GridLayout::new();
        grid.set_size(2, 3);
        grid.set_row_height(1, 40.0);
        assert_eq!(grid.rows(), &[0.0, 40.0]);
        grid.set_size(1, 1);
        assert_eq!(grid.rows(), &[0.0]);
    }
}
