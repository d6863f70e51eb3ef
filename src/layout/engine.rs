//! The four layout algorithms, run against the scene during compile.

use crate::geometry::Rect;
use crate::scene::{NodeId, NodeKind, Scene};

use super::config::{DockMode, Margins, Ratios};

/// Reposition a layout node's children from its parent's rectangle.
///
/// No-op for non-layout kinds, detached layout nodes, and stale
/// handles; layout runs inside the compile walk, which is infallible.
pub(crate) fn run_layout(scene: &mut Scene, id: NodeId) {
    let Ok(node) = scene.node(id) else {
        return;
    };
    let Some(parent) = node.parent() else {
        return;
    };
    let Ok(parent_rect) = scene.rect(parent) else {
        return;
    };
    let (width, height) = parent_rect.size();
    let children: Vec<NodeId> = node.children().to_vec();
    match &node.kind {
        NodeKind::Relative(layout) => {
            let configs: Vec<Margins> = children.iter().map(|c| layout.margin_of(*c)).collect();
            apply_relative(scene, &children, &configs, width, height);
        }
        NodeKind::Ratio(layout) => {
            let configs: Vec<Ratios> = children.iter().map(|c| layout.ratio_of(*c)).collect();
            apply_ratio(scene, &children, &configs, width, height);
        }
        NodeKind::Dock(layout) => {
            let configs: Vec<DockMode> = children.iter().map(|c| layout.mode_of(*c)).collect();
            apply_dock(scene, &children, &configs, width, height);
        }
        NodeKind::Grid(layout) => {
            let cells: Vec<(usize, usize)> = children.iter().map(|c| layout.cell_of(*c)).collect();
            let row_edges = cumulative_edges(layout.rows(), height);
            let col_edges = cumulative_edges(layout.columns(), width);
            apply_grid(scene, &children, &cells, &row_edges, &col_edges);
        }
        _ => {}
    }
}

fn apply_relative(
    scene: &mut Scene,
    children: &[NodeId],
    configs: &[Margins],
    width: i32,
    height: i32,
) {
    for (&child, m) in children.iter().zip(configs) {
        let Ok(node) = scene.node_mut(child) else {
            continue;
        };
        let rect = &mut node.rect;
        match (m.left, m.right) {
            (Some(left), Some(right)) => {
                rect.x = left;
                rect.w = width - left - right;
            }
            (Some(left), None) => rect.set_left(left),
            (None, Some(right)) => rect.set_right(width - right),
            (None, None) => {}
        }
        match (m.top, m.bottom) {
            (Some(top), Some(bottom)) => {
                rect.y = top;
                rect.h = height - top - bottom;
            }
            (Some(top), None) => rect.set_top(top),
            (None, Some(bottom)) => rect.set_bottom(height - bottom),
            (None, None) => {}
        }
    }
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn apply_ratio(
    scene: &mut Scene,
    children: &[NodeId],
    configs: &[Ratios],
    width: i32,
    height: i32,
) {
    let scaled = |total: i32, ratio: f32| (total as f32 * ratio).round() as i32;
    for (&child, r) in children.iter().zip(configs) {
        let Ok(node) = scene.node_mut(child) else {
            continue;
        };
        let rect = &mut node.rect;
        if let Some(left) = r.left {
            rect.x = scaled(width, left);
        }
        if let Some(top) = r.top {
            rect.y = scaled(height, top);
        }
        if let Some(w) = r.width {
            rect.w = scaled(width, w);
        }
        if let Some(h) = r.height {
            rect.h = scaled(height, h);
        }
    }
}

fn apply_dock(
    scene: &mut Scene,
    children: &[NodeId],
    configs: &[DockMode],
    width: i32,
    height: i32,
) {
    let mut free = Rect::from_size(width, height);
    for (&child, &mode) in children.iter().zip(configs) {
        if free.w <= 0 || free.h <= 0 {
            break;
        }
        let Ok(node) = scene.node_mut(child) else {
            continue;
        };
        let rect = &mut node.rect;
        match mode {
            DockMode::None => {}
            DockMode::Left => {
                rect.x = free.x;
                rect.y = free.y;
                rect.h = free.h;
                free.x += rect.w;
                free.w -= rect.w;
            }
            DockMode::Top => {
                rect.x = free.x;
                rect.y = free.y;
                rect.w = free.w;
                free.y += rect.h;
                free.h -= rect.h;
            }
            DockMode::Right => {
                rect.set_right(free.right());
                rect.y = free.y;
                rect.h = free.h;
                free.w -= rect.w;
            }
            DockMode::Bottom => {
                rect.x = free.x;
                rect.set_bottom(free.bottom());
                rect.w = free.w;
                free.h -= rect.h;
            }
            DockMode::Fill => {
                *rect = free;
                free.w = 0;
                free.h = 0;
            }
        }
    }
}

/// Resolve track declarations to cumulative edge coordinates.
///
/// `edges[i]` is the start of track `i`; `edges[len]` is forced to the
/// total so rounding error never leaks into the final edge.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn cumulative_edges(tracks: &[f32], total: i32) -> Vec<i32> {
    let total_f = total as f32;
    let mut sizes: Vec<f32> = tracks
        .iter()
        .map(|&t| if t > 0.0 && t < 1.0 { total_f * t } else { t })
        .collect();
    let auto_count = sizes.iter().filter(|&&s| s == 0.0).count();
    if auto_count > 0 {
        let claimed: f32 = sizes.iter().filter(|&&s| s > 0.0).sum();
        let auto = (total_f - claimed) / auto_count as f32;
        for s in &mut sizes {
            if *s == 0.0 {
                *s = auto;
            }
        }
    }
    let mut edges = Vec::with_capacity(sizes.len() + 1);
    edges.push(0);
    let mut acc = 0.0f32;
    for s in sizes {
        acc += s;
        edges.push(acc.round() as i32);
    }
    if edges.len() > 1 {
        if let Some(last) = edges.last_mut() {
            *last = total;
        }
    }
    edges
}

fn apply_grid(
    scene: &mut Scene,
    children: &[NodeId],
    cells: &[(usize, usize)],
    row_edges: &[i32],
    col_edges: &[i32],
) {
    for (&child, &(row, col)) in children.iter().zip(cells) {
        if row + 1 >= row_edges.len() || col + 1 >= col_edges.len() {
            tracing::warn!(?child, row, col, "grid cell out of range, child skipped");
            continue;
        }
        let Ok(node) = scene.node_mut(child) else {
            continue;
        };
        node.rect = Rect::new(
            col_edges[col],
            row_edges[row],
            col_edges[col + 1] - col_edges[col],
            row_edges[row + 1] - row_edges[row],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{DockLayout, GridLayout, RatioLayout, RelativeLayout};
    use crate::scene::NodeKind;

    fn scene_with_layout(kind: NodeKind, children: usize) -> (Scene, NodeId, Vec<NodeId>) {
        let mut scene = Scene::new(200, 100);
        let root = scene.root();
        let layout = scene.create(kind, Rect::ZERO);
        scene.append(root, layout).unwrap();
        let ids: Vec<NodeId> = (0..children)
            .map(|_| {
                let id = scene.create(NodeKind::Blank, Rect::new(5, 5, 30, 20));
                scene.append(layout, id).unwrap();
                id
            })
            .collect();
        (scene, layout, ids)
    }

    #[test]
    fn test_relative_opposing_margins_set_size() {
        let (mut scene, layout, ids) = scene_with_layout(NodeKind::Relative(RelativeLayout::new()), 1);
        if let NodeKind::Relative(l) = &mut scene.node_mut(layout).unwrap().kind {
            l.set_margin(
                ids[0],
                Margins {
                    left: Some(10),
                    right: Some(20),
                    top: None,
                    bottom: Some(5),
                },
            );
        }
        run_layout(&mut scene, layout);
        let r = scene.rect(ids[0]).unwrap();
        assert_eq!(r.x, 10);
        assert_eq!(r.w, 170);
        // single bottom margin anchors the edge, keeps the height
        assert_eq!(r.h, 20);
        assert_eq!(r.bottom(), 95);
    }

    #[test]
    fn test_relative_single_margin_keeps_size() {
        let (mut scene, layout, ids) = scene_with_layout(NodeKind::Relative(RelativeLayout::new()), 1);
        if let NodeKind::Relative(l) = &mut scene.node_mut(layout).unwrap().kind {
            l.set_margin(
                ids[0],
                Margins {
                    right: Some(40),
                    ..Margins::default()
                },
            );
        }
        run_layout(&mut scene, layout);
        let r = scene.rect(ids[0]).unwrap();
        assert_eq!(r.right(), 160);
        assert_eq!(r.size(), (30, 20));
    }

    #[test]
    fn test_ratio_applies_each_fraction_independently() {
        let (mut scene, layout, ids) = scene_with_layout(NodeKind::Ratio(RatioLayout::new()), 1);
        if let NodeKind::Ratio(l) = &mut scene.node_mut(layout).unwrap().kind {
            l.set_ratio(
                ids[0],
                Ratios {
                    left: Some(0.25),
                    width: Some(0.5),
                    top: None,
                    height: None,
                },
            );
        }
        run_layout(&mut scene, layout);
        let r = scene.rect(ids[0]).unwrap();
        assert_eq!(r.x, 50);
        assert_eq!(r.w, 100);
        assert_eq!(r.y, 5);
        assert_eq!(r.h, 20);
    }

    #[test]
    fn test_dock_tiles_parent_exactly() {
        let (mut scene, layout, ids) = scene_with_layout(NodeKind::Dock(DockLayout::new()), 4);
        if let NodeKind::Dock(l) = &mut scene.node_mut(layout).unwrap().kind {
            l.set_dock_mode(ids[0], DockMode::Left);
            l.set_dock_mode(ids[1], DockMode::Top);
            l.set_dock_mode(ids[2], DockMode::Right);
            l.set_dock_mode(ids[3], DockMode::Fill);
        }
        run_layout(&mut scene, layout);
        let r0 = scene.rect(ids[0]).unwrap();
        let r1 = scene.rect(ids[1]).unwrap();
        let r2 = scene.rect(ids[2]).unwrap();
        let r3 = scene.rect(ids[3]).unwrap();
        assert_eq!(r0, Rect::new(0, 0, 30, 100));
        assert_eq!(r1, Rect::new(30, 0, 170, 20));
        assert_eq!(r2, Rect::new(170, 20, 30, 80));
        assert_eq!(r3, Rect::new(30, 20, 140, 80));
        // no gaps, no overlap: areas sum to the parent's
        let area: i32 = [r0, r1, r2, r3].iter().map(|r| r.w * r.h).sum();
        assert_eq!(area, 200 * 100);
    }

    #[test]
    fn test_dock_stops_when_space_exhausted() {
        let (mut scene, layout, ids) = scene_with_layout(NodeKind::Dock(DockLayout::new()), 2);
        if let NodeKind::Dock(l) = &mut scene.node_mut(layout).unwrap().kind {
            l.set_dock_mode(ids[0], DockMode::Fill);
            l.set_dock_mode(ids[1], DockMode::Left);
        }
        run_layout(&mut scene, layout);
        // second child untouched: free space hit zero
        assert_eq!(scene.rect(ids[1]).unwrap(), Rect::new(5, 5, 30, 20));
    }

    #[test]
    fn test_grid_final_edges_match_parent_exactly() {
        // three proportional thirds of 100 would round-drift without the
        // forced final edge
        let edges = cumulative_edges(&[1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0], 100);
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[0], 0);
        assert_eq!(*edges.last().unwrap(), 100);
        let edges = cumulative_edges(&[0.0, 50.0, 0.0], 200);
        assert_eq!(edges, vec![0, 75, 125, 200]);
    }

    #[test]
    fn test_grid_places_children_in_cells() {
        let mut grid = GridLayout::new();
        grid.set_size(2, 2);
        let (mut scene, layout, ids) = scene_with_layout(NodeKind::Grid(grid), 2);
        if let NodeKind::Grid(l) = &mut scene.node_mut(layout).unwrap().kind {
            l.set_cell(ids[1], 1, 1);
        }
        run_layout(&mut scene, layout);
        assert_eq!(scene.rect(ids[0]).unwrap(), Rect::new(0, 0, 100, 50));
        assert_eq!(scene.rect(ids[1]).unwrap(), Rect::new(100, 50, 100, 50));
    }

    #[test]
    fn test_grid_out_of_range_cell_skips_child() {
        let mut grid = GridLayout::new();
        grid.set_size(1, 1);
        let (mut scene, layout, ids) = scene_with_layout(NodeKind::Grid(grid), 1);
        if let NodeKind::Grid(l) = &mut scene.node_mut(layout).unwrap().kind {
            l.set_cell(ids[0], 3, 0);
        }
        run_layout(&mut scene, layout);
        assert_eq!(scene.rect(ids[0]).unwrap(), Rect::new(5, 5, 30, 20));
    }
}
