//! Layout benchmark: grid and dock engines over many children.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glimmer::layout::{DockLayout, DockMode, GridLayout};
use glimmer::{NodeKind, Rect, Renderer, Scene};

fn grid_scene(rows: usize, columns: usize) -> Scene {
    let mut scene = Scene::new(1600, 900);
    let root = scene.root();
    let mut grid = GridLayout::new();
    grid.set_size(rows, columns);
    let grid_node = scene.create(NodeKind::Grid(grid), Rect::ZERO);
    scene.append(root, grid_node).expect("attach");
    for row in 0..rows {
        for column in 0..columns {
            let child = scene.create(NodeKind::Blank, Rect::ZERO);
            scene.append(grid_node, child).expect("attach");
            if let NodeKind::Grid(g) = &mut scene.node_mut(grid_node).expect("grid").kind {
                g.set_cell(child, row, column);
            }
        }
    }
    scene
}

fn dock_scene(count: i32) -> Scene {
    let mut scene = Scene::new(1600, 900);
    let root = scene.root();
    let dock_node = scene.create(NodeKind::Dock(DockLayout::new()), Rect::ZERO);
    scene.append(root, dock_node).expect("attach");
    let modes = [DockMode::Left, DockMode::Top, DockMode::Right, DockMode::Bottom];
    for i in 0..count {
        let child = scene.create(NodeKind::Blank, Rect::new(0, 0, 4, 4));
        scene.append(dock_node, child).expect("attach");
        if let NodeKind::Dock(d) = &mut scene.node_mut(dock_node).expect("dock").kind {
            d.set_dock_mode(child, modes[(i as usize) % modes.len()]);
        }
    }
    scene
}

fn grid_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_layout");
    for size in [8usize, 32] {
        let mut scene = grid_scene(size, size);
        let mut renderer = Renderer::new(scene.root());
        group.bench_with_input(
            BenchmarkId::from_parameter(size * size),
            &size,
            |b, _| {
                b.iter(|| renderer.pre_render(black_box(&mut scene), 0));
            },
        );
    }
    group.finish();
}

fn dock_layout(c: &mut Criterion) {
    let mut scene = dock_scene(200);
    let mut renderer = Renderer::new(scene.root());
    c.bench_function("dock_layout_200_children", |b| {
        b.iter(|| renderer.pre_render(black_box(&mut scene), 0));
    });
}

criterion_group!(benches, grid_layout, dock_layout);
criterion_main!(benches);
