//! Compile and hit-test benchmark: queue build plus pointer targeting.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glimmer::text::{BoxMode, LabelStyle};
use glimmer::{NodeKind, Point, Rect, Renderer, Rgba, Scene};

/// Build a scene with `count` overlapping labels under the root.
fn build_scene(count: i32) -> Scene {
    let mut scene = Scene::new(800, 600);
    let root = scene.root();
    for i in 0..count {
        let node = scene.create(
            NodeKind::Label {
                style: LabelStyle {
                    bg: Some(Rgba::new(
                        (i % 256) as u8,
                        ((i * 7) % 256) as u8,
                        ((i * 13) % 256) as u8,
                    )),
                    ..LabelStyle::default()
                },
                box_mode: BoxMode::Inside,
            },
            Rect::new((i * 3) % 700, (i * 5) % 500, 60, 40),
        );
        scene.append(root, node).expect("attach");
    }
    scene
}

fn compile_queue(c: &mut Criterion) {
    let mut group = c.benchmark_group("pre_render");
    for count in [100, 1000] {
        let mut scene = build_scene(count);
        let mut renderer = Renderer::new(scene.root());
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| renderer.pre_render(black_box(&mut scene), 0));
        });
    }
    group.finish();
}

fn hit_test_topmost(c: &mut Criterion) {
    let mut scene = build_scene(1000);
    let mut renderer = Renderer::new(scene.root());
    renderer.pre_render(&mut scene, 0);

    c.bench_function("hit_test_1000_commands", |b| {
        b.iter(|| renderer.coordinate_hit_test(black_box(Point::new(400, 300))));
    });
}

fn hit_test_miss(c: &mut Criterion) {
    let mut scene = build_scene(1000);
    let mut renderer = Renderer::new(scene.root());
    renderer.pre_render(&mut scene, 0);

    // outside every label, falls through the whole queue to the root
    c.bench_function("hit_test_1000_commands_miss", |b| {
        b.iter(|| renderer.coordinate_hit_test(black_box(Point::new(790, 590))));
    });
}

criterion_group!(benches, compile_queue, hit_test_topmost, hit_test_miss);
criterion_main!(benches);
