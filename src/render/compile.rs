//! The per-frame compile walk: scene tree to flat command queue.
//!
//! Pre-order, children in insertion order. Each kind decides what it
//! emits and which offset its children inherit; layout kinds rewrite
//! child geometry right before those children compile.

use std::collections::VecDeque;
use std::rc::Rc;

use crate::geometry::{Point, Vec2};
use crate::layout::run_layout;
use crate::scene::{NodeId, NodeKind, Scene};
use crate::text::BoxMode;

use super::command::{GradientCommand, RenderCommand, TextCommand};

/// What to do after the immutable look at a node.
enum Next {
    /// Commands emitted; recurse with this offset.
    Offset(Point),
    /// Animation kind: advance playback mutably, then emit.
    Animation,
    /// Layout kind: rewrite children mutably, then recurse.
    Layout,
}

/// Compile one node and its subtree into `out`.
pub(crate) fn emit(
    scene: &mut Scene,
    id: NodeId,
    offset: Point,
    now_ns: u64,
    out: &mut VecDeque<RenderCommand>,
) {
    let Ok(node) = scene.node(id) else {
        return;
    };
    let rect = node.rect;
    let children: Vec<NodeId> = node.children().to_vec();
    let next = match &node.kind {
        NodeKind::Root => Next::Offset(offset),
        NodeKind::Blank => Next::Offset(rect.moved(offset).top_left()),
        NodeKind::ColorBackground { color } => {
            out.push_back(RenderCommand::Background {
                creator: id,
                color: *color,
            });
            Next::Offset(offset)
        }
        NodeKind::Label { style, box_mode } => {
            let mut dest = rect.moved(offset);
            let bw = style.border_width;
            if bw > 0 {
                match box_mode {
                    BoxMode::Outside => dest = dest.inflated(2 * bw, 2 * bw),
                    BoxMode::Straddle => dest = dest.inflated(bw, bw),
                    BoxMode::Inside => {}
                }
            }
            out.push_back(RenderCommand::Label {
                creator: id,
                rect: dest,
                style: style.clone(),
            });
            Next::Offset(dest.top_left())
        }
        NodeKind::Image { surface, fill_mode } => {
            let dest = rect.moved(offset);
            out.push_back(RenderCommand::Surface {
                creator: id,
                surface: Rc::clone(surface),
                rect: dest,
                fill_mode: *fill_mode,
            });
            Next::Offset(dest.top_left())
        }
        NodeKind::Text(text) => {
            if !text.content.is_empty() {
                out.push_back(RenderCommand::Text(TextCommand {
                    creator: id,
                    rect: rect.moved(offset),
                    text: text.content.clone(),
                    style: text.style.clone(),
                    align: text.align,
                    offset: text.offset,
                    affected_rects: Vec::new(),
                }));
            }
            // leaf: no children to offset
            Next::Offset(offset)
        }
        NodeKind::TextLabel {
            text,
            label_style,
            box_mode,
        } => {
            let dest = rect.moved(offset);
            let bw = label_style.border_width;
            let (label_rect, text_rect) = if bw > 0 {
                match box_mode {
                    BoxMode::Outside => (dest.inflated(2 * bw, 2 * bw), dest),
                    BoxMode::Straddle => (dest.inflated(bw, bw), dest.inflated(-bw, -bw)),
                    BoxMode::Inside => (dest, dest.inflated(-2 * bw, -2 * bw)),
                }
            } else {
                (dest, dest)
            };
            out.push_back(RenderCommand::Label {
                creator: id,
                rect: label_rect,
                style: label_style.clone(),
            });
            if !text.content.is_empty() {
                out.push_back(RenderCommand::Text(TextCommand {
                    creator: id,
                    rect: text_rect,
                    text: text.content.clone(),
                    style: text.style.clone(),
                    align: text.align,
                    offset: text.offset,
                    affected_rects: Vec::new(),
                }));
            }
            Next::Offset(offset)
        }
        NodeKind::LinearGradient(gradient) => {
            out.push_back(RenderCommand::Gradient(GradientCommand {
                creator: id,
                rect: rect.moved(offset),
                start_color: gradient.start_color,
                end_color: gradient.end_color,
                start_pos: Vec2::from(gradient.start_pos + offset),
                end_pos: Vec2::from(gradient.end_pos + offset),
                cache: Rc::clone(&gradient.cache),
            }));
            Next::Offset(offset)
        }
        NodeKind::Animation(_) => Next::Animation,
        NodeKind::Relative(_) | NodeKind::Ratio(_) | NodeKind::Dock(_) | NodeKind::Grid(_) => {
            Next::Layout
        }
    };
    let child_offset = match next {
        Next::Offset(o) => o,
        Next::Animation => {
            if let Ok(anim) = scene.animation_mut(id) {
                anim.advance(now_ns);
                if !anim.frames().is_empty() {
                    let surface = Rc::clone(anim.frames().frame(anim.current_frame()));
                    let fill_mode = anim.fill_mode;
                    out.push_back(RenderCommand::Surface {
                        creator: id,
                        surface,
                        rect: rect.moved(offset),
                        fill_mode,
                    });
                }
            }
            offset
        }
        Next::Layout => {
            run_layout(scene, id);
            offset
        }
    };
    for child in children {
        emit(scene, child, child_offset, now_ns, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::gfx::Rgba;
    use crate::text::{BoxMode, LabelStyle};

    fn compile(scene: &mut Scene) -> VecDeque<RenderCommand> {
        let mut out = VecDeque::new();
        let root = scene.root();
        emit(scene, root, Point::ZERO, 0, &mut out);
        out
    }

    fn label_kind(bw: i32, box_mode: BoxMode) -> NodeKind {
        NodeKind::Label {
            style: LabelStyle {
                fg: Rgba::BLACK,
                border_width: bw,
                ..LabelStyle::default()
            },
            box_mode,
        }
    }

    #[test]
    fn test_preorder_with_insertion_order() {
        let mut scene = Scene::new(100, 100);
        let root = scene.root();
        let a = scene.create(label_kind(0, BoxMode::Inside), Rect::new(0, 0, 10, 10));
        let b = scene.create(label_kind(0, BoxMode::Inside), Rect::new(0, 0, 10, 10));
        let a1 = scene.create(label_kind(0, BoxMode::Inside), Rect::new(0, 0, 5, 5));
        scene.append(root, a).unwrap();
        scene.append(root, b).unwrap();
        scene.append(a, a1).unwrap();
        let queue = compile(&mut scene);
        let creators: Vec<NodeId> = queue.iter().map(RenderCommand::creator).collect();
        assert_eq!(creators, vec![a, a1, b]);
    }

    #[test]
    fn test_blank_offsets_descendants() {
        let mut scene = Scene::new(100, 100);
        let root = scene.root();
        let blank = scene.create(NodeKind::Blank, Rect::new(10, 20, 50, 50));
        let inner = scene.create(label_kind(0, BoxMode::Inside), Rect::new(5, 5, 10, 10));
        scene.append(root, blank).unwrap();
        scene.append(blank, inner).unwrap();
        let queue = compile(&mut scene);
        match &queue[0] {
            RenderCommand::Label { rect, .. } => assert_eq!(*rect, Rect::new(15, 25, 10, 10)),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_label_outside_box_grows_by_twice_border() {
        let mut scene = Scene::new(100, 100);
        let root = scene.root();
        let label = scene.create(label_kind(3, BoxMode::Outside), Rect::new(10, 10, 20, 20));
        scene.append(root, label).unwrap();
        let queue = compile(&mut scene);
        match &queue[0] {
            RenderCommand::Label { rect, .. } => {
                assert_eq!(rect.size(), (26, 26));
                assert_eq!(*rect, Rect::new(7, 7, 26, 26));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_label_inside_box_unchanged() {
        let mut scene = Scene::new(100, 100);
        let root = scene.root();
        let label = scene.create(label_kind(3, BoxMode::Inside), Rect::new(10, 10, 20, 20));
        scene.append(root, label).unwrap();
        let queue = compile(&mut scene);
        match &queue[0] {
            RenderCommand::Label { rect, .. } => assert_eq!(*rect, Rect::new(10, 10, 20, 20)),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_label_children_inherit_adjusted_origin() {
        let mut scene = Scene::new(100, 100);
        let root = scene.root();
        let label = scene.create(label_kind(2, BoxMode::Outside), Rect::new(10, 10, 20, 20));
        let inner = scene.create(label_kind(0, BoxMode::Inside), Rect::new(1, 1, 5, 5));
        scene.append(root, label).unwrap();
        scene.append(label, inner).unwrap();
        let queue = compile(&mut scene);
        // outer rect starts at (8, 8); child offset is its topleft
        match &queue[1] {
            RenderCommand::Label { rect, .. } => assert_eq!(*rect, Rect::new(9, 9, 5, 5)),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_text_label_straddle_rects() {
        use crate::scene::TextContent;
        use crate::text::{MonoFont, TextStyle};
        let mut scene = Scene::new(200, 200);
        let root = scene.root();
        let style = TextStyle::new(Rc::new(MonoFont), 16);
        let node = scene.create(
            NodeKind::TextLabel {
                text: TextContent::new("hi", style),
                label_style: LabelStyle {
                    border_width: 4,
                    ..LabelStyle::default()
                },
                box_mode: BoxMode::Straddle,
            },
            Rect::new(20, 20, 40, 40),
        );
        scene.append(root, node).unwrap();
        let queue = compile(&mut scene);
        match (&queue[0], &queue[1]) {
            (RenderCommand::Label { rect: lr, .. }, RenderCommand::Text(t)) => {
                assert_eq!(*lr, Rect::new(18, 18, 44, 44));
                assert_eq!(t.rect, Rect::new(22, 22, 36, 36));
            }
            other => panic!("unexpected commands {other:?}"),
        }
    }

    #[test]
    fn test_gradient_axis_translated_by_offset() {
        use crate::scene::Gradient;
        let mut scene = Scene::new(200, 200);
        let root = scene.root();
        let blank = scene.create(NodeKind::Blank, Rect::new(10, 10, 100, 100));
        let gradient = scene.create(
            NodeKind::LinearGradient(Gradient::new(
                Rgba::BLACK,
                Rgba::WHITE,
                Point::new(0, 0),
                Point::new(50, 0),
            )),
            Rect::new(0, 0, 50, 20),
        );
        scene.append(root, blank).unwrap();
        scene.append(blank, gradient).unwrap();
        let queue = compile(&mut scene);
        match &queue[0] {
            RenderCommand::Gradient(g) => {
                assert_eq!(g.rect, Rect::new(10, 10, 50, 20));
                assert!((g.start_pos.x - 10.0).abs() < f32::EPSILON);
                assert!((g.end_pos.x - 60.0).abs() < f32::EPSILON);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_layout_runs_before_children_compile() {
        use crate::layout::{DockLayout, DockMode};
        let mut scene = Scene::new(120, 80);
        let root = scene.root();
        let dock = scene.create(NodeKind::Dock(DockLayout::new()), Rect::ZERO);
        let child = scene.create(label_kind(0, BoxMode::Inside), Rect::new(0, 0, 30, 10));
        scene.append(root, dock).unwrap();
        scene.append(dock, child).unwrap();
        if let NodeKind::Dock(l) = &mut scene.node_mut(dock).unwrap().kind {
            l.set_dock_mode(child, DockMode::Left);
        }
        let queue = compile(&mut scene);
        match &queue[0] {
            RenderCommand::Label { rect, .. } => assert_eq!(*rect, Rect::new(0, 0, 30, 80)),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_empty_text_emits_no_command() {
        use crate::scene::TextContent;
        use crate::text::{MonoFont, TextStyle};
        let mut scene = Scene::new(100, 100);
        let root = scene.root();
        let style = TextStyle::new(Rc::new(MonoFont), 16);
        let node = scene.create(
            NodeKind::Text(TextContent::new("", style)),
            Rect::new(0, 0, 50, 20),
        );
        scene.append(root, node).unwrap();
        let queue = compile(&mut scene);
        assert!(queue.is_empty());
    }
}
