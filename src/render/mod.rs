//! Immediate render pipeline over the retained scene tree.
//!
//! Every frame the tree is compiled into a flat queue of
//! [`RenderCommand`]s. Painting walks the queue front to back; hit
//! testing walks it back to front, so the command painted last wins.

mod command;
mod compile;
mod gradient;

pub use command::{GradientCommand, RenderCommand, TextCommand};
pub use gradient::GradientCache;

use std::collections::VecDeque;

use crate::geometry::Point;
use crate::gfx::Pixmap;
use crate::scene::{NodeId, Scene};

/// The per-frame command queue and its compile/paint/hit-test entry
/// points.
pub struct Renderer {
    queue: VecDeque<RenderCommand>,
    root: NodeId,
}

impl Renderer {
    /// A renderer that reports `root` for hit tests missing everything.
    #[must_use]
    pub fn new(root: NodeId) -> Self {
        Self {
            queue: VecDeque::new(),
            root,
        }
    }

    /// Recompile the queue from the scene.
    ///
    /// Runs layout, advances animation playback, and replaces the
    /// previous frame's commands entirely.
    pub fn pre_render(&mut self, scene: &mut Scene, now_ns: u64) {
        self.queue.clear();
        let root = scene.root();
        compile::emit(scene, root, Point::ZERO, now_ns, &mut self.queue);
        tracing::trace!(commands = self.queue.len(), "queue compiled");
    }

    /// Paint the queue front to back onto `target`.
    pub fn render(&mut self, target: &mut Pixmap) {
        for cmd in &mut self.queue {
            cmd.render(target);
        }
    }

    /// Push a command ahead of everything compiled this frame.
    ///
    /// Front commands paint first, so later commands cover them.
    pub fn push_front(&mut self, cmd: RenderCommand) {
        self.queue.push_front(cmd);
    }

    /// Push a command after everything compiled this frame.
    pub fn push_back(&mut self, cmd: RenderCommand) {
        self.queue.push_back(cmd);
    }

    /// The node whose command is topmost at `point`.
    ///
    /// Walks back to front; falls back to the root when nothing is hit.
    #[must_use]
    pub fn coordinate_hit_test(&self, point: Point) -> NodeId {
        self.queue
            .iter()
            .rev()
            .find(|cmd| cmd.hit_test(point))
            .map_or(self.root, RenderCommand::creator)
    }

    /// Number of queued commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// True when nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Iterate the queue in paint order.
    pub fn commands(&self) -> impl Iterator<Item = &RenderCommand> {
        self.queue.iter()
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Renderer({} commands)", self.queue.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::gfx::Rgba;
    use crate::scene::NodeKind;
    use crate::text::{BoxMode, LabelStyle};

    fn label(scene: &mut Scene, rect: Rect) -> NodeId {
        scene.create(
            NodeKind::Label {
                style: LabelStyle {
                    bg: Some(Rgba::WHITE),
                    ..LabelStyle::default()
                },
                box_mode: BoxMode::Inside,
            },
            rect,
        )
    }

    #[test]
    fn test_hit_test_last_drawn_wins() {
        let mut scene = Scene::new(100, 100);
        let root = scene.root();
        let below = label(&mut scene, Rect::new(0, 0, 50, 50));
        let above = label(&mut scene, Rect::new(20, 20, 50, 50));
        scene.append(root, below).unwrap();
        scene.append(root, above).unwrap();
        let mut renderer = Renderer::new(root);
        renderer.pre_render(&mut scene, 0);
        assert_eq!(renderer.coordinate_hit_test(Point::new(30, 30)), above);
        assert_eq!(renderer.coordinate_hit_test(Point::new(5, 5)), below);
    }

    #[test]
    fn test_hit_test_falls_back_to_root() {
        let mut scene = Scene::new(100, 100);
        let root = scene.root();
        let node = label(&mut scene, Rect::new(0, 0, 10, 10));
        scene.append(root, node).unwrap();
        let mut renderer = Renderer::new(root);
        renderer.pre_render(&mut scene, 0);
        assert_eq!(renderer.coordinate_hit_test(Point::new(90, 90)), root);
    }

    #[test]
    fn test_background_catches_all_hits() {
        let mut scene = Scene::new(100, 100);
        let root = scene.root();
        let bg = scene.create(
            NodeKind::ColorBackground { color: Rgba::BLACK },
            Rect::ZERO,
        );
        scene.append(root, bg).unwrap();
        let mut renderer = Renderer::new(root);
        renderer.pre_render(&mut scene, 0);
        assert_eq!(renderer.coordinate_hit_test(Point::new(999, -5)), bg);
    }

    #[test]
    fn test_pre_render_replaces_queue() {
        let mut scene = Scene::new(100, 100);
        let root = scene.root();
        let node = label(&mut scene, Rect::new(0, 0, 10, 10));
        scene.append(root, node).unwrap();
        let mut renderer = Renderer::new(root);
        renderer.pre_render(&mut scene, 0);
        assert_eq!(renderer.len(), 1);
        scene.remove(root, node).unwrap();
        renderer.pre_render(&mut scene, 0);
        assert!(renderer.is_empty());
    }

    #[test]
    fn test_push_front_paints_under() {
        let mut scene = Scene::new(10, 10);
        let root = scene.root();
        let node = label(&mut scene, Rect::new(0, 0, 10, 10));
        scene.append(root, node).unwrap();
        let mut renderer = Renderer::new(root);
        renderer.pre_render(&mut scene, 0);
        let extra = scene.create(NodeKind::Blank, Rect::ZERO);
        renderer.push_front(RenderCommand::Fill {
            creator: extra,
            rect: Rect::new(0, 0, 10, 10),
            color: Rgba::new(255, 0, 0),
        });
        let mut target = Pixmap::new(10, 10);
        renderer.render(&mut target);
        // the compiled white label paints over the injected red fill
        assert_eq!(target.pixel(5, 5), Some(Rgba::WHITE));
        assert_eq!(renderer.commands().count(), 2);
    }

    #[test]
    fn test_render_paints_background() {
        let mut scene = Scene::new(4, 4);
        let root = scene.root();
        let bg = scene.create(
            NodeKind::ColorBackground {
                color: Rgba::new(10, 20, 30),
            },
            Rect::ZERO,
        );
        scene.append(root, bg).unwrap();
        let mut renderer = Renderer::new(root);
        renderer.pre_render(&mut scene, 0);
        let mut target = Pixmap::new(4, 4);
        renderer.render(&mut target);
        assert_eq!(target.pixel(3, 3), Some(Rgba::new(10, 20, 30)));
    }
}
