//! One window: scene, renderer, dispatcher, and a software framebuffer.

use crate::event::{Dispatcher, Event};
use crate::gfx::Pixmap;
use crate::render::Renderer;
use crate::scene::{NodeId, Scene};

/// Everything owned per window.
///
/// The scene tree, its renderer, the event dispatcher, and the
/// framebuffer the renderer paints into. No state is shared across
/// windows.
pub struct Window {
    scene: Scene,
    renderer: Renderer,
    dispatcher: Dispatcher,
    framebuffer: Pixmap,
}

impl Window {
    /// A window of the given pixel size with an empty scene.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let scene = Scene::new(width, height);
        let root = scene.root();
        Self {
            scene,
            renderer: Renderer::new(root),
            dispatcher: Dispatcher::new(root),
            framebuffer: Pixmap::new(width, height),
        }
    }

    /// The scene root.
    #[inline]
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.scene.root()
    }

    /// The scene tree.
    #[inline]
    pub const fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The scene tree, mutably.
    #[inline]
    pub const fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// The renderer and its command queue.
    #[inline]
    pub const fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// The event dispatcher.
    #[inline]
    pub const fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// The event dispatcher, mutably, for listener registration.
    #[inline]
    pub const fn dispatcher_mut(&mut self) -> &mut Dispatcher {
        &mut self.dispatcher
    }

    /// The last rendered frame.
    #[inline]
    pub const fn framebuffer(&self) -> &Pixmap {
        &self.framebuffer
    }

    /// Whether a close event has been dispatched.
    #[inline]
    #[must_use]
    pub const fn close_requested(&self) -> bool {
        self.dispatcher.close_requested()
    }

    /// Feed one event through the dispatcher.
    ///
    /// Hit tests run against the queue compiled by the most recent
    /// [`Window::pre_render`].
    pub fn handle_event(&mut self, event: Event) {
        self.dispatcher
            .handle_event(&mut self.scene, &self.renderer, event, None);
        if let Event::WindowResized { width, height } = event {
            self.framebuffer = Pixmap::new(width, height);
        }
    }

    /// Run layout and compile the scene into this frame's commands.
    pub fn pre_render(&mut self, now_ns: u64) {
        self.renderer.pre_render(&mut self.scene, now_ns);
    }

    /// Paint the compiled commands into the framebuffer.
    pub fn render(&mut self) -> &Pixmap {
        self.renderer.render(&mut self.framebuffer);
        &self.framebuffer
    }
}

impl std::fmt::Debug for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (w, h) = self.framebuffer.bounds().size();
        write!(f, "Window({w}x{h}, {:?})", self.scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::gfx::Rgba;
    use crate::scene::NodeKind;

    #[test]
    fn test_frame_paints_scene() {
        let mut window = Window::new(8, 8);
        let root = window.root();
        let bg = window.scene_mut().create(
            NodeKind::ColorBackground {
                color: Rgba::new(1, 2, 3),
            },
            Rect::ZERO,
        );
        window.scene_mut().append(root, bg).unwrap();
        window.pre_render(0);
        let frame = window.render();
        assert_eq!(frame.pixel(4, 4), Some(Rgba::new(1, 2, 3)));
    }

    #[test]
    fn test_resize_event_grows_framebuffer_and_root() {
        let mut window = Window::new(8, 8);
        window.handle_event(Event::WindowResized {
            width: 32,
            height: 16,
        });
        assert_eq!(window.framebuffer().bounds().size(), (32, 16));
        let root = window.root();
        assert_eq!(
            window.scene().rect(root).unwrap(),
            Rect::new(0, 0, 32, 16)
        );
    }

    #[test]
    fn test_close_event_sets_flag() {
        let mut window = Window::new(8, 8);
        assert!(!window.close_requested());
        window.handle_event(Event::WindowClose);
        assert!(window.close_requested());
    }
}
