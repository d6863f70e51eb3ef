//! Capture-then-bubble event dispatch with hover/active tracking.

use std::collections::HashMap;

use crate::render::Renderer;
use crate::scene::{NodeId, Scene};

use super::event::{Event, EventCategory, EventType, MouseButton};

/// Handle returned by [`Dispatcher::add_event_listener`], used for
/// removal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ListenerId(u64);

/// A registered callback.
///
/// Returning `true` marks the event handled and halts propagation.
pub type Listener = Box<dyn FnMut(&mut Scene, &Event) -> bool>;

/// Failures from the listener registry.
#[derive(Clone, Copy, PartialEq, Eq, Debug, thiserror::Error)]
pub enum DispatchError {
    /// The id does not name a registered listener.
    #[error("listener {0:?} was never registered")]
    ListenerNotFound(ListenerId),
}

/// Per-window event dispatcher.
///
/// Holds the listener registry and the pointer-targeting state: the
/// hover node (under the pointer), the active node (last pressed into),
/// and the node remembered between press and release for click
/// synthesis. All three start at the root.
pub struct Dispatcher {
    root: NodeId,
    active: NodeId,
    hover: NodeId,
    last_hover: NodeId,
    last_pressed: Option<NodeId>,
    close_requested: bool,
    next_listener: u64,
    listeners: HashMap<(EventType, NodeId, bool), Vec<(ListenerId, Listener)>>,
}

impl Dispatcher {
    /// A dispatcher with all pointers at `root` and no listeners.
    #[must_use]
    pub fn new(root: NodeId) -> Self {
        Self {
            root,
            active: root,
            hover: root,
            last_hover: root,
            last_pressed: None,
            close_requested: false,
            next_listener: 0,
            listeners: HashMap::new(),
        }
    }

    /// The node currently under the pointer.
    #[inline]
    #[must_use]
    pub const fn hover(&self) -> NodeId {
        self.hover
    }

    /// The node last pressed into; non-mouse events target it.
    #[inline]
    #[must_use]
    pub const fn active(&self) -> NodeId {
        self.active
    }

    /// The hover node before the most recent hover change.
    #[inline]
    #[must_use]
    pub const fn last_hover(&self) -> NodeId {
        self.last_hover
    }

    /// Whether a close event was seen; the frame loop polls this.
    #[inline]
    #[must_use]
    pub const fn close_requested(&self) -> bool {
        self.close_requested
    }

    /// Register a callback for `(event_type, node, capture)`.
    ///
    /// Listeners on the same key fire in registration order.
    pub fn add_event_listener(
        &mut self,
        event_type: EventType,
        node: NodeId,
        capture: bool,
        listener: Listener,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners
            .entry((event_type, node, capture))
            .or_default()
            .push((id, listener));
        tracing::debug!(?id, ?event_type, ?node, capture, "listener added");
        id
    }

    /// Remove a listener by id.
    ///
    /// # Errors
    /// [`DispatchError::ListenerNotFound`] if `id` was never registered
    /// or was already removed.
    pub fn remove_event_listener(&mut self, id: ListenerId) -> Result<(), DispatchError> {
        for entries in self.listeners.values_mut() {
            if let Some(position) = entries.iter().position(|(lid, _)| *lid == id) {
                entries.remove(position);
                tracing::debug!(?id, "listener removed");
                return Ok(());
            }
        }
        Err(DispatchError::ListenerNotFound(id))
    }

    /// Dispatch one event through the tree.
    ///
    /// Without a focus override, mouse-category events target the hover
    /// node and window-category events target the active node. Built-in
    /// root behaviors (hover tracking, press/release bookkeeping, close
    /// and resize handling) run before user listeners; then capture
    /// listeners fire root-first and bubble listeners leaf-first, with a
    /// `true` return halting propagation.
    pub fn handle_event(
        &mut self,
        scene: &mut Scene,
        renderer: &Renderer,
        event: Event,
        focused: Option<NodeId>,
    ) {
        let target = focused.unwrap_or(match event.category() {
            EventCategory::Mouse => self.hover,
            EventCategory::Window => self.active,
        });
        // the pass path snapshots targeting before builtins move it
        let path = scene.pass_path(target).unwrap_or_else(|_| vec![self.root]);
        self.run_builtins(scene, renderer, &event);
        self.propagate_along(scene, &event, &path);
    }

    /// Update the hover node, synthesizing leave/enter events.
    ///
    /// A leave fires at the old hover node unless it is an ancestor of
    /// the new one; an enter fires at the new hover node unless it is
    /// an ancestor of the old one.
    pub fn set_hover(&mut self, scene: &mut Scene, hover: NodeId) {
        if hover == self.hover {
            return;
        }
        let old = self.hover;
        self.last_hover = old;
        self.hover = hover;
        tracing::trace!(?old, new = ?hover, "hover changed");
        let old_path = scene.pass_path(old).unwrap_or_default();
        let new_path = scene.pass_path(hover).unwrap_or_default();
        if !new_path.contains(&old) {
            self.propagate(scene, &Event::MouseLeft { target: old }, old);
        }
        if !old_path.contains(&hover) {
            self.propagate(scene, &Event::MouseEntered { target: hover }, hover);
        }
    }

    fn run_builtins(&mut self, scene: &mut Scene, renderer: &Renderer, event: &Event) {
        match *event {
            Event::WindowClose => {
                self.close_requested = true;
            }
            Event::WindowLeave => {
                self.active = self.root;
                self.set_hover(scene, self.root);
            }
            Event::WindowResized { width, height } => {
                scene.resize_root(width, height);
            }
            Event::MouseMotion { pos } => {
                let hit = renderer.coordinate_hit_test(pos);
                self.set_hover(scene, hit);
            }
            Event::MouseButtonDown {
                button: MouseButton::Left,
                ..
            } => {
                self.active = self.hover;
                self.last_pressed = Some(self.hover);
            }
            Event::MouseButtonUp { pos, .. } => {
                if self.last_pressed == Some(self.hover) {
                    let target = self.hover;
                    self.propagate(scene, &Event::Click { target, pos }, target);
                }
                self.last_pressed = None;
            }
            _ => {}
        }
    }

    /// Capture then bubble along the path from `target` to the root.
    fn propagate(&mut self, scene: &mut Scene, event: &Event, target: NodeId) {
        let path = scene.pass_path(target).unwrap_or_else(|_| vec![self.root]);
        self.propagate_along(scene, event, &path);
    }

    fn propagate_along(&mut self, scene: &mut Scene, event: &Event, path: &[NodeId]) {
        let event_type = event.event_type();
        for &node in path.iter().rev() {
            if self.run_listeners(scene, event, (event_type, node, true)) {
                return;
            }
        }
        for &node in path {
            if self.run_listeners(scene, event, (event_type, node, false)) {
                return;
            }
        }
    }

    fn run_listeners(
        &mut self,
        scene: &mut Scene,
        event: &Event,
        key: (EventType, NodeId, bool),
    ) -> bool {
        let Some(entries) = self.listeners.get_mut(&key) else {
            return false;
        };
        for (_, listener) in entries.iter_mut() {
            if listener(scene, event) {
                return true;
            }
        }
        false
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count: usize = self.listeners.values().map(Vec::len).sum();
        f.debug_struct("Dispatcher")
            .field("hover", &self.hover)
            .field("active", &self.active)
            .field("listeners", &count)
            .finish_non_exhaustive()
    }
}
