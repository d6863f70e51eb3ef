//! Generational node arena and structural tree operations.
//!
//! Nodes live in slots addressed by [`NodeId`] handles carrying a
//! generation counter, so a handle to a destroyed node goes stale
//! instead of silently addressing its replacement. Structural integrity
//! (acyclicity, single parent, side-table purging) is enforced here at
//! mutation time; read paths can assume it.

use std::rc::Rc;

use crate::geometry::Rect;
use crate::gfx::Pixmap;

use super::error::SceneError;
use super::node::{Animation, FillMode, Gradient, Node, NodeKind};

/// Handle to a node in a [`Scene`].
///
/// Index plus generation: reusing a slot bumps the generation, so stale
/// handles fail lookup with [`SceneError::NotFound`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl std::fmt::Debug for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeId({}v{})", self.index, self.generation)
    }
}

struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// The scene tree: an arena of nodes rooted at a window-sized root.
pub struct Scene {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: NodeId,
}

impl Scene {
    /// Create a scene whose root rectangle covers a window of the given
    /// size.
    #[allow(clippy::cast_possible_wrap)]
    pub fn new(width: u32, height: u32) -> Self {
        let root = NodeId {
            index: 0,
            generation: 0,
        };
        let root_node = Node {
            id: root,
            parent: None,
            children: Vec::new(),
            rect: Rect::from_size(width as i32, height as i32),
            kind: NodeKind::Root,
        };
        Self {
            slots: vec![Slot {
                generation: 0,
                node: Some(root_node),
            }],
            free: Vec::new(),
            root,
        }
    }

    /// The root node's handle.
    #[inline]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Track a window resize by updating the root rectangle.
    #[allow(clippy::cast_possible_wrap)]
    pub fn resize_root(&mut self, width: u32, height: u32) {
        if let Some(node) = self.slots[0].node.as_mut() {
            node.rect = Rect::from_size(width as i32, height as i32);
        }
    }

    /// Whether a handle still addresses a live node.
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.slots
            .get(id.index as usize)
            .is_some_and(|s| s.generation == id.generation && s.node.is_some())
    }

    /// Borrow a node.
    ///
    /// # Errors
    /// [`SceneError::NotFound`] for stale or never-allocated handles.
    pub fn node(&self, id: NodeId) -> Result<&Node, SceneError> {
        self.slots
            .get(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_ref())
            .ok_or(SceneError::NotFound(id))
    }

    /// Mutably borrow a node.
    ///
    /// # Errors
    /// [`SceneError::NotFound`] for stale or never-allocated handles.
    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, SceneError> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_mut())
            .ok_or(SceneError::NotFound(id))
    }

    /// A node's rectangle.
    ///
    /// # Errors
    /// [`SceneError::NotFound`] for stale handles.
    pub fn rect(&self, id: NodeId) -> Result<Rect, SceneError> {
        Ok(self.node(id)?.rect)
    }

    /// Replace a node's rectangle.
    ///
    /// # Errors
    /// [`SceneError::NotFound`] for stale handles.
    pub fn set_rect(&mut self, id: NodeId, rect: Rect) -> Result<(), SceneError> {
        self.node_mut(id)?.rect = rect;
        Ok(())
    }

    /// Allocate a detached node.
    pub fn create(&mut self, kind: NodeKind, rect: Rect) -> NodeId {
        let index = match self.free.pop() {
            Some(i) => i,
            None => {
                #[allow(clippy::cast_possible_truncation)]
                let i = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    node: None,
                });
                i
            }
        };
        let slot = &mut self.slots[index as usize];
        let id = NodeId {
            index,
            generation: slot.generation,
        };
        slot.node = Some(Node {
            id,
            parent: None,
            children: Vec::new(),
            rect,
            kind,
        });
        tracing::trace!(?id, "node created");
        id
    }

    /// Allocate a detached image node.
    ///
    /// With no explicit rectangle the node takes the surface's size at
    /// the origin.
    pub fn create_image(
        &mut self,
        surface: Rc<Pixmap>,
        rect: Option<Rect>,
        fill_mode: FillMode,
    ) -> NodeId {
        let rect = rect.unwrap_or_else(|| surface.bounds());
        self.create(NodeKind::Image { surface, fill_mode }, rect)
    }

    /// Attach a detached node as the last child of `parent`.
    ///
    /// # Errors
    /// [`SceneError::NotFound`], [`SceneError::LeafNode`],
    /// [`SceneError::AlreadyAttached`], or [`SceneError::Cycle`].
    pub fn append(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        let len = self.node(parent)?.children.len();
        self.insert(parent, len, child)
    }

    /// Attach a detached node at `index` among `parent`'s children.
    ///
    /// # Errors
    /// As [`Scene::append`], plus [`SceneError::IndexOutOfRange`].
    pub fn insert(
        &mut self,
        parent: NodeId,
        index: usize,
        child: NodeId,
    ) -> Result<(), SceneError> {
        if self.node(parent)?.kind.is_leaf() {
            return Err(SceneError::LeafNode);
        }
        if self.node(child)?.parent.is_some() {
            return Err(SceneError::AlreadyAttached(child));
        }
        let len = self.node(parent)?.children.len();
        if index > len {
            return Err(SceneError::IndexOutOfRange { index, len });
        }
        // walking up from parent must not pass through child
        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if id == child {
                return Err(SceneError::Cycle { child, parent });
            }
            cursor = self.node(id)?.parent;
        }
        self.node_mut(parent)?.children.insert(index, child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Detach `child` from `parent` and destroy its whole subtree.
    ///
    /// # Errors
    /// [`SceneError::NotFound`] or [`SceneError::NotAChild`].
    pub fn remove(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        self.detach(parent, child)?;
        self.free_subtree(child);
        Ok(())
    }

    /// Detach the child at `index`, keeping it (and its subtree) alive.
    ///
    /// # Errors
    /// [`SceneError::NotFound`] or [`SceneError::IndexOutOfRange`].
    pub fn pop(&mut self, parent: NodeId, index: usize) -> Result<NodeId, SceneError> {
        let children = &self.node(parent)?.children;
        let child = *children.get(index).ok_or(SceneError::IndexOutOfRange {
            index,
            len: children.len(),
        })?;
        self.detach(parent, child)?;
        Ok(child)
    }

    /// Detach and destroy all of `parent`'s children.
    ///
    /// Layout kinds drop their whole per-child config table.
    ///
    /// # Errors
    /// [`SceneError::NotFound`] for stale handles.
    pub fn clear(&mut self, parent: NodeId) -> Result<(), SceneError> {
        let node = self.node_mut(parent)?;
        let children = std::mem::take(&mut node.children);
        node.kind.clear_child_config();
        for child in children {
            if let Ok(c) = self.node_mut(child) {
                c.parent = None;
            }
            self.free_subtree(child);
        }
        Ok(())
    }

    /// Destroy a node and its subtree, detaching it first if attached.
    ///
    /// # Errors
    /// [`SceneError::NotFound`]; [`SceneError::KindMismatch`] for the
    /// root, which cannot be destroyed.
    pub fn destroy(&mut self, id: NodeId) -> Result<(), SceneError> {
        if id == self.root {
            return Err(SceneError::KindMismatch);
        }
        if let Some(parent) = self.node(id)?.parent {
            self.detach(parent, id)?;
        }
        self.free_subtree(id);
        Ok(())
    }

    /// The ancestor chain from `id` (inclusive) up to the root.
    ///
    /// # Errors
    /// [`SceneError::NotFound`] for stale handles.
    pub fn pass_path(&self, id: NodeId) -> Result<Vec<NodeId>, SceneError> {
        let mut path = Vec::new();
        let mut cursor = Some(id);
        while let Some(node_id) = cursor {
            path.push(node_id);
            cursor = self.node(node_id)?.parent;
        }
        Ok(path)
    }

    /// Drop layout config entries for children that left through means
    /// other than this scene's own remove/pop/clear.
    ///
    /// # Errors
    /// [`SceneError::NotFound`] for stale handles.
    pub fn collect_stale(&mut self, layout: NodeId) -> Result<(), SceneError> {
        let node = self.node_mut(layout)?;
        let live: Vec<NodeId> = node.children.clone();
        match &mut node.kind {
            NodeKind::Relative(l) => l.retain(|id| live.contains(&id)),
            NodeKind::Ratio(l) => l.retain(|id| live.contains(&id)),
            NodeKind::Dock(l) => l.retain(|id| live.contains(&id)),
            NodeKind::Grid(l) => l.retain(|id| live.contains(&id)),
            _ => {}
        }
        Ok(())
    }

    /// Mutable access to an animation node's playback.
    ///
    /// # Errors
    /// [`SceneError::NotFound`] or [`SceneError::KindMismatch`].
    pub fn animation_mut(&mut self, id: NodeId) -> Result<&mut Animation, SceneError> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Animation(a) => Ok(a),
            _ => Err(SceneError::KindMismatch),
        }
    }

    /// Access a gradient node's payload.
    ///
    /// # Errors
    /// [`SceneError::NotFound`] or [`SceneError::KindMismatch`].
    pub fn gradient(&self, id: NodeId) -> Result<&Gradient, SceneError> {
        match &self.node(id)?.kind {
            NodeKind::LinearGradient(g) => Ok(g),
            _ => Err(SceneError::KindMismatch),
        }
    }

    fn detach(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        let position = self
            .node(parent)?
            .children
            .iter()
            .position(|&c| c == child)
            .ok_or(SceneError::NotAChild { child, parent })?;
        let parent_node = self.node_mut(parent)?;
        parent_node.children.remove(position);
        parent_node.kind.purge_child(child);
        self.node_mut(child)?.parent = None;
        Ok(())
    }

    fn free_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(slot) = self.slots.get_mut(current.index as usize) else {
                continue;
            };
            if slot.generation != current.generation {
                continue;
            }
            if let Some(node) = slot.node.take() {
                stack.extend(node.children);
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(current.index);
                tracing::trace!(id = ?current, "node destroyed");
            }
        }
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let live = self.slots.iter().filter(|s| s.node.is_some()).count();
        write!(f, "Scene({live} nodes)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::DockLayout;

    fn blank(scene: &mut Scene) -> NodeId {
        scene.create(NodeKind::Blank, Rect::new(0, 0, 10, 10))
    }

    #[test]
    fn test_append_preserves_order() {
        let mut scene = Scene::new(100, 100);
        let root = scene.root();
        let a = blank(&mut scene);
        let b = blank(&mut scene);
        let c = blank(&mut scene);
        scene.append(root, a).unwrap();
        scene.append(root, b).unwrap();
        scene.insert(root, 1, c).unwrap();
        assert_eq!(scene.node(root).unwrap().children(), &[a, c, b]);
        assert_eq!(scene.node(a).unwrap().parent(), Some(root));
    }

    #[test]
    fn test_append_attached_fails() {
        let mut scene = Scene::new(100, 100);
        let root = scene.root();
        let a = blank(&mut scene);
        scene.append(root, a).unwrap();
        assert_eq!(scene.append(root, a), Err(SceneError::AlreadyAttached(a)));
    }

    #[test]
    fn test_cycle_rejected() {
        let mut scene = Scene::new(100, 100);
        let a = blank(&mut scene);
        let b = blank(&mut scene);
        scene.append(a, b).unwrap();
        // a is detached; attaching it under its own descendant must fail
        assert_eq!(
            scene.append(b, a),
            Err(SceneError::Cycle {
                child: a,
                parent: b
            })
        );
    }

    #[test]
    fn test_text_rejects_children() {
        use crate::scene::TextContent;
        use crate::text::{MonoFont, TextStyle};
        let mut scene = Scene::new(100, 100);
        let style = TextStyle::new(Rc::new(MonoFont), 16);
        let text = scene.create(
            NodeKind::Text(TextContent::new("hi", style)),
            Rect::new(0, 0, 50, 20),
        );
        let child = blank(&mut scene);
        assert_eq!(scene.append(text, child), Err(SceneError::LeafNode));
    }

    #[test]
    fn test_remove_destroys_subtree() {
        let mut scene = Scene::new(100, 100);
        let root = scene.root();
        let a = blank(&mut scene);
        let b = blank(&mut scene);
        scene.append(root, a).unwrap();
        scene.append(a, b).unwrap();
        scene.remove(root, a).unwrap();
        assert!(!scene.contains(a));
        assert!(!scene.contains(b));
        assert_eq!(scene.node(a), Err(SceneError::NotFound(a)));
    }

    #[test]
    fn test_pop_keeps_subtree_alive() {
        let mut scene = Scene::new(100, 100);
        let root = scene.root();
        let a = blank(&mut scene);
        scene.append(root, a).unwrap();
        let popped = scene.pop(root, 0).unwrap();
        assert_eq!(popped, a);
        assert!(scene.contains(a));
        assert_eq!(scene.node(a).unwrap().parent(), None);
        assert_eq!(
            scene.pop(root, 0),
            Err(SceneError::IndexOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn test_stale_handle_after_slot_reuse() {
        let mut scene = Scene::new(100, 100);
        let a = blank(&mut scene);
        scene.destroy(a).unwrap();
        let b = blank(&mut scene);
        // slot reused, generation bumped
        assert!(!scene.contains(a));
        assert!(scene.contains(b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_remove_purges_layout_entry() {
        let mut scene = Scene::new(100, 100);
        let root = scene.root();
        let dock = scene.create(NodeKind::Dock(DockLayout::new()), Rect::ZERO);
        scene.append(root, dock).unwrap();
        let a = blank(&mut scene);
        scene.append(dock, a).unwrap();
        if let NodeKind::Dock(l) = &mut scene.node_mut(dock).unwrap().kind {
            l.set_dock_mode(a, crate::layout::DockMode::Left);
        }
        scene.remove(dock, a).unwrap();
        if let NodeKind::Dock(l) = &scene.node(dock).unwrap().kind {
            assert!(l.is_empty());
        } else {
            unreachable!();
        }
    }

    #[test]
    fn test_collect_stale_drops_orphan_entries() {
        let mut scene = Scene::new(100, 100);
        let dock = scene.create(NodeKind::Dock(DockLayout::new()), Rect::ZERO);
        let a = blank(&mut scene);
        // config for a node that was never attached
        if let NodeKind::Dock(l) = &mut scene.node_mut(dock).unwrap().kind {
            l.set_dock_mode(a, crate::layout::DockMode::Fill);
        }
        scene.collect_stale(dock).unwrap();
        if let NodeKind::Dock(l) = &scene.node(dock).unwrap().kind {
            assert!(l.is_empty());
        } else {
            unreachable!();
        }
    }

    #[test]
    fn test_pass_path_leaf_to_root() {
        let mut scene = Scene::new(100, 100);
        let root = scene.root();
        let a = blank(&mut scene);
        let b = blank(&mut scene);
        scene.append(root, a).unwrap();
        scene.append(a, b).unwrap();
        assert_eq!(scene.pass_path(b).unwrap(), vec![b, a, root]);
    }

    #[test]
    fn test_root_cannot_be_destroyed() {
        let mut scene = Scene::new(10, 10);
        let root = scene.root();
        assert_eq!(scene.destroy(root), Err(SceneError::KindMismatch));
    }
}
