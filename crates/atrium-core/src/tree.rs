//! Generational widget arena and tree structure.
//!
//! Widgets live in fixed-capacity slots and are addressed by [`WidgetId`],
//! an index + generation pair. Freeing a widget bumps its slot generation,
//! so a handle kept past destruction fails with [`UiError::DeadWidget`]
//! instead of dangling. Parent/child links are ordered, bounded lists of
//! ids; no pointers, no heap.
//!
//! The arena is capped at [`MAX_WIDGETS`] live widgets and each widget at
//! [`MAX_CHILDREN`] children (embedded bounded-buffer contract; overflow
//! is an error, never a panic).

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::Vec;

use crate::error::{UiError, UiResult};
use crate::widget::{Background, WidgetCommon};

/// Maximum number of live widgets per tree.
pub const MAX_WIDGETS: usize = 64;

/// Maximum number of children per widget.
pub const MAX_CHILDREN: usize = 16;

/// Handle to a widget stored in a [`WidgetTree`].
///
/// Copyable and cheap; validity is checked on every use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WidgetId {
    index: u16,
    generation: u16,
}

pub(crate) struct Node<W> {
    pub(crate) common: WidgetCommon,
    pub(crate) behavior: W,
    pub(crate) parent: Option<WidgetId>,
    pub(crate) children: Vec<WidgetId, MAX_CHILDREN>,
}

struct Slot<W> {
    generation: u16,
    node: Option<Node<W>>,
}

/// The retained widget tree: storage plus hierarchy.
pub struct WidgetTree<W> {
    slots: Vec<Slot<W>, MAX_WIDGETS>,
    free: Vec<u16, MAX_WIDGETS>,
    live: usize,
}

impl<W> Default for WidgetTree<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> WidgetTree<W> {
    /// An empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Number of live widgets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    /// `true` if no widgets are allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Allocate a detached widget with the given behavior and
    /// parent-relative bounds.
    ///
    /// # Errors
    ///
    /// [`UiError::InvalidSize`] for a zero-area rect,
    /// [`UiError::CapacityExceeded`] when all [`MAX_WIDGETS`] slots are
    /// live.
    pub fn alloc(&mut self, behavior: W, rect: Rectangle) -> UiResult<WidgetId> {
        if rect.size.width == 0 || rect.size.height == 0 {
            return Err(UiError::InvalidSize);
        }
        let node = Node {
            common: WidgetCommon::new(rect),
            behavior,
            parent: None,
            children: Vec::new(),
        };

        let id = if let Some(index) = self.free.pop() {
            let slot = self
                .slots
                .get_mut(usize::from(index))
                .ok_or(UiError::CapacityExceeded)?;
            slot.node = Some(node);
            WidgetId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = u16::try_from(self.slots.len()).map_err(|_| UiError::CapacityExceeded)?;
            self.slots
                .push(Slot {
                    generation: 0,
                    node: Some(node),
                })
                .map_err(|_| UiError::CapacityExceeded)?;
            WidgetId {
                index,
                generation: 0,
            }
        };

        self.live = self.live.saturating_add(1);
        Ok(id)
    }

    /// Destroy a widget and every descendant, detaching it from its parent
    /// first. All handles into the subtree become dead.
    ///
    /// # Errors
    ///
    /// [`UiError::DeadWidget`] if the handle is stale.
    pub fn remove(&mut self, id: WidgetId) -> UiResult {
        if !self.contains(id) {
            return Err(UiError::DeadWidget);
        }
        self.detach(id)?;

        // Iterative post-order-free via an explicit stack; recursion depth
        // is unbounded only by MAX_WIDGETS but the stack is sized for it.
        let mut stack: Vec<WidgetId, MAX_WIDGETS> = Vec::new();
        stack.push(id).map_err(|_| UiError::CapacityExceeded)?;
        while let Some(current) = stack.pop() {
            let children = match self.node(current) {
                Some(node) => node.children.clone(),
                None => continue,
            };
            for child in &children {
                stack.push(*child).map_err(|_| UiError::CapacityExceeded)?;
            }
            self.free_slot(current);
        }
        Ok(())
    }

    fn free_slot(&mut self, id: WidgetId) {
        if let Some(slot) = self.slots.get_mut(usize::from(id.index)) {
            if slot.generation == id.generation && slot.node.is_some() {
                slot.node = None;
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(id.index).ok();
                self.live = self.live.saturating_sub(1);
            }
        }
    }

    /// `true` if the handle refers to a live widget.
    #[must_use]
    pub fn contains(&self, id: WidgetId) -> bool {
        self.node(id).is_some()
    }

    pub(crate) fn node(&self, id: WidgetId) -> Option<&Node<W>> {
        self.slots
            .get(usize::from(id.index))
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub(crate) fn node_mut(&mut self, id: WidgetId) -> Option<&mut Node<W>> {
        self.slots
            .get_mut(usize::from(id.index))
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    /// Shared view of a widget's common state.
    ///
    /// # Errors
    ///
    /// [`UiError::DeadWidget`] if the handle is stale.
    pub fn common(&self, id: WidgetId) -> UiResult<&WidgetCommon> {
        self.node(id).map(|n| &n.common).ok_or(UiError::DeadWidget)
    }

    /// Mutable view of a widget's common state.
    ///
    /// # Errors
    ///
    /// [`UiError::DeadWidget`] if the handle is stale.
    pub fn common_mut(&mut self, id: WidgetId) -> UiResult<&mut WidgetCommon> {
        self.node_mut(id)
            .map(|n| &mut n.common)
            .ok_or(UiError::DeadWidget)
    }

    /// Shared view of a widget's behavior.
    ///
    /// # Errors
    ///
    /// [`UiError::DeadWidget`] if the handle is stale.
    pub fn behavior(&self, id: WidgetId) -> UiResult<&W> {
        self.node(id).map(|n| &n.behavior).ok_or(UiError::DeadWidget)
    }

    /// Mutable view of a widget's behavior.
    ///
    /// # Errors
    ///
    /// [`UiError::DeadWidget`] if the handle is stale.
    pub fn behavior_mut(&mut self, id: WidgetId) -> UiResult<&mut W> {
        self.node_mut(id)
            .map(|n| &mut n.behavior)
            .ok_or(UiError::DeadWidget)
    }

    /// The widget's parent, or `None` for detached widgets and layer roots.
    ///
    /// # Errors
    ///
    /// [`UiError::DeadWidget`] if the handle is stale.
    pub fn parent(&self, id: WidgetId) -> UiResult<Option<WidgetId>> {
        self.node(id).map(|n| n.parent).ok_or(UiError::DeadWidget)
    }

    /// Number of children.
    ///
    /// # Errors
    ///
    /// [`UiError::DeadWidget`] if the handle is stale.
    pub fn child_count(&self, id: WidgetId) -> UiResult<usize> {
        self.node(id)
            .map(|n| n.children.len())
            .ok_or(UiError::DeadWidget)
    }

    /// Child at `index` in z-order (last child is topmost).
    ///
    /// # Errors
    ///
    /// [`UiError::DeadWidget`] for a stale handle,
    /// [`UiError::IndexOutOfRange`] past the child list.
    pub fn child_at(&self, parent: WidgetId, index: usize) -> UiResult<WidgetId> {
        let node = self.node(parent).ok_or(UiError::DeadWidget)?;
        node.children
            .get(index)
            .copied()
            .ok_or(UiError::IndexOutOfRange)
    }

    /// Position of `child` in `parent`'s child list.
    ///
    /// # Errors
    ///
    /// [`UiError::DeadWidget`] for a stale parent handle,
    /// [`UiError::NotAChild`] if the child is not in the list.
    pub fn index_of_child(&self, parent: WidgetId, child: WidgetId) -> UiResult<usize> {
        let node = self.node(parent).ok_or(UiError::DeadWidget)?;
        node.children
            .iter()
            .position(|c| *c == child)
            .ok_or(UiError::NotAChild)
    }

    /// Append `child` to `parent`'s child list (topmost z-order).
    ///
    /// Reparenting always detaches first; a widget has at most one parent.
    /// Child-list order is not preserved across moves.
    ///
    /// # Errors
    ///
    /// [`UiError::DeadWidget`] for stale handles,
    /// [`UiError::CycleDetected`] if `child` is `parent` or one of its
    /// ancestors, [`UiError::CapacityExceeded`] when the child list is
    /// full. Nothing is mutated on failure.
    pub fn add_child(&mut self, parent: WidgetId, child: WidgetId) -> UiResult {
        self.link_child(parent, child, None)
    }

    /// Insert `child` at `index` in `parent`'s child list.
    ///
    /// # Errors
    ///
    /// As [`add_child`](Self::add_child), plus
    /// [`UiError::IndexOutOfRange`] if `index` exceeds the child count.
    pub fn insert_child_at(&mut self, parent: WidgetId, child: WidgetId, index: usize) -> UiResult {
        self.link_child(parent, child, Some(index))
    }

    fn link_child(&mut self, parent: WidgetId, child: WidgetId, index: Option<usize>) -> UiResult {
        if !self.contains(child) || !self.contains(parent) {
            return Err(UiError::DeadWidget);
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(UiError::CycleDetected);
        }

        // Validate capacity and index before detaching so failure leaves
        // the previous parent link intact.
        {
            let node = self.node(parent).ok_or(UiError::DeadWidget)?;
            let count = node.children.len();
            let already_here = node.children.iter().any(|c| *c == child);
            let effective = if already_here {
                count.saturating_sub(1)
            } else {
                count
            };
            if effective >= MAX_CHILDREN {
                return Err(UiError::CapacityExceeded);
            }
            if let Some(i) = index {
                if i > effective {
                    return Err(UiError::IndexOutOfRange);
                }
            }
        }

        self.detach(child)?;

        let node = self.node_mut(parent).ok_or(UiError::DeadWidget)?;
        match index {
            Some(i) => node
                .children
                .insert(i, child)
                .map_err(|_| UiError::CapacityExceeded)?,
            None => node
                .children
                .push(child)
                .map_err(|_| UiError::CapacityExceeded)?,
        }
        if let Some(child_node) = self.node_mut(child) {
            child_node.parent = Some(parent);
            child_node.common.mark_dirty();
        }
        self.propagate_dirty(child);
        Ok(())
    }

    /// Remove `child` from `parent`'s child list. The child stays
    /// allocated (detached) and its parent link is nulled.
    ///
    /// # Errors
    ///
    /// [`UiError::DeadWidget`] for stale handles, [`UiError::NotAChild`]
    /// if the link does not exist.
    pub fn remove_child(&mut self, parent: WidgetId, child: WidgetId) -> UiResult {
        if self.parent(child)? != Some(parent) {
            return Err(UiError::NotAChild);
        }
        // Vacated pixels: the parent repaints the area the child covered.
        if let Ok(child_rect) = self.common(child).map(WidgetCommon::rect) {
            if let Ok(parent_common) = self.common_mut(parent) {
                parent_common.mark_damage(child_rect);
            }
        }
        self.detach(child)?;
        self.propagate_dirty(parent);
        Ok(())
    }

    /// Unlink a widget from its parent, if any.
    pub(crate) fn detach(&mut self, child: WidgetId) -> UiResult {
        let parent = self.parent(child)?;
        let Some(parent) = parent else {
            return Ok(());
        };
        if let Some(parent_node) = self.node_mut(parent) {
            if let Some(pos) = parent_node.children.iter().position(|c| *c == child) {
                parent_node.children.remove(pos);
            }
        }
        if let Some(child_node) = self.node_mut(child) {
            child_node.parent = None;
        }
        Ok(())
    }

    fn is_ancestor_or_self(&self, candidate: WidgetId, mut of: WidgetId) -> bool {
        loop {
            if candidate == of {
                return true;
            }
            match self.node(of).and_then(|n| n.parent) {
                Some(p) => of = p,
                None => return false,
            }
        }
    }

    /// Absolute screen-space bounds of a widget (ancestor offsets summed).
    ///
    /// # Errors
    ///
    /// [`UiError::DeadWidget`] if the handle is stale.
    pub fn screen_rect(&self, id: WidgetId) -> UiResult<Rectangle> {
        let mut rect = self.common(id)?.rect();
        let mut current = id;
        while let Some(parent) = self.node(current).and_then(|n| n.parent) {
            let offset = self.common(parent)?.rect().top_left;
            rect = crate::rect::translate(&rect, offset);
            current = parent;
        }
        Ok(rect)
    }

    /// Topmost visible widget under `point` (screen coordinates) within
    /// the subtree rooted at `root`, or `None`.
    ///
    /// Children are tested before their parent, last child first (last is
    /// topmost in z-order). Invisible subtrees are skipped entirely.
    #[must_use]
    pub fn hit_test(&self, root: WidgetId, point: Point) -> Option<WidgetId> {
        self.hit_test_inner(root, Point::zero(), point)
    }

    fn hit_test_inner(&self, id: WidgetId, origin: Point, point: Point) -> Option<WidgetId> {
        let node = self.node(id)?;
        if !node.common.visible {
            return None;
        }
        let frame = crate::rect::translate(&node.common.rect(), origin);
        if !frame.contains(point) {
            return None;
        }
        for child in node.children.iter().rev() {
            if let Some(hit) = self.hit_test_inner(*child, frame.top_left, point) {
                return Some(hit);
            }
        }
        Some(id)
    }

    /// Pre-order traversal of the subtree rooted at `root`, including
    /// `root` itself. Parents are yielded before children; siblings in
    /// z-order.
    pub fn descendants(&self, root: WidgetId) -> Descendants<'_, W> {
        let mut stack = Vec::new();
        if self.contains(root) {
            stack.push(root).ok();
        }
        Descendants { tree: self, stack }
    }

    /// Mark `id` dirty and walk its ancestry: a transparent ancestor
    /// (background `None`) must itself repaint through the child, so it
    /// becomes `Dirty`; opaque ancestors are promoted to `ChildDirty` so
    /// the paint walk descends to the damage.
    pub fn invalidate(&mut self, id: WidgetId) -> UiResult {
        self.common_mut(id)?.mark_dirty();
        self.propagate_dirty(id);
        Ok(())
    }

    pub(crate) fn propagate_dirty(&mut self, id: WidgetId) {
        let mut current = id;
        while let Some(parent) = self.node(current).and_then(|n| n.parent) {
            if let Some(parent_node) = self.node_mut(parent) {
                if parent_node.common.background == Background::None {
                    parent_node.common.mark_dirty();
                } else {
                    parent_node.common.mark_child_dirty();
                }
            }
            current = parent;
        }
    }
}

/// Iterator returned by [`WidgetTree::descendants`].
pub struct Descendants<'a, W> {
    tree: &'a WidgetTree<W>,
    stack: Vec<WidgetId, MAX_WIDGETS>,
}

impl<W> Iterator for Descendants<'_, W> {
    type Item = WidgetId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        if let Some(node) = self.tree.node(id) {
            // Push in reverse so the first child is popped first.
            for child in node.children.iter().rev() {
                self.stack.push(*child).ok();
            }
        }
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{Behavior, DirtyState};

    struct Probe;
    impl Behavior for Probe {}

    fn rect(x: i32, y: i32, w: u32, h: u32) -> Rectangle {
        Rectangle::new(Point::new(x, y), Size::new(w, h))
    }

    fn tree_with_root() -> (WidgetTree<Probe>, WidgetId) {
        let mut tree = WidgetTree::new();
        let root = tree.alloc(Probe, rect(0, 0, 320, 240)).unwrap();
        (tree, root)
    }

    #[test]
    fn test_alloc_rejects_zero_size() {
        let mut tree: WidgetTree<Probe> = WidgetTree::new();
        assert_eq!(tree.alloc(Probe, rect(0, 0, 0, 10)), Err(UiError::InvalidSize));
        assert!(tree.is_empty());
    }

    #[test]
    fn test_stale_handle_after_remove() {
        let (mut tree, root) = tree_with_root();
        tree.remove(root).unwrap();
        assert!(!tree.contains(root));
        assert_eq!(tree.common(root).err(), Some(UiError::DeadWidget));
    }

    #[test]
    fn test_slot_reuse_bumps_generation() {
        let (mut tree, root) = tree_with_root();
        tree.remove(root).unwrap();
        let reused = tree.alloc(Probe, rect(0, 0, 10, 10)).unwrap();
        // Same slot, different generation: the old handle stays dead.
        assert!(tree.contains(reused));
        assert!(!tree.contains(root));
        assert_ne!(root, reused);
    }

    #[test]
    fn test_add_then_remove_child_restores_count() {
        let (mut tree, root) = tree_with_root();
        let before = tree.child_count(root).unwrap();
        let child = tree.alloc(Probe, rect(10, 10, 50, 20)).unwrap();

        tree.add_child(root, child).unwrap();
        assert_eq!(tree.child_count(root).unwrap(), before + 1);
        assert_eq!(tree.parent(child).unwrap(), Some(root));

        tree.remove_child(root, child).unwrap();
        assert_eq!(tree.child_count(root).unwrap(), before);
        assert_eq!(tree.parent(child).unwrap(), None);
    }

    #[test]
    fn test_reparent_detaches_first() {
        let (mut tree, root) = tree_with_root();
        let a = tree.alloc(Probe, rect(0, 0, 100, 100)).unwrap();
        let b = tree.alloc(Probe, rect(100, 0, 100, 100)).unwrap();
        let child = tree.alloc(Probe, rect(5, 5, 10, 10)).unwrap();
        tree.add_child(root, a).unwrap();
        tree.add_child(root, b).unwrap();

        tree.add_child(a, child).unwrap();
        tree.add_child(b, child).unwrap();

        assert_eq!(tree.child_count(a).unwrap(), 0);
        assert_eq!(tree.child_count(b).unwrap(), 1);
        assert_eq!(tree.parent(child).unwrap(), Some(b));
    }

    #[test]
    fn test_cycle_rejected() {
        let (mut tree, root) = tree_with_root();
        let child = tree.alloc(Probe, rect(0, 0, 10, 10)).unwrap();
        tree.add_child(root, child).unwrap();

        assert_eq!(tree.add_child(child, root), Err(UiError::CycleDetected));
        assert_eq!(tree.add_child(root, root), Err(UiError::CycleDetected));
        // Failure left the original link intact.
        assert_eq!(tree.parent(child).unwrap(), Some(root));
    }

    #[test]
    fn test_insert_child_at_orders() {
        let (mut tree, root) = tree_with_root();
        let a = tree.alloc(Probe, rect(0, 0, 10, 10)).unwrap();
        let b = tree.alloc(Probe, rect(0, 0, 10, 10)).unwrap();
        let c = tree.alloc(Probe, rect(0, 0, 10, 10)).unwrap();
        tree.add_child(root, a).unwrap();
        tree.add_child(root, b).unwrap();
        tree.insert_child_at(root, c, 1).unwrap();

        assert_eq!(tree.child_at(root, 0).unwrap(), a);
        assert_eq!(tree.child_at(root, 1).unwrap(), c);
        assert_eq!(tree.child_at(root, 2).unwrap(), b);
        assert_eq!(tree.index_of_child(root, c).unwrap(), 1);
    }

    #[test]
    fn test_insert_child_at_out_of_range() {
        let (mut tree, root) = tree_with_root();
        let a = tree.alloc(Probe, rect(0, 0, 10, 10)).unwrap();
        assert_eq!(
            tree.insert_child_at(root, a, 1),
            Err(UiError::IndexOutOfRange)
        );
        assert_eq!(tree.parent(a).unwrap(), None);
    }

    #[test]
    fn test_child_at_out_of_range() {
        let (tree, root) = tree_with_root();
        assert_eq!(tree.child_at(root, 0), Err(UiError::IndexOutOfRange));
    }

    #[test]
    fn test_remove_child_not_a_child() {
        let (mut tree, root) = tree_with_root();
        let stray = tree.alloc(Probe, rect(0, 0, 10, 10)).unwrap();
        assert_eq!(tree.remove_child(root, stray), Err(UiError::NotAChild));
    }

    #[test]
    fn test_recursive_remove_frees_descendants() {
        let (mut tree, root) = tree_with_root();
        let mid = tree.alloc(Probe, rect(0, 0, 50, 50)).unwrap();
        let leaf = tree.alloc(Probe, rect(0, 0, 10, 10)).unwrap();
        tree.add_child(root, mid).unwrap();
        tree.add_child(mid, leaf).unwrap();
        assert_eq!(tree.len(), 3);

        tree.remove(mid).unwrap();
        assert_eq!(tree.len(), 1);
        assert!(!tree.contains(mid));
        assert!(!tree.contains(leaf));
        assert_eq!(tree.child_count(root).unwrap(), 0);
    }

    #[test]
    fn test_screen_rect_sums_ancestor_offsets() {
        let (mut tree, root) = tree_with_root();
        let panel = tree.alloc(Probe, rect(10, 20, 100, 100)).unwrap();
        let label = tree.alloc(Probe, rect(5, 5, 40, 10)).unwrap();
        tree.add_child(root, panel).unwrap();
        tree.add_child(panel, label).unwrap();

        assert_eq!(
            tree.screen_rect(label).unwrap(),
            rect(15, 25, 40, 10)
        );
    }

    #[test]
    fn test_hit_test_topmost_wins() {
        let (mut tree, root) = tree_with_root();
        let below = tree.alloc(Probe, rect(10, 10, 100, 100)).unwrap();
        let above = tree.alloc(Probe, rect(50, 50, 100, 100)).unwrap();
        tree.add_child(root, below).unwrap();
        tree.add_child(root, above).unwrap();

        // Overlap region: the later sibling is topmost.
        assert_eq!(tree.hit_test(root, Point::new(60, 60)), Some(above));
        // Only the lower widget covers this point.
        assert_eq!(tree.hit_test(root, Point::new(15, 15)), Some(below));
        // Neither child: the root itself.
        assert_eq!(tree.hit_test(root, Point::new(300, 5)), Some(root));
        // Outside everything.
        assert_eq!(tree.hit_test(root, Point::new(1000, 0)), None);
    }

    #[test]
    fn test_hit_test_skips_invisible() {
        let (mut tree, root) = tree_with_root();
        let hidden = tree.alloc(Probe, rect(10, 10, 50, 50)).unwrap();
        tree.add_child(root, hidden).unwrap();
        tree.common_mut(hidden).unwrap().visible = false;

        assert_eq!(tree.hit_test(root, Point::new(20, 20)), Some(root));
    }

    #[test]
    fn test_descendants_preorder() {
        let (mut tree, root) = tree_with_root();
        let a = tree.alloc(Probe, rect(0, 0, 10, 10)).unwrap();
        let b = tree.alloc(Probe, rect(0, 0, 10, 10)).unwrap();
        let a1 = tree.alloc(Probe, rect(0, 0, 5, 5)).unwrap();
        tree.add_child(root, a).unwrap();
        tree.add_child(root, b).unwrap();
        tree.add_child(a, a1).unwrap();

        let order: std::vec::Vec<WidgetId> = tree.descendants(root).collect();
        assert_eq!(order, std::vec![root, a, a1, b]);
    }

    #[test]
    fn test_invalidate_promotes_opaque_ancestors_to_child_dirty() {
        let (mut tree, root) = tree_with_root();
        let child = tree.alloc(Probe, rect(0, 0, 10, 10)).unwrap();
        tree.add_child(root, child).unwrap();
        for id in [root, child] {
            tree.common_mut(id).unwrap().mark_clean();
        }

        tree.invalidate(child).unwrap();
        assert_eq!(tree.common(child).unwrap().dirty(), DirtyState::Dirty);
        assert_eq!(tree.common(root).unwrap().dirty(), DirtyState::ChildDirty);
    }

    #[test]
    fn test_invalidate_dirties_transparent_ancestors() {
        let (mut tree, root) = tree_with_root();
        let overlay = tree.alloc(Probe, rect(0, 0, 100, 100)).unwrap();
        let leaf = tree.alloc(Probe, rect(0, 0, 10, 10)).unwrap();
        tree.add_child(root, overlay).unwrap();
        tree.add_child(overlay, leaf).unwrap();
        tree.common_mut(overlay).unwrap().background = Background::None;
        for id in [root, overlay, leaf] {
            tree.common_mut(id).unwrap().mark_clean();
        }

        tree.invalidate(leaf).unwrap();
        // Transparent parent repaints through the child.
        assert_eq!(tree.common(overlay).unwrap().dirty(), DirtyState::Dirty);
        // Opaque grandparent only needs to descend.
        assert_eq!(tree.common(root).unwrap().dirty(), DirtyState::ChildDirty);
    }

    #[test]
    fn test_capacity_exceeded_at_max_widgets() {
        let mut tree: WidgetTree<Probe> = WidgetTree::new();
        for _ in 0..MAX_WIDGETS {
            tree.alloc(Probe, rect(0, 0, 1, 1)).unwrap();
        }
        assert_eq!(
            tree.alloc(Probe, rect(0, 0, 1, 1)),
            Err(UiError::CapacityExceeded)
        );
    }

    #[test]
    fn test_child_capacity_exceeded() {
        let (mut tree, root) = tree_with_root();
        for _ in 0..MAX_CHILDREN {
            let c = tree.alloc(Probe, rect(0, 0, 1, 1)).unwrap();
            tree.add_child(root, c).unwrap();
        }
        let extra = tree.alloc(Probe, rect(0, 0, 1, 1)).unwrap();
        assert_eq!(tree.add_child(root, extra), Err(UiError::CapacityExceeded));
        assert_eq!(tree.parent(extra).unwrap(), None);
    }
}
