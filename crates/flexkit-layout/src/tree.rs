//! Node arena: tree structure, styles and computed results.

use crate::axis::{physical_edge, Axis};
use crate::box_model::{Dimensions, EdgeSizes};
use crate::config::Config;
use crate::LayoutError;
use flexkit_style::{
    AlignContent, AlignItems, AlignSelf, BoxSizing, Direction, Display, Edge, FlexDirection,
    FlexWrap, Gutter, JustifyContent, PositionType, Style, StyleInput,
};
use std::fmt;
use tracing::trace;

/// Handle to a node in a [`LayoutTree`].
///
/// Handles carry a generation, so a handle to a freed node stays invalid even
/// after its slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    /// Slot index in the arena.
    pub fn index(&self) -> usize {
        self.index as usize
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// Result of the last layout pass for one node.
///
/// `left`/`top` are relative to the parent's border-box origin and
/// `width`/`height` are border-box sizes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ComputedLayout {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub margin: EdgeSizes,
    pub border: EdgeSizes,
    pub padding: EdgeSizes,
    /// Resolved writing direction, never `Inherit` after layout.
    pub direction: Direction,
}

impl ComputedLayout {
    /// Size and edges, without position.
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
            margin: self.margin,
            border: self.border,
            padding: self.padding,
        }
    }

    pub(crate) fn size(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Node {
    pub(crate) style: Style,
    pub(crate) layout: ComputedLayout,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Arena owning every node of one or more layout trees.
#[derive(Debug, Default)]
pub struct LayoutTree {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
    config: Config,
}

impl LayoutTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    // ==================== Node lifecycle ====================

    /// Create a detached node with the default style.
    pub fn new_node(&mut self) -> NodeId {
        let node = Node::default();
        self.live += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId {
            index,
            generation: 0,
        }
    }

    /// Create a detached node with `style`, validating it first.
    pub fn new_node_with_style(&mut self, style: Style) -> Result<NodeId, LayoutError> {
        style.validate()?;
        let id = self.new_node();
        self.node_mut(id)?.style = style;
        Ok(id)
    }

    /// Whether `id` refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_ok()
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.live
    }

    pub(crate) fn node(&self, id: NodeId) -> Result<&Node, LayoutError> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
            .ok_or(LayoutError::UnknownNode(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, LayoutError> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
            .ok_or(LayoutError::UnknownNode(id))
    }

    fn release(&mut self, id: NodeId) {
        if let Some(slot) = self.slots.get_mut(id.index()) {
            if slot.generation == id.generation && slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(id.index);
                self.live -= 1;
            }
        }
    }

    // ==================== Tree structure ====================

    /// Insert `child` into `parent`'s child list at `index`.
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        child: NodeId,
        index: usize,
    ) -> Result<(), LayoutError> {
        let count = self.node(parent)?.children.len();
        if self.node(child)?.parent.is_some() {
            return Err(LayoutError::AlreadyParented { child });
        }
        if index > count {
            return Err(LayoutError::IndexOutOfRange { index, count });
        }

        // `child` must not be `parent` or one of its ancestors.
        let mut current = Some(parent);
        while let Some(ancestor) = current {
            if ancestor == child {
                return Err(LayoutError::Cycle { parent, child });
            }
            current = self.node(ancestor)?.parent;
        }

        self.node_mut(parent)?.children.insert(index, child);
        self.node_mut(child)?.parent = Some(parent);
        trace!(%parent, %child, index, "inserted child");
        Ok(())
    }

    /// Append `child` to `parent`'s child list.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), LayoutError> {
        let count = self.child_count(parent)?;
        self.insert_child(parent, child, count)
    }

    /// Detach `child` from `parent`. The child stays alive.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), LayoutError> {
        let children = &mut self.node_mut(parent)?.children;
        let position = children
            .iter()
            .position(|&c| c == child)
            .ok_or(LayoutError::NotAChild { parent, child })?;
        children.remove(position);
        self.node_mut(child)?.parent = None;
        Ok(())
    }

    pub fn child_count(&self, parent: NodeId) -> Result<usize, LayoutError> {
        Ok(self.node(parent)?.children.len())
    }

    pub fn child_at(&self, parent: NodeId, index: usize) -> Result<NodeId, LayoutError> {
        let children = &self.node(parent)?.children;
        children
            .get(index)
            .copied()
            .ok_or(LayoutError::IndexOutOfRange {
                index,
                count: children.len(),
            })
    }

    pub fn children(&self, parent: NodeId) -> Result<&[NodeId], LayoutError> {
        Ok(&self.node(parent)?.children)
    }

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, LayoutError> {
        Ok(self.node(id)?.parent)
    }

    /// Free one node. Its children are detached and stay alive.
    pub fn remove_node(&mut self, id: NodeId) -> Result<(), LayoutError> {
        let node = self.node(id)?;
        let parent = node.parent;
        let children = node.children.clone();

        if let Some(parent) = parent {
            self.remove_child(parent, id)?;
        }
        for child in children {
            self.node_mut(child)?.parent = None;
        }
        self.release(id);
        Ok(())
    }

    /// Free a node together with its whole subtree.
    pub fn free_recursive(&mut self, id: NodeId) -> Result<(), LayoutError> {
        if let Some(parent) = self.node(id)?.parent {
            self.remove_child(parent, id)?;
        }

        let mut stack = vec![id];
        let mut freed = 0usize;
        while let Some(current) = stack.pop() {
            stack.extend_from_slice(&self.node(current)?.children);
            self.release(current);
            freed += 1;
        }
        trace!(root = %id, freed, "freed subtree");
        Ok(())
    }

    // ==================== Style ====================

    pub fn style(&self, id: NodeId) -> Result<&Style, LayoutError> {
        Ok(&self.node(id)?.style)
    }

    /// Replace a node's whole style, validating it first.
    pub fn set_style(&mut self, id: NodeId, style: Style) -> Result<(), LayoutError> {
        style.validate()?;
        self.node_mut(id)?.style = style;
        Ok(())
    }

    pub fn set_margin(
        &mut self,
        id: NodeId,
        edge: Edge,
        value: impl StyleInput,
    ) -> Result<(), LayoutError> {
        Ok(self.node_mut(id)?.style.set_margin(edge, value)?)
    }

    pub fn set_border(
        &mut self,
        id: NodeId,
        edge: Edge,
        value: impl StyleInput,
    ) -> Result<(), LayoutError> {
        Ok(self.node_mut(id)?.style.set_border(edge, value)?)
    }

    pub fn set_padding(
        &mut self,
        id: NodeId,
        edge: Edge,
        value: impl StyleInput,
    ) -> Result<(), LayoutError> {
        Ok(self.node_mut(id)?.style.set_padding(edge, value)?)
    }

    /// Set an inset.
    pub fn set_position(
        &mut self,
        id: NodeId,
        edge: Edge,
        value: impl StyleInput,
    ) -> Result<(), LayoutError> {
        Ok(self.node_mut(id)?.style.set_position(edge, value)?)
    }

    pub fn set_width(&mut self, id: NodeId, value: impl StyleInput) -> Result<(), LayoutError> {
        Ok(self.node_mut(id)?.style.set_width(value)?)
    }

    pub fn set_height(&mut self, id: NodeId, value: impl StyleInput) -> Result<(), LayoutError> {
        Ok(self.node_mut(id)?.style.set_height(value)?)
    }

    pub fn set_min_width(&mut self, id: NodeId, value: impl StyleInput) -> Result<(), LayoutError> {
        Ok(self.node_mut(id)?.style.set_min_width(value)?)
    }

    pub fn set_max_width(&mut self, id: NodeId, value: impl StyleInput) -> Result<(), LayoutError> {
        Ok(self.node_mut(id)?.style.set_max_width(value)?)
    }

    pub fn set_min_height(
        &mut self,
        id: NodeId,
        value: impl StyleInput,
    ) -> Result<(), LayoutError> {
        Ok(self.node_mut(id)?.style.set_min_height(value)?)
    }

    pub fn set_max_height(
        &mut self,
        id: NodeId,
        value: impl StyleInput,
    ) -> Result<(), LayoutError> {
        Ok(self.node_mut(id)?.style.set_max_height(value)?)
    }

    pub fn set_gap(
        &mut self,
        id: NodeId,
        gutter: Gutter,
        value: impl StyleInput,
    ) -> Result<(), LayoutError> {
        Ok(self.node_mut(id)?.style.set_gap(gutter, value)?)
    }

    pub fn set_position_type(
        &mut self,
        id: NodeId,
        position_type: PositionType,
    ) -> Result<(), LayoutError> {
        self.node_mut(id)?.style.position_type = position_type;
        Ok(())
    }

    pub fn set_flex_direction(
        &mut self,
        id: NodeId,
        flex_direction: FlexDirection,
    ) -> Result<(), LayoutError> {
        self.node_mut(id)?.style.flex_direction = flex_direction;
        Ok(())
    }

    pub fn set_justify_content(
        &mut self,
        id: NodeId,
        justify_content: JustifyContent,
    ) -> Result<(), LayoutError> {
        self.node_mut(id)?.style.justify_content = justify_content;
        Ok(())
    }

    pub fn set_align_items(
        &mut self,
        id: NodeId,
        align_items: AlignItems,
    ) -> Result<(), LayoutError> {
        self.node_mut(id)?.style.align_items = align_items;
        Ok(())
    }

    pub fn set_flex_wrap(&mut self, id: NodeId, flex_wrap: FlexWrap) -> Result<(), LayoutError> {
        self.node_mut(id)?.style.flex_wrap = flex_wrap;
        Ok(())
    }

    pub fn set_align_content(
        &mut self,
        id: NodeId,
        align_content: AlignContent,
    ) -> Result<(), LayoutError> {
        self.node_mut(id)?.style.align_content = align_content;
        Ok(())
    }

    pub fn set_align_self(&mut self, id: NodeId, align_self: AlignSelf) -> Result<(), LayoutError> {
        self.node_mut(id)?.style.align_self = align_self;
        Ok(())
    }

    pub fn set_direction(&mut self, id: NodeId, direction: Direction) -> Result<(), LayoutError> {
        self.node_mut(id)?.style.direction = direction;
        Ok(())
    }

    pub fn set_display(&mut self, id: NodeId, display: Display) -> Result<(), LayoutError> {
        self.node_mut(id)?.style.display = display;
        Ok(())
    }

    pub fn set_box_sizing(&mut self, id: NodeId, box_sizing: BoxSizing) -> Result<(), LayoutError> {
        self.node_mut(id)?.style.box_sizing = box_sizing;
        Ok(())
    }

    // ==================== Computed results ====================

    pub fn computed_layout(&self, id: NodeId) -> Result<ComputedLayout, LayoutError> {
        Ok(self.node(id)?.layout)
    }

    pub fn computed_left(&self, id: NodeId) -> Result<f32, LayoutError> {
        Ok(self.node(id)?.layout.left)
    }

    pub fn computed_top(&self, id: NodeId) -> Result<f32, LayoutError> {
        Ok(self.node(id)?.layout.top)
    }

    pub fn computed_width(&self, id: NodeId) -> Result<f32, LayoutError> {
        Ok(self.node(id)?.layout.width)
    }

    pub fn computed_height(&self, id: NodeId) -> Result<f32, LayoutError> {
        Ok(self.node(id)?.layout.height)
    }

    /// Resolved margin on one side. `Start`/`End` follow the node's resolved
    /// direction.
    pub fn computed_margin(&self, id: NodeId, edge: Edge) -> Result<f32, LayoutError> {
        self.computed_edge(id, edge, |layout| &layout.margin)
    }

    pub fn computed_border(&self, id: NodeId, edge: Edge) -> Result<f32, LayoutError> {
        self.computed_edge(id, edge, |layout| &layout.border)
    }

    pub fn computed_padding(&self, id: NodeId, edge: Edge) -> Result<f32, LayoutError> {
        self.computed_edge(id, edge, |layout| &layout.padding)
    }

    fn computed_edge(
        &self,
        id: NodeId,
        edge: Edge,
        select: impl Fn(&ComputedLayout) -> &EdgeSizes,
    ) -> Result<f32, LayoutError> {
        let layout = &self.node(id)?.layout;
        let side = physical_edge(edge, layout.direction).ok_or(LayoutError::AmbiguousEdge(edge))?;
        Ok(select(layout).get(side))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flexkit_style::StyleValue;

    #[test]
    fn test_insert_and_query_children() {
        let mut tree = LayoutTree::new();
        let root = tree.new_node();
        let a = tree.new_node();
        let b = tree.new_node();
        let c = tree.new_node();

        tree.add_child(root, a).unwrap();
        tree.add_child(root, c).unwrap();
        tree.insert_child(root, b, 1).unwrap();

        assert_eq!(tree.children(root).unwrap(), &[a, b, c]);
        assert_eq!(tree.child_at(root, 2).unwrap(), c);
        assert_eq!(tree.child_count(root).unwrap(), 3);
        assert_eq!(tree.parent(b).unwrap(), Some(root));
        assert_eq!(tree.parent(root).unwrap(), None);
    }

    #[test]
    fn test_structural_errors() {
        let mut tree = LayoutTree::new();
        let root = tree.new_node();
        let child = tree.new_node();
        let other = tree.new_node();

        assert_eq!(
            tree.insert_child(root, child, 1),
            Err(LayoutError::IndexOutOfRange { index: 1, count: 0 })
        );
        tree.add_child(root, child).unwrap();
        assert_eq!(
            tree.add_child(other, child),
            Err(LayoutError::AlreadyParented { child })
        );
        assert_eq!(
            tree.add_child(child, root),
            Err(LayoutError::Cycle {
                parent: child,
                child: root
            })
        );
        assert_eq!(
            tree.add_child(root, root),
            Err(LayoutError::Cycle {
                parent: root,
                child: root
            })
        );
        assert_eq!(
            tree.remove_child(other, child),
            Err(LayoutError::NotAChild {
                parent: other,
                child
            })
        );
        assert!(matches!(
            tree.child_at(root, 5),
            Err(LayoutError::IndexOutOfRange { index: 5, count: 1 })
        ));
    }

    #[test]
    fn test_remove_child_keeps_node() {
        let mut tree = LayoutTree::new();
        let root = tree.new_node();
        let child = tree.new_node();
        tree.add_child(root, child).unwrap();
        tree.remove_child(root, child).unwrap();

        assert_eq!(tree.child_count(root).unwrap(), 0);
        assert_eq!(tree.parent(child).unwrap(), None);
        assert!(tree.contains(child));
        tree.add_child(root, child).unwrap();
    }

    #[test]
    fn test_remove_node_detaches_children() {
        let mut tree = LayoutTree::new();
        let root = tree.new_node();
        let middle = tree.new_node();
        let leaf = tree.new_node();
        tree.add_child(root, middle).unwrap();
        tree.add_child(middle, leaf).unwrap();

        tree.remove_node(middle).unwrap();
        assert!(!tree.contains(middle));
        assert_eq!(tree.child_count(root).unwrap(), 0);
        assert_eq!(tree.parent(leaf).unwrap(), None);
        assert_eq!(tree.node_count(), 2);
    }

    #[test]
    fn test_free_recursive_and_stale_handles() {
        let mut tree = LayoutTree::new();
        let root = tree.new_node();
        let child = tree.new_node();
        let grandchild = tree.new_node();
        tree.add_child(root, child).unwrap();
        tree.add_child(child, grandchild).unwrap();

        tree.free_recursive(root).unwrap();
        assert_eq!(tree.node_count(), 0);
        assert_eq!(tree.computed_width(grandchild), Err(LayoutError::UnknownNode(grandchild)));

        // Reused slots get a new generation.
        let reused = tree.new_node();
        assert_ne!(reused, root);
        assert_ne!(reused, child);
        assert_ne!(reused, grandchild);
        assert!(!tree.contains(grandchild));
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn test_style_setters_validate() {
        let mut tree = LayoutTree::new();
        let node = tree.new_node();

        tree.set_width(node, "50%").unwrap();
        tree.set_margin(node, Edge::Start, -5.0).unwrap();
        assert_eq!(tree.style(node).unwrap().width, StyleValue::Percent(50.0));

        assert!(matches!(
            tree.set_padding(node, Edge::Top, -1.0),
            Err(LayoutError::Style(_))
        ));
        assert!(matches!(
            tree.set_height(node, "tall"),
            Err(LayoutError::Style(_))
        ));

        let mut bad = Style::default();
        bad.width = StyleValue::Point(-10.0);
        assert!(tree.set_style(node, bad.clone()).is_err());
        assert!(tree.new_node_with_style(bad).is_err());
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn test_computed_edge_rejects_shorthand() {
        let mut tree = LayoutTree::new();
        let node = tree.new_node();
        assert_eq!(
            tree.computed_margin(node, Edge::Horizontal),
            Err(LayoutError::AmbiguousEdge(Edge::Horizontal))
        );
        assert_eq!(tree.computed_padding(node, Edge::Start).unwrap(), 0.0);
    }
}
