//! Layout entry point.

use crate::box_model::{resolve_edges, Size};
use crate::flow::layout_node;
use crate::positioned::{position_absolute, relative_offset};
use crate::rounding::round_layout;
use crate::tree::{LayoutTree, NodeId};
use crate::LayoutError;
use flexkit_style::{Direction, Display, PositionType};
use tracing::{debug, debug_span};

fn check_available(size: Option<f32>) -> Result<Option<f32>, LayoutError> {
    match size {
        Some(value) if !value.is_finite() || value < 0.0 => {
            Err(LayoutError::InvalidAvailableSize(value))
        }
        other => Ok(other),
    }
}

impl LayoutTree {
    /// Compute the layout of the tree rooted at `root`.
    ///
    /// `width` and `height` are the space available to the root; `None`
    /// leaves that dimension to the root's style or content. Every call
    /// recomputes the whole subtree, so it can be repeated with a different
    /// `direction`.
    pub fn calculate_layout(
        &mut self,
        root: NodeId,
        width: Option<f32>,
        height: Option<f32>,
        direction: Direction,
    ) -> Result<(), LayoutError> {
        let available = Size::new(check_available(width)?, check_available(height)?);
        let direction = direction.resolve(Direction::Ltr);

        let span = debug_span!("calculate_layout", root = %root, ?width, ?height, ?direction);
        let _enter = span.enter();

        self.layout_root(root, available, direction)?;
        self.position_absolute_nodes(root)?;

        let scale = self.config().point_scale_factor();
        if self.config().rounds_to_pixel_grid() {
            round_layout(self, root, scale)?;
        }

        let layout = self.computed_layout(root)?;
        debug!(width = layout.width, height = layout.height, "layout complete");
        Ok(())
    }

    /// Size the root, place it at its margin and lay out its in-flow subtree.
    fn layout_root(
        &mut self,
        root: NodeId,
        available: Size<Option<f32>>,
        direction: Direction,
    ) -> Result<(), LayoutError> {
        let style = self.style(root)?.clone();
        let root_direction = style.direction.resolve(direction);
        let margin = resolve_edges(&style.margin, root_direction, available);

        // Without a style size the root fills the available space.
        let fill = |size: Option<f32>, margins: f32, has_style_size: bool| {
            if has_style_size {
                None
            } else {
                size.map(|size| (size - margins).max(0.0))
            }
        };
        let forced = Size::new(
            fill(available.width, margin.horizontal(), style.width.is_numeric()),
            fill(available.height, margin.vertical(), style.height.is_numeric()),
        );

        layout_node(self, root, available, forced, direction)?;

        let (dx, dy) = if style.position_type.is_positioned() {
            relative_offset(&style.position, root_direction, available)
        } else {
            (0.0, 0.0)
        };
        let layout = &mut self.node_mut(root)?.layout;
        layout.left = margin.left + dx;
        layout.top = margin.top + dy;
        Ok(())
    }

    /// Place absolute nodes in pre-order, so that every node's parent and
    /// containing block are final before the node itself is placed.
    fn position_absolute_nodes(&mut self, root: NodeId) -> Result<(), LayoutError> {
        let mut stack: Vec<NodeId> = self.children(root)?.iter().rev().copied().collect();
        let mut placed = 0usize;

        while let Some(id) = stack.pop() {
            let node = self.node(id)?;
            if node.style.display == Display::None {
                continue;
            }
            let is_absolute = node.style.position_type == PositionType::Absolute;
            stack.extend(node.children.iter().rev().copied());

            if is_absolute {
                position_absolute(self, id, root)?;
                placed += 1;
            }
        }

        if placed > 0 {
            debug!(placed, "positioned absolute nodes");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flexkit_style::Edge;

    #[test]
    fn test_rejects_invalid_available_size() {
        let mut tree = LayoutTree::new();
        let root = tree.new_node();
        assert_eq!(
            tree.calculate_layout(root, Some(-1.0), None, Direction::Ltr),
            Err(LayoutError::InvalidAvailableSize(-1.0))
        );
        assert!(tree
            .calculate_layout(root, None, Some(f32::INFINITY), Direction::Ltr)
            .is_err());
    }

    #[test]
    fn test_unknown_root() {
        let mut tree = LayoutTree::new();
        let root = tree.new_node();
        tree.free_recursive(root).unwrap();
        assert_eq!(
            tree.calculate_layout(root, None, None, Direction::Ltr),
            Err(LayoutError::UnknownNode(root))
        );
    }

    #[test]
    fn test_root_fills_available_space() {
        let mut tree = LayoutTree::new();
        let root = tree.new_node();
        tree.set_margin(root, Edge::All, 10.0).unwrap();
        tree.calculate_layout(root, Some(300.0), Some(200.0), Direction::Ltr)
            .unwrap();

        let layout = tree.computed_layout(root).unwrap();
        assert_eq!((layout.left, layout.top), (10.0, 10.0));
        assert_eq!((layout.width, layout.height), (280.0, 180.0));
    }

    #[test]
    fn test_empty_root_without_space_is_zero() {
        let mut tree = LayoutTree::new();
        let root = tree.new_node();
        tree.set_padding(root, Edge::Horizontal, 4.0).unwrap();
        tree.calculate_layout(root, None, None, Direction::Inherit)
            .unwrap();
        assert_eq!(tree.computed_width(root).unwrap(), 8.0);
        assert_eq!(tree.computed_height(root).unwrap(), 0.0);
        assert_eq!(tree.computed_layout(root).unwrap().direction, Direction::Ltr);
    }

    #[test]
    fn test_display_none_subtree_is_empty() {
        let mut tree = LayoutTree::new();
        let root = tree.new_node();
        tree.set_width(root, 100.0).unwrap();
        tree.set_height(root, 100.0).unwrap();
        let hidden = tree.new_node();
        tree.set_height(hidden, 40.0).unwrap();
        tree.set_display(hidden, Display::None).unwrap();
        let inner = tree.new_node();
        tree.set_position_type(inner, PositionType::Absolute).unwrap();
        tree.set_width(inner, 10.0).unwrap();
        tree.add_child(hidden, inner).unwrap();
        let visible = tree.new_node();
        tree.set_height(visible, 30.0).unwrap();
        tree.add_child(root, hidden).unwrap();
        tree.add_child(root, visible).unwrap();

        tree.calculate_layout(root, None, None, Direction::Ltr).unwrap();
        assert_eq!(tree.computed_height(hidden).unwrap(), 0.0);
        assert_eq!(tree.computed_width(inner).unwrap(), 0.0);
        assert_eq!(tree.computed_top(visible).unwrap(), 0.0);
        assert_eq!(tree.computed_width(visible).unwrap(), 100.0);
    }

    #[test]
    fn test_absolute_root_applies_insets() {
        for direction in [Direction::Ltr, Direction::Rtl] {
            let mut tree = LayoutTree::new();
            let root = tree.new_node();
            tree.set_position_type(root, PositionType::Absolute).unwrap();
            tree.set_position(root, Edge::Left, 72.0).unwrap();
            tree.set_width(root, 52.0).unwrap();
            tree.set_height(root, 52.0).unwrap();
            tree.calculate_layout(root, None, None, direction).unwrap();

            let layout = tree.computed_layout(root).unwrap();
            assert_eq!((layout.left, layout.top), (72.0, 0.0), "{direction:?}");
            assert_eq!((layout.width, layout.height), (52.0, 52.0));
        }
    }
}
