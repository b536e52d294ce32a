//! Positioned layout: containing blocks, absolute placement and relative
//! offsets.
//!
//! An absolute node is placed against the padding box of its containing
//! block, the nearest `Relative` or `Absolute` ancestor (or the layout root).
//! `Static` ancestors in between are skipped.

use crate::axis::Axis;
use crate::box_model::{resolve_edges, resolve_inset, Size};
use crate::flow::{layout_node, static_position};
use crate::tree::{LayoutTree, NodeId};
use crate::LayoutError;
use flexkit_style::{Direction, EdgeValues, PhysicalEdge};
use tracing::trace;

/// Find the containing block of `id` within the tree rooted at `root`.
pub(crate) fn containing_block(
    tree: &LayoutTree,
    id: NodeId,
    root: NodeId,
) -> Result<NodeId, LayoutError> {
    let mut current = tree.node(id)?.parent;
    while let Some(ancestor) = current {
        if ancestor == root {
            break;
        }
        let node = tree.node(ancestor)?;
        if node.style.position_type.is_positioned() {
            return Ok(ancestor);
        }
        current = node.parent;
    }
    Ok(root)
}

/// Offset of `id`'s border box from the border box of its ancestor
/// `ancestor`.
fn offset_from(tree: &LayoutTree, id: NodeId, ancestor: NodeId) -> Result<(f32, f32), LayoutError> {
    let (mut x, mut y) = (0.0, 0.0);
    let mut current = id;
    while current != ancestor {
        let node = tree.node(current)?;
        x += node.layout.left;
        y += node.layout.top;
        match node.parent {
            Some(parent) => current = parent,
            None => break,
        }
    }
    Ok((x, y))
}

/// Size, lay out and place an absolute node.
///
/// The node's parent and containing block must already be laid out.
pub(crate) fn position_absolute(
    tree: &mut LayoutTree,
    id: NodeId,
    root: NodeId,
) -> Result<(), LayoutError> {
    let node = tree.node(id)?;
    let parent = node.parent.ok_or(LayoutError::UnknownNode(id))?;
    let style = node.style.clone();

    let block = containing_block(tree, id, root)?;
    let padding_box = tree.node(block)?.layout.dimensions().padding_box();
    let reference = Size::new(Some(padding_box.width), Some(padding_box.height));

    let parent_node = tree.node(parent)?;
    let parent_direction = parent_node.layout.direction;
    let parent_style = parent_node.style.clone();
    let parent_layout = parent_node.layout;

    let direction = style.direction.resolve(parent_direction);
    let margin = resolve_edges(&style.margin, direction, reference);
    let inset = |edge| resolve_inset(&style.position, edge, direction, reference);

    // Both insets with an auto size stretch the node between them.
    let mut forced = Size::INDEFINITE;
    for (axis, size) in [(Axis::Horizontal, style.width), (Axis::Vertical, style.height)] {
        let (lead, trail) = axis.edges();
        if let (Some(a), Some(b), false) = (inset(lead), inset(trail), size.is_numeric()) {
            let gap = reference.get(axis).unwrap_or(0.0) - a - b - margin.axis_sum(axis);
            forced.set(axis, Some(gap.max(0.0)));
        }
    }

    layout_node(tree, id, reference, forced, parent_direction)?;
    let layout = tree.node(id)?.layout;

    let (parent_x, parent_y) = offset_from(tree, parent, block)?;
    let (static_x, static_y) = static_position(&parent_style, &parent_layout, style.align_self, &layout);

    let start_is_left = direction.start_edge() == PhysicalEdge::Left;
    let from_left = |left: f32| padding_box.x + left + margin.left - parent_x;
    let from_right =
        |right: f32| padding_box.right() - right - margin.right - layout.width - parent_x;
    let left = match (inset(PhysicalEdge::Left), inset(PhysicalEdge::Right)) {
        (Some(left), Some(right)) => {
            if start_is_left {
                from_left(left)
            } else {
                from_right(right)
            }
        }
        (Some(left), None) => from_left(left),
        (None, Some(right)) => from_right(right),
        (None, None) => static_x,
    };

    let top = match (inset(PhysicalEdge::Top), inset(PhysicalEdge::Bottom)) {
        (Some(top), _) => padding_box.y + top + margin.top - parent_y,
        (None, Some(bottom)) => {
            padding_box.bottom() - bottom - margin.bottom - layout.height - parent_y
        }
        (None, None) => static_y,
    };

    let node = tree.node_mut(id)?;
    node.layout.left = left;
    node.layout.top = top;
    trace!(node = %id, containing_block = %block, left, top, "positioned absolute node");
    Ok(())
}

/// Post-flow offset of a relative node.
///
/// The start inset wins over the end inset horizontally and top wins over
/// bottom vertically.
pub(crate) fn relative_offset(
    position: &EdgeValues,
    direction: Direction,
    reference: Size<Option<f32>>,
) -> (f32, f32) {
    let signed = |edge: PhysicalEdge| {
        resolve_inset(position, edge, direction, reference).map(|value| match edge {
            PhysicalEdge::Left | PhysicalEdge::Top => value,
            PhysicalEdge::Right | PhysicalEdge::Bottom => -value,
        })
    };

    let dx = signed(direction.start_edge())
        .or_else(|| signed(direction.end_edge()))
        .unwrap_or(0.0);
    let dy = signed(PhysicalEdge::Top)
        .or_else(|| signed(PhysicalEdge::Bottom))
        .unwrap_or(0.0);
    (dx, dy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flexkit_style::{Edge, PositionType, StyleValue};

    #[test]
    fn test_containing_block_skips_static_ancestors() {
        let mut tree = LayoutTree::new();
        let root = tree.new_node();
        let positioned = tree.new_node();
        let static_parent = tree.new_node();
        let child = tree.new_node();
        tree.add_child(root, positioned).unwrap();
        tree.add_child(positioned, static_parent).unwrap();
        tree.add_child(static_parent, child).unwrap();
        tree.set_position_type(static_parent, PositionType::Static).unwrap();

        assert_eq!(containing_block(&tree, child, root).unwrap(), positioned);

        tree.set_position_type(positioned, PositionType::Static).unwrap();
        assert_eq!(containing_block(&tree, child, root).unwrap(), root);
    }

    #[test]
    fn test_layout_root_bounds_the_search() {
        let mut tree = LayoutTree::new();
        let outer = tree.new_node();
        let root = tree.new_node();
        let child = tree.new_node();
        tree.add_child(outer, root).unwrap();
        tree.add_child(root, child).unwrap();
        tree.set_position_type(root, PositionType::Static).unwrap();

        assert_eq!(containing_block(&tree, child, root).unwrap(), root);
    }

    #[test]
    fn test_relative_offset_precedence() {
        let reference = Size::new(Some(200.0), Some(100.0));
        let mut position = EdgeValues::new();
        position.set(Edge::Left, StyleValue::Point(10.0));
        position.set(Edge::Right, StyleValue::Point(30.0));
        position.set(Edge::Bottom, StyleValue::Percent(10.0));

        assert_eq!(relative_offset(&position, Direction::Ltr, reference), (10.0, -10.0));
        assert_eq!(relative_offset(&position, Direction::Rtl, reference), (-30.0, -10.0));

        position.set(Edge::Top, StyleValue::Point(4.0));
        position.set(Edge::Right, StyleValue::Undefined);
        assert_eq!(relative_offset(&position, Direction::Rtl, reference), (10.0, 4.0));
    }
}
