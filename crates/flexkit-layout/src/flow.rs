//! In-flow layout.
//!
//! Sizes a node and places its in-flow children along the main and cross
//! axes of its flex direction:
//! 1. Resolve the node's edges, size and min/max bounds against its reference
//!    box
//! 2. Measure each in-flow child, stretching it on the cross axis if the
//!    container's cross size is already known
//! 3. Break items into lines (wrapping containers only)
//! 4. Size the container from its content when its size is auto
//! 5. Place lines on the cross axis (align-content)
//! 6. Lay out again the children whose size depended on the container's
//!    final size: percentages of an auto container and late stretching
//! 7. Main axis alignment (justify-content) and cross axis alignment
//!    (align-items, align-self) per line
//! 8. Relative offsets
//!
//! Absolute children are skipped here and placed afterwards by the
//! positioner.

use crate::axis::{line_cross_edges, main_axis_edges, Axis};
use crate::box_model::{resolve_edges, resolve_size, Dimensions, EdgeSizes, Size, SizeBounds};
use crate::positioned::relative_offset;
use crate::tree::{ComputedLayout, LayoutTree, NodeId};
use crate::LayoutError;
use flexkit_style::{
    AlignContent, AlignItems, AlignSelf, Direction, Display, JustifyContent, PhysicalEdge,
    PositionType, Style,
};
use tracing::trace;

const EPSILON: f32 = 1e-4;

/// An in-flow child during placement.
#[derive(Debug)]
struct FlowItem {
    id: NodeId,
    position_type: PositionType,
    direction: Direction,
    align: AlignItems,
    /// Cross size comes from the line rather than from style.
    stretch: bool,
    /// A size of the item is a percentage of a container axis that was not
    /// known when the item was measured.
    awaits_container: bool,
    main_size: f32,
    cross_size: f32,
    main_margin_start: f32,
    main_margin_end: f32,
    cross_margin_start: f32,
    cross_margin_end: f32,
}

impl FlowItem {
    fn outer_main_size(&self) -> f32 {
        self.main_size + self.main_margin_start + self.main_margin_end
    }

    fn outer_cross_size(&self) -> f32 {
        self.cross_size + self.cross_margin_start + self.cross_margin_end
    }

    fn cross_margin(&self) -> f32 {
        self.cross_margin_start + self.cross_margin_end
    }
}

/// A run of items sharing one line, as a range into the item list.
#[derive(Debug, Clone, PartialEq)]
struct FlowLine {
    start: usize,
    end: usize,
    cross_size: f32,
    /// Distance of the line from the container's leading cross content edge.
    cross_offset: f32,
}

impl FlowLine {
    fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            cross_size: 0.0,
            cross_offset: 0.0,
        }
    }
}

/// Main size taken by `items` laid end to end with `gap` between them.
fn line_main_size(items: &[FlowItem], gap: f32) -> f32 {
    items.iter().map(FlowItem::outer_main_size).sum::<f32>()
        + gap * items.len().saturating_sub(1) as f32
}

/// Whether a size of `style` is a percentage of an axis `reference` does not
/// know yet.
fn awaits_reference(style: &Style, reference: Size<Option<f32>>) -> bool {
    let horizontal = [style.width, style.min_width, style.max_width];
    let vertical = [style.height, style.min_height, style.max_height];
    (reference.width.is_none() && horizontal.iter().any(|value| value.is_percent()))
        || (reference.height.is_none() && vertical.iter().any(|value| value.is_percent()))
}

/// Lay out `id` and its in-flow subtree.
///
/// `reference` is the box percentages of this node resolve against (its
/// parent's content box, or the containing block's padding box for absolute
/// nodes). A `forced` dimension overrides the style size but still obeys the
/// min/max bounds. Position is left to the caller.
pub(crate) fn layout_node(
    tree: &mut LayoutTree,
    id: NodeId,
    reference: Size<Option<f32>>,
    forced: Size<Option<f32>>,
    parent_direction: Direction,
) -> Result<(), LayoutError> {
    let style = tree.node(id)?.style.clone();
    let direction = style.direction.resolve(parent_direction);

    if style.display == Display::None {
        return hide_subtree(tree, id, direction);
    }

    let margin = resolve_edges(&style.margin, direction, reference);
    let border = resolve_edges(&style.border, direction, reference);
    let padding = resolve_edges(&style.padding, direction, reference);
    let frame = Size::new(
        border.horizontal() + padding.horizontal(),
        border.vertical() + padding.vertical(),
    );
    let bounds = Size::new(
        SizeBounds::resolve(
            style.min_width,
            style.max_width,
            style.box_sizing,
            reference.width,
            frame.width,
        ),
        SizeBounds::resolve(
            style.min_height,
            style.max_height,
            style.box_sizing,
            reference.height,
            frame.height,
        ),
    );

    let width = forced
        .width
        .or_else(|| resolve_size(style.width, style.box_sizing, reference.width, frame.width))
        .map(|width| bounds.width.clamp(width, frame.width));
    let height = forced
        .height
        .or_else(|| resolve_size(style.height, style.box_sizing, reference.height, frame.height))
        .map(|height| bounds.height.clamp(height, frame.height));
    let inner = Size::new(
        width.map(|width| width - frame.width),
        height.map(|height| height - frame.height),
    );

    let content = layout_children(tree, id, &style, direction, inner, border, padding)?;
    let from_content = |content: Size<f32>| {
        Size::new(
            width.unwrap_or_else(|| bounds.width.clamp(content.width + frame.width, frame.width)),
            height.unwrap_or_else(|| {
                bounds.height.clamp(content.height + frame.height, frame.height)
            }),
        )
    };
    let mut size = from_content(content);

    // A bound that overrides the content size of an auto dimension gives the
    // children a definite box; place them again inside it.
    let bounded = Size::new(
        width.is_none() && (size.width - content.width - frame.width).abs() > EPSILON,
        height.is_none() && (size.height - content.height - frame.height).abs() > EPSILON,
    );
    if bounded.width || bounded.height {
        let inner = Size::new(
            if bounded.width {
                Some(size.width - frame.width)
            } else {
                inner.width
            },
            if bounded.height {
                Some(size.height - frame.height)
            } else {
                inner.height
            },
        );
        let content = layout_children(tree, id, &style, direction, inner, border, padding)?;
        let resized = from_content(content);
        if !bounded.width {
            size.width = resized.width;
        }
        if !bounded.height {
            size.height = resized.height;
        }
    }

    let layout = &mut tree.node_mut(id)?.layout;
    layout.width = size.width;
    layout.height = size.height;
    layout.margin = margin;
    layout.border = border;
    layout.padding = padding;
    layout.direction = direction;

    trace!(node = %id, width = layout.width, height = layout.height, "sized node");
    Ok(())
}

/// Place the in-flow children of a container and return its content size.
fn layout_children(
    tree: &mut LayoutTree,
    id: NodeId,
    style: &Style,
    direction: Direction,
    inner: Size<Option<f32>>,
    border: EdgeSizes,
    padding: EdgeSizes,
) -> Result<Size<f32>, LayoutError> {
    let children = tree.node(id)?.children.clone();
    let main = Axis::main(style.flex_direction);
    let cross = main.cross();
    let (main_lead, main_trail) = main_axis_edges(style.flex_direction, direction);
    let (cross_lead, cross_trail) =
        line_cross_edges(style.flex_direction, style.flex_wrap, direction);
    let wrapping = style.flex_wrap.is_wrapping();
    let main_gap = style.main_gap().resolve_or_zero(inner.get(main));
    let cross_gap = style.cross_gap().resolve_or_zero(inner.get(cross));

    let mut items = Vec::with_capacity(children.len());
    for child in children {
        let child_style = &tree.node(child)?.style;
        let child_direction = child_style.direction.resolve(direction);

        if child_style.display == Display::None {
            hide_subtree(tree, child, child_direction)?;
            continue;
        }
        if child_style.position_type == PositionType::Absolute {
            continue;
        }

        let position_type = child_style.position_type;
        let margin = resolve_edges(&child_style.margin, child_direction, inner);
        let align = child_style.align_self.resolve(style.align_items);
        let cross_style = match cross {
            Axis::Horizontal => child_style.width,
            Axis::Vertical => child_style.height,
        };
        let stretch = align == AlignItems::Stretch && !cross_style.is_numeric();
        let awaits_container = awaits_reference(child_style, inner);

        // A single line spans the container, so its cross size is known now.
        let mut forced = Size::INDEFINITE;
        if stretch && !wrapping {
            if let Some(available) = inner.get(cross) {
                forced.set(cross, Some((available - margin.axis_sum(cross)).max(0.0)));
            }
        }

        layout_node(tree, child, inner, forced, direction)?;
        let layout = tree.node(child)?.layout;
        items.push(FlowItem {
            id: child,
            position_type,
            direction: child_direction,
            align,
            stretch,
            awaits_container,
            main_size: layout.size(main),
            cross_size: layout.size(cross),
            main_margin_start: margin.get(main_lead),
            main_margin_end: margin.get(main_trail),
            cross_margin_start: margin.get(cross_lead),
            cross_margin_end: margin.get(cross_trail),
        });
    }

    let line_limit = if wrapping { inner.get(main) } else { None };
    let mut lines = break_lines(&items, line_limit, main_gap);
    for line in &mut lines {
        line.cross_size = items[line.start..line.end]
            .iter()
            .map(FlowItem::outer_cross_size)
            .fold(0.0, f32::max);
    }

    let lines_cross = lines.iter().map(|line| line.cross_size).sum::<f32>()
        + cross_gap * lines.len().saturating_sub(1) as f32;
    let inner_main = inner.get(main).unwrap_or_else(|| {
        lines
            .iter()
            .map(|line| line_main_size(&items[line.start..line.end], main_gap))
            .fold(0.0, f32::max)
    });
    let inner_cross = inner.get(cross).unwrap_or(lines_cross);

    if wrapping {
        align_lines(style.align_content, &mut lines, inner_cross - lines_cross, cross_gap);
    } else if let Some(line) = lines.first_mut() {
        line.cross_size = inner_cross;
    }

    let mut content = Size::new(0.0, 0.0);
    content.set(main, inner_main);
    content.set(cross, inner_cross);
    let resolved = Size::new(Some(content.width), Some(content.height));

    // The container's size is final; revisit children that depended on it.
    for line in &lines {
        for item in &mut items[line.start..line.end] {
            let stretch_target = (line.cross_size - item.cross_margin()).max(0.0);
            let restretch = item.stretch && (stretch_target - item.cross_size).abs() > EPSILON;
            if !restretch && !item.awaits_container {
                continue;
            }

            let child_style = &tree.node(item.id)?.style;
            let margin = resolve_edges(&child_style.margin, item.direction, resolved);
            item.main_margin_start = margin.get(main_lead);
            item.main_margin_end = margin.get(main_trail);
            item.cross_margin_start = margin.get(cross_lead);
            item.cross_margin_end = margin.get(cross_trail);

            let mut forced = Size::INDEFINITE;
            if item.stretch {
                forced.set(cross, Some((line.cross_size - item.cross_margin()).max(0.0)));
            }
            layout_node(tree, item.id, resolved, forced, direction)?;
            let layout = tree.node(item.id)?.layout;
            item.main_size = layout.size(main);
            item.cross_size = layout.size(cross);
        }
    }

    let container = Dimensions {
        width: content.width + border.horizontal() + padding.horizontal(),
        height: content.height + border.vertical() + padding.vertical(),
        margin: EdgeSizes::default(),
        border,
        padding,
    };

    for line in &lines {
        let line_items = &items[line.start..line.end];
        let (initial_offset, spacing) = distribute_main_axis(
            style.justify_content,
            inner_main - line_main_size(line_items, main_gap),
            line_items.len(),
        );

        let mut main_pos = initial_offset;
        for item in line_items {
            let main_offset = main_pos + item.main_margin_start;
            let cross_offset = line.cross_offset
                + item.cross_margin_start
                + align_offset(item.align, line.cross_size - item.outer_cross_size());

            let mut position = Size::new(0.0, 0.0);
            position.set(
                main,
                place_from_leading(main_lead, main_offset, item.main_size, &container),
            );
            position.set(
                cross,
                place_from_leading(cross_lead, cross_offset, item.cross_size, &container),
            );

            let node = tree.node_mut(item.id)?;
            if item.position_type == PositionType::Relative {
                let (dx, dy) =
                    relative_offset(&node.style.position, node.layout.direction, resolved);
                position.width += dx;
                position.height += dy;
            }
            node.layout.left = position.width;
            node.layout.top = position.height;

            main_pos += item.outer_main_size() + spacing + main_gap;
        }
    }

    if lines.len() > 1 {
        trace!(node = %id, lines = lines.len(), "wrapped items");
    }
    Ok(content)
}

/// Split items into lines no longer than `limit` on the main axis. Without a
/// limit everything shares one line. A line always holds at least one item,
/// and an empty container still has one empty line.
fn break_lines(items: &[FlowItem], limit: Option<f32>, gap: f32) -> Vec<FlowLine> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut used = 0.0;

    for (index, item) in items.iter().enumerate() {
        let size = item.outer_main_size();
        if let Some(limit) = limit {
            if index > start && used + gap + size > limit {
                lines.push(FlowLine::new(start, index));
                start = index;
                used = 0.0;
            }
        }
        used += if index > start { gap + size } else { size };
    }
    lines.push(FlowLine::new(start, items.len()));
    lines
}

/// Place lines along the cross axis inside `free_space`.
///
/// `Stretch` grows every line by an equal share. With negative free space
/// `Stretch` and the space-* modes fall back to `FlexStart`.
fn align_lines(align_content: AlignContent, lines: &mut [FlowLine], free_space: f32, gap: f32) {
    let count = lines.len();
    if count == 0 {
        return;
    }

    let (mut offset, spacing, grow) = match align_content {
        AlignContent::FlexStart => (0.0, 0.0, 0.0),
        AlignContent::FlexEnd => (free_space, 0.0, 0.0),
        AlignContent::Center => (free_space / 2.0, 0.0, 0.0),
        AlignContent::Stretch if free_space > 0.0 => (0.0, 0.0, free_space / count as f32),
        AlignContent::SpaceBetween if free_space > 0.0 && count > 1 => {
            (0.0, free_space / (count - 1) as f32, 0.0)
        }
        AlignContent::SpaceAround if free_space > 0.0 => {
            let space = free_space / count as f32;
            (space / 2.0, space, 0.0)
        }
        AlignContent::SpaceEvenly if free_space > 0.0 => {
            let space = free_space / (count + 1) as f32;
            (space, space, 0.0)
        }
        AlignContent::Stretch
        | AlignContent::SpaceBetween
        | AlignContent::SpaceAround
        | AlignContent::SpaceEvenly => (0.0, 0.0, 0.0),
    };

    for line in lines {
        line.cross_size += grow;
        line.cross_offset = offset;
        offset += line.cross_size + gap + spacing;
    }
}

/// Initial main-axis offset and extra spacing between items.
///
/// Negative free space makes the space-* modes fall back: SpaceBetween to
/// FlexStart, SpaceAround and SpaceEvenly to Center.
fn distribute_main_axis(justify_content: JustifyContent, free_space: f32, count: usize) -> (f32, f32) {
    if count == 0 {
        return (0.0, 0.0);
    }

    match justify_content {
        JustifyContent::FlexStart => (0.0, 0.0),
        JustifyContent::FlexEnd => (free_space, 0.0),
        JustifyContent::Center => (free_space / 2.0, 0.0),
        JustifyContent::SpaceBetween => {
            if free_space > 0.0 && count > 1 {
                (0.0, free_space / (count - 1) as f32)
            } else {
                (0.0, 0.0)
            }
        }
        JustifyContent::SpaceAround => {
            if free_space > 0.0 {
                let space = free_space / count as f32;
                (space / 2.0, space)
            } else {
                (free_space / 2.0, 0.0)
            }
        }
        JustifyContent::SpaceEvenly => {
            if free_space > 0.0 {
                let space = free_space / (count + 1) as f32;
                (space, space)
            } else {
                (free_space / 2.0, 0.0)
            }
        }
    }
}

/// Cross-axis offset of an item inside `free_space`.
fn align_offset(align: AlignItems, free_space: f32) -> f32 {
    match align {
        AlignItems::FlexEnd => free_space,
        AlignItems::Center => free_space / 2.0,
        AlignItems::FlexStart | AlignItems::Stretch => 0.0,
    }
}

/// Border-box coordinate of a child along the axis of `leading`, given the
/// distance of its border box from the container's leading content edge.
fn place_from_leading(
    leading: PhysicalEdge,
    offset: f32,
    child_size: f32,
    container: &Dimensions,
) -> f32 {
    let content = container.content_box();
    match leading {
        PhysicalEdge::Left => content.x + offset,
        PhysicalEdge::Top => content.y + offset,
        PhysicalEdge::Right => content.right() - offset - child_size,
        PhysicalEdge::Bottom => content.bottom() - offset - child_size,
    }
}

/// Where `child` would sit in `parent` as the sole item of the line.
///
/// Returns the child's border-box left/top relative to the parent's border
/// box. Both boxes must already be sized.
pub(crate) fn static_position(
    parent_style: &Style,
    parent: &ComputedLayout,
    child_align: AlignSelf,
    child: &ComputedLayout,
) -> (f32, f32) {
    let main = Axis::main(parent_style.flex_direction);
    let cross = main.cross();
    let (main_lead, main_trail) = main_axis_edges(parent_style.flex_direction, parent.direction);
    let (cross_lead, cross_trail) = line_cross_edges(
        parent_style.flex_direction,
        parent_style.flex_wrap,
        parent.direction,
    );

    let container = parent.dimensions();
    let content = container.content_box();
    let content = Size::new(content.width, content.height);

    let outer_main =
        child.size(main) + child.margin.get(main_lead) + child.margin.get(main_trail);
    let outer_cross =
        child.size(cross) + child.margin.get(cross_lead) + child.margin.get(cross_trail);

    let (main_offset, _) = distribute_main_axis(
        parent_style.justify_content,
        content.get(main) - outer_main,
        1,
    );
    let align = child_align.resolve(parent_style.align_items);
    let cross_offset = align_offset(align, content.get(cross) - outer_cross);

    let mut position = Size::new(0.0, 0.0);
    position.set(
        main,
        place_from_leading(
            main_lead,
            main_offset + child.margin.get(main_lead),
            child.size(main),
            &container,
        ),
    );
    position.set(
        cross,
        place_from_leading(
            cross_lead,
            cross_offset + child.margin.get(cross_lead),
            child.size(cross),
            &container,
        ),
    );
    (position.width, position.height)
}

/// Give a hidden node and its whole subtree empty boxes.
pub(crate) fn hide_subtree(
    tree: &mut LayoutTree,
    id: NodeId,
    direction: Direction,
) -> Result<(), LayoutError> {
    let mut stack = vec![id];
    while let Some(current) = stack.pop() {
        let node = tree.node_mut(current)?;
        node.layout = ComputedLayout {
            direction,
            ..ComputedLayout::default()
        };
        stack.extend_from_slice(&node.children);
    }
    Ok(())
}
