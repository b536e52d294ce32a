//! Box geometry and resolution of style values into lengths.

use crate::axis::Axis;
use flexkit_style::{BoxSizing, Direction, EdgeValues, PhysicalEdge, StyleValue};

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size<T> {
    pub width: T,
    pub height: T,
}

impl<T: Copy> Size<T> {
    pub fn new(width: T, height: T) -> Self {
        Self { width, height }
    }

    /// The extent along `axis`.
    pub fn get(&self, axis: Axis) -> T {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    pub fn set(&mut self, axis: Axis, value: T) {
        match axis {
            Axis::Horizontal => self.width = value,
            Axis::Vertical => self.height = value,
        }
    }
}

impl Size<Option<f32>> {
    /// Neither dimension is known.
    pub const INDEFINITE: Self = Size {
        width: None,
        height: None,
    };
}

/// A 2D rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Whether `other` lies entirely inside this rectangle, with `tolerance`.
    pub fn contains_rect(&self, other: &Rect, tolerance: f32) -> bool {
        other.x >= self.x - tolerance
            && other.y >= self.y - tolerance
            && other.right() <= self.right() + tolerance
            && other.bottom() <= self.bottom() + tolerance
    }
}

/// Edge sizes (margin, padding, border).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeSizes {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl EdgeSizes {
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// Sum of both edges bounding `axis`.
    pub fn axis_sum(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.horizontal(),
            Axis::Vertical => self.vertical(),
        }
    }

    pub fn get(&self, edge: PhysicalEdge) -> f32 {
        match edge {
            PhysicalEdge::Left => self.left,
            PhysicalEdge::Top => self.top,
            PhysicalEdge::Right => self.right,
            PhysicalEdge::Bottom => self.bottom,
        }
    }
}

/// Resolved box of one node.
///
/// `width` and `height` are border-box sizes; the rectangles returned by the
/// accessors are relative to the border-box origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
    pub margin: EdgeSizes,
    pub border: EdgeSizes,
    pub padding: EdgeSizes,
}

impl Dimensions {
    /// Get the border box.
    pub fn border_box(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Get the padding box (border box minus border).
    pub fn padding_box(&self) -> Rect {
        Rect::new(
            self.border.left,
            self.border.top,
            (self.width - self.border.horizontal()).max(0.0),
            (self.height - self.border.vertical()).max(0.0),
        )
    }

    /// Get the content box (padding box minus padding).
    pub fn content_box(&self) -> Rect {
        let pb = self.padding_box();
        Rect::new(
            pb.x + self.padding.left,
            pb.y + self.padding.top,
            (pb.width - self.padding.horizontal()).max(0.0),
            (pb.height - self.padding.vertical()).max(0.0),
        )
    }

    /// Get the margin box (border box plus margin).
    pub fn margin_box(&self) -> Rect {
        Rect::new(
            -self.margin.left,
            -self.margin.top,
            self.width + self.margin.horizontal(),
            self.height + self.margin.vertical(),
        )
    }
}

fn reference_for(edge: PhysicalEdge, reference: Size<Option<f32>>) -> Option<f32> {
    if edge.is_horizontal() {
        reference.width
    } else {
        reference.height
    }
}

/// Resolve a margin, border or padding edge to a length.
///
/// Horizontal edges resolve percentages against the reference width and
/// vertical edges against the reference height. Auto and unset are `0`.
pub fn resolve_edge(
    values: &EdgeValues,
    edge: PhysicalEdge,
    direction: Direction,
    reference: Size<Option<f32>>,
) -> f32 {
    values
        .resolve(edge, direction)
        .resolve_or_zero(reference_for(edge, reference))
}

/// Resolve all four edges of a margin, border or padding set.
pub fn resolve_edges(
    values: &EdgeValues,
    direction: Direction,
    reference: Size<Option<f32>>,
) -> EdgeSizes {
    EdgeSizes {
        top: resolve_edge(values, PhysicalEdge::Top, direction, reference),
        right: resolve_edge(values, PhysicalEdge::Right, direction, reference),
        bottom: resolve_edge(values, PhysicalEdge::Bottom, direction, reference),
        left: resolve_edge(values, PhysicalEdge::Left, direction, reference),
    }
}

/// Resolve an inset edge. `None` means the inset is absent.
pub fn resolve_inset(
    values: &EdgeValues,
    edge: PhysicalEdge,
    direction: Direction,
    reference: Size<Option<f32>>,
) -> Option<f32> {
    values
        .resolve(edge, direction)
        .resolve(reference_for(edge, reference))
}

/// Resolve a sizing value against `reference`. A percentage of an
/// indefinite reference stays unresolved.
fn definite(value: StyleValue, reference: Option<f32>) -> Option<f32> {
    if value.is_percent() && reference.is_none() {
        return None;
    }
    value.resolve(reference)
}

fn to_border_box(size: f32, box_sizing: BoxSizing, frame: f32) -> f32 {
    match box_sizing {
        BoxSizing::BorderBox => size,
        BoxSizing::ContentBox => size + frame,
    }
}

/// Resolve a width or height to a border-box size.
///
/// `frame` is the node's padding plus border on the same axis. The result is
/// never smaller than `frame`. `None` means the size comes from content:
/// either the value is auto or it is a percentage of an indefinite
/// reference, which is resolved once the parent's size is known.
pub fn resolve_size(
    value: StyleValue,
    box_sizing: BoxSizing,
    reference: Option<f32>,
    frame: f32,
) -> Option<f32> {
    definite(value, reference).map(|size| to_border_box(size, box_sizing, frame).max(frame))
}

/// Min/max constraints on one axis, as border-box sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeBounds {
    pub min: f32,
    pub max: f32,
}

impl SizeBounds {
    /// No constraint.
    pub const NONE: Self = SizeBounds {
        min: 0.0,
        max: f32::INFINITY,
    };

    /// Resolve `min-*`/`max-*` values. Unset values and percentages of an
    /// indefinite reference impose nothing.
    pub fn resolve(
        min: StyleValue,
        max: StyleValue,
        box_sizing: BoxSizing,
        reference: Option<f32>,
        frame: f32,
    ) -> Self {
        let bound = |value: StyleValue| {
            definite(value, reference).map(|size| to_border_box(size, box_sizing, frame))
        };
        Self {
            min: bound(min).unwrap_or(Self::NONE.min),
            max: bound(max).unwrap_or(Self::NONE.max),
        }
    }

    /// Clamp a border-box size. The minimum wins over the maximum, and the
    /// result never drops below `frame`.
    pub fn clamp(&self, size: f32, frame: f32) -> f32 {
        size.min(self.max).max(self.min).max(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flexkit_style::Edge;

    fn dims() -> Dimensions {
        Dimensions {
            width: 100.0,
            height: 80.0,
            margin: EdgeSizes {
                top: 1.0,
                right: 2.0,
                bottom: 3.0,
                left: 4.0,
            },
            border: EdgeSizes {
                top: 2.0,
                right: 2.0,
                bottom: 2.0,
                left: 2.0,
            },
            padding: EdgeSizes {
                top: 5.0,
                right: 6.0,
                bottom: 7.0,
                left: 8.0,
            },
        }
    }

    #[test]
    fn test_nested_boxes() {
        let d = dims();
        assert_eq!(d.padding_box(), Rect::new(2.0, 2.0, 96.0, 76.0));
        assert_eq!(d.content_box(), Rect::new(10.0, 7.0, 82.0, 64.0));
        assert_eq!(d.margin_box(), Rect::new(-4.0, -1.0, 106.0, 84.0));
        assert_eq!(d.border_box().right(), 100.0);
    }

    #[test]
    fn test_percent_edges_use_their_own_axis() {
        let mut values = EdgeValues::new();
        values.set(Edge::All, StyleValue::Percent(10.0));
        let reference = Size::new(Some(200.0), Some(50.0));
        let edges = resolve_edges(&values, Direction::Ltr, reference);
        assert_eq!(edges.left, 20.0);
        assert_eq!(edges.right, 20.0);
        assert_eq!(edges.top, 5.0);
        assert_eq!(edges.bottom, 5.0);
    }

    #[test]
    fn test_percent_against_indefinite_reference() {
        let mut values = EdgeValues::new();
        values.set(Edge::Left, StyleValue::Percent(50.0));
        assert_eq!(
            resolve_edge(&values, PhysicalEdge::Left, Direction::Ltr, Size::INDEFINITE),
            0.0
        );
        assert_eq!(
            resolve_inset(&values, PhysicalEdge::Left, Direction::Ltr, Size::INDEFINITE),
            Some(0.0)
        );
    }

    #[test]
    fn test_auto_inset_is_absent() {
        let mut values = EdgeValues::new();
        values.set(Edge::Top, StyleValue::Auto);
        values.set(Edge::Start, StyleValue::Point(3.0));
        let reference = Size::new(Some(10.0), Some(10.0));
        assert_eq!(resolve_inset(&values, PhysicalEdge::Top, Direction::Ltr, reference), None);
        assert_eq!(resolve_inset(&values, PhysicalEdge::Bottom, Direction::Ltr, reference), None);
        assert_eq!(
            resolve_inset(&values, PhysicalEdge::Right, Direction::Rtl, reference),
            Some(3.0)
        );
        assert_eq!(resolve_edge(&values, PhysicalEdge::Top, Direction::Ltr, reference), 0.0);
    }

    #[test]
    fn test_resolve_size() {
        assert_eq!(
            resolve_size(StyleValue::Percent(50.0), BoxSizing::BorderBox, Some(300.0), 10.0),
            Some(150.0)
        );
        assert_eq!(
            resolve_size(StyleValue::Point(40.0), BoxSizing::ContentBox, None, 10.0),
            Some(50.0)
        );
        assert_eq!(
            resolve_size(StyleValue::Point(4.0), BoxSizing::BorderBox, None, 10.0),
            Some(10.0)
        );
        assert_eq!(resolve_size(StyleValue::Auto, BoxSizing::BorderBox, Some(1.0), 0.0), None);
    }

    #[test]
    fn test_percent_size_waits_for_reference() {
        assert_eq!(
            resolve_size(StyleValue::Percent(10.0), BoxSizing::BorderBox, None, 20.0),
            None
        );
        assert_eq!(
            resolve_size(StyleValue::Percent(10.0), BoxSizing::BorderBox, Some(146.0), 20.0),
            Some(20.0)
        );
    }

    #[test]
    fn test_size_bounds() {
        let bounds = SizeBounds::resolve(
            StyleValue::Point(50.0),
            StyleValue::Percent(50.0),
            BoxSizing::ContentBox,
            Some(300.0),
            40.0,
        );
        assert_eq!(bounds, SizeBounds { min: 90.0, max: 190.0 });
        assert_eq!(bounds.clamp(10.0, 40.0), 90.0);
        assert_eq!(bounds.clamp(500.0, 40.0), 190.0);

        let inverted = SizeBounds { min: 80.0, max: 60.0 };
        assert_eq!(inverted.clamp(70.0, 0.0), 80.0);
        assert_eq!(SizeBounds::NONE.clamp(5.0, 12.0), 12.0);

        let indefinite = SizeBounds::resolve(
            StyleValue::Percent(60.0),
            StyleValue::Percent(20.0),
            BoxSizing::BorderBox,
            None,
            0.0,
        );
        assert_eq!(indefinite, SizeBounds::NONE);
    }

    #[test]
    fn test_contains_rect() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(outer.contains_rect(&Rect::new(10.0, 10.0, 90.0, 90.0), 0.0));
        assert!(!outer.contains_rect(&Rect::new(10.0, 10.0, 91.0, 90.0), 0.0));
    }
}
