//! Mapping of logical edges and flex axes onto physical edges.

use flexkit_style::{Direction, Edge, FlexDirection, FlexWrap, PhysicalEdge};

/// Represents the main and cross axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Get the perpendicular axis.
    pub fn cross(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// Main axis of a flex container.
    pub fn main(flex_direction: FlexDirection) -> Self {
        if flex_direction.is_row() {
            Axis::Horizontal
        } else {
            Axis::Vertical
        }
    }

    /// Physical edges bounding this axis, in (left|top, right|bottom) order.
    pub fn edges(self) -> (PhysicalEdge, PhysicalEdge) {
        match self {
            Axis::Horizontal => (PhysicalEdge::Left, PhysicalEdge::Right),
            Axis::Vertical => (PhysicalEdge::Top, PhysicalEdge::Bottom),
        }
    }
}

/// Physical edge an edge name refers to under `direction`.
///
/// Shorthand edges (`Horizontal`, `Vertical`, `All`) cover more than one side
/// and return `None`.
pub fn physical_edge(edge: Edge, direction: Direction) -> Option<PhysicalEdge> {
    match edge {
        Edge::Left => Some(PhysicalEdge::Left),
        Edge::Top => Some(PhysicalEdge::Top),
        Edge::Right => Some(PhysicalEdge::Right),
        Edge::Bottom => Some(PhysicalEdge::Bottom),
        Edge::Start => Some(direction.start_edge()),
        Edge::End => Some(direction.end_edge()),
        Edge::Horizontal | Edge::Vertical | Edge::All => None,
    }
}

/// Leading and trailing physical edges of the main axis.
pub fn main_axis_edges(
    flex_direction: FlexDirection,
    direction: Direction,
) -> (PhysicalEdge, PhysicalEdge) {
    match flex_direction {
        FlexDirection::Column => (PhysicalEdge::Top, PhysicalEdge::Bottom),
        FlexDirection::ColumnReverse => (PhysicalEdge::Bottom, PhysicalEdge::Top),
        FlexDirection::Row => (direction.start_edge(), direction.end_edge()),
        FlexDirection::RowReverse => (direction.end_edge(), direction.start_edge()),
    }
}

/// Leading and trailing physical edges of the cross axis.
pub fn cross_axis_edges(
    flex_direction: FlexDirection,
    direction: Direction,
) -> (PhysicalEdge, PhysicalEdge) {
    if flex_direction.is_column() {
        (direction.start_edge(), direction.end_edge())
    } else {
        (PhysicalEdge::Top, PhysicalEdge::Bottom)
    }
}

/// Cross-axis edges that lines and items are placed from.
///
/// `WrapReverse` stacks lines from the cross end, so the edges swap.
pub fn line_cross_edges(
    flex_direction: FlexDirection,
    flex_wrap: FlexWrap,
    direction: Direction,
) -> (PhysicalEdge, PhysicalEdge) {
    let (lead, trail) = cross_axis_edges(flex_direction, direction);
    match flex_wrap {
        FlexWrap::WrapReverse => (trail, lead),
        FlexWrap::NoWrap | FlexWrap::Wrap => (lead, trail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_cross() {
        assert_eq!(Axis::Horizontal.cross(), Axis::Vertical);
        assert_eq!(Axis::Vertical.cross(), Axis::Horizontal);
        assert_eq!(Axis::main(FlexDirection::RowReverse), Axis::Horizontal);
        assert_eq!(Axis::main(FlexDirection::Column), Axis::Vertical);
    }

    #[test]
    fn test_physical_edge() {
        assert_eq!(physical_edge(Edge::Start, Direction::Ltr), Some(PhysicalEdge::Left));
        assert_eq!(physical_edge(Edge::Start, Direction::Rtl), Some(PhysicalEdge::Right));
        assert_eq!(physical_edge(Edge::End, Direction::Rtl), Some(PhysicalEdge::Left));
        assert_eq!(physical_edge(Edge::Bottom, Direction::Rtl), Some(PhysicalEdge::Bottom));
        assert_eq!(physical_edge(Edge::Horizontal, Direction::Ltr), None);
    }

    #[test]
    fn test_main_axis_edges() {
        use PhysicalEdge::*;
        let ltr = Direction::Ltr;
        let rtl = Direction::Rtl;
        assert_eq!(main_axis_edges(FlexDirection::Row, ltr), (Left, Right));
        assert_eq!(main_axis_edges(FlexDirection::Row, rtl), (Right, Left));
        assert_eq!(main_axis_edges(FlexDirection::RowReverse, ltr), (Right, Left));
        assert_eq!(main_axis_edges(FlexDirection::RowReverse, rtl), (Left, Right));
        assert_eq!(main_axis_edges(FlexDirection::Column, rtl), (Top, Bottom));
        assert_eq!(main_axis_edges(FlexDirection::ColumnReverse, ltr), (Bottom, Top));
    }

    #[test]
    fn test_cross_axis_edges() {
        use PhysicalEdge::*;
        assert_eq!(cross_axis_edges(FlexDirection::Column, Direction::Ltr), (Left, Right));
        assert_eq!(cross_axis_edges(FlexDirection::ColumnReverse, Direction::Rtl), (Right, Left));
        assert_eq!(cross_axis_edges(FlexDirection::Row, Direction::Rtl), (Top, Bottom));
        assert_eq!(cross_axis_edges(FlexDirection::RowReverse, Direction::Ltr), (Top, Bottom));
    }

    #[test]
    fn test_wrap_reverse_swaps_line_edges() {
        use PhysicalEdge::*;
        let row = FlexDirection::Row;
        assert_eq!(line_cross_edges(row, FlexWrap::Wrap, Direction::Ltr), (Top, Bottom));
        assert_eq!(line_cross_edges(row, FlexWrap::WrapReverse, Direction::Ltr), (Bottom, Top));
        assert_eq!(
            line_cross_edges(FlexDirection::Column, FlexWrap::WrapReverse, Direction::Rtl),
            (Left, Right)
        );
    }
}
