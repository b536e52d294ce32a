//! Per-edge style storage with shorthand precedence.

use crate::{Direction, StyleValue};

/// An edge as addressed by style setters, including logical and shorthand
/// edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Top,
    Right,
    Bottom,
    /// Left in LTR, Right in RTL.
    Start,
    /// Right in LTR, Left in RTL.
    End,
    /// Left and Right.
    Horizontal,
    /// Top and Bottom.
    Vertical,
    /// Every edge.
    All,
}

impl Edge {
    /// All edges in storage order.
    pub const ALL: [Edge; 9] = [
        Edge::Left,
        Edge::Top,
        Edge::Right,
        Edge::Bottom,
        Edge::Start,
        Edge::End,
        Edge::Horizontal,
        Edge::Vertical,
        Edge::All,
    ];

    fn index(self) -> usize {
        match self {
            Edge::Left => 0,
            Edge::Top => 1,
            Edge::Right => 2,
            Edge::Bottom => 3,
            Edge::Start => 4,
            Edge::End => 5,
            Edge::Horizontal => 6,
            Edge::Vertical => 7,
            Edge::All => 8,
        }
    }
}

/// A physical box edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicalEdge {
    Left,
    Top,
    Right,
    Bottom,
}

impl PhysicalEdge {
    /// The four physical edges.
    pub const ALL: [PhysicalEdge; 4] = [
        PhysicalEdge::Left,
        PhysicalEdge::Top,
        PhysicalEdge::Right,
        PhysicalEdge::Bottom,
    ];

    /// The edge on the other side of the box.
    pub fn opposite(self) -> Self {
        match self {
            PhysicalEdge::Left => PhysicalEdge::Right,
            PhysicalEdge::Right => PhysicalEdge::Left,
            PhysicalEdge::Top => PhysicalEdge::Bottom,
            PhysicalEdge::Bottom => PhysicalEdge::Top,
        }
    }

    /// Whether this edge bounds the horizontal axis.
    pub fn is_horizontal(self) -> bool {
        matches!(self, PhysicalEdge::Left | PhysicalEdge::Right)
    }
}

impl From<PhysicalEdge> for Edge {
    fn from(edge: PhysicalEdge) -> Self {
        match edge {
            PhysicalEdge::Left => Edge::Left,
            PhysicalEdge::Top => Edge::Top,
            PhysicalEdge::Right => Edge::Right,
            PhysicalEdge::Bottom => Edge::Bottom,
        }
    }
}

/// Style values keyed by [`Edge`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeValues {
    values: [StyleValue; 9],
}

impl EdgeValues {
    /// Create an edge set with every edge undefined.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value stored for an edge, without shorthand fallback.
    pub fn get(&self, edge: Edge) -> StyleValue {
        self.values[edge.index()]
    }

    /// Store a value for an edge.
    pub fn set(&mut self, edge: Edge, value: StyleValue) {
        self.values[edge.index()] = value;
    }

    /// Iterate over the stored values.
    pub fn iter(&self) -> impl Iterator<Item = (Edge, StyleValue)> + '_ {
        Edge::ALL.iter().map(move |&edge| (edge, self.get(edge)))
    }

    /// Effective value for a physical edge.
    ///
    /// Precedence: the physical edge itself, then Start/End under
    /// `direction`, then Horizontal/Vertical, then All.
    pub fn resolve(&self, edge: PhysicalEdge, direction: Direction) -> StyleValue {
        let logical = if edge == direction.start_edge() {
            Some(Edge::Start)
        } else if edge == direction.end_edge() {
            Some(Edge::End)
        } else {
            None
        };
        let axis = if edge.is_horizontal() {
            Edge::Horizontal
        } else {
            Edge::Vertical
        };

        std::iter::once(Some(Edge::from(edge)))
            .chain([logical, Some(axis), Some(Edge::All)])
            .flatten()
            .map(|candidate| self.get(candidate))
            .find(|value| value.is_defined())
            .unwrap_or(StyleValue::Undefined)
    }
}
