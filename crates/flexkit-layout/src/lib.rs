//! # FlexKit Layout
//!
//! Box-model and positioning layout for trees of flexbox-styled nodes.
//!
//! ## Design Goals
//!
//! 1. **Box model**: margin, border, padding and content boxes per node
//! 2. **Flow**: single- and multi-line flex placement with min/max bounds
//! 3. **Positioning**: static, relative and absolute nodes, including the
//!    static-position fallback for absolute nodes without insets
//! 4. **Writing direction**: LTR/RTL mirroring of logical edges and axes
//! 5. **Pixel grid**: results snapped to the configured point scale
//!
//! ## Example
//!
//! ```
//! use flexkit_layout::{Direction, Edge, LayoutTree, PositionType};
//!
//! let mut tree = LayoutTree::new();
//! let root = tree.new_node();
//! tree.set_width(root, 200.0).unwrap();
//! tree.set_height(root, 100.0).unwrap();
//!
//! let child = tree.new_node();
//! tree.set_position_type(child, PositionType::Absolute).unwrap();
//! tree.set_position(child, Edge::Right, "10%").unwrap();
//! tree.set_width(child, 50.0).unwrap();
//! tree.add_child(root, child).unwrap();
//!
//! tree.calculate_layout(root, None, None, Direction::Ltr).unwrap();
//! assert_eq!(tree.computed_left(child).unwrap(), 130.0);
//! ```

use thiserror::Error;

pub mod axis;
pub mod box_model;
mod compute;
pub mod config;
mod flow;
mod positioned;
mod rounding;
pub mod tree;

pub use axis::{cross_axis_edges, line_cross_edges, main_axis_edges, physical_edge, Axis};
pub use box_model::{Dimensions, EdgeSizes, Rect, Size};
pub use config::Config;
pub use flexkit_style::{
    AlignContent, AlignItems, AlignSelf, BoxSizing, Direction, Display, Edge, FlexDirection,
    FlexWrap, Gutter, JustifyContent, PhysicalEdge, PositionType, Style, StyleError, StyleValue,
};
pub use tree::{ComputedLayout, LayoutTree, NodeId};

/// Errors that can occur while building or laying out a tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Unknown or freed node: {0}")]
    UnknownNode(NodeId),

    #[error("Node {child} already has a parent")]
    AlreadyParented { child: NodeId },

    #[error("Inserting {child} under {parent} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },

    #[error("Child index {index} out of range for {count} children")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("Node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },

    #[error("Edge {0:?} does not name a single physical side")]
    AmbiguousEdge(Edge),

    #[error("Invalid available size: {0}")]
    InvalidAvailableSize(f32),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Style(#[from] StyleError),
}
