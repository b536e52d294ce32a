//! # FlexKit Style
//!
//! Style data for the FlexKit layout engine.
//!
//! ## Design Goals
//!
//! 1. **Unit-tagged values**: points, percentages, auto and undefined
//! 2. **Edge sets**: physical, logical and shorthand edges with precedence
//! 3. **Validation**: bad input is rejected when it is set, never during layout

use thiserror::Error;

pub mod edges;
pub mod style;
pub mod value;

pub use edges::{Edge, EdgeValues, PhysicalEdge};
pub use style::Style;
pub use value::{parse_style_value, StyleInput, StyleValue};

/// Errors raised at the style setter boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleError {
    #[error("Malformed value: {0:?}")]
    Malformed(String),

    #[error("Negative value {value} is not allowed for {property}")]
    Negative { property: &'static str, value: f32 },

    #[error("Non-finite value for {property}")]
    NonFinite { property: &'static str },

    #[error("Unknown {property} keyword: {value:?}")]
    UnknownKeyword { property: &'static str, value: String },
}

// ==================== Positioning ====================

/// Position type property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionType {
    /// In flow; insets are ignored.
    Static,
    /// In flow; insets offset the box after flow layout.
    #[default]
    Relative,
    /// Out of flow; placed against the containing block's padding box.
    Absolute,
}

impl PositionType {
    /// Whether boxes of this type establish a containing block for absolute
    /// descendants.
    pub fn is_positioned(self) -> bool {
        matches!(self, PositionType::Relative | PositionType::Absolute)
    }
}

/// Writing direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Take the parent's resolved direction.
    #[default]
    Inherit,
    Ltr,
    Rtl,
}

impl Direction {
    /// Resolve against the parent's direction. Never returns `Inherit`.
    pub fn resolve(self, parent: Direction) -> Direction {
        match (self, parent) {
            (Direction::Inherit, Direction::Rtl) => Direction::Rtl,
            (Direction::Inherit, _) => Direction::Ltr,
            (own, _) => own,
        }
    }

    /// Physical edge that `Start` maps to.
    pub fn start_edge(self) -> PhysicalEdge {
        match self {
            Direction::Rtl => PhysicalEdge::Right,
            Direction::Ltr | Direction::Inherit => PhysicalEdge::Left,
        }
    }

    /// Physical edge that `End` maps to.
    pub fn end_edge(self) -> PhysicalEdge {
        self.start_edge().opposite()
    }
}

// ==================== Flexbox Types ====================

/// Flex direction property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexDirection {
    #[default]
    Column,
    ColumnReverse,
    Row,
    RowReverse,
}

impl FlexDirection {
    /// Check if this direction is reversed.
    pub fn is_reverse(self) -> bool {
        matches!(self, FlexDirection::RowReverse | FlexDirection::ColumnReverse)
    }

    /// Check if this is a row direction.
    pub fn is_row(self) -> bool {
        matches!(self, FlexDirection::Row | FlexDirection::RowReverse)
    }

    /// Check if this is a column direction.
    pub fn is_column(self) -> bool {
        matches!(self, FlexDirection::Column | FlexDirection::ColumnReverse)
    }
}

/// Justify content property (main axis alignment).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JustifyContent {
    #[default]
    FlexStart,
    Center,
    FlexEnd,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

/// Align items property (cross axis alignment for all items).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignItems {
    FlexStart,
    Center,
    FlexEnd,
    #[default]
    Stretch,
}

/// Align self property (cross axis alignment for one item).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignSelf {
    /// Use the parent's `align_items`.
    #[default]
    Auto,
    FlexStart,
    Center,
    FlexEnd,
    Stretch,
}

impl AlignSelf {
    /// Effective alignment given the parent's `align_items`.
    pub fn resolve(self, align_items: AlignItems) -> AlignItems {
        match self {
            AlignSelf::Auto => align_items,
            AlignSelf::FlexStart => AlignItems::FlexStart,
            AlignSelf::Center => AlignItems::Center,
            AlignSelf::FlexEnd => AlignItems::FlexEnd,
            AlignSelf::Stretch => AlignItems::Stretch,
        }
    }
}

/// Flex wrap property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexWrap {
    /// All items on one line.
    #[default]
    NoWrap,
    Wrap,
    /// Lines stack from the cross-axis end.
    WrapReverse,
}

impl FlexWrap {
    /// Whether items may break onto several lines.
    pub fn is_wrapping(self) -> bool {
        !matches!(self, FlexWrap::NoWrap)
    }
}

/// Align content property (placement of lines on the cross axis).
///
/// Only wrapping containers use it; a single-line container's line always
/// spans its cross size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignContent {
    #[default]
    FlexStart,
    Center,
    FlexEnd,
    Stretch,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

/// Display property values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Flex,
    /// The node and its subtree take no space and get zero-sized boxes.
    None,
}

/// Which box `width` and `height` size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoxSizing {
    #[default]
    BorderBox,
    ContentBox,
}

/// Gap selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gutter {
    /// Space between columns (horizontal main axis).
    Column,
    /// Space between rows (vertical main axis).
    Row,
    All,
}

// ==================== Keyword parsing ====================

/// Parse an edge name.
pub fn parse_edge(value: &str) -> Option<Edge> {
    match value.trim().to_ascii_lowercase().as_str() {
        "left" => Some(Edge::Left),
        "top" => Some(Edge::Top),
        "right" => Some(Edge::Right),
        "bottom" => Some(Edge::Bottom),
        "start" => Some(Edge::Start),
        "end" => Some(Edge::End),
        "horizontal" => Some(Edge::Horizontal),
        "vertical" => Some(Edge::Vertical),
        "all" => Some(Edge::All),
        _ => None,
    }
}

/// Parse a position type value.
pub fn parse_position_type(value: &str) -> Option<PositionType> {
    match value.trim().to_ascii_lowercase().as_str() {
        "static" => Some(PositionType::Static),
        "relative" => Some(PositionType::Relative),
        "absolute" => Some(PositionType::Absolute),
        _ => None,
    }
}

/// Parse a direction value.
pub fn parse_direction(value: &str) -> Option<Direction> {
    match value.trim().to_ascii_lowercase().as_str() {
        "inherit" => Some(Direction::Inherit),
        "ltr" => Some(Direction::Ltr),
        "rtl" => Some(Direction::Rtl),
        _ => None,
    }
}

/// Parse a flex direction value.
pub fn parse_flex_direction(value: &str) -> Option<FlexDirection> {
    match value.trim().to_ascii_lowercase().as_str() {
        "column" => Some(FlexDirection::Column),
        "column-reverse" => Some(FlexDirection::ColumnReverse),
        "row" => Some(FlexDirection::Row),
        "row-reverse" => Some(FlexDirection::RowReverse),
        _ => None,
    }
}

/// Parse a justify-content value.
pub fn parse_justify_content(value: &str) -> Option<JustifyContent> {
    match value.trim().to_ascii_lowercase().as_str() {
        "flex-start" => Some(JustifyContent::FlexStart),
        "center" => Some(JustifyContent::Center),
        "flex-end" => Some(JustifyContent::FlexEnd),
        "space-between" => Some(JustifyContent::SpaceBetween),
        "space-around" => Some(JustifyContent::SpaceAround),
        "space-evenly" => Some(JustifyContent::SpaceEvenly),
        _ => None,
    }
}

/// Parse an align-items value.
pub fn parse_align_items(value: &str) -> Option<AlignItems> {
    match value.trim().to_ascii_lowercase().as_str() {
        "flex-start" => Some(AlignItems::FlexStart),
        "center" => Some(AlignItems::Center),
        "flex-end" => Some(AlignItems::FlexEnd),
        "stretch" => Some(AlignItems::Stretch),
        _ => None,
    }
}

/// Parse an align-self value.
pub fn parse_align_self(value: &str) -> Option<AlignSelf> {
    if value.trim().eq_ignore_ascii_case("auto") {
        return Some(AlignSelf::Auto);
    }
    parse_align_items(value).map(|align| match align {
        AlignItems::FlexStart => AlignSelf::FlexStart,
        AlignItems::Center => AlignSelf::Center,
        AlignItems::FlexEnd => AlignSelf::FlexEnd,
        AlignItems::Stretch => AlignSelf::Stretch,
    })
}

/// Parse a flex-wrap value.
pub fn parse_flex_wrap(value: &str) -> Option<FlexWrap> {
    match value.trim().to_ascii_lowercase().as_str() {
        "nowrap" | "no-wrap" => Some(FlexWrap::NoWrap),
        "wrap" => Some(FlexWrap::Wrap),
        "wrap-reverse" => Some(FlexWrap::WrapReverse),
        _ => None,
    }
}

/// Parse an align-content value.
pub fn parse_align_content(value: &str) -> Option<AlignContent> {
    match value.trim().to_ascii_lowercase().as_str() {
        "flex-start" => Some(AlignContent::FlexStart),
        "center" => Some(AlignContent::Center),
        "flex-end" => Some(AlignContent::FlexEnd),
        "stretch" => Some(AlignContent::Stretch),
        "space-between" => Some(AlignContent::SpaceBetween),
        "space-around" => Some(AlignContent::SpaceAround),
        "space-evenly" => Some(AlignContent::SpaceEvenly),
        _ => None,
    }
}

/// Parse a display value.
pub fn parse_display(value: &str) -> Option<Display> {
    match value.trim().to_ascii_lowercase().as_str() {
        "flex" => Some(Display::Flex),
        "none" => Some(Display::None),
        _ => None,
    }
}

/// Parse a box-sizing value.
pub fn parse_box_sizing(value: &str) -> Option<BoxSizing> {
    match value.trim().to_ascii_lowercase().as_str() {
        "border-box" => Some(BoxSizing::BorderBox),
        "content-box" => Some(BoxSizing::ContentBox),
        _ => None,
    }
}

/// Parse a gutter name.
pub fn parse_gutter(value: &str) -> Option<Gutter> {
    match value.trim().to_ascii_lowercase().as_str() {
        "column" => Some(Gutter::Column),
        "row" => Some(Gutter::Row),
        "all" => Some(Gutter::All),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_error_messages() {
        let err = StyleError::Negative {
            property: "width",
            value: -3.0,
        };
        assert_eq!(err.to_string(), "Negative value -3 is not allowed for width");
    }

    #[test]
    fn test_direction_resolve() {
        assert_eq!(Direction::Inherit.resolve(Direction::Rtl), Direction::Rtl);
        assert_eq!(Direction::Inherit.resolve(Direction::Inherit), Direction::Ltr);
        assert_eq!(Direction::Ltr.resolve(Direction::Rtl), Direction::Ltr);
        assert_eq!(Direction::Rtl.start_edge(), PhysicalEdge::Right);
        assert_eq!(Direction::Rtl.end_edge(), PhysicalEdge::Left);
    }

    #[test]
    fn test_flex_direction_properties() {
        assert!(FlexDirection::Row.is_row());
        assert!(FlexDirection::RowReverse.is_row());
        assert!(!FlexDirection::Column.is_row());
        assert!(FlexDirection::ColumnReverse.is_column());
        assert!(FlexDirection::RowReverse.is_reverse());
        assert!(!FlexDirection::Row.is_reverse());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(PositionType::default(), PositionType::Relative);
        assert_eq!(FlexDirection::default(), FlexDirection::Column);
        assert_eq!(AlignItems::default(), AlignItems::Stretch);
        assert!(PositionType::Absolute.is_positioned());
        assert!(!PositionType::Static.is_positioned());
    }

    #[test]
    fn test_align_self_resolve() {
        assert_eq!(AlignSelf::Auto.resolve(AlignItems::Center), AlignItems::Center);
        assert_eq!(AlignSelf::FlexEnd.resolve(AlignItems::Center), AlignItems::FlexEnd);
    }

    #[test]
    fn test_keyword_parsing() {
        assert_eq!(parse_edge("Start"), Some(Edge::Start));
        assert_eq!(parse_position_type("absolute"), Some(PositionType::Absolute));
        assert_eq!(parse_flex_direction("row-reverse"), Some(FlexDirection::RowReverse));
        assert_eq!(parse_justify_content("space-evenly"), Some(JustifyContent::SpaceEvenly));
        assert_eq!(parse_align_self("auto"), Some(AlignSelf::Auto));
        assert_eq!(parse_align_self("flex-end"), Some(AlignSelf::FlexEnd));
        assert_eq!(parse_direction("rtl"), Some(Direction::Rtl));
        assert_eq!(parse_display("none"), Some(Display::None));
        assert_eq!(parse_box_sizing("content-box"), Some(BoxSizing::ContentBox));
        assert_eq!(parse_gutter("row"), Some(Gutter::Row));
        assert_eq!(parse_position_type("sticky"), None);
        assert_eq!(parse_flex_wrap("wrap-reverse"), Some(FlexWrap::WrapReverse));
        assert_eq!(parse_flex_wrap("nowrap"), Some(FlexWrap::NoWrap));
        assert_eq!(parse_align_content("space-around"), Some(AlignContent::SpaceAround));
        assert_eq!(parse_align_content("baseline"), None);
    }

    #[test]
    fn test_wrap_defaults() {
        assert_eq!(FlexWrap::default(), FlexWrap::NoWrap);
        assert_eq!(AlignContent::default(), AlignContent::FlexStart);
        assert!(FlexWrap::WrapReverse.is_wrapping());
        assert!(!FlexWrap::NoWrap.is_wrapping());
    }
}
