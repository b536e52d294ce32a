//! Layout fixtures.
//!
//! A fixture is a styled node tree in JSON. Any node may carry the border
//! boxes it is expected to get in each direction:
//!
//! ```json
//! {
//!   "name": "absolute_right_percent",
//!   "root": {
//!     "style": { "position_type": "absolute", "width": 200, "height": 200 },
//!     "children": [{
//!       "style": { "position_type": "absolute", "width": 50, "height": 50,
//!                  "position": { "right": "50%" } },
//!       "expected": { "ltr": [50, 0, 50, 50], "rtl": [50, 0, 50, 50] }
//!     }]
//!   }
//! }
//! ```

use flexkit_common::{FlexkitError, Result, ResultExt};
use flexkit_layout::{LayoutTree, NodeId};
use flexkit_style::{
    parse_align_content, parse_align_items, parse_align_self, parse_box_sizing, parse_direction,
    parse_display, parse_edge, parse_flex_direction, parse_flex_wrap, parse_gutter,
    parse_justify_content, parse_position_type, Style, StyleError, StyleValue,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A length as written in JSON: a point number or a value string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Length {
    Number(f32),
    Text(String),
}

impl Length {
    fn to_style_value(&self) -> std::result::Result<StyleValue, StyleError> {
        match self {
            Length::Number(points) => Ok(StyleValue::Point(*points)),
            Length::Text(text) => text.parse(),
        }
    }
}

/// Border box as `[left, top, width, height]`.
pub type BoxSpec = [f32; 4];

/// Expected border boxes per direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expected {
    pub ltr: BoxSpec,
    pub rtl: BoxSpec,
}

/// Style of a fixture node. Keywords use their CSS spelling.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleSpec {
    pub position_type: Option<String>,
    pub flex_direction: Option<String>,
    pub flex_wrap: Option<String>,
    pub justify_content: Option<String>,
    pub align_content: Option<String>,
    pub align_items: Option<String>,
    pub align_self: Option<String>,
    pub direction: Option<String>,
    pub display: Option<String>,
    pub box_sizing: Option<String>,
    pub width: Option<Length>,
    pub height: Option<Length>,
    pub min_width: Option<Length>,
    pub max_width: Option<Length>,
    pub min_height: Option<Length>,
    pub max_height: Option<Length>,
    pub margin: BTreeMap<String, Length>,
    pub border: BTreeMap<String, Length>,
    pub padding: BTreeMap<String, Length>,
    pub position: BTreeMap<String, Length>,
    pub gap: BTreeMap<String, Length>,
}

fn keyword<T>(
    property: &'static str,
    value: &Option<String>,
    parse: fn(&str) -> Option<T>,
) -> std::result::Result<Option<T>, StyleError> {
    value
        .as_deref()
        .map(|text| {
            parse(text).ok_or_else(|| StyleError::UnknownKeyword {
                property,
                value: text.to_string(),
            })
        })
        .transpose()
}

fn edges(
    property: &'static str,
    values: &BTreeMap<String, Length>,
    mut set: impl FnMut(flexkit_style::Edge, StyleValue) -> std::result::Result<(), StyleError>,
) -> std::result::Result<(), StyleError> {
    for (name, length) in values {
        let edge = parse_edge(name).ok_or_else(|| StyleError::UnknownKeyword {
            property,
            value: name.clone(),
        })?;
        set(edge, length.to_style_value()?)?;
    }
    Ok(())
}

impl StyleSpec {
    /// Build a validated [`Style`].
    pub fn to_style(&self) -> std::result::Result<Style, StyleError> {
        let mut style = Style::new();

        if let Some(value) = keyword("position_type", &self.position_type, parse_position_type)? {
            style.position_type = value;
        }
        if let Some(value) = keyword("flex_direction", &self.flex_direction, parse_flex_direction)? {
            style.flex_direction = value;
        }
        if let Some(value) = keyword("flex_wrap", &self.flex_wrap, parse_flex_wrap)? {
            style.flex_wrap = value;
        }
        if let Some(value) =
            keyword("justify_content", &self.justify_content, parse_justify_content)?
        {
            style.justify_content = value;
        }
        if let Some(value) = keyword("align_content", &self.align_content, parse_align_content)? {
            style.align_content = value;
        }
        if let Some(value) = keyword("align_items", &self.align_items, parse_align_items)? {
            style.align_items = value;
        }
        if let Some(value) = keyword("align_self", &self.align_self, parse_align_self)? {
            style.align_self = value;
        }
        if let Some(value) = keyword("direction", &self.direction, parse_direction)? {
            style.direction = value;
        }
        if let Some(value) = keyword("display", &self.display, parse_display)? {
            style.display = value;
        }
        if let Some(value) = keyword("box_sizing", &self.box_sizing, parse_box_sizing)? {
            style.box_sizing = value;
        }

        if let Some(width) = &self.width {
            style.set_width(width.to_style_value()?)?;
        }
        if let Some(height) = &self.height {
            style.set_height(height.to_style_value()?)?;
        }
        if let Some(length) = &self.min_width {
            style.set_min_width(length.to_style_value()?)?;
        }
        if let Some(length) = &self.max_width {
            style.set_max_width(length.to_style_value()?)?;
        }
        if let Some(length) = &self.min_height {
            style.set_min_height(length.to_style_value()?)?;
        }
        if let Some(length) = &self.max_height {
            style.set_max_height(length.to_style_value()?)?;
        }

        edges("margin", &self.margin, |edge, value| style.set_margin(edge, value))?;
        edges("border", &self.border, |edge, value| style.set_border(edge, value))?;
        edges("padding", &self.padding, |edge, value| style.set_padding(edge, value))?;
        edges("position", &self.position, |edge, value| style.set_position(edge, value))?;

        for (name, length) in &self.gap {
            let gutter = parse_gutter(name).ok_or_else(|| StyleError::UnknownKeyword {
                property: "gap",
                value: name.clone(),
            })?;
            style.set_gap(gutter, length.to_style_value()?)?;
        }
        Ok(style)
    }
}

/// A fixture node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeSpec {
    pub style: StyleSpec,
    pub children: Vec<NodeSpec>,
    pub expected: Option<Expected>,
}

/// A complete fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixture {
    pub name: String,
    /// Space available to the root.
    #[serde(default)]
    pub available_width: Option<f32>,
    #[serde(default)]
    pub available_height: Option<f32>,
    pub root: NodeSpec,
}

/// A node carrying expectations, addressed by its child-index path.
#[derive(Debug, Clone)]
pub struct Checkpoint {
    pub path: String,
    pub node: NodeId,
    pub expected: Expected,
}

/// A fixture turned into a live tree.
pub struct BuiltFixture {
    pub tree: LayoutTree,
    pub root: NodeId,
    pub checkpoints: Vec<Checkpoint>,
}

impl Fixture {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| FlexkitError::fixture_with_source("invalid fixture JSON", e))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json).map_err(|e| {
            FlexkitError::fixture_with_source(format!("cannot load {}", path.display()), e)
        })
    }

    /// Build the node tree and collect the nodes with expectations.
    pub fn build(&self) -> Result<BuiltFixture> {
        let mut tree = LayoutTree::new();
        let mut checkpoints = Vec::new();
        let root = build_node(&mut tree, &self.root, "root".to_string(), &mut checkpoints)?;
        Ok(BuiltFixture {
            tree,
            root,
            checkpoints,
        })
    }
}

fn build_node(
    tree: &mut LayoutTree,
    source: &NodeSpec,
    path: String,
    checkpoints: &mut Vec<Checkpoint>,
) -> Result<NodeId> {
    let style = source
        .style
        .to_style()
        .map_err(|e| FlexkitError::style_with_source(format!("bad style at {}", path), e))?;
    let node = tree
        .new_node_with_style(style)
        .map_err(|e| FlexkitError::layout_with_source(format!("cannot create {}", path), e))?;

    for (index, child_spec) in source.children.iter().enumerate() {
        let child = build_node(tree, child_spec, format!("{}/{}", path, index), checkpoints)?;
        tree.add_child(node, child)
            .context(format!("attaching {}/{}", path, index))?;
    }

    if let Some(expected) = &source.expected {
        checkpoints.push(Checkpoint {
            path,
            node,
            expected: expected.clone(),
        });
    }
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flexkit_style::{Edge, FlexDirection, PositionType};

    #[test]
    fn test_style_spec_keywords_and_lengths() {
        let spec: StyleSpec = serde_json::from_str(
            r#"{
                "position_type": "absolute",
                "flex_direction": "row-reverse",
                "width": "50%",
                "height": 20,
                "margin": { "start": 4, "top": "10%" }
            }"#,
        )
        .unwrap();
        let style = spec.to_style().unwrap();

        assert_eq!(style.position_type, PositionType::Absolute);
        assert_eq!(style.flex_direction, FlexDirection::RowReverse);
        assert_eq!(style.width, StyleValue::Percent(50.0));
        assert_eq!(style.height, StyleValue::Point(20.0));
        assert_eq!(style.margin.get(Edge::Start), StyleValue::Point(4.0));
        assert_eq!(style.margin.get(Edge::Top), StyleValue::Percent(10.0));
    }

    #[test]
    fn test_style_spec_rejects_bad_input() {
        let unknown = StyleSpec {
            display: Some("grid".into()),
            ..Default::default()
        };
        assert!(matches!(
            unknown.to_style(),
            Err(StyleError::UnknownKeyword { property: "display", .. })
        ));

        let negative = StyleSpec {
            width: Some(Length::Number(-1.0)),
            ..Default::default()
        };
        assert!(matches!(
            negative.to_style(),
            Err(StyleError::Negative { property: "width", .. })
        ));

        let mut padding = BTreeMap::new();
        padding.insert("middle".to_string(), Length::Number(1.0));
        let bad_edge = StyleSpec {
            padding,
            ..Default::default()
        };
        assert!(bad_edge.to_style().is_err());
    }

    #[test]
    fn test_unknown_style_field_is_rejected() {
        let json = r#"{ "name": "x", "root": { "style": { "colour": "red" } } }"#;
        let err = Fixture::from_json(json).unwrap_err();
        assert_eq!(err.category(), "fixture");
    }

    #[test]
    fn test_build_collects_checkpoints() {
        let fixture = Fixture::from_json(
            r#"{
                "name": "two",
                "root": {
                    "style": { "width": 100, "height": 100 },
                    "children": [
                        {},
                        { "children": [{ "expected": { "ltr": [0, 0, 0, 0], "rtl": [0, 0, 0, 0] } }] }
                    ]
                }
            }"#,
        )
        .unwrap();
        let built = fixture.build().unwrap();

        assert_eq!(built.tree.node_count(), 4);
        assert_eq!(built.checkpoints.len(), 1);
        assert_eq!(built.checkpoints[0].path, "root/1/0");
    }

    #[test]
    fn test_bad_style_reports_node_path() {
        let fixture = Fixture::from_json(
            r#"{ "name": "bad", "root": { "children": [{ "style": { "width": "wide" } }] } }"#,
        )
        .unwrap();
        let err = fixture.build().err().unwrap();
        assert_eq!(err.category(), "style");
        assert!(err.to_string().contains("root/0"));
    }
}
