//! The style record attached to every layout node.

use crate::{
    AlignContent, AlignItems, AlignSelf, BoxSizing, Direction, Display, Edge, EdgeValues,
    FlexDirection, FlexWrap, Gutter, JustifyContent, PositionType, StyleError, StyleInput,
    StyleValue,
};
use tracing::trace;

/// Box-model and positioning style for one node.
///
/// Fields are public for reading and bulk construction; the `set_*` methods
/// validate their input and are what the layout tree exposes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Style {
    pub margin: EdgeValues,
    pub border: EdgeValues,
    pub padding: EdgeValues,
    /// Insets (`left`, `top`, `start`, ...).
    pub position: EdgeValues,
    pub width: StyleValue,
    pub height: StyleValue,
    pub min_width: StyleValue,
    pub max_width: StyleValue,
    pub min_height: StyleValue,
    pub max_height: StyleValue,
    pub column_gap: StyleValue,
    pub row_gap: StyleValue,
    pub position_type: PositionType,
    pub flex_direction: FlexDirection,
    pub flex_wrap: FlexWrap,
    pub justify_content: JustifyContent,
    pub align_content: AlignContent,
    pub align_items: AlignItems,
    pub align_self: AlignSelf,
    pub direction: Direction,
    pub display: Display,
    pub box_sizing: BoxSizing,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a margin edge. Negative margins are allowed.
    pub fn set_margin(&mut self, edge: Edge, value: impl StyleInput) -> Result<(), StyleError> {
        let value = value.into_style_value()?.check_offset("margin")?;
        trace!(?edge, %value, "set margin");
        self.margin.set(edge, value);
        Ok(())
    }

    /// Set a border edge.
    pub fn set_border(&mut self, edge: Edge, value: impl StyleInput) -> Result<(), StyleError> {
        let value = value.into_style_value()?.check_length("border")?;
        trace!(?edge, %value, "set border");
        self.border.set(edge, value);
        Ok(())
    }

    /// Set a padding edge.
    pub fn set_padding(&mut self, edge: Edge, value: impl StyleInput) -> Result<(), StyleError> {
        let value = value.into_style_value()?.check_length("padding")?;
        trace!(?edge, %value, "set padding");
        self.padding.set(edge, value);
        Ok(())
    }

    /// Set an inset edge. Negative insets are allowed.
    pub fn set_position(&mut self, edge: Edge, value: impl StyleInput) -> Result<(), StyleError> {
        let value = value.into_style_value()?.check_offset("position")?;
        trace!(?edge, %value, "set position");
        self.position.set(edge, value);
        Ok(())
    }

    pub fn set_width(&mut self, value: impl StyleInput) -> Result<(), StyleError> {
        self.width = value.into_style_value()?.check_length("width")?;
        Ok(())
    }

    pub fn set_height(&mut self, value: impl StyleInput) -> Result<(), StyleError> {
        self.height = value.into_style_value()?.check_length("height")?;
        Ok(())
    }

    pub fn set_min_width(&mut self, value: impl StyleInput) -> Result<(), StyleError> {
        self.min_width = value.into_style_value()?.check_length("min_width")?;
        Ok(())
    }

    pub fn set_max_width(&mut self, value: impl StyleInput) -> Result<(), StyleError> {
        self.max_width = value.into_style_value()?.check_length("max_width")?;
        Ok(())
    }

    pub fn set_min_height(&mut self, value: impl StyleInput) -> Result<(), StyleError> {
        self.min_height = value.into_style_value()?.check_length("min_height")?;
        Ok(())
    }

    pub fn set_max_height(&mut self, value: impl StyleInput) -> Result<(), StyleError> {
        self.max_height = value.into_style_value()?.check_length("max_height")?;
        Ok(())
    }

    /// Set the gap between items along a gutter.
    pub fn set_gap(&mut self, gutter: Gutter, value: impl StyleInput) -> Result<(), StyleError> {
        let value = value.into_style_value()?.check_length("gap")?;
        match gutter {
            Gutter::Column => self.column_gap = value,
            Gutter::Row => self.row_gap = value,
            Gutter::All => {
                self.column_gap = value;
                self.row_gap = value;
            }
        }
        Ok(())
    }

    /// Gap along the main axis of this node's flex direction.
    pub fn main_gap(&self) -> StyleValue {
        if self.flex_direction.is_row() {
            self.column_gap
        } else {
            self.row_gap
        }
    }

    /// Gap between lines of a wrapping container.
    pub fn cross_gap(&self) -> StyleValue {
        if self.flex_direction.is_row() {
            self.row_gap
        } else {
            self.column_gap
        }
    }

    /// Re-check every field, for styles built through the public fields.
    pub fn validate(&self) -> Result<(), StyleError> {
        for (_, value) in self.margin.iter() {
            value.check_offset("margin")?;
        }
        for (_, value) in self.position.iter() {
            value.check_offset("position")?;
        }
        for (_, value) in self.border.iter() {
            value.check_length("border")?;
        }
        for (_, value) in self.padding.iter() {
            value.check_length("padding")?;
        }
        self.width.check_length("width")?;
        self.height.check_length("height")?;
        self.min_width.check_length("min_width")?;
        self.max_width.check_length("max_width")?;
        self.min_height.check_length("min_height")?;
        self.max_height.check_length("max_height")?;
        self.column_gap.check_length("gap")?;
        self.row_gap.check_length("gap")?;
        Ok(())
    }
}
