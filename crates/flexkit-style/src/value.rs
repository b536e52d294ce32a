//! Unit-tagged style scalars.

use crate::StyleError;
use std::fmt;
use std::str::FromStr;

/// A style value before resolution against a reference size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StyleValue {
    /// Not set.
    #[default]
    Undefined,
    /// Absolute points.
    Point(f32),
    /// Percentage of a reference dimension.
    Percent(f32),
    /// Engine default.
    Auto,
}

impl StyleValue {
    /// Whether the value was set at all (`Auto` counts as set).
    pub fn is_defined(self) -> bool {
        !matches!(self, StyleValue::Undefined)
    }

    /// Whether the value resolves to a number (point or percent).
    pub fn is_numeric(self) -> bool {
        matches!(self, StyleValue::Point(_) | StyleValue::Percent(_))
    }

    pub fn is_percent(self) -> bool {
        matches!(self, StyleValue::Percent(_))
    }

    /// Resolve against a reference size.
    ///
    /// Returns `None` for `Undefined` and `Auto`. A percentage against an
    /// indefinite reference resolves to `0`.
    pub fn resolve(self, reference: Option<f32>) -> Option<f32> {
        match self {
            StyleValue::Point(points) => Some(points),
            StyleValue::Percent(percent) => {
                Some(reference.map_or(0.0, |size| percent / 100.0 * size))
            }
            StyleValue::Undefined | StyleValue::Auto => None,
        }
    }

    /// Resolve, treating absent values as zero.
    pub fn resolve_or_zero(self, reference: Option<f32>) -> f32 {
        self.resolve(reference).unwrap_or(0.0)
    }

    fn number(self) -> Option<f32> {
        match self {
            StyleValue::Point(n) | StyleValue::Percent(n) => Some(n),
            StyleValue::Undefined | StyleValue::Auto => None,
        }
    }

    /// Check the value for a property that accepts negative numbers.
    pub(crate) fn check_offset(self, property: &'static str) -> Result<Self, StyleError> {
        match self.number() {
            Some(n) if !n.is_finite() => Err(StyleError::NonFinite { property }),
            _ => Ok(self),
        }
    }

    /// Check the value for a property that must not be negative.
    pub(crate) fn check_length(self, property: &'static str) -> Result<Self, StyleError> {
        let value = self.check_offset(property)?;
        match value.number() {
            Some(n) if n < 0.0 => Err(StyleError::Negative { property, value: n }),
            _ => Ok(value),
        }
    }
}

impl From<f32> for StyleValue {
    fn from(points: f32) -> Self {
        StyleValue::Point(points)
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Undefined => f.write_str("undefined"),
            StyleValue::Point(points) => write!(f, "{}", points),
            StyleValue::Percent(percent) => write!(f, "{}%", percent),
            StyleValue::Auto => f.write_str("auto"),
        }
    }
}

impl FromStr for StyleValue {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_style_value(s)
    }
}

/// Parse a style value: `auto`, `undefined`, `12`, `12px`, or `50%`.
pub fn parse_style_value(value: &str) -> Result<StyleValue, StyleError> {
    let trimmed = value.trim();
    let malformed = || StyleError::Malformed(value.to_string());

    match trimmed {
        "auto" => return Ok(StyleValue::Auto),
        "undefined" => return Ok(StyleValue::Undefined),
        "" => return Err(malformed()),
        _ => {}
    }

    let (number, percent) = if let Some(num) = trimmed.strip_suffix('%') {
        (num, true)
    } else if let Some(num) = trimmed.strip_suffix("px") {
        (num, false)
    } else {
        (trimmed, false)
    };

    let parsed = number.trim_end().parse::<f32>().map_err(|_| malformed())?;
    if !parsed.is_finite() {
        return Err(malformed());
    }

    Ok(if percent {
        StyleValue::Percent(parsed)
    } else {
        StyleValue::Point(parsed)
    })
}

/// Anything a style setter accepts: point numbers, value strings, or
/// already-built values.
pub trait StyleInput {
    /// Convert into a [`StyleValue`], rejecting malformed text.
    fn into_style_value(self) -> Result<StyleValue, StyleError>;
}

impl StyleInput for StyleValue {
    fn into_style_value(self) -> Result<StyleValue, StyleError> {
        Ok(self)
    }
}

impl StyleInput for f32 {
    fn into_style_value(self) -> Result<StyleValue, StyleError> {
        Ok(StyleValue::Point(self))
    }
}

impl StyleInput for f64 {
    fn into_style_value(self) -> Result<StyleValue, StyleError> {
        Ok(StyleValue::Point(self as f32))
    }
}

impl StyleInput for i32 {
    fn into_style_value(self) -> Result<StyleValue, StyleError> {
        Ok(StyleValue::Point(self as f32))
    }
}

impl StyleInput for &str {
    fn into_style_value(self) -> Result<StyleValue, StyleError> {
        parse_style_value(self)
    }
}

impl StyleInput for String {
    fn into_style_value(self) -> Result<StyleValue, StyleError> {
        parse_style_value(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_style_value() {
        assert_eq!(parse_style_value("50%"), Ok(StyleValue::Percent(50.0)));
        assert_eq!(parse_style_value("12"), Ok(StyleValue::Point(12.0)));
        assert_eq!(parse_style_value(" 12.5px "), Ok(StyleValue::Point(12.5)));
        assert_eq!(parse_style_value("-4"), Ok(StyleValue::Point(-4.0)));
        assert_eq!(parse_style_value("auto"), Ok(StyleValue::Auto));
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(parse_style_value("50 %x"), Err(StyleError::Malformed(_))));
        assert!(matches!(parse_style_value("%"), Err(StyleError::Malformed(_))));
        assert!(matches!(parse_style_value(""), Err(StyleError::Malformed(_))));
        assert!(matches!(parse_style_value("inf%"), Err(StyleError::Malformed(_))));
        assert!(matches!(parse_style_value("ten"), Err(StyleError::Malformed(_))));
    }

    #[test]
    fn test_resolve_percent_against_indefinite_is_zero() {
        assert_eq!(StyleValue::Percent(50.0).resolve(None), Some(0.0));
        assert_eq!(StyleValue::Percent(50.0).resolve(Some(200.0)), Some(100.0));
        assert_eq!(StyleValue::Point(7.0).resolve(None), Some(7.0));
        assert_eq!(StyleValue::Auto.resolve(Some(100.0)), None);
        assert_eq!(StyleValue::Undefined.resolve_or_zero(Some(100.0)), 0.0);
    }

    #[test]
    fn test_checks() {
        assert!(StyleValue::Point(-1.0).check_offset("margin").is_ok());
        assert_eq!(
            StyleValue::Point(-1.0).check_length("width"),
            Err(StyleError::Negative {
                property: "width",
                value: -1.0
            })
        );
        assert_eq!(
            StyleValue::Point(f32::NAN).check_offset("inset"),
            Err(StyleError::NonFinite { property: "inset" })
        );
        assert!(StyleValue::Auto.check_length("padding").is_ok());
    }

    #[test]
    fn test_style_input() {
        assert_eq!(10i32.into_style_value(), Ok(StyleValue::Point(10.0)));
        assert_eq!("25%".into_style_value(), Ok(StyleValue::Percent(25.0)));
        assert_eq!(StyleValue::from(3.0_f32), StyleValue::Point(3.0));
        assert_eq!(StyleValue::Percent(41.0).to_string(), "41%");
    }
}
