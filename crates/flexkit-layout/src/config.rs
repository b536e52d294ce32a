//! Per-tree engine configuration.

use crate::LayoutError;

/// Layout configuration, owned by the [`LayoutTree`](crate::LayoutTree) it
/// configures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    point_scale_factor: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            point_scale_factor: 1.0,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Physical pixels per point. `0` disables pixel-grid rounding.
    pub fn point_scale_factor(&self) -> f32 {
        self.point_scale_factor
    }

    pub fn set_point_scale_factor(&mut self, factor: f32) -> Result<(), LayoutError> {
        if !factor.is_finite() || factor < 0.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "point scale factor must be a non-negative number, got {}",
                factor
            )));
        }
        self.point_scale_factor = factor;
        Ok(())
    }

    /// Builder form of [`Config::set_point_scale_factor`].
    pub fn with_point_scale_factor(mut self, factor: f32) -> Result<Self, LayoutError> {
        self.set_point_scale_factor(factor)?;
        Ok(self)
    }

    /// Whether computed boxes are snapped to the pixel grid.
    pub fn rounds_to_pixel_grid(&self) -> bool {
        self.point_scale_factor > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rounds_to_whole_points() {
        let config = Config::default();
        assert_eq!(config.point_scale_factor(), 1.0);
        assert!(config.rounds_to_pixel_grid());
    }

    #[test]
    fn test_zero_disables_rounding() {
        let config = Config::new().with_point_scale_factor(0.0).unwrap();
        assert!(!config.rounds_to_pixel_grid());
    }

    #[test]
    fn test_rejects_invalid_factor() {
        let mut config = Config::new();
        assert!(matches!(
            config.set_point_scale_factor(-2.0),
            Err(LayoutError::InvalidConfig(_))
        ));
        assert!(config.set_point_scale_factor(f32::NAN).is_err());
        assert_eq!(config.point_scale_factor(), 1.0);
    }
}
