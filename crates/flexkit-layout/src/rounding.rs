//! Pixel-grid rounding of computed boxes.

use crate::tree::{LayoutTree, NodeId};
use crate::LayoutError;

const TOLERANCE: f64 = 1e-4;

fn inexact_equals(a: f64, b: f64) -> bool {
    (a - b).abs() < TOLERANCE
}

/// Round `value` to the nearest multiple of `1 / scale`, halves rounding up.
pub(crate) fn round_to_pixel_grid(value: f64, scale: f64) -> f64 {
    let scaled = value * scale;
    let mut fraction = scaled % 1.0;
    if fraction < 0.0 {
        fraction += 1.0;
    }

    let rounded = if inexact_equals(fraction, 0.0) {
        scaled - fraction
    } else if inexact_equals(fraction, 1.0) {
        scaled - fraction + 1.0
    } else if fraction > 0.5 || inexact_equals(fraction, 0.5) {
        scaled - fraction + 1.0
    } else {
        scaled - fraction
    };
    rounded / scale
}

/// Snap every box under `root` to the grid.
///
/// Positions are rounded on their own; sizes are the distance between the
/// rounded absolute edges, so adjacent boxes never overlap or leave gaps.
pub(crate) fn round_layout(tree: &mut LayoutTree, root: NodeId, scale: f32) -> Result<(), LayoutError> {
    let scale = f64::from(scale);
    // (node, unrounded absolute left, unrounded absolute top) of the parent.
    let mut stack = vec![(root, 0.0_f64, 0.0_f64)];

    while let Some((id, parent_left, parent_top)) = stack.pop() {
        let node = tree.node_mut(id)?;
        let layout = &mut node.layout;

        let left = f64::from(layout.left);
        let top = f64::from(layout.top);
        let absolute_left = parent_left + left;
        let absolute_top = parent_top + top;
        let absolute_right = absolute_left + f64::from(layout.width);
        let absolute_bottom = absolute_top + f64::from(layout.height);

        layout.left = round_to_pixel_grid(left, scale) as f32;
        layout.top = round_to_pixel_grid(top, scale) as f32;
        layout.width = (round_to_pixel_grid(absolute_right, scale)
            - round_to_pixel_grid(absolute_left, scale)) as f32;
        layout.height = (round_to_pixel_grid(absolute_bottom, scale)
            - round_to_pixel_grid(absolute_top, scale)) as f32;

        stack.extend(
            node.children
                .iter()
                .map(|&child| (child, absolute_left, absolute_top)),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rounds(value: f64, scale: f64, expected: f64) {
        let rounded = round_to_pixel_grid(value, scale);
        assert!(
            (rounded - expected).abs() < 1e-9,
            "{} at scale {} rounded to {}, expected {}",
            value,
            scale,
            rounded,
            expected
        );
    }

    #[test]
    fn test_round_to_pixel_grid() {
        assert_rounds(160.31, 1.0, 160.0);
        assert_rounds(238.51, 1.0, 239.0);
        assert_rounds(2.5, 1.0, 3.0);
        assert_rounds(-2.08, 1.0, -2.0);
        assert_rounds(-60.31, 1.0, -60.0);
        assert_rounds(-2.5, 1.0, -2.0);
        assert_rounds(10.99995, 1.0, 11.0);
    }

    #[test]
    fn test_fractional_scale() {
        assert_rounds(10.3, 2.0, 10.5);
        assert_rounds(10.2, 2.0, 10.0);
        assert_rounds(1.0 / 3.0, 3.0, 1.0 / 3.0);
    }
}
