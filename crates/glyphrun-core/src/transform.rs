//! Shape transforms for stylistic script variants
//!
//! A transform is a pure function of the baseline and the ascent of the run
//! being drawn. Nothing is stored between calls, so one value can be shared
//! by any number of runs.

use kurbo::{Affine, Vec2};

/// Horizontal shear applied per unit of height above the baseline
///
/// Positive values lean glyph tops to the left in a y-down coordinate space.
pub const OPPOSITE_ITALIC_SHEAR: f64 = 0.2;

/// Geometric transform applied to every drawn glyph segment of a run
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ShapeTransform {
    #[default]
    Identity,
    /// Back-slanted text, sheared about the baseline
    OppositeItalic,
    /// Vertical stretch by the given factor, anchored at the top of the ascent
    VerticalScale(f64),
}

impl ShapeTransform {
    /// The affine transform for a segment drawn on `baseline_y`
    pub fn transform(&self, baseline_y: f64, ascent: f64) -> Affine {
        match *self {
            Self::Identity => Affine::IDENTITY,
            Self::OppositeItalic => about_y(baseline_y, Affine::skew(OPPOSITE_ITALIC_SHEAR, 0.0)),
            Self::VerticalScale(factor) => {
                about_y(baseline_y - ascent, Affine::scale_non_uniform(1.0, factor))
            },
        }
    }

    /// How much this transform stretches line metrics
    pub fn y_scale(&self) -> f64 {
        match *self {
            Self::VerticalScale(factor) => factor,
            _ => 1.0,
        }
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, Self::Identity)
    }
}

/// Apply `inner` with the horizontal line `y` as its fixed axis
fn about_y(y: f64, inner: Affine) -> Affine {
    let shift = Vec2::new(0.0, y);
    Affine::translate(shift) * inner * Affine::translate(-shift)
}
