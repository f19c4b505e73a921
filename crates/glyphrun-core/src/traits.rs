//! The contracts between the painter and its host
//!
//! The painter never owns a document, a font file or a canvas. It borrows
//! them through these traits on every call.
//!
//! ## The Players
//!
//! - [`FontRef`] - Your window into font data and metrics
//! - [`Shaper`] - Where characters become glyphs
//! - [`TextSource`] - The authoritative text and the run's place in it
//! - [`TabStopPolicy`] - Where tabs land
//! - [`JustificationProvider`] - Extra space the paragraph wants distributed
//! - [`RunView`] - The view that owns a run, bundling the above
//! - [`RenderSurface`] - Where glyphs become visible

use std::sync::Arc;

use kurbo::{Affine, Rect};

use crate::{
    attributes::AttributeSource,
    config::RenderHints,
    error::Result,
    justification::JustificationData,
    types::*,
    ShapingParams,
};

/// Your key to font metrics
///
/// ```ignore
/// struct MyFont;
///
/// impl FontRef for MyFont {
///     fn units_per_em(&self) -> u16 {
///         1000
///     }
///
///     fn glyph_id(&self, ch: char) -> Option<GlyphId> {
///         Some(ch as u32)
///     }
///
///     fn advance_width(&self, _glyph_id: GlyphId) -> f32 {
///         500.0
///     }
///
///     fn metrics(&self) -> FontMetrics {
///         FontMetrics { ascent: 800.0, descent: 200.0, line_gap: 0.0 }
///     }
/// }
/// ```
pub trait FontRef: Send + Sync {
    /// The font's internal coordinate system scale
    fn units_per_em(&self) -> u16;

    /// Find the glyph that represents this character
    ///
    /// Returns None when the font doesn't contain this character.
    fn glyph_id(&self, ch: char) -> Option<GlyphId>;

    /// How wide this glyph stands in font units
    fn advance_width(&self, glyph_id: GlyphId) -> f32;

    /// Vertical metrics in font units
    fn metrics(&self) -> FontMetrics;
}

/// The external font-shaping service
///
/// Shaping is where script rules and font features produce positioned
/// glyphs. The painter only consumes the result.
pub trait Shaper: Send + Sync {
    /// Identify yourself in logs and error messages
    fn name(&self) -> &'static str;

    /// Transform characters into positioned glyphs
    ///
    /// Glyph `cluster` values are byte offsets into `text`.
    fn shape(
        &self,
        text: &str,
        font: Arc<dyn FontRef>,
        params: &ShapingParams,
    ) -> Result<ShapingResult>;

    /// Line metrics for `text` under `font`, in pixels
    fn line_metrics(
        &self,
        text: &str,
        font: Arc<dyn FontRef>,
        params: &ShapingParams,
    ) -> Result<LineMetrics>;
}

/// The authoritative document text, seen from the view owning a run
///
/// Offsets are character offsets into the document.
pub trait TextSource {
    /// `len` characters starting at `start`
    ///
    /// Fails with [`GlyphRunError::OutOfRange`](crate::GlyphRunError::OutOfRange)
    /// when the range leaves the document.
    fn substring(&self, start: usize, len: usize) -> Result<String>;

    /// First document offset covered by the run
    fn start_offset(&self) -> usize;

    /// One past the last document offset covered by the run
    fn end_offset(&self) -> usize;

    /// Start offset of the parent view, when the run has one
    ///
    /// Justification data arrives in the parent's coordinates.
    fn parent_start_offset(&self) -> Option<usize> {
        None
    }
}

/// Where the next tab stop lies
pub trait TabStopPolicy {
    /// The x position a tab at document offset `offset` advances to from `x`
    ///
    /// Implementations must never return less than `x`.
    fn next_tab_stop(&self, x: f32, offset: usize) -> f32;
}

/// The parent layout's justification for the current line
pub trait JustificationProvider {
    /// Raw justification data in the parent's coordinate space
    fn justification(&self) -> Option<JustificationData>;
}

/// The view owning a run
///
/// Everything but the text is optional.
pub trait RunView: TextSource {
    fn attributes(&self) -> Option<&dyn AttributeSource> {
        None
    }

    fn tab_stops(&self) -> Option<&dyn TabStopPolicy> {
        None
    }

    fn justification(&self) -> Option<&dyn JustificationProvider> {
        None
    }
}

/// Where glyphs become visible
///
/// Transform and clip are plain state: the painter reads them, changes them
/// for the duration of one draw, and puts the old values back.
pub trait RenderSurface {
    /// Current user-space to device transform
    fn transform(&self) -> Affine;

    fn set_transform(&mut self, transform: Affine);

    /// Draw `glyphs` with their origin at `(x, y)`
    ///
    /// Glyph positions are relative to the first glyph of the slice.
    fn draw_glyphs(&mut self, glyphs: &[PositionedGlyph], x: f32, y: f32);

    /// Current clip, `None` meaning unclipped
    fn clip(&self) -> Option<Rect>;

    fn set_clip(&mut self, clip: Option<Rect>);

    /// Narrow the current clip to `rect`
    fn clip_to(&mut self, rect: Rect) {
        let narrowed = match self.clip() {
            Some(current) => current.intersect(rect),
            None => rect,
        };
        self.set_clip(Some(narrowed));
    }

    /// Switch text rendering hints
    fn set_render_hints(&mut self, _hints: RenderHints) {}
}
