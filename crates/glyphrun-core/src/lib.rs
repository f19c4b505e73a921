//! Glyphrun Core: glyph runs for text editing views
//!
//! A text view hands one contiguous run of its document to a [`RunPainter`].
//! The painter shapes the run once, keeps the result until the document
//! changes underneath it, and answers everything the view needs from that
//! single shaped glyph vector:
//!
//! 1. **Measure** - how wide is a span, tabs and justification included
//! 2. **Paint** - draw the span, sheared or scaled when the run asks for it
//! 3. **Locate** - where on screen does an offset sit
//! 4. **Hit-test** - which offset lies under a point
//! 5. **Break** - how much of the run fits in a given advance
//!
//! All five walk the run with the same [`scanner::RunScanner`]; only the
//! sink listening to the walk changes.
//!
//! ## Painting a run
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use glyphrun_core::{PainterFactory, PainterConfig, ShapingParams};
//! # use glyphrun_core::traits::*;
//! # fn shaper() -> Arc<dyn Shaper> { unimplemented!() }
//! # fn font() -> Arc<dyn FontRef> { unimplemented!() }
//! # fn view() -> Box<dyn RunView> { unimplemented!() }
//! # fn surface() -> Box<dyn RenderSurface> { unimplemented!() }
//!
//! let factory = PainterFactory::new(shaper(), font(), ShapingParams::default())
//!     .with_config(PainterConfig::from_env());
//!
//! let view = view();
//! let mut painter = factory.painter(view.as_ref())?;
//! let width = painter.measure(view.as_ref(), view.start_offset(), view.end_offset(), 0.0);
//!
//! let mut surface = surface();
//! let alloc = kurbo::Rect::new(0.0, 0.0, width as f64, painter.height(view.as_ref()) as f64);
//! painter.paint(view.as_ref(), surface.as_mut(), alloc, view.start_offset(), view.end_offset());
//! # Ok::<(), glyphrun_core::GlyphRunError>(())
//! ```
//!
//! ## The traits a host provides
//!
//! - [`traits::Shaper`] and [`traits::FontRef`] - the font-shaping service
//! - [`traits::TextSource`] - the authoritative document text
//! - [`traits::RunView`] - the view owning the run, with its optional
//!   tab stops, attributes and justification
//! - [`traits::RenderSurface`] - where glyphs get drawn

pub mod attributes;
pub mod config;
pub mod error;
pub mod hit_test;
pub mod justification;
pub mod layout_cache;
pub mod painter;
pub mod render;
pub mod scanner;
pub mod traits;
pub mod transform;

pub use attributes::{AttributeKey, AttributeValue};
pub use config::{PainterConfig, RenderHints};
pub use error::{GlyphRunError, Result, ShapingError};
pub use painter::{PainterFactory, RunPainter};
pub use traits::{RenderSurface, RunView, Shaper, TextSource};
pub use transform::ShapeTransform;

/// The data structures shared by shapers, painters and surfaces
pub mod types {
    /// Unique identifier for a glyph within a font
    pub type GlyphId = u32;

    /// A glyph that knows exactly where it belongs
    #[derive(Debug, Clone, PartialEq)]
    pub struct PositionedGlyph {
        pub id: GlyphId,
        pub x: f32,
        pub y: f32,
        pub advance: f32,
        /// Byte offset of the source character this glyph came from
        pub cluster: u32,
    }

    /// What the shaping service hands back for one piece of text
    ///
    /// Glyphs run left to right in visual order.
    #[derive(Debug, Clone)]
    pub struct ShapingResult {
        pub glyphs: Vec<PositionedGlyph>,
        pub advance_width: f32,
    }

    /// Vertical metrics of a line of shaped text, in pixels
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct LineMetrics {
        /// Distance from the baseline to the top of the line (positive)
        pub ascent: f32,
        /// Distance from the baseline to the bottom of the line (positive)
        pub descent: f32,
        /// Ascent + descent + leading
        pub height: f32,
    }

    impl LineMetrics {
        pub fn new(ascent: f32, descent: f32, leading: f32) -> Self {
            Self {
                ascent,
                descent,
                height: ascent + descent + leading,
            }
        }

        /// Multiply every metric by a vertical scale factor
        pub fn scaled(&self, factor: f32) -> Self {
            Self {
                ascent: self.ascent * factor,
                descent: self.descent * factor,
                height: self.height * factor,
            }
        }
    }

    /// Font-level vertical metrics in font units
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct FontMetrics {
        pub ascent: f32,
        pub descent: f32,
        pub line_gap: f32,
    }
}

/// How shaping should behave
#[derive(Debug, Clone)]
pub struct ShapingParams {
    /// Font size in pixels per em
    pub size: f32,
    /// Extra advance added after every glyph
    pub letter_spacing: f32,
}

impl Default for ShapingParams {
    fn default() -> Self {
        Self {
            size: 16.0,
            letter_spacing: 0.0,
        }
    }
}
