//! Drawing scanned segments onto a surface

use std::ops::ControlFlow;

use kurbo::Rect;

use crate::{
    layout_cache::ShapedGlyphs,
    scanner::{ScanSink, Segment},
    traits::RenderSurface,
    transform::ShapeTransform,
    types::LineMetrics,
};

/// Baseline y for a line whose allocation starts at `top`
pub fn baseline(top: f64, metrics: LineMetrics) -> f32 {
    top as f32 + (metrics.height - metrics.descent).round()
}

/// Draw sink: one draw call per flushed segment
///
/// The run's shape transform is composed onto the surface transform for
/// exactly one draw, then the surface transform is put back.
pub struct TransformedRenderer<'a> {
    surface: &'a mut dyn RenderSurface,
    glyphs: &'a ShapedGlyphs,
    transform: ShapeTransform,
    baseline: f32,
    ascent: f32,
    draws: usize,
}

impl<'a> TransformedRenderer<'a> {
    pub fn new(
        surface: &'a mut dyn RenderSurface,
        glyphs: &'a ShapedGlyphs,
        transform: ShapeTransform,
        baseline: f32,
        ascent: f32,
    ) -> Self {
        Self {
            surface,
            glyphs,
            transform,
            baseline,
            ascent,
            draws: 0,
        }
    }

    /// Number of draw calls issued so far
    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl ScanSink for TransformedRenderer<'_> {
    fn segment(&mut self, segment: &Segment<'_>) -> ControlFlow<()> {
        if segment.is_empty() {
            return ControlFlow::Continue(());
        }

        let base = self.surface.transform();
        if !self.transform.is_identity() {
            let shape = self.transform.transform(self.baseline as f64, self.ascent as f64);
            self.surface.set_transform(base * shape);
        }

        let glyphs = self.glyphs.segment_glyphs(segment.range());
        self.surface.draw_glyphs(&glyphs, segment.x, self.baseline);
        self.surface.set_transform(base);
        self.draws += 1;

        ControlFlow::Continue(())
    }
}

/// Run `draw` with the surface clipped to `rect`, then restore the old clip
pub fn with_clip<R>(
    surface: &mut dyn RenderSurface,
    rect: Rect,
    draw: impl FnOnce(&mut dyn RenderSurface) -> R,
) -> R {
    let saved = surface.clip();
    surface.clip_to(rect);
    let result = draw(surface);
    surface.set_clip(saved);
    result
}
