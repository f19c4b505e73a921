//! Run painters and the factory that makes them
//!
//! A [`RunPainter`] belongs to exactly one view. Every public call starts by
//! re-reading the view's text and reshaping if it drifted; everything after
//! that works off the cached glyph vector.
//!
//! Failures to read or shape text never escape a paint, measure or hit-test
//! call. They are logged and the call answers from the stale glyphs, or with
//! a zero / `None` result when the stale glyphs cannot cover the request.

use std::ops::Range;
use std::sync::Arc;

use kurbo::Rect;

use crate::{
    attributes,
    config::PainterConfig,
    error::{GlyphRunError, Result},
    hit_test,
    justification::JustificationResolver,
    layout_cache::GlyphLayoutCache,
    render::{self, TransformedRenderer},
    scanner::{Measure, RunScanner},
    traits::{FontRef, RenderSurface, RunView, Shaper},
    transform::ShapeTransform,
    ShapingParams,
};

/// Makes painters that share one shaper, font and configuration
///
/// The factory holds no per-run state, so one instance can serve every view
/// of an editor, from any thread.
#[derive(Clone)]
pub struct PainterFactory {
    shaper: Arc<dyn Shaper>,
    font: Arc<dyn FontRef>,
    params: ShapingParams,
    config: PainterConfig,
}

impl PainterFactory {
    pub fn new(shaper: Arc<dyn Shaper>, font: Arc<dyn FontRef>, params: ShapingParams) -> Self {
        Self {
            shaper,
            font,
            params,
            config: PainterConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PainterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> PainterConfig {
        self.config
    }

    pub fn params(&self) -> &ShapingParams {
        &self.params
    }

    /// A painter for the whole run of `view`
    pub fn painter(&self, view: &dyn RunView) -> Result<RunPainter> {
        self.painter_for_range(view, view.start_offset(), view.end_offset())
    }

    /// A painter seeded with the text of `p0..p1`
    ///
    /// Fails when the range cannot be read, when shaping fails, or when the
    /// view's attributes name a shape transform that isn't one.
    pub fn painter_for_range(
        &self,
        view: &dyn RunView,
        p0: usize,
        p1: usize,
    ) -> Result<RunPainter> {
        if p1 < p0 {
            return Err(GlyphRunError::out_of_range(p1, p0, view.end_offset()));
        }
        let text = view.substring(p0, p1 - p0)?;
        let transform = match view.attributes() {
            Some(attrs) => attributes::shape_transform(attrs)?,
            None => ShapeTransform::Identity,
        };
        let kerning = view.attributes().and_then(attributes::kerning);

        let mut cache = GlyphLayoutCache::new();
        cache.sync(&text, p0, self.shaper.as_ref(), &self.font, &self.params, kerning)?;

        Ok(RunPainter {
            factory: self.clone(),
            transform,
            cache,
        })
    }
}

/// Lays out, paints and hit-tests one run of a view
pub struct RunPainter {
    factory: PainterFactory,
    transform: ShapeTransform,
    cache: GlyphLayoutCache,
}

impl RunPainter {
    /// The shape transform the run is drawn with
    pub fn shape_transform(&self) -> ShapeTransform {
        self.transform
    }

    /// The cached layout, as of the last sync
    pub fn layout(&self) -> &GlyphLayoutCache {
        &self.cache
    }

    /// A fresh painter for `p0..p1` of `view`, sharing this painter's font
    pub fn painter_for_range(
        &self,
        view: &dyn RunView,
        p0: usize,
        p1: usize,
    ) -> Result<RunPainter> {
        self.factory.painter_for_range(view, p0, p1)
    }

    /// Width of `p0..p1` laid out from cursor `x`
    ///
    /// `x` matters for tab expansion. Returns 0 when the range cannot be
    /// covered.
    pub fn measure(&mut self, view: &dyn RunView, p0: usize, p1: usize, x: f32) -> f32 {
        self.sync(view);
        let Some(range) = self.local_range(p0, p1) else {
            log::warn!("Cannot measure {p0}..{p1}: run covers {}", self.covered());
            return 0.0;
        };
        self.measure_local(view, range, x)
    }

    /// Line height, stretched by a vertical scale transform
    pub fn height(&mut self, view: &dyn RunView) -> f32 {
        self.sync(view);
        self.scaled_metrics().height
    }

    /// Ascent above the baseline, stretched by a vertical scale transform
    pub fn ascent(&mut self, view: &dyn RunView) -> f32 {
        self.sync(view);
        self.scaled_metrics().ascent
    }

    /// Descent below the baseline, stretched by a vertical scale transform
    pub fn descent(&mut self, view: &dyn RunView) -> f32 {
        self.sync(view);
        self.scaled_metrics().descent
    }

    /// Paint `p0..p1` of the run into `alloc`
    ///
    /// A strict sub-range of the run is drawn with the surface clipped to
    /// the sub-range's box; the previous clip is restored afterwards.
    pub fn paint(
        &mut self,
        view: &dyn RunView,
        surface: &mut dyn RenderSurface,
        alloc: Rect,
        p0: usize,
        p1: usize,
    ) {
        self.sync(view);
        let (start, end) = (view.start_offset(), view.end_offset());
        let (Some(prefix), Some(range)) = (self.local_range(start, p0), self.local_range(p0, p1))
        else {
            log::warn!("Cannot paint {p0}..{p1}: run covers {}", self.covered());
            return;
        };

        surface.set_render_hints(self.factory.config.hints);

        let origin = alloc.x0 as f32;
        let x = origin + self.measure_local(view, prefix, origin);
        let metrics = self.cache.metrics();
        let y = render::baseline(alloc.y0, metrics);
        let scanner = self.scanner(view);
        let draw = |surface: &mut dyn RenderSurface| {
            let glyphs = self.cache.glyphs();
            let mut renderer =
                TransformedRenderer::new(surface, glyphs, self.transform, y, metrics.ascent);
            scanner.scan(range.clone(), x, &mut renderer);
        };

        if p0 > start || p1 < end {
            let clip = match (self.point_at(view, p0, alloc), self.point_at(view, p1, alloc)) {
                (Ok(left), Ok(right)) => Rect::new(left.x0, alloc.y0, right.x0, alloc.y1),
                _ => alloc,
            };
            render::with_clip(surface, clip, draw);
        } else {
            draw(surface);
        }
    }

    /// Caret box for document offset `pos`
    ///
    /// The box is zero-width and a line tall. The run's end offset maps to
    /// the right edge of `alloc`, where a following run begins.
    pub fn offset_to_point(&mut self, view: &dyn RunView, pos: usize, alloc: Rect) -> Result<Rect> {
        self.sync(view);
        self.point_at(view, pos, alloc)
    }

    /// Document offset under `(x, y)`
    ///
    /// Never returns the run's end offset: a hit at or past the right edge
    /// resolves to the last character. `None` when the run cannot be read.
    pub fn point_to_offset(
        &mut self,
        view: &dyn RunView,
        x: f32,
        _y: f32,
        alloc: Rect,
    ) -> Option<usize> {
        self.sync(view);
        let (start, end) = (view.start_offset(), view.end_offset());
        let Some(range) = self.local_range(start, end) else {
            log::warn!("Cannot hit-test {start}..{end}: run covers {}", self.covered());
            return None;
        };

        let local = hit_test::offset_at(&self.scanner(view), range, alloc.x0 as f32, x, true);
        let offset = self.cache.start() + local;
        Some(if offset >= end && end > start { end - 1 } else { offset })
    }

    /// Where a line starting at `p0` with cursor `x` should break to fit `len`
    ///
    /// Returns the offset of the character the budget runs out in, within
    /// `p0..=end`.
    pub fn find_break_offset(
        &mut self,
        view: &dyn RunView,
        p0: usize,
        x: f32,
        len: f32,
    ) -> Option<usize> {
        self.sync(view);
        let Some(range) = self.local_range(p0, view.end_offset()) else {
            log::warn!("Cannot break from {p0}: run covers {}", self.covered());
            return None;
        };
        let local = hit_test::break_offset(&self.scanner(view), range.start, x, len);
        Some(self.cache.start() + local)
    }

    /// Bring the cached glyphs in line with the view's text
    ///
    /// Failures are logged and the stale glyphs stay in use.
    fn sync(&mut self, view: &dyn RunView) {
        match self.try_sync(view) {
            Ok(true) => self.refresh_transform(view),
            Ok(false) => {},
            Err(err) => {
                log::warn!("Keeping stale glyphs for run at {}: {err}", view.start_offset())
            },
        }
    }

    /// Reshape if the view's text moved on; `Ok(true)` when it did
    fn try_sync(&mut self, view: &dyn RunView) -> Result<bool> {
        let start = view.start_offset();
        let len = view.end_offset().saturating_sub(start);
        let text = view
            .substring(start, len)
            .map_err(|err| GlyphRunError::SourceUnavailable(err.to_string()))?;

        let kerning = view.attributes().and_then(attributes::kerning);
        let factory = &self.factory;
        self.cache.sync(
            &text,
            start,
            factory.shaper.as_ref(),
            &factory.font,
            &factory.params,
            kerning,
        )
    }

    fn refresh_transform(&mut self, view: &dyn RunView) {
        let Some(attrs) = view.attributes() else {
            self.transform = ShapeTransform::Identity;
            return;
        };
        match attributes::shape_transform(attrs) {
            Ok(transform) => self.transform = transform,
            Err(err) => {
                let start = view.start_offset();
                log::error!("Keeping {:?} for run at {start}: {err}", self.transform)
            },
        }
    }

    fn scanner<'a>(&'a self, view: &'a dyn RunView) -> RunScanner<'a> {
        let glyphs = self.cache.glyphs();
        let justification = JustificationResolver::resolve(
            view.justification(),
            self.cache.start(),
            view.parent_start_offset(),
            glyphs.len(),
        );
        RunScanner::new(
            self.cache.text().unwrap_or_default(),
            glyphs,
            self.cache.space_advance(),
            self.cache.start(),
        )
        .with_tab_stops(view.tab_stops())
        .with_justification(justification)
    }

    fn measure_local(&self, view: &dyn RunView, range: Range<usize>, x: f32) -> f32 {
        let mut sink = Measure::default();
        self.scanner(view).scan(range, x, &mut sink);
        sink.width
    }

    fn point_at(&self, view: &dyn RunView, pos: usize, alloc: Rect) -> Result<Rect> {
        let (start, end) = (view.start_offset(), view.end_offset());
        if pos < start || pos > end {
            return Err(GlyphRunError::out_of_range(pos, start, end));
        }

        let height = self.scaled_metrics().height as f64;
        if pos == end {
            return Ok(Rect::new(alloc.x1, alloc.y0, alloc.x1, alloc.y0 + height));
        }

        let width = match self.local_range(start, pos) {
            Some(range) => self.measure_local(view, range, alloc.x0 as f32),
            None => {
                log::warn!("Cannot locate {pos}: run covers {}", self.covered());
                0.0
            },
        };
        let x = alloc.x0 + width as f64;
        Ok(Rect::new(x, alloc.y0, x, alloc.y0 + height))
    }

    fn scaled_metrics(&self) -> crate::types::LineMetrics {
        self.cache.metrics().scaled(self.transform.y_scale() as f32)
    }

    /// Map document offsets onto the cached run
    fn local_range(&self, p0: usize, p1: usize) -> Option<Range<usize>> {
        let start = self.cache.start();
        let a = p0.checked_sub(start)?;
        let b = p1.checked_sub(start)?;
        (a <= b && b <= self.cache.glyphs().len()).then_some(a..b)
    }

    fn covered(&self) -> String {
        let start = self.cache.start();
        format!("{}..{}", start, start + self.cache.glyphs().len())
    }
}
