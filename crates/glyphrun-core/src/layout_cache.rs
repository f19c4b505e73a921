//! Shaped glyphs for one run, rebuilt only when the run's text changes
//!
//! The cache is keyed by the text alone. Font and shaping parameters belong
//! to the painter and never change over its life, so a text match means the
//! shaped vector is still valid.

use std::ops::Range;
use std::sync::Arc;

use crate::{
    error::Result,
    traits::{FontRef, Shaper},
    types::{LineMetrics, PositionedGlyph, ShapingResult},
    ShapingParams,
};

/// A shaped glyph vector with one x position per character boundary
///
/// `positions[i]` is where character `i` starts; the trailing entry is where
/// the last character ends. Positions never decrease.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapedGlyphs {
    glyphs: Vec<PositionedGlyph>,
    glyph_chars: Vec<usize>,
    positions: Vec<f32>,
}

impl Default for ShapedGlyphs {
    fn default() -> Self {
        Self {
            glyphs: Vec::new(),
            glyph_chars: Vec::new(),
            positions: vec![0.0],
        }
    }
}

impl ShapedGlyphs {
    /// Map a shaping result for `text` onto character boundaries
    ///
    /// A character owns the x of the first glyph clustered on it. Characters
    /// with no glyph of their own (the tail of a ligature) split the glyph's
    /// advance evenly with the character that owns it, so every character
    /// of a ligature gets a caret stop of its own.
    pub fn from_shaping(text: &str, shaped: &ShapingResult) -> Self {
        let char_starts: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        let n = char_starts.len();

        let mut first_x: Vec<Option<f32>> = vec![None; n];
        let mut glyph_chars = Vec::with_capacity(shaped.glyphs.len());
        for glyph in &shaped.glyphs {
            let cluster = glyph.cluster as usize;
            let ci = char_starts
                .partition_point(|&b| b <= cluster)
                .saturating_sub(1)
                .min(n.saturating_sub(1));
            glyph_chars.push(ci);
            if let Some(slot) = first_x.get_mut(ci) {
                slot.get_or_insert(glyph.x);
            }
        }

        let mut stops = first_x;
        stops.push(Some(shaped.advance_width));

        let mut positions = vec![0.0f32; n + 1];
        positions[0] = stops[0].unwrap_or(0.0);
        let mut head = 0;
        for (i, stop) in stops.iter().enumerate().skip(1) {
            let Some(x) = *stop else {
                continue;
            };
            let from = positions[head];
            let x = x.max(from);
            let span = (i - head) as f32;
            for (step, slot) in positions[head + 1..i].iter_mut().enumerate() {
                *slot = from + (x - from) * (step + 1) as f32 / span;
            }
            positions[i] = x;
            head = i;
        }

        Self {
            glyphs: shaped.glyphs.clone(),
            glyph_chars,
            positions,
        }
    }

    /// Spread characters apart by `index * kerning`
    ///
    /// Only character starts move. The trailing boundary keeps the shaped
    /// advance unless the last start is pushed past it.
    pub fn apply_kerning(&mut self, kerning: f32) {
        let n = self.len();
        for (i, x) in self.positions[..n].iter_mut().enumerate().rev() {
            *x += i as f32 * kerning;
        }
        for (glyph, &ci) in self.glyphs.iter_mut().zip(&self.glyph_chars).rev() {
            glyph.x += ci as f32 * kerning;
        }

        // Positions stay non-decreasing whatever the kerning
        let mut floor = f32::MIN;
        for x in &mut self.positions {
            *x = x.max(floor);
            floor = *x;
        }
    }

    /// Number of characters covered
    pub fn len(&self) -> usize {
        self.positions.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Position of boundary `i`, clamped to the last boundary
    pub fn position(&self, i: usize) -> f32 {
        let last = self.positions.len() - 1;
        self.positions[i.min(last)]
    }

    /// Width of a character range, straight from the shaped positions
    pub fn advance(&self, range: Range<usize>) -> f32 {
        self.position(range.end) - self.position(range.start)
    }

    pub fn glyphs(&self) -> &[PositionedGlyph] {
        &self.glyphs
    }

    /// The glyphs of a character range, positioned relative to its start
    pub fn segment_glyphs(&self, range: Range<usize>) -> Vec<PositionedGlyph> {
        let origin = self.position(range.start);
        self.glyphs
            .iter()
            .zip(&self.glyph_chars)
            .filter(|(_, ci)| range.contains(ci))
            .map(|(glyph, _)| PositionedGlyph {
                x: glyph.x - origin,
                ..glyph.clone()
            })
            .collect()
    }
}

/// Everything the painter derives from shaping its run
#[derive(Debug, Clone, Default)]
pub struct GlyphLayoutCache {
    text: Option<String>,
    start: usize,
    glyphs: ShapedGlyphs,
    metrics: LineMetrics,
    space_advance: f32,
}

impl GlyphLayoutCache {
    /// An empty cache; the first sync always shapes
    pub fn new() -> Self {
        Self::default()
    }

    /// Text the current glyphs were shaped from
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Document offset the cached text started at when last synced
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn glyphs(&self) -> &ShapedGlyphs {
        &self.glyphs
    }

    pub fn metrics(&self) -> LineMetrics {
        self.metrics
    }

    /// Advance of a single shaped space
    pub fn space_advance(&self) -> f32 {
        self.space_advance
    }

    /// Reshape if `text` differs from the cached text
    ///
    /// Returns whether a reshape happened. On error the previous glyphs,
    /// metrics and text are left untouched.
    pub fn sync(
        &mut self,
        text: &str,
        start: usize,
        shaper: &dyn Shaper,
        font: &Arc<dyn FontRef>,
        params: &ShapingParams,
        kerning: Option<f32>,
    ) -> Result<bool> {
        if self.text.as_deref() == Some(text) {
            self.start = start;
            return Ok(false);
        }

        log::debug!(
            "{}: reshaping run at {} ({} chars)",
            shaper.name(),
            start,
            text.chars().count()
        );

        let shaped = shaper.shape(text, font.clone(), params)?;
        let metrics = shaper.line_metrics(text, font.clone(), params)?;
        let space = shaper.shape(" ", font.clone(), params)?;

        let mut glyphs = ShapedGlyphs::from_shaping(text, &shaped);
        if let Some(k) = kerning {
            glyphs.apply_kerning(k);
        }

        self.glyphs = glyphs;
        self.metrics = metrics;
        self.space_advance = ShapedGlyphs::from_shaping(" ", &space).advance(0..1);
        self.text = Some(text.to_owned());
        self.start = start;
        Ok(true)
    }
}
