//! JSON Surface - When you need to see what the painter really did
//!
//! A render surface that draws nothing and remembers everything: every
//! glyph draw with the transform and clip in force at the time, plus the
//! hints the painter switched on. The log serializes to JSON for
//! debugging and for comparing paint output in tests.

use kurbo::{Affine, Rect};
use serde::{Deserialize, Serialize};

use glyphrun_core::{
    error::{GlyphRunError, Result},
    traits::RenderSurface,
    types::PositionedGlyph,
    RenderHints,
};

/// Schema version for JSON output format
pub const JSON_SCHEMA_VERSION: &str = "1.0";

/// One glyph of a draw call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphRecord {
    pub g: u32,  // Glyph identifier in the font
    pub cl: u32, // Cluster mapping back to the run text
    pub x: f32,  // Offset from the draw origin
    pub ax: f32, // Horizontal advance
}

/// A single `draw_glyphs` call as the surface saw it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawOp {
    pub glyphs: Vec<GlyphRecord>,
    pub x: f32,
    pub y: f32,
    /// Affine coefficients `[a, b, c, d, e, f]`
    pub transform: [f64; 6],
    /// `[x0, y0, x1, y1]`, absent when unclipped
    pub clip: Option<[f64; 4]>,
}

impl DrawOp {
    pub fn glyph_ids(&self) -> Vec<u32> {
        self.glyphs.iter().map(|g| g.g).collect()
    }

    pub fn affine(&self) -> Affine {
        Affine::new(self.transform)
    }

    pub fn clip_rect(&self) -> Option<Rect> {
        self.clip.map(|[x0, y0, x1, y1]| Rect::new(x0, y0, x1, y1))
    }
}

/// Hints as last set on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintRecord {
    pub antialias: bool,
    pub fractional_metrics: bool,
}

impl From<RenderHints> for HintRecord {
    fn from(hints: RenderHints) -> Self {
        Self {
            antialias: hints.antialias,
            fractional_metrics: hints.fractional_metrics,
        }
    }
}

/// Complete draw log in a debug-friendly format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Schema version for forward compatibility
    pub schema_version: String,
    pub hints: Option<HintRecord>,
    pub draws: Vec<DrawOp>,
}

/// The surface that turns paint calls into structured data
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    transform: Affine,
    clip: Option<Rect>,
    hints: Option<HintRecord>,
    draws: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing transform and clip, as a host surface would
    pub fn with_state(transform: Affine, clip: Option<Rect>) -> Self {
        Self {
            transform,
            clip,
            ..Self::default()
        }
    }

    pub fn draws(&self) -> &[DrawOp] {
        &self.draws
    }

    pub fn hints(&self) -> Option<HintRecord> {
        self.hints
    }

    /// Forget recorded draws, keeping transform, clip and hints
    pub fn clear(&mut self) {
        self.draws.clear();
    }

    pub fn output(&self) -> JsonOutput {
        JsonOutput {
            schema_version: JSON_SCHEMA_VERSION.to_string(),
            hints: self.hints,
            draws: self.draws.clone(),
        }
    }

    /// Pretty-printed JSON of the draw log
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.output())
            .map_err(|e| GlyphRunError::Other(format!("JSON serialization failed: {}", e)))
    }
}

impl RenderSurface for RecordingSurface {
    fn transform(&self) -> Affine {
        self.transform
    }

    fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    fn draw_glyphs(&mut self, glyphs: &[PositionedGlyph], x: f32, y: f32) {
        log::trace!("RecordingSurface: {} glyphs at ({}, {})", glyphs.len(), x, y);

        self.draws.push(DrawOp {
            glyphs: glyphs
                .iter()
                .map(|g| GlyphRecord {
                    g: g.id,
                    cl: g.cluster,
                    x: g.x,
                    ax: g.advance,
                })
                .collect(),
            x,
            y,
            transform: self.transform.as_coeffs(),
            clip: self.clip.map(|r| [r.x0, r.y0, r.x1, r.y1]),
        });
    }

    fn clip(&self) -> Option<Rect> {
        self.clip
    }

    fn set_clip(&mut self, clip: Option<Rect>) {
        self.clip = clip;
    }

    fn set_render_hints(&mut self, hints: RenderHints) {
        self.hints = Some(hints.into());
    }
}
