//! None Shaper - Simple left-to-right horizontal advancement
//!
//! This is the most basic shaper that simply advances glyphs
//! horizontally without any complex shaping logic. One glyph per
//! character, no ligatures, no pair kerning.

use std::sync::Arc;

use glyphrun_core::{
    error::{Result, ShapingError},
    traits::{FontRef, Shaper},
    types::{LineMetrics, PositionedGlyph, ShapingResult},
    ShapingParams,
};

/// A minimal shaper that only does simple LTR advancement
pub struct NoneShaper;

impl NoneShaper {
    /// Create a new NoneShaper
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoneShaper {
    fn default() -> Self {
        Self::new()
    }
}

fn scale(font: &dyn FontRef, params: &ShapingParams) -> Result<f32> {
    match font.units_per_em() {
        0 => Err(ShapingError::InvalidFont("units_per_em is zero".into()).into()),
        upem => Ok(params.size / upem as f32),
    }
}

impl Shaper for NoneShaper {
    fn name(&self) -> &'static str {
        "none"
    }

    fn shape(
        &self,
        text: &str,
        font: Arc<dyn FontRef>,
        params: &ShapingParams,
    ) -> Result<ShapingResult> {
        log::debug!("NoneShaper: Shaping {} chars", text.chars().count());

        let scale = scale(font.as_ref(), params)?;
        let mut glyphs = Vec::new();
        let mut x_advance = 0.0;

        for (cluster, ch) in text.char_indices() {
            // .notdef when the font lacks the character
            let glyph_id = font.glyph_id(ch).unwrap_or(0);
            let advance = font.advance_width(glyph_id) * scale + params.letter_spacing;

            glyphs.push(PositionedGlyph {
                id: glyph_id,
                x: x_advance,
                y: 0.0,
                advance,
                cluster: cluster as u32,
            });

            x_advance += advance;
        }

        Ok(ShapingResult {
            glyphs,
            advance_width: x_advance,
        })
    }

    fn line_metrics(
        &self,
        _text: &str,
        font: Arc<dyn FontRef>,
        params: &ShapingParams,
    ) -> Result<LineMetrics> {
        let scale = scale(font.as_ref(), params)?;
        let metrics = font.metrics();
        Ok(LineMetrics::new(
            metrics.ascent * scale,
            metrics.descent * scale,
            metrics.line_gap * scale,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphrun_core::types::FontMetrics;
    use glyphrun_core::GlyphRunError;

    // Mock font for testing
    struct MockFont {
        upem: u16,
    }

    impl FontRef for MockFont {
        fn units_per_em(&self) -> u16 {
            self.upem
        }

        fn glyph_id(&self, ch: char) -> Option<u32> {
            // Simple mapping: ASCII characters to their values
            if ch.is_ascii() {
                Some(ch as u32)
            } else {
                None
            }
        }

        fn advance_width(&self, _glyph_id: u32) -> f32 {
            500.0 // Fixed advance for simplicity
        }

        fn metrics(&self) -> FontMetrics {
            FontMetrics {
                ascent: 800.0,
                descent: 200.0,
                line_gap: 100.0,
            }
        }
    }

    #[test]
    fn test_basic_shaping() {
        let shaper = NoneShaper::new();
        let font = Arc::new(MockFont { upem: 1000 });
        let params = ShapingParams {
            size: 16.0,
            ..Default::default()
        };

        let result = shaper.shape("Hello", font, &params).unwrap();

        assert_eq!(result.glyphs.len(), 5);
        assert_eq!(result.advance_width, 40.0);

        // Check that glyphs are positioned sequentially
        for i in 1..result.glyphs.len() {
            assert!(result.glyphs[i].x > result.glyphs[i - 1].x);
        }
    }

    #[test]
    fn test_clusters_are_byte_offsets() {
        let shaper = NoneShaper::new();
        let font = Arc::new(MockFont { upem: 1000 });
        let result = shaper.shape("aéb", font, &ShapingParams::default()).unwrap();
        let clusters: Vec<_> = result.glyphs.iter().map(|g| g.cluster).collect();
        assert_eq!(clusters, vec![0, 1, 3]);
        // Non-ASCII falls back to .notdef
        assert_eq!(result.glyphs[1].id, 0);
    }

    #[test]
    fn test_letter_spacing() {
        let shaper = NoneShaper::new();
        let font = Arc::new(MockFont { upem: 1000 });
        let params = ShapingParams {
            size: 10.0,
            letter_spacing: 1.0,
            ..Default::default()
        };
        let result = shaper.shape("ab", font, &params).unwrap();
        assert_eq!(result.advance_width, 12.0);
    }

    #[test]
    fn test_empty_text() {
        let shaper = NoneShaper::new();
        let font = Arc::new(MockFont { upem: 1000 });
        let params = ShapingParams::default();

        let result = shaper.shape("", font, &params).unwrap();

        assert_eq!(result.glyphs.len(), 0);
        assert_eq!(result.advance_width, 0.0);
    }

    #[test]
    fn test_line_metrics_scale_with_size() {
        let shaper = NoneShaper::new();
        let font = Arc::new(MockFont { upem: 1000 });
        let params = ShapingParams {
            size: 20.0,
            ..Default::default()
        };
        let metrics = shaper.line_metrics("x", font, &params).unwrap();
        assert_eq!(metrics.ascent, 16.0);
        assert_eq!(metrics.descent, 4.0);
        assert_eq!(metrics.height, 22.0);
    }

    #[test]
    fn test_zero_upem_is_rejected() {
        let shaper = NoneShaper::new();
        let font = Arc::new(MockFont { upem: 0 });
        let err = shaper.shape("a", font, &ShapingParams::default()).unwrap_err();
        assert!(matches!(err, GlyphRunError::Shaping(ShapingError::InvalidFont(_))));
    }
}
