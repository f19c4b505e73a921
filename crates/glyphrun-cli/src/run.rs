//! An in-memory run and a stub font to drive the painter from the shell

use glyphrun_core::{
    attributes::AttributeSource,
    error::{GlyphRunError, Result},
    justification::JustificationData,
    traits::{FontRef, JustificationProvider, RunView, TabStopPolicy, TextSource},
    types::{FontMetrics, GlyphId},
    AttributeKey, AttributeValue, ShapeTransform,
};

use crate::cli::{RunArgs, TransformArg};

/// Monospace font: every glyph is 600 units wide on a 1000 unit em
pub struct StubFont;

impl FontRef for StubFont {
    fn units_per_em(&self) -> u16 {
        1000
    }

    fn glyph_id(&self, ch: char) -> Option<GlyphId> {
        if ch.is_control() {
            None
        } else {
            Some(ch as GlyphId)
        }
    }

    fn advance_width(&self, _glyph_id: GlyphId) -> f32 {
        600.0
    }

    fn metrics(&self) -> FontMetrics {
        FontMetrics {
            ascent: 800.0,
            descent: 200.0,
            line_gap: 0.0,
        }
    }
}

/// Tab stops every `width` pixels
struct FixedTabs {
    width: f32,
}

impl TabStopPolicy for FixedTabs {
    fn next_tab_stop(&self, x: f32, _offset: usize) -> f32 {
        ((x / self.width).floor() + 1.0) * self.width
    }
}

/// Justification fixed at startup
struct FixedJustification(JustificationData);

impl JustificationProvider for FixedJustification {
    fn justification(&self) -> Option<JustificationData> {
        Some(self.0)
    }
}

/// The whole document is one run
pub struct TextRun {
    text: String,
    start: usize,
    tabs: Option<FixedTabs>,
    kerning: Option<f64>,
    transform: ShapeTransform,
    justification: Option<FixedJustification>,
}

impl TextRun {
    pub fn from_args(args: &RunArgs) -> Result<Self> {
        let len = args.text.chars().count();
        let tabs = match args.tab_width {
            Some(width) if width > 0.0 => Some(FixedTabs { width }),
            Some(width) => {
                return Err(GlyphRunError::Other(format!(
                    "Tab width must be positive, got {width}"
                )))
            },
            None => None,
        };
        let transform = match args.transform {
            TransformArg::None => ShapeTransform::Identity,
            TransformArg::OppositeItalic => ShapeTransform::OppositeItalic,
            TransformArg::Scale => ShapeTransform::VerticalScale(args.scale),
        };
        let justification = args
            .justify
            .as_deref()
            .map(|spec| parse_justification(spec, len))
            .transpose()?
            .map(FixedJustification);

        Ok(Self {
            text: args.text.clone(),
            start: args.run_start,
            tabs,
            kerning: args.kerning,
            transform,
            justification,
        })
    }
}

/// Parse `addon[,leftover_end,start,end]`
///
/// Omitted fields leave no leftover and make the whole run justifiable.
pub fn parse_justification(spec: &str, run_len: usize) -> Result<JustificationData> {
    let invalid =
        |what: &str| GlyphRunError::Other(format!("Invalid justification '{spec}': {what}"));

    let parts: Vec<&str> = spec.split(',').map(str::trim).collect();
    if parts.len() > 4 {
        return Err(invalid("expected at most 4 fields"));
    }
    let field = |i: usize, default: isize| -> Result<isize> {
        match parts.get(i) {
            Some(&s) => s.parse().map_err(|_| invalid(s)),
            None => Ok(default),
        }
    };

    let space_addon = parts[0].parse().map_err(|_| invalid(parts[0]))?;
    Ok(JustificationData {
        space_addon,
        leftover_end: field(1, -1)?,
        start: field(2, 0)?,
        end: field(3, run_len as isize - 1)?,
    })
}

impl TextSource for TextRun {
    fn substring(&self, start: usize, len: usize) -> Result<String> {
        let end = self.end_offset();
        if start < self.start || start + len > end {
            return Err(GlyphRunError::out_of_range(start + len, self.start, end));
        }
        Ok(self.text.chars().skip(start - self.start).take(len).collect())
    }

    fn start_offset(&self) -> usize {
        self.start
    }

    fn end_offset(&self) -> usize {
        self.start + self.text.chars().count()
    }

    fn parent_start_offset(&self) -> Option<usize> {
        Some(self.start)
    }
}

impl AttributeSource for TextRun {
    fn attribute(&self, key: AttributeKey) -> Option<AttributeValue> {
        match key {
            AttributeKey::Kerning => self.kerning.map(AttributeValue::Float),
            AttributeKey::OppositeItalic => (self.transform == ShapeTransform::OppositeItalic)
                .then_some(AttributeValue::Transform(self.transform)),
            AttributeKey::ScaleTransform => match self.transform {
                ShapeTransform::VerticalScale(_) => Some(AttributeValue::Transform(self.transform)),
                _ => None,
            },
        }
    }
}

impl RunView for TextRun {
    fn attributes(&self) -> Option<&dyn AttributeSource> {
        Some(self)
    }

    fn tab_stops(&self) -> Option<&dyn TabStopPolicy> {
        self.tabs.as_ref().map(|t| t as &dyn TabStopPolicy)
    }

    fn justification(&self) -> Option<&dyn JustificationProvider> {
        self.justification.as_ref().map(|j| j as &dyn JustificationProvider)
    }
}
