#![allow(dead_code)]

use std::cell::RefCell;
use std::sync::Arc;

use glyphrun_core::{
    attributes::AttributeSource,
    error::{GlyphRunError, Result},
    justification::JustificationData,
    traits::{FontRef, JustificationProvider, RunView, TabStopPolicy, TextSource},
    types::FontMetrics,
    AttributeKey, AttributeValue, PainterFactory, ShapingParams,
};
use glyphrun_shape_none::NoneShaper;

/// Every glyph is 600 units on a 1000 unit em: 6px at size 10
pub struct MonoFont;

impl FontRef for MonoFont {
    fn units_per_em(&self) -> u16 {
        1000
    }

    fn glyph_id(&self, ch: char) -> Option<u32> {
        Some(ch as u32)
    }

    fn advance_width(&self, _glyph_id: u32) -> f32 {
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

pub const GLYPH: f32 = 6.0;

pub fn factory() -> PainterFactory {
    factory_with_size(10.0)
}

pub fn factory_with_size(size: f32) -> PainterFactory {
    let params = ShapingParams {
        size,
        ..Default::default()
    };
    PainterFactory::new(Arc::new(NoneShaper::new()), Arc::new(MonoFont), params)
}

pub struct Tabs(pub f32);

impl TabStopPolicy for Tabs {
    fn next_tab_stop(&self, x: f32, _offset: usize) -> f32 {
        ((x / self.0).floor() + 1.0) * self.0
    }
}

pub struct Justify(pub JustificationData);

impl JustificationProvider for Justify {
    fn justification(&self) -> Option<JustificationData> {
        Some(self.0)
    }
}

/// A run of an in-memory document
pub struct TestRun {
    pub text: RefCell<String>,
    pub start: usize,
    pub parent_start: Option<usize>,
    pub tabs: Option<Tabs>,
    pub justify: Option<Justify>,
    pub attrs: Vec<(AttributeKey, AttributeValue)>,
}

impl TestRun {
    pub fn new(text: &str) -> Self {
        Self::at(text, 0)
    }

    pub fn at(text: &str, start: usize) -> Self {
        Self {
            text: RefCell::new(text.to_string()),
            start,
            parent_start: None,
            tabs: None,
            justify: None,
            attrs: Vec::new(),
        }
    }

    pub fn with_tabs(mut self, width: f32) -> Self {
        self.tabs = Some(Tabs(width));
        self
    }

    pub fn with_justification(mut self, data: JustificationData) -> Self {
        self.parent_start = Some(self.start);
        self.justify = Some(Justify(data));
        self
    }

    pub fn with_attr(mut self, key: AttributeKey, value: AttributeValue) -> Self {
        self.attrs.push((key, value));
        self
    }

    pub fn set_text(&self, text: &str) {
        *self.text.borrow_mut() = text.to_string();
    }
}

impl TextSource for TestRun {
    fn substring(&self, start: usize, len: usize) -> Result<String> {
        let end = self.end_offset();
        if start < self.start || start + len > end {
            return Err(GlyphRunError::out_of_range(start + len, self.start, end));
        }
        Ok(self.text.borrow().chars().skip(start - self.start).take(len).collect())
    }

    fn start_offset(&self) -> usize {
        self.start
    }

    fn end_offset(&self) -> usize {
        self.start + self.text.borrow().chars().count()
    }

    fn parent_start_offset(&self) -> Option<usize> {
        self.parent_start
    }
}

impl AttributeSource for TestRun {
    fn attribute(&self, key: AttributeKey) -> Option<AttributeValue> {
        self.attrs.iter().find(|(k, _)| *k == key).map(|(_, v)| v.clone())
    }
}

impl RunView for TestRun {
    fn attributes(&self) -> Option<&dyn AttributeSource> {
        Some(self)
    }

    fn tab_stops(&self) -> Option<&dyn TabStopPolicy> {
        self.tabs.as_ref().map(|t| t as &dyn TabStopPolicy)
    }

    fn justification(&self) -> Option<&dyn JustificationProvider> {
        self.justify.as_ref().map(|j| j as &dyn JustificationProvider)
    }
}
