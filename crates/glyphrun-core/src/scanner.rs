//! The one walk every run operation shares
//!
//! A scan moves left to right over a character range of the run. Ordinary
//! characters pile up into a pending segment; tabs, stretched spaces and
//! line breaks close ("flush") it. Each flushed segment and each spacing
//! step is reported to a [`ScanSink`], which decides what the walk means:
//! a width, a draw, a hit or a break.
//!
//! Widths always come from the shaped positions. Characters are never
//! measured one by one.

use std::ops::{ControlFlow, Range};

use crate::{
    justification::JustificationSpec, layout_cache::ShapedGlyphs, traits::TabStopPolicy,
};

/// How the scanner treats a character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Tab,
    JustifiedSpace,
    LineBreak,
    Ordinary,
}

/// Non-glyph advance produced by the scanner itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpacingKind {
    Tab,
    JustifiedSpace,
}

/// A flushed run of ordinary characters
#[derive(Debug, Clone, Copy)]
pub struct Segment<'a> {
    /// Run-local index of the first character
    pub start: usize,
    /// Run-local index one past the last character
    pub end: usize,
    /// Cursor x where the segment begins
    pub x: f32,
    positions: &'a [f32],
}

impl Segment<'_> {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Width of the segment from the shaped positions
    pub fn advance(&self) -> f32 {
        self.positions[self.end] - self.positions[self.start]
    }

    /// Each character as `(index, left x, right x)` in cursor space
    pub fn edges(&self) -> impl Iterator<Item = (usize, f32, f32)> + '_ {
        let origin = self.positions[self.start];
        (self.start..self.end).map(move |i| {
            (
                i,
                self.x + self.positions[i] - origin,
                self.x + self.positions[i + 1] - origin,
            )
        })
    }
}

/// A tab or stretched space, spanning `x..next_x`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacing {
    pub index: usize,
    pub kind: SpacingKind,
    pub x: f32,
    pub next_x: f32,
}

/// What a scan is for
///
/// Returning `ControlFlow::Break` stops the scan early.
pub trait ScanSink {
    fn segment(&mut self, segment: &Segment<'_>) -> ControlFlow<()>;

    fn spacing(&mut self, _spacing: &Spacing) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Where a scan ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanEnd {
    /// Cursor x when the scan ended
    pub x: f32,
    /// Whether the sink stopped the scan
    pub stopped: bool,
}

/// Walks a shaped run on behalf of a sink
pub struct RunScanner<'a> {
    text: &'a str,
    glyphs: &'a ShapedGlyphs,
    space_advance: f32,
    run_start: usize,
    tab_stops: Option<&'a dyn TabStopPolicy>,
    justification: JustificationSpec,
}

impl<'a> RunScanner<'a> {
    /// A scanner over `text`, which starts at document offset `run_start`
    pub fn new(
        text: &'a str,
        glyphs: &'a ShapedGlyphs,
        space_advance: f32,
        run_start: usize,
    ) -> Self {
        Self {
            text,
            glyphs,
            space_advance,
            run_start,
            tab_stops: None,
            justification: JustificationSpec::NEUTRAL,
        }
    }

    pub fn with_tab_stops(mut self, tab_stops: Option<&'a dyn TabStopPolicy>) -> Self {
        self.tab_stops = tab_stops;
        self
    }

    pub fn with_justification(mut self, justification: JustificationSpec) -> Self {
        self.justification = justification;
        self
    }

    /// Number of characters the scanner can walk
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Classify character `ch` at run-local index `i`
    pub fn classify(&self, i: usize, ch: char) -> CharClass {
        match ch {
            '\t' => CharClass::Tab,
            ' ' if self.justification.stretches(i) => CharClass::JustifiedSpace,
            '\n' | '\r' => CharClass::LineBreak,
            _ => CharClass::Ordinary,
        }
    }

    /// Walk `range` (run-local, clamped to the run) starting at cursor `x0`
    pub fn scan<S>(&self, range: Range<usize>, x0: f32, sink: &mut S) -> ScanEnd
    where
        S: ScanSink + ?Sized,
    {
        let end = range.end.min(self.len());
        let start = range.start.min(end);

        match self.walk(start..end, x0, sink) {
            ControlFlow::Continue(x) => ScanEnd { x, stopped: false },
            ControlFlow::Break(x) => ScanEnd { x, stopped: true },
        }
    }

    fn walk<S>(&self, range: Range<usize>, x0: f32, sink: &mut S) -> ControlFlow<f32, f32>
    where
        S: ScanSink + ?Sized,
    {
        let mut x = x0;
        let mut flush_start = range.start;

        let chars = self.text.chars().enumerate().skip(range.start).take(range.len());
        for (i, ch) in chars {
            let class = self.classify(i, ch);
            if class == CharClass::Ordinary {
                continue;
            }

            x = self.flush(flush_start..i, x, sink)?;
            flush_start = i + 1;

            let (kind, next_x) = match class {
                CharClass::Tab => (SpacingKind::Tab, self.tab_stop(x, i)),
                CharClass::JustifiedSpace => (
                    SpacingKind::JustifiedSpace,
                    x + self.space_advance + self.justification.extra(i),
                ),
                // Line breaks take no width in a single-line run
                CharClass::LineBreak | CharClass::Ordinary => continue,
            };

            let spacing = Spacing {
                index: i,
                kind,
                x,
                next_x,
            };
            if sink.spacing(&spacing).is_break() {
                return ControlFlow::Break(x);
            }
            x = next_x;
        }

        self.flush(flush_start..range.end, x, sink)
    }

    fn flush<S>(&self, range: Range<usize>, x: f32, sink: &mut S) -> ControlFlow<f32, f32>
    where
        S: ScanSink + ?Sized,
    {
        if range.is_empty() {
            return ControlFlow::Continue(x);
        }
        let segment = Segment {
            start: range.start,
            end: range.end,
            x,
            positions: self.glyphs.positions(),
        };
        if sink.segment(&segment).is_break() {
            return ControlFlow::Break(x);
        }
        ControlFlow::Continue(x + segment.advance())
    }

    fn tab_stop(&self, x: f32, i: usize) -> f32 {
        match self.tab_stops {
            Some(policy) => {
                let stop = policy.next_tab_stop(x, self.run_start + i);
                if stop < x {
                    let offset = self.run_start + i;
                    log::debug!("Tab stop {stop} behind cursor {x} at offset {offset}");
                }
                stop.max(x)
            },
            None => x + self.space_advance,
        }
    }
}

/// Sink that adds up the width of everything scanned
#[derive(Debug, Clone, Copy, Default)]
pub struct Measure {
    pub width: f32,
}

impl ScanSink for Measure {
    fn segment(&mut self, segment: &Segment<'_>) -> ControlFlow<()> {
        self.width += segment.advance();
        ControlFlow::Continue(())
    }

    fn spacing(&mut self, spacing: &Spacing) -> ControlFlow<()> {
        self.width += spacing.next_x - spacing.x;
        ControlFlow::Continue(())
    }
}
