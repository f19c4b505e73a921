//! Point to offset search, and the line-break search built on it

use std::ops::{ControlFlow, Range};

use crate::scanner::{RunScanner, ScanSink, Segment, Spacing};

/// Sink that stops at the character under a target x
///
/// A character spanning `[left, right)` is hit when `left <= target < right`.
/// With rounding on, a target in the right half of the character resolves to
/// the boundary after it.
#[derive(Debug, Clone, Copy)]
pub struct HitTester {
    target: f32,
    round: bool,
    hit: Option<usize>,
}

impl HitTester {
    pub fn new(target: f32, round: bool) -> Self {
        Self {
            target,
            round,
            hit: None,
        }
    }

    /// Run-local offset that was hit, if any
    pub fn hit(&self) -> Option<usize> {
        self.hit
    }

    fn test(&mut self, i: usize, left: f32, right: f32) -> ControlFlow<()> {
        if self.target < left || self.target >= right {
            return ControlFlow::Continue(());
        }
        let nearer_left = self.target - left < right - self.target;
        self.hit = Some(if !self.round || nearer_left { i } else { i + 1 });
        ControlFlow::Break(())
    }
}

impl ScanSink for HitTester {
    fn segment(&mut self, segment: &Segment<'_>) -> ControlFlow<()> {
        for (i, left, right) in segment.edges() {
            self.test(i, left, right)?;
        }
        ControlFlow::Continue(())
    }

    fn spacing(&mut self, spacing: &Spacing) -> ControlFlow<()> {
        self.test(spacing.index, spacing.x, spacing.next_x)
    }
}

/// Sink that finds how far a run can go within an advance budget
///
/// The answer is the character the budget ends in, without rounding. No
/// attempt is made to back up to whitespace.
#[derive(Debug, Clone, Copy)]
pub struct BreakSearcher {
    inner: HitTester,
}

impl BreakSearcher {
    /// Search for the break `budget` past the cursor `x`
    pub fn new(x: f32, budget: f32) -> Self {
        Self {
            inner: HitTester::new(x + budget, false),
        }
    }

    pub fn offset(&self) -> Option<usize> {
        self.inner.hit()
    }
}

impl ScanSink for BreakSearcher {
    fn segment(&mut self, segment: &Segment<'_>) -> ControlFlow<()> {
        self.inner.segment(segment)
    }

    fn spacing(&mut self, spacing: &Spacing) -> ControlFlow<()> {
        self.inner.spacing(spacing)
    }
}

/// Run-local offset under `target` when `range` is laid out from `x0`
///
/// A target at or left of `x0` lands on `range.start`; one past the end
/// lands on `range.end`.
pub fn offset_at(
    scanner: &RunScanner<'_>,
    range: Range<usize>,
    x0: f32,
    target: f32,
    round: bool,
) -> usize {
    let end = range.end.min(scanner.len());
    if x0 >= target {
        return range.start.min(end);
    }
    let mut sink = HitTester::new(target, round);
    scanner.scan(range, x0, &mut sink);
    sink.hit().unwrap_or(end)
}

/// Run-local break offset for a line starting at `from` with cursor `x`
pub fn break_offset(scanner: &RunScanner<'_>, from: usize, x: f32, budget: f32) -> usize {
    let end = scanner.len();
    let from = from.min(end);
    if budget <= 0.0 {
        return from;
    }
    let mut sink = BreakSearcher::new(x, budget);
    scanner.scan(from..end, x, &mut sink);
    sink.offset().unwrap_or(end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout_cache::ShapedGlyphs;
    use crate::types::{PositionedGlyph, ShapingResult};

    fn shaped(text: &str, width: f32) -> ShapedGlyphs {
        let glyphs: Vec<_> = text
            .char_indices()
            .enumerate()
            .map(|(i, (b, _))| PositionedGlyph {
                id: 1,
                x: width * i as f32,
                y: 0.0,
                advance: width,
                cluster: b as u32,
            })
            .collect();
        let result = ShapingResult {
            advance_width: width * glyphs.len() as f32,
            glyphs,
        };
        ShapedGlyphs::from_shaping(text, &result)
    }

    #[test]
    fn test_rounding_picks_nearer_edge() {
        let text = "abcd";
        let glyphs = shaped(text, 10.0);
        let scanner = RunScanner::new(text, &glyphs, 10.0, 0);
        assert_eq!(offset_at(&scanner, 0..4, 0.0, 12.0, true), 1);
        assert_eq!(offset_at(&scanner, 0..4, 0.0, 17.0, true), 2);
        assert_eq!(offset_at(&scanner, 0..4, 0.0, 17.0, false), 1);
    }

    #[test]
    fn test_target_left_of_origin() {
        let text = "abcd";
        let glyphs = shaped(text, 10.0);
        let scanner = RunScanner::new(text, &glyphs, 10.0, 0);
        assert_eq!(offset_at(&scanner, 0..4, 50.0, 20.0, true), 0);
        assert_eq!(offset_at(&scanner, 0..4, 50.0, 50.0, true), 0);
    }

    #[test]
    fn test_target_past_end() {
        let text = "abcd";
        let glyphs = shaped(text, 10.0);
        let scanner = RunScanner::new(text, &glyphs, 10.0, 0);
        assert_eq!(offset_at(&scanner, 0..4, 0.0, 400.0, true), 4);
    }

    #[test]
    fn test_ligature_carets_hit_back() {
        // "afix" with "fi" shaped as one glyph on cluster 1
        let text = "afix";
        let result = ShapingResult {
            glyphs: [(0, 0.0, 4.0), (1, 4.0, 6.0), (3, 10.0, 4.0)]
                .into_iter()
                .map(|(cluster, x, advance)| PositionedGlyph {
                    id: 1,
                    x,
                    y: 0.0,
                    advance,
                    cluster,
                })
                .collect(),
            advance_width: 14.0,
        };
        let glyphs = ShapedGlyphs::from_shaping(text, &result);
        let scanner = RunScanner::new(text, &glyphs, 4.0, 0);
        for k in 0..4 {
            let caret = glyphs.positions()[k];
            assert_eq!(offset_at(&scanner, 0..4, 0.0, caret, true), k, "caret {k}");
        }
    }

    #[test]
    fn test_hit_inside_tab() {
        struct Eight;
        impl crate::traits::TabStopPolicy for Eight {
            fn next_tab_stop(&self, x: f32, _offset: usize) -> f32 {
                ((x / 80.0).floor() + 1.0) * 80.0
            }
        }

        let text = "a\tb";
        let glyphs = shaped(text, 10.0);
        let scanner = RunScanner::new(text, &glyphs, 10.0, 0).with_tab_stops(Some(&Eight));
        // Tab spans 10..80
        assert_eq!(offset_at(&scanner, 0..3, 0.0, 30.0, true), 1);
        assert_eq!(offset_at(&scanner, 0..3, 0.0, 60.0, true), 2);
        assert_eq!(offset_at(&scanner, 0..3, 0.0, 85.0, false), 2);
    }

    #[test]
    fn test_break_is_nearest_character_not_whitespace() {
        let text = "hello world";
        let glyphs = shaped(text, 1.0);
        let scanner = RunScanner::new(text, &glyphs, 1.0, 0);
        assert_eq!(break_offset(&scanner, 0, 0.0, 7.5), 7);
        assert_eq!(break_offset(&scanner, 3, 0.0, 2.0), 5);
    }

    #[test]
    fn test_break_budget_bounds() {
        let text = "abc";
        let glyphs = shaped(text, 1.0);
        let scanner = RunScanner::new(text, &glyphs, 1.0, 0);
        assert_eq!(break_offset(&scanner, 1, 0.0, 0.0), 1);
        assert_eq!(break_offset(&scanner, 1, 0.0, 100.0), 3);
    }
}
