//! Justification spacing, remapped into run-local offsets

use crate::traits::JustificationProvider;

/// Justification as the parent layout reports it
///
/// Offsets are relative to the parent's start offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JustificationData {
    /// Extra advance for every justified space
    pub space_addon: i32,
    /// Last offset whose space gets one more unit of rounding remainder
    pub leftover_end: isize,
    pub start: isize,
    pub end: isize,
}

/// How spaces of one run are stretched during a single scan
///
/// All offsets are run-local character indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JustificationSpec {
    pub space_addon: i32,
    pub leftover_end: isize,
    pub justifiable_start: isize,
    pub justifiable_end: isize,
}

impl Default for JustificationSpec {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl JustificationSpec {
    /// No justification: spaces keep their shaped width
    pub const NEUTRAL: Self = Self {
        space_addon: 0,
        leftover_end: -1,
        justifiable_start: 0,
        justifiable_end: 0,
    };

    /// Whether a space at run-local index `i` receives the addon
    pub fn stretches(&self, i: usize) -> bool {
        let i = i as isize;
        (self.space_addon != 0 || i <= self.leftover_end)
            && self.justifiable_start <= i
            && i <= self.justifiable_end
    }

    /// Extra advance for a stretched space at run-local index `i`
    pub fn extra(&self, i: usize) -> f32 {
        let leftover = if (i as isize) <= self.leftover_end { 1 } else { 0 };
        (self.space_addon + leftover) as f32
    }
}

/// Turns the parent's justification into a spec for one run
pub struct JustificationResolver;

impl JustificationResolver {
    /// Resolve for a run starting at document offset `run_start`
    ///
    /// The result is only valid for the call it was resolved for: siblings of
    /// the same paragraph may be justified differently, and the parent may
    /// change its mind between calls.
    pub fn resolve(
        provider: Option<&dyn JustificationProvider>,
        run_start: usize,
        parent_start: Option<usize>,
        run_len: usize,
    ) -> JustificationSpec {
        let Some(data) = provider.and_then(|p| p.justification()) else {
            return JustificationSpec::NEUTRAL;
        };

        let offset = parent_start.unwrap_or(0) as isize - run_start as isize;
        let justifiable_start = data.start + offset;
        let justifiable_end = (data.end + offset).min(run_len as isize);
        // Nothing in this run is justifiable
        if justifiable_start > justifiable_end {
            return JustificationSpec::NEUTRAL;
        }

        JustificationSpec {
            space_addon: data.space_addon,
            leftover_end: data.leftover_end + offset,
            justifiable_start,
            justifiable_end,
        }
    }
}
