//! Painter configuration
//!
//! Render hints are switched on for every paint by default. Either hint can
//! be turned off from the environment at startup:
//!
//! ```bash
//! GLYPHRUN_ANTIALIAS=0 GLYPHRUN_FRACTIONAL_METRICS=off ./my_app
//! ```

/// Environment variable controlling text antialiasing
pub const ENV_ANTIALIAS: &str = "GLYPHRUN_ANTIALIAS";

/// Environment variable controlling fractional glyph metrics
pub const ENV_FRACTIONAL_METRICS: &str = "GLYPHRUN_FRACTIONAL_METRICS";

/// Text rendering hints pushed to the surface before painting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderHints {
    pub antialias: bool,
    pub fractional_metrics: bool,
}

impl Default for RenderHints {
    fn default() -> Self {
        Self {
            antialias: true,
            fractional_metrics: true,
        }
    }
}

/// Settings shared by every painter a factory creates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PainterConfig {
    pub hints: RenderHints,
}

impl PainterConfig {
    /// Defaults, overridden by `GLYPHRUN_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults, overridden by whatever `lookup` returns for each variable
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(flag) = lookup(ENV_ANTIALIAS).and_then(|v| parse_flag(ENV_ANTIALIAS, &v)) {
            config.hints.antialias = flag;
        }
        if let Some(flag) =
            lookup(ENV_FRACTIONAL_METRICS).and_then(|v| parse_flag(ENV_FRACTIONAL_METRICS, &v))
        {
            config.hints.fractional_metrics = flag;
        }
        config
    }
}

fn parse_flag(key: &str, value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        other => {
            log::warn!("Ignoring {key}={other}: expected 1/0, true/false, yes/no or on/off");
            None
        },
    }
}
