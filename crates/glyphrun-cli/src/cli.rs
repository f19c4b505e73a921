//! CLI argument definitions using Clap v4

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Glyphrun - Measure, hit-test and paint a single glyph run
#[derive(Parser, Debug)]
#[command(name = "glyphrun")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Width of a span of the run
    #[command(alias = "m")]
    Measure(MeasureArgs),

    /// Caret box of an offset
    #[command(alias = "l")]
    Locate(LocateArgs),

    /// Offset under an x coordinate
    #[command(alias = "h")]
    Hit(HitArgs),

    /// Where a line should break to fit a width
    #[command(alias = "b")]
    Break(BreakArgs),

    /// Paint a span and print the draw log as JSON
    #[command(alias = "p")]
    Paint(PaintArgs),
}

/// Shape transform applied to the run
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TransformArg {
    None,
    OppositeItalic,
    Scale,
}

/// Options describing the run itself
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Text of the run
    pub text: String,

    /// Font size in pixels
    #[arg(short = 's', long = "font-size", default_value = "16")]
    pub font_size: f32,

    /// Document offset the run starts at
    #[arg(long = "run-start", default_value = "0")]
    pub run_start: usize,

    /// Tab stop interval in pixels (tabs advance one space when omitted)
    #[arg(long = "tab-width")]
    pub tab_width: Option<f32>,

    /// Extra spacing per character index
    #[arg(short = 'k', long = "kerning")]
    pub kerning: Option<f64>,

    /// Shape transform to draw the run with
    #[arg(long = "transform", value_enum, default_value = "none")]
    pub transform: TransformArg,

    /// Vertical scale factor for `--transform scale`
    #[arg(long = "scale", default_value = "1.0")]
    pub scale: f64,

    /// Justification as addon[,leftover_end,start,end] relative to the run
    #[arg(short = 'j', long = "justify")]
    pub justify: Option<String>,
}

#[derive(Args, Debug)]
pub struct MeasureArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// First offset of the span (defaults to the run start)
    #[arg(long)]
    pub from: Option<usize>,

    /// Offset after the span (defaults to the run end)
    #[arg(long)]
    pub to: Option<usize>,

    /// Cursor x the span starts at
    #[arg(short = 'x', long = "cursor", default_value = "0")]
    pub x: f32,
}

#[derive(Args, Debug)]
pub struct LocateArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// Document offset to locate
    #[arg(short = 'o', long)]
    pub offset: usize,
}

#[derive(Args, Debug)]
pub struct HitArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// X coordinate to hit-test
    #[arg(short = 'x', long = "at", allow_negative_numbers = true)]
    pub x: f32,
}

#[derive(Args, Debug)]
pub struct BreakArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// Offset the line starts at (defaults to the run start)
    #[arg(long)]
    pub from: Option<usize>,

    /// Cursor x the line starts at
    #[arg(short = 'x', long = "cursor", default_value = "0")]
    pub x: f32,

    /// Advance available to the line
    #[arg(short = 'w', long)]
    pub width: f32,
}

#[derive(Args, Debug)]
pub struct PaintArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// First offset to paint (defaults to the run start)
    #[arg(long)]
    pub from: Option<usize>,

    /// Offset after the painted span (defaults to the run end)
    #[arg(long)]
    pub to: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_paint_with_transform() {
        let cli = Cli::try_parse_from([
            "glyphrun",
            "paint",
            "hello",
            "--transform",
            "opposite-italic",
            "--from",
            "1",
        ])
        .unwrap();
        let Commands::Paint(args) = cli.command else {
            panic!("expected paint");
        };
        assert_eq!(args.run.text, "hello");
        assert_eq!(args.run.transform, TransformArg::OppositeItalic);
        assert_eq!(args.from, Some(1));
        assert_eq!(args.to, None);
    }

    #[test]
    fn test_break_requires_width() {
        assert!(Cli::try_parse_from(["glyphrun", "break", "hello"]).is_err());
    }
}
