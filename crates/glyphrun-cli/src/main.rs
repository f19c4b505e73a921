//! Glyphrun CLI - Drive a glyph run painter from the command line
//!
//! The run is shaped with the fixed-advance shaper over a monospace stub
//! font, so every answer can be checked by hand.

mod cli;
mod run;

use std::sync::Arc;

use clap::Parser;
use kurbo::Rect;

use glyphrun_core::{
    error::{GlyphRunError, Result},
    PainterConfig, PainterFactory, RunPainter, ShapingParams, TextSource,
};
use glyphrun_render_json::RecordingSurface;
use glyphrun_shape_none::NoneShaper;

use cli::{Cli, Commands, RunArgs};
use run::{StubFont, TextRun};

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(err) = dispatch(cli.command) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Measure(args) => {
            let (run, mut painter) = setup(&args.run)?;
            let from = args.from.unwrap_or(run.start_offset());
            let to = args.to.unwrap_or(run.end_offset());
            let width = painter.measure(&run, from, to, args.x);
            println!("{}", width);
        },
        Commands::Locate(args) => {
            let (run, mut painter) = setup(&args.run)?;
            let alloc = allocation(&run, &mut painter);
            let caret = painter.offset_to_point(&run, args.offset, alloc)?;
            println!("x={} y={} height={}", caret.x0, caret.y0, caret.height());
        },
        Commands::Hit(args) => {
            let (run, mut painter) = setup(&args.run)?;
            let alloc = allocation(&run, &mut painter);
            let offset = painter
                .point_to_offset(&run, args.x, alloc.y0 as f32, alloc)
                .ok_or_else(|| GlyphRunError::Other("run is not covered by its painter".into()))?;
            println!("{}", offset);
        },
        Commands::Break(args) => {
            let (run, mut painter) = setup(&args.run)?;
            let from = args.from.unwrap_or(run.start_offset());
            let offset = painter
                .find_break_offset(&run, from, args.x, args.width)
                .ok_or_else(|| {
                    GlyphRunError::out_of_range(from, run.start_offset(), run.end_offset())
                })?;
            println!("{}", offset);
        },
        Commands::Paint(args) => {
            let (run, mut painter) = setup(&args.run)?;
            let from = args.from.unwrap_or(run.start_offset());
            let to = args.to.unwrap_or(run.end_offset());
            let alloc = allocation(&run, &mut painter);

            let mut surface = RecordingSurface::new();
            painter.paint(&run, &mut surface, alloc, from, to);
            log::info!("Painted {}..{} in {} draw calls", from, to, surface.draws().len());
            println!("{}", surface.to_json()?);
        },
    }
    Ok(())
}

fn setup(args: &RunArgs) -> Result<(TextRun, RunPainter)> {
    let run = TextRun::from_args(args)?;
    let params = ShapingParams {
        size: args.font_size,
        ..Default::default()
    };
    let factory = PainterFactory::new(Arc::new(NoneShaper::new()), Arc::new(StubFont), params)
        .with_config(PainterConfig::from_env());
    let painter = factory.painter(&run)?;
    log::debug!(
        "Shaped {}..{} with {:?}",
        run.start_offset(),
        run.end_offset(),
        painter.shape_transform()
    );
    Ok((run, painter))
}

/// The run's natural box at the origin
fn allocation(run: &TextRun, painter: &mut RunPainter) -> Rect {
    let width = painter.measure(run, run.start_offset(), run.end_offset(), 0.0);
    let height = painter.height(run);
    Rect::new(0.0, 0.0, width as f64, height as f64)
}
