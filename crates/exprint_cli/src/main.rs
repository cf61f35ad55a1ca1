//! exprint CLI
//!
//! Reads an expression and a font size, typesets the expression, and
//! writes a PNG.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use exprint_core::{Color, FixedPoint, RenderContext};
use exprint_expr::parse;
use exprint_layout::layout;
use exprint_paint::Pixmap;
use exprint_text::{FontFace, TextEngine};

#[derive(Parser)]
#[command(name = "exprint")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Typeset an algebraic expression as a PNG image", long_about = None)]
struct Cli {
    /// Expression text, e.g. "sin(x/pow(y,2))"
    expression: String,

    /// Output image path
    #[arg(short, long, default_value = "out.png")]
    out: PathBuf,

    /// Font size in points
    #[arg(short = 's', long, default_value_t = 36.0)]
    size: f64,

    /// Font file to use instead of the discovered system font
    #[arg(long)]
    font: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let face = match &cli.font {
        Some(path) => FontFace::from_file(path).context("loading font")?,
        None => FontFace::discover().context("discovering a system font")?,
    };
    let engine = TextEngine::new(face);
    let ctx = RenderContext::new(&engine, Color::BLACK);

    let expr = parse(&cli.expression)
        .with_context(|| format!("parsing {:?}", cli.expression))?;
    debug!(canonical = %expr, "parsed expression");

    let root = layout(&expr, &ctx, cli.size)?;
    let size = root.size();

    // Canvas twice the measured box in each dimension, with the baseline
    // anchor at half the width and 3/2 the height: the drawing sits
    // left-of-center, low in the frame.
    let width = (size.x.to_f64() * 2.0).ceil().max(1.0) as u32;
    let height = (size.y.to_f64() * 2.0).ceil().max(1.0) as u32;
    let anchor = FixedPoint::new(size.x.scale(1, 2), size.y.scale(3, 2));

    let mut pixmap = Pixmap::new(width, height);
    root.draw(&ctx, &mut pixmap, anchor);

    let image = image::RgbaImage::from_raw(width, height, pixmap.into_vec())
        .context("assembling image buffer")?;
    image
        .save(&cli.out)
        .with_context(|| format!("writing {}", cli.out.display()))?;
    info!(out = %cli.out.display(), width, height, "wrote image");
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .init();
}
