use std::rc::Rc;

use anyhow::{ensure, Context as _, Result};
use clap::Parser;

use gui_raster::cli::Cli;
use gui_raster::core::{BitmapFont, Context, Image};
use gui_raster::demo::demo_frame;
use gui_raster::math::Color;
use gui_raster::traits::Font;
use gui_raster::{Interpreter, InterpreterConfig};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    ensure!(
        cli.width > 0 && cli.height > 0,
        "surface must be at least 1x1, got {}x{}",
        cli.width,
        cli.height
    );

    let config = match &cli.config {
        Some(path) => InterpreterConfig::load(path)?,
        None => InterpreterConfig::default(),
    };
    log::info!("interpreter config: {config:?}");

    let font: Rc<dyn Font> = Rc::new(BitmapFont::new());
    let mut context = Context::new(&font).context("failed to create GUI context")?;
    let mut surface = Image::new_color(cli.width, cli.height, Color::RAYWHITE);

    demo_frame(&mut context, cli.width as f32, cli.height as f32);
    Interpreter::new(config).render(&mut surface, &mut context);
    context.destroy();

    surface.save_png(&cli.output)?;
    println!("Wrote {}", cli.output.display());

    Ok(())
}
