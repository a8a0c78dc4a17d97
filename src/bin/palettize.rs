use anyhow::{Context, Result, bail};
use clap::Parser;
use core::num::NonZeroU32;
use image::RgbaImage;
use palettize::{
    ImageBuf, PaletteSize, Pipeline,
    color::{format_hex, parse_hex},
};
use std::path::PathBuf;

/// Extract a color palette from an image and recolor it with remapped entries.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Input image path
    input: PathBuf,

    /// Output image path (PNG)
    #[arg(short, long, default_value = "palettized.png")]
    output: PathBuf,

    /// Maximum number of palette entries
    #[arg(short = 'k', long, default_value_t = 6)]
    colors: u16,

    /// Sample every Nth pixel when extracting the palette
    #[arg(long, default_value_t = 20)]
    stride: u32,

    /// Clustering similarity threshold in RGB distance units
    #[arg(long, default_value_t = 100.0)]
    threshold: f32,

    /// Remap a palette color, e.g. `--map '#FF0000=#00FF00'` (repeatable)
    #[arg(short, long)]
    map: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let decoded = image::open(&args.input)
        .with_context(|| format!("failed to open {}", args.input.display()))?
        .into_rgba8();
    let image = ImageBuf::try_from(decoded)?;

    let stride = NonZeroU32::new(args.stride).context("stride must be nonzero")?;
    let size = PaletteSize::try_from_u16(args.colors)
        .with_context(|| format!("palette size must be in 1..=256, got {}", args.colors))?;
    let pipeline = Pipeline::new()
        .sample_stride(stride)
        .threshold(args.threshold)
        .palette_size(size);

    let mut palette = pipeline.build_palette(image.as_ref());
    for mapping in &args.map {
        let (from, to) = mapping
            .split_once('=')
            .with_context(|| format!("expected `#RRGGBB=#RRGGBB`, got `{mapping}`"))?;
        let from = parse_hex(from.trim())?;
        let to = parse_hex(to.trim())?;

        let Some(index) = palette.iter().position(|entry| entry.original() == from) else {
            bail!("{} is not a palette color", format_hex(from));
        };
        palette.set_modified(index, to)?;
    }

    for entry in &palette {
        println!("{} -> {}", format_hex(entry.original()), format_hex(entry.modified()));
    }

    let recolored = pipeline.recolor(image.as_ref(), &palette)?;
    RgbaImage::from(recolored)
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    println!("saved {}", args.output.display());

    Ok(())
}
