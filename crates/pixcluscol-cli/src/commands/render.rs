use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use pixcluscol_core::io::image_io::save_rgb_image;
use tracing::info;

#[derive(Args)]
pub struct RenderArgs {
    /// Label grid (.npy or grayscale image)
    pub file: PathBuf,

    /// Saved annotation supplying colors and names
    #[arg(short, long)]
    pub annotation: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Render the highlight image of this zero-based cluster instead of the color image
    #[arg(long)]
    pub highlight: Option<usize>,

    /// Output file path
    #[arg(short, long, default_value = "clusters.png")]
    pub output: PathBuf,
}

pub fn run(args: &RenderArgs) -> Result<()> {
    let config = super::load_config(args.config.as_ref())?;
    let annotator = super::open_annotator(&args.file, args.annotation.as_ref(), config)?;

    let image = match args.highlight {
        Some(cluster) => annotator.highlight(cluster)?,
        None => annotator.color_image().view(),
    };
    save_rgb_image(image, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    info!(output = %args.output.display(), highlight = ?args.highlight, "Rendered");
    println!("Saved to {}", args.output.display());
    Ok(())
}
