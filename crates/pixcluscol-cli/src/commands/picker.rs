use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use ndarray::Array3;
use pixcluscol_core::io::image_io::save_rgb_image;
use pixcluscol_core::picker::build_picker;

#[derive(Args)]
pub struct PickerArgs {
    /// TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output file path
    #[arg(short, long, default_value = "picker.png")]
    pub output: PathBuf,
}

pub fn run(args: &PickerArgs) -> Result<()> {
    let config = super::load_config(args.config.as_ref())?;
    let picker = build_picker(&config.picker);

    save_rgb_image(picker.view(), &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!("{}", saved_message(&picker, &args.output));
    Ok(())
}

/// Reports the dimensions actually rendered, which may differ from the
/// configured size after clamping.
fn saved_message(picker: &Array3<u8>, output: &Path) -> String {
    let (h, w, _) = picker.dim();
    format!("Saved {w}x{h} picker to {}", output.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixcluscol_core::config::PickerConfig;

    #[test]
    fn zero_size_reports_rendered_dimensions() {
        let config = PickerConfig {
            size: 0,
            ..PickerConfig::default()
        };
        let picker = build_picker(&config);
        assert_eq!(
            saved_message(&picker, Path::new("p.png")),
            "Saved 1x1 picker to p.png"
        );
    }
}
