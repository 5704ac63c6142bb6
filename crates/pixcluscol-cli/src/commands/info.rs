use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use pixcluscol_core::labels::cluster_sizes;
use pixcluscol_core::AnnotatorConfig;

use crate::summary::print_cluster_summary;

#[derive(Args)]
pub struct InfoArgs {
    /// Label grid (.npy or grayscale image)
    pub file: PathBuf,

    /// Saved annotation to apply before reporting
    #[arg(short, long)]
    pub annotation: Option<PathBuf>,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let annotator = super::open_annotator(
        &args.file,
        args.annotation.as_ref(),
        AnnotatorConfig::default(),
    )?;
    let sizes = cluster_sizes(annotator.cluster_image(), annotator.num_labels());

    print_cluster_summary(&args.file, &annotator, &sizes);
    Ok(())
}
