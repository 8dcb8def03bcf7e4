use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use cardlens_core::diff::DiffOutput;
use cardlens_core::io::save_png;
use tracing::info;

use super::{load_config, open_session, AlignmentOpts};
use crate::summary::print_diff_summary;

#[derive(Args)]
pub struct DiffArgs {
    /// Reference card image
    pub reference: PathBuf,

    /// Uploaded photo to compare against the reference
    pub uploaded: PathBuf,

    #[command(flatten)]
    pub align: AlignmentOpts,

    /// Viewer config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Device pixel ratio override
    #[arg(long)]
    pub dpr: Option<f64>,

    /// Output file path
    #[arg(short, long, default_value = "difference.png")]
    pub output: PathBuf,
}

pub fn run(args: &DiffArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(dpr) = args.dpr {
        config.view.device_pixel_ratio = dpr;
    }
    let alignment = args.align.resolve()?;

    let mut session = open_session(config, &args.reference, &args.uploaded)?;
    session.set_alignment(alignment);

    let frame = match session.difference() {
        DiffOutput::Ready(frame) => frame.clone(),
        DiffOutput::Failed(msg) => anyhow::bail!("Difference render failed: {msg}"),
        DiffOutput::Pending => anyhow::bail!("Images are not loaded"),
    };

    save_png(&frame.image, &args.output)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;
    info!(path = %args.output.display(), "saved difference image");

    print_diff_summary(session.alignment(), &frame.stats, &args.output);
    Ok(())
}
