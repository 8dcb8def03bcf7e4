use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use cardlens_core::transform::CssTransform;

use super::{load_config, open_session, AlignmentOpts};
use crate::summary::print_placement_summary;

#[derive(Args)]
pub struct PlaceArgs {
    /// Reference card image
    pub reference: PathBuf,

    /// Uploaded photo
    pub uploaded: PathBuf,

    #[command(flatten)]
    pub align: AlignmentOpts,

    /// Viewer config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &PlaceArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let alignment = args.align.resolve()?;

    let mut session = open_session(config, &args.reference, &args.uploaded)?;
    session.set_alignment(alignment);

    let placement = session
        .uploaded_placement()
        .context("Uploaded image has no placement")?;
    let css = CssTransform::from_placement(&placement);
    let outline = placement.outline(session.viewport());

    print_placement_summary(session.alignment(), &css, &outline);
    Ok(())
}
