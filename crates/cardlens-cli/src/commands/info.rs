use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use cardlens_core::geometry::{centered_origin, contain_fit};
use cardlens_core::io::{dimensions_of, load_image};

use super::load_config;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image files
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Viewer config file (TOML) for the view size
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let view = config.view.size();

    for (i, file) in args.files.iter().enumerate() {
        let img = load_image(file).with_context(|| format!("Failed to load {}", file.display()))?;
        let dims = dimensions_of(&img);
        let fitted = contain_fit(dims.size(), view);
        let origin = centered_origin(fitted, view);

        if i > 0 {
            println!();
        }
        println!("File:        {}", file.display());
        println!("Dimensions:  {}x{}", dims.width, dims.height);
        println!("Aspect:      {:.4}", dims.size().aspect());
        println!(
            "Fitted:      {:.2}x{:.2} in {}x{} view",
            fitted.width, fitted.height, view.width, view.height
        );
        println!("Origin:      ({:.2}, {:.2})", origin.x, origin.y);
    }

    Ok(())
}
