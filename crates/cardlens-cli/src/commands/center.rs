use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;
use cardlens_core::alignment::AlignmentSettings;
use cardlens_core::center::{solve_center, CenterRequest, CenterTarget};
use cardlens_core::geometry::{NormalizedPoint, Point};
use cardlens_core::viewport::ViewportState;

use super::{load_config, open_session, parse_pair, AlignmentOpts};
use crate::summary::print_center_summary;

#[derive(Clone, ValueEnum)]
pub enum TargetArg {
    Uploaded,
    Reference,
}

impl From<&TargetArg> for CenterTarget {
    fn from(arg: &TargetArg) -> Self {
        match arg {
            TargetArg::Uploaded => CenterTarget::Uploaded,
            TargetArg::Reference => CenterTarget::Reference,
        }
    }
}

#[derive(Args)]
pub struct CenterArgs {
    /// Reference card image
    pub reference: PathBuf,

    /// Uploaded photo
    pub uploaded: PathBuf,

    /// Which image the point was picked on
    #[arg(long, value_enum, default_value = "uploaded")]
    pub target: TargetArg,

    /// Point to center on: "x,y" normalized to the target's displayed box
    #[arg(long)]
    pub point: String,

    #[command(flatten)]
    pub align: AlignmentOpts,

    /// Current viewport zoom
    #[arg(long, default_value = "1.0")]
    pub zoom: f64,

    /// Current viewport pan: "x,y" in screen pixels
    #[arg(long, allow_hyphen_values = true)]
    pub pan: Option<String>,

    /// Viewer config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the new alignment and viewport to a TOML file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// What `center` writes out: the viewport and the alignment it pairs with.
#[derive(Serialize)]
struct CenterResult {
    zoom: f64,
    pan: Point,
    alignment: AlignmentSettings,
}

pub fn run(args: &CenterArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let alignment = args.align.resolve()?;

    let (x, y) = parse_pair(&args.point).context("Invalid point format (expected 'x,y')")?;
    let pan = match args.pan {
        Some(ref pan) => {
            let (px, py) = parse_pair(pan).context("Invalid pan format (expected 'x,y')")?;
            Point::new(px, py)
        }
        None => Point::ZERO,
    };
    let viewport = ViewportState {
        zoom: config.zoom.clamp(args.zoom),
        pan,
    };

    let session = open_session(config, &args.reference, &args.uploaded)?;
    let request = CenterRequest {
        target: CenterTarget::from(&args.target),
        point: NormalizedPoint::new(x, y),
        alignment: &alignment,
        viewport: &viewport,
        uploaded: session.uploaded().dimensions(),
        reference: session.reference().dimensions(),
        view: session.view_size(),
    };
    let result = solve_center(&request).context("Could not center: zoom or view size is not usable")?;

    print_center_summary(&alignment, &result.alignment, &result.viewport);

    if let Some(ref path) = args.output {
        let out = CenterResult {
            zoom: result.viewport.zoom,
            pan: result.viewport.pan,
            alignment: result.alignment,
        };
        let toml_str = toml::to_string_pretty(&out)?;
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write result to {}", path.display()))?;
        println!("Result saved to {}", path.display());
    }

    Ok(())
}
