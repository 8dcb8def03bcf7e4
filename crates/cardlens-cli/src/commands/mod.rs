pub mod center;
pub mod config;
pub mod diff;
pub mod info;
pub mod place;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use cardlens_core::alignment::AlignmentSettings;
use cardlens_core::config::ViewerConfig;
use cardlens_core::geometry::NormalizedPoint;
use cardlens_core::io::load_image;
use cardlens_core::session::ComparisonSession;

/// Alignment given as a file and/or individual overrides.
#[derive(Args)]
pub struct AlignmentOpts {
    /// Alignment file (TOML) to start from
    #[arg(long)]
    pub alignment: Option<PathBuf>,

    /// Horizontal scale (0.5-2.0)
    #[arg(long)]
    pub scale_x: Option<f64>,

    /// Vertical scale (0.5-2.0)
    #[arg(long)]
    pub scale_y: Option<f64>,

    /// Horizontal offset in view pixels
    #[arg(long, allow_hyphen_values = true)]
    pub offset_x: Option<f64>,

    /// Vertical offset in view pixels
    #[arg(long, allow_hyphen_values = true)]
    pub offset_y: Option<f64>,

    /// Rotation in degrees (-45 to 45)
    #[arg(long, allow_hyphen_values = true)]
    pub rotate: Option<f64>,

    /// Rotation/scale pivot on the uploaded image: "x,y" in 0..1
    #[arg(long)]
    pub pivot: Option<String>,
}

impl AlignmentOpts {
    /// Resolve to clamped alignment settings.
    pub fn resolve(&self) -> Result<AlignmentSettings> {
        let mut alignment = match self.alignment {
            Some(ref path) => load_alignment(path)?,
            None => AlignmentSettings::identity(),
        };

        if let Some(v) = self.scale_x {
            alignment.scale_x = v;
        }
        if let Some(v) = self.scale_y {
            alignment.scale_y = v;
        }
        if let Some(v) = self.offset_x {
            alignment.offset_x = v;
        }
        if let Some(v) = self.offset_y {
            alignment.offset_y = v;
        }
        if let Some(v) = self.rotate {
            alignment.rotate = v;
        }
        if let Some(ref pivot) = self.pivot {
            let (x, y) = parse_pair(pivot).context("Invalid pivot format (expected 'x,y')")?;
            alignment.pivot = Some(NormalizedPoint::new(x, y));
        }

        Ok(alignment.clamped())
    }
}

/// Parse "a,b" into two floats.
pub fn parse_pair(s: &str) -> Result<(f64, f64)> {
    let parts: Vec<f64> = s
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<std::result::Result<_, _>>()
        .with_context(|| format!("'{s}' is not a pair of numbers"))?;
    if parts.len() != 2 {
        anyhow::bail!("Expected exactly 2 comma-separated values, got {}", parts.len());
    }
    Ok((parts[0], parts[1]))
}

pub fn load_alignment(path: &Path) -> Result<AlignmentSettings> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read alignment file {}", path.display()))?;
    let alignment: AlignmentSettings = toml::from_str(&text)
        .with_context(|| format!("Failed to parse alignment file {}", path.display()))?;
    Ok(alignment)
}

/// Viewer config from a TOML file, or defaults. Unusable values fall back to
/// their defaults with a warning.
pub fn load_config(path: Option<&Path>) -> Result<ViewerConfig> {
    let Some(path) = path else {
        return Ok(ViewerConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: ViewerConfig =
        toml::from_str(&text).with_context(|| format!("Failed to parse config {}", path.display()))?;
    Ok(config.sanitized())
}

/// Decode both images and hand them to a fresh session.
pub fn open_session(
    config: ViewerConfig,
    reference: &Path,
    uploaded: &Path,
) -> Result<ComparisonSession> {
    let reference_img = load_image(reference)
        .with_context(|| format!("Failed to load reference {}", reference.display()))?;
    let uploaded_img = load_image(uploaded)
        .with_context(|| format!("Failed to load uploaded image {}", uploaded.display()))?;

    let mut session = ComparisonSession::new(config);
    let ticket = session.begin_reference_load();
    session.finish_reference_load(ticket, Ok(reference_img));
    let ticket = session.begin_uploaded_load();
    session.finish_uploaded_load(ticket, Ok(uploaded_img));
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pair() {
        assert_eq!(parse_pair("0.25, 0.75").unwrap(), (0.25, 0.75));
        assert_eq!(parse_pair("-3,4.5").unwrap(), (-3.0, 4.5));
        assert!(parse_pair("1").is_err());
        assert!(parse_pair("1,2,3").is_err());
        assert!(parse_pair("a,b").is_err());
    }
}
