use super::surface::Surface;

/// Summary of how far apart the two aligned layers are, over the pixels both
/// images cover.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DiffStats {
    /// Device pixels covered by both images.
    pub covered_pixels: usize,
    /// Mean over covered pixels of the mean RGB channel difference (0..1).
    pub mean_difference: f32,
    /// Largest single channel difference seen (0..1).
    pub max_difference: f32,
    /// Share of covered pixels whose largest channel difference exceeds the
    /// mismatch threshold.
    pub mismatch_fraction: f32,
}

impl DiffStats {
    /// Compare two equally sized surfaces before they are blended.
    /// Mismatched sizes compare as if nothing overlapped.
    pub fn measure(backdrop: &Surface, source: &Surface, threshold: f32) -> Self {
        if backdrop.pixels().dimensions() != source.pixels().dimensions() {
            return Self::default();
        }

        let mut covered = 0usize;
        let mut mismatched = 0usize;
        let mut sum = 0.0f64;
        let mut max = 0.0f32;

        for (b, s) in backdrop.pixels().pixels().zip(source.pixels().pixels()) {
            if b.0[3] <= 0.0 || s.0[3] <= 0.0 {
                continue;
            }
            covered += 1;
            let d = [
                (b.0[0] - s.0[0]).abs(),
                (b.0[1] - s.0[1]).abs(),
                (b.0[2] - s.0[2]).abs(),
            ];
            let largest = d[0].max(d[1]).max(d[2]);
            sum += ((d[0] + d[1] + d[2]) / 3.0) as f64;
            max = max.max(largest);
            if largest > threshold {
                mismatched += 1;
            }
        }

        if covered == 0 {
            return Self::default();
        }
        Self {
            covered_pixels: covered,
            mean_difference: (sum / covered as f64) as f32,
            max_difference: max,
            mismatch_fraction: mismatched as f32 / covered as f32,
        }
    }
}
