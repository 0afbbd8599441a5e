use super::vec_dataset::VecDataset;
use crate::error::DataError;
use gradnet_core::Sample;
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Cluster centers of [`two_blobs`], indexed by label.
pub const CENTERS: [[f64; 2]; 2] = [[0.25, 0.25], [0.75, 0.75]];

/// Two Gaussian clusters in the unit square, `per_class` points each, alternating labels 0 and 1.
///
/// Each coordinate is drawn from `N(center, spread²)`. For small `spread` the classes are
/// linearly separable.
pub fn two_blobs<R: Rng + ?Sized>(
    rng: &mut R,
    per_class: usize,
    spread: f64,
) -> Result<VecDataset<Sample>, DataError> {
    if !spread.is_finite() || spread < 0.0 {
        return Err(DataError::InvalidParameter(format!(
            "spread must be finite and non-negative, got {}",
            spread
        )));
    }
    let noise = Normal::new(0.0, spread)
        .map_err(|e| DataError::InvalidParameter(format!("spread {}: {}", spread, e)))?;

    let mut samples = Vec::with_capacity(2 * per_class);
    for _ in 0..per_class {
        for (label, center) in CENTERS.iter().enumerate() {
            let features = center.iter().map(|&c| c + noise.sample(rng)).collect();
            samples.push(Sample::new(features, label));
        }
    }
    Ok(VecDataset::new(samples))
}

#[cfg(test)]
#[path = "toy_test.rs"]
mod tests;
