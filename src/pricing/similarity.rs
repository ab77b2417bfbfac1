// src/pricing/similarity.rs

use crate::error::{Result, ValuationError};

/// How alike two feature vectors are, as the normalized inverse of their
/// L1 (Manhattan) distance: `1.0 - distance / max_distance`.
///
/// The result is deliberately NOT clamped. With a sensible `max_distance`
/// (number of features × attribute scale width) it lands in [0, 1]; if
/// `max_distance` underestimates the real feature-space extent the value
/// can go negative, and downstream scoring passes that through unchanged.
pub fn similarity(a: &[f64], b: &[f64], max_distance: f64) -> Result<f64> {
    if a.len() != b.len() {
        return Err(ValuationError::FeatureLengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    if max_distance <= 0.0 {
        return Err(ValuationError::NonPositiveMaxDistance(max_distance));
    }

    let distance: f64 = a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum();
    Ok(1.0 - distance / max_distance)
}
