// src/error.rs

use thiserror::Error;

/// Failures the valuation engine surfaces instead of proceeding with
/// corrupted math. Missing memory is never an error — lookup returns
/// `Ok(None)` for that and the engine falls back to value-only scoring.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValuationError {
    #[error("max_distance must be positive, got {0}")]
    NonPositiveMaxDistance(f64),

    #[error("feature vector length mismatch: {left} vs {right}")]
    FeatureLengthMismatch { left: usize, right: usize },

    /// Unreachable through the public lookup path (empty histories are
    /// reported as absent), but guarded so a direct caller can't divide
    /// over an empty set.
    #[error("cannot estimate a reference price from an empty price history")]
    EmptyPriceHistory,

    #[error("median price is zero; relative uncertainty is undefined")]
    ZeroReferencePrice,
}

pub type Result<T> = std::result::Result<T, ValuationError>;
