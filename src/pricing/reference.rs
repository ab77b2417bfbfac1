// src/pricing/reference.rs

use crate::error::{Result, ValuationError};
use serde::Serialize;
use statrs::statistics::{Data, OrderStatistics};

/// Robust summary of the prices a customer has seen for a product:
/// where the market sits and how noisy it has been around that point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceEstimate {
    /// Median of the observed prices.
    pub reference: f64,
    /// Median absolute deviation divided by the reference. Prices whose
    /// relative delta falls inside this band read as "at market".
    pub relative_uncertainty: f64,
}

/// Median + MAD over an observed price history. Medians on both passes keep
/// the estimate stable against one-off discounts or mispriced listings that
/// would drag a mean around.
pub fn estimate_reference(prices: &[f64]) -> Result<ReferenceEstimate> {
    if prices.is_empty() {
        return Err(ValuationError::EmptyPriceHistory);
    }

    let reference = median(prices);
    if reference == 0.0 {
        return Err(ValuationError::ZeroReferencePrice);
    }

    let deviations: Vec<f64> = prices.iter().map(|p| (p - reference).abs()).collect();
    let mad = median(&deviations);

    Ok(ReferenceEstimate {
        reference,
        relative_uncertainty: mad / reference,
    })
}

fn median(values: &[f64]) -> f64 {
    let mut data = Data::new(values.to_vec());
    data.median()
}
