// src/valuation.rs

//! The valuation engine: wires feature similarity, price memory and the
//! reference estimator into a single 0–100 desirability score, with a
//! loss-averse, diminishing-returns mapping around the fair-price point.

use crate::agents::Customer;
use crate::agents::config::{
    FEELING_EXPONENT, LOSS_AVERSION, MAX_PREMIUM_RATE, SIGMOID_STEEPNESS, VALUE_ANCHOR,
};
use crate::error::Result;
use crate::memory::Resolution;
use crate::pricing::estimate_reference;
use crate::types::ProductOffer;
use serde::Serialize;
use tracing::debug;

/// Everything one scoring pass produced. `score` and `value` are always
/// present; the price-side fields are `None` when the customer had no
/// usable memory and the offer was scored on feature match alone.
///
/// This is the full outbound bundle an external visualizer needs to
/// reconstruct the score-vs-price curve without touching engine internals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// Final desirability. Clamped to [0, 100] on the memory-backed path;
    /// the no-memory path is raw `value * 100` and can leave that range
    /// when `value` does.
    pub score: f64,
    /// Feature-match similarity against the customer's preferences.
    pub value: f64,
    /// Median of the remembered prices the offer was judged against.
    pub reference_price: Option<f64>,
    /// MAD / median noise band around the reference.
    pub relative_uncertainty: Option<f64>,
    /// Price at which this customer's feeling would be exactly neutral.
    pub willingness_to_pay: Option<f64>,
    /// Which lookup path supplied the history, `None` when memory had
    /// nothing relevant.
    pub resolution: Option<Resolution>,
}

impl Customer {
    /// Scores `offer` without touching memory. This is the pure half of
    /// [`Customer::evaluate`]; sweep a price range through it to plot the
    /// score curve against one fixed memory snapshot.
    ///
    /// A non-positive `value` on the memory-backed path makes the
    /// willingness-to-pay non-positive as well; the relative delta then
    /// follows IEEE float semantics (±inf/NaN instead of a panic) and the
    /// clamp pins the score to the bottom of the range.
    pub fn appraise(&self, offer: &ProductOffer) -> Result<Evaluation> {
        let value = self.value_match(offer)?;

        let Some(matched) = self.recall(offer)? else {
            debug!(sku = %offer.sku, value, "no price memory, scoring on feature match alone");
            return Ok(Evaluation {
                score: value * 100.0,
                value,
                reference_price: None,
                relative_uncertainty: None,
                willingness_to_pay: None,
                resolution: None,
            });
        };

        let prices: Vec<f64> = matched.observations.iter().map(|o| o.price).collect();
        let estimate = estimate_reference(&prices)?;

        let wtp = willingness_to_pay(estimate.reference, value, self.price_sensitivity);

        let mut rel_delta = (wtp - offer.price) / wtp;
        if rel_delta.abs() < estimate.relative_uncertainty {
            // Within the historical noise band: the price reads as
            // "at market" and the feeling is neutral.
            debug!(rel_delta, band = estimate.relative_uncertainty, "price inside noise band");
            rel_delta = 0.0;
        }

        let feeling = price_feeling(rel_delta);
        let score = sigmoid_score(feeling, self.price_sensitivity).clamp(0.0, 100.0);

        debug!(
            sku = %offer.sku,
            resolution = ?matched.resolution,
            reference = estimate.reference,
            wtp,
            score,
            "scored against price memory"
        );

        Ok(Evaluation {
            score,
            value,
            reference_price: Some(estimate.reference),
            relative_uncertainty: Some(estimate.relative_uncertainty),
            willingness_to_pay: Some(wtp),
            resolution: Some(matched.resolution),
        })
    }

    /// Scores `offer` and, when `record_observation` is set, commits it to
    /// memory **after** scoring — an offer never influences its own score,
    /// only every later one. On error nothing is recorded; the call fails
    /// atomically.
    pub fn evaluate(&mut self, offer: &ProductOffer, record_observation: bool) -> Result<Evaluation> {
        let evaluation = self.appraise(offer)?;
        if record_observation {
            self.record_observation(offer);
        }
        Ok(evaluation)
    }
}

/// The price at which a customer with this taste match feels neutral.
///
/// Calibrated so that value 0.5 is worth exactly the reference price.
/// Below the anchor the ramp is linear down to zero; above it, the premium
/// grows with slope `MAX_PREMIUM_RATE / sensitivity` — more price-sensitive
/// customers grant smaller premiums for a better match.
fn willingness_to_pay(reference: f64, value: f64, price_sensitivity: f64) -> f64 {
    if value <= VALUE_ANCHOR {
        reference * (value * 2.0)
    } else {
        let max_premium = MAX_PREMIUM_RATE / price_sensitivity;
        reference * (1.0 + max_premium * (value - VALUE_ANCHOR))
    }
}

/// Signed, loss-averse transform of the relative price delta. Gains get
/// diminishing returns; losses get the same curve doubled, so overpaying
/// hurts about twice as much as an equal underpayment helps.
fn price_feeling(rel_delta: f64) -> f64 {
    if rel_delta >= 0.0 {
        rel_delta.powf(FEELING_EXPONENT)
    } else {
        -LOSS_AVERSION * (-rel_delta).powf(FEELING_EXPONENT)
    }
}

/// Squashes the feeling onto 0–100. Sensitivity steepens the slope, so a
/// sensitive customer swings harder either side of the fair price.
fn sigmoid_score(feeling: f64, price_sensitivity: f64) -> f64 {
    let k_eff = SIGMOID_STEEPNESS * price_sensitivity;
    100.0 / (1.0 + (-k_eff * feeling).exp())
}
