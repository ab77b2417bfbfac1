// src/agents/config.rs

//! A centralized place for the valuation tuning parameters.

// --- Memory matching ---
// An unseen SKU may borrow a remembered SKU's price history only when the
// feature similarity reaches this floor.
pub const SIMILARITY_THRESHOLD: f64 = 0.8;

// --- Willingness-to-pay ---
// A value match of exactly 0.5 is worth exactly the reference price; the
// anchor splits the linear ramp below from the premium ramp above.
pub const VALUE_ANCHOR: f64 = 0.5;
// Slope cap on the premium ramp, divided by the customer's price
// sensitivity. At sensitivity 1.0 a perfect match pays at most +30% above
// reference (0.6 * 0.5).
pub const MAX_PREMIUM_RATE: f64 = 0.6;

// --- Feeling curve ---
// Diminishing returns on the relative price delta.
pub const FEELING_EXPONENT: f64 = 0.65;
// Overpaying hurts about twice as much as an equal underpayment helps.
pub const LOSS_AVERSION: f64 = 2.0;
// Base steepness of the score sigmoid, multiplied by price sensitivity.
pub const SIGMOID_STEEPNESS: f64 = 6.0;

// --- Defaults ---
pub const DEFAULT_PRICE_SENSITIVITY: f64 = 1.0;
