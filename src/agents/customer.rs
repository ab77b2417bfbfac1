// src/agents/customer.rs

use super::config::DEFAULT_PRICE_SENSITIVITY;
use crate::error::Result;
use crate::memory::{MemoryMatch, PriceMemory};
use crate::pricing::similarity;
use crate::types::ProductOffer;
use serde::Serialize;

/// The buying agent: fixed taste and sensitivity plus a growing memory of
/// prices it has seen.
///
/// `preferences` must be the same length and scale as the feature vector of
/// every offer the customer will ever evaluate, and `max_distance` must be
/// the largest possible L1 distance on that scale (N features of width W →
/// N·W); both are fixed for the customer's lifetime. Memory is private and
/// append-only — only the valuation engine's record step writes to it.
///
/// A customer is an independently ownable unit: nothing is shared between
/// customers, so distinct customers can be evaluated in parallel freely.
/// One customer is single-writer/single-reader; see [`crate::sync`].
#[derive(Debug, Clone, Serialize)]
pub struct Customer {
    pub preferences: Vec<f64>,
    pub max_distance: f64,
    pub price_sensitivity: f64,
    memory: PriceMemory,
}

impl Customer {
    pub fn new(preferences: Vec<f64>, max_distance: f64, price_sensitivity: f64) -> Self {
        Self {
            preferences,
            max_distance,
            price_sensitivity,
            memory: PriceMemory::new(),
        }
    }

    /// A customer with the default price sensitivity of 1.0.
    pub fn with_default_sensitivity(preferences: Vec<f64>, max_distance: f64) -> Self {
        Self::new(preferences, max_distance, DEFAULT_PRICE_SENSITIVITY)
    }

    /// How well the offer matches this customer's stated taste, independent
    /// of price. Near [0, 1] for a well-chosen `max_distance`, but not
    /// clamped (see [`crate::pricing::similarity`]).
    pub fn value_match(&self, offer: &ProductOffer) -> Result<f64> {
        similarity(&offer.features, &self.preferences, self.max_distance)
    }

    /// Resolves the remembered price history relevant to `offer`, if any.
    pub fn recall(&self, offer: &ProductOffer) -> Result<Option<MemoryMatch<'_>>> {
        self.memory.lookup(offer, self.max_distance)
    }

    /// Commits the offer to memory. Called by the valuation engine after a
    /// successful scoring pass; exposed for seeding historical sightings.
    pub fn record_observation(&mut self, offer: &ProductOffer) {
        self.memory.record(offer);
    }

    /// Read-only view of everything this customer remembers.
    pub fn memory(&self) -> &PriceMemory {
        &self.memory
    }
}
