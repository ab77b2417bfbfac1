// src/types/offer.rs

use serde::{Deserialize, Serialize};

/// A priced product presented to a customer for evaluation.
///
/// Immutable value object: the caller builds one per evaluation, nothing
/// else owns or mutates it. `features` is an ordered attribute vector on a
/// fixed scale (e.g. 0–9 per attribute) and must match the length of the
/// customer's preference vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductOffer {
    pub price: f64,
    pub sku: String,
    pub category: u32,
    pub features: Vec<f64>,
}

impl ProductOffer {
    pub fn new(price: f64, sku: impl Into<String>, category: u32, features: Vec<f64>) -> Self {
        Self {
            price,
            sku: sku.into(),
            category,
            features,
        }
    }
}

/// One remembered sighting of a product: the price it carried and the
/// features it had at the time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub price: f64,
    pub features: Vec<f64>,
}

impl Observation {
    pub fn from_offer(offer: &ProductOffer) -> Self {
        Self {
            price: offer.price,
            features: offer.features.clone(),
        }
    }
}
