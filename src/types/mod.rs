// src/types/mod.rs

pub mod offer;

// Re-export the most useful items so callers don’t have to dive
// another level down the path.
pub use offer::{Observation, ProductOffer};
