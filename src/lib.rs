// src/lib.rs

// === 1. Declare all the top-level modules ===
pub mod agents;
pub mod error;
pub mod memory;
pub mod pricing;
pub mod sync;
pub mod types;
pub mod valuation;

// === 2. Re-export the public-facing components to create a clean API ===

// --- From `agents` ---
pub use agents::Customer;
pub use agents::config;

// --- From our `valuation` engine ---
pub use valuation::Evaluation;

// --- From `memory` ---
pub use memory::{MemoryMatch, PriceMemory, Resolution};

// --- From `pricing` ---
pub use pricing::{ReferenceEstimate, estimate_reference, similarity};

// --- From `types` ---
pub use types::{Observation, ProductOffer};

// --- From `error` ---
pub use error::{Result, ValuationError};

// --- From `sync` ---
pub use sync::SharedCustomer;
