// src/pricing/mod.rs

// These lines find and include the pricing math files as modules.
pub mod reference;
pub mod similarity;

// These lines make the important items from the inner modules
// directly available from the parent `pricing` module.
pub use reference::{ReferenceEstimate, estimate_reference};
pub use similarity::similarity;
