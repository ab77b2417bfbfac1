// src/memory/mod.rs

pub mod store;

pub use store::{MemoryMatch, PriceMemory, Resolution, SkuHistory};
