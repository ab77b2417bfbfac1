// src/agents/mod.rs

pub mod config;
pub mod customer;

pub use customer::Customer;
