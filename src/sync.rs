// src/sync.rs

//! Cross-thread access to a single customer.
//!
//! The engine itself is synchronous and per-customer single-writer:
//! `record` and `lookup` carry no internal locking. Distinct customers are
//! fully independent and need no coordination; to share *one* customer
//! across threads, wrap it here so every evaluation is serialized through
//! its own lock.

use crate::error::Result;
use crate::types::ProductOffer;
use crate::valuation::Evaluation;
use crate::Customer;
use parking_lot::Mutex;
use std::sync::Arc;

/// One lock per customer. Cloning the handle shares the same customer.
#[derive(Clone)]
pub struct SharedCustomer {
    inner: Arc<Mutex<Customer>>,
}

impl SharedCustomer {
    pub fn new(customer: Customer) -> Self {
        Self {
            inner: Arc::new(Mutex::new(customer)),
        }
    }

    /// Serialized [`Customer::evaluate`].
    pub fn evaluate(&self, offer: &ProductOffer, record_observation: bool) -> Result<Evaluation> {
        self.inner.lock().evaluate(offer, record_observation)
    }

    /// Serialized, non-mutating [`Customer::appraise`].
    pub fn appraise(&self, offer: &ProductOffer) -> Result<Evaluation> {
        self.inner.lock().appraise(offer)
    }

    /// Run a closure against the locked customer, e.g. to seed memory or
    /// inspect it.
    pub fn with<R>(&self, f: impl FnOnce(&mut Customer) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
