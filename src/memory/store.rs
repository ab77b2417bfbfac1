// src/memory/store.rs

use crate::agents::config::SIMILARITY_THRESHOLD;
use crate::error::Result;
use crate::pricing::similarity;
use crate::types::{Observation, ProductOffer};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Every sighting of one SKU, oldest first.
pub type SkuHistory = Vec<Observation>;

/// All remembered SKUs within one category, in the order they were first
/// seen. Insertion order matters: the similarity fallback's tie-break is
/// "first recorded wins", which is why these are IndexMaps and not HashMaps.
type CategoryMemory = IndexMap<String, SkuHistory>;

/// Which path a lookup resolved through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Resolution {
    /// The offer's own SKU was already in memory.
    DirectSku,
    /// A different SKU in the same category matched on features; carries
    /// the SKU whose history was returned.
    SimilarSku(String),
}

/// A resolved lookup: the winning SKU's full observation history plus how
/// it was found, so callers never have to re-derive which branch was taken.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryMatch<'a> {
    pub observations: &'a [Observation],
    pub resolution: Resolution,
}

/// A customer's price memory: category → SKU → append-only observation log.
///
/// Categories are hard partitions — lookups never fall back across them.
/// Within a known category an unseen SKU can still borrow the history of a
/// feature-similar SKU.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct PriceMemory {
    categories: IndexMap<u32, CategoryMemory>,
}

impl PriceMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the offer as a new observation under `(category, sku)`,
    /// creating both levels on first sight. Never deduplicates, never
    /// reorders: the log only grows.
    pub fn record(&mut self, offer: &ProductOffer) {
        self.categories
            .entry(offer.category)
            .or_default()
            .entry(offer.sku.clone())
            .or_default()
            .push(Observation::from_offer(offer));
    }

    /// Resolves the price history relevant to `offer`:
    ///
    /// 1. unknown category → `None` (no cross-category fallback);
    /// 2. known SKU → its full history (direct match);
    /// 3. known category, unseen SKU → best feature-similar SKU in that
    ///    category at or above [`SIMILARITY_THRESHOLD`], or `None`.
    ///
    /// Errors only on corrupted comparisons (length mismatch against a
    /// stored observation, non-positive `max_distance`); plain absence is
    /// `Ok(None)`.
    pub fn lookup(&self, offer: &ProductOffer, max_distance: f64) -> Result<Option<MemoryMatch<'_>>> {
        let Some(category) = self.categories.get(&offer.category) else {
            return Ok(None);
        };

        if let Some(history) = category.get(&offer.sku) {
            if !history.is_empty() {
                return Ok(Some(MemoryMatch {
                    observations: history,
                    resolution: Resolution::DirectSku,
                }));
            }
        }

        find_best_match(offer, category, max_distance, SIMILARITY_THRESHOLD)
    }

    /// True when nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total observations across every category and SKU.
    pub fn observation_count(&self) -> usize {
        self.categories
            .values()
            .flat_map(|skus| skus.values())
            .map(Vec::len)
            .sum()
    }

    /// Read access to one SKU's history, mostly for inspection and tests.
    pub fn history(&self, category: u32, sku: &str) -> Option<&[Observation]> {
        self.categories
            .get(&category)
            .and_then(|skus| skus.get(sku))
            .map(Vec::as_slice)
    }
}

/// Scans every observation of every SKU in the category (insertion order on
/// both levels) for the highest feature similarity to `offer`. Only
/// candidates at or above `threshold` count, and the running best is only
/// replaced on a strictly greater similarity — so the first SKU to reach
/// the maximum wins ties and the result is deterministic.
fn find_best_match<'a>(
    offer: &ProductOffer,
    category: &'a CategoryMemory,
    max_distance: f64,
    threshold: f64,
) -> Result<Option<MemoryMatch<'a>>> {
    let mut best_similarity = f64::NEG_INFINITY;
    let mut best_sku: Option<&str> = None;

    for (sku, history) in category {
        for observation in history {
            let score = similarity(&offer.features, &observation.features, max_distance)?;
            if score >= threshold && score > best_similarity {
                best_similarity = score;
                best_sku = Some(sku);
            }
        }
    }

    // The winner contributes its entire history, not just the matching
    // observation.
    Ok(best_sku.map(|sku| MemoryMatch {
        observations: &category[sku],
        resolution: Resolution::SimilarSku(sku.to_owned()),
    }))
}

// ────────────────────────────────────────────────────────────────────────────
//  Unit tests
// ────────────────────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    const MAX_DISTANCE: f64 = 27.0;

    fn offer(price: f64, sku: &str, category: u32, features: &[f64]) -> ProductOffer {
        ProductOffer::new(price, sku, category, features.to_vec())
    }

    #[test]
    fn record_creates_category_and_sku() {
        let mut memory = PriceMemory::new();

        memory.record(&offer(100.0, "item1", 1, &[5.0, 5.0, 5.0]));

        let history = memory.history(1, "item1").unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].price, 100.0);
        assert_eq!(history[0].features, vec![5.0, 5.0, 5.0]);
    }

    #[test]
    fn repeated_records_append_in_order() {
        let mut memory = PriceMemory::new();

        memory.record(&offer(100.0, "item1", 1, &[5.0, 5.0, 5.0]));
        memory.record(&offer(110.0, "item1", 1, &[5.0, 5.0, 6.0]));

        let history = memory.history(1, "item1").unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].price, 100.0);
        assert_eq!(history[1].price, 110.0);
    }

    #[test]
    fn empty_memory_resolves_to_absent() {
        let memory = PriceMemory::new();
        let result = memory
            .lookup(&offer(100.0, "new_item", 1, &[5.0, 5.0, 5.0]), MAX_DISTANCE)
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn unknown_category_is_a_hard_partition() {
        let mut memory = PriceMemory::new();
        memory.record(&offer(100.0, "ref_item", 1, &[5.0, 5.0, 5.0]));

        // Identical SKU and features, different category.
        let result = memory
            .lookup(&offer(120.0, "ref_item", 2, &[5.0, 5.0, 5.0]), MAX_DISTANCE)
            .unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn direct_sku_match_returns_full_history() {
        let mut memory = PriceMemory::new();
        memory.record(&offer(100.0, "ref_item", 1, &[5.0, 5.0, 5.0]));
        memory.record(&offer(110.0, "ref_item", 1, &[5.0, 5.0, 5.0]));

        let matched = memory
            .lookup(&offer(150.0, "ref_item", 1, &[5.0, 5.0, 5.0]), MAX_DISTANCE)
            .unwrap()
            .unwrap();

        assert_eq!(matched.resolution, Resolution::DirectSku);
        assert_eq!(matched.observations.len(), 2);
        assert_eq!(matched.observations[0].price, 100.0);
    }

    #[test]
    fn direct_match_takes_precedence_over_similar_skus() {
        let mut memory = PriceMemory::new();
        // A feature-identical rival SKU recorded first...
        memory.record(&offer(999.0, "rival", 1, &[5.0, 5.0, 5.0]));
        // ...must never shadow the exact SKU.
        memory.record(&offer(100.0, "ref_item", 1, &[5.0, 5.0, 5.0]));

        let matched = memory
            .lookup(&offer(100.0, "ref_item", 1, &[5.0, 5.0, 5.0]), MAX_DISTANCE)
            .unwrap()
            .unwrap();

        assert_eq!(matched.resolution, Resolution::DirectSku);
        assert_eq!(matched.observations[0].price, 100.0);
    }

    #[test]
    fn unseen_sku_borrows_a_similar_history() {
        let mut memory = PriceMemory::new();
        memory.record(&offer(100.0, "ref_item", 1, &[5.0, 5.0, 5.0]));

        // Distance 1 → similarity 1 - 1/27 ≈ 0.963, above the 0.8 threshold.
        let matched = memory
            .lookup(&offer(105.0, "unknown", 1, &[5.0, 5.0, 4.0]), MAX_DISTANCE)
            .unwrap()
            .unwrap();

        assert_eq!(
            matched.resolution,
            Resolution::SimilarSku("ref_item".to_owned())
        );
        assert_eq!(matched.observations[0].price, 100.0);
    }

    #[test]
    fn dissimilar_skus_stay_below_threshold() {
        let mut memory = PriceMemory::new();
        memory.record(&offer(100.0, "ref_item", 1, &[1.0, 1.0, 1.0]));

        // Distance 24 → similarity 1 - 24/27 ≈ 0.11, well below 0.8.
        let result = memory
            .lookup(&offer(120.0, "unknown", 1, &[9.0, 9.0, 9.0]), MAX_DISTANCE)
            .unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn closest_sku_wins_among_several_candidates() {
        let mut memory = PriceMemory::new();
        // similarity 1 - 5/27 ≈ 0.815 — clears the threshold but loses.
        memory.record(&offer(110.0, "far", 1, &[5.0, 7.0, 8.0]));
        // similarity 1 - 1/27 ≈ 0.963 — the winner.
        memory.record(&offer(100.0, "close", 1, &[5.0, 5.0, 6.0]));

        let matched = memory
            .lookup(&offer(120.0, "query", 1, &[5.0, 5.0, 5.0]), MAX_DISTANCE)
            .unwrap()
            .unwrap();

        assert_eq!(matched.resolution, Resolution::SimilarSku("close".to_owned()));
    }

    #[test]
    fn ties_go_to_the_first_recorded_sku() {
        let mut memory = PriceMemory::new();
        // Both are distance 1 from the query — identical similarity.
        memory.record(&offer(100.0, "first", 1, &[5.0, 5.0, 6.0]));
        memory.record(&offer(200.0, "second", 1, &[5.0, 5.0, 4.0]));

        let matched = memory
            .lookup(&offer(150.0, "query", 1, &[5.0, 5.0, 5.0]), MAX_DISTANCE)
            .unwrap()
            .unwrap();

        assert_eq!(matched.resolution, Resolution::SimilarSku("first".to_owned()));
        assert_eq!(matched.observations[0].price, 100.0);
    }

    #[test]
    fn fallback_returns_the_winners_entire_history() {
        let mut memory = PriceMemory::new();
        memory.record(&offer(100.0, "close", 1, &[5.0, 5.0, 6.0]));
        memory.record(&offer(104.0, "close", 1, &[5.0, 5.0, 6.0]));

        let matched = memory
            .lookup(&offer(120.0, "query", 1, &[5.0, 5.0, 5.0]), MAX_DISTANCE)
            .unwrap()
            .unwrap();

        assert_eq!(matched.observations.len(), 2);
    }

    #[test]
    fn stored_length_mismatch_surfaces_as_error() {
        let mut memory = PriceMemory::new();
        memory.record(&offer(100.0, "ref_item", 1, &[5.0, 5.0]));

        // Unseen SKU forces the fallback scan over the short vector.
        let err = memory
            .lookup(&offer(100.0, "unknown", 1, &[5.0, 5.0, 5.0]), MAX_DISTANCE)
            .unwrap_err();

        assert_eq!(
            err,
            crate::error::ValuationError::FeatureLengthMismatch { left: 3, right: 2 }
        );
    }

    #[test]
    fn observation_count_spans_categories() {
        let mut memory = PriceMemory::new();
        memory.record(&offer(1.0, "a", 1, &[1.0]));
        memory.record(&offer(2.0, "a", 1, &[1.0]));
        memory.record(&offer(3.0, "b", 2, &[1.0]));

        assert_eq!(memory.observation_count(), 3);
        assert!(!memory.is_empty());
    }
}
