//! Response selection for matched and unmatched turns.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::catalog::IntentRecord;
use crate::config::DEFAULT_FALLBACK_RESPONSES;
use crate::ml::intent_classifier::MatchResult;

/// Picks the reply for a classified utterance.
///
/// The random source is injected so selection can be made deterministic.
#[derive(Debug, Clone)]
pub struct ResponseSelector<R = StdRng> {
    rng: R,
}

impl ResponseSelector<StdRng> {
    /// Selector seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Selector with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ResponseSelector<R> {
    /// Wrap an existing random source.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Choose a reply.
    ///
    /// For `Matched(tag)` the first record carrying that tag answers with one
    /// of its non-empty responses, chosen uniformly. Unmatched results, a tag
    /// with no record, or a record without responses fall back to a random
    /// phrase from `fallback`. The result is never empty: with no usable
    /// fallback phrase the built-in default is used.
    pub fn select(
        &mut self,
        result: &MatchResult,
        catalog: &[IntentRecord],
        fallback: &[String],
    ) -> String {
        if let MatchResult::Matched(tag) = result {
            if let Some(record) = catalog.iter().find(|r| &r.tag == tag) {
                if let Some(response) = self.choose_non_empty(&record.responses) {
                    return response;
                }
            }
        }

        self.fallback(fallback)
    }

    /// A random fallback phrase.
    pub fn fallback(&mut self, fallback: &[String]) -> String {
        self.choose_non_empty(fallback)
            .unwrap_or_else(|| DEFAULT_FALLBACK_RESPONSES[0].to_string())
    }

    fn choose_non_empty(&mut self, candidates: &[String]) -> Option<String> {
        let usable: Vec<&String> = candidates.iter().filter(|c| !c.is_empty()).collect();
        usable.choose(&mut self.rng).map(|s| s.to_string())
    }
}
