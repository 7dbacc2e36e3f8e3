use uuid::Uuid;

use crate::services::repository::RecommendationStore;
use crate::services::similarity::RankedCandidate;

/// Outcome of a materialization pass
#[derive(Debug)]
pub struct MaterializeOutcome {
    /// Edges written or refreshed
    pub upserted: usize,
    /// Per-candidate failures; the remaining candidates were still processed
    pub failures: Vec<String>,
}

/// Persists a ranked similarity result as recommendation edges.
///
/// Each candidate is upserted independently, keyed by (source, candidate):
/// a failure on one edge is recorded and does not block the rest. Collected
/// failures are reported once at the end.
pub fn materialize(
    store: &mut RecommendationStore,
    source: Uuid,
    ranked: &[RankedCandidate],
) -> MaterializeOutcome {
    let mut upserted = 0;
    let mut failures = Vec::new();

    for candidate in ranked {
        match store.upsert(
            source,
            candidate.item_id,
            candidate.score,
            candidate.reason.clone(),
        ) {
            Ok(()) => upserted += 1,
            Err(e) => failures.push(format!("{}: {}", candidate.item_id, e)),
        }
    }

    if !failures.is_empty() {
        tracing::warn!(
            source_item = %source,
            upserted,
            failure_count = failures.len(),
            "Partial recommendation materialization"
        );
    }

    MaterializeOutcome { upserted, failures }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(item_id: Uuid, score: f32) -> RankedCandidate {
        RankedCandidate {
            item_id,
            score,
            reason: "shares style category casual".to_string(),
        }
    }

    #[test]
    fn test_materialize_writes_every_candidate() {
        let mut store = RecommendationStore::new();
        let source = Uuid::new_v4();
        let candidates = vec![ranked(Uuid::new_v4(), 0.9), ranked(Uuid::new_v4(), 0.4)];

        let outcome = materialize(&mut store, source, &candidates);
        assert_eq!(outcome.upserted, 2);
        assert!(outcome.failures.is_empty());
        assert_eq!(store.fetch(source).len(), 2);
    }

    #[test]
    fn test_materialize_twice_is_idempotent() {
        let mut store = RecommendationStore::new();
        let source = Uuid::new_v4();
        let target = Uuid::new_v4();

        materialize(&mut store, source, &[ranked(target, 0.5)]);
        materialize(&mut store, source, &[ranked(target, 0.8)]);

        let rows = store.fetch(source);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].similarity_score, 0.8);
    }

    #[test]
    fn test_failure_does_not_block_remaining_candidates() {
        let mut store = RecommendationStore::new();
        let source = Uuid::new_v4();
        let good = Uuid::new_v4();
        // A self-edge is the one invalid input the store rejects
        let candidates = vec![ranked(source, 0.9), ranked(good, 0.6)];

        let outcome = materialize(&mut store, source, &candidates);
        assert_eq!(outcome.upserted, 1);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(store.fetch(source).len(), 1);
        assert_eq!(store.fetch(source)[0].recommended_item, good);
    }
}
