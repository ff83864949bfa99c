use super::{BehavioralFootprint, FootprintExtractor, Relation, RelationKind};
use crate::graph::ProcessGraph;
use serde::Serialize;
use std::collections::BTreeSet;

/// Jaccard agreement per relation category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryScores {
    pub direct_succession: f64,
    pub concurrency: f64,
    pub exclusivity: f64,
}

impl CategoryScores {
    pub fn get(&self, kind: RelationKind) -> f64 {
        match kind {
            RelationKind::DirectSuccession => self.direct_succession,
            RelationKind::Concurrency => self.concurrency,
            RelationKind::Exclusivity => self.exclusivity,
        }
    }

    /// Unweighted mean of the three categories.
    pub fn mean(&self) -> f64 {
        (self.direct_succession + self.concurrency + self.exclusivity) / 3.0
    }
}

/// Scores how closely a generated footprint matches a reference footprint.
///
/// A score of 1.0 means the generated net has the same behavioral
/// relations as the reference in every category.
pub struct FootprintScorer;

impl FootprintScorer {
    /// Overall agreement in [0, 1]: the mean of the per-category Jaccard scores.
    pub fn score(reference: &BehavioralFootprint, generated: &BehavioralFootprint) -> f64 {
        Self::category_scores(reference, generated).mean()
    }

    pub fn category_scores(
        reference: &BehavioralFootprint,
        generated: &BehavioralFootprint,
    ) -> CategoryScores {
        let score = |kind| jaccard_similarity(reference.relations(kind), generated.relations(kind));
        CategoryScores {
            direct_succession: score(RelationKind::DirectSuccession),
            concurrency: score(RelationKind::Concurrency),
            exclusivity: score(RelationKind::Exclusivity),
        }
    }

    /// Pass-through to [`FootprintExtractor::extract`].
    pub fn extract_footprint(graph: &ProcessGraph) -> BehavioralFootprint {
        FootprintExtractor::extract(graph)
    }
}

/// `|A ∩ B| / |A ∪ B|`, with two empty sets agreeing fully.
pub fn jaccard_similarity(a: &BTreeSet<Relation>, b: &BTreeSet<Relation>) -> f64 {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => 1.0,
        (true, false) | (false, true) => 0.0,
        (false, false) => {
            let intersection = a.intersection(b).count();
            let union = a.len() + b.len() - intersection;
            intersection as f64 / union as f64
        }
    }
}
