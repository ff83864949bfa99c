use super::{BehavioralFootprint, FootprintBuilder, RelationKind};
use crate::graph::{ProcessGraph, SplitKind, Transition};
use ahash::AHashMap;
use itertools::Itertools;

/// Derives a `BehavioralFootprint` from a process graph.
///
/// The graph is read as a pre-reduced net: only transition-to-transition
/// adjacency counts, and flows touching any other node are skipped.
pub struct FootprintExtractor;

impl FootprintExtractor {
    /// Extracts the footprint of `graph`. Pure and deterministic.
    pub fn extract(graph: &ProcessGraph) -> BehavioralFootprint {
        let mut lookup: AHashMap<&str, &Transition> = AHashMap::new();
        for transition in &graph.transitions {
            lookup.entry(transition.id.as_str()).or_insert(transition);
        }

        let mut builder = FootprintBuilder::default();
        // Source id -> distinct targets, in flow order.
        let mut splits: Vec<(&Transition, Vec<&Transition>)> = Vec::new();

        for flow in &graph.flows {
            let (Some(&source), Some(&target)) = (
                lookup.get(flow.source_id.as_str()),
                lookup.get(flow.target_id.as_str()),
            ) else {
                continue;
            };

            builder.insert(RelationKind::DirectSuccession, &source.name, &target.name);

            match splits.iter_mut().find(|(s, _)| s.id == source.id) {
                Some((_, targets)) => {
                    if !targets.iter().any(|t| t.id == target.id) {
                        targets.push(target);
                    }
                }
                None => splits.push((source, vec![target])),
            }
        }

        for (source, targets) in splits.iter().filter(|(_, targets)| targets.len() >= 2) {
            let kind = Self::split_relation(source.split_kind);
            for (x, y) in targets.iter().tuple_combinations() {
                builder.insert(kind, &x.name, &y.name);
            }
        }

        builder.build()
    }

    /// The relation a split contributes between its branches.
    ///
    /// Inclusive-or splits share the concurrency bucket with and-splits: any
    /// two branches of an or-split may both fire.
    pub fn split_relation(split_kind: SplitKind) -> RelationKind {
        match split_kind {
            SplitKind::And | SplitKind::Or => RelationKind::Concurrency,
            SplitKind::Xor => RelationKind::Exclusivity,
        }
    }
}
