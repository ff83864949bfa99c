//! Behavioral footprints of process nets and their comparison.
//!
//! A footprint reduces a net to three relation sets over activity names:
//! direct succession (asymmetric), concurrency and exclusivity (both
//! symmetric). Two nets with equal footprints are treated as behaviorally
//! equivalent.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

mod diff;
mod extractor;
mod scorer;

pub use diff::{CategoryDiff, FootprintDiff};
pub use extractor::FootprintExtractor;
pub use scorer::{CategoryScores, FootprintScorer, jaccard_similarity};

use crate::error::GraphError;
use crate::graph::ProcessGraph;

/// An ordered pair of activity names.
pub type Relation = (String, String);

/// The three relation categories a footprint tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    DirectSuccession,
    Concurrency,
    Exclusivity,
}

impl RelationKind {
    pub const ALL: [RelationKind; 3] = [
        RelationKind::DirectSuccession,
        RelationKind::Concurrency,
        RelationKind::Exclusivity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::DirectSuccession => "direct_succession",
            RelationKind::Concurrency => "concurrency",
            RelationKind::Exclusivity => "exclusivity",
        }
    }

    /// Whether inserting (A, B) implies (B, A).
    pub fn is_symmetric(&self) -> bool {
        !matches!(self, RelationKind::DirectSuccession)
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The behavioral footprint of a process net.
///
/// Footprints are values: they are produced fresh by [`FootprintExtractor`] or
/// a [`FootprintBuilder`] and never mutated afterwards. No category ever holds
/// a self-pair `(A, A)`, and the symmetric categories always hold both
/// directions of a pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "FootprintDocument", into = "FootprintDocument")]
pub struct BehavioralFootprint {
    direct_succession: BTreeSet<Relation>,
    concurrency: BTreeSet<Relation>,
    exclusivity: BTreeSet<Relation>,
}

impl BehavioralFootprint {
    pub fn builder() -> FootprintBuilder {
        FootprintBuilder::default()
    }

    pub fn relations(&self, kind: RelationKind) -> &BTreeSet<Relation> {
        match kind {
            RelationKind::DirectSuccession => &self.direct_succession,
            RelationKind::Concurrency => &self.concurrency,
            RelationKind::Exclusivity => &self.exclusivity,
        }
    }

    pub fn direct_succession(&self) -> &BTreeSet<Relation> {
        &self.direct_succession
    }

    pub fn concurrency(&self) -> &BTreeSet<Relation> {
        &self.concurrency
    }

    pub fn exclusivity(&self) -> &BTreeSet<Relation> {
        &self.exclusivity
    }

    pub fn contains(&self, kind: RelationKind, a: &str, b: &str) -> bool {
        self.relations(kind)
            .contains(&(a.to_string(), b.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        RelationKind::ALL
            .iter()
            .all(|kind| self.relations(*kind).is_empty())
    }

    pub fn counts(&self) -> RelationCounts {
        RelationCounts {
            direct_succession: self.direct_succession.len(),
            concurrency: self.concurrency.len(),
            exclusivity: self.exclusivity.len(),
        }
    }
}

/// Per-category relation counts, reported alongside validation results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationCounts {
    pub direct_succession: usize,
    pub concurrency: usize,
    pub exclusivity: usize,
}

/// Accumulates relations and enforces the footprint invariants on insert.
#[derive(Debug, Default)]
pub struct FootprintBuilder {
    footprint: BehavioralFootprint,
}

impl FootprintBuilder {
    /// Records that `a` immediately precedes `b`.
    pub fn succession(mut self, a: &str, b: &str) -> Self {
        self.insert(RelationKind::DirectSuccession, a, b);
        self
    }

    /// Records that `a` and `b` may run in parallel, in both directions.
    pub fn concurrent(mut self, a: &str, b: &str) -> Self {
        self.insert(RelationKind::Concurrency, a, b);
        self
    }

    /// Records that `a` and `b` exclude each other, in both directions.
    pub fn exclusive(mut self, a: &str, b: &str) -> Self {
        self.insert(RelationKind::Exclusivity, a, b);
        self
    }

    pub(crate) fn insert(&mut self, kind: RelationKind, a: &str, b: &str) {
        if a == b {
            return;
        }
        let set = match kind {
            RelationKind::DirectSuccession => &mut self.footprint.direct_succession,
            RelationKind::Concurrency => &mut self.footprint.concurrency,
            RelationKind::Exclusivity => &mut self.footprint.exclusivity,
        };
        set.insert((a.to_string(), b.to_string()));
        if kind.is_symmetric() {
            set.insert((b.to_string(), a.to_string()));
        }
    }

    pub fn build(self) -> BehavioralFootprint {
        self.footprint
    }
}

// --- Serialized shape ---
// Each category is a list of `[a, b, true]` triples.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct FootprintDocument {
    #[serde(default)]
    direct_succession: Vec<Vec<serde_json::Value>>,
    #[serde(default)]
    concurrency: Vec<Vec<serde_json::Value>>,
    #[serde(default)]
    exclusivity: Vec<Vec<serde_json::Value>>,
}

impl From<FootprintDocument> for BehavioralFootprint {
    fn from(doc: FootprintDocument) -> Self {
        let mut builder = FootprintBuilder::default();
        let categories = [
            (RelationKind::DirectSuccession, doc.direct_succession),
            (RelationKind::Concurrency, doc.concurrency),
            (RelationKind::Exclusivity, doc.exclusivity),
        ];
        for (kind, entries) in categories {
            for entry in entries {
                if entry.len() < 3 {
                    continue;
                }
                let (Some(a), Some(b)) = (entry[0].as_str(), entry[1].as_str()) else {
                    continue;
                };
                if entry[2].as_bool().unwrap_or(false) {
                    builder.insert(kind, a, b);
                }
            }
        }
        builder.build()
    }
}

impl From<BehavioralFootprint> for FootprintDocument {
    fn from(footprint: BehavioralFootprint) -> Self {
        let triples = |set: BTreeSet<Relation>| -> Vec<Vec<serde_json::Value>> {
            set.into_iter()
                .map(|(a, b)| vec![a.into(), b.into(), true.into()])
                .collect()
        };
        Self {
            direct_succession: triples(footprint.direct_succession),
            concurrency: triples(footprint.concurrency),
            exclusivity: triples(footprint.exclusivity),
        }
    }
}

/// Parses two workflow documents, extracts their footprints and scores them.
pub fn score_footprint_agreement(
    reference: &serde_json::Value,
    generated: &serde_json::Value,
) -> Result<f64, GraphError> {
    let reference = FootprintExtractor::extract(&ProcessGraph::from_value(reference)?);
    let generated = FootprintExtractor::extract(&ProcessGraph::from_value(generated)?);
    Ok(FootprintScorer::score(&reference, &generated))
}
