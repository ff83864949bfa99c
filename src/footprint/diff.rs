use super::{BehavioralFootprint, Relation, RelationKind};
use serde::Serialize;
use std::fmt;

/// Relations that differ between two footprints within one category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryDiff {
    /// Present in the reference, absent from the generated footprint.
    pub missing: Vec<Relation>,
    /// Present in the generated footprint, absent from the reference.
    pub extra: Vec<Relation>,
}

impl CategoryDiff {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

/// A per-category listing of relation differences, for regression diffing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FootprintDiff {
    pub direct_succession: CategoryDiff,
    pub concurrency: CategoryDiff,
    pub exclusivity: CategoryDiff,
}

impl FootprintDiff {
    pub fn between(reference: &BehavioralFootprint, generated: &BehavioralFootprint) -> Self {
        let diff = |kind| {
            let expected = reference.relations(kind);
            let actual = generated.relations(kind);
            CategoryDiff {
                missing: expected.difference(actual).cloned().collect(),
                extra: actual.difference(expected).cloned().collect(),
            }
        };
        Self {
            direct_succession: diff(RelationKind::DirectSuccession),
            concurrency: diff(RelationKind::Concurrency),
            exclusivity: diff(RelationKind::Exclusivity),
        }
    }

    pub fn category(&self, kind: RelationKind) -> &CategoryDiff {
        match kind {
            RelationKind::DirectSuccession => &self.direct_succession,
            RelationKind::Concurrency => &self.concurrency,
            RelationKind::Exclusivity => &self.exclusivity,
        }
    }

    pub fn is_empty(&self) -> bool {
        RelationKind::ALL
            .iter()
            .all(|kind| self.category(*kind).is_empty())
    }
}

impl fmt::Display for FootprintDiff {
    /// One line per differing category, e.g. `concurrency: -(B, C) +(B, D)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("no differences");
        }
        let mut first = true;
        for kind in RelationKind::ALL {
            let category = self.category(kind);
            if category.is_empty() {
                continue;
            }
            if !first {
                writeln!(f)?;
            }
            first = false;
            write!(f, "{}:", kind)?;
            for (a, b) in &category.missing {
                write!(f, " -({}, {})", a, b)?;
            }
            for (a, b) in &category.extra {
                write!(f, " +({}, {})", a, b)?;
            }
        }
        Ok(())
    }
}
