use crate::confidence::confidence_from_value;
use crate::footprint::{
    BehavioralFootprint, CategoryScores, FootprintDiff, FootprintExtractor, FootprintScorer,
    RelationCounts,
};
use crate::graph::ProcessGraph;
use crate::objective::{PerformanceMetrics, clamp_unit};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Measurements of the optimized program, supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationMetrics {
    pub footprint_agreement: Option<f64>,
    /// Reference and generated workflows, used when no agreement is given.
    pub reference_workflow: Option<serde_json::Value>,
    pub generated_workflow: Option<serde_json::Value>,
    pub performance_metrics: Option<PerformanceMetrics>,
}

impl ValidationMetrics {
    /// Reads validation metrics from JSON, ignoring any part that does not fit.
    ///
    /// `footprint_agreement` may be a number or text such as `"85%"`.
    pub fn from_value(value: &serde_json::Value) -> Self {
        let field = |key: &str| value.get(key).filter(|v| !v.is_null()).cloned();
        Self {
            footprint_agreement: value
                .get("footprint_agreement")
                .and_then(confidence_from_value),
            reference_workflow: field("reference_workflow"),
            generated_workflow: field("generated_workflow"),
            performance_metrics: field("performance_metrics")
                .and_then(|v| serde_json::from_value(v).ok()),
        }
    }

    /// The agreement to report: the given value, or one computed from the workflows.
    pub fn resolve_agreement(&self) -> Option<f64> {
        if let Some(agreement) = self.footprint_agreement {
            return Some(clamp_unit(agreement));
        }
        let (reference, generated) = (
            self.reference_workflow.as_ref()?,
            self.generated_workflow.as_ref()?,
        );
        match (
            ProcessGraph::from_value(reference),
            ProcessGraph::from_value(generated),
        ) {
            (Ok(reference), Ok(generated)) => Some(FootprintScorer::score(
                &FootprintExtractor::extract(&reference),
                &FootprintExtractor::extract(&generated),
            )),
            (Err(e), _) | (_, Err(e)) => {
                warn!(error = %e, "Could not read validation workflows");
                None
            }
        }
    }
}

/// Details returned by `validate_perfect_generation`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationDetails {
    pub footprint_agreement: f64,
    pub is_perfect: bool,
    pub threshold: f64,
    pub category_scores: CategoryScores,
    pub reference_relations: RelationCounts,
    pub generated_relations: RelationCounts,
    pub diff: FootprintDiff,
}

impl ValidationDetails {
    pub(crate) fn compare(
        reference: &BehavioralFootprint,
        generated: &BehavioralFootprint,
        threshold: f64,
    ) -> Self {
        let category_scores = FootprintScorer::category_scores(reference, generated);
        let footprint_agreement = category_scores.mean();
        Self {
            footprint_agreement,
            is_perfect: footprint_agreement >= threshold,
            threshold,
            category_scores,
            reference_relations: reference.counts(),
            generated_relations: generated.counts(),
            diff: FootprintDiff::between(reference, generated),
        }
    }
}
