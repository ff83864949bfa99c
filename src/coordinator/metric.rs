use crate::config::{OptimizationConfig, OptimizationTarget};
use crate::footprint::{FootprintExtractor, FootprintScorer};
use crate::graph::ProcessGraph;
use crate::objective::ObjectiveScorer;
use crate::transformer::{Example, Metric, Prediction};

/// The scalar metric handed to transformers, fixed to the configured target.
pub struct TargetMetric<'a> {
    config: &'a OptimizationConfig,
}

impl<'a> TargetMetric<'a> {
    pub fn new(config: &'a OptimizationConfig) -> Self {
        Self { config }
    }
}

impl Metric for TargetMetric<'_> {
    fn evaluate(&self, example: &Example, prediction: &Prediction) -> f64 {
        let agreement = match self.config.target {
            OptimizationTarget::Performance => None,
            OptimizationTarget::Behavioral | OptimizationTarget::Balanced => {
                Some(behavioral_agreement(example, prediction))
            }
        };
        ObjectiveScorer::score(agreement, prediction.performance.as_ref(), self.config)
    }
}

/// Footprint agreement between the example's expected net and the predicted one.
///
/// Anything that cannot be read as a process graph scores 0.
pub fn behavioral_agreement(example: &Example, prediction: &Prediction) -> f64 {
    let Some(generated) = &prediction.workflow else {
        return 0.0;
    };
    let (Ok(reference), Ok(generated)) = (
        ProcessGraph::from_value(&example.output),
        ProcessGraph::from_value(generated),
    ) else {
        return 0.0;
    };
    FootprintScorer::score(
        &FootprintExtractor::extract(&reference),
        &FootprintExtractor::extract(&generated),
    )
}
