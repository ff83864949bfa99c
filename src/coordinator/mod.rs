//! Drives one optimization attempt end to end.
//!
//! A run walks `Init -> Convert -> BuildMetric -> Transform -> Score -> Done`.
//! `Transform` may divert into `Fallback`, which ends the run with the
//! original program and a zero score. Nothing inside a run is allowed to
//! escape as an error; only configuration problems are reported, and those
//! before any run starts.

use crate::config::{AutoMode, OptimizationConfig, OptimizationTarget};
use crate::error::{ConfigurationError, TransformerError};
use crate::footprint::{BehavioralFootprint, FootprintExtractor, FootprintScorer};
use crate::graph::ProcessGraph;
use crate::objective::{ObjectiveScorer, clamp_unit};
use crate::program::Program;
use crate::transformer::{
    Example, IDENTITY_STRATEGY, Metric, Strategy, StrategyChain, TransformOutcome, panic_message,
};
use chrono::Utc;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;
use tracing::{debug, error, info, warn};

mod metric;
mod result;
mod training;
mod validation;

pub use metric::{TargetMetric, behavioral_agreement};
pub use result::{HistoryEntry, HistoryEvent, OptimizationResult};
pub use training::{TrainingRecord, convert_records};
pub use validation::{ValidationDetails, ValidationMetrics};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Convert,
    BuildMetric,
    Transform,
    Fallback,
    Score,
    Done,
}

/// Coordinates footprint scoring, objective scoring and an external
/// program transformer.
///
/// `optimize` takes `&mut self` because every run appends to the
/// coordinator's history. Share one coordinator across threads only behind a
/// lock, or give each task its own.
pub struct OptimizationCoordinator {
    config: OptimizationConfig,
    strategies: StrategyChain,
    history: Vec<HistoryEntry>,
    results: Vec<OptimizationResult>,
}

impl OptimizationCoordinator {
    /// Validates `config` and builds a coordinator without any strategies.
    pub fn new(config: OptimizationConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self {
            config,
            strategies: StrategyChain::new(),
            history: Vec::new(),
            results: Vec::new(),
        })
    }

    pub fn with_strategies(mut self, strategies: StrategyChain) -> Self {
        self.strategies = strategies;
        self
    }

    pub fn config(&self) -> &OptimizationConfig {
        &self.config
    }

    /// Every history entry recorded by this coordinator, oldest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Every result this coordinator has produced, oldest first.
    pub fn results(&self) -> &[OptimizationResult] {
        &self.results
    }

    /// Runs one optimization attempt.
    ///
    /// Always returns a program and a result: on any transformer failure the
    /// original `program` comes back with a score of 0.0 and a
    /// [`HistoryEvent::Fallback`] entry.
    ///
    /// # Arguments
    ///
    /// * `program`: The program to improve.
    /// * `training_data`: Raw or canonical training records. Malformed records are skipped.
    /// * `validation`: Optional measurements of the result. When present they,
    ///   rather than the transformer's own score, determine the final score.
    pub fn optimize(
        &mut self,
        program: Program,
        training_data: &[TrainingRecord],
        validation: Option<&ValidationMetrics>,
    ) -> (Program, OptimizationResult) {
        let started = Instant::now();
        info!(
            optimization_target = %self.config.target,
            auto_mode = %self.config.auto_mode,
            records = training_data.len(),
            "Starting optimization"
        );

        debug!(stage = ?Stage::Convert, "Converting training records");
        let examples = convert_records(training_data);
        let examples_used = examples.len().min(self.config.max_labeled_demos);
        let trainset = &examples[..examples_used];

        debug!(stage = ?Stage::BuildMetric, "Building target metric");
        let metric = TargetMetric::new(&self.config);

        debug!(stage = ?Stage::Transform, examples = examples_used, "Selecting strategy");
        let strategy = self.strategies.select();
        let tier = strategy.tier();
        let strategy_name = strategy.name().to_string();

        match Self::transform(&strategy, &program, trainset, &metric, &self.config) {
            Ok(outcome) => {
                self.history.push(HistoryEntry::now(HistoryEvent::StrategyRun {
                    strategy: strategy_name,
                    tier,
                    auto_mode: self.config.auto_mode,
                    max_rounds: self.config.max_rounds,
                    examples_used,
                }));

                debug!(stage = ?Stage::Score, "Scoring result");
                let result = self.score(outcome.reported_score, validation);

                info!(
                    score = result.score,
                    footprint_agreement = ?result.footprint_agreement,
                    elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
                    stage = ?Stage::Done,
                    "Optimization completed"
                );
                self.results.push(result.clone());
                (outcome.program, result)
            }
            Err(e) => {
                error!(
                    error = %e,
                    stage = ?Stage::Fallback,
                    "Optimization failed, keeping original program"
                );
                self.history.push(HistoryEntry::now(HistoryEvent::Fallback {
                    strategy: strategy_name,
                    tier,
                    examples_used,
                    error: e.to_string(),
                    fallback: IDENTITY_STRATEGY.to_string(),
                }));

                let result = OptimizationResult {
                    target: self.config.target,
                    score: 0.0,
                    footprint_agreement: None,
                    performance_metrics: None,
                    optimization_history: self.history.clone(),
                    timestamp: Utc::now(),
                };
                self.results.push(result.clone());
                (program, result)
            }
        }
    }

    /// Runs the selected strategy, turning unavailability, errors and panics
    /// into a `TransformerError`.
    fn transform(
        strategy: &Strategy<'_>,
        program: &Program,
        examples: &[Example],
        metric: &dyn Metric,
        config: &OptimizationConfig,
    ) -> Result<TransformOutcome, TransformerError> {
        let transformer = match strategy {
            Strategy::Primary(t) => *t,
            Strategy::Secondary(t) => {
                warn!(strategy = t.name(), "Using secondary strategy");
                *t
            }
            Strategy::IdentityFallback { reason } => {
                return Err(TransformerError::Unavailable {
                    strategy: IDENTITY_STRATEGY.to_string(),
                    reason: reason.clone(),
                });
            }
        };

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            transformer.optimize(program, examples, metric, config)
        }));
        match outcome {
            Ok(result) => result,
            Err(payload) => Err(TransformerError::Execution {
                strategy: transformer.name().to_string(),
                message: panic_message(payload.as_ref()),
            }),
        }
    }

    /// Builds the result of a successful run.
    fn score(
        &self,
        reported_score: Option<f64>,
        validation: Option<&ValidationMetrics>,
    ) -> OptimizationResult {
        let (score, footprint_agreement, performance_metrics) = match validation {
            Some(metrics) => {
                let agreement = metrics.resolve_agreement();
                let performance = metrics.performance_metrics;
                let score = ObjectiveScorer::score(agreement, performance.as_ref(), &self.config);
                (score, agreement, performance)
            }
            None => {
                let score = match reported_score {
                    Some(reported) => clamp_unit(reported),
                    None => ObjectiveScorer::score(None, None, &self.config),
                };
                (score, None, None)
            }
        };

        OptimizationResult {
            target: self.config.target,
            score,
            footprint_agreement,
            performance_metrics,
            optimization_history: self.history.clone(),
            timestamp: Utc::now(),
        }
    }

    /// Checks whether `generated` reproduces the behavior of `reference`.
    ///
    /// Perfect means footprint agreement at or above the configured threshold;
    /// with the default threshold of 1.0 all three relation sets must be equal.
    pub fn validate_perfect_generation(
        &self,
        generated: &ProcessGraph,
        reference: &ProcessGraph,
    ) -> (bool, ValidationDetails) {
        let reference = FootprintExtractor::extract(reference);
        let generated = FootprintExtractor::extract(generated);
        let details = ValidationDetails::compare(
            &reference,
            &generated,
            self.config.footprint_agreement_threshold,
        );
        if !details.is_perfect {
            debug!(
                agreement = details.footprint_agreement,
                diff = %details.diff,
                "Generation is not perfect"
            );
        }
        (details.is_perfect, details)
    }

    /// Pass-through to [`FootprintExtractor::extract`].
    pub fn extract_footprint(&self, graph: &ProcessGraph) -> BehavioralFootprint {
        FootprintExtractor::extract(graph)
    }

    /// Pass-through to [`FootprintScorer::score`].
    pub fn score_footprint(
        &self,
        reference: &BehavioralFootprint,
        generated: &BehavioralFootprint,
    ) -> f64 {
        FootprintScorer::score(reference, generated)
    }
}

/// Creates a coordinator from string-typed target and auto mode names.
///
/// Fails fast on unknown names. Strategies are attached with
/// [`OptimizationCoordinator::with_strategies`].
pub fn create_coordinator(
    target: &str,
    auto_mode: &str,
) -> Result<OptimizationCoordinator, ConfigurationError> {
    OptimizationCoordinator::new(OptimizationConfig::from_names(target, auto_mode)?)
}

/// One-shot optimization with a fresh coordinator and default settings.
pub fn optimize_program(
    program: Program,
    training_data: &[TrainingRecord],
    target: OptimizationTarget,
    strategies: StrategyChain,
) -> Result<(Program, OptimizationResult), ConfigurationError> {
    let mut coordinator =
        OptimizationCoordinator::new(OptimizationConfig::new(target, AutoMode::Medium))?
            .with_strategies(strategies);
    Ok(coordinator.optimize(program, training_data, None))
}
