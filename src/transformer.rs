//! The pluggable program-improvement seam.
//!
//! The actual search over program space lives outside this crate. A
//! strategy implements [`ProgramTransformer`]; the coordinator picks one from
//! a [`StrategyChain`] by probing availability, never by failing a call.

use crate::config::OptimizationConfig;
use crate::confidence::{confidence_from_value, parse_confidence};
use crate::error::TransformerError;
use crate::objective::{PerformanceMetrics, clamp_unit};
use crate::program::Program;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// A canonical training pair: a workflow description and the expected net.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub input: String,
    pub output: serde_json::Value,
}

impl Example {
    pub fn new(input: &str, output: serde_json::Value) -> Self {
        Self {
            input: input.to_string(),
            output,
        }
    }
}

/// What a candidate program produced for one example.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Prediction {
    /// The generated workflow document, if the candidate produced one.
    pub workflow: Option<serde_json::Value>,
    pub performance: Option<PerformanceMetrics>,
    pub confidence: Option<f64>,
}

impl Prediction {
    pub fn with_workflow(workflow: serde_json::Value) -> Self {
        Self {
            workflow: Some(workflow),
            ..Self::default()
        }
    }

    /// Reads a loosely-shaped prediction object.
    ///
    /// The workflow is taken from `powl_json` or `workflow`, either as an
    /// object or as a string holding JSON. Metrics come from `metrics` or
    /// `performance_metrics`; `inference_time_ms` stands in for
    /// `avg_execution_time_ms` when only that is reported. Unreadable parts
    /// are left empty.
    pub fn from_value(value: &serde_json::Value) -> Self {
        let workflow = ["powl_json", "workflow"]
            .iter()
            .find_map(|key| value.get(*key))
            .and_then(|raw| match raw {
                serde_json::Value::String(text) => serde_json::from_str(text).ok(),
                serde_json::Value::Object(_) => Some(raw.clone()),
                _ => None,
            });

        let performance = ["metrics", "performance_metrics"]
            .iter()
            .find_map(|key| value.get(*key))
            .and_then(|raw| {
                let mut metrics: PerformanceMetrics = serde_json::from_value(raw.clone()).ok()?;
                if raw.get("avg_execution_time_ms").is_none() {
                    if let Some(ms) = raw.get("inference_time_ms").and_then(|v| v.as_f64()) {
                        metrics.avg_execution_time_ms = ms;
                    }
                }
                Some(metrics)
            });

        let confidence = value.get("confidence").and_then(confidence_from_value);

        Self {
            workflow,
            performance,
            confidence,
        }
    }
}

/// Scores a prediction against the example it was made for. Higher is better.
pub trait Metric: Send + Sync {
    fn evaluate(&self, example: &Example, prediction: &Prediction) -> f64;
}

impl<F> Metric for F
where
    F: Fn(&Example, &Prediction) -> f64 + Send + Sync,
{
    fn evaluate(&self, example: &Example, prediction: &Prediction) -> f64 {
        self(example, prediction)
    }
}

/// Result of a capability probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Available,
    /// The strategy's dependency is missing; the reason is reported upstream.
    Unavailable(String),
}

impl Availability {
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available)
    }
}

/// An improved program plus whatever score the transformer assigned it.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformOutcome {
    pub program: Program,
    /// The transformer's own opinion of the result, in [0, 1]. Opaque to the coordinator.
    pub reported_score: Option<f64>,
}

impl TransformOutcome {
    pub fn new(program: Program) -> Self {
        Self {
            program,
            reported_score: None,
        }
    }

    pub fn with_reported_score(mut self, score: f64) -> Self {
        self.reported_score = Some(clamp_unit(score));
        self
    }

    /// Accepts scores reported as text, such as `"0.9"` or `"90%"`.
    pub fn with_reported_score_text(mut self, text: &str) -> Self {
        self.reported_score = parse_confidence(text);
        self
    }
}

/// An external strategy that tries to improve a program.
///
/// Implementations may parallelize internally using `config.num_threads`;
/// the coordinator calls them synchronously and waits for the result.
pub trait ProgramTransformer: Send + Sync {
    /// Name recorded in the optimization history.
    fn name(&self) -> &str;

    /// Reports whether the strategy can run at all. Must not fail.
    fn probe(&self) -> Availability;

    fn optimize(
        &self,
        program: &Program,
        examples: &[Example],
        metric: &dyn Metric,
        config: &OptimizationConfig,
    ) -> Result<TransformOutcome, TransformerError>;
}

/// Position of a strategy in the fallback order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyTier {
    Primary,
    Secondary,
    IdentityFallback,
}

impl fmt::Display for StrategyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrategyTier::Primary => "primary",
            StrategyTier::Secondary => "secondary",
            StrategyTier::IdentityFallback => "identity_fallback",
        };
        f.write_str(name)
    }
}

/// The strategy chosen for a run.
pub enum Strategy<'a> {
    Primary(&'a dyn ProgramTransformer),
    Secondary(&'a dyn ProgramTransformer),
    /// Nothing could run; the original program is kept.
    IdentityFallback { reason: String },
}

impl Strategy<'_> {
    pub fn tier(&self) -> StrategyTier {
        match self {
            Strategy::Primary(_) => StrategyTier::Primary,
            Strategy::Secondary(_) => StrategyTier::Secondary,
            Strategy::IdentityFallback { .. } => StrategyTier::IdentityFallback,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Strategy::Primary(t) | Strategy::Secondary(t) => t.name(),
            Strategy::IdentityFallback { .. } => IDENTITY_STRATEGY,
        }
    }
}

/// History name for runs that kept the original program.
pub const IDENTITY_STRATEGY: &str = "original_program";

/// Ordered primary/secondary strategies with an implicit identity fallback.
#[derive(Default)]
pub struct StrategyChain {
    primary: Option<Box<dyn ProgramTransformer>>,
    secondary: Option<Box<dyn ProgramTransformer>>,
}

impl StrategyChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_primary(mut self, transformer: Box<dyn ProgramTransformer>) -> Self {
        self.primary = Some(transformer);
        self
    }

    pub fn with_secondary(mut self, transformer: Box<dyn ProgramTransformer>) -> Self {
        self.secondary = Some(transformer);
        self
    }

    /// Probes the primary, then the secondary strategy, and returns the first available.
    ///
    /// A strategy whose check panics counts as unavailable, with the panic message
    /// as the reason.
    pub fn select(&self) -> Strategy<'_> {
        let mut reasons = Vec::new();

        if let Some(primary) = &self.primary {
            match availability_of(primary.as_ref()) {
                Availability::Available => return Strategy::Primary(primary.as_ref()),
                Availability::Unavailable(reason) => {
                    tracing::info!(
                        strategy = primary.name(),
                        %reason,
                        "Primary strategy unavailable, trying secondary"
                    );
                    reasons.push(format!("{}: {}", primary.name(), reason));
                }
            }
        }

        if let Some(secondary) = &self.secondary {
            match availability_of(secondary.as_ref()) {
                Availability::Available => return Strategy::Secondary(secondary.as_ref()),
                Availability::Unavailable(reason) => {
                    reasons.push(format!("{}: {}", secondary.name(), reason));
                }
            }
        }

        let reason = if reasons.is_empty() {
            "no strategy configured".to_string()
        } else {
            reasons.join("; ")
        };
        Strategy::IdentityFallback { reason }
    }
}

fn availability_of(transformer: &dyn ProgramTransformer) -> Availability {
    match panic::catch_unwind(AssertUnwindSafe(|| transformer.probe())) {
        Ok(availability) => availability,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::warn!(
                strategy = transformer.name(),
                %message,
                "Strategy availability check panicked"
            );
            Availability::Unavailable(format!("availability check panicked: {}", message))
        }
    }
}

/// Text of a panic payload raised with a string message.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "transformer panicked".to_string())
}
