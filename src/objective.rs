use crate::config::{OptimizationConfig, OptimizationTarget};
use serde::{Deserialize, Serialize};

/// Score used for the performance component when no measurements exist.
pub const NEUTRAL_PERFORMANCE_SCORE: f64 = 0.5;

/// Execution measurements supplied by an external collector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceMetrics {
    pub avg_execution_time_ms: f64,
    pub p99_execution_time_ms: f64,
    /// Fraction of available resources in use, 0..=1.
    pub resource_utilization: f64,
    pub throughput_tasks_per_sec: f64,
    pub memory_peak_mb: f64,
}

impl PerformanceMetrics {
    /// `max(0, 1 - avg_ms / 1000)`: one second or slower scores zero.
    pub fn time_score(&self) -> f64 {
        (1.0 - self.avg_execution_time_ms / 1000.0).max(0.0)
    }
}

/// Blends footprint agreement and performance into one scalar per target.
pub struct ObjectiveScorer;

impl ObjectiveScorer {
    /// Computes the composite score in [0, 1].
    ///
    /// Missing inputs degrade instead of failing: an absent agreement counts
    /// as 0, absent metrics give the neutral score under `Performance` and no
    /// performance contribution under `Balanced`.
    pub fn score(
        footprint_agreement: Option<f64>,
        performance: Option<&PerformanceMetrics>,
        config: &OptimizationConfig,
    ) -> f64 {
        let agreement = footprint_agreement.unwrap_or(0.0);
        let composite = match config.target {
            OptimizationTarget::Behavioral => agreement,
            OptimizationTarget::Performance => match performance {
                Some(metrics) => (metrics.time_score() + metrics.resource_utilization) / 2.0,
                None => NEUTRAL_PERFORMANCE_SCORE,
            },
            OptimizationTarget::Balanced => match performance {
                Some(metrics) => {
                    config.weight_behavioral * agreement
                        + config.weight_performance * metrics.time_score()
                }
                None => agreement * config.weight_behavioral,
            },
        };
        clamp_unit(composite)
    }
}

/// Clamps to [0, 1], mapping NaN to 0.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
