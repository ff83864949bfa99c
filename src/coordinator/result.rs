use crate::config::{AutoMode, OptimizationTarget};
use crate::objective::PerformanceMetrics;
use crate::transformer::StrategyTier;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// What happened in one optimization attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HistoryEvent {
    /// A strategy ran and returned a program.
    StrategyRun {
        strategy: String,
        tier: StrategyTier,
        auto_mode: AutoMode,
        max_rounds: u32,
        examples_used: usize,
    },
    /// No strategy could produce a program; the original was kept.
    Fallback {
        strategy: String,
        tier: StrategyTier,
        examples_used: usize,
        error: String,
        fallback: String,
    },
}

/// A timestamped entry of a coordinator's optimization history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub event: HistoryEvent,
    #[serde(with = "crate::time::iso8601")]
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn now(event: HistoryEvent) -> Self {
        Self {
            event,
            timestamp: Utc::now(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.event, HistoryEvent::Fallback { .. })
    }
}

/// The outcome of one `optimize` call.
///
/// `score` is always within [0, 1]. A failed run is only distinguishable from
/// a run that found no improvement through its history: the last entry is a
/// [`HistoryEvent::Fallback`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationResult {
    pub target: OptimizationTarget,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footprint_agreement: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance_metrics: Option<PerformanceMetrics>,
    pub optimization_history: Vec<HistoryEntry>,
    #[serde(with = "crate::time::iso8601")]
    pub timestamp: DateTime<Utc>,
}

impl OptimizationResult {
    /// Whether the run ended by keeping the original program.
    pub fn fell_back(&self) -> bool {
        self.optimization_history
            .last()
            .is_some_and(HistoryEntry::is_fallback)
    }

    /// JSON form for reporting outside this crate.
    pub fn to_dict(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}
