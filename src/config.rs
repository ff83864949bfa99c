use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::warn;

/// What the composite score rewards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizationTarget {
    /// Footprint agreement only.
    Behavioral,
    /// Execution time and resource utilization only.
    Performance,
    /// Weighted blend of both.
    Balanced,
}

impl OptimizationTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptimizationTarget::Behavioral => "behavioral",
            OptimizationTarget::Performance => "performance",
            OptimizationTarget::Balanced => "balanced",
        }
    }
}

impl FromStr for OptimizationTarget {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "behavioral" => Ok(OptimizationTarget::Behavioral),
            "performance" => Ok(OptimizationTarget::Performance),
            "balanced" => Ok(OptimizationTarget::Balanced),
            _ => Err(ConfigurationError::InvalidTarget(s.to_string())),
        }
    }
}

impl fmt::Display for OptimizationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Search budget hint forwarded to the program transformer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoMode {
    Light,
    Medium,
    Heavy,
    /// Budget is taken from the explicit counts in `OptimizationConfig`.
    Custom,
}

impl AutoMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AutoMode::Light => "light",
            AutoMode::Medium => "medium",
            AutoMode::Heavy => "heavy",
            AutoMode::Custom => "custom",
        }
    }
}

impl FromStr for AutoMode {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(AutoMode::Light),
            "medium" => Ok(AutoMode::Medium),
            "heavy" => Ok(AutoMode::Heavy),
            "custom" => Ok(AutoMode::Custom),
            _ => Err(ConfigurationError::InvalidAutoMode(s.to_string())),
        }
    }
}

impl fmt::Display for AutoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings for one optimization run. Loaded once, then only read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationConfig {
    pub target: OptimizationTarget,
    pub auto_mode: AutoMode,
    pub max_rounds: u32,
    pub max_bootstrapped_demos: usize,
    /// Upper bound on the examples handed to the transformer.
    pub max_labeled_demos: usize,
    pub num_candidate_programs: usize,
    /// Parallelism hint for the transformer's own search; unused here.
    pub num_threads: usize,
    /// By convention `weight_behavioral + weight_performance == 1.0`.
    pub weight_behavioral: f64,
    pub weight_performance: f64,
    /// Agreement at or above this value counts as a perfect generation.
    pub footprint_agreement_threshold: f64,
    /// Minimum relative speed-up a transformer should treat as an improvement.
    /// Forwarded to transformers with the rest of the config; unused here.
    pub performance_improvement_threshold: f64,
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            target: OptimizationTarget::Balanced,
            auto_mode: AutoMode::Medium,
            max_rounds: 3,
            max_bootstrapped_demos: 4,
            max_labeled_demos: 16,
            num_candidate_programs: 10,
            num_threads: 4,
            weight_behavioral: 0.7,
            weight_performance: 0.3,
            footprint_agreement_threshold: 1.0,
            performance_improvement_threshold: 0.1,
        }
    }
}

impl OptimizationConfig {
    pub fn new(target: OptimizationTarget, auto_mode: AutoMode) -> Self {
        Self {
            target,
            auto_mode,
            ..Self::default()
        }
    }

    /// Builds a default config from string-typed target and auto mode names.
    pub fn from_names(target: &str, auto_mode: &str) -> Result<Self, ConfigurationError> {
        Ok(Self::new(target.parse()?, auto_mode.parse()?))
    }

    pub fn with_weights(mut self, behavioral: f64, performance: f64) -> Self {
        self.weight_behavioral = behavioral;
        self.weight_performance = performance;
        self
    }

    pub fn with_footprint_threshold(mut self, threshold: f64) -> Self {
        self.footprint_agreement_threshold = threshold;
        self
    }

    /// Loads the `[optimization]` table of a TOML file.
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigurationError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigurationError> {
        let document: TomlDocument =
            toml::from_str(content).map_err(|e| ConfigurationError::Parse(e.to_string()))?;
        let section = document.optimization;
        let defaults = Self::default();

        let config = Self {
            target: match section.target {
                Some(name) => name.parse()?,
                None => defaults.target,
            },
            auto_mode: match section.auto_mode {
                Some(name) => name.parse()?,
                None => defaults.auto_mode,
            },
            max_rounds: section.max_rounds.unwrap_or(defaults.max_rounds),
            max_bootstrapped_demos: section
                .max_bootstrapped_demos
                .unwrap_or(defaults.max_bootstrapped_demos),
            max_labeled_demos: section
                .max_labeled_demos
                .unwrap_or(defaults.max_labeled_demos),
            num_candidate_programs: section
                .num_candidate_programs
                .unwrap_or(defaults.num_candidate_programs),
            num_threads: section.num_threads.unwrap_or(defaults.num_threads),
            weight_behavioral: section
                .weight_behavioral
                .unwrap_or(defaults.weight_behavioral),
            weight_performance: section
                .weight_performance
                .unwrap_or(defaults.weight_performance),
            footprint_agreement_threshold: section
                .footprint_agreement_threshold
                .unwrap_or(defaults.footprint_agreement_threshold),
            performance_improvement_threshold: section
                .performance_improvement_threshold
                .unwrap_or(defaults.performance_improvement_threshold),
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects values no run could use. Weight sums other than 1.0 are only logged.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let unit_interval = [
            (
                "footprint_agreement_threshold",
                self.footprint_agreement_threshold,
            ),
            (
                "performance_improvement_threshold",
                self.performance_improvement_threshold,
            ),
        ];
        for (field, value) in unit_interval {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigurationError::OutOfRange {
                    field,
                    value: value.to_string(),
                });
            }
        }

        let weights = [
            ("weight_behavioral", self.weight_behavioral),
            ("weight_performance", self.weight_performance),
        ];
        for (field, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigurationError::OutOfRange {
                    field,
                    value: value.to_string(),
                });
            }
        }

        if self.num_threads == 0 {
            return Err(ConfigurationError::OutOfRange {
                field: "num_threads",
                value: "0".to_string(),
            });
        }

        let weight_sum = self.weight_behavioral + self.weight_performance;
        if (weight_sum - 1.0).abs() > 1e-9 {
            warn!(
                weight_behavioral = self.weight_behavioral,
                weight_performance = self.weight_performance,
                "Objective weights do not sum to 1.0"
            );
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Default)]
struct TomlDocument {
    #[serde(default)]
    optimization: OptimizationSection,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OptimizationSection {
    target: Option<String>,
    auto_mode: Option<String>,
    max_rounds: Option<u32>,
    max_bootstrapped_demos: Option<usize>,
    max_labeled_demos: Option<usize>,
    num_candidate_programs: Option<usize>,
    num_threads: Option<usize>,
    weight_behavioral: Option<f64>,
    weight_performance: Option<f64>,
    footprint_agreement_threshold: Option<f64>,
    performance_improvement_threshold: Option<f64>,
}
