//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the kensho crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use kensho::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let reference = ProcessGraph::from_json(&std::fs::read_to_string("path/to/reference.json")?)?;
//! let generated = ProcessGraph::from_json(&std::fs::read_to_string("path/to/generated.json")?)?;
//!
//! let coordinator = create_coordinator("behavioral", "light")?;
//! let (is_perfect, details) = coordinator.validate_perfect_generation(&generated, &reference);
//! println!("perfect: {} (agreement {:.3})", is_perfect, details.footprint_agreement);
//! # Ok(())
//! # }
//! ```

// Footprints and scoring
pub use crate::footprint::{
    BehavioralFootprint, FootprintDiff, FootprintExtractor, FootprintScorer, RelationKind,
};
pub use crate::graph::{IntoProcessGraph, ProcessGraph, SplitKind};
pub use crate::objective::{ObjectiveScorer, PerformanceMetrics};

// Configuration
pub use crate::config::{AutoMode, OptimizationConfig, OptimizationTarget};

// Coordination
pub use crate::coordinator::{
    OptimizationCoordinator, OptimizationResult, TrainingRecord, ValidationMetrics,
    create_coordinator,
};
pub use crate::program::{Predictor, Program, SavedProgram};
pub use crate::transformer::{
    Availability, Example, Metric, Prediction, ProgramTransformer, StrategyChain,
    TransformOutcome,
};

// Error types
pub use crate::error::{
    ConfigurationError, GraphError, SerializationError, TransformerError, ValidationError,
};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
