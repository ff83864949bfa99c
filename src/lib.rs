//! # Kensho - Behavioral Verification and Optimization Coordination
//!
//! **Kensho** checks whether a generated process model behaves like a
//! reference model, and coordinates automatic improvement of the programs
//! that generate such models.
//!
//! ## Core Workflow
//!
//! 1.  **Describe the net**: Parse a workflow document with `ProcessGraph::from_json`, or
//!     implement `IntoProcessGraph` for your own format.
//! 2.  **Extract footprints**: `FootprintExtractor::extract` reduces a net to its direct
//!     succession, concurrency and exclusivity relations.
//! 3.  **Score**: `FootprintScorer::score` compares two footprints (Jaccard per relation
//!     category, averaged), and `ObjectiveScorer::score` blends that agreement with
//!     performance measurements according to the configured `OptimizationTarget`.
//! 4.  **Optimize**: An `OptimizationCoordinator` converts training records, builds the
//!     target metric and hands both to a pluggable `ProgramTransformer`, falling back from
//!     the primary to the secondary strategy and finally to the original program.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kensho::prelude::*;
//! use kensho::error::TransformerError;
//! use serde_json::json;
//!
//! // 1. Wrap your optimizer behind the transformer interface.
//! struct DemoAppender;
//!
//! impl ProgramTransformer for DemoAppender {
//!     fn name(&self) -> &str {
//!         "demo-appender"
//!     }
//!
//!     fn probe(&self) -> Availability {
//!         Availability::Available
//!     }
//!
//!     fn optimize(
//!         &self,
//!         program: &Program,
//!         examples: &[Example],
//!         _metric: &dyn Metric,
//!         _config: &OptimizationConfig,
//!     ) -> std::result::Result<TransformOutcome, TransformerError> {
//!         let mut improved = program.clone();
//!         for predictor in improved.predictors.values_mut() {
//!             predictor.demos.extend(examples.iter().map(|e| json!({ "input": e.input })));
//!         }
//!         Ok(TransformOutcome::new(improved))
//!     }
//! }
//!
//! fn main() -> Result<()> {
//!     // 2. Create a coordinator; unknown target or mode names fail here.
//!     let mut coordinator = create_coordinator("behavioral", "medium")?
//!         .with_strategies(StrategyChain::new().with_primary(Box::new(DemoAppender)));
//!
//!     let program = Program::new("powl-generator", "1.0")
//!         .with_predictor("generate", Predictor::new("Generate a POWL model"));
//!
//!     let training: Vec<TrainingRecord> = vec![
//!         json!({
//!             "input": "Review then approve",
//!             "output": { "net": { "flows": [], "transitions": [] } }
//!         })
//!         .into(),
//!         json!("not a record").into(), // skipped with a warning
//!     ];
//!
//!     // 3. Optimize. This never fails; inspect the history to see what happened.
//!     let validation = ValidationMetrics { footprint_agreement: Some(1.0), ..Default::default() };
//!     let (optimized, result) = coordinator.optimize(program, &training, Some(&validation));
//!
//!     println!("score = {:.3}, fell back: {}", result.score, result.fell_back());
//!     println!("{}", result.to_dict());
//!     println!("demos attached: {}", optimized.demo_count());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod confidence;
pub mod coordinator;
pub mod error;
pub mod footprint;
pub mod graph;
pub mod logging;
pub mod objective;
pub mod prelude;
pub mod program;
pub mod time;
pub mod transformer;
