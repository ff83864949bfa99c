//! Common test utilities for building process graphs, programs and transformers.
use kensho::error::TransformerError;
use kensho::prelude::*;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

/// A(and) -> B(xor) -> C(and)
#[allow(dead_code)]
pub fn create_linear_chain() -> ProcessGraph {
    ProcessGraph::builder()
        .transition("t1", "A", SplitKind::And)
        .transition("t2", "B", SplitKind::Xor)
        .transition("t3", "C", SplitKind::And)
        .flow("t1", "t2")
        .flow("t2", "t3")
        .build()
}

/// A(and) -> {B, C} -> D
#[allow(dead_code)]
pub fn create_parallel_split() -> ProcessGraph {
    create_split(SplitKind::And)
}

/// A(xor) -> {B, C} -> D
#[allow(dead_code)]
pub fn create_exclusive_split() -> ProcessGraph {
    create_split(SplitKind::Xor)
}

/// A(<kind>) -> {B, C} -> D
#[allow(dead_code)]
pub fn create_split(kind: SplitKind) -> ProcessGraph {
    ProcessGraph::builder()
        .transition("t1", "A", kind)
        .transition("t2", "B", SplitKind::And)
        .transition("t3", "C", SplitKind::And)
        .transition("t4", "D", SplitKind::And)
        .flow("t1", "t2")
        .flow("t1", "t3")
        .flow("t2", "t4")
        .flow("t3", "t4")
        .build()
}

/// The linear chain in the workflow document JSON format.
#[allow(dead_code)]
pub fn linear_chain_json() -> Value {
    json!({
        "net": {
            "flows": [
                { "source": "t1", "target": "t2" },
                { "source": "t2", "target": "t3" }
            ],
            "transitions": [
                { "id": "t1", "name": "A", "splits": "and" },
                { "id": "t2", "name": "B", "splits": "xor" },
                { "id": "t3", "name": "C", "splits": "and" }
            ]
        }
    })
}

/// The exclusive split in the workflow document JSON format.
#[allow(dead_code)]
pub fn exclusive_split_json() -> Value {
    json!({
        "net": {
            "flows": [
                { "source": "t1", "target": "t2" },
                { "source": "t1", "target": "t3" }
            ],
            "transitions": [
                { "id": "t1", "name": "A", "splits": "xor" },
                { "id": "t2", "name": "B" },
                { "id": "t3", "name": "C" }
            ]
        }
    })
}

#[allow(dead_code)]
pub fn create_program() -> Program {
    Program::new("powl-generator", "1.0.0").with_predictor(
        "generate",
        Predictor::new("Translate the workflow description into a POWL net.")
            .with_fields(&["workflow_description"], &["powl_json"]),
    )
}

/// Two valid records in both key spellings.
#[allow(dead_code)]
pub fn create_training_records() -> Vec<TrainingRecord> {
    vec![
        json!({ "input": "Do A, then B, then C", "output": linear_chain_json() }).into(),
        json!({
            "workflow_description": "Do A, then either B or C",
            "expected_output": exclusive_split_json()
        })
        .into(),
    ]
}

/// Records of every malformed shape the coordinator must survive.
#[allow(dead_code)]
pub fn create_malformed_records() -> Vec<TrainingRecord> {
    vec![
        json!("just a string").into(),
        json!(42).into(),
        Value::Null.into(),
        json!([1, 2, 3]).into(),
        json!({ "output": {} }).into(),
        json!({ "input": "no output here" }).into(),
        json!({ "input": null, "output": {} }).into(),
    ]
}

/// Appends one demo per example to every predictor and reports a score.
#[allow(dead_code)]
pub struct DemoTransformer {
    pub name: &'static str,
    pub reported_score: Option<f64>,
}

impl ProgramTransformer for DemoTransformer {
    fn name(&self) -> &str {
        self.name
    }

    fn probe(&self) -> Availability {
        Availability::Available
    }

    fn optimize(
        &self,
        program: &Program,
        examples: &[Example],
        _metric: &dyn Metric,
        _config: &OptimizationConfig,
    ) -> std::result::Result<TransformOutcome, TransformerError> {
        let mut improved = program.clone();
        for predictor in improved.predictors.values_mut() {
            predictor
                .demos
                .extend(examples.iter().map(|e| json!({ "input": e.input, "output": e.output })));
        }
        let outcome = TransformOutcome::new(improved);
        Ok(match self.reported_score {
            Some(score) => outcome.with_reported_score(score),
            None => outcome,
        })
    }
}

/// A strategy whose dependency is missing.
#[allow(dead_code)]
pub struct UnavailableTransformer;

impl ProgramTransformer for UnavailableTransformer {
    fn name(&self) -> &str {
        "textual-evolution"
    }

    fn probe(&self) -> Availability {
        Availability::Unavailable("optimizer backend not installed".to_string())
    }

    fn optimize(
        &self,
        _program: &Program,
        _examples: &[Example],
        _metric: &dyn Metric,
        _config: &OptimizationConfig,
    ) -> std::result::Result<TransformOutcome, TransformerError> {
        panic!("an unavailable strategy must never be invoked");
    }
}

/// A strategy whose availability check itself panics.
#[allow(dead_code)]
pub struct PanickingAvailabilityTransformer;

impl ProgramTransformer for PanickingAvailabilityTransformer {
    fn name(&self) -> &str {
        "import-checked"
    }

    fn probe(&self) -> Availability {
        panic!("import check exploded");
    }

    fn optimize(
        &self,
        _program: &Program,
        _examples: &[Example],
        _metric: &dyn Metric,
        _config: &OptimizationConfig,
    ) -> std::result::Result<TransformOutcome, TransformerError> {
        panic!("a strategy whose availability check failed must never be invoked");
    }
}

/// A strategy that is available but fails while running.
#[allow(dead_code)]
pub struct FailingTransformer;

impl ProgramTransformer for FailingTransformer {
    fn name(&self) -> &str {
        "flaky"
    }

    fn probe(&self) -> Availability {
        Availability::Available
    }

    fn optimize(
        &self,
        _program: &Program,
        _examples: &[Example],
        _metric: &dyn Metric,
        _config: &OptimizationConfig,
    ) -> std::result::Result<TransformOutcome, TransformerError> {
        Err(TransformerError::Execution {
            strategy: "flaky".to_string(),
            message: "language model quota exhausted".to_string(),
        })
    }
}

/// A strategy that panics while running.
#[allow(dead_code)]
pub struct PanickingTransformer;

impl ProgramTransformer for PanickingTransformer {
    fn name(&self) -> &str {
        "panicky"
    }

    fn probe(&self) -> Availability {
        Availability::Available
    }

    fn optimize(
        &self,
        _program: &Program,
        _examples: &[Example],
        _metric: &dyn Metric,
        _config: &OptimizationConfig,
    ) -> std::result::Result<TransformOutcome, TransformerError> {
        panic!("candidate evaluation blew up");
    }
}

/// Records what it was called with and scores a fixed prediction with the metric.
///
/// The recordings are shared so tests can read them after the transformer
/// has been boxed into a `StrategyChain`.
#[allow(dead_code)]
pub struct RecordingTransformer {
    pub prediction: Prediction,
    pub seen_examples: Arc<Mutex<Vec<usize>>>,
    pub metric_scores: Arc<Mutex<Vec<f64>>>,
}

#[allow(dead_code)]
impl RecordingTransformer {
    pub fn new(prediction: Prediction) -> Self {
        Self {
            prediction,
            seen_examples: Arc::new(Mutex::new(Vec::new())),
            metric_scores: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl ProgramTransformer for RecordingTransformer {
    fn name(&self) -> &str {
        "recording"
    }

    fn probe(&self) -> Availability {
        Availability::Available
    }

    fn optimize(
        &self,
        program: &Program,
        examples: &[Example],
        metric: &dyn Metric,
        _config: &OptimizationConfig,
    ) -> std::result::Result<TransformOutcome, TransformerError> {
        self.seen_examples.lock().unwrap().push(examples.len());
        let mut scores = self.metric_scores.lock().unwrap();
        for example in examples {
            scores.push(metric.evaluate(example, &self.prediction));
        }
        Ok(TransformOutcome::new(program.clone()))
    }
}
