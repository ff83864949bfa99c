use crate::error::ValidationError;
use crate::transformer::Example;
use serde_json::Value;
use tracing::{info, warn};

const INPUT_KEYS: [&str; 2] = ["input", "workflow_description"];
const OUTPUT_KEYS: [&str; 2] = ["output", "expected_output"];

/// A training record as handed in by callers: either already canonical or raw JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum TrainingRecord {
    Example(Example),
    Raw(Value),
}

impl From<Example> for TrainingRecord {
    fn from(example: Example) -> Self {
        TrainingRecord::Example(example)
    }
}

impl From<Value> for TrainingRecord {
    fn from(value: Value) -> Self {
        TrainingRecord::Raw(value)
    }
}

impl TrainingRecord {
    /// Converts the record at position `index` into an `Example`.
    ///
    /// Non-string inputs are rendered as JSON text. A key holding `null`
    /// counts as missing.
    pub fn to_example(&self, index: usize) -> Result<Example, ValidationError> {
        let object = match self {
            TrainingRecord::Example(example) => return Ok(example.clone()),
            TrainingRecord::Raw(Value::Object(object)) => object,
            TrainingRecord::Raw(_) => return Err(ValidationError::NotAnObject { index }),
        };

        let lookup = |keys: &[&str]| {
            keys.iter()
                .filter_map(|key| object.get(*key))
                .find(|value| !value.is_null())
        };

        let input = lookup(&INPUT_KEYS[..]).ok_or(ValidationError::MissingInput { index })?;
        let output = lookup(&OUTPUT_KEYS[..]).ok_or(ValidationError::MissingOutput { index })?;

        let input = match input {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        Ok(Example {
            input,
            output: output.clone(),
        })
    }
}

/// Converts every record it can, logging and skipping the rest.
pub fn convert_records(records: &[TrainingRecord]) -> Vec<Example> {
    let examples: Vec<Example> = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| match record.to_example(index) {
            Ok(example) => Some(example),
            Err(e) => {
                warn!(error = %e, "Skipping training record");
                None
            }
        })
        .collect();

    info!(
        converted = examples.len(),
        skipped = records.len() - examples.len(),
        "Converted training examples"
    );
    examples
}
