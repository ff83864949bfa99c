//! The program being optimized: a set of named predictors plus metadata.

use crate::error::SerializationError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

mod artifact;

pub use artifact::SavedProgram;

/// One prompt-driven step of a program.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Predictor {
    pub instructions: String,
    #[serde(default)]
    pub input_fields: Vec<String>,
    #[serde(default)]
    pub output_fields: Vec<String>,
    /// Few-shot demonstrations attached by an optimizer.
    #[serde(default)]
    pub demos: Vec<serde_json::Value>,
}

impl Predictor {
    pub fn new(instructions: &str) -> Self {
        Self {
            instructions: instructions.to_string(),
            ..Self::default()
        }
    }

    pub fn with_fields(mut self, inputs: &[&str], outputs: &[&str]) -> Self {
        self.input_fields = inputs.iter().map(|s| s.to_string()).collect();
        self.output_fields = outputs.iter().map(|s| s.to_string()).collect();
        self
    }
}

/// A workflow-generation program as seen by the optimization layer.
///
/// Maps are ordered so that the canonical JSON form, and with it the source
/// hash, does not depend on insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub predictors: BTreeMap<String, Predictor>,
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl Program {
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            ..Self::default()
        }
    }

    pub fn with_predictor(mut self, name: &str, predictor: Predictor) -> Self {
        self.predictors.insert(name.to_string(), predictor);
        self
    }

    /// Total number of demonstrations across all predictors.
    pub fn demo_count(&self) -> usize {
        self.predictors.values().map(|p| p.demos.len()).sum()
    }

    /// Hex SHA-256 over the canonical JSON form of the program.
    pub fn source_hash(&self) -> Result<String, SerializationError> {
        let canonical = serde_json::to_value(self)
            .and_then(|value| serde_json::to_vec(&value))
            .map_err(|e| SerializationError::Json(e.to_string()))?;
        let mut hasher = Sha256::new();
        hasher.update(&canonical);
        Ok(format!("{:x}", hasher.finalize()))
    }

    /// Freezes the program into its persisted form, stamped with the current time.
    pub fn snapshot(&self) -> Result<SavedProgram, SerializationError> {
        Ok(SavedProgram {
            program: self.clone(),
            source_hash: self.source_hash()?,
            serialized_at: chrono::Utc::now(),
        })
    }
}
