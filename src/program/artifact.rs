use super::Program;
use crate::error::SerializationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// A program as written to disk: the program itself plus integrity metadata.
///
/// `source_hash` covers everything except `source_hash` and `serialized_at`,
/// so re-saving unchanged content keeps the hash stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedProgram {
    #[serde(flatten)]
    pub program: Program,
    pub source_hash: String,
    #[serde(with = "crate::time::iso8601")]
    pub serialized_at: DateTime<Utc>,
}

impl SavedProgram {
    /// Saves the program to a file as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SerializationError> {
        let path = path.as_ref();
        let bytes = serde_json::to_vec_pretty(self)
            .map_err(|e| SerializationError::Json(format!("Serialization failed: {}", e)))?;
        fs::write(path, bytes).map_err(|e| SerializationError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        debug!(program = %self.program.name, path = %path.display(), "Saved program");
        Ok(())
    }

    /// Loads a saved program from a file and checks its source hash.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SerializationError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| SerializationError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_bytes(&bytes)
    }

    /// Deserializes a saved program from a byte slice and checks its source hash.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SerializationError> {
        let saved: SavedProgram = serde_json::from_slice(bytes)
            .map_err(|e| SerializationError::Json(format!("Deserialization failed: {}", e)))?;
        let actual = saved.program.source_hash()?;
        if actual != saved.source_hash {
            return Err(SerializationError::HashMismatch {
                expected: saved.source_hash,
                actual,
            });
        }
        Ok(saved)
    }

    pub fn into_program(self) -> Program {
        self.program
    }
}
