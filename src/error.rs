use thiserror::Error;

/// Errors raised while building an `OptimizationConfig` or a coordinator.
///
/// These are the only errors that escape to callers of the optimization
/// surface; they are reported before any optimization attempt begins.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("Unknown optimization target '{0}' (expected behavioral, performance or balanced)")]
    InvalidTarget(String),

    #[error("Unknown auto mode '{0}' (expected light, medium, heavy or custom)")]
    InvalidAutoMode(String),

    #[error("Configuration value '{field}' is out of range: {value}")]
    OutOfRange { field: &'static str, value: String },

    #[error("Could not read configuration file '{path}': {message}")]
    Read { path: String, message: String },

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// A single raw training record that could not be turned into an `Example`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Training record {index} is not an object")]
    NotAnObject { index: usize },

    #[error("Training record {index} has neither an 'input' nor a 'workflow_description' key")]
    MissingInput { index: usize },

    #[error("Training record {index} has neither an 'output' nor an 'expected_output' key")]
    MissingOutput { index: usize },
}

/// Failures reported by a program transformer strategy.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformerError {
    #[error("Strategy '{strategy}' is unavailable: {reason}")]
    Unavailable { strategy: String, reason: String },

    #[error("Strategy '{strategy}' failed during execution: {message}")]
    Execution { strategy: String, message: String },
}

/// Errors at the persisted-program boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SerializationError {
    #[error("I/O error on '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Invalid program JSON: {0}")]
    Json(String),

    #[error("Source hash mismatch: file declares '{expected}', content hashes to '{actual}'")]
    HashMismatch { expected: String, actual: String },
}

/// Errors raised while reading a process graph description.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Failed to parse process graph JSON: {0}")]
    Json(String),

    #[error("Transition '{transition_id}' has an unknown split kind: '{value}'")]
    InvalidSplitKind {
        transition_id: String,
        value: String,
    },
}
