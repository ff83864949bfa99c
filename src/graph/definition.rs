use crate::error::GraphError;
use std::fmt;
use std::str::FromStr;

/// How control leaves a transition that has several outgoing flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SplitKind {
    /// Every outgoing branch is taken.
    #[default]
    And,
    /// Exactly one outgoing branch is taken.
    Xor,
    /// One or more outgoing branches are taken.
    Or,
}

impl SplitKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitKind::And => "and",
            SplitKind::Xor => "xor",
            SplitKind::Or => "or",
        }
    }
}

impl FromStr for SplitKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "and" => Ok(SplitKind::And),
            "xor" => Ok(SplitKind::Xor),
            "or" => Ok(SplitKind::Or),
            _ => Err(s.to_string()),
        }
    }
}

impl fmt::Display for SplitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named activity in the process net.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub id: String,
    pub name: String,
    pub split_kind: SplitKind,
}

/// A directed arc between two nodes of the net, referenced by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flow {
    pub source_id: String,
    pub target_id: String,
}

/// The canonical, format-independent description of a process net.
///
/// Only transitions are modelled explicitly. Flows may still reference other
/// node kinds (places, conditions); footprint extraction ignores them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessGraph {
    pub transitions: Vec<Transition>,
    pub flows: Vec<Flow>,
}

impl ProcessGraph {
    pub fn builder() -> ProcessGraphBuilder {
        ProcessGraphBuilder::default()
    }

    /// Parses the `{"net": {"flows": [...], "transitions": [...]}}` document format.
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| GraphError::Json(e.to_string()))?;
        Self::from_value(&value)
    }

    /// Same as [`ProcessGraph::from_json`], for documents that are already parsed.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, GraphError> {
        use super::conversion::{IntoProcessGraph, WorkflowDocument};
        use serde::Deserialize;

        WorkflowDocument::deserialize(value)
            .map_err(|e| GraphError::Json(e.to_string()))?
            .into_process_graph()
    }

    pub fn transition(&self, id: &str) -> Option<&Transition> {
        self.transitions.iter().find(|t| t.id == id)
    }
}

/// Incremental construction of a `ProcessGraph`, mostly for tests and adapters.
#[derive(Debug, Default)]
pub struct ProcessGraphBuilder {
    graph: ProcessGraph,
}

impl ProcessGraphBuilder {
    pub fn transition(mut self, id: &str, name: &str, split_kind: SplitKind) -> Self {
        self.graph.transitions.push(Transition {
            id: id.to_string(),
            name: name.to_string(),
            split_kind,
        });
        self
    }

    pub fn flow(mut self, source_id: &str, target_id: &str) -> Self {
        self.graph.flows.push(Flow {
            source_id: source_id.to_string(),
            target_id: target_id.to_string(),
        });
        self
    }

    pub fn build(self) -> ProcessGraph {
        self.graph
    }
}
