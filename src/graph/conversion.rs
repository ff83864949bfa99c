use super::definition::{Flow, ProcessGraph, SplitKind, Transition};
use crate::error::GraphError;
use serde::Deserialize;

/// A trait for custom workflow formats that can be converted into a `ProcessGraph`.
///
/// Footprint extraction only ever sees the canonical `ProcessGraph`. Implement
/// this on your own deserialized structs to feed another net format through
/// the same scoring pipeline.
///
/// # Example
///
/// ```rust,no_run
/// use kensho::error::GraphError;
/// use kensho::graph::{IntoProcessGraph, ProcessGraph, SplitKind};
///
/// struct Edge { from: String, to: String }
/// struct MyNet { steps: Vec<String>, edges: Vec<Edge> }
///
/// impl IntoProcessGraph for MyNet {
///     fn into_process_graph(self) -> Result<ProcessGraph, GraphError> {
///         let mut builder = ProcessGraph::builder();
///         for step in &self.steps {
///             builder = builder.transition(step, step, SplitKind::And);
///         }
///         for edge in &self.edges {
///             builder = builder.flow(&edge.from, &edge.to);
///         }
///         Ok(builder.build())
///     }
/// }
/// ```
pub trait IntoProcessGraph {
    /// Consumes the object and converts it into a canonical process graph.
    fn into_process_graph(self) -> Result<ProcessGraph, GraphError>;
}

// --- JSON document format ---
// {"net": {"flows": [{"source", "target"}], "transitions": [{"id", "name", "splits"}]}}

#[derive(Debug, Deserialize, Default)]
pub struct WorkflowDocument {
    #[serde(default)]
    pub net: NetDocument,
}

#[derive(Debug, Deserialize, Default)]
pub struct NetDocument {
    #[serde(default)]
    pub flows: Vec<FlowDocument>,
    #[serde(default)]
    pub transitions: Vec<TransitionDocument>,
}

#[derive(Debug, Deserialize)]
pub struct FlowDocument {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Deserialize)]
pub struct TransitionDocument {
    pub id: String,
    pub name: Option<String>,
    #[serde(alias = "split")]
    pub splits: Option<String>,
}

impl IntoProcessGraph for WorkflowDocument {
    fn into_process_graph(self) -> Result<ProcessGraph, GraphError> {
        let transitions = self
            .net
            .transitions
            .into_iter()
            .map(|raw| {
                let split_kind = match raw.splits {
                    Some(value) => {
                        value
                            .parse::<SplitKind>()
                            .map_err(|value| GraphError::InvalidSplitKind {
                                transition_id: raw.id.clone(),
                                value,
                            })?
                    }
                    None => SplitKind::default(),
                };
                Ok(Transition {
                    name: raw.name.unwrap_or_else(|| raw.id.clone()),
                    id: raw.id,
                    split_kind,
                })
            })
            .collect::<Result<Vec<_>, GraphError>>()?;

        let flows = self
            .net
            .flows
            .into_iter()
            .map(|raw| Flow {
                source_id: raw.source,
                target_id: raw.target,
            })
            .collect();

        Ok(ProcessGraph { transitions, flows })
    }
}
