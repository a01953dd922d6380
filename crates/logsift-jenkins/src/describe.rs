//! Pipeline build description (`wfapi/describe`) payloads.

use serde::{Deserialize, Serialize};

/// Top-level `wfapi/describe` document. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BuildDescription {
    #[serde(default)]
    pub stages: Vec<StageDescription>,
}

/// One pipeline stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StageDescription {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default, rename = "stageFlowNodes")]
    pub stage_flow_nodes: Vec<StageFlowNode>,
}

/// An execution node of a stage; each node has its own log.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StageFlowNode {
    #[serde(default)]
    pub id: Option<String>,
}

/// Execution node ids of every stage whose id equals `stage_id`, in document order.
pub fn stage_node_ids(description: &BuildDescription, stage_id: &str) -> Vec<String> {
    description
        .stages
        .iter()
        .filter(|stage| stage.id.as_deref() == Some(stage_id))
        .flat_map(|stage| &stage.stage_flow_nodes)
        .filter_map(|node| node.id.clone())
        .filter(|id| !id.is_empty())
        .collect()
}
