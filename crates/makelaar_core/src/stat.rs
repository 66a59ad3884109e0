//! Per-agent aggregate produced by a report.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Object count for one agent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct AgentStat {
    /// Agent identifier
    agent_id: i64,
    /// Display name of the agent's first listing
    agent_name: String,
    /// Number of listings attributed to the agent
    object_count: usize,
}

impl AgentStat {
    /// Creates a new aggregate entry.
    pub fn new(agent_id: i64, agent_name: impl Into<String>, object_count: usize) -> Self {
        Self {
            agent_id,
            agent_name: agent_name.into(),
            object_count,
        }
    }
}
