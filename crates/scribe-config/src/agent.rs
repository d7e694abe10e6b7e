use serde::Deserialize;

/// Agent configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Name the agent reports in its logs
    #[serde(default = "default_agent_name")]
    pub name: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
        }
    }
}

fn default_agent_name() -> String {
    "summarizer".to_string()
}
