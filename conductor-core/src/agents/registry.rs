use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::error::{ConductorError, ConductorResult};
use crate::models::AgentKind;

use super::handler::Agent;

/// Registry of live agent instances keyed by kind.
///
/// Resolution falls back to the Generic agent for an unregistered kind; only
/// when Generic itself is absent does resolution fail.
pub struct AgentRegistry {
    agents: RwLock<HashMap<AgentKind, Arc<Agent>>>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self {
            agents: RwLock::new(HashMap::new()),
        }
    }

    pub async fn register(&self, agent: Agent) -> ConductorResult<()> {
        let kind = agent.profile().kind;
        let mut agents = self.agents.write().await;
        if agents.contains_key(&kind) {
            return Err(ConductorError::AgentAlreadyRegistered(kind.to_string()));
        }

        agents.insert(kind, Arc::new(agent));
        info!("Registered agent '{kind}'");
        Ok(())
    }

    pub async fn get(&self, kind: AgentKind) -> Option<Arc<Agent>> {
        let agents = self.agents.read().await;
        agents.get(&kind).cloned()
    }

    /// Resolve the agent for a step, substituting Generic for an
    /// unregistered kind.
    pub async fn resolve(&self, kind: AgentKind) -> ConductorResult<Arc<Agent>> {
        let agents = self.agents.read().await;
        if let Some(agent) = agents.get(&kind) {
            return Ok(agent.clone());
        }

        warn!("No agent registered for '{kind}', falling back to generic");
        agents
            .get(&AgentKind::Generic)
            .cloned()
            .ok_or_else(|| ConductorError::AgentNotRegistered(kind.to_string()))
    }

    pub async fn list_kinds(&self) -> Vec<AgentKind> {
        let agents = self.agents.read().await;
        let mut kinds: Vec<AgentKind> = agents.keys().copied().collect();
        kinds.sort_by_key(|k| k.to_string());
        kinds
    }

    pub async fn count(&self) -> usize {
        let agents = self.agents.read().await;
        agents.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.count().await == 0
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AgentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentRegistry").finish_non_exhaustive()
    }
}
