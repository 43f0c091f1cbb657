use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::agents::{Agent, AgentProfile, AgentRegistry};
use crate::completion::CompletionClient;
use crate::error::ConductorResult;
use crate::models::{HumanFeedback, InputTask, Plan, Step};
use crate::orchestrator::{FeedbackHandler, GroupChatManager, Planner};
use crate::store::MemoryStore;

/// Explicit session-scoped context: everything one session needs, built
/// once and torn down with [`SessionContext::close`]. There is no implicit
/// process-wide cache of per-session state.
pub struct SessionContext {
    session_id: Uuid,
    store: Arc<dyn MemoryStore>,
    registry: Arc<AgentRegistry>,
    manager: GroupChatManager,
    planner: Planner,
    feedback: FeedbackHandler,
}

impl SessionContext {
    /// Build the context for a session: all builtin agents registered and
    /// wired to the group chat manager's response sink.
    pub async fn initialize(
        session_id: Uuid,
        store: Arc<dyn MemoryStore>,
        client: Arc<dyn CompletionClient>,
    ) -> ConductorResult<Self> {
        let registry = Arc::new(AgentRegistry::new());
        let manager = GroupChatManager::new(store.clone(), registry.clone());

        for profile in AgentProfile::all_builtin()? {
            let agent = Agent::new(profile, store.clone(), client.clone())
                .with_response_sink(manager.response_sink());
            registry.register(agent).await?;
        }

        debug!(%session_id, agents = registry.count().await, "Session context initialized");

        Ok(Self {
            session_id,
            planner: Planner::new(store.clone(), client),
            feedback: FeedbackHandler::new(store.clone()),
            store,
            registry,
            manager,
        })
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn store(&self) -> &Arc<dyn MemoryStore> {
        &self.store
    }

    pub fn registry(&self) -> &Arc<AgentRegistry> {
        &self.registry
    }

    pub fn manager(&self) -> &GroupChatManager {
        &self.manager
    }

    /// Submit a task for this session; the Planner turns it into a plan.
    pub async fn submit_task(&self, description: &str) -> ConductorResult<(Plan, Vec<Step>)> {
        let task = InputTask::new(self.session_id, description);
        self.planner.create_plan(&task).await
    }

    /// Drive the plan forward by one step.
    pub async fn execute_next_step(&self, plan_id: Uuid) -> ConductorResult<String> {
        self.manager.execute_next_step(self.session_id, plan_id).await
    }

    /// Apply a human verdict to a step of this session.
    pub async fn apply_feedback(&self, feedback: &HumanFeedback) -> ConductorResult<Step> {
        self.feedback.handle_human_feedback(feedback).await
    }

    /// Tear the context down. Dropping the manager closes the response
    /// channel, so agents still running log their dropped responses instead
    /// of leaking into a dead session.
    pub async fn close(self) {
        info!(session_id = %self.session_id, "Session context closed");
    }
}
