use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::MemoryStore;
use crate::error::ConductorResult;
use crate::models::{AgentMessage, Plan, Step, StepStatus};

/// In-memory store used by the integration tests and the CLI's `--memory`
/// mode. Same contract as the PostgreSQL store, including the claim CAS,
/// which here rides on the write lock.
#[derive(Default)]
pub struct InMemoryStore {
    plans: RwLock<HashMap<Uuid, Plan>>,
    steps: RwLock<HashMap<Uuid, Step>>,
    messages: RwLock<Vec<AgentMessage>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MemoryStore for InMemoryStore {
    async fn add_plan(&self, plan: &Plan) -> ConductorResult<()> {
        self.plans.write().await.insert(plan.id, plan.clone());
        Ok(())
    }

    async fn get_plan(&self, session_id: Uuid, plan_id: Uuid) -> ConductorResult<Option<Plan>> {
        let plans = self.plans.read().await;
        Ok(plans
            .get(&plan_id)
            .filter(|p| p.session_id == session_id)
            .cloned())
    }

    async fn update_plan(&self, plan: &Plan) -> ConductorResult<()> {
        let mut updated = plan.clone();
        updated.updated_at = Utc::now();
        self.plans.write().await.insert(plan.id, updated);
        Ok(())
    }

    async fn get_plans_for_session(&self, session_id: Uuid) -> ConductorResult<Vec<Plan>> {
        let plans = self.plans.read().await;
        let mut result: Vec<Plan> = plans
            .values()
            .filter(|p| p.session_id == session_id)
            .cloned()
            .collect();
        result.sort_by_key(|p| p.created_at);
        Ok(result)
    }

    async fn add_step(&self, step: &Step) -> ConductorResult<()> {
        self.steps.write().await.insert(step.id, step.clone());
        Ok(())
    }

    async fn get_step(&self, session_id: Uuid, step_id: Uuid) -> ConductorResult<Option<Step>> {
        let steps = self.steps.read().await;
        Ok(steps
            .get(&step_id)
            .filter(|s| s.session_id == session_id)
            .cloned())
    }

    async fn update_step(&self, step: &Step) -> ConductorResult<()> {
        let mut updated = step.clone();
        updated.updated_at = Utc::now();
        self.steps.write().await.insert(step.id, updated);
        Ok(())
    }

    async fn get_steps_for_plan(
        &self,
        session_id: Uuid,
        plan_id: Uuid,
    ) -> ConductorResult<Vec<Step>> {
        let steps = self.steps.read().await;
        let mut result: Vec<Step> = steps
            .values()
            .filter(|s| s.plan_id == plan_id && s.session_id == session_id)
            .cloned()
            .collect();
        result.sort_by_key(|s| s.order_index);
        Ok(result)
    }

    async fn claim_step(&self, session_id: Uuid, step_id: Uuid) -> ConductorResult<Option<Step>> {
        let mut steps = self.steps.write().await;
        match steps.get_mut(&step_id) {
            Some(step) if step.session_id == session_id && step.status.is_runnable() => {
                step.status = StepStatus::InProgress;
                step.updated_at = Utc::now();
                Ok(Some(step.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn add_message(&self, message: &AgentMessage) -> ConductorResult<()> {
        self.messages.write().await.push(message.clone());
        Ok(())
    }

    async fn get_messages_for_session(
        &self,
        session_id: Uuid,
    ) -> ConductorResult<Vec<AgentMessage>> {
        let messages = self.messages.read().await;
        Ok(messages
            .iter()
            .filter(|m| m.session_id == session_id)
            .cloned()
            .collect())
    }
}
