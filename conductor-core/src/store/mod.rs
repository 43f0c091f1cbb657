pub mod memory;
pub mod postgres;

pub use memory::InMemoryStore;
pub use postgres::PgMemoryStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ConductorResult;
use crate::models::{AgentMessage, Plan, Step};

/// Shared conversational-memory store keyed by session.
///
/// Reads return `Ok(None)` or an empty list for missing records; writes
/// overwrite by id. There are no transactions across entities; the only
/// atomic primitive is [`MemoryStore::claim_step`].
#[async_trait]
pub trait MemoryStore: Send + Sync {
    async fn add_plan(&self, plan: &Plan) -> ConductorResult<()>;
    async fn get_plan(&self, session_id: Uuid, plan_id: Uuid) -> ConductorResult<Option<Plan>>;
    async fn update_plan(&self, plan: &Plan) -> ConductorResult<()>;
    async fn get_plans_for_session(&self, session_id: Uuid) -> ConductorResult<Vec<Plan>>;

    async fn add_step(&self, step: &Step) -> ConductorResult<()>;
    async fn get_step(&self, session_id: Uuid, step_id: Uuid) -> ConductorResult<Option<Step>>;
    async fn update_step(&self, step: &Step) -> ConductorResult<()>;

    /// All steps of a plan ordered by `order_index`.
    async fn get_steps_for_plan(
        &self,
        session_id: Uuid,
        plan_id: Uuid,
    ) -> ConductorResult<Vec<Step>>;

    /// Compare-and-swap claim: transition the step to `in_progress` only if
    /// its current status is still runnable (planned or approved). Returns
    /// the claimed step, or `None` if a concurrent caller won the race or
    /// the step moved on.
    async fn claim_step(&self, session_id: Uuid, step_id: Uuid) -> ConductorResult<Option<Step>>;

    async fn add_message(&self, message: &AgentMessage) -> ConductorResult<()>;

    /// Session audit log in insertion order.
    async fn get_messages_for_session(
        &self,
        session_id: Uuid,
    ) -> ConductorResult<Vec<AgentMessage>>;
}
