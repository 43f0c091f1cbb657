use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use super::MemoryStore;
use crate::error::ConductorResult;
use crate::models::{AgentMessage, Plan, Step};

const PLAN_COLUMNS: &str =
    "id, session_id, initial_goal, summary, overall_status, created_at, updated_at";

const STEP_COLUMNS: &str = "id, plan_id, session_id, agent, action, status, order_index, \
     human_feedback, updated_action, agent_reply, identified_target_state, \
     identified_target_transition, created_at, updated_at";

/// PostgreSQL-backed memory store.
pub struct PgMemoryStore {
    pool: PgPool,
}

impl PgMemoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemoryStore for PgMemoryStore {
    async fn add_plan(&self, plan: &Plan) -> ConductorResult<()> {
        sqlx::query(
            r#"
            INSERT INTO plans (id, session_id, initial_goal, summary, overall_status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(plan.id)
        .bind(plan.session_id)
        .bind(&plan.initial_goal)
        .bind(&plan.summary)
        .bind(plan.overall_status)
        .bind(plan.created_at)
        .bind(plan.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_plan(&self, session_id: Uuid, plan_id: Uuid) -> ConductorResult<Option<Plan>> {
        let record = sqlx::query_as::<_, Plan>(&format!(
            "SELECT {PLAN_COLUMNS} FROM plans WHERE id = $1 AND session_id = $2"
        ))
        .bind(plan_id)
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn update_plan(&self, plan: &Plan) -> ConductorResult<()> {
        sqlx::query(
            r#"
            UPDATE plans
            SET initial_goal = $2, summary = $3, overall_status = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(plan.id)
        .bind(&plan.initial_goal)
        .bind(&plan.summary)
        .bind(plan.overall_status)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_plans_for_session(&self, session_id: Uuid) -> ConductorResult<Vec<Plan>> {
        let records = sqlx::query_as::<_, Plan>(&format!(
            "SELECT {PLAN_COLUMNS} FROM plans WHERE session_id = $1 ORDER BY created_at"
        ))
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn add_step(&self, step: &Step) -> ConductorResult<()> {
        sqlx::query(
            r#"
            INSERT INTO steps (id, plan_id, session_id, agent, action, status, order_index,
                               human_feedback, updated_action, agent_reply,
                               identified_target_state, identified_target_transition,
                               created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(step.id)
        .bind(step.plan_id)
        .bind(step.session_id)
        .bind(step.agent)
        .bind(&step.action)
        .bind(step.status)
        .bind(step.order_index)
        .bind(&step.human_feedback)
        .bind(&step.updated_action)
        .bind(&step.agent_reply)
        .bind(&step.identified_target_state)
        .bind(&step.identified_target_transition)
        .bind(step.created_at)
        .bind(step.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_step(&self, session_id: Uuid, step_id: Uuid) -> ConductorResult<Option<Step>> {
        let record = sqlx::query_as::<_, Step>(&format!(
            "SELECT {STEP_COLUMNS} FROM steps WHERE id = $1 AND session_id = $2"
        ))
        .bind(step_id)
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn update_step(&self, step: &Step) -> ConductorResult<()> {
        sqlx::query(
            r#"
            UPDATE steps
            SET agent = $2, action = $3, status = $4, human_feedback = $5,
                updated_action = $6, agent_reply = $7, identified_target_state = $8,
                identified_target_transition = $9, updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(step.id)
        .bind(step.agent)
        .bind(&step.action)
        .bind(step.status)
        .bind(&step.human_feedback)
        .bind(&step.updated_action)
        .bind(&step.agent_reply)
        .bind(&step.identified_target_state)
        .bind(&step.identified_target_transition)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_steps_for_plan(
        &self,
        session_id: Uuid,
        plan_id: Uuid,
    ) -> ConductorResult<Vec<Step>> {
        let records = sqlx::query_as::<_, Step>(&format!(
            "SELECT {STEP_COLUMNS} FROM steps \
             WHERE plan_id = $1 AND session_id = $2 ORDER BY order_index"
        ))
        .bind(plan_id)
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn claim_step(&self, session_id: Uuid, step_id: Uuid) -> ConductorResult<Option<Step>> {
        // The WHERE clause is the compare half of the swap: only a still
        // runnable step can be moved to in_progress.
        let record = sqlx::query_as::<_, Step>(&format!(
            "UPDATE steps
             SET status = 'in_progress', updated_at = $3
             WHERE id = $1 AND session_id = $2 AND status IN ('planned', 'approved')
             RETURNING {STEP_COLUMNS}"
        ))
        .bind(step_id)
        .bind(session_id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn add_message(&self, message: &AgentMessage) -> ConductorResult<()> {
        sqlx::query(
            r#"
            INSERT INTO agent_messages (id, session_id, plan_id, step_id, source, content, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(message.id)
        .bind(message.session_id)
        .bind(message.plan_id)
        .bind(message.step_id)
        .bind(message.source)
        .bind(&message.content)
        .bind(message.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_messages_for_session(
        &self,
        session_id: Uuid,
    ) -> ConductorResult<Vec<AgentMessage>> {
        let records = sqlx::query_as::<_, AgentMessage>(
            r#"
            SELECT id, session_id, plan_id, step_id, source, content, created_at
            FROM agent_messages
            WHERE session_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
