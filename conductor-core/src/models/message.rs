use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::AgentKind;

/// Outcome of one agent invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    Completed,
    Failed,
}

impl std::fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionStatus::Completed => write!(f, "completed"),
            ActionStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Transient message correlating a step to an agent invocation. Not
/// persisted on its own; the resulting reply lands in the audit log as an
/// [`AgentMessage`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub step_id: Uuid,
    pub plan_id: Uuid,
    pub session_id: Uuid,
    pub agent: AgentKind,
    pub action: String,
}

impl ActionRequest {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// The agent's answer to an [`ActionRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub step_id: Uuid,
    pub plan_id: Uuid,
    pub session_id: Uuid,
    pub status: ActionStatus,
    pub message: String,
}

impl ActionResponse {
    pub fn completed(request: &ActionRequest, message: impl Into<String>) -> Self {
        Self {
            step_id: request.step_id,
            plan_id: request.plan_id,
            session_id: request.session_id,
            status: ActionStatus::Completed,
            message: message.into(),
        }
    }

    pub fn failed(request: &ActionRequest, message: impl Into<String>) -> Self {
        Self {
            step_id: request.step_id,
            plan_id: request.plan_id,
            session_id: request.session_id,
            status: ActionStatus::Failed,
            message: message.into(),
        }
    }

    /// Response for a request that could not even be parsed; keyed to the nil
    /// sentinel step id.
    pub fn unparseable(message: impl Into<String>) -> Self {
        Self {
            step_id: Uuid::nil(),
            plan_id: Uuid::nil(),
            session_id: Uuid::nil(),
            status: ActionStatus::Failed,
            message: message.into(),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Append-only audit record of agent output, linked to session/plan/step.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AgentMessage {
    pub id: Uuid,
    pub session_id: Uuid,
    pub plan_id: Uuid,
    pub step_id: Option<Uuid>,
    pub source: AgentKind,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl AgentMessage {
    pub fn new(
        session_id: Uuid,
        plan_id: Uuid,
        step_id: Option<Uuid>,
        source: AgentKind,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            plan_id,
            step_id,
            source,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}
