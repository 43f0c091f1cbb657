use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::AgentKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "step_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Planned,
    Approved,
    NeedsUpdate,
    InProgress,
    Completed,
    Failed,
}

impl StepStatus {
    /// Statuses the dispatcher may claim for execution.
    pub fn is_runnable(&self) -> bool {
        matches!(self, StepStatus::Planned | StepStatus::Approved)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, StepStatus::Completed | StepStatus::Failed)
    }
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepStatus::Planned => write!(f, "planned"),
            StepStatus::Approved => write!(f, "approved"),
            StepStatus::NeedsUpdate => write!(f, "needs_update"),
            StepStatus::InProgress => write!(f, "in_progress"),
            StepStatus::Completed => write!(f, "completed"),
            StepStatus::Failed => write!(f, "failed"),
        }
    }
}

/// One instruction within a plan, routed to a named agent.
///
/// Status only advances planned/approved -> in_progress -> completed/failed;
/// needs_update loops a step back to human re-approval. A completed step is
/// never mutated again.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Step {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub session_id: Uuid,
    pub agent: AgentKind,
    pub action: String,
    pub status: StepStatus,
    pub order_index: i32,
    pub human_feedback: Option<String>,
    pub updated_action: Option<String>,
    pub agent_reply: Option<String>,
    pub identified_target_state: Option<String>,
    pub identified_target_transition: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Step {
    pub fn new(
        plan_id: Uuid,
        session_id: Uuid,
        agent: AgentKind,
        action: impl Into<String>,
        order_index: i32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            plan_id,
            session_id,
            agent,
            action: action.into(),
            status: StepStatus::Planned,
            order_index,
            human_feedback: None,
            updated_action: None,
            agent_reply: None,
            identified_target_state: None,
            identified_target_transition: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_runnable(&self) -> bool {
        self.status.is_runnable()
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn complete(&mut self, agent_reply: impl Into<String>) {
        self.status = StepStatus::Completed;
        self.agent_reply = Some(agent_reply.into());
        self.updated_at = Utc::now();
    }
}

/// Human verdict on a step: approve it for dispatch or send it back with
/// feedback, optionally rewriting the action text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HumanFeedback {
    pub step_id: Uuid,
    pub session_id: Uuid,
    pub approved: bool,
    pub human_feedback: Option<String>,
    pub updated_action: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_new() {
        let plan_id = Uuid::new_v4();
        let session_id = Uuid::new_v4();
        let step = Step::new(plan_id, session_id, AgentKind::Hr, "schedule onboarding", 0);

        assert_eq!(step.plan_id, plan_id);
        assert_eq!(step.session_id, session_id);
        assert_eq!(step.agent, AgentKind::Hr);
        assert_eq!(step.status, StepStatus::Planned);
        assert!(step.is_runnable());
        assert!(!step.is_terminal());
        assert!(step.agent_reply.is_none());
    }

    #[test]
    fn test_step_complete() {
        let mut step = Step::new(Uuid::new_v4(), Uuid::new_v4(), AgentKind::Generic, "do it", 0);
        step.complete("done");

        assert_eq!(step.status, StepStatus::Completed);
        assert_eq!(step.agent_reply.as_deref(), Some("done"));
        assert!(step.is_terminal());
    }

    #[test]
    fn test_status_predicates() {
        assert!(StepStatus::Planned.is_runnable());
        assert!(StepStatus::Approved.is_runnable());
        assert!(!StepStatus::NeedsUpdate.is_runnable());
        assert!(!StepStatus::InProgress.is_runnable());

        assert!(StepStatus::Completed.is_terminal());
        assert!(StepStatus::Failed.is_terminal());
        assert!(!StepStatus::InProgress.is_terminal());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(StepStatus::NeedsUpdate.to_string(), "needs_update");
        assert_eq!(StepStatus::InProgress.to_string(), "in_progress");
    }
}
