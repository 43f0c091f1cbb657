use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "plan_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    Created,
    InProgress,
    Completed,
}

impl std::fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanStatus::Created => write!(f, "created"),
            PlanStatus::InProgress => write!(f, "in_progress"),
            PlanStatus::Completed => write!(f, "completed"),
        }
    }
}

/// An ordered unit of work for one session. A plan owns many steps; it is
/// completed when no runnable step remains.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Plan {
    pub id: Uuid,
    pub session_id: Uuid,
    pub initial_goal: String,
    pub summary: Option<String>,
    pub overall_status: PlanStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Plan {
    pub fn new(session_id: Uuid, initial_goal: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            session_id,
            initial_goal: initial_goal.into(),
            summary: None,
            overall_status: PlanStatus::Created,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.overall_status == PlanStatus::Completed
    }

    pub fn mark_in_progress(&mut self) {
        if self.overall_status == PlanStatus::Created {
            self.overall_status = PlanStatus::InProgress;
            self.updated_at = Utc::now();
        }
    }

    pub fn mark_completed(&mut self) {
        self.overall_status = PlanStatus::Completed;
        self.updated_at = Utc::now();
    }
}
