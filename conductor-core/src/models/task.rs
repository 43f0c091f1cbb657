use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A task as submitted by a user; the Planner turns it into a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputTask {
    pub session_id: Uuid,
    pub description: String,
}

impl InputTask {
    pub fn new(session_id: Uuid, description: impl Into<String>) -> Self {
        Self {
            session_id,
            description: description.into(),
        }
    }
}
