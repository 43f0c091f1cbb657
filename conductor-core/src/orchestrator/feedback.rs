use std::sync::Arc;

use tracing::info;

use crate::error::{ConductorError, ConductorResult};
use crate::models::{HumanFeedback, Step, StepStatus};
use crate::store::MemoryStore;

/// Applies a human verdict to a step: approval readies it for dispatch,
/// rejection sends it back as needs_update.
pub struct FeedbackHandler {
    store: Arc<dyn MemoryStore>,
}

impl FeedbackHandler {
    pub fn new(store: Arc<dyn MemoryStore>) -> Self {
        Self { store }
    }

    /// Record the feedback and move the step's status. An approval carrying
    /// an updated action also rewrites the action text; everything lands in
    /// one store write.
    pub async fn handle_human_feedback(&self, feedback: &HumanFeedback) -> ConductorResult<Step> {
        let mut step = self
            .store
            .get_step(feedback.session_id, feedback.step_id)
            .await?
            .ok_or_else(|| ConductorError::StepNotFound(feedback.step_id.to_string()))?;

        if step.is_terminal() {
            return Err(ConductorError::InvalidStepTransition {
                from: step.status.to_string(),
                to: if feedback.approved {
                    StepStatus::Approved.to_string()
                } else {
                    StepStatus::NeedsUpdate.to_string()
                },
            });
        }

        step.human_feedback = feedback.human_feedback.clone();
        step.updated_action = feedback.updated_action.clone();

        if feedback.approved {
            step.status = StepStatus::Approved;
            if let Some(updated) = &feedback.updated_action {
                step.action = updated.clone();
            }
        } else {
            step.status = StepStatus::NeedsUpdate;
        }

        self.store.update_step(&step).await?;

        info!(
            step_id = %step.id,
            status = %step.status,
            "Human feedback applied"
        );

        Ok(step)
    }
}
