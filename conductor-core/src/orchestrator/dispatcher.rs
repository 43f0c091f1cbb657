use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tracing::{info, warn};
use uuid::Uuid;

use crate::agents::AgentRegistry;
use crate::error::{ConductorError, ConductorResult};
use crate::models::{ActionRequest, ActionResponse, PlanStatus};
use crate::store::MemoryStore;

/// The plan driver: claims the next runnable step of a plan and dispatches
/// it to the agent named on the step.
///
/// Dispatch is fire-and-continue: the returned status string reports that a
/// step was handed to an agent, not the agent's final result. Completed
/// action responses arrive on the manager's sink and can be drained for
/// inspection.
pub struct GroupChatManager {
    store: Arc<dyn MemoryStore>,
    registry: Arc<AgentRegistry>,
    response_tx: mpsc::UnboundedSender<ActionResponse>,
    response_rx: Mutex<mpsc::UnboundedReceiver<ActionResponse>>,
}

impl GroupChatManager {
    pub fn new(store: Arc<dyn MemoryStore>, registry: Arc<AgentRegistry>) -> Self {
        let (response_tx, response_rx) = mpsc::unbounded_channel();
        Self {
            store,
            registry,
            response_tx,
            response_rx: Mutex::new(response_rx),
        }
    }

    /// Sender handed to agents so their responses land back here.
    pub fn response_sink(&self) -> mpsc::UnboundedSender<ActionResponse> {
        self.response_tx.clone()
    }

    /// Await the next action response published by an agent.
    pub async fn recv_response(&self) -> Option<ActionResponse> {
        let mut rx = self.response_rx.lock().await;
        rx.recv().await
    }

    /// Drain any action responses agents have published so far.
    pub async fn drain_responses(&self) -> Vec<ActionResponse> {
        let mut rx = self.response_rx.lock().await;
        let mut responses = Vec::new();
        while let Ok(response) = rx.try_recv() {
            responses.push(response);
        }
        responses
    }

    /// Claim and dispatch the first runnable step of the plan.
    ///
    /// Steps are scanned in `order_index` order and claimed through the
    /// store's compare-and-swap, so two concurrent calls cannot both take
    /// the same step; the loser of a race simply moves on to the next
    /// runnable candidate. When nothing is runnable the plan is marked
    /// completed and a terminal message returned; calling again after that
    /// changes nothing.
    pub async fn execute_next_step(
        &self,
        session_id: Uuid,
        plan_id: Uuid,
    ) -> ConductorResult<String> {
        let mut plan = self
            .store
            .get_plan(session_id, plan_id)
            .await?
            .ok_or_else(|| ConductorError::PlanNotFound(plan_id.to_string()))?;

        let steps = self.store.get_steps_for_plan(session_id, plan_id).await?;

        let mut claimed = None;
        for step in steps.iter().filter(|s| s.is_runnable()) {
            if let Some(won) = self.store.claim_step(session_id, step.id).await? {
                claimed = Some(won);
                break;
            }
            // Lost the claim race; another dispatcher took this step.
        }

        let Some(step) = claimed else {
            if !plan.is_completed() {
                plan.mark_completed();
                self.store.update_plan(&plan).await?;
                info!(plan_id = %plan.id, "All steps settled, plan completed");
            }
            return Ok(format!("All steps are complete. Plan {} is finished.", plan.id));
        };

        if plan.overall_status == PlanStatus::Created {
            plan.mark_in_progress();
            self.store.update_plan(&plan).await?;
        }

        let request = ActionRequest {
            step_id: step.id,
            plan_id: step.plan_id,
            session_id: step.session_id,
            agent: step.agent,
            action: step.action.clone(),
        };

        let agent = match self.registry.resolve(step.agent).await {
            Ok(agent) => agent,
            Err(e) => {
                // The claimed step stays in_progress; re-driving it is a
                // human concern.
                warn!(step_id = %step.id, "Could not resolve an agent: {e}");
                return Ok(format!(
                    "No agent available for step {}: {e}. The step remains in progress.",
                    step.id
                ));
            }
        };

        info!(
            step_id = %step.id,
            agent = %step.agent,
            "Dispatching step to agent"
        );

        tokio::spawn(async move {
            agent.handle_action_request(&request).await;
        });

        Ok(format!(
            "Step {} dispatched to agent '{}'.",
            step.id, step.agent
        ))
    }
}
