use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};

use crate::completion::{ChatMessage, CompletionClient, CompletionOutcome};
use crate::error::ConductorResult;
use crate::models::{AgentKind, AgentMessage, InputTask, Plan, Step};
use crate::store::MemoryStore;

const DEFAULT_STEP_LIMIT: usize = 20;

const PLANNER_SYSTEM_MESSAGE: &str = "You are a planner. Break the user's task into an ordered \
     list of steps. Reply with a JSON array of objects, each with an \"agent\" field (one of: \
     hr, marketing, procurement, product, tech_support, generic) and an \"action\" field with \
     the instruction for that agent. Reply with the JSON array only.";

#[derive(Debug, Deserialize)]
struct PlannedStep {
    agent: String,
    action: String,
}

/// Turns a submitted task into a persisted plan of ordered steps.
pub struct Planner {
    store: Arc<dyn MemoryStore>,
    client: Arc<dyn CompletionClient>,
    step_limit: usize,
}

impl Planner {
    pub fn new(store: Arc<dyn MemoryStore>, client: Arc<dyn CompletionClient>) -> Self {
        Self {
            store,
            client,
            step_limit: DEFAULT_STEP_LIMIT,
        }
    }

    pub fn with_step_limit(mut self, step_limit: usize) -> Self {
        self.step_limit = step_limit;
        self
    }

    /// Ask the completion endpoint for a step breakdown and persist it.
    ///
    /// A breakdown that does not parse falls back to a single generic step
    /// wrapping the raw goal; an unknown agent name in the breakdown falls
    /// back to the generic agent. Either fallback is logged, not an error.
    pub async fn create_plan(&self, task: &InputTask) -> ConductorResult<(Plan, Vec<Step>)> {
        let transcript = vec![ChatMessage::user(task.description.clone())];
        let outcome = self
            .client
            .complete(PLANNER_SYSTEM_MESSAGE, &transcript, &[])
            .await?;

        let raw = match outcome {
            CompletionOutcome::Message(text) => text,
            CompletionOutcome::ToolCall { name, .. } => {
                warn!("Planner reply was a tool call ('{name}'); treating as unparseable");
                String::new()
            }
        };

        let mut plan = Plan::new(task.session_id, task.description.clone());

        let breakdown = parse_breakdown(&raw);
        let steps: Vec<Step> = match breakdown {
            Some(planned) if !planned.is_empty() => {
                plan.summary = Some(raw.trim().to_string());
                planned
                    .into_iter()
                    .take(self.step_limit)
                    .enumerate()
                    .map(|(index, planned_step)| {
                        let agent = AgentKind::from_str(&planned_step.agent).unwrap_or_else(|_| {
                            warn!(
                                "Breakdown named unknown agent '{}', using generic",
                                planned_step.agent
                            );
                            AgentKind::Generic
                        });
                        Step::new(
                            plan.id,
                            task.session_id,
                            agent,
                            planned_step.action,
                            index as i32,
                        )
                    })
                    .collect()
            }
            _ => {
                warn!("Planner breakdown was unusable, falling back to a single generic step");
                vec![Step::new(
                    plan.id,
                    task.session_id,
                    AgentKind::Generic,
                    task.description.clone(),
                    0,
                )]
            }
        };

        self.store.add_plan(&plan).await?;
        for step in &steps {
            self.store.add_step(step).await?;
        }

        let audit = AgentMessage::new(
            task.session_id,
            plan.id,
            None,
            AgentKind::Planner,
            format!("Planned {} step(s) for: {}", steps.len(), task.description),
        );
        self.store.add_message(&audit).await?;

        info!(plan_id = %plan.id, steps = steps.len(), "Plan created");
        Ok((plan, steps))
    }
}

/// Parse the planner's reply, tolerating a markdown code fence around the
/// JSON array.
fn parse_breakdown(raw: &str) -> Option<Vec<PlannedStep>> {
    let trimmed = raw.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed)
        .trim();

    serde_json::from_str(body).ok()
}
