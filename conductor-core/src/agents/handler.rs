use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::completion::{ChatMessage, CompletionClient, CompletionOutcome};
use crate::error::ConductorResult;
use crate::models::{ActionRequest, ActionResponse, AgentMessage};
use crate::store::MemoryStore;

use super::profile::AgentProfile;

/// An agent instance: a profile bound to the memory store, the completion
/// client, and an optional sink for publishing action responses back to the
/// group chat manager.
pub struct Agent {
    profile: AgentProfile,
    store: Arc<dyn MemoryStore>,
    client: Arc<dyn CompletionClient>,
    response_sink: Option<mpsc::UnboundedSender<ActionResponse>>,
}

impl Agent {
    pub fn new(
        profile: AgentProfile,
        store: Arc<dyn MemoryStore>,
        client: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            profile,
            store,
            client,
            response_sink: None,
        }
    }

    pub fn with_response_sink(mut self, sink: mpsc::UnboundedSender<ActionResponse>) -> Self {
        self.response_sink = Some(sink);
        self
    }

    pub fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    /// JSON boundary of the action handler. A payload that does not parse
    /// yields a failed response keyed to the nil sentinel step id.
    pub async fn handle_action_request_json(&self, raw: &str) -> ActionResponse {
        match ActionRequest::from_json(raw) {
            Ok(request) => self.handle_action_request(&request).await,
            Err(e) => {
                warn!(agent = %self.profile.kind, "Unparseable action request: {e}");
                ActionResponse::unparseable(format!("unparseable action request: {e}"))
            }
        }
    }

    /// Execute one action request end to end. Never returns an error; every
    /// failure becomes a failed [`ActionResponse`].
    pub async fn handle_action_request(&self, request: &ActionRequest) -> ActionResponse {
        let step = match self
            .store
            .get_step(request.session_id, request.step_id)
            .await
        {
            Ok(Some(step)) => step,
            Ok(None) => {
                warn!(step_id = %request.step_id, "Action request referenced a missing step");
                return ActionResponse::failed(
                    request,
                    format!("Step not found: {}", request.step_id),
                );
            }
            Err(e) => {
                e.log();
                return ActionResponse::failed(request, e.to_string());
            }
        };

        let transcript = match self.build_transcript(request, step.human_feedback.as_deref()).await
        {
            Ok(transcript) => transcript,
            Err(e) => {
                e.log();
                return ActionResponse::failed(request, e.to_string());
            }
        };

        let outcome = self
            .client
            .complete(
                &self.profile.system_message,
                &transcript,
                &self.profile.catalog.tools,
            )
            .await;

        let reply = match outcome {
            Ok(CompletionOutcome::ToolCall { name, arguments }) => {
                match self.profile.catalog.get(&name) {
                    Some(tool) => {
                        debug!(agent = %self.profile.kind, tool = %name, "Executing tool");
                        tool.execute(&arguments)
                    }
                    None => {
                        return self
                            .fail_step_invocation(
                                request,
                                format!(
                                    "tool '{name}' is not in the catalog of agent '{}'",
                                    self.profile.kind
                                ),
                            )
                            .await;
                    }
                }
            }
            Ok(CompletionOutcome::Message(text)) => text,
            Err(e) => {
                return self.fail_step_invocation(request, e.to_string()).await;
            }
        };

        let audit = AgentMessage::new(
            request.session_id,
            request.plan_id,
            Some(request.step_id),
            self.profile.kind,
            reply.clone(),
        );
        if let Err(e) = self.store.add_message(&audit).await {
            e.log();
            return ActionResponse::failed(request, e.to_string());
        }

        let mut step = step;
        step.complete(reply.clone());
        if let Err(e) = self.store.update_step(&step).await {
            e.log();
            return ActionResponse::failed(request, e.to_string());
        }

        let response = ActionResponse::completed(request, reply);
        self.publish(&response);
        response
    }

    /// Running transcript: session audit log, then prior human feedback,
    /// then the action under execution.
    async fn build_transcript(
        &self,
        request: &ActionRequest,
        human_feedback: Option<&str>,
    ) -> ConductorResult<Vec<ChatMessage>> {
        let history = self
            .store
            .get_messages_for_session(request.session_id)
            .await?;

        let mut transcript: Vec<ChatMessage> = history
            .iter()
            .map(|m| ChatMessage::assistant(format!("[{}] {}", m.source, m.content)))
            .collect();

        if let Some(feedback) = human_feedback {
            transcript.push(ChatMessage::user(format!("Human feedback: {feedback}")));
        }
        transcript.push(ChatMessage::user(request.action.clone()));

        Ok(transcript)
    }

    /// Failure path for tool dispatch: the error event is recorded and a
    /// failed response returned, but the step stays in_progress. Re-driving
    /// a stuck step is a human concern.
    async fn fail_step_invocation(
        &self,
        request: &ActionRequest,
        message: String,
    ) -> ActionResponse {
        warn!(
            agent = %self.profile.kind,
            step_id = %request.step_id,
            "Tool dispatch failed, step remains in_progress: {message}"
        );

        let audit = AgentMessage::new(
            request.session_id,
            request.plan_id,
            Some(request.step_id),
            self.profile.kind,
            format!("Action failed: {message}"),
        );
        if let Err(e) = self.store.add_message(&audit).await {
            e.log();
        }

        let response = ActionResponse::failed(request, message);
        self.publish(&response);
        response
    }

    /// Best-effort publish to the group chat manager's sink.
    fn publish(&self, response: &ActionResponse) {
        match &self.response_sink {
            Some(sink) => {
                if sink.send(response.clone()).is_err() {
                    warn!(step_id = %response.step_id, "Response sink closed, dropping response");
                }
            }
            None => {
                warn!(step_id = %response.step_id, "No response sink configured, dropping response");
            }
        }
    }
}
