use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::agents::tools::ToolDescriptor;
use crate::error::ConductorResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One turn of the running transcript handed to the completion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// What the completion endpoint decided: a plain reply, or one tool to run
/// with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionOutcome {
    Message(String),
    ToolCall {
        name: String,
        arguments: HashMap<String, String>,
    },
}

/// The LLM completion collaborator. Given a transcript and the available
/// tool descriptions, returns either plain text or a tool selection. Treated
/// as a black box; no retries happen at this layer.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        system_message: &str,
        transcript: &[ChatMessage],
        tools: &[ToolDescriptor],
    ) -> ConductorResult<CompletionOutcome>;
}
