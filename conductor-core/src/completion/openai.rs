use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use super::traits::{ChatMessage, ChatRole, CompletionClient, CompletionOutcome};
use crate::agents::tools::ToolDescriptor;
use crate::config::CompletionConfig;
use crate::error::{ConductorError, ConductorResult};

/// Completion client for an OpenAI-compatible chat-completions endpoint.
///
/// Tool catalogs are mapped to function definitions; the first tool call in
/// the reply wins. Failures propagate as errors and are absorbed at the
/// action-handler boundary.
pub struct HttpCompletionClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl HttpCompletionClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            model: model.into(),
            api_key: std::env::var("COMPLETION_API_KEY").ok(),
        }
    }

    pub fn from_config(config: &CompletionConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            api_key: config
                .api_key
                .clone()
                .or_else(|| std::env::var("COMPLETION_API_KEY").ok()),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    fn tool_definitions(tools: &[ToolDescriptor]) -> Vec<serde_json::Value> {
        tools
            .iter()
            .map(|tool| {
                let mut properties = serde_json::Map::new();
                let mut required = Vec::new();
                for param in &tool.parameters {
                    properties.insert(
                        param.name.clone(),
                        json!({"type": "string", "description": param.description}),
                    );
                    if param.required {
                        required.push(param.name.clone());
                    }
                }
                json!({
                    "type": "function",
                    "function": {
                        "name": tool.name,
                        "description": tool.description,
                        "parameters": {
                            "type": "object",
                            "properties": properties,
                            "required": required,
                        }
                    }
                })
            })
            .collect()
    }
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<ToolCall>,
}

#[derive(Debug, Deserialize)]
struct ToolCall {
    function: FunctionCall,
}

#[derive(Debug, Deserialize)]
struct FunctionCall {
    name: String,
    arguments: String,
}

fn role_str(role: ChatRole) -> &'static str {
    match role {
        ChatRole::System => "system",
        ChatRole::User => "user",
        ChatRole::Assistant => "assistant",
    }
}

fn parse_arguments(raw: &str) -> ConductorResult<HashMap<String, String>> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| ConductorError::CompletionParseError(format!("tool arguments: {e}")))?;

    let object = value.as_object().ok_or_else(|| {
        ConductorError::CompletionParseError("tool arguments are not an object".to_string())
    })?;

    Ok(object
        .iter()
        .map(|(k, v)| {
            let rendered = match v {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (k.clone(), rendered)
        })
        .collect())
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(
        &self,
        system_message: &str,
        transcript: &[ChatMessage],
        tools: &[ToolDescriptor],
    ) -> ConductorResult<CompletionOutcome> {
        let mut messages = vec![WireMessage {
            role: "system",
            content: system_message,
        }];
        messages.extend(transcript.iter().map(|m| WireMessage {
            role: role_str(m.role),
            content: &m.content,
        }));

        let mut body = json!({
            "model": self.model,
            "messages": messages,
        });
        if !tools.is_empty() {
            body["tools"] = json!(Self::tool_definitions(tools));
            body["tool_choice"] = json!("auto");
        }

        let mut request = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ConductorError::CompletionRequestFailed(format!(
                "endpoint returned {status}: {detail}"
            )));
        }

        let parsed: ChatCompletionResponse = response.json().await?;
        let choice = parsed.choices.into_iter().next().ok_or_else(|| {
            ConductorError::CompletionParseError("response contained no choices".to_string())
        })?;

        if let Some(call) = choice.message.tool_calls.into_iter().next() {
            debug!(tool = %call.function.name, "Completion chose a tool");
            let arguments = parse_arguments(&call.function.arguments)?;
            return Ok(CompletionOutcome::ToolCall {
                name: call.function.name,
                arguments,
            });
        }

        match choice.message.content {
            Some(content) => Ok(CompletionOutcome::Message(content)),
            None => {
                warn!("Completion reply had neither content nor tool calls");
                Err(ConductorError::CompletionParseError(
                    "reply had neither content nor tool calls".to_string(),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::tools::{ToolDescriptor, ToolParameter};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_tool() -> ToolDescriptor {
        ToolDescriptor {
            name: "greet".to_string(),
            description: "Greet someone".to_string(),
            parameters: vec![ToolParameter {
                name: "name".to_string(),
                description: "who to greet".to_string(),
                required: true,
            }],
            response_template: "Hello {name}".to_string(),
        }
    }

    #[test]
    fn test_tool_definitions_shape() {
        let defs = HttpCompletionClient::tool_definitions(&[sample_tool()]);
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0]["function"]["name"], "greet");
        assert_eq!(defs[0]["function"]["parameters"]["required"][0], "name");
    }

    #[test]
    fn test_parse_arguments_strings_and_numbers() {
        let args = parse_arguments(r#"{"name": "Alice", "count": 3}"#).unwrap();
        assert_eq!(args.get("name").map(String::as_str), Some("Alice"));
        assert_eq!(args.get("count").map(String::as_str), Some("3"));
    }

    #[test]
    fn test_parse_arguments_rejects_non_object() {
        assert!(parse_arguments("[1, 2]").is_err());
        assert!(parse_arguments("not json").is_err());
    }

    #[tokio::test]
    async fn test_complete_returns_tool_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{
                    "message": {
                        "content": null,
                        "tool_calls": [{
                            "function": {
                                "name": "greet",
                                "arguments": "{\"name\": \"Alice\"}"
                            }
                        }]
                    }
                }]
            })))
            .mount(&server)
            .await;

        let client = HttpCompletionClient::new(server.uri(), "test-model");
        let outcome = client
            .complete("system", &[ChatMessage::user("hi")], &[sample_tool()])
            .await
            .unwrap();

        match outcome {
            CompletionOutcome::ToolCall { name, arguments } => {
                assert_eq!(name, "greet");
                assert_eq!(arguments.get("name").map(String::as_str), Some("Alice"));
            }
            other => panic!("expected tool call, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_complete_returns_plain_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{
                    "message": {"content": "done", "tool_calls": []}
                }]
            })))
            .mount(&server)
            .await;

        let client = HttpCompletionClient::new(server.uri(), "test-model");
        let outcome = client.complete("system", &[], &[]).await.unwrap();
        assert_eq!(outcome, CompletionOutcome::Message("done".to_string()));
    }

    #[tokio::test]
    async fn test_complete_maps_http_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = HttpCompletionClient::new(server.uri(), "test-model");
        let err = client.complete("system", &[], &[]).await.unwrap_err();
        assert!(matches!(err, ConductorError::CompletionRequestFailed(_)));
    }
}
