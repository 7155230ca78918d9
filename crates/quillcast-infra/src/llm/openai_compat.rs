//! OpenAI-compatible LLM provider.
//!
//! Speaks the chat-completions wire format (`/chat/completions`) with tool
//! calls and JSON-schema constrained responses, so any endpoint exposing
//! that surface works via a configurable base URL.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use quillcast_core::llm::LlmProvider;
use quillcast_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, MessageRole, StopReason, TokenCount, Usage,
};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Provider for any OpenAI-compatible chat-completions API.
pub struct OpenAiCompatibleProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    provider_name: String,
}

// OpenAiCompatibleProvider intentionally does NOT derive Debug; the
// SecretString field keeps the key out of accidental prints, and omitting
// Debug entirely removes the rest of the surface.

impl OpenAiCompatibleProvider {
    /// Create a provider against the OpenAI endpoint.
    ///
    /// `client` is the shared HTTP client from
    /// [`crate::http::shared_http_client`].
    pub fn new(client: reqwest::Client, api_key: SecretString) -> Self {
        Self {
            client,
            api_key,
            base_url: OPENAI_BASE_URL.to_string(),
            provider_name: "openai".to_string(),
        }
    }

    /// Point the provider at a different compatible endpoint.
    pub fn with_base_url(mut self, name: impl Into<String>, base_url: impl Into<String>) -> Self {
        self.provider_name = name.into();
        self.base_url = base_url.into();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn to_chat_request(request: &CompletionRequest) -> ChatRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if let Some(ref system) = request.system {
            messages.push(ChatMessage {
                role: "system",
                content: system.clone(),
                name: None,
            });
        }
        for msg in &request.messages {
            messages.push(ChatMessage {
                role: match msg.role {
                    MessageRole::System => "system",
                    MessageRole::Human => "user",
                    MessageRole::Ai => "assistant",
                },
                content: msg.content.clone(),
                name: msg.name.clone(),
            });
        }

        let tools = request.tools.as_ref().map(|specs| {
            specs
                .iter()
                .map(|spec| ChatTool {
                    tool_type: "function",
                    function: ChatFunction {
                        name: spec.name.clone(),
                        description: spec.description.clone(),
                        parameters: spec.input_schema.clone(),
                    },
                })
                .collect()
        });

        // OutputConfig's wire shape is already the chat-completions
        // `response_format` object.
        let response_format = request
            .output_config
            .as_ref()
            .and_then(|cfg| serde_json::to_value(&cfg.format).ok());

        ChatRequest {
            model: request.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            tools,
            response_format,
        }
    }

    fn map_stop_reason(finish_reason: Option<&str>) -> StopReason {
        match finish_reason {
            Some("tool_calls") => StopReason::ToolUse,
            Some("length") => StopReason::MaxTokens,
            _ => StopReason::EndTurn,
        }
    }

    fn to_completion_response(resp: ChatResponse) -> Result<CompletionResponse, LlmError> {
        let choice = resp
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::Deserialization("response held no choices".to_string()))?;

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|call| {
                let input = serde_json::from_str(&call.function.arguments).map_err(|e| {
                    LlmError::Deserialization(format!("tool arguments not valid JSON: {e}"))
                })?;
                Ok(quillcast_types::llm::ToolCall {
                    id: call.id,
                    name: call.function.name,
                    input,
                })
            })
            .collect::<Result<Vec<_>, LlmError>>()?;

        Ok(CompletionResponse {
            id: resp.id,
            content: choice.message.content.unwrap_or_default(),
            tool_calls,
            model: resp.model,
            stop_reason: Self::map_stop_reason(choice.finish_reason.as_deref()),
            usage: resp
                .usage
                .map(|u| Usage {
                    input_tokens: u.prompt_tokens,
                    output_tokens: u.completion_tokens,
                })
                .unwrap_or_default(),
        })
    }
}

impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.provider_name
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = Self::to_chat_request(request);

        let response = self
            .client
            .post(self.url("/chat/completions"))
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 => LlmError::AuthenticationFailed,
                429 => LlmError::RateLimited {
                    retry_after_ms: None,
                },
                _ => LlmError::Provider {
                    message: format!("HTTP {status}: {error_body}"),
                },
            });
        }

        let chat_resp: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        Self::to_completion_response(chat_resp)
    }

    async fn count_tokens(&self, request: &CompletionRequest) -> Result<TokenCount, LlmError> {
        // No counting endpoint on this surface; estimate at ~4 chars per
        // token with per-message overhead.
        let mut total_chars: usize = request.system.as_deref().map_or(0, str::len);
        for msg in &request.messages {
            total_chars += msg.content.len() + 10;
        }
        Ok(TokenCount {
            input_tokens: (total_chars as f64 / 4.0).ceil() as u32,
        })
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<ChatTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatTool {
    #[serde(rename = "type")]
    tool_type: &'static str,
    function: ChatFunction,
}

#[derive(Debug, Serialize)]
struct ChatFunction {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    id: String,
    model: String,
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
    tool_calls: Option<Vec<ChatToolCall>>,
}

#[derive(Debug, Deserialize)]
struct ChatToolCall {
    id: String,
    function: ChatFunctionCall,
}

#[derive(Debug, Deserialize)]
struct ChatFunctionCall {
    name: String,
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use quillcast_types::llm::{Message, OutputConfig, ToolSpec};

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![
                Message::human("write about cats"),
                Message::human_named("cats purr at 25 Hz", "researcher"),
                Message::ai("noted"),
            ],
            system: Some("You are a writer.".to_string()),
            max_tokens: 1024,
            temperature: Some(0.0),
            tools: Some(vec![ToolSpec {
                name: "post_tweet".to_string(),
                description: "publish".to_string(),
                input_schema: serde_json::json!({"type": "object"}),
            }]),
            output_config: None,
        }
    }

    #[test]
    fn test_request_mapping() {
        let chat = OpenAiCompatibleProvider::to_chat_request(&request());
        assert_eq!(chat.messages.len(), 4);
        assert_eq!(chat.messages[0].role, "system");
        assert_eq!(chat.messages[1].role, "user");
        assert_eq!(chat.messages[2].name.as_deref(), Some("researcher"));
        assert_eq!(chat.messages[3].role, "assistant");

        let tools = chat.tools.unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].function.name, "post_tweet");
    }

    #[test]
    fn test_response_format_wire_shape() {
        let mut req = request();
        req.output_config = Some(OutputConfig::json_schema(
            "router_decision",
            serde_json::json!({"type": "object"}),
        ));
        let chat = OpenAiCompatibleProvider::to_chat_request(&req);
        let format = chat.response_format.unwrap();
        assert_eq!(format["type"], "json_schema");
        assert_eq!(format["json_schema"]["name"], "router_decision");
        assert_eq!(format["json_schema"]["strict"], true);
    }

    #[test]
    fn test_stop_reason_mapping() {
        assert_eq!(
            OpenAiCompatibleProvider::map_stop_reason(Some("stop")),
            StopReason::EndTurn
        );
        assert_eq!(
            OpenAiCompatibleProvider::map_stop_reason(Some("tool_calls")),
            StopReason::ToolUse
        );
        assert_eq!(
            OpenAiCompatibleProvider::map_stop_reason(Some("length")),
            StopReason::MaxTokens
        );
        assert_eq!(
            OpenAiCompatibleProvider::map_stop_reason(None),
            StopReason::EndTurn
        );
    }

    #[test]
    fn test_tool_call_arguments_parsed_from_string() {
        let resp: ChatResponse = serde_json::from_str(
            r#"{
                "id": "chatcmpl-1",
                "model": "gpt-4o-mini",
                "choices": [{
                    "message": {
                        "content": null,
                        "tool_calls": [{
                            "id": "call-1",
                            "function": {
                                "name": "post_tweet",
                                "arguments": "{\"tweet\": \"cats are liquid\"}"
                            }
                        }]
                    },
                    "finish_reason": "tool_calls"
                }],
                "usage": {"prompt_tokens": 42, "completion_tokens": 7}
            }"#,
        )
        .unwrap();

        let completion = OpenAiCompatibleProvider::to_completion_response(resp).unwrap();
        assert_eq!(completion.stop_reason, StopReason::ToolUse);
        assert_eq!(completion.tool_calls.len(), 1);
        assert_eq!(completion.tool_calls[0].input["tweet"], "cats are liquid");
        assert_eq!(completion.usage.input_tokens, 42);
    }

    #[test]
    fn test_malformed_tool_arguments_are_an_error() {
        let resp: ChatResponse = serde_json::from_str(
            r#"{
                "id": "chatcmpl-1",
                "model": "gpt-4o-mini",
                "choices": [{
                    "message": {
                        "content": null,
                        "tool_calls": [{
                            "id": "call-1",
                            "function": {"name": "post_tweet", "arguments": "not json"}
                        }]
                    },
                    "finish_reason": "tool_calls"
                }],
                "usage": null
            }"#,
        )
        .unwrap();

        let err = OpenAiCompatibleProvider::to_completion_response(resp).unwrap_err();
        assert!(matches!(err, LlmError::Deserialization(_)));
    }

    #[tokio::test]
    async fn test_count_tokens_estimation() {
        let provider = OpenAiCompatibleProvider::new(
            reqwest::Client::new(),
            SecretString::from("test-key-not-real"),
        );
        let count = provider.count_tokens(&request()).await.unwrap();
        assert!(count.input_tokens > 0);
        assert!(count.input_tokens < 100);
    }

    #[test]
    fn test_base_url_override() {
        let provider = OpenAiCompatibleProvider::new(
            reqwest::Client::new(),
            SecretString::from("test-key-not-real"),
        )
        .with_base_url("mistral", "https://api.mistral.ai/v1");
        assert_eq!(provider.name(), "mistral");
        assert_eq!(
            provider.url("/chat/completions"),
            "https://api.mistral.ai/v1/chat/completions"
        );
    }
}
