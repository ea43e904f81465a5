use std::time::Duration;

use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    services::prompt_builder::PromptSpec,
};

/// Boundary to the external chat-completion service. Implementations return
/// the raw text of the first choice, `None` when the service sent no content.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatCompletionGateway: Send + Sync {
    async fn complete_json(&self, prompt: &PromptSpec) -> AppResult<Option<String>>;
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatRequest {
    fn json_object(model: &str, prompt: &PromptSpec) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: prompt.system.clone(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt.user.clone(),
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
        }
    }
}

pub struct OpenAiGateway {
    client: Client<OpenAIConfig>,
    model: String,
    timeout: Duration,
}

impl OpenAiGateway {
    pub fn new(config: &Config) -> Self {
        let mut openai_config =
            OpenAIConfig::new().with_api_key(config.openai_api_key.expose_secret());
        if let Some(base) = &config.openai_api_base {
            openai_config = openai_config.with_api_base(base);
        }

        Self {
            client: Client::with_config(openai_config),
            model: config.openai_model.clone(),
            timeout: config.llm_timeout(),
        }
    }
}

#[async_trait]
impl ChatCompletionGateway for OpenAiGateway {
    async fn complete_json(&self, prompt: &PromptSpec) -> AppResult<Option<String>> {
        let request = ChatRequest::json_object(&self.model, prompt);
        log::debug!("Sending chat completion request to model {}", self.model);

        let response: ChatResponse =
            tokio::time::timeout(self.timeout, self.client.chat().create_byot(request))
                .await
                .map_err(|_| {
                    AppError::UpstreamError(format!(
                        "LLM request timed out after {}s",
                        self.timeout.as_secs()
                    ))
                })??;

        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_serializes_messages_and_json_format() {
        let prompt = PromptSpec {
            system: "system text".to_string(),
            user: "user text".to_string(),
        };

        let json = serde_json::to_value(ChatRequest::json_object("gpt-4o-mini", &prompt)).unwrap();

        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], "system text");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["response_format"]["type"], "json_object");
    }

    #[test]
    fn test_chat_response_tolerates_missing_content() {
        let response: ChatResponse = serde_json::from_value(serde_json::json!({
            "id": "chatcmpl-1",
            "choices": [{ "index": 0, "message": { "role": "assistant", "content": null } }]
        }))
        .unwrap();

        assert!(response.choices[0].message.content.is_none());
    }

    #[test]
    fn test_gateway_builds_from_config() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<OpenAiGateway>();

        let gateway = OpenAiGateway::new(&Config::test_config());
        assert_eq!(gateway.model, "gpt-4o-mini");
        assert_eq!(gateway.timeout, Duration::from_secs(5));
    }
}
