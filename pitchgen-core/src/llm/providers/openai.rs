use crate::config::constants::{defaults, message_roles, model_helpers, models};
use crate::llm::provider::{CompletionRequest, CompletionResponse, CompletionService, LLMError};
use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use serde_json::{Value, json};
use tracing::{info, warn};

pub struct OpenAIProvider {
    api_key: String,
    http_client: HttpClient,
    base_url: String,
}

impl OpenAIProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, defaults::DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            http_client: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn supported_models(&self) -> Vec<String> {
        models::openai::SUPPORTED_MODELS
            .iter()
            .map(|model| model.to_string())
            .collect()
    }

    /// Chat completions payload for a request
    pub fn build_payload(request: &CompletionRequest) -> Value {
        let reasoning = model_helpers::is_reasoning_model(&request.model);
        let system_role = if reasoning {
            message_roles::DEVELOPER
        } else {
            message_roles::SYSTEM
        };

        let mut payload = json!({
            "model": request.model,
            "messages": [
                { "role": system_role, "content": request.system_text },
                { "role": message_roles::USER, "content": request.user_text }
            ]
        });

        if reasoning {
            payload["reasoning_effort"] = json!(request.reasoning_effort.as_str());
        } else {
            payload["temperature"] = json!(request.temperature);
        }

        if let Some(schema) = &request.output_schema {
            payload["response_format"] = json!({
                "type": "json_schema",
                "json_schema": schema
            });
        }

        payload
    }

    /// Error for a non-success response: the API's `error.message` when present,
    /// else `API Error: <status>`
    fn error_for_status(status: StatusCode, body: &str) -> LLMError {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|parsed| {
                parsed
                    .pointer("/error/message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_else(|| format!("API Error: {}", status.as_u16()));

        match status {
            StatusCode::UNAUTHORIZED => LLMError::Authentication(message),
            StatusCode::TOO_MANY_REQUESTS => LLMError::RateLimit,
            _ => LLMError::Provider(message),
        }
    }

    fn parse_response(response_json: &Value) -> String {
        response_json
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }
}

#[async_trait]
impl CompletionService for OpenAIProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LLMError> {
        request.validate()?;
        if !model_helpers::is_known(&request.model) {
            warn!(model = %request.model, "model is not in the known model list; sending anyway");
        }

        let url = format!("{}/chat/completions", self.base_url);
        let payload = Self::build_payload(&request);
        info!(model = %request.model, url = %url, "dispatching completion request");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|err| LLMError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = Self::error_for_status(status, &body);
            warn!(status = status.as_u16(), error = %error, "completion request failed");
            return Err(error);
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|err| LLMError::Provider(format!("Failed to parse response: {err}")))?;

        Ok(CompletionResponse {
            content: Self::parse_response(&response_json),
            model: request.model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{ComponentType, schema_of};
    use crate::llm::ReasoningEffort;

    fn request(model: &str) -> CompletionRequest {
        CompletionRequest {
            system_text: "sys".to_string(),
            user_text: "usr".to_string(),
            model: model.to_string(),
            temperature: 0.7,
            reasoning_effort: ReasoningEffort::High,
            output_schema: Some(schema_of(ComponentType::Services)),
        }
    }

    #[test]
    fn reasoning_models_use_developer_role_and_effort() {
        let payload = OpenAIProvider::build_payload(&request("gpt-5.2"));
        assert_eq!(payload["messages"][0]["role"], "developer");
        assert_eq!(payload["messages"][1]["role"], "user");
        assert_eq!(payload["reasoning_effort"], "high");
        assert!(payload.get("temperature").is_none());
    }

    #[test]
    fn other_models_use_system_role_and_temperature() {
        let payload = OpenAIProvider::build_payload(&request("gpt-4o"));
        assert_eq!(payload["messages"][0]["role"], "system");
        assert!(payload["temperature"].is_number());
        assert!(payload.get("reasoning_effort").is_none());
    }

    #[test]
    fn schema_is_sent_as_json_schema_response_format() {
        let payload = OpenAIProvider::build_payload(&request("gpt-5.2"));
        assert_eq!(payload["response_format"]["type"], "json_schema");
        assert_eq!(
            payload["response_format"]["json_schema"]["name"],
            "services_response"
        );
        assert_eq!(payload["response_format"]["json_schema"]["strict"], true);

        let mut plain = request("gpt-5.2");
        plain.output_schema = None;
        assert!(OpenAIProvider::build_payload(&plain).get("response_format").is_none());
    }

    #[test]
    fn error_message_prefers_api_body() {
        let error = OpenAIProvider::error_for_status(
            StatusCode::BAD_REQUEST,
            r#"{"error":{"message":"Invalid schema"}}"#,
        );
        assert_eq!(error, LLMError::Provider("Invalid schema".to_string()));

        let error = OpenAIProvider::error_for_status(StatusCode::BAD_GATEWAY, "<html>");
        assert_eq!(error, LLMError::Provider("API Error: 502".to_string()));

        assert_eq!(
            OpenAIProvider::error_for_status(StatusCode::TOO_MANY_REQUESTS, ""),
            LLMError::RateLimit
        );
        assert!(matches!(
            OpenAIProvider::error_for_status(StatusCode::UNAUTHORIZED, ""),
            LLMError::Authentication(_)
        ));
    }

    #[test]
    fn content_is_read_from_first_choice() {
        let body = json!({ "choices": [{ "message": { "content": "{\"componentData\":{}}" } }] });
        assert_eq!(OpenAIProvider::parse_response(&body), "{\"componentData\":{}}");
        assert_eq!(OpenAIProvider::parse_response(&json!({ "choices": [] })), "");
    }
}
