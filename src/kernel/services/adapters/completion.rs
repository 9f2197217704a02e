use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::kernel::services::ports::{
    AssistantSettings, CompletionError, CompletionRequest, CompletionService,
};

#[derive(Clone, Debug)]
pub struct CompletionConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub api_key_env: String,
    pub timeout: Duration,
}

impl CompletionConfig {
    /// Reads the API key from the environment variable named in settings.
    pub fn from_settings(settings: &AssistantSettings) -> Self {
        let api_key = std::env::var(&settings.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());
        Self {
            endpoint: settings.endpoint.clone(),
            model: settings.model.clone(),
            api_key,
            api_key_env: settings.api_key_env.clone(),
            timeout: Duration::from_secs(settings.timeout_secs.max(1)),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    stream: bool,
    temperature: f32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// OpenAI-compatible chat-completions client.
pub struct HttpCompletionService {
    config: CompletionConfig,
    agent: ureq::Agent,
}

impl HttpCompletionService {
    pub fn new(config: CompletionConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(10))
            .timeout_read(config.timeout)
            .build();
        Self { config, agent }
    }

    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }
}

impl CompletionService for HttpCompletionService {
    fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| CompletionError::MissingApiKey(self.config.api_key_env.clone()))?;

        let mut messages = Vec::with_capacity(2);
        if !request.system_prompt.is_empty() {
            messages.push(Message {
                role: "system",
                content: &request.system_prompt,
            });
        }
        messages.push(Message {
            role: "user",
            content: &request.user_message,
        });
        let body = ChatRequest {
            model: &self.config.model,
            messages,
            stream: false,
            temperature: request.temperature,
        };

        tracing::debug!(endpoint = %self.config.endpoint, model = %self.config.model, "completion request");
        let response = self
            .agent
            .post(&self.config.endpoint)
            .set("Authorization", &format!("Bearer {}", api_key))
            .set("Content-Type", "application/json")
            .send_json(&body);

        let response = match response {
            Ok(r) => r,
            Err(ureq::Error::Status(status, r)) => {
                let body = r.into_string().unwrap_or_default();
                return Err(CompletionError::Http { status, body });
            }
            Err(e) => return Err(CompletionError::Transport(e.to_string())),
        };

        let parsed: ChatResponse = response
            .into_json()
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| CompletionError::InvalidResponse("no choices".to_string()))
    }
}
