use futures::future::BoxFuture;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use waypoint_core::error::{Result, WaypointError};
use waypoint_core::traits::ChatProvider;

use crate::presets::ProviderSettings;
use crate::providers::post_json;

/// OpenAI-compatible `/chat/completions` client. Used for DeepSeek.
pub struct ChatCompletionsClient {
    http: Client,
    name: String,
    settings: ProviderSettings,
}

impl ChatCompletionsClient {
    pub fn new(name: impl Into<String>, settings: ProviderSettings) -> Self {
        Self {
            http: Client::new(),
            name: name.into(),
            settings,
        }
    }
}

// Request types
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

// Response types
#[derive(Deserialize, Debug)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize, Debug)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

fn first_content(response: ChatResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or(WaypointError::EmptyCompletion)
}

impl ChatProvider for ChatCompletionsClient {
    fn name(&self) -> &str {
        &self.name
    }

    fn complete<'a>(&'a self, message: &'a str, api_key: &'a str) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            let body = ChatRequest {
                model: &self.settings.model,
                messages: vec![
                    ChatMessage {
                        role: "system",
                        content: &self.settings.system_prompt,
                    },
                    ChatMessage {
                        role: "user",
                        content: message,
                    },
                ],
                stream: false,
            };

            let url = self.settings.endpoint("chat/completions");
            debug!(provider = %self.name, url = %url, model = %self.settings.model, "Sending chat completion");

            let response: ChatResponse = post_json(&self.http, &url, api_key, &body).await?;
            first_content(response)
        })
    }
}
