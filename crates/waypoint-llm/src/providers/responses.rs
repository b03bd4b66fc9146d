use futures::future::BoxFuture;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use waypoint_core::error::{Result, WaypointError};
use waypoint_core::traits::ChatProvider;

use crate::presets::ProviderSettings;
use crate::providers::post_json;

/// OpenAI `/responses` client: `instructions` + `input`, text from
/// `output_text` content parts.
pub struct ResponsesClient {
    http: Client,
    name: String,
    settings: ProviderSettings,
}

impl ResponsesClient {
    pub fn new(name: impl Into<String>, settings: ProviderSettings) -> Self {
        Self {
            http: Client::new(),
            name: name.into(),
            settings,
        }
    }
}

#[derive(Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    instructions: &'a str,
    input: &'a str,
}

#[derive(Deserialize, Debug)]
struct ResponsesReply {
    // Some compatible servers flatten the text for us.
    #[serde(default)]
    output_text: Option<String>,
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Deserialize, Debug)]
struct OutputItem {
    #[serde(default)]
    content: Vec<ContentPart>,
}

#[derive(Deserialize, Debug)]
struct ContentPart {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

fn output_text(reply: ResponsesReply) -> Result<String> {
    if let Some(text) = reply.output_text.filter(|t| !t.is_empty()) {
        return Ok(text);
    }

    let text: String = reply
        .output
        .into_iter()
        .flat_map(|item| item.content)
        .filter(|part| part.kind == "output_text")
        .filter_map(|part| part.text)
        .collect();

    if text.is_empty() {
        Err(WaypointError::EmptyCompletion)
    } else {
        Ok(text)
    }
}

impl ChatProvider for ResponsesClient {
    fn name(&self) -> &str {
        &self.name
    }

    fn complete<'a>(&'a self, message: &'a str, api_key: &'a str) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            let body = ResponsesRequest {
                model: &self.settings.model,
                instructions: &self.settings.system_prompt,
                input: message,
            };

            let url = self.settings.endpoint("responses");
            debug!(provider = %self.name, url = %url, model = %self.settings.model, "Sending response request");

            let reply: ResponsesReply = post_json(&self.http, &url, api_key, &body).await?;
            output_text(reply)
        })
    }
}
