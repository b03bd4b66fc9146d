use std::collections::HashMap;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Current UTC time in the `2026-01-01T00:00:00.000Z` form browsers produce.
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Variables sent alongside a query. Values keep their JSON type; only
/// strings are read as arguments.
pub type Variables = HashMap<String, serde_json::Value>;

/// Incoming POST body for `/graphql`.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlRequest {
    pub query: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub variables: Variables,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Variables, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Variables>::deserialize(deserializer)?.unwrap_or_default())
}

/// Top-level response body. Serializes to exactly one of `data` or `errors`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Envelope {
    Data(OperationData),
    Errors(Vec<GraphQlError>),
}

impl Envelope {
    pub fn error(message: impl Into<String>) -> Self {
        Envelope::Errors(vec![GraphQlError {
            message: message.into(),
        }])
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Envelope::Errors(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// Payload of a successful operation.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum OperationData {
    Greeting(GreetingResult),
    McpData(McpDataResult),
    Chat {
        #[serde(rename = "chatWithAI")]
        chat_with_ai: ChatResult,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct GreetingResult {
    pub greeting: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct McpDataResult {
    pub mcp_weather: Option<Weather>,
    pub mcp_news: Option<News>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    pub temperature: f64,
    pub condition: String,
    pub city: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct News {
    pub title: String,
    pub summary: String,
}

/// Which backend produced a chat response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelLabel {
    DeepSeek,
    OpenAI,
    Mock,
    Error,
}

impl ModelLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelLabel::DeepSeek => "DeepSeek",
            ModelLabel::OpenAI => "OpenAI",
            ModelLabel::Mock => "Mock",
            ModelLabel::Error => "Error",
        }
    }
}

impl std::fmt::Display for ModelLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of the provider selector, before it is stamped with a time.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub response: String,
    pub model: ModelLabel,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatResult {
    pub response: String,
    pub model: ModelLabel,
    pub timestamp: String,
}

impl From<ChatReply> for ChatResult {
    fn from(reply: ChatReply) -> Self {
        Self {
            response: reply.response,
            model: reply.model,
            timestamp: iso_timestamp(),
        }
    }
}
