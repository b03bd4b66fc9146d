//! Mocks and fixtures shared by the Waypoint test suites.

use std::sync::Mutex;

use futures::future::BoxFuture;

use waypoint_core::error::{Result, WaypointError};
use waypoint_core::traits::{ChatProvider, McpSource};
use waypoint_core::types::{News, Variables, Weather};

enum Behavior {
    Reply(String),
    Fail(String),
}

/// Scripted [`ChatProvider`] that records every `(message, api_key)` it sees.
pub struct MockProvider {
    name: String,
    behavior: Behavior,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockProvider {
    /// Provider that always answers with `reply`.
    pub fn replying(name: &str, reply: &str) -> Self {
        Self::with(name, Behavior::Reply(reply.to_string()))
    }

    /// Provider whose every call fails with a request error.
    pub fn failing(name: &str, error: &str) -> Self {
        Self::with(name, Behavior::Fail(error.to_string()))
    }

    fn with(name: &str, behavior: Behavior) -> Self {
        Self {
            name: name.to_string(),
            behavior,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl ChatProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn complete<'a>(&'a self, message: &'a str, api_key: &'a str) -> BoxFuture<'a, Result<String>> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((message.to_string(), api_key.to_string()));
        }
        let result = match &self.behavior {
            Behavior::Reply(text) => Ok(text.clone()),
            Behavior::Fail(err) => Err(WaypointError::ProviderRequest(err.clone())),
        };
        Box::pin(async move { result })
    }
}

/// [`McpSource`] with nothing to report.
pub struct EmptyMcpSource;

impl McpSource for EmptyMcpSource {
    fn weather(&self) -> BoxFuture<'_, Option<Weather>> {
        Box::pin(async { None })
    }

    fn news(&self) -> BoxFuture<'_, Option<News>> {
        Box::pin(async { None })
    }
}

/// Build a variables map from `(name, value)` string pairs.
pub fn variables(pairs: &[(&str, &str)]) -> Variables {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
        .collect()
}
