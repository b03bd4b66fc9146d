use std::sync::Arc;

use tracing::{debug, warn};

use waypoint_core::config::{AppConfig, Credentials};
use waypoint_core::traits::McpSource;
use waypoint_core::types::{Envelope, OperationData, Variables};
use waypoint_llm::ProviderSelector;

use crate::extract::resolve_message;
use crate::mcp::StaticMcpSource;
use crate::resolvers;

pub const UNSUPPORTED_OPERATION: &str = "unsupported GraphQL operation";

/// Operations the dispatcher knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Greeting,
    McpData,
    ChatWithAi,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Greeting => "GetGreeting",
            Operation::McpData => "GetMCPData",
            Operation::ChatWithAi => "chatWithAI",
        }
    }
}

/// A classification rule: raw-text predicate → operation.
struct Rule {
    operation: Operation,
    matches: fn(&str) -> bool,
}

// Case-sensitive substring checks against the raw query text, evaluated in
// order. A marker inside an unrelated query still matches.
const RULES: &[Rule] = &[
    Rule {
        operation: Operation::Greeting,
        matches: is_greeting,
    },
    Rule {
        operation: Operation::McpData,
        matches: is_mcp_data,
    },
    Rule {
        operation: Operation::ChatWithAi,
        matches: is_chat,
    },
];

fn is_greeting(query: &str) -> bool {
    query.contains("query") && query.contains("GetGreeting")
}

fn is_mcp_data(query: &str) -> bool {
    query.contains("query") && query.contains("GetMCPData")
}

fn is_chat(query: &str) -> bool {
    query.contains("mutation") && query.contains("chatWithAI")
}

/// First operation whose rule matches `query`.
pub fn classify(query: &str) -> Option<Operation> {
    RULES
        .iter()
        .find(|rule| (rule.matches)(query))
        .map(|rule| rule.operation)
}

/// Per-request inputs that are not part of the query itself.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext<'a> {
    pub credentials: &'a Credentials,
}

/// Routes GraphQL-shaped requests to their resolvers.
pub struct Dispatcher {
    selector: ProviderSelector,
    mcp: Arc<dyn McpSource>,
}

impl Dispatcher {
    pub fn new(selector: ProviderSelector, mcp: Arc<dyn McpSource>) -> Self {
        Self { selector, mcp }
    }

    /// Default providers (with config overrides) and static MCP data.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            ProviderSelector::from_config(config),
            Arc::new(StaticMcpSource::default()),
        )
    }

    /// Classify and run one request. Always yields an envelope; unknown
    /// operations become an `errors` envelope.
    pub async fn dispatch(
        &self,
        query: &str,
        variables: &Variables,
        ctx: RequestContext<'_>,
    ) -> Envelope {
        let Some(operation) = classify(query) else {
            warn!(query_len = query.len(), "Unsupported GraphQL operation");
            return Envelope::error(UNSUPPORTED_OPERATION);
        };

        debug!(operation = operation.name(), "Dispatching operation");

        let data = match operation {
            Operation::Greeting => OperationData::Greeting(resolvers::greeting()),
            Operation::McpData => {
                OperationData::McpData(resolvers::mcp_data(self.mcp.as_ref()).await)
            }
            Operation::ChatWithAi => {
                let message = resolve_message(variables, query).unwrap_or_else(|| {
                    warn!("chatWithAI called without a message argument");
                    String::new()
                });
                OperationData::Chat {
                    chat_with_ai: resolvers::chat_with_ai(
                        &self.selector,
                        &message,
                        ctx.credentials,
                    )
                    .await,
                }
            }
        };

        Envelope::Data(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_core::types::ModelLabel;
    use waypoint_llm::ProviderSlot;
    use waypoint_test_utils::{variables, EmptyMcpSource, MockProvider};

    fn dispatcher_with(provider: Arc<MockProvider>) -> Dispatcher {
        let selector = ProviderSelector::new(vec![ProviderSlot {
            label: ModelLabel::DeepSeek,
            credential: |c| c.deepseek.as_deref(),
            client: provider,
        }]);
        Dispatcher::new(selector, Arc::new(StaticMcpSource::default()))
    }

    async fn run(dispatcher: &Dispatcher, query: &str, vars: &Variables, creds: &Credentials) -> serde_json::Value {
        let envelope = dispatcher
            .dispatch(query, vars, RequestContext { credentials: creds })
            .await;
        serde_json::to_value(envelope).unwrap()
    }

    #[test]
    fn test_classify_rules() {
        assert_eq!(classify("query GetGreeting { greeting }"), Some(Operation::Greeting));
        assert_eq!(classify("query GetMCPData { mcpNews { title } }"), Some(Operation::McpData));
        assert_eq!(
            classify(r#"mutation { chatWithAI(message: "x") { response } }"#),
            Some(Operation::ChatWithAi)
        );
        assert_eq!(classify("query Unknown { foo }"), None);
    }

    #[test]
    fn test_classify_requires_keyword() {
        // Marker without the `query` keyword does not match.
        assert_eq!(classify("{ GetGreeting }"), None);
        // chatWithAI inside a query is not a mutation.
        assert_eq!(classify("query { chatWithAI }"), None);
    }

    #[test]
    fn test_classify_first_rule_wins() {
        assert_eq!(
            classify("query GetMCPData { greeting } # GetGreeting"),
            Some(Operation::Greeting)
        );
        // Substring matching is deliberately loose.
        assert_eq!(
            classify("mutation { x } query GetGreeting chatWithAI"),
            Some(Operation::Greeting)
        );
    }

    #[tokio::test]
    async fn test_greeting_envelope() {
        let d = dispatcher_with(Arc::new(MockProvider::replying("deepseek", "x")));
        let json = run(&d, "query GetGreeting { greeting timestamp }", &Variables::new(), &Credentials::default()).await;
        assert!(!json["data"]["greeting"].as_str().unwrap().is_empty());
        let ts = json["data"]["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
        assert!(json.get("errors").is_none());
    }

    #[tokio::test]
    async fn test_mcp_data_envelope() {
        let d = dispatcher_with(Arc::new(MockProvider::replying("deepseek", "x")));
        let json = run(&d, "query GetMCPData { mcpWeather { city } }", &Variables::new(), &Credentials::default()).await;
        assert!(json["data"]["mcpWeather"]["temperature"].as_f64().unwrap().is_finite());
        assert!(!json["data"]["mcpNews"]["title"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mcp_data_nulls_from_empty_source() {
        let selector = ProviderSelector::new(vec![]);
        let d = Dispatcher::new(selector, Arc::new(EmptyMcpSource));
        let json = run(&d, "query GetMCPData { mcpNews { title } }", &Variables::new(), &Credentials::default()).await;
        assert!(json["data"]["mcpWeather"].is_null());
        assert!(json["data"]["mcpNews"].is_null());
    }

    #[tokio::test]
    async fn test_repeated_queries_are_structurally_identical() {
        let d = dispatcher_with(Arc::new(MockProvider::replying("deepseek", "x")));
        let creds = Credentials::default();
        let mut first = run(&d, "query GetMCPData { x }", &Variables::new(), &creds).await;
        let mut second = run(&d, "query GetMCPData { x }", &Variables::new(), &creds).await;
        assert_eq!(first, second);

        first = run(&d, "query GetGreeting { x }", &Variables::new(), &creds).await;
        second = run(&d, "query GetGreeting { x }", &Variables::new(), &creds).await;
        assert_eq!(first["data"]["greeting"], second["data"]["greeting"]);
    }

    #[tokio::test]
    async fn test_chat_mock_mode_with_variables() {
        let d = dispatcher_with(Arc::new(MockProvider::replying("deepseek", "x")));
        let vars = variables(&[("message", "hello")]);
        let json = run(
            &d,
            "mutation ChatWithAI($message: String!) { chatWithAI(message: $message) { response } }",
            &vars,
            &Credentials::default(),
        )
        .await;
        let chat = &json["data"]["chatWithAI"];
        assert_eq!(chat["model"], "Mock");
        assert!(chat["response"].as_str().unwrap().contains("hello"));
        assert!(chat["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_chat_inline_literal_reaches_provider() {
        let provider = Arc::new(MockProvider::replying("deepseek", "Hello back"));
        let d = dispatcher_with(provider.clone());
        let creds = Credentials {
            deepseek: Some("sk-ds".into()),
            openai: None,
        };
        let json = run(&d, r#"mutation { chatWithAI(message: "hi") }"#, &Variables::new(), &creds).await;
        assert_eq!(json["data"]["chatWithAI"]["model"], "DeepSeek");
        assert_eq!(json["data"]["chatWithAI"]["response"], "Hello back");
        assert_eq!(provider.calls(), vec![("hi".to_string(), "sk-ds".to_string())]);
    }

    #[tokio::test]
    async fn test_chat_provider_failure_is_data() {
        let d = dispatcher_with(Arc::new(MockProvider::failing("deepseek", "timeout")));
        let creds = Credentials {
            deepseek: Some("sk-ds".into()),
            openai: None,
        };
        let json = run(&d, r#"mutation { chatWithAI(message: "hi") }"#, &Variables::new(), &creds).await;
        assert_eq!(json["data"]["chatWithAI"]["model"], "Error");
        assert!(json["data"]["chatWithAI"]["response"]
            .as_str()
            .unwrap()
            .contains("AI call failed"));
        assert!(json.get("errors").is_none());
    }

    #[tokio::test]
    async fn test_chat_without_message_sends_empty_string() {
        let provider = Arc::new(MockProvider::replying("deepseek", "ok"));
        let d = dispatcher_with(provider.clone());
        let creds = Credentials {
            deepseek: Some("sk-ds".into()),
            openai: None,
        };
        run(&d, "mutation { chatWithAI { response } }", &Variables::new(), &creds).await;
        assert_eq!(provider.calls(), vec![(String::new(), "sk-ds".to_string())]);
    }

    #[tokio::test]
    async fn test_unsupported_operation() {
        let d = dispatcher_with(Arc::new(MockProvider::replying("deepseek", "x")));
        let json = run(&d, "query Unknown { foo }", &Variables::new(), &Credentials::default()).await;
        assert_eq!(
            json,
            serde_json::json!({ "errors": [{ "message": "unsupported GraphQL operation" }] })
        );
    }
}
