use waypoint_core::config::Credentials;
use waypoint_core::traits::McpSource;
use waypoint_core::types::{iso_timestamp, ChatResult, GreetingResult, McpDataResult};
use waypoint_llm::ProviderSelector;

pub const GREETING: &str = "✅ Waypoint gateway connected successfully!";

pub fn greeting() -> GreetingResult {
    GreetingResult {
        greeting: GREETING.to_string(),
        timestamp: iso_timestamp(),
    }
}

pub async fn mcp_data(source: &dyn McpSource) -> McpDataResult {
    let (weather, news) = futures::join!(source.weather(), source.news());
    McpDataResult {
        mcp_weather: weather,
        mcp_news: news,
    }
}

pub async fn chat_with_ai(
    selector: &ProviderSelector,
    message: &str,
    credentials: &Credentials,
) -> ChatResult {
    selector.chat(message, credentials).await.into()
}
