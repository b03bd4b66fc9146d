use futures::future::BoxFuture;

use waypoint_core::traits::McpSource;
use waypoint_core::types::{News, Weather};

/// Fixed sample data served in place of live MCP weather and news services.
#[derive(Debug, Clone)]
pub struct StaticMcpSource {
    pub weather: Weather,
    pub news: News,
}

impl Default for StaticMcpSource {
    fn default() -> Self {
        Self {
            weather: Weather {
                temperature: 22.5,
                condition: "Sunny".to_string(),
                city: "Beijing".to_string(),
            },
            news: News {
                title: "Web3 technology is advancing rapidly".to_string(),
                summary: "Edge workers and edge computing are changing how web applications are built"
                    .to_string(),
            },
        }
    }
}

impl McpSource for StaticMcpSource {
    fn weather(&self) -> BoxFuture<'_, Option<Weather>> {
        let weather = self.weather.clone();
        Box::pin(async move { Some(weather) })
    }

    fn news(&self) -> BoxFuture<'_, Option<News>> {
        let news = self.news.clone();
        Box::pin(async move { Some(news) })
    }
}
