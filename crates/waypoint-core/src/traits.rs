use futures::future::BoxFuture;

use crate::error::Result;
use crate::types::{News, Weather};

/// Chat-completion provider. One non-streaming request per call.
pub trait ChatProvider: Send + Sync + 'static {
    /// Provider name for logs (e.g., "deepseek").
    fn name(&self) -> &str;

    /// Send `message` with the provider's fixed system instruction and
    /// return the text of the first completion.
    fn complete<'a>(&'a self, message: &'a str, api_key: &'a str) -> BoxFuture<'a, Result<String>>;
}

/// Backing source for the `GetMCPData` query.
pub trait McpSource: Send + Sync + 'static {
    fn weather(&self) -> BoxFuture<'_, Option<Weather>>;

    fn news(&self) -> BoxFuture<'_, Option<News>>;
}
