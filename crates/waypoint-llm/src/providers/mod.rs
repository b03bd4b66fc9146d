pub mod chat_completions;
pub mod responses;

pub use chat_completions::ChatCompletionsClient;
pub use responses::ResponsesClient;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use waypoint_core::error::{Result, WaypointError};

/// POST a JSON body with Bearer auth and decode a JSON reply.
pub(crate) async fn post_json<B, T>(http: &Client, url: &str, api_key: &str, body: &B) -> Result<T>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let response = http
        .post(url)
        .header("Authorization", format!("Bearer {}", api_key))
        .json(body)
        .send()
        .await
        .map_err(|e| WaypointError::ProviderRequest(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown".to_string());
        return Err(WaypointError::ProviderStatus {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| WaypointError::ProviderParse(e.to_string()))
}
