pub mod presets;
pub mod providers;
pub mod selector;

use std::sync::Arc;

use waypoint_core::config::ProviderConfig;
use waypoint_core::traits::ChatProvider;

pub use presets::{ProviderPreset, ProviderSettings, WireApi};
pub use providers::{ChatCompletionsClient, ResponsesClient};
pub use selector::{ProviderSelector, ProviderSlot};

/// Create a provider client from a preset plus user overrides.
pub fn create_client(preset: &ProviderPreset, overrides: &ProviderConfig) -> Arc<dyn ChatProvider> {
    let settings = ProviderSettings::resolve(preset, overrides);
    match preset.wire_api {
        WireApi::ChatCompletions => Arc::new(ChatCompletionsClient::new(preset.name, settings)),
        WireApi::Responses => Arc::new(ResponsesClient::new(preset.name, settings)),
    }
}
