use std::sync::Arc;

use tracing::{info, warn};

use waypoint_core::config::{AppConfig, Credentials};
use waypoint_core::traits::ChatProvider;
use waypoint_core::types::{ChatReply, ModelLabel};

use crate::presets::get_preset;

/// One entry in the fallback chain.
pub struct ProviderSlot {
    pub label: ModelLabel,
    /// Picks this slot's key out of the credential set.
    pub credential: fn(&Credentials) -> Option<&str>,
    pub client: Arc<dyn ChatProvider>,
}

/// Chooses the first provider with a credential and contains its failures.
///
/// There is no retry and no fall-through: a failing provider yields an
/// `Error` reply, not an attempt on the next slot.
pub struct ProviderSelector {
    slots: Vec<ProviderSlot>,
}

impl ProviderSelector {
    pub fn new(slots: Vec<ProviderSlot>) -> Self {
        Self { slots }
    }

    /// Default chain: DeepSeek, then OpenAI, each with config overrides applied.
    pub fn from_config(config: &AppConfig) -> Self {
        let mut slots = Vec::new();

        if let Some(preset) = get_preset("deepseek") {
            slots.push(ProviderSlot {
                label: preset.label,
                credential: |c| c.deepseek.as_deref(),
                client: crate::create_client(&preset, &config.providers.deepseek),
            });
        }
        if let Some(preset) = get_preset("openai") {
            slots.push(ProviderSlot {
                label: preset.label,
                credential: |c| c.openai.as_deref(),
                client: crate::create_client(&preset, &config.providers.openai),
            });
        }

        Self::new(slots)
    }

    pub fn slots(&self) -> &[ProviderSlot] {
        &self.slots
    }

    /// First slot whose credential is present, with that credential.
    pub fn select<'c>(&self, credentials: &'c Credentials) -> Option<(&ProviderSlot, &'c str)> {
        self.slots.iter().find_map(|slot| {
            (slot.credential)(credentials)
                .filter(|key| !key.is_empty())
                .map(|key| (slot, key))
        })
    }

    /// Answer `message` with the selected provider, or a mock reply when no
    /// credential is configured. Never fails.
    pub async fn chat(&self, message: &str, credentials: &Credentials) -> ChatReply {
        let Some((slot, api_key)) = self.select(credentials) else {
            info!("No provider credentials configured, using mock reply");
            return ChatReply {
                response: mock_response(message),
                model: ModelLabel::Mock,
            };
        };

        info!(provider = %slot.client.name(), model = %slot.label, "Selected chat provider");

        match slot.client.complete(message, api_key).await {
            Ok(response) => ChatReply {
                response,
                model: slot.label,
            },
            Err(e) => {
                warn!(provider = %slot.client.name(), error = %e, "Chat provider call failed");
                ChatReply {
                    response: format!("AI call failed: {}", e),
                    model: ModelLabel::Error,
                }
            }
        }
    }
}

/// Templated reply used when no provider is configured.
pub fn mock_response(message: &str) -> String {
    format!(
        "This is a mock response. You said: \"{}\"\n\n\
         Set DEEPSEEK_API_KEY or OPENAI_API_KEY to enable real AI conversations.",
        message
    )
}
