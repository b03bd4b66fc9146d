use waypoint_core::config::{ProviderConfig, DEEPSEEK_API_KEY_ENV, OPENAI_API_KEY_ENV};
use waypoint_core::types::ModelLabel;

const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Request shape a provider speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireApi {
    /// `POST {base}/chat/completions` with a messages array.
    ChatCompletions,
    /// `POST {base}/responses` with `instructions` + `input`.
    Responses,
}

/// Built-in defaults for a named provider.
#[derive(Debug, Clone)]
pub struct ProviderPreset {
    pub name: &'static str,
    pub label: ModelLabel,
    pub api_key_env: &'static str,
    pub default_base_url: &'static str,
    pub default_model: &'static str,
    pub wire_api: WireApi,
}

/// Look up a provider preset by name.
pub fn get_preset(provider: &str) -> Option<ProviderPreset> {
    match provider {
        "deepseek" => Some(ProviderPreset {
            name: "deepseek",
            label: ModelLabel::DeepSeek,
            api_key_env: DEEPSEEK_API_KEY_ENV,
            default_base_url: "https://api.deepseek.com",
            default_model: "deepseek-chat",
            wire_api: WireApi::ChatCompletions,
        }),
        "openai" => Some(ProviderPreset {
            name: "openai",
            label: ModelLabel::OpenAI,
            api_key_env: OPENAI_API_KEY_ENV,
            default_base_url: "https://api.openai.com/v1",
            default_model: "gpt-4o",
            wire_api: WireApi::Responses,
        }),
        _ => None,
    }
}

/// Presets in fallback priority order.
pub fn all_preset_names() -> &'static [&'static str] {
    &["deepseek", "openai"]
}

/// Effective endpoint, model and instruction for one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub base_url: String,
    pub model: String,
    pub system_prompt: String,
}

impl ProviderSettings {
    /// Merge a preset with config overrides; overrides win.
    pub fn resolve(preset: &ProviderPreset, overrides: &ProviderConfig) -> Self {
        Self {
            base_url: overrides
                .base_url
                .clone()
                .unwrap_or_else(|| preset.default_base_url.to_string()),
            model: overrides
                .model
                .clone()
                .unwrap_or_else(|| preset.default_model.to_string()),
            system_prompt: overrides
                .system_prompt
                .clone()
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
        }
    }

    /// Join `path` onto the base URL without doubling slashes.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}
