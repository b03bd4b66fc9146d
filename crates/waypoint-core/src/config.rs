use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WaypointError};

pub const DEEPSEEK_API_KEY_ENV: &str = "DEEPSEEK_API_KEY";
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Top-level Waypoint configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String { "127.0.0.1:8787".to_string() }

/// Per-provider overrides. Unset fields fall back to the provider preset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub deepseek: ProviderConfig,
    #[serde(default)]
    pub openai: ProviderConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub system_prompt: Option<String>,
}

/// API keys available to the chat mutation. Read-only once resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub deepseek: Option<String>,
    pub openai: Option<String>,
}

impl Credentials {
    /// Resolve keys from config, falling back to the process environment.
    pub fn resolve(config: &AppConfig) -> Self {
        Self::resolve_with(config, |name| std::env::var(name).ok())
    }

    /// Resolve keys using `lookup` in place of the process environment.
    pub fn resolve_with<F>(config: &AppConfig, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |configured: &Option<String>, env_name: &str| {
            usable_key(configured.as_deref())
                .map(str::to_string)
                .or_else(|| lookup(env_name).filter(|k| usable_key(Some(k.as_str())).is_some()))
        };
        Self {
            deepseek: pick(&config.providers.deepseek.api_key, DEEPSEEK_API_KEY_ENV),
            openai: pick(&config.providers.openai.api_key, OPENAI_API_KEY_ENV),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.deepseek.is_none() && self.openai.is_none()
    }
}

/// A key is usable when it is non-empty and not an unexpanded `${VAR}`.
fn usable_key(key: Option<&str>) -> Option<&str> {
    key.map(str::trim)
        .filter(|k| !k.is_empty() && !k.starts_with("${"))
}

impl AppConfig {
    /// Load config from a TOML file, with env var expansion.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|_| WaypointError::ConfigNotFound(path.display().to_string()))?;

        // Expand ${ENV_VAR} references
        let expanded = expand_env_vars(&content);

        toml::from_str(&expanded).map_err(|e| WaypointError::Config(e.to_string()))
    }

    /// Like [`AppConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Copy of the config with API keys masked, for display.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        for provider in [&mut copy.providers.deepseek, &mut copy.providers.openai] {
            if let Some(key) = provider.api_key.as_mut() {
                *key = mask_key(key);
            }
        }
        copy
    }
}

fn mask_key(key: &str) -> String {
    if key.starts_with("${") {
        return key.to_string();
    }
    let visible: String = key.chars().take(4).collect();
    format!("{visible}****")
}

/// Expand `${ENV_VAR}` patterns in a string.
fn expand_env_vars(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '$' && chars.peek() == Some(&'{') {
            chars.next(); // consume '{'
            let mut var_name = String::new();
            for c in chars.by_ref() {
                if c == '}' {
                    break;
                }
                var_name.push(c);
            }
            match std::env::var(&var_name) {
                Ok(val) => result.push_str(&val),
                Err(_) => {
                    // Keep original if env var not set
                    result.push_str(&format!("${{{}}}", var_name));
                }
            }
        } else {
            result.push(c);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_env_vars() {
        std::env::set_var("TEST_WAYPOINT_VAR", "hello");
        let result = expand_env_vars("key = \"${TEST_WAYPOINT_VAR}\"");
        assert_eq!(result, "key = \"hello\"");
        std::env::remove_var("TEST_WAYPOINT_VAR");
    }

    #[test]
    fn test_expand_env_vars_missing() {
        let result = expand_env_vars("key = \"${NONEXISTENT_WAYPOINT_VAR}\"");
        assert_eq!(result, "key = \"${NONEXISTENT_WAYPOINT_VAR}\"");
    }

    #[test]
    fn test_defaults_from_empty_toml() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.gateway.bind, "127.0.0.1:8787");
        assert!(config.providers.deepseek.api_key.is_none());
        assert!(config.providers.openai.model.is_none());
    }

    #[test]
    fn test_credentials_prefer_config_over_env() {
        let toml_str = r#"
[providers.deepseek]
api_key = "sk-config"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        let creds = Credentials::resolve_with(&config, |name| match name {
            DEEPSEEK_API_KEY_ENV => Some("sk-env".to_string()),
            OPENAI_API_KEY_ENV => Some("sk-openai".to_string()),
            _ => None,
        });
        assert_eq!(creds.deepseek.as_deref(), Some("sk-config"));
        assert_eq!(creds.openai.as_deref(), Some("sk-openai"));
    }

    #[test]
    fn test_credentials_ignore_unexpanded_and_empty() {
        let toml_str = r#"
[providers.deepseek]
api_key = "${DEEPSEEK_API_KEY}"

[providers.openai]
api_key = ""
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        let creds = Credentials::resolve_with(&config, |_| Some(String::new()));
        assert!(creds.is_empty());
    }

    #[test]
    fn test_redacted_masks_keys() {
        let mut config = AppConfig::default();
        config.providers.openai.api_key = Some("sk-abcdef123".to_string());
        let shown = config.redacted();
        assert_eq!(shown.providers.openai.api_key.as_deref(), Some("sk-a****"));
        assert!(shown.providers.deepseek.api_key.is_none());
    }
}
