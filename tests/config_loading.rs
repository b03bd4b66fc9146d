use std::io::Write;
use std::path::Path;

use waypoint_core::config::{AppConfig, Credentials};

#[test]
fn test_load_full_config_from_file() {
    let toml_content = r#"
[gateway]
bind = "0.0.0.0:9999"

[providers.deepseek]
api_key = "sk-deepseek"
model = "deepseek-reasoner"

[providers.openai]
base_url = "http://localhost:8080/v1"
system_prompt = "Answer in one sentence."
"#;

    let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
    tmp.write_all(toml_content.as_bytes()).expect("write toml");

    let config = AppConfig::load(tmp.path()).expect("load config");

    assert_eq!(config.gateway.bind, "0.0.0.0:9999");
    assert_eq!(config.providers.deepseek.api_key.as_deref(), Some("sk-deepseek"));
    assert_eq!(config.providers.deepseek.model.as_deref(), Some("deepseek-reasoner"));
    assert!(config.providers.deepseek.base_url.is_none());
    assert_eq!(
        config.providers.openai.base_url.as_deref(),
        Some("http://localhost:8080/v1")
    );
    assert_eq!(
        config.providers.openai.system_prompt.as_deref(),
        Some("Answer in one sentence.")
    );
}

#[test]
fn test_env_var_expansion_in_config() {
    std::env::set_var("WAYPOINT_TEST_OPENAI_KEY", "expanded-key-value");

    let toml_content = r#"
[providers.openai]
api_key = "${WAYPOINT_TEST_OPENAI_KEY}"
"#;

    let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
    tmp.write_all(toml_content.as_bytes()).expect("write toml");

    let config = AppConfig::load(tmp.path()).expect("load config");
    assert_eq!(
        config.providers.openai.api_key.as_deref(),
        Some("expanded-key-value")
    );

    let creds = Credentials::resolve_with(&config, |_| None);
    assert_eq!(creds.openai.as_deref(), Some("expanded-key-value"));
    assert!(creds.deepseek.is_none());

    std::env::remove_var("WAYPOINT_TEST_OPENAI_KEY");
}

#[test]
fn test_unset_env_reference_falls_back_to_lookup() {
    let toml_content = r#"
[providers.deepseek]
api_key = "${WAYPOINT_TEST_UNSET_KEY}"
"#;

    let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
    tmp.write_all(toml_content.as_bytes()).expect("write toml");

    let config = AppConfig::load(tmp.path()).expect("load config");
    let creds = Credentials::resolve_with(&config, |name| {
        (name == "DEEPSEEK_API_KEY").then(|| "sk-from-env".to_string())
    });
    assert_eq!(creds.deepseek.as_deref(), Some("sk-from-env"));
}

#[test]
fn test_missing_file_uses_defaults() {
    let path = Path::new("/nonexistent/waypoint-test/waypoint.toml");
    assert!(AppConfig::load(path).is_err());

    let config = AppConfig::load_or_default(path).expect("defaults");
    assert_eq!(config.gateway.bind, "127.0.0.1:8787");
}

#[test]
fn test_invalid_toml_is_config_error() {
    let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
    tmp.write_all(b"[gateway\nbind = 1").expect("write toml");

    let err = AppConfig::load(tmp.path()).unwrap_err();
    assert!(err.to_string().starts_with("Config error"));
}
