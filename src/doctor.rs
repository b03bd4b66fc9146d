use std::net::ToSocketAddrs;
use std::path::Path;

use waypoint_core::config::{AppConfig, Credentials, DEEPSEEK_API_KEY_ENV, OPENAI_API_KEY_ENV};
use waypoint_llm::ProviderSelector;

struct CheckResult {
    label: String,
    ok: bool,
    detail: String,
}

pub fn run_doctor(config_path: &Path, config: &AppConfig) {
    let credentials = Credentials::resolve(config);

    let checks = vec![
        check_config_file(config_path),
        check_key("DeepSeek key", credentials.deepseek.is_some(), DEEPSEEK_API_KEY_ENV),
        check_key("OpenAI key", credentials.openai.is_some(), OPENAI_API_KEY_ENV),
        check_chat_provider(config, &credentials),
        check_bind(config),
    ];

    let mut ok_count = 0;
    let mut fail_count = 0;

    for check in &checks {
        let icon = if check.ok { "[OK]" } else { "[!!]" };
        println!("  {} {}: {}", icon, check.label, check.detail);
        if check.ok {
            ok_count += 1;
        } else {
            fail_count += 1;
        }
    }

    println!();
    println!("  {} passed, {} issues found", ok_count, fail_count);
}

fn check_config_file(path: &Path) -> CheckResult {
    let exists = path.exists();
    CheckResult {
        label: "Config file".to_string(),
        // Defaults are fine; a missing file is informational only.
        ok: true,
        detail: if exists {
            path.display().to_string()
        } else {
            format!("{} not found, using defaults", path.display())
        },
    }
}

fn check_key(label: &str, present: bool, env_name: &str) -> CheckResult {
    CheckResult {
        label: label.to_string(),
        ok: true,
        detail: if present {
            "configured".to_string()
        } else {
            format!("not set (config api_key or {})", env_name)
        },
    }
}

fn check_chat_provider(config: &AppConfig, credentials: &Credentials) -> CheckResult {
    let selector = ProviderSelector::from_config(config);
    match selector.select(credentials) {
        Some((slot, _)) => CheckResult {
            label: "Chat provider".to_string(),
            ok: true,
            detail: format!("{} ({})", slot.label, slot.client.name()),
        },
        None => CheckResult {
            label: "Chat provider".to_string(),
            ok: false,
            detail: "no credentials, chatWithAI will return mock replies".to_string(),
        },
    }
}

fn check_bind(config: &AppConfig) -> CheckResult {
    let bind = &config.gateway.bind;
    match bind.to_socket_addrs() {
        Ok(_) => CheckResult {
            label: "Bind address".to_string(),
            ok: true,
            detail: bind.clone(),
        },
        Err(e) => CheckResult {
            label: "Bind address".to_string(),
            ok: false,
            detail: format!("{}: {}", bind, e),
        },
    }
}
