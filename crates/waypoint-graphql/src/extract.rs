use std::sync::OnceLock;

use regex::Regex;

use waypoint_core::types::Variables;

/// Matches `message: "<literal>"`; the literal ends at the first quote.
fn inline_message_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"message:\s*"([^"]*)""#).expect("valid message pattern"))
}

/// Resolve the chat `message` argument.
///
/// A non-empty string in `variables.message` wins; otherwise the first inline
/// `message: "..."` literal in the query text is used.
pub fn resolve_message(variables: &Variables, query: &str) -> Option<String> {
    let from_variables = variables
        .get("message")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty());

    if let Some(message) = from_variables {
        return Some(message.to_string());
    }

    inline_message_pattern()
        .captures(query)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
