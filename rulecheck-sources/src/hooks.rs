//! Hook configuration in `.claude/settings.json`.

use rulecheck::synthetic::{synthesize_source, HookSynthesizer};
use rulecheck::Source;
use serde_json::Value;
use tracing::debug;

/// Builds a hook source from a settings document.
///
/// Best effort: unparseable JSON or a document without a `hooks` object
/// yields no source.
pub fn parse_settings(id: &str, text: &str, synthesizer: &dyn HookSynthesizer) -> Option<Source> {
    let settings: Value = match serde_json::from_str(text) {
        Ok(settings) => settings,
        Err(error) => {
            debug!(source = id, %error, "skipping unparseable hook settings");
            return None;
        }
    };

    let hooks = settings.get("hooks").filter(|hooks| hooks.is_object())?;
    Some(synthesize_source(id, hooks, synthesizer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulecheck::{SourceKind, ToolNameSynthesizer};

    #[test]
    fn test_settings_with_hooks() {
        let text = r#"{
            "permissions": { "allow": ["Bash(npm test)"] },
            "hooks": {
                "PostToolUse": [
                    { "matcher": "Write", "hooks": [{ "type": "command", "command": "ruff format $FILE" }] }
                ]
            }
        }"#;
        let source = parse_settings(".claude/settings.json", text, &ToolNameSynthesizer::new()).unwrap();
        assert_eq!(source.kind(), SourceKind::Hook);
        assert_eq!(source.directives()[0].render(), "require ruff linting");
    }

    #[test]
    fn test_unparseable_or_hookless_settings() {
        let synthesizer = ToolNameSynthesizer::new();
        assert!(parse_settings("s.json", "{ not json", &synthesizer).is_none());
        assert!(parse_settings("s.json", r#"{"permissions": {}}"#, &synthesizer).is_none());
        assert!(parse_settings("s.json", r#"{"hooks": []}"#, &synthesizer).is_none());
    }
}
