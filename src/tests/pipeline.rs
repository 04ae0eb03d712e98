use serde_json::json;

use crate::synthetic::synthesize_source;
use crate::{
    analyze, AnalysisConfig, Analyzer, ConflictKind, Scope, Severity, Source, SourceKind,
    StyleAxis, ToolNameSynthesizer,
};

fn instructions(id: &str, body: &str) -> Source {
    Source::new(id, SourceKind::Instructions, body)
}

fn legacy(id: &str, body: &str) -> Source {
    Source::new(id, SourceKind::LegacyRules, body)
}

fn messages(sources: &[Source]) -> Vec<String> {
    analyze(sources)
        .conflicts
        .into_iter()
        .map(|conflict| conflict.message)
        .collect()
}

#[test]
fn qualified_semicolons_conflict_with_bare_prohibition() {
    let sources = vec![
        instructions("CLAUDE.md", "Always use semicolons in TypeScript files."),
        legacy(".cursorrules", "Never use semicolons."),
    ];

    let report = analyze(&sources);
    assert!(!report.clean);
    assert!(report
        .conflicts
        .iter()
        .all(|conflict| conflict.severity == Severity::Error));
    assert_eq!(
        messages(&sources),
        vec!["CLAUDE.md says 'require semicolons' but .cursorrules says 'forbid semicolons'"]
    );
}

#[test]
fn spaces_outside_indentation_do_not_conflict_with_tabs() {
    let report = analyze(&[
        instructions("CLAUDE.md", "Use tabs for indentation."),
        instructions("AGENTS.md", "Use spaces around binary operators."),
    ]);

    assert!(report.clean);
}

#[test]
fn tabs_and_spaces_conflict() {
    let report = analyze(&[
        instructions("CLAUDE.md", "Use tabs for indentation."),
        instructions("AGENTS.md", "Use spaces for indentation."),
    ]);

    assert_eq!(report.conflicts.len(), 1);
    let conflict = &report.conflicts[0];
    assert_eq!(conflict.kind, ConflictKind::StyleValue(StyleAxis::IndentCharacter));
    assert_eq!(conflict.directive_a.text, "use tabs indentation");
    assert_eq!(conflict.directive_b.text, "use spaces indentation");
}

#[test]
fn quote_styles_conflict() {
    let report = analyze(&[
        instructions("CLAUDE.md", "Use single quotes for strings."),
        legacy(".windsurfrules", "Use double quotes for strings."),
    ]);

    assert_eq!(report.conflicts.len(), 1);
    assert_eq!(
        report.conflicts[0].kind,
        ConflictKind::StyleValue(StyleAxis::QuoteStyle)
    );
}

#[test]
fn indentation_widths_conflict() {
    let report = analyze(&[
        instructions("CLAUDE.md", "Indent with 2 spaces."),
        legacy(".cursorrules", "Use 4-space indentation."),
    ]);

    let kinds: Vec<_> = report.conflicts.iter().map(|conflict| conflict.kind).collect();
    assert_eq!(kinds, vec![ConflictKind::StyleValue(StyleAxis::IndentWidth)]);
}

#[test]
fn prefer_over_conflicts_with_requirement_of_loser() {
    let report = analyze(&[
        instructions("CLAUDE.md", "Prefer composition over inheritance."),
        Source::new(
            ".claude/agents/architect.md",
            SourceKind::Agent,
            "Always use inheritance for shared behaviour.",
        ),
    ]);

    assert_eq!(report.conflicts.len(), 1);
    assert_eq!(
        report.conflicts[0].message,
        "CLAUDE.md says 'avoid inheritance' but .claude/agents/architect.md says 'require inheritance for shared behaviour'"
    );
}

#[test]
fn unrelated_directives_are_clean() {
    let report = analyze(&[
        instructions("CLAUDE.md", "Always use semicolons.\nPrefer fetch over axios."),
        legacy(".cursorrules", "Use named exports.\nNever use var declarations."),
    ]);

    assert!(report.clean);
    assert_eq!(report.summary, "No conflicts across 2 files");
}

#[test]
fn fenced_code_never_conflicts() {
    let report = analyze(&[
        instructions("CLAUDE.md", "Example:\n```js\n// never use semicolons\n```\n"),
        legacy(".cursorrules", "Always use semicolons."),
    ]);
    assert!(report.clean);
}

#[test]
fn overlong_lines_never_conflict() {
    let mut line = String::from("Never use semicolons. ");
    while line.chars().count() < 1500 {
        line.push_str("Keep modules small and focused. ");
    }
    line.truncate(1500);

    let report = analyze(&[
        instructions("CLAUDE.md", &line),
        legacy(".cursorrules", "Always use semicolons."),
    ]);
    assert!(report.clean);
}

#[test]
fn analysis_is_idempotent_and_deduplicated() {
    let sources = vec![
        instructions("CLAUDE.md", "Always use semicolons.\nAlways use semicolons."),
        legacy(".cursorrules", "Never use semicolons."),
        instructions("AGENTS.md", "Never use semicolons."),
    ];

    let first = analyze(&sources);
    let second = analyze(&sources);
    assert_eq!(first, second);

    let mut keys: Vec<_> = first.conflicts.iter().map(|c| c.dedup_key()).collect();
    let total = keys.len();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), total);
    // The repeated line in CLAUDE.md collapses into one conflict per partner
    assert_eq!(total, 2);
}

#[test]
fn rules_with_disjoint_globs_do_not_conflict() {
    let python = Source::rule(
        ".cursor/rules/python.mdc",
        "Always use semicolons.",
        Some(Scope::globs(["**/*.py"])),
    );
    let typescript = Source::rule(
        ".cursor/rules/typescript.mdc",
        "Never use semicolons.",
        Some(Scope::globs(["**/*.ts"])),
    );
    assert!(analyze(&[python.clone(), typescript.clone()]).clean);

    let global = Source::rule(
        ".cursor/rules/python.mdc",
        "Always use semicolons.",
        Some(Scope::new(vec!["**/*.py".into()], true)),
    );
    let report = analyze(&[global, typescript]);
    assert_eq!(report.conflicts.len(), 1);
    assert_eq!(
        report.conflicts[0].group_key(),
        ".cursor/rules/python.mdc vs .cursor/rules/typescript.mdc"
    );
}

#[test]
fn rules_without_scope_overlap_everything() {
    let report = analyze(&[
        Source::rule(".claude/rules/a.md", "Always use semicolons.", None),
        Source::rule(
            ".claude/rules/b.md",
            "Never use semicolons.",
            Some(Scope::globs(["src/**/*.ts"])),
        ),
    ]);
    assert!(!report.clean);
}

#[test]
fn rule_and_instructions_compare_regardless_of_scope() {
    let report = analyze(&[
        Source::rule(
            ".cursor/rules/python.mdc",
            "Never use semicolons.",
            Some(Scope::globs(["**/*.py"])),
        ),
        instructions("CLAUDE.md", "Always use semicolons."),
    ]);
    assert_eq!(report.conflicts.len(), 1);
}

#[test]
fn hook_formatter_conflicts_with_prohibition() {
    let hooks = json!({
        "PostToolUse": [
            { "matcher": "Edit", "hooks": [{ "type": "command", "command": "npx prettier --write" }] }
        ]
    });
    let hook = synthesize_source(".claude/settings.json", &hooks, &ToolNameSynthesizer::new());

    let report = analyze(&[
        hook,
        instructions("CLAUDE.md", "Never use prettier formatting."),
    ]);

    assert_eq!(report.conflicts.len(), 1);
    let conflict = &report.conflicts[0];
    assert_eq!(conflict.directive_a.text, "require prettier formatting");
    assert_eq!(conflict.directive_a.raw, "npx prettier --write");
    assert_eq!(conflict.directive_b.text, "forbid prettier formatting");
}

#[test]
fn self_conflicts_follow_config() {
    let sources = vec![instructions(
        "CLAUDE.md",
        "Use tabs for indentation.\nUse spaces for indentation.",
    )];
    assert!(analyze(&sources).clean);

    let analyzer = Analyzer::new(AnalysisConfig {
        detect_self_conflicts: true,
        ..AnalysisConfig::default()
    });
    let report = analyzer.analyze(&sources);
    assert_eq!(report.conflicts.len(), 1);
    assert_eq!(report.conflicts[0].directive_a.line, 1);
    assert_eq!(report.conflicts[0].directive_b.line, 2);
}
