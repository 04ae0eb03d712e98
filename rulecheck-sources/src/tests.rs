use std::fs;
use std::path::Path;

use rulecheck::{analyze, AnalysisConfig, Scope, SourceKind};
use tempfile::TempDir;

use crate::SourceLoader;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(root, "CLAUDE.md", "# Project\n\nAlways use semicolons.\n");
    write(root, ".cursorrules", "Never use semicolons.\n");
    write(
        root,
        ".cursor/rules/python.mdc",
        "---\ndescription: Python\nglobs: **/*.py\nalwaysApply: false\n---\nUse double quotes for strings.\n",
    );
    write(
        root,
        ".cursor/rules/web/typescript.mdc",
        "---\nglobs: src/**/*.ts, src/**/*.tsx\n---\nUse single quotes for strings.\n",
    );
    write(
        root,
        ".claude/rules/general.md",
        "---\nglobs src/**\n---\nUse double quotes for strings.\n",
    );
    write(
        root,
        ".claude/agents/reviewer.md",
        "---\nname: reviewer\ntools: Read, Grep\n---\nNever use prettier formatting.\n",
    );
    write(
        root,
        ".claude/settings.json",
        r#"{"hooks": {"PostToolUse": [{"matcher": "Edit", "hooks": [{"type": "command", "command": "npx prettier --write"}]}]}}"#,
    );
    // Not a recognized location
    write(root, "docs/notes.md", "Never use tabs.\n");

    dir
}

#[test]
fn loads_conventional_locations_sorted_by_id() {
    let dir = project();
    let sources = SourceLoader::new(dir.path()).load().unwrap();

    let ids: Vec<_> = sources.iter().map(|source| source.id()).collect();
    assert_eq!(
        ids,
        vec![
            ".claude/agents/reviewer.md",
            ".claude/rules/general.md",
            ".claude/settings.json",
            ".cursor/rules/python.mdc",
            ".cursor/rules/web/typescript.mdc",
            ".cursorrules",
            "CLAUDE.md",
        ]
    );

    let kinds: Vec<_> = sources.iter().map(|source| source.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            SourceKind::Agent,
            SourceKind::Rule,
            SourceKind::Hook,
            SourceKind::Rule,
            SourceKind::Rule,
            SourceKind::LegacyRules,
            SourceKind::Instructions,
        ]
    );
}

#[test]
fn rule_scopes_come_from_frontmatter() {
    let dir = project();
    let sources = SourceLoader::new(dir.path()).load().unwrap();
    let scope_of = |id: &str| {
        sources
            .iter()
            .find(|source| source.id() == id)
            .and_then(|source| source.scope().cloned())
    };

    assert_eq!(scope_of(".cursor/rules/python.mdc"), Some(Scope::globs(["**/*.py"])));
    assert_eq!(
        scope_of(".cursor/rules/web/typescript.mdc"),
        Some(Scope::globs(["src/**/*.ts", "src/**/*.tsx"]))
    );
    // Malformed frontmatter means no scope
    assert_eq!(scope_of(".claude/rules/general.md"), None);
}

#[test]
fn frontmatter_is_stripped_from_bodies() {
    let dir = project();
    let sources = SourceLoader::new(dir.path()).load().unwrap();
    let agent = sources
        .iter()
        .find(|source| source.kind() == SourceKind::Agent)
        .unwrap();

    assert_eq!(agent.body(), "Never use prettier formatting.\n");
    assert_eq!(agent.directives()[0].render(), "forbid prettier formatting");
    assert_eq!(agent.directives()[0].line, 1);
}

#[test]
fn loaded_project_analysis() {
    let dir = project();
    let sources = SourceLoader::new(dir.path()).load().unwrap();
    let report = analyze(&sources);

    let groups: Vec<_> = report.groups.keys().cloned().collect();
    assert_eq!(
        groups,
        vec![
            ".claude/agents/reviewer.md vs .claude/settings.json",
            ".claude/rules/general.md vs .cursor/rules/web/typescript.mdc",
            ".cursorrules vs CLAUDE.md",
        ]
    );
    assert_eq!(report.files_covered.len(), 7);
}

#[test]
fn unparseable_settings_are_skipped() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), ".claude/settings.json", "{ nope");
    write(dir.path(), "AGENTS.md", "Use named exports.\n");

    let sources = SourceLoader::new(dir.path()).load().unwrap();
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0].id(), "AGENTS.md");
}

#[test]
fn config_adds_hook_tools() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        ".claude/settings.json",
        r#"{"hooks": {"Stop": [{"hooks": [{"type": "command", "command": "dprint fmt"}]}]}}"#,
    );

    let plain = SourceLoader::new(dir.path()).load().unwrap();
    assert!(plain[0].directives().is_empty());

    let config = AnalysisConfig {
        extra_hook_tools: vec!["dprint".into()],
        ..AnalysisConfig::default()
    };
    let configured = SourceLoader::new(dir.path()).with_config(&config).load().unwrap();
    assert_eq!(configured[0].directives()[0].render(), "require dprint");
}
