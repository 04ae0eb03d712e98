//! Reads rule documents from their conventional locations under a project root.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rulecheck::{AnalysisConfig, DirectiveExtractor, Source, SourceKind, ToolNameSynthesizer};
use tracing::{debug, warn};

use crate::error::{LoadError, LoadResult};
use crate::{frontmatter, hooks};

/// Single project-level documents and their kinds.
pub const DOCUMENTS: &[(&str, SourceKind)] = &[
    ("CLAUDE.md", SourceKind::Instructions),
    ("AGENTS.md", SourceKind::Instructions),
    (".github/copilot-instructions.md", SourceKind::Instructions),
    (".cursorrules", SourceKind::LegacyRules),
    (".windsurfrules", SourceKind::LegacyRules),
];

/// Rule directories (searched recursively) and their file extension.
pub const RULE_DIRS: &[(&str, &str)] = &[(".cursor/rules", "mdc"), (".claude/rules", "md")];

/// Agent persona directory (top level only).
pub const AGENTS_DIR: &str = ".claude/agents";

/// Hook settings document.
pub const SETTINGS_FILE: &str = ".claude/settings.json";

/// Loads every recognized source under a project root.
#[derive(Debug, Clone)]
pub struct SourceLoader {
    root: PathBuf,
    extractor: DirectiveExtractor,
    synthesizer: ToolNameSynthesizer,
}

impl SourceLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extractor: DirectiveExtractor::new(),
            synthesizer: ToolNameSynthesizer::new(),
        }
    }

    /// Uses the hook tool list from an analysis config.
    pub fn with_config(mut self, config: &AnalysisConfig) -> Self {
        self.synthesizer = config.hook_synthesizer();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Loads all present sources, sorted by id.
    pub fn load(&self) -> LoadResult<Vec<Source>> {
        let mut sources = Vec::new();

        for (relative, kind) in DOCUMENTS {
            if let Some(source) = self.load_document(Path::new(relative), *kind)? {
                sources.push(source);
            }
        }

        for (dir, extension) in RULE_DIRS {
            let mut files = Vec::new();
            collect_files(&self.root.join(dir), extension, true, &mut files)?;
            for path in files {
                if let Some(source) = self.load_document(self.relative(&path), SourceKind::Rule)? {
                    sources.push(source);
                }
            }
        }

        let mut agents = Vec::new();
        collect_files(&self.root.join(AGENTS_DIR), "md", false, &mut agents)?;
        for path in agents {
            if let Some(source) = self.load_document(self.relative(&path), SourceKind::Agent)? {
                sources.push(source);
            }
        }

        if let Some(text) = read_optional(&self.root.join(SETTINGS_FILE))? {
            if let Some(source) = hooks::parse_settings(SETTINGS_FILE, &text, &self.synthesizer) {
                debug!(
                    source = SETTINGS_FILE,
                    directives = source.directives().len(),
                    "loaded hook source"
                );
                sources.push(source);
            }
        }

        sources.sort_by(|a, b| a.id().cmp(b.id()));
        debug!(root = %self.root.display(), sources = sources.len(), "loaded sources");
        Ok(sources)
    }

    /// Loads one document given its path relative to the root.
    fn load_document(&self, relative: &Path, kind: SourceKind) -> LoadResult<Option<Source>> {
        let id = source_id(relative);
        let Some(content) = read_optional(&self.root.join(relative))? else {
            return Ok(None);
        };

        let frontmatter::Split { block, body } = frontmatter::split(&content);
        let scope = match (kind, block) {
            (SourceKind::Rule, Some(block)) => match frontmatter::parse(block) {
                Some(metadata) => Some(metadata.scope()),
                None => {
                    warn!(source = %id, "malformed frontmatter, applying rule everywhere");
                    None
                }
            },
            (SourceKind::Rule, None) => {
                debug!(source = %id, "rule has no frontmatter, applying everywhere");
                None
            }
            _ => None,
        };

        let source = Source::with_extractor(id, kind, body, scope, &self.extractor);
        debug!(
            source = source.id(),
            kind = %kind,
            directives = source.directives().len(),
            "loaded source"
        );
        Ok(Some(source))
    }

    fn relative<'p>(&self, path: &'p Path) -> &'p Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }
}

/// Loads all sources under `root` with default settings.
pub fn load_sources(root: &Path) -> LoadResult<Vec<Source>> {
    SourceLoader::new(root).load()
}

/// A relative path as a `/` separated id.
fn source_id(relative: &Path) -> String {
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Reads a file, treating absence as `None`.
fn read_optional(path: &Path) -> LoadResult<Option<String>> {
    if !path.is_file() {
        return Ok(None);
    }
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(error) => Err(LoadError::io(path, error)),
    }
}

fn collect_files(
    dir: &Path,
    extension: &str,
    recursive: bool,
    files: &mut Vec<PathBuf>,
) -> LoadResult<()> {
    if !dir.is_dir() {
        return Ok(());
    }

    for entry in fs::read_dir(dir).map_err(|e| LoadError::io(dir, e))? {
        let entry = entry.map_err(|e| LoadError::io(dir, e))?;
        let path = entry.path();

        if path.is_dir() {
            if recursive {
                collect_files(&path, extension, recursive, files)?;
            }
        } else if path.extension().map_or(false, |e| e == extension) {
            files.push(path);
        }
    }

    files.sort();
    Ok(())
}
