//! Analysis options, loadable from `rulecheck.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::synthetic::ToolNameSynthesizer;

/// Conventional config file name at a project root.
pub const CONFIG_FILE: &str = "rulecheck.toml";

/// Knobs for an [`Analyzer`](crate::Analyzer) run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Also report contradictions between directives of the same source.
    pub detect_self_conflicts: bool,
    /// Source ids to leave out of the analysis entirely.
    pub ignore: Vec<String>,
    /// Tool names recognized in hook commands on top of the built-in list.
    pub extra_hook_tools: Vec<String>,
}

impl AnalysisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(path: impl Into<PathBuf>, text: &str) -> ConfigResult<Self> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.into(),
            source,
        })
    }

    /// Loads a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(path, &text)
    }

    /// Loads `rulecheck.toml` from a project root.
    pub fn load_from_root(root: &Path) -> ConfigResult<Self> {
        Self::load(&root.join(CONFIG_FILE))
    }

    pub fn is_ignored(&self, id: &str) -> bool {
        self.ignore.iter().any(|ignored| ignored == id)
    }

    /// The hook synthesizer these options describe.
    pub fn hook_synthesizer(&self) -> ToolNameSynthesizer {
        ToolNameSynthesizer::new().with_extra_tools(self.extra_hook_tools.iter().cloned())
    }
}
