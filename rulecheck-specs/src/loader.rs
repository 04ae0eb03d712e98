//! Fixture file loading.

use std::fs;
use std::path::Path;

use crate::errors::{SpecError, SpecResult};
use crate::fixture::{parse_fixture, ConflictFixture};

/// Fixture file extension.
pub const FIXTURE_EXTENSION: &str = "toml";

/// Files in a fixture directory that are not fixtures.
const RESERVED: &[&str] = &["expected-failures.toml"];

/// Load a single fixture file.
pub fn load_fixture(path: &Path) -> SpecResult<ConflictFixture> {
    let content = fs::read_to_string(path).map_err(|e| SpecError::Load {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_fixture(&path.display().to_string(), &content)
}

/// Load all fixtures from a directory (glob: **/*.toml), sorted by relative path.
pub fn load_all_fixtures(dir: &Path) -> SpecResult<Vec<(String, ConflictFixture)>> {
    let mut fixtures = Vec::new();
    load_fixtures_recursive(dir, dir, &mut fixtures)?;
    fixtures.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(fixtures)
}

fn load_fixtures_recursive(
    base: &Path,
    dir: &Path,
    fixtures: &mut Vec<(String, ConflictFixture)>,
) -> SpecResult<()> {
    if !dir.is_dir() {
        return Ok(());
    }

    for entry in fs::read_dir(dir).map_err(|e| SpecError::Load {
        path: dir.display().to_string(),
        message: e.to_string(),
    })? {
        let entry = entry.map_err(|e| SpecError::Load {
            path: dir.display().to_string(),
            message: e.to_string(),
        })?;
        let path = entry.path();

        if path.is_dir() {
            load_fixtures_recursive(base, &path, fixtures)?;
        } else if is_fixture(&path) {
            let relative = path.strip_prefix(base).unwrap_or(&path);
            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            let fixture = load_fixture(&path)?;
            fixtures.push((name, fixture));
        }
    }

    Ok(())
}

fn is_fixture(path: &Path) -> bool {
    let reserved = path
        .file_name()
        .and_then(|name| name.to_str())
        .map_or(false, |name| RESERVED.contains(&name));
    !reserved && path.extension().map_or(false, |e| e == FIXTURE_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_fixture() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("fixtures")
            .join("semicolons-cross-format.toml");
        let fixture = load_fixture(&path).unwrap();
        assert!(fixture.title.is_some());
    }

    #[test]
    fn test_load_all_fixtures_skips_ledger() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
        let fixtures = load_all_fixtures(&dir).unwrap();
        assert!(fixtures.len() >= 5);
        assert!(fixtures.iter().all(|(name, _)| name != "expected-failures.toml"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_fixture(Path::new("/no/such/fixture.toml")).unwrap_err();
        assert!(matches!(err, SpecError::Load { .. }));
    }
}
