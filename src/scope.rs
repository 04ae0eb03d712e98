//! Glob-overlap test between rule scopes.
//!
//! Two rules only contradict each other if some file can be governed by both.
//! The test here is conservative: when in doubt, scopes overlap.

use std::collections::BTreeSet;

use glob::Pattern;

use crate::source::Scope;

/// Whether two (optional) rule scopes can apply to a common file.
///
/// A missing scope, `always_apply`, or an empty glob list applies
/// everywhere.
pub fn overlaps(a: Option<&Scope>, b: Option<&Scope>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => {
            if applies_everywhere(a) || applies_everywhere(b) {
                return true;
            }
            a.globs
                .iter()
                .any(|glob_a| b.globs.iter().any(|glob_b| globs_overlap(glob_a, glob_b)))
        }
        _ => true,
    }
}

fn applies_everywhere(scope: &Scope) -> bool {
    scope.always_apply || scope.globs.iter().all(|glob| glob.trim().is_empty())
}

/// Whether two glob patterns can match a common path.
pub fn globs_overlap(a: &str, b: &str) -> bool {
    let a = a.trim().trim_start_matches("./");
    let b = b.trim().trim_start_matches("./");
    if a == b {
        return true;
    }

    // A pattern matching the other pattern's text (wildcards read literally)
    // is a strong overlap signal: "**/*.ts" matches "src/**/*.ts".
    let matches_other = |pattern: &str, text: &str| {
        Pattern::new(pattern)
            .map(|p| p.matches(text))
            .unwrap_or(true)
    };
    if matches_other(a, b) || matches_other(b, a) {
        return true;
    }

    prefixes_compatible(&literal_prefix(a), &literal_prefix(b))
        && extensions_compatible(extensions(a), extensions(b))
}

/// The leading path components that contain no wildcard.
fn literal_prefix(glob: &str) -> Vec<&str> {
    glob.split('/')
        .take_while(|component| !component.contains(['*', '?', '[', '{']))
        .filter(|component| !component.is_empty())
        .collect()
}

fn prefixes_compatible(a: &[&str], b: &[&str]) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| x == y)
}

/// The extension set of the final component (`*.ts` or `*.{ts,tsx}`), or
/// `None` when the glob does not constrain the extension.
fn extensions(glob: &str) -> Option<BTreeSet<String>> {
    let last = glob.rsplit('/').next()?;
    if !last.contains('*') {
        return None;
    }
    let (_, ext) = last.rsplit_once('.')?;
    if ext.contains('*') {
        return None;
    }

    let set = ext
        .trim_start_matches('{')
        .trim_end_matches('}')
        .split(',')
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
        .collect::<BTreeSet<_>>();
    Some(set)
}

fn extensions_compatible(a: Option<BTreeSet<String>>, b: Option<BTreeSet<String>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => !a.is_disjoint(&b),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_or_global_scopes_overlap() {
        let ts = Scope::globs(["**/*.ts"]);
        assert!(overlaps(None, Some(&ts)));
        assert!(overlaps(Some(&Scope::always()), Some(&ts)));
        assert!(overlaps(Some(&Scope::default()), Some(&ts)));
    }

    #[test]
    fn test_disjoint_extensions() {
        let py = Scope::globs(["**/*.py"]);
        let ts = Scope::globs(["**/*.ts", "**/*.tsx"]);
        assert!(!overlaps(Some(&py), Some(&ts)));
    }

    #[test]
    fn test_always_apply_overrides_globs() {
        let py = Scope::new(vec!["**/*.py".into()], true);
        let ts = Scope::globs(["**/*.ts"]);
        assert!(overlaps(Some(&py), Some(&ts)));
    }

    #[test]
    fn test_glob_pairs() {
        assert!(globs_overlap("**/*.ts", "src/**/*.ts"));
        assert!(globs_overlap("src/**", "**/*.ts"));
        assert!(globs_overlap("src/**/*.{ts,tsx}", "src/components/*.tsx"));
        assert!(!globs_overlap("src/**/*.ts", "lib/**/*.ts"));
        assert!(!globs_overlap("**/*.py", "**/*.rs"));
        assert!(globs_overlap("./src/**", "src/api/*.ts"));
    }

    #[test]
    fn test_extensions() {
        assert_eq!(extensions("src/**"), None);
        assert_eq!(
            extensions("**/*.{ts, tsx}"),
            Some(["ts".to_string(), "tsx".to_string()].into_iter().collect())
        );
    }
}
