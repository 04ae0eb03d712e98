//! Line-oriented directive extraction.

use std::collections::HashSet;

use crate::directive::{Action, Directive};
use crate::patterns::{DirectivePattern, PATTERN_BANK};
use crate::similarity::strip_qualifiers;

/// Lines longer than this (in chars, after trimming) are never scanned.
pub const MAX_LINE_LEN: usize = 500;

/// Lines shorter than this (in chars, after trimming) are never scanned.
pub const MIN_LINE_LEN: usize = 5;

const FENCE: &str = "```";

/// Scans document bodies for directives using the static pattern bank.
///
/// Skips fenced code blocks, headings, HTML comments and lines outside
/// [`MIN_LINE_LEN`]..=[`MAX_LINE_LEN`].
#[derive(Debug, Clone, Copy)]
pub struct DirectiveExtractor {
    patterns: &'static [DirectivePattern],
}

impl Default for DirectiveExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectiveExtractor {
    pub fn new() -> Self {
        Self {
            patterns: PATTERN_BANK.as_slice(),
        }
    }

    /// Extracts directives from a body, in line order then bank order.
    pub fn extract(&self, body: &str) -> Vec<Directive> {
        let mut directives = Vec::new();
        let mut in_fence = false;

        for (index, raw_line) in body.lines().enumerate() {
            let line = raw_line.trim();

            if line.starts_with(FENCE) {
                in_fence = !in_fence;
                continue;
            }
            if in_fence || !is_scannable(line) {
                continue;
            }

            directives.extend(self.extract_line(line, index + 1));
        }

        directives
    }

    /// Runs the whole bank over a single trimmed line.
    ///
    /// The first candidate for each `(action, subject)` wins. A generic
    /// candidate is dropped when a style directive with the same action
    /// already covers its subject once language qualifiers are stripped, so
    /// "always use semicolons in typescript files" yields `require semicolons`
    /// alone.
    fn extract_line(&self, line: &str, line_number: usize) -> Vec<Directive> {
        let mut seen: HashSet<(Action, String)> = HashSet::new();
        let mut styled: Vec<(Action, String)> = Vec::new();
        let mut directives = Vec::new();

        for pattern in self.patterns {
            for candidate in pattern.candidates(line) {
                let Some(directive) =
                    Directive::from_raw(candidate.action, &candidate.subject, line_number, line)
                else {
                    continue;
                };
                if !candidate.style && restates_style(&styled, &directive) {
                    continue;
                }
                if !seen.insert((directive.action, directive.subject.clone())) {
                    continue;
                }
                if candidate.style {
                    styled.push((directive.action, directive.subject.clone()));
                }

                let directive = match candidate.over {
                    Some(over) => directive.with_over(&over),
                    None => directive,
                };
                directives.push(directive.with_style(candidate.style));
            }
        }

        directives
    }
}

fn restates_style(styled: &[(Action, String)], directive: &Directive) -> bool {
    let core = strip_qualifiers(&directive.subject);
    styled
        .iter()
        .any(|(action, subject)| *action == directive.action && *subject == core)
}

fn is_scannable(line: &str) -> bool {
    if line.starts_with('#') || line.starts_with("<!--") {
        return false;
    }
    let len = line.chars().count();
    (MIN_LINE_LEN..=MAX_LINE_LEN).contains(&len)
}

/// Extracts directives with the default extractor.
pub fn extract_directives(body: &str) -> Vec<Directive> {
    DirectiveExtractor::new().extract(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(body: &str) -> Vec<String> {
        extract_directives(body).iter().map(Directive::render).collect()
    }

    #[test]
    fn test_prefer_over_yields_prefer_and_avoid() {
        let directives = extract_directives("prefer composition over inheritance");
        assert_eq!(directives.len(), 2);
        assert_eq!(directives[0].render(), "prefer composition");
        assert_eq!(directives[0].over.as_deref(), Some("inheritance"));
        assert_eq!(directives[1].render(), "avoid inheritance");
    }

    #[test]
    fn test_fenced_code_is_skipped() {
        let body = "Some prose here.\n```ts\n// always use tabs\nconst x = 1;\n```\n";
        assert!(extract_directives(body).is_empty());
    }

    #[test]
    fn test_text_after_fence_is_scanned() {
        let body = "```\n// never use eval\n```\nNever use eval in handlers.";
        let directives = extract_directives(body);
        assert_eq!(directives.len(), 1);
        assert_eq!(directives[0].render(), "forbid eval in handlers");
        assert_eq!(directives[0].line, 4);
    }

    #[test]
    fn test_headings_and_comments_are_skipped() {
        let body = "# Always use tabs\n<!-- never use semicolons -->\nuse x";
        assert!(extract_directives(body).is_empty());
    }

    #[test]
    fn test_overlong_line_is_skipped() {
        let mut line = String::from("Always use semicolons. ");
        while line.chars().count() < 1500 {
            line.push_str("Never use tabs. ");
        }
        line.truncate(1500);
        assert_eq!(line.chars().count(), 1500);
        assert!(extract_directives(&line).is_empty());
    }

    #[test]
    fn test_style_directive_wins_line_dedup() {
        let directives = extract_directives("Never use semicolons.");
        assert_eq!(directives.len(), 1);
        assert_eq!(directives[0].render(), "forbid semicolons");
        assert!(directives[0].style);
        assert_eq!(directives[0].line, 1);
        assert_eq!(directives[0].text, "Never use semicolons.");
    }

    #[test]
    fn test_indentation_directives() {
        assert_eq!(
            rendered("Use tabs for indentation."),
            vec!["use tabs indentation", "use tabs for indentation"]
        );
    }

    #[test]
    fn test_qualified_semicolons() {
        assert_eq!(
            rendered("Always use semicolons in TypeScript files."),
            vec!["require semicolons"]
        );
    }

    #[test]
    fn test_each_generic_matches_style_of_its_own_action() {
        assert_eq!(
            rendered("Always use semicolons in TypeScript files, never use semicolons in JSON."),
            vec!["require semicolons", "forbid semicolons"]
        );
    }

    #[test]
    fn test_generic_kept_when_subject_differs_from_style() {
        assert_eq!(
            rendered("Use double quotes for strings."),
            vec!["use double quotes", "use double quotes for strings"]
        );
    }

    #[test]
    fn test_spaces_outside_indentation_are_not_style() {
        let directives = extract_directives("Use spaces around operators.");
        assert!(directives.iter().all(|directive| !directive.style));
        assert_eq!(directives[0].render(), "use spaces around operators");
    }

    #[test]
    fn test_list_items() {
        let body = "## Style\n\n- Avoid default exports\n- Use named exports\n";
        assert_eq!(rendered(body), vec!["avoid default exports", "use named exports"]);
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let body = "Always use semicolons.\nPrefer fetch over axios.\nUse 2 spaces for indentation.";
        assert_eq!(extract_directives(body), extract_directives(body));
    }
}
