//! Subject equivalence heuristics.
//!
//! Subjects are compared with a ladder of increasingly loose checks; the first
//! one that fires decides. See [`SimilarityMatcher::similar`].

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

/// Language and framework names. They qualify a subject ("semicolons in
/// typescript") rather than define it.
const LANGUAGES: &[&str] = &[
    "typescript", "javascript", "ts", "js", "tsx", "jsx", "python", "rust", "go", "golang",
    "java", "kotlin", "swift", "ruby", "php", "csharp", "scala", "elixir", "react", "vue",
    "angular", "svelte", "next.js", "nextjs", "node.js", "nodejs", "node", "deno", "bun",
    "django", "flask", "fastapi", "rails", "tailwind", "css", "scss", "html", "sql", "bash",
    "shell", "markdown", "json", "yaml",
];

/// Generic filler that never makes two subjects the same concept.
const FILLER: &[&str] = &[
    "always", "never", "code", "codes", "file", "files", "module", "modules", "project",
    "projects", "when", "with", "that", "this", "from", "into", "your", "their", "should",
    "must", "using", "instead", "other", "every", "each", "over", "than", "rather", "where",
    "possible", "them", "they", "there", "here", "only", "also",
];

/// Containment only counts when the contained subject is longer than this.
const MIN_CONTAINED_LEN: usize = 4;

/// A stripped core shorter than this is too vague to compare.
const MIN_CORE_LEN: usize = 5;

/// Tokens must be longer than this to take part in overlap.
const MIN_TOKEN_LEN: usize = 3;

/// A shared token must cover this share of a core to count.
const TOKEN_SHARE: f64 = 0.3;

static QUALIFIER_CLAUSE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(?:in|for|of|with|on)\s+(?:all\s+|the\s+)?(?:{})\b(?:\s+(?:files|code|modules|projects))?",
        language_alternation()
    ))
    .expect("Invalid qualifier regex")
});

static TRAILING_LANGUAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(?:{})\s+(?:files|code|modules|projects)\s*$",
        language_alternation()
    ))
    .expect("Invalid trailing language regex")
});

static STOPWORDS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| LANGUAGES.iter().chain(FILLER).copied().collect());

fn language_alternation() -> String {
    LANGUAGES
        .iter()
        .map(|name| regex::escape(name))
        .collect::<Vec<_>>()
        .join("|")
}

/// Decides whether two normalized subjects denote the same concept.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityMatcher;

impl SimilarityMatcher {
    pub fn new() -> Self {
        Self
    }

    /// The decision ladder, first match wins:
    ///
    /// 1. exact equality
    /// 2. containment of a subject longer than 4 chars
    /// 3. equality of the loose forms (trailing `s` dropped, hyphens as spaces)
    /// 4. equality or containment of the cores left after stripping language
    ///    qualifiers; a core under 5 chars is not comparable
    /// 5. a shared meaningful token covering at least 30% of either core
    pub fn similar(&self, a: &str, b: &str) -> bool {
        if a == b {
            return true;
        }
        if contains_either(a, b) {
            return true;
        }
        if loose_form(a) == loose_form(b) {
            return true;
        }

        let core_a = strip_qualifiers(a);
        let core_b = strip_qualifiers(b);
        if char_len(&core_a) < MIN_CORE_LEN || char_len(&core_b) < MIN_CORE_LEN {
            return false;
        }
        if core_a == core_b || contains_either(&core_a, &core_b) {
            return true;
        }

        shares_significant_token(&core_a, &core_b)
    }
}

/// Shorthand for [`SimilarityMatcher::similar`].
pub fn similar(a: &str, b: &str) -> bool {
    SimilarityMatcher.similar(a, b)
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn contains_either(a: &str, b: &str) -> bool {
    (char_len(a) > MIN_CONTAINED_LEN && b.contains(a))
        || (char_len(b) > MIN_CONTAINED_LEN && a.contains(b))
}

fn loose_form(subject: &str) -> String {
    subject
        .strip_suffix('s')
        .unwrap_or(subject)
        .replace('-', " ")
}

/// Removes "in typescript", "for react", trailing "python files" and the like.
pub(crate) fn strip_qualifiers(subject: &str) -> String {
    let without_clauses = QUALIFIER_CLAUSE.replace_all(subject, " ");
    let without_trailing = TRAILING_LANGUAGE.replace(&without_clauses, " ");
    without_trailing
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn significant_tokens(core: &str) -> HashSet<&str> {
    core.unicode_words()
        .filter(|word| char_len(word) > MIN_TOKEN_LEN)
        .filter(|word| !STOPWORDS.contains(*word))
        .collect()
}

fn shares_significant_token(core_a: &str, core_b: &str) -> bool {
    let len_a = char_len(core_a) as f64;
    let len_b = char_len(core_b) as f64;
    let tokens_b = significant_tokens(core_b);

    significant_tokens(core_a)
        .intersection(&tokens_b)
        .any(|shared| {
            let len = char_len(shared) as f64;
            len >= TOKEN_SHARE * len_a || len >= TOKEN_SHARE * len_b
        })
}
