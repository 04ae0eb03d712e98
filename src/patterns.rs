//! The fixed, ordered bank of directive phrase patterns.
//!
//! Every pattern is a compiled [`Regex`] plus an emit function that turns one
//! match into zero or more [`Candidate`]s. Regexes are immutable and each call
//! to [`DirectivePattern::candidates`] walks its own `captures_iter`, so the
//! bank is shared freely across threads and calls.
//!
//! Style templates come first. The extractor keeps the first candidate for a
//! given `(action, subject)` on a line, so a style match wins over the generic
//! match of the same phrase and keeps its `style` flag.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::directive::Action;

/// Optional sentence/list lead-in for verb-initial patterns.
const LEAD: &str = r"(?:^|[.!?]\s+)(?:[-*+]\s+|\d+[.)]\s+)?(?:\*\*)?";

/// Object of an imperative, running up to the next clause punctuation.
const OBJECT: &str = r"([^.;:!?,()\[\]]+)";

/// Verb forms accepted after "always"/"never"/"avoid".
const VERBS: &str = r"(us(?:e|ing)|add(?:ing)?|includ(?:e|ing)|writ(?:e|ing)|put(?:ting)?|apply(?:ing)?|enabl(?:e|ing)|call(?:ing)?|leav(?:e|ing)|keep(?:ing)?|rely(?:ing)?\s+on)";

const ANY_TYPE: &str = r"(?:`any`(?:\s+types?)?|any\s+types?\b)";

const STRICT_MODE: &str = r"strict[-\s](?:mode|typing|type[-\s]checking)\b";

const NAMING: &str = r"(camel\s?case|snake[_\s]case|pascal\s?case|kebab[-\s]case|screaming[_\s]snake[_\s]case)";

/// Words that end the subject of an imperative.
const CLAUSE_STOPS: &[&str] = &[
    " because ",
    " unless ",
    " when ",
    " if ",
    " since ",
    " so that ",
    " except ",
    " - ",
    " \u{2013} ",
    " \u{2014} ",
];

/// Comparative markers; the subject before them is the preferred side.
const COMPARATIVES: &[&str] = &[" over ", " rather than ", " instead of "];

/// A directive candidate before normalization and provenance are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub action: Action,
    pub subject: String,
    pub over: Option<String>,
    pub style: bool,
}

impl Candidate {
    fn new(action: Action, subject: impl Into<String>) -> Self {
        Self {
            action,
            subject: subject.into(),
            over: None,
            style: false,
        }
    }

    fn style(action: Action, subject: impl Into<String>) -> Self {
        Self {
            style: true,
            ..Self::new(action, subject)
        }
    }
}

type EmitFn = fn(&Captures<'_>) -> Vec<Candidate>;

/// One named pattern of the bank.
pub struct DirectivePattern {
    pub name: &'static str,
    regex: Regex,
    emit: EmitFn,
}

impl DirectivePattern {
    fn new(name: &'static str, pattern: &str, emit: EmitFn) -> Self {
        let regex = Regex::new(pattern).expect("Invalid directive pattern");
        Self { name, regex, emit }
    }

    /// Runs this pattern over one line with a fresh match iterator.
    pub fn candidates(&self, line: &str) -> Vec<Candidate> {
        self.regex
            .captures_iter(line)
            .flat_map(|caps| (self.emit)(&caps))
            .collect()
    }
}

impl std::fmt::Debug for DirectivePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectivePattern")
            .field("name", &self.name)
            .field("regex", &self.regex.as_str())
            .finish()
    }
}

/// The process-wide pattern bank, in evaluation order.
pub static PATTERN_BANK: Lazy<Vec<DirectivePattern>> = Lazy::new(|| {
    vec![
        // -- semicolons
        DirectivePattern::new(
            "semicolons_imperative",
            &format!(
                r"(?i)(?:\b(always|never|don['’]t|do\s+not)|{LEAD}(no))\s+(?:use\s+|add\s+|include\s+|put\s+)?(?:trailing\s+)?semicolons?\b"
            ),
            |caps| {
                imperative_action(either(caps, 1, 2))
                    .map(|action| vec![Candidate::style(action, "semicolons")])
                    .unwrap_or_default()
            },
        ),
        DirectivePattern::new(
            "semicolons_omit",
            r"(?i)\b(omit|skip|avoid)\s+(?:trailing\s+)?semicolons?\b",
            |caps| {
                let action = if group(caps, 1).eq_ignore_ascii_case("avoid") {
                    Action::Avoid
                } else {
                    Action::Forbid
                };
                vec![Candidate::style(action, "semicolons")]
            },
        ),
        DirectivePattern::new(
            "semicolons_use",
            &format!(r"(?i){LEAD}(use|require|add)\s+(?:trailing\s+)?semicolons?\b"),
            |caps| vec![Candidate::style(verb_action(group(caps, 1)), "semicolons")],
        ),
        // -- quote style
        DirectivePattern::new(
            "quote_style",
            &format!(
                r"(?i){LEAD}(?:always\s+)?(use|prefer|require)\s+(single|double)[-\s]?quot(?:es|ed|ation\s+marks)?\b"
            ),
            |caps| {
                let subject = format!("{} quotes", group(caps, 2).to_lowercase());
                vec![Candidate::style(verb_action(group(caps, 1)), subject)]
            },
        ),
        // -- indentation
        DirectivePattern::new(
            "indent_use",
            &format!(
                r"(?i){LEAD}(?:always\s+)?(use|prefer)\s+(?:(\d+)\s+)?(tabs?|spaces?)(?:\s+(?:for|as)\s+indentation\b|\s*(?:$|[.;:!?,]))"
            ),
            |caps| {
                let subject = indentation_subject(caps.get(2).map(|m| m.as_str()), group(caps, 3));
                vec![Candidate::style(verb_action(group(caps, 1)), subject)]
            },
        ),
        DirectivePattern::new(
            "indent_with",
            r"(?i)\bindent(?:\s+code)?\s+(?:with|using|by)\s+(?:(\d+)\s+)?(tabs?|spaces?)\b",
            |caps| {
                let subject = indentation_subject(caps.get(1).map(|m| m.as_str()), group(caps, 2));
                vec![Candidate::style(Action::Use, subject)]
            },
        ),
        DirectivePattern::new(
            "indent_width",
            r"(?i)\b(\d+)[-\s]space\s+indent(?:ation|s)?\b",
            |caps| {
                let subject = indentation_subject(Some(group(caps, 1)), "spaces");
                vec![Candidate::style(Action::Use, subject)]
            },
        ),
        // -- naming conventions
        DirectivePattern::new(
            "naming_use",
            &format!(
                r"(?i){LEAD}(?:always\s+)?(use|prefer|require)\s+{NAMING}\b(?:\s+(?:for|in)\s+([^.;:!?,()]+))?"
            ),
            |caps| {
                let subject = naming_subject(group(caps, 2), caps.get(3).map(|m| m.as_str()));
                vec![Candidate::style(verb_action(group(caps, 1)), subject)]
            },
        ),
        DirectivePattern::new(
            "naming_forbid",
            &format!(
                r"(?i)\b(never|don['’]t|do\s+not|avoid)\s+(?:use\s+|using\s+)?{NAMING}\b(?:\s+(?:for|in)\s+([^.;:!?,()]+))?"
            ),
            |caps| {
                let subject = naming_subject(group(caps, 2), caps.get(3).map(|m| m.as_str()));
                imperative_action(group(caps, 1))
                    .map(|action| vec![Candidate::style(action, subject)])
                    .unwrap_or_default()
            },
        ),
        // -- strict mode / type safety
        DirectivePattern::new(
            "strict_enable",
            &format!(
                r"(?i)\b(enable|use|require|turn\s+on|keep)\s+(?:typescript\s+|ts\s+)?(?:the\s+)?{STRICT_MODE}"
            ),
            |_| vec![Candidate::style(Action::Require, "strict mode")],
        ),
        DirectivePattern::new(
            "strict_disable",
            &format!(
                r"(?i)\b(disable|turn\s+off|relax|avoid)\s+(?:typescript\s+|ts\s+)?(?:the\s+)?{STRICT_MODE}"
            ),
            |caps| {
                let action = if group(caps, 1).eq_ignore_ascii_case("avoid") {
                    Action::Avoid
                } else {
                    Action::Forbid
                };
                vec![Candidate::style(action, "strict mode")]
            },
        ),
        DirectivePattern::new(
            "any_forbid",
            &format!(
                r"(?i)(?:\b(never|don['’]t|do\s+not|avoid)|{LEAD}(no))\s+(?:use\s+|using\s+|allow\s+)?(?:the\s+)?{ANY_TYPE}"
            ),
            |caps| {
                imperative_action(either(caps, 1, 2))
                    .map(|action| vec![Candidate::style(action, "any type")])
                    .unwrap_or_default()
            },
        ),
        DirectivePattern::new(
            "any_use",
            &format!(r"(?i){LEAD}(?:always\s+)?(use|allow)\s+(?:the\s+)?{ANY_TYPE}"),
            |_| vec![Candidate::style(Action::Use, "any type")],
        ),
        // -- generic imperatives
        DirectivePattern::new(
            "imperative",
            &format!(
                r"(?i)\b(always|must\s+not|mustn['’]t|must|never|don['’]t|do\s+not|avoid)\s+{VERBS}\s+{OBJECT}"
            ),
            |caps| {
                imperative_action(group(caps, 1))
                    .map(|action| vec![Candidate::new(action, clip_object(group(caps, 3)))])
                    .unwrap_or_default()
            },
        ),
        DirectivePattern::new(
            "comparative",
            &format!(
                r"(?i)\b(?:prefer(?:ring)?|favou?r(?:ing)?)\s+([^.;:!?,()\[\]]+?)\s+(?:over|rather\s+than|instead\s+of)\s+{OBJECT}"
            ),
            |caps| {
                let preferred = clip_object(group(caps, 1));
                let loser = clip_object(group(caps, 2));
                let mut prefer = Candidate::new(Action::Prefer, preferred);
                prefer.over = Some(loser.clone());
                vec![prefer, Candidate::new(Action::Avoid, loser)]
            },
        ),
        DirectivePattern::new(
            "use",
            &format!(r"(?i){LEAD}(use|prefer|require|enable)\s+{OBJECT}"),
            |caps| {
                let object = group(caps, 2);
                // "prefer X over Y" belongs to the comparative pattern
                if group(caps, 1).eq_ignore_ascii_case("prefer") && has_comparative(object) {
                    return Vec::new();
                }
                vec![Candidate::new(Action::Use, clip_object(object))]
            },
        ),
        DirectivePattern::new(
            "avoid",
            &format!(r"(?i){LEAD}(avoid|disable|remove|exclude)\s+{OBJECT}"),
            |caps| {
                let object = group(caps, 2);
                // "avoid using X" belongs to the imperative pattern
                if starts_with_verb(object) {
                    return Vec::new();
                }
                vec![Candidate::new(Action::Avoid, clip_object(object))]
            },
        ),
    ]
});

fn group<'t>(caps: &Captures<'t>, index: usize) -> &'t str {
    caps.get(index).map_or("", |m| m.as_str())
}

/// The first of two alternative groups that took part in the match.
fn either<'t>(caps: &Captures<'t>, first: usize, second: usize) -> &'t str {
    caps.get(first)
        .or_else(|| caps.get(second))
        .map_or("", |m| m.as_str())
}

/// Maps an imperative lead word to its action.
fn imperative_action(word: &str) -> Option<Action> {
    let lower = word.to_lowercase().replace('’', "'");
    let word = lower.split_whitespace().collect::<Vec<_>>().join(" ");
    match word.as_str() {
        "always" | "must" => Some(Action::Require),
        "never" | "don't" | "do not" | "must not" | "mustn't" | "no" => Some(Action::Forbid),
        "avoid" => Some(Action::Avoid),
        _ => None,
    }
}

/// Maps a bare leading verb to its action.
fn verb_action(verb: &str) -> Action {
    match verb.to_lowercase().as_str() {
        "prefer" => Action::Prefer,
        "require" => Action::Require,
        _ => Action::Use,
    }
}

fn indentation_subject(width: Option<&str>, kind: &str) -> String {
    let kind = kind.to_lowercase();
    if kind.starts_with("tab") {
        return "tabs indentation".to_string();
    }
    match width {
        Some(width) => format!("{} spaces indentation", width),
        None => "spaces indentation".to_string(),
    }
}

fn naming_subject(convention: &str, target: Option<&str>) -> String {
    let squashed: String = convention
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect();
    let convention = match squashed.as_str() {
        "camelcase" => "camelcase",
        "snakecase" => "snake_case",
        "pascalcase" => "pascalcase",
        "kebabcase" => "kebab-case",
        "screamingsnakecase" => "screaming_snake_case",
        other => return format!("{} naming", other),
    };
    match target.map(clip_object) {
        Some(target) if !target.is_empty() => format!("{} for {}", convention, target),
        _ => format!("{} naming", convention),
    }
}

/// Lowercases, strips inline markup and cuts the object at the first clause
/// stop or comparative marker.
fn clip_object(raw: &str) -> String {
    let lower: String = raw
        .chars()
        .filter(|c| !matches!(c, '`' | '*'))
        .collect::<String>()
        .to_lowercase();

    let cut = CLAUSE_STOPS
        .iter()
        .chain(COMPARATIVES)
        .filter_map(|stop| lower.find(stop))
        .min()
        .unwrap_or(lower.len());

    lower[..cut].trim().to_string()
}

fn has_comparative(object: &str) -> bool {
    let lower = object.to_lowercase();
    COMPARATIVES.iter().any(|marker| lower.contains(marker))
}

fn starts_with_verb(object: &str) -> bool {
    const VERB_FORMS: &[&str] = &[
        "use", "using", "add", "adding", "include", "including", "write", "writing", "put",
        "putting", "apply", "applying", "enable", "enabling", "call", "calling", "leave",
        "leaving", "keep", "keeping", "rely", "relying",
    ];
    object
        .split_whitespace()
        .next()
        .map(|first| VERB_FORMS.contains(&first.to_lowercase().as_str()))
        .unwrap_or(false)
}
