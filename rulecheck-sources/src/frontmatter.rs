//! Rule document frontmatter.
//!
//! Cursor writes `globs: src/**/*.ts, lib/**` unquoted, which a YAML parser
//! rejects (`*` starts an alias). Rule metadata only ever uses a handful of
//! flat keys, so this module reads a small YAML subset by hand:
//!
//! - `key: value` scalars, optionally quoted
//! - comma separated lists (`globs: a, b`)
//! - flow lists (`globs: ["a", "b"]`)
//! - block lists (`globs:` followed by `- a` lines)
//!
//! Anything else makes the whole block malformed.

use rulecheck::Scope;

const DELIMITER: &str = "---";

/// Metadata read from a rule document's frontmatter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    pub description: Option<String>,
    /// `globs` (Cursor) or `paths` (Claude), merged.
    pub globs: Vec<String>,
    pub always_apply: bool,
}

impl Frontmatter {
    pub fn scope(&self) -> Scope {
        Scope::new(self.globs.clone(), self.always_apply)
    }
}

/// A document split into its frontmatter block and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split<'a> {
    /// The raw block between the delimiters, if the document has one.
    pub block: Option<&'a str>,
    pub body: &'a str,
}

/// Splits a leading `---` delimited block off a document.
///
/// A document whose opening delimiter is never closed has no frontmatter.
pub fn split(content: &str) -> Split<'_> {
    let no_block = Split {
        block: None,
        body: content,
    };

    let mut lines = content.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return no_block;
    };
    if first.trim() != DELIMITER {
        return no_block;
    }

    let block_start = first.len();
    let mut offset = block_start;
    for line in lines {
        if line.trim() == DELIMITER {
            return Split {
                block: Some(&content[block_start..offset]),
                body: &content[offset + line.len()..],
            };
        }
        offset += line.len();
    }

    no_block
}

/// Parses a frontmatter block. Returns `None` when the block is malformed.
pub fn parse(block: &str) -> Option<Frontmatter> {
    let mut frontmatter = Frontmatter::default();
    // Key whose value is an indented block list on the following lines
    let mut open_list: Option<String> = None;

    for raw_line in block.lines() {
        let line = raw_line.trim_end();
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let item = match trimmed {
            "-" => Some(""),
            _ => trimmed.strip_prefix("- "),
        };
        if let Some(item) = item {
            let key = open_list.as_deref()?;
            apply(&mut frontmatter, key, Value::List(vec![unquote(item)]));
            continue;
        }

        let (key, value) = trimmed.split_once(':')?;
        let key = key.trim();
        if key.is_empty() || key.contains(char::is_whitespace) {
            return None;
        }

        let value = value.trim();
        if value.is_empty() {
            open_list = Some(key.to_string());
            continue;
        }
        open_list = None;
        apply(&mut frontmatter, key, parse_value(value)?);
    }

    Some(frontmatter)
}

/// Splits and parses in one step. Returns the scope-bearing metadata (or
/// `None` when absent or malformed) and the body.
pub fn read(content: &str) -> (Option<Frontmatter>, &str) {
    let Split { block, body } = split(content);
    (block.and_then(parse), body)
}

enum Value {
    Scalar(String),
    List(Vec<String>),
}

fn parse_value(value: &str) -> Option<Value> {
    if let Some(inner) = value.strip_prefix('[') {
        let inner = inner.strip_suffix(']')?;
        return Some(Value::List(split_list(inner)));
    }
    if value.contains(',') && !is_quoted(value) {
        return Some(Value::List(split_list(value)));
    }
    Some(Value::Scalar(unquote(value)))
}

fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(unquote)
        .filter(|item| !item.is_empty())
        .collect()
}

fn is_quoted(value: &str) -> bool {
    value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')))
}

fn unquote(value: &str) -> String {
    let value = value.trim();
    if is_quoted(value) {
        value[1..value.len() - 1].to_string()
    } else {
        value.to_string()
    }
}

fn apply(frontmatter: &mut Frontmatter, key: &str, value: Value) {
    match (key, value) {
        ("globs" | "paths", Value::List(items)) => {
            frontmatter.globs.extend(items.into_iter().filter(|item| !item.is_empty()))
        }
        ("globs" | "paths", Value::Scalar(item)) => {
            if !item.is_empty() {
                frontmatter.globs.push(item);
            }
        }
        ("alwaysApply" | "always_apply", Value::Scalar(flag)) => {
            frontmatter.always_apply = flag.eq_ignore_ascii_case("true");
        }
        ("description", Value::Scalar(text)) => frontmatter.description = Some(text),
        ("description", Value::List(parts)) => frontmatter.description = Some(parts.join(", ")),
        _ => {}
    }
}
