//! Subject canonicalization.

/// Shortest subject (in chars) that is kept.
pub const MIN_SUBJECT_LEN: usize = 2;
/// Longest subject (in chars) that is kept.
pub const MAX_SUBJECT_LEN: usize = 60;

/// Canonicalizes the free-text subject of a directive.
///
/// Lowercases, trims, strips trailing `. , ; : ! ?`, drops one leading
/// article and collapses whitespace runs. Returns `None` when the result is
/// shorter than [`MIN_SUBJECT_LEN`] or longer than [`MAX_SUBJECT_LEN`].
pub fn normalize_subject(raw: &str) -> Option<String> {
    let lower = raw.to_lowercase();
    let trimmed = lower
        .trim()
        .trim_end_matches(|c: char| matches!(c, '.' | ',' | ';' | ':' | '!' | '?'));
    let without_article = strip_article(trimmed.trim_start());

    let collapsed = without_article.split_whitespace().collect::<Vec<_>>().join(" ");
    let len = collapsed.chars().count();
    if len < MIN_SUBJECT_LEN || len > MAX_SUBJECT_LEN {
        return None;
    }

    Some(collapsed)
}

fn strip_article(text: &str) -> &str {
    match text.split_once(char::is_whitespace) {
        Some((first, rest)) if matches!(first, "the" | "a" | "an") => rest,
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_trims() {
        assert_eq!(normalize_subject("  Semicolons  ").as_deref(), Some("semicolons"));
    }

    #[test]
    fn test_strips_trailing_punctuation_runs() {
        assert_eq!(normalize_subject("tabs!?.").as_deref(), Some("tabs"));
        assert_eq!(normalize_subject("strict mode ;").as_deref(), Some("strict mode"));
    }

    #[test]
    fn test_strips_single_leading_article() {
        assert_eq!(normalize_subject("the any type").as_deref(), Some("any type"));
        assert_eq!(normalize_subject("An  enum").as_deref(), Some("enum"));
        // Only one article is removed
        assert_eq!(normalize_subject("the the thing").as_deref(), Some("the thing"));
        // Articles are whole words only
        assert_eq!(normalize_subject("another thing").as_deref(), Some("another thing"));
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(
            normalize_subject("single\t quotes   for  strings").as_deref(),
            Some("single quotes for strings")
        );
    }

    #[test]
    fn test_length_bounds() {
        assert_eq!(normalize_subject("a"), None);
        assert_eq!(normalize_subject("   "), None);
        assert_eq!(normalize_subject("go").as_deref(), Some("go"));

        let sixty = "x".repeat(60);
        assert_eq!(normalize_subject(&sixty).as_deref(), Some(sixty.as_str()));
        assert_eq!(normalize_subject(&"x".repeat(61)), None);
    }
}
