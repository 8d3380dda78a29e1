//! Minimal anchored-glob matcher, plus the separate raw-substring dialect used
//! by model-size and quantisation matching.
//!
//! Two distinct matching dialects exist on purpose and are kept in separate
//! functions so callers cannot blur them together:
//!
//! - [`glob_match`] — the anchored glob used by capability patterns, context
//!   patterns, and include/exclude filters. `*` is only legal at the start,
//!   the end, or both ends of a pattern.
//! - [`contains_ci`] — plain case-insensitive substring containment, used by
//!   `model_sizes.patterns` and `quantization.multipliers` keys. These are
//!   not globs and must never be passed through [`glob_match`].

/// Case-insensitive anchored glob match.
///
/// Recognised shapes: `*text*` (substring), `*text` (suffix), `text*`
/// (prefix), `text` (exact equality), and a standalone `*` (matches
/// anything). Any other placement of `*` is not a valid pattern — see
/// [`validate_glob`] — and this function treats it the same as exact
/// equality against the literal pattern text (callers are expected to have
/// validated patterns before they reach here).
pub fn glob_match(pattern: &str, text: &str) -> bool {
    if pattern == "*" {
        return true;
    }

    let text = text.to_lowercase();

    let starts = pattern.starts_with('*');
    let ends = pattern.ends_with('*');

    match (starts, ends) {
        (true, true) if pattern.len() >= 2 => {
            let inner = pattern[1..pattern.len() - 1].to_lowercase();
            !inner.is_empty() && text.contains(&inner)
        }
        (true, false) => {
            let suffix = pattern[1..].to_lowercase();
            text.ends_with(&suffix)
        }
        (false, true) => {
            let prefix = pattern[..pattern.len() - 1].to_lowercase();
            text.starts_with(&prefix)
        }
        _ => text == pattern.to_lowercase(),
    }
}

/// Validate that `pattern` is a legal anchored glob (see [`glob_match`]).
///
/// A standalone `*` is legal. Otherwise `*` may appear only at the very start,
/// the very end, or both — never in the middle, and never more than once at
/// either end.
pub fn validate_glob(pattern: &str) -> Result<(), String> {
    if pattern == "*" {
        return Ok(());
    }
    let inner_has_star = pattern
        .char_indices()
        .any(|(i, c)| c == '*' && i != 0 && i != pattern.len() - 1);
    if inner_has_star {
        return Err(format!("`*` may only appear at the start or end of `{pattern}`"));
    }
    let star_count = pattern.chars().filter(|&c| c == '*').count();
    if star_count > 2 {
        return Err(format!("too many `*` in pattern `{pattern}`"));
    }
    Ok(())
}

/// Case-insensitive substring containment — the raw (non-glob) dialect used
/// for `model_sizes.patterns` and `quantization.multipliers` keys.
pub fn contains_ci(needle: &str, haystack: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // glob_match
    // -----------------------------------------------------------------------

    #[test]
    fn standalone_star_matches_anything() {
        assert!(glob_match("*", ""));
        assert!(glob_match("*", "llama3-70b"));
    }

    #[test]
    fn substring_dialect() {
        assert!(glob_match("*embed*", "nomic-embed-text"));
        assert!(!glob_match("*embed*", "llama3"));
    }

    #[test]
    fn suffix_dialect() {
        assert!(glob_match("*:32k", "llama3-70b:32k"));
        assert!(!glob_match("*:32k", "llama3-70b:8k"));
    }

    #[test]
    fn prefix_dialect() {
        assert!(glob_match("llama3*", "llama3-8b-instruct"));
        assert!(!glob_match("llama3*", "qwen-llama3"));
    }

    #[test]
    fn exact_dialect() {
        assert!(glob_match("nomic-embed-text", "Nomic-Embed-Text"));
        assert!(!glob_match("nomic-embed-text", "nomic-embed-text-v2"));
    }

    #[test]
    fn matching_is_case_insensitive_on_both_operands() {
        assert!(glob_match("*LLAVA*", "my-llava-7b"));
        assert!(glob_match("*llava*", "MY-LLAVA-7B"));
    }

    // -----------------------------------------------------------------------
    // validate_glob
    // -----------------------------------------------------------------------

    #[test]
    fn validate_accepts_anchored_shapes() {
        assert!(validate_glob("*").is_ok());
        assert!(validate_glob("*x").is_ok());
        assert!(validate_glob("x*").is_ok());
        assert!(validate_glob("*x*").is_ok());
        assert!(validate_glob("x").is_ok());
    }

    #[test]
    fn validate_rejects_interior_star() {
        assert!(validate_glob("foo*bar").is_err());
        assert!(validate_glob("*foo*bar*").is_err());
    }

    // -----------------------------------------------------------------------
    // contains_ci
    // -----------------------------------------------------------------------

    #[test]
    fn contains_ci_is_plain_substring_not_glob() {
        assert!(contains_ci("70b", "llama3-70B-instruct"));
        assert!(contains_ci("Q4", "llama3-70b-q4_k_m"));
        assert!(!contains_ci("72b", "llama3-70b"));
    }
}
