//! Code-pattern matching collaborator.
//!
//! # Responsibility
//! - Decide whether a declared code pattern covers a concrete code.
//! - Own wildcard semantics so registration and lookups match uniformly.
//!
//! # Invariants
//! - Matching is non-exclusive: one pattern may cover many codes.
//! - A pattern without wildcard characters matches by exact equality only.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Predicate contract for code-pattern matching.
///
/// Kept as a one-method trait so the matching algorithm stays swappable and
/// testable independently from registration and resolution.
pub trait CodeMatcher: Send + Sync {
    /// Returns whether `pattern` covers `code`.
    fn matches(&self, pattern: &str, code: &str) -> bool;
}

/// Default matcher: `*` covers any run of characters, `?` exactly one.
///
/// Patterns are translated to anchored regular expressions and the compiled
/// form is cached per pattern.
#[derive(Debug, Default)]
pub struct WildcardMatcher {
    cache: Mutex<BTreeMap<String, Regex>>,
}

impl WildcardMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    fn compiled(&self, pattern: &str) -> Option<Regex> {
        let mut cache = match self.cache.lock() {
            Ok(guard) => guard,
            // A poisoned lock cannot leave the cache logically invalid;
            // entries are write-once per pattern.
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(regex) = cache.get(pattern) {
            return Some(regex.clone());
        }
        let regex = Regex::new(&translate_pattern(pattern)).ok()?;
        cache.insert(pattern.to_string(), regex.clone());
        Some(regex)
    }
}

impl CodeMatcher for WildcardMatcher {
    fn matches(&self, pattern: &str, code: &str) -> bool {
        if pattern == code {
            return true;
        }
        if !has_wildcards(pattern) {
            return false;
        }
        match self.compiled(pattern) {
            Some(regex) => regex.is_match(code),
            None => false,
        }
    }
}

fn has_wildcards(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

fn translate_pattern(pattern: &str) -> String {
    let mut translated = String::with_capacity(pattern.len() + 8);
    translated.push('^');
    for c in pattern.chars() {
        match c {
            '*' => translated.push_str(".*"),
            '?' => translated.push('.'),
            other => translated.push_str(&regex::escape(&other.to_string())),
        }
    }
    translated.push('$');
    translated
}

#[cfg(test)]
mod tests {
    use super::{CodeMatcher, WildcardMatcher};

    #[test]
    fn literal_pattern_requires_exact_equality() {
        let matcher = WildcardMatcher::new();
        assert!(matcher.matches("b.retail", "b.retail"));
        assert!(!matcher.matches("b.retail", "b.retail.cn"));
        assert!(!matcher.matches("b.retail", "b.ret"));
    }

    #[test]
    fn star_covers_any_run_of_characters() {
        let matcher = WildcardMatcher::new();
        assert!(matcher.matches("b.retail.*", "b.retail.cn"));
        assert!(matcher.matches("b.retail.*", "b.retail."));
        assert!(matcher.matches("b.*", "b.retail.cn"));
        assert!(!matcher.matches("b.retail.*", "b.wholesale.cn"));
    }

    #[test]
    fn question_mark_covers_exactly_one_character() {
        let matcher = WildcardMatcher::new();
        assert!(matcher.matches("p.v?", "p.v1"));
        assert!(!matcher.matches("p.v?", "p.v10"));
        assert!(!matcher.matches("p.v?", "p.v"));
    }

    #[test]
    fn regex_metacharacters_in_codes_stay_literal() {
        let matcher = WildcardMatcher::new();
        assert!(matcher.matches("b.retail+*", "b.retail+promo"));
        assert!(!matcher.matches("b.retaill*", "b.retail"));
    }

    #[test]
    fn repeated_patterns_reuse_compiled_form() {
        let matcher = WildcardMatcher::new();
        for _ in 0..3 {
            assert!(matcher.matches("b.*", "b.any"));
        }
    }
}
