//! Claude-specific version labelling ("Sonnet 4.5", "Claude 3", "Opus").
//!
//! Coarser than [`crate::mention`]: a fixed list of Claude patterns is searched
//! in the lower-cased post text, the earliest match wins (ties go to the more
//! specific pattern), and the matched text is normalized to a display label.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::mention::label::capitalize;

/// Search patterns, most specific first. Tier+version forms precede plain
/// Claude versions so "Sonnet 4.5" is not read as "Claude 4.5".
const SEARCH_PATTERNS: &[&str] = &[
    r"sonnet\s*(?:4\.5|4-5)",
    r"sonnet\s*(?:3\.7|3-7)",
    r"sonnet\s*(?:3\.5|3-5)",
    r"opus\s*(?:4\.0|4-0|4)",
    r"opus\s*(?:3\.5|3-5)",
    r"haiku\s*(?:3\.5|3-5)",
    r"claude\s*(?:3\.7|3-7)",
    r"claude\s*(?:3\.5|3-5)",
    r"claude\s*(?:3\.0|3-0|3)",
    r"claude\s*(?:4\.5|4-5)",
    r"claude\s*(?:4\.0|4-0|4)",
    r"claude\s*(?:2\.5|2-5)",
    r"claude\s*(?:2\.0|2-0|2)",
    r"sonnet",
    r"opus",
    r"haiku",
    r"claude\s+(?:code|ai)",
];

/// Normalization rules applied to the matched text, first hit wins.
const NORMALIZE_RULES: &[(&str, &str)] = &[
    (r"sonnet\s*(?:4\.5|4-5)", "Sonnet 4.5"),
    (r"sonnet\s*(?:3\.7|3-7)", "Sonnet 3.7"),
    (r"sonnet\s*(?:3\.5|3-5)", "Sonnet 3.5"),
    (r"opus\s*(?:4\.0|4-0|4)", "Opus 4"),
    (r"opus\s*(?:3\.5|3-5)", "Opus 3.5"),
    (r"haiku\s*(?:3\.5|3-5)", "Haiku 3.5"),
    (r"3\.7|3-7", "Claude 3.7"),
    (r"3\.5|3-5", "Claude 3.5"),
    (r"3\.0|3-0|\bclaude\s+3\b", "Claude 3"),
    (r"4\.5|4-5", "Claude 4.5"),
    (r"4\.0|4-0|\bclaude\s+4\b", "Claude 4"),
    (r"2\.5|2-5", "Claude 2.5"),
    (r"2\.0|2-0|\bclaude\s+2\b", "Claude 2"),
    (r"opus", "Opus"),
    (r"sonnet", "Sonnet"),
    (r"haiku", "Haiku"),
    (r"claude (?:code|ai)", "Claude"),
];

static SEARCH: Lazy<Vec<Regex>> = Lazy::new(|| {
    SEARCH_PATTERNS
        .iter()
        .map(|p| Regex::new(p).expect("built-in search pattern compiles"))
        .collect()
});

static NORMALIZE: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    NORMALIZE_RULES
        .iter()
        .map(|(p, label)| (Regex::new(p).expect("built-in normalize rule compiles"), *label))
        .collect()
});

/// Claude version label for a post, if the text names one.
pub fn extract_claude_version(title: &str, body: &str) -> Option<String> {
    let text = format!("{} {}", title, body).to_lowercase();
    SEARCH
        .iter()
        .enumerate()
        .filter_map(|(priority, re)| re.find(&text).map(|m| (m.start(), priority, m.as_str())))
        .min_by_key(|&(start, priority, _)| (start, priority))
        .map(|(_, _, matched)| normalize_version(matched.trim()))
}

/// Map matched version text to its display label.
pub fn normalize_version(matched: &str) -> String {
    let matched = matched.trim().to_lowercase();
    NORMALIZE
        .iter()
        .find(|(re, _)| re.is_match(&matched))
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| title_case(&matched))
}

/// Upper-case the first letter of each alphabetic run.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.push_str(&capitalize(&ch.to_string()));
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_expected_labels() {
        let cases: &[(&str, Option<&str>)] = &[
            ("Holy SH*T they cooked. Claude 3.7 coded this game", Some("Claude 3.7")),
            ("Demo of Claude 4 autonomously coding", Some("Claude 4")),
            ("Sonnet 4.5 is finally here!", Some("Sonnet 4.5")),
            ("Claude 4.5 released with new features", Some("Claude 4.5")),
            ("I've been using Claude Code for months", Some("Claude")),
            ("Sonnet is better than Opus for coding", Some("Sonnet")),
            ("Claude 3.5 vs Claude 4 comparison", Some("Claude 3.5")),
            ("Opus 4 vs Sonnet 3.5", Some("Opus 4")),
            ("Using Haiku for simple tasks", Some("Haiku")),
            ("No AI mentioned here", None),
        ];
        for (title, expected) in cases {
            assert_eq!(
                extract_claude_version(title, "").as_deref(),
                *expected,
                "title: {}",
                title
            );
        }
    }

    #[test]
    fn body_is_searched_after_title() {
        assert_eq!(
            extract_claude_version("Weekly thread", "switched to sonnet 3-5 today").as_deref(),
            Some("Sonnet 3.5")
        );
        assert_eq!(
            extract_claude_version("Haiku first", "then Claude 3.7").as_deref(),
            Some("Haiku")
        );
    }

    #[test]
    fn unmatched_normalization_is_title_cased() {
        assert_eq!(normalize_version("claude3"), "Claude3");
        assert_eq!(normalize_version("CLAUDE  X"), "Claude  X");
        assert_eq!(title_case("gpt-4o mini"), "Gpt-4O Mini");
    }
}
