//! Human-readable rendering of mentions.

use std::cmp::Reverse;

use super::types::Mention;

/// Rendering for a mention with neither a known vendor nor a tier.
pub const FALLBACK_LABEL: &str = "Unknown";

/// Render the best label among alternative mentions.
///
/// Candidates are ranked by confidence, then by specificity (mentions with
/// both version and tier first); remaining ties keep input order. The first
/// candidate that renders to something other than [`FALLBACK_LABEL`] wins.
pub fn best_model_label(mentions: &[Mention]) -> Option<String> {
    let mut ordered: Vec<&Mention> = mentions.iter().collect();
    ordered.sort_by_key(|m| (m.confidence, Reverse(m.specificity())));
    ordered
        .into_iter()
        .map(render_label)
        .find(|label| label != FALLBACK_LABEL)
}

/// Render one mention with the vendor-specific formatting rules.
pub fn render_label(m: &Mention) -> String {
    let version = m.version.as_deref();
    let tier = m.tier.as_deref();
    match m.vendor.as_deref() {
        Some("anthropic") => match (version, tier) {
            (Some(v), Some(t)) => format!("Claude {} {}", render_version(v), capitalize(t)),
            (None, Some(t)) => format!("Claude {}", capitalize(t)),
            (Some(v), None) if v.starts_with('o') => format!("Claude {}", v.to_uppercase()),
            (Some(v), None) => format!("Claude {}", v),
            (None, None) => "Claude".to_string(),
        },
        Some("openai") => match version {
            Some(v) if v.starts_with('o') => v.to_uppercase(),
            Some(v) => format!("GPT-{}", v),
            None => "OpenAI".to_string(),
        },
        vendor => match (tier, vendor) {
            (Some(t), _) => capitalize(t),
            (None, Some(vendor)) => capitalize(vendor),
            (None, None) => FALLBACK_LABEL.to_string(),
        },
    }
}

/// Numeric versions keep their digits; others are upper-cased.
fn render_version(version: &str) -> String {
    let digits = version.replace('.', "");
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        capitalize(version)
    } else {
        version.to_uppercase()
    }
}

/// Upper-case the first character and lower-case the rest.
pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mention::Confidence;

    fn m(vendor: Option<&str>, version: Option<&str>, tier: Option<&str>, c: Confidence) -> Mention {
        Mention {
            vendor: vendor.map(str::to_string),
            family: None,
            version: version.map(str::to_string),
            tier: tier.map(str::to_string),
            confidence: c,
            text: String::new(),
        }
    }

    #[test]
    fn anthropic_rendering() {
        let hi = Confidence::High;
        assert_eq!(render_label(&m(Some("anthropic"), Some("3.5"), Some("sonnet"), hi)), "Claude 3.5 Sonnet");
        assert_eq!(render_label(&m(Some("anthropic"), Some("o3"), Some("opus"), hi)), "Claude O3 Opus");
        assert_eq!(render_label(&m(Some("anthropic"), None, Some("HAIKU"), hi)), "Claude Haiku");
        assert_eq!(render_label(&m(Some("anthropic"), Some("o4"), None, hi)), "Claude O4");
        assert_eq!(render_label(&m(Some("anthropic"), Some("3"), None, hi)), "Claude 3");
        assert_eq!(render_label(&m(Some("anthropic"), None, None, hi)), "Claude");
    }

    #[test]
    fn openai_rendering() {
        let hi = Confidence::High;
        assert_eq!(render_label(&m(Some("openai"), Some("4.5"), None, hi)), "GPT-4.5");
        assert_eq!(render_label(&m(Some("openai"), Some("o3-mini"), None, hi)), "O3-MINI");
        assert_eq!(render_label(&m(Some("openai"), None, Some("mini"), hi)), "OpenAI");
    }

    #[test]
    fn other_vendor_rendering() {
        let lo = Confidence::Low;
        assert_eq!(render_label(&m(None, None, Some("pro"), lo)), "Pro");
        assert_eq!(render_label(&m(Some("google"), None, None, lo)), "Google");
        assert_eq!(render_label(&m(Some("google"), None, Some("pro"), lo)), "Pro");
        assert_eq!(render_label(&m(None, Some("4"), None, lo)), FALLBACK_LABEL);
    }

    #[test]
    fn best_label_ranks_confidence_then_specificity() {
        let list = vec![
            m(None, None, Some("pro"), Confidence::Low),
            m(Some("anthropic"), Some("3.5"), None, Confidence::High),
            m(Some("openai"), None, None, Confidence::Medium),
            m(Some("anthropic"), Some("3.5"), Some("sonnet"), Confidence::High),
        ];
        assert_eq!(best_model_label(&list).as_deref(), Some("Claude 3.5 Sonnet"));
        assert_eq!(best_model_label(&list[..3]).as_deref(), Some("Claude 3.5"));
        assert_eq!(best_model_label(&list[..1]).as_deref(), Some("Pro"));
    }

    #[test]
    fn best_label_skips_fallback_and_handles_empty() {
        assert_eq!(best_model_label(&[]), None);
        let unknown = m(None, Some("4"), None, Confidence::High);
        assert_eq!(best_model_label(std::slice::from_ref(&unknown)), None);
        let list = vec![unknown, m(None, None, Some("pro"), Confidence::Low)];
        assert_eq!(best_model_label(&list).as_deref(), Some("Pro"));
    }

    #[test]
    fn capitalize_matches_title_rules() {
        assert_eq!(capitalize("sonnet"), "Sonnet");
        assert_eq!(capitalize("OPUS"), "Opus");
        assert_eq!(capitalize("3.5"), "3.5");
        assert_eq!(capitalize(""), "");
    }
}
