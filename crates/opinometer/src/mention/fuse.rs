//! Adjacent-sentence fusion of partial mentions.

use super::types::{Confidence, Mention};
use crate::vocab::Vocabulary;

/// Complete version-only mentions with tier-only mentions of the same vendor
/// in the next sentence (and the reverse). Only `i -> i + 1` pairs are
/// considered; fused results are appended to `mentions` and never re-fused.
pub(crate) fn fuse_adjacent(vocab: &Vocabulary, per_sentence: &[Vec<Mention>], mentions: &mut Vec<Mention>) {
    for pair in per_sentence.windows(2) {
        let (curr, next) = (&pair[0], &pair[1]);
        for m1 in curr {
            let (Some(vendor), Some(version), None) =
                (m1.vendor.as_deref(), m1.version.as_deref(), m1.tier.as_deref())
            else {
                continue;
            };
            for m2 in next {
                if m2.vendor.as_deref() == Some(vendor)
                    && m2.version.is_none()
                    && let Some(tier) = m2.tier.as_deref()
                {
                    add_fused(vocab, mentions, vendor, version, tier, m1, m2);
                }
            }
        }
        for m1 in curr {
            let (Some(vendor), None, Some(tier)) =
                (m1.vendor.as_deref(), m1.version.as_deref(), m1.tier.as_deref())
            else {
                continue;
            };
            for m2 in next {
                if m2.vendor.as_deref() == Some(vendor)
                    && m2.tier.is_none()
                    && let Some(version) = m2.version.as_deref()
                {
                    add_fused(vocab, mentions, vendor, version, tier, m1, m2);
                }
            }
        }
    }
}

fn add_fused(
    vocab: &Vocabulary,
    mentions: &mut Vec<Mention>,
    vendor: &str,
    version: &str,
    tier: &str,
    first: &Mention,
    second: &Mention,
) {
    if !vocab.is_valid(vendor, Some(version), Some(tier)) {
        return;
    }
    if mentions.iter().any(|m| m.has_triple(vendor, version, tier)) {
        return;
    }
    tracing::trace!("fused {} {} {} across sentences", vendor, version, tier);
    mentions.push(Mention {
        vendor: Some(vendor.to_string()),
        family: Some(vocab.family_for(vendor).unwrap_or(vendor).to_string()),
        version: Some(version.to_string()),
        tier: Some(tier.to_string()),
        confidence: Confidence::High,
        text: format!("{} {}", first.text, second.text),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::load_default;

    fn partial(vendor: &str, version: Option<&str>, tier: Option<&str>, text: &str) -> Mention {
        Mention {
            vendor: Some(vendor.to_string()),
            family: None,
            version: version.map(str::to_string),
            tier: tier.map(str::to_string),
            confidence: Confidence::Medium,
            text: text.to_string(),
        }
    }

    fn run(per_sentence: Vec<Vec<Mention>>) -> Vec<Mention> {
        let mut flat: Vec<Mention> = per_sentence.iter().flatten().cloned().collect();
        fuse_adjacent(&load_default(), &per_sentence, &mut flat);
        flat
    }

    #[test]
    fn version_then_tier_fuses() {
        let out = run(vec![
            vec![partial("anthropic", Some("3.5"), None, "A.")],
            vec![partial("anthropic", None, Some("sonnet"), "B.")],
        ]);
        assert_eq!(out.len(), 3);
        let fused = &out[2];
        assert!(fused.has_triple("anthropic", "3.5", "sonnet"));
        assert_eq!(fused.family.as_deref(), Some("claude"));
        assert_eq!(fused.confidence, Confidence::High);
        assert_eq!(fused.text, "A. B.");
    }

    #[test]
    fn tier_then_version_fuses() {
        let out = run(vec![
            vec![partial("anthropic", None, Some("opus"), "Opus rocks.")],
            vec![partial("anthropic", Some("3"), None, "Version 3 anyway.")],
        ]);
        assert_eq!(out.len(), 3);
        assert!(out[2].has_triple("anthropic", "3", "opus"));
        assert_eq!(out[2].text, "Opus rocks. Version 3 anyway.");
    }

    #[test]
    fn invalid_or_cross_vendor_pairs_do_not_fuse() {
        let out = run(vec![
            vec![
                partial("anthropic", Some("3"), None, "a"),
                partial("openai", Some("4.5"), None, "a"),
            ],
            vec![partial("anthropic", None, Some("sonnet"), "b")],
        ]);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn only_adjacent_sentences_fuse() {
        let out = run(vec![
            vec![partial("anthropic", Some("3.5"), None, "a")],
            vec![],
            vec![partial("anthropic", None, Some("haiku"), "c")],
        ]);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn existing_triple_is_not_duplicated() {
        let mut complete = partial("anthropic", Some("3.5"), Some("sonnet"), "x");
        complete.confidence = Confidence::High;
        let out = run(vec![
            vec![complete, partial("anthropic", Some("3.5"), None, "a")],
            vec![
                partial("anthropic", None, Some("sonnet"), "b"),
                partial("anthropic", None, Some("sonnet"), "b2"),
            ],
        ]);
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn repeated_partials_fuse_once() {
        let out = run(vec![
            vec![partial("anthropic", Some("3.5"), None, "a")],
            vec![
                partial("anthropic", None, Some("sonnet"), "b"),
                partial("anthropic", None, Some("sonnet"), "b2"),
            ],
        ]);
        assert_eq!(out.len(), 4);
        assert_eq!(out[3].text, "a b");
    }
}
