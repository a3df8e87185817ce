//! Per-sentence candidate detection.
//!
//! A sentence is scanned once for family, tier and version positions (token
//! indices), then three passes emit mentions: tier-anchored, standalone
//! versions, and bare family anchors for vendors not yet represented.

use std::collections::HashSet;

use super::types::{Confidence, Mention};
use crate::vocab::Vocabulary;

/// Characters stripped from both ends of a token before lookup.
const STRIP: &[char] = &['.', ',', ':', ';', '(', ')', '[', ']', '{', '}', '"', '\''];

struct FamilyHit<'v> {
    index: usize,
    token: &'v str,
    vendor: &'v str,
}

struct TierHit<'v> {
    index: usize,
    token: &'v str,
    vendor: Option<&'v str>,
}

struct VersionHit {
    index: usize,
    value: String,
}

struct SentenceScan<'v> {
    families: Vec<FamilyHit<'v>>,
    tiers: Vec<TierHit<'v>>,
    versions: Vec<VersionHit>,
    window: usize,
}

impl<'v> SentenceScan<'v> {
    fn new(vocab: &'v Vocabulary, sentence: &str, window: usize) -> Self {
        let tokens: Vec<&str> = sentence.split_whitespace().collect();
        let mut families = Vec::new();
        let mut tiers = Vec::new();
        for (index, raw) in tokens.iter().enumerate() {
            let lowered = raw.to_lowercase();
            let norm = lowered.trim_matches(STRIP);
            if let Some((token, vendor)) = vocab.families.get_key_value(norm) {
                families.push(FamilyHit {
                    index,
                    token,
                    vendor,
                });
            }
            if let Some((token, vendor)) = vocab.tiers.get_key_value(norm) {
                tiers.push(TierHit {
                    index,
                    token,
                    vendor: vendor.as_deref(),
                });
            }
        }
        let versions = vocab
            .find_versions(sentence)
            .into_iter()
            .map(|(offset, value)| VersionHit {
                index: token_at_offset(&tokens, offset),
                value,
            })
            .collect();
        Self {
            families,
            tiers,
            versions,
            window,
        }
    }

    fn nearest_family(&self, idx: usize) -> Option<&FamilyHit<'v>> {
        nearest(&self.families, idx, self.window, |h| h.index)
    }

    fn nearest_version(&self, idx: usize) -> Option<&VersionHit> {
        nearest(&self.versions, idx, self.window, |h| h.index)
    }
}

/// Closest hit by token distance (earliest on ties), if within `window`.
fn nearest<T>(hits: &[T], idx: usize, window: usize, pos: impl Fn(&T) -> usize) -> Option<&T> {
    let hit = hits.iter().min_by_key(|h| pos(h).abs_diff(idx))?;
    (pos(hit).abs_diff(idx) <= window).then_some(hit)
}

/// Map a character offset to the index of the whitespace token owning it,
/// assuming one separator character between tokens.
fn token_at_offset(tokens: &[&str], offset: usize) -> usize {
    let mut end = 0;
    for (i, t) in tokens.iter().enumerate() {
        end += t.chars().count() + 1;
        if end > offset {
            return i;
        }
    }
    tokens.len().saturating_sub(1)
}

/// Vendor implied by the lexical shape of a bare version token.
fn vendor_from_version_shape(version: &str) -> Option<&'static str> {
    if version.starts_with('4') || version.starts_with('o') {
        Some("openai")
    } else if version.starts_with('3') {
        Some("anthropic")
    } else {
        None
    }
}

fn mention(
    vendor: Option<&str>,
    family: Option<&str>,
    version: Option<String>,
    tier: Option<&str>,
    confidence: Confidence,
    sentence: &str,
) -> Mention {
    Mention {
        vendor: vendor.map(str::to_string),
        family: family.map(str::to_string),
        version,
        tier: tier.map(str::to_string),
        confidence,
        text: sentence.to_string(),
    }
}

pub(crate) fn detect_sentence(vocab: &Vocabulary, window: usize, sentence: &str) -> Vec<Mention> {
    if sentence.is_empty() {
        return Vec::new();
    }
    let scan = SentenceScan::new(vocab, sentence, window);
    let mut acc = Vec::new();
    tier_anchored(vocab, &scan, sentence, &mut acc);
    standalone_versions(vocab, &scan, sentence, &mut acc);
    bare_families(&scan, sentence, &mut acc);
    acc
}

fn tier_anchored(vocab: &Vocabulary, scan: &SentenceScan<'_>, sentence: &str, acc: &mut Vec<Mention>) {
    for tier in &scan.tiers {
        let fam = scan.nearest_family(tier.index);
        let mut version = scan.nearest_version(tier.index).map(|v| v.value.clone());
        let vendor = fam.map(|f| f.vendor).or(tier.vendor);
        let family = fam
            .map(|f| f.token)
            .or_else(|| vendor.and_then(|v| vocab.family_for(v)));

        // A version the matrix rejects for this tier is coincidental proximity.
        let rejected = match (vendor, version.as_deref()) {
            (Some(vendor), Some(v)) => !vocab.is_valid(vendor, Some(v), Some(tier.token)),
            _ => false,
        };
        if rejected {
            version = None;
        }

        let confidence = if fam.is_some() && version.is_some() {
            Confidence::High
        } else if fam.is_some() || vendor.is_some() {
            Confidence::Medium
        } else {
            Confidence::Low
        };
        acc.push(mention(
            vendor,
            family,
            version,
            Some(tier.token),
            confidence,
            sentence,
        ));
    }
}

fn standalone_versions(
    vocab: &Vocabulary,
    scan: &SentenceScan<'_>,
    sentence: &str,
    acc: &mut Vec<Mention>,
) {
    let taken: HashSet<String> = acc.iter().filter_map(|m| m.version.clone()).collect();
    for hit in &scan.versions {
        if taken.contains(&hit.value) {
            continue;
        }
        let fam = scan.nearest_family(hit.index);
        let vendor = match fam {
            Some(f) => Some(f.vendor),
            None => vendor_from_version_shape(&hit.value),
        };
        let family = fam
            .map(|f| f.token)
            .or_else(|| vendor.and_then(|v| vocab.family_for(v)));
        let confidence = if fam.is_some() {
            Confidence::High
        } else if vendor.is_some() {
            Confidence::Medium
        } else {
            Confidence::Low
        };
        acc.push(mention(
            vendor,
            family,
            Some(hit.value.clone()),
            None,
            confidence,
            sentence,
        ));
    }
}

fn bare_families(scan: &SentenceScan<'_>, sentence: &str, acc: &mut Vec<Mention>) {
    for fam in &scan.families {
        if acc.iter().any(|m| m.vendor.as_deref() == Some(fam.vendor)) {
            continue;
        }
        acc.push(mention(
            Some(fam.vendor),
            Some(fam.token),
            None,
            None,
            Confidence::Medium,
            sentence,
        ));
    }
}
