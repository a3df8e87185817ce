use super::types::Combination;
use std::collections::{HashMap, HashSet};

pub fn default_families() -> HashMap<String, String> {
    let mut m = HashMap::new();
    for (token, vendor) in [
        ("claude", "anthropic"),
        ("anthropic", "anthropic"),
        ("gpt", "openai"),
        ("openai", "openai"),
        ("gemini", "google"),
        ("llama", "meta"),
        ("mistral", "mistral"),
        ("qwen", "alibaba"),
        ("deepseek", "deepseek"),
    ] {
        m.insert(token.to_string(), vendor.to_string());
    }
    m
}

pub fn default_tiers() -> HashMap<String, Option<String>> {
    let mut m = HashMap::new();
    m.insert("sonnet".into(), Some("anthropic".into()));
    m.insert("haiku".into(), Some("anthropic".into()));
    m.insert("opus".into(), Some("anthropic".into()));
    // weak prior
    m.insert("mini".into(), Some("openai".into()));
    m.insert("pro".into(), None);
    m
}

pub fn default_vendor_to_family() -> HashMap<String, String> {
    let mut m = HashMap::new();
    for (vendor, family) in [
        ("anthropic", "claude"),
        ("openai", "gpt"),
        ("google", "gemini"),
        ("meta", "llama"),
        ("mistral", "mistral"),
        ("alibaba", "qwen"),
        ("deepseek", "deepseek"),
    ] {
        m.insert(vendor.to_string(), family.to_string());
    }
    m
}

pub fn default_combinations() -> HashSet<Combination> {
    [
        ("anthropic", Some("3.5"), Some("sonnet")),
        ("anthropic", Some("3.5"), Some("haiku")),
        ("anthropic", Some("3"), Some("opus")),
        ("anthropic", None, Some("sonnet")),
        ("anthropic", None, Some("haiku")),
        ("anthropic", None, Some("opus")),
        ("openai", Some("4.1"), None),
        ("openai", Some("4.5"), None),
        ("openai", Some("o3"), None),
        ("openai", Some("o4"), None),
        ("openai", Some("o3-mini"), None),
    ]
    .into_iter()
    .map(|(vendor, version, tier)| Combination::new(vendor, version, tier))
    .collect()
}
