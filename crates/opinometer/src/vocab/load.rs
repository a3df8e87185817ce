use anyhow::Context as _;

use super::default::{
    default_combinations, default_families, default_tiers, default_vendor_to_family,
};
use super::{DEFAULT_VERSION_PATTERN, RawVocabularyFile, Vocabulary, compile_version_pattern};

/// Parse a vocabulary file and layer it over the built-in tables.
pub fn from_toml_str(s: &str) -> anyhow::Result<Vocabulary> {
    let raw: RawVocabularyFile = toml::from_str(s)?;
    build_vocabulary(raw)
}

pub fn load_from_file(path: &std::path::Path) -> anyhow::Result<Vocabulary> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading vocabulary file {}", path.display()))?;
    from_toml_str(&content).with_context(|| format!("parsing vocabulary file {}", path.display()))
}

pub fn load_default() -> Vocabulary {
    Vocabulary {
        families: default_families(),
        tiers: default_tiers(),
        vendor_to_family: default_vendor_to_family(),
        valid: default_combinations(),
        version_re: compile_version_pattern(DEFAULT_VERSION_PATTERN)
            .expect("built-in version pattern compiles"),
    }
}

fn build_vocabulary(raw: RawVocabularyFile) -> anyhow::Result<Vocabulary> {
    let mut vocab = load_default();
    for (token, vendor) in raw.families {
        vocab
            .families
            .insert(token.to_ascii_lowercase(), vendor.to_ascii_lowercase());
    }
    for (token, vendor) in raw.tiers {
        let vendor = vendor.trim().to_ascii_lowercase();
        let vendor = if vendor.is_empty() { None } else { Some(vendor) };
        vocab.tiers.insert(token.to_ascii_lowercase(), vendor);
    }
    for (vendor, family) in raw.vendor_to_family {
        vocab
            .vendor_to_family
            .insert(vendor.to_ascii_lowercase(), family.to_ascii_lowercase());
    }
    for c in raw.valid {
        vocab.valid.insert(super::Combination::new(
            &c.vendor,
            c.version.as_deref(),
            c.tier.as_deref(),
        ));
    }
    if let Some(pattern) = raw.version_pattern.as_deref() {
        vocab.version_re = compile_version_pattern(pattern)
            .with_context(|| format!("invalid version_pattern '{}'", pattern))?;
    }
    tracing::debug!(
        "vocabulary built (families={}, tiers={}, combinations={})",
        vocab.families.len(),
        vocab.tiers.len(),
        vocab.valid.len()
    );
    Ok(vocab)
}
