use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Version tokens: 3, 3.5, 4, 4.1, 4.5, o3, o4, o3-mini. Kept narrow so plain
/// numbers in prose do not read as versions.
pub const DEFAULT_VERSION_PATTERN: &str = r"\b(?:3(?:\.5)?|4(?:\.1|\.5)?|o[34](?:-mini)?)\b";

/// One allowed (vendor, version, tier) triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Combination {
    pub vendor: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub tier: Option<String>,
}

impl Combination {
    pub fn new(vendor: &str, version: Option<&str>, tier: Option<&str>) -> Self {
        Self {
            vendor: vendor.to_ascii_lowercase(),
            version: version.map(|v| v.to_ascii_lowercase()),
            tier: tier.map(|t| t.to_ascii_lowercase()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// Lower-case family or vendor token -> vendor.
    pub families: HashMap<String, String>,
    /// Lower-case tier token -> vendor, `None` when the tier is shared.
    pub tiers: HashMap<String, Option<String>>,
    /// Vendor -> canonical family token.
    pub vendor_to_family: HashMap<String, String>,
    pub valid: HashSet<Combination>,
    pub version_re: Regex,
}

impl Vocabulary {
    pub fn is_valid(&self, vendor: &str, version: Option<&str>, tier: Option<&str>) -> bool {
        self.valid.contains(&Combination::new(vendor, version, tier))
    }

    /// Canonical family token for a vendor, if one is registered.
    pub fn family_for(&self, vendor: &str) -> Option<&str> {
        self.vendor_to_family.get(vendor).map(String::as_str)
    }

    /// All version tokens in `text` as (character offset, lower-cased token).
    pub fn find_versions(&self, text: &str) -> Vec<(usize, String)> {
        self.version_re
            .find_iter(text)
            .map(|m| (text[..m.start()].chars().count(), m.as_str().to_lowercase()))
            .collect()
    }
}

/// Compile a version grammar; matching is always case-insensitive.
pub fn compile_version_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

/// On-disk vocabulary extension file (TOML).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawVocabularyFile {
    #[serde(default)]
    pub families: HashMap<String, String>,
    /// An empty vendor string marks a tier as not vendor-diagnostic.
    #[serde(default)]
    pub tiers: HashMap<String, String>,
    #[serde(default)]
    pub vendor_to_family: HashMap<String, String>,
    #[serde(default)]
    pub valid: Vec<Combination>,
    #[serde(default)]
    pub version_pattern: Option<String>,
}
