use serde::{Deserialize, Serialize};
use std::fmt;

/// Confidence grade of a mention. Ordering is by rank: `High` sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detected model reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mention {
    pub vendor: Option<String>,
    /// Canonical or literal family token, for display and search.
    pub family: Option<String>,
    pub version: Option<String>,
    pub tier: Option<String>,
    pub confidence: Confidence,
    /// Sentence (or joined sentence pair) the mention came from.
    pub text: String,
}

impl Mention {
    /// Number of qualifiers (version, tier) resolved.
    pub fn specificity(&self) -> u8 {
        u8::from(self.version.is_some()) + u8::from(self.tier.is_some())
    }

    pub(crate) fn has_triple(&self, vendor: &str, version: &str, tier: &str) -> bool {
        self.vendor.as_deref() == Some(vendor)
            && self.version.as_deref() == Some(version)
            && self.tier.as_deref() == Some(tier)
    }
}
