//! Vocabulary tables for model-mention extraction: family and tier tokens,
//! canonical family per vendor, the allowed (vendor, version, tier) matrix and
//! the version token grammar.

pub mod default;
pub mod load;
pub mod types;

pub use load::*;
pub use types::*;

use once_cell::sync::Lazy;

/// Built-in vocabulary, constructed once and shared read-only.
pub static BUILTIN: Lazy<Vocabulary> = Lazy::new(load_default);
