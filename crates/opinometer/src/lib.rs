//! Opinometer: sentiment over community discussion of AI models.
//!
//! The core is [`extract_model_mentions`], which finds vendor/version/tier
//! mentions in free text, and [`best_model_label`], which turns them into a
//! display label. Around it sit post sources, sentiment scoring, aggregate
//! analysis and result sinks used by the `opinometer` binary.

pub mod analysis;
pub mod config;
pub mod mention;
pub mod sentiment;
pub mod sink;
pub mod source;
pub mod version;
pub mod vocab;

pub use mention::{Confidence, Mention, MentionExtractor, best_model_label, extract_model_mentions};
pub use sentiment::{LexiconScorer, SentimentScorer};
pub use sink::ResultSink;
pub use source::PostSource;
