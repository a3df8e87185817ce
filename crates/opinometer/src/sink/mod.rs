//! Result sinks: where a finished run goes.

pub mod json;
pub mod log;

pub use json::JsonFileSink;
pub use log::LogSink;

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use uuid::Uuid;

use crate::analysis::{CooccurrenceNetwork, PostResult, Summary, WordCount};
use crate::source::Post;

/// Everything produced by one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub query: String,
    /// Unix seconds.
    pub generated_at: u64,
    pub posts: Vec<Post>,
    pub results: Vec<PostResult>,
    pub summary: Summary,
    pub words: Vec<WordCount>,
    pub network: Option<CooccurrenceNetwork>,
}

impl RunReport {
    pub fn new(query: impl Into<String>, posts: Vec<Post>, results: Vec<PostResult>, summary: Summary) -> Self {
        let generated_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            run_id: Uuid::new_v4(),
            query: query.into(),
            generated_at,
            posts,
            results,
            summary,
            words: Vec::new(),
            network: None,
        }
    }

    pub fn with_words(mut self, words: Vec<WordCount>) -> Self {
        self.words = words;
        self
    }

    pub fn with_network(mut self, network: CooccurrenceNetwork) -> Self {
        self.network = Some(network);
        self
    }
}

pub trait ResultSink {
    fn accept(&mut self, report: &RunReport) -> anyhow::Result<()>;
}

/// Query text made safe for use in a file name.
pub fn safe_query(query: &str) -> String {
    query.replace([' ', '/', '\\'], "_")
}
