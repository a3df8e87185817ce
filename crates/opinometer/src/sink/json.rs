//! Pretty JSON exports of a run.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;

use super::{ResultSink, RunReport, safe_query};
use crate::analysis::{CooccurrenceNetwork, PostResult, Summary, WordCount};

#[derive(Serialize)]
struct SentimentExport<'a> {
    run_id: String,
    query: &'a str,
    generated_at: u64,
    summary: &'a Summary,
    results: &'a [PostResult],
    words: &'a [WordCount],
    network: Option<&'a CooccurrenceNetwork>,
}

/// Writes `posts_{query}_{ts}.json` and `sentiment_{query}_{ts}.json` into `dir`.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl JsonFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    /// Files written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn write_json<T: Serialize>(&mut self, path: &Path, value: &T) -> anyhow::Result<()> {
        let s = serde_json::to_string_pretty(value)?;
        std::fs::write(path, s).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!("saved {}", path.display());
        self.written.push(path.to_path_buf());
        Ok(())
    }
}

impl ResultSink for JsonFileSink {
    fn accept(&mut self, report: &RunReport) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating results dir {}", self.dir.display()))?;
        let stem = format!("{}_{}", safe_query(&report.query), report.generated_at);

        let posts_path = self.dir.join(format!("posts_{}.json", stem));
        self.write_json(&posts_path, &report.posts)?;

        let export = SentimentExport {
            run_id: report.run_id.to_string(),
            query: &report.query,
            generated_at: report.generated_at,
            summary: &report.summary,
            results: &report.results,
            words: &report.words,
            network: report.network.as_ref(),
        };
        let sentiment_path = self.dir.join(format!("sentiment_{}.json", stem));
        self.write_json(&sentiment_path, &export)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::tests::sample_report;

    #[test]
    fn writes_both_exports() {
        let tmp = tempfile::tempdir().expect("tmp dir");
        let dir = tmp.path().join("results");
        let report = sample_report();
        let mut sink = JsonFileSink::new(&dir);
        sink.accept(&report).expect("accept");

        let written = sink.written();
        assert_eq!(written.len(), 2);
        let posts_name = written[0].file_name().and_then(|n| n.to_str()).unwrap_or_default();
        assert_eq!(posts_name, format!("posts_claude_code_{}.json", report.generated_at));

        let posts: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&written[0]).expect("read")).expect("json");
        assert_eq!(posts.as_array().map(Vec::len), Some(2));

        let sentiment: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&written[1]).expect("read")).expect("json");
        assert_eq!(sentiment["query"], "claude code");
        assert_eq!(sentiment["summary"]["total"], 2);
        assert_eq!(sentiment["results"][0]["model_label"], "Claude 3.5 Sonnet");
        assert_eq!(sentiment["results"][0]["model_mentions"][0]["confidence"], "high");
        assert!(sentiment["network"].is_null());
    }

    #[test]
    fn unwritable_dir_is_an_error() {
        let tmp = tempfile::NamedTempFile::new().expect("tmp file");
        let mut sink = JsonFileSink::new(tmp.path().join("nested"));
        let err = sink.accept(&sample_report()).unwrap_err();
        assert!(format!("{:#}", err).contains("creating results dir"));
    }
}
