//! Run summary through `tracing`.

use std::collections::HashMap;

use super::{ResultSink, RunReport};
use crate::analysis::{PostResult, top_and_bottom};
use crate::source::Post;

const DEFAULT_SHOWN: usize = 5;

#[derive(Debug, Clone, Default)]
pub struct LogSink {
    /// Log every post instead of the top and bottom few.
    pub show_all: bool,
    pub show_network: bool,
}

impl LogSink {
    /// Posts this sink reports: all of them, or the top and bottom few.
    pub fn selection<'a>(&self, report: &'a RunReport) -> Vec<&'a PostResult> {
        if self.show_all {
            report.results.iter().collect()
        } else {
            top_and_bottom(&report.results, DEFAULT_SHOWN)
        }
    }

    fn log_post(r: &PostResult, post: Option<&Post>) {
        tracing::info!(
            "{:>+.3} {:<8} {:<18} [{}] {}",
            r.sentiment.compound,
            r.sentiment_label,
            r.version_display(),
            r.source,
            r.title
        );
        if let Some(post) = post {
            tracing::info!("    discussion: {}", post.discussion_url());
            if post.source.should_analyze_url(&post.url) {
                tracing::info!("    link: {}", post.url);
            }
        }
    }
}

impl ResultSink for LogSink {
    fn accept(&mut self, report: &RunReport) -> anyhow::Result<()> {
        let s = &report.summary;
        if s.total == 0 {
            tracing::warn!("no results to summarize for '{}'", report.query);
            return Ok(());
        }
        tracing::info!(
            "'{}': {} posts, average sentiment {:.3} (positive {}, neutral {}, negative {})",
            report.query,
            s.total,
            s.average_compound,
            s.counts.positive,
            s.counts.neutral,
            s.counts.negative
        );
        for (source, count) in &s.by_source {
            tracing::info!("  {}: {} posts", source, count);
        }
        for (label, stats) in &s.by_model {
            tracing::info!("  {}: {} posts, average {:.3}", label, stats.posts, stats.average_compound);
        }

        let by_id: HashMap<&str, &Post> = report.posts.iter().map(|p| (p.id.as_str(), p)).collect();
        for r in self.selection(report) {
            Self::log_post(r, by_id.get(r.post_id.as_str()).copied());
        }

        for w in &report.words {
            let marker = if w.is_query_word { "*" } else { "" };
            tracing::info!("  {}{} {}", w.word, marker, w.count);
        }

        if self.show_network
            && let Some(net) = report.network.as_ref()
        {
            tracing::info!("network: {} words, {} links", net.nodes.len(), net.edges.len());
            let mut central: Vec<_> = net.nodes.iter().collect();
            central.sort_by(|a, b| b.degree_centrality.total_cmp(&a.degree_centrality));
            for n in central.into_iter().take(DEFAULT_SHOWN) {
                tracing::info!("  {} (centrality {:.2}, freq {})", n.word, n.degree_centrality, n.frequency);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{cooccurrence_network, summarize};
    use crate::sink::tests::sample_report;

    fn many_results(n: usize) -> RunReport {
        let mut report = sample_report();
        let template = report.results[0].clone();
        report.results = (0..n)
            .map(|i| PostResult {
                post_id: format!("p{}", i),
                ..template.clone()
            })
            .collect();
        report.summary = summarize(&report.results);
        report
    }

    #[test]
    fn default_selection_is_top_and_bottom_five() {
        let report = many_results(12);
        let ids: Vec<_> = LogSink::default()
            .selection(&report)
            .into_iter()
            .map(|r| r.post_id.as_str())
            .collect();
        assert_eq!(ids, vec!["p0", "p1", "p2", "p3", "p4", "p7", "p8", "p9", "p10", "p11"]);

        let all = LogSink {
            show_all: true,
            show_network: false,
        };
        assert_eq!(all.selection(&report).len(), 12);
        assert_eq!(LogSink::default().selection(&many_results(7)).len(), 7);
    }

    #[test]
    fn logs_network_when_present() {
        let report = sample_report();
        let network = cooccurrence_network(&report.results, &report.query, 1, 1);
        assert!(!network.nodes.is_empty());
        let report = report.with_network(network);
        let mut sink = LogSink {
            show_all: true,
            show_network: true,
        };
        sink.accept(&report).expect("accept");
        assert_eq!(sink.selection(&report).len(), report.results.len());
    }

    #[test]
    fn empty_report_is_fine() {
        let mut report = sample_report();
        report.results.clear();
        report.summary = summarize(&report.results);
        LogSink::default().accept(&report).expect("accept");
    }
}
