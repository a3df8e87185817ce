//! Per-post analysis and the aggregate views built on top of it.

use std::collections::{BTreeMap, HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::mention::{Mention, MentionExtractor, best_model_label};
use crate::sentiment::{SentimentCounts, SentimentLabel, SentimentScorer, SentimentScores, analyze_sentiment};
use crate::source::{Platform, Post};

const NOT_AVAILABLE: &str = "N/A";

static WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-z]{3,}\b").expect("word pattern compiles"));

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "and", "for", "are", "but", "not", "you", "all", "any", "can", "had", "her",
        "was", "one", "our", "out", "has", "have", "him", "his", "how", "its", "may", "new",
        "now", "old", "see", "two", "way", "who", "did", "get", "got", "let", "put", "say",
        "she", "too", "use", "used", "using", "this", "that", "with", "from", "they", "them",
        "then", "than", "there", "their", "these", "those", "what", "when", "where", "which",
        "while", "will", "would", "could", "should", "been", "being", "were", "into", "about",
        "after", "before", "just", "like", "more", "most", "some", "such", "only", "other",
        "also", "very", "much", "many", "each", "over", "same", "your", "yours", "here",
        "does", "doing", "done", "because", "why", "well", "even", "still", "really", "make",
        "made", "want", "know", "think", "thing", "things", "going", "doesn", "don", "didn",
        "isn", "aren", "wasn", "won", "https", "http", "www", "com", "amp", "via",
        "anyone", "something", "anything", "everything",
        "between", "through", "again", "against", "under", "both", "own", "off", "once",
    ]
    .into_iter()
    .collect()
});

/// Sentiment and model attribution for one post.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostResult {
    pub post_id: String,
    pub title: String,
    pub body: String,
    pub community: String,
    pub source: Platform,
    pub score: i64,
    pub url: String,
    pub created_utc: f64,
    pub claude_version: Option<String>,
    pub model_label: Option<String>,
    pub model_mentions: Vec<Mention>,
    pub title_sentiment: SentimentScores,
    pub body_sentiment: Option<SentimentScores>,
    /// Title sentiment; the figure used for ranking and summaries.
    pub sentiment: SentimentScores,
    pub sentiment_label: SentimentLabel,
}

impl PostResult {
    /// Version column text: legacy Claude label, then model label, then "N/A".
    pub fn version_display(&self) -> &str {
        self.claude_version
            .as_deref()
            .or(self.model_label.as_deref())
            .unwrap_or(NOT_AVAILABLE)
    }
}

pub fn analyze_post(post: &Post, scorer: &dyn SentimentScorer, extractor: &MentionExtractor<'_>) -> PostResult {
    let title_sentiment = analyze_sentiment(&post.title, scorer);
    let body_sentiment = if post.body.trim().is_empty() {
        None
    } else {
        Some(analyze_sentiment(&post.body, scorer))
    };
    let model_mentions = extractor.extract(&post.title, &post.body);
    let model_label = best_model_label(&model_mentions);
    tracing::debug!(
        "post {}: compound {:.3}, {} mentions, label {:?}",
        post.id,
        title_sentiment.compound,
        model_mentions.len(),
        model_label
    );
    PostResult {
        post_id: post.id.clone(),
        title: post.title.clone(),
        body: post.body.clone(),
        community: post.community.clone(),
        source: post.source,
        score: post.score,
        url: post.url.clone(),
        created_utc: post.created_utc,
        claude_version: post.claude_version.clone(),
        model_label,
        model_mentions,
        sentiment: title_sentiment,
        sentiment_label: title_sentiment.label(),
        title_sentiment,
        body_sentiment,
    }
}

/// Newest first when `by_date`, otherwise most positive first. Stable.
pub fn sort_results(results: &mut [PostResult], by_date: bool) {
    if by_date {
        results.sort_by(|a, b| b.created_utc.total_cmp(&a.created_utc));
    } else {
        results.sort_by(|a, b| b.sentiment.compound.total_cmp(&a.sentiment.compound));
    }
}

/// The first `n` and last `n` results, without repeating any.
pub fn top_and_bottom(results: &[PostResult], n: usize) -> Vec<&PostResult> {
    if results.len() <= n.saturating_mul(2) {
        return results.iter().collect();
    }
    results[..n].iter().chain(results[results.len() - n..].iter()).collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModelStats {
    pub posts: usize,
    pub average_compound: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub average_compound: f64,
    pub counts: SentimentCounts,
    pub by_source: BTreeMap<String, usize>,
    pub by_model: BTreeMap<String, ModelStats>,
}

pub fn summarize(results: &[PostResult]) -> Summary {
    let mut summary = Summary {
        total: results.len(),
        ..Summary::default()
    };
    if results.is_empty() {
        return summary;
    }
    let mut model_sums: BTreeMap<String, (usize, f64)> = BTreeMap::new();
    let mut sum = 0.0;
    for r in results {
        sum += r.sentiment.compound;
        summary.counts.add(r.sentiment_label);
        *summary.by_source.entry(r.source.name().to_string()).or_default() += 1;
        let label = r.model_label.as_deref().unwrap_or(NOT_AVAILABLE);
        let entry = model_sums.entry(label.to_string()).or_default();
        entry.0 += 1;
        entry.1 += r.sentiment.compound;
    }
    summary.average_compound = sum / results.len() as f64;
    summary.by_model = model_sums
        .into_iter()
        .map(|(label, (posts, total))| {
            let stats = ModelStats {
                posts,
                average_compound: total / posts as f64,
            };
            (label, stats)
        })
        .collect();
    summary
}

fn words_of(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_RE
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|w| !STOP_WORDS.contains(*w))
        .map(str::to_string)
        .collect()
}

fn post_words(r: &PostResult) -> Vec<String> {
    let mut words = words_of(&r.title);
    words.extend(words_of(&r.body));
    words
}

fn query_words(query: &str) -> HashSet<String> {
    words_of(query).into_iter().collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
    pub is_query_word: bool,
}

/// Most frequent words over titles and bodies, ties broken by first appearance.
pub fn word_frequencies(results: &[PostResult], query: &str, top_n: usize) -> Vec<WordCount> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    let mut seen = 0usize;
    for word in results.iter().flat_map(post_words) {
        let entry = counts.entry(word).or_insert_with(|| {
            seen += 1;
            (0, seen)
        });
        entry.0 += 1;
    }
    let query = query_words(query);
    let mut ranked: Vec<(String, usize, usize)> =
        counts.into_iter().map(|(w, (count, first))| (w, count, first)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked
        .into_iter()
        .take(top_n)
        .map(|(word, count, _)| WordCount {
            is_query_word: query.contains(&word),
            word,
            count,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkNode {
    pub word: String,
    pub frequency: usize,
    pub is_query_word: bool,
    pub degree_centrality: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkEdge {
    pub a: String,
    pub b: String,
    pub weight: usize,
}

/// Undirected word co-occurrence graph; nodes and edges sorted by word.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CooccurrenceNetwork {
    pub nodes: Vec<NetworkNode>,
    pub edges: Vec<NetworkEdge>,
}

impl CooccurrenceNetwork {
    pub fn node(&self, word: &str) -> Option<&NetworkNode> {
        self.nodes.iter().find(|n| n.word == word)
    }
}

pub fn cooccurrence_network(
    results: &[PostResult],
    query: &str,
    min_word_freq: usize,
    min_cooccurrence: usize,
) -> CooccurrenceNetwork {
    let documents: Vec<Vec<String>> = results
        .iter()
        .map(post_words)
        .filter(|d| !d.is_empty())
        .collect();

    let mut freq: HashMap<&str, usize> = HashMap::new();
    for word in documents.iter().flatten() {
        *freq.entry(word.as_str()).or_default() += 1;
    }
    let frequent: HashSet<&str> = freq
        .iter()
        .filter(|(_, c)| **c >= min_word_freq)
        .map(|(w, _)| *w)
        .collect();

    let mut pairs: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    for doc in &documents {
        let mut unique: Vec<&str> = doc
            .iter()
            .map(String::as_str)
            .filter(|w| frequent.contains(w))
            .collect();
        unique.sort_unstable();
        unique.dedup();
        for (i, a) in unique.iter().enumerate() {
            for b in &unique[i + 1..] {
                *pairs.entry((*a, *b)).or_default() += 1;
            }
        }
    }

    let edges: Vec<NetworkEdge> = pairs
        .into_iter()
        .filter(|(_, count)| *count >= min_cooccurrence)
        .map(|((a, b), weight)| NetworkEdge {
            a: a.to_string(),
            b: b.to_string(),
            weight,
        })
        .collect();

    let mut degree: HashMap<&str, usize> = HashMap::new();
    for e in &edges {
        *degree.entry(e.a.as_str()).or_default() += 1;
        *degree.entry(e.b.as_str()).or_default() += 1;
    }

    let query = query_words(query);
    let mut words: Vec<&str> = frequent.into_iter().collect();
    words.sort_unstable();
    let n = words.len();
    let nodes = words
        .into_iter()
        .map(|w| {
            let d = degree.get(w).copied().unwrap_or(0);
            NetworkNode {
                word: w.to_string(),
                frequency: freq[w],
                is_query_word: query.contains(w),
                degree_centrality: if n > 1 { d as f64 / (n - 1) as f64 } else { 1.0 },
            }
        })
        .collect();

    CooccurrenceNetwork { nodes, edges }
}
