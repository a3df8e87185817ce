//! Source backed by a saved platform API response on disk.

use std::path::PathBuf;

use async_trait::async_trait;

use super::{Platform, Post, PostSource, SourceError, hackernews, reddit};

/// Decode a raw API response for `platform`.
pub fn decode_response(platform: Platform, json: &str) -> Result<Vec<Post>, SourceError> {
    match platform {
        Platform::Reddit => reddit::parse_listing(json),
        Platform::HackerNews => hackernews::parse_search(json),
    }
}

/// Comma-separated query terms, OR'ed, matched case-insensitively against
/// title and body. An empty query matches everything.
#[derive(Debug, Clone, Default)]
pub struct QueryFilter {
    terms: Vec<String>,
}

impl QueryFilter {
    pub fn parse(query: &str) -> Self {
        let terms = query
            .split(',')
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { terms }
    }

    pub fn matches(&self, post: &Post) -> bool {
        if self.terms.is_empty() {
            return true;
        }
        let title = post.title.to_lowercase();
        let body = post.body.to_lowercase();
        self.terms
            .iter()
            .any(|t| title.contains(t.as_str()) || body.contains(t.as_str()))
    }
}

#[derive(Debug, Clone)]
pub struct SavedResponseSource {
    platform: Platform,
    path: PathBuf,
}

impl SavedResponseSource {
    pub fn new(platform: Platform, path: impl Into<PathBuf>) -> Self {
        Self {
            platform,
            path: path.into(),
        }
    }
}

#[async_trait]
impl PostSource for SavedResponseSource {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn collect_posts(&self, query: &str, limit: usize) -> anyhow::Result<Vec<Post>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| SourceError::Io {
                path: self.path.clone(),
                source: e,
            })?;
        let decoded = decode_response(self.platform, &raw)?;
        let total = decoded.len();
        let filter = QueryFilter::parse(query);
        let posts: Vec<Post> = decoded
            .into_iter()
            .filter(|p| filter.matches(p))
            .take(limit)
            .collect();
        tracing::debug!(
            "{}: {} of {} saved posts match '{}'",
            self.path.display(),
            posts.len(),
            total,
            query
        );
        Ok(posts)
    }
}
