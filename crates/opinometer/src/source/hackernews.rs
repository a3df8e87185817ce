//! Decoder for Hacker News Algolia search responses.

use serde::Deserialize;

use super::{Platform, Post, SourceError};
use crate::version::extract_claude_version;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Hit {
    #[serde(rename = "objectID")]
    object_id: Option<String>,
    title: Option<String>,
    story_text: Option<String>,
    points: Option<i64>,
    url: Option<String>,
    author: Option<String>,
    created_at_i: Option<i64>,
    num_comments: Option<u64>,
}

/// Decode a search response; untitled hits are skipped.
pub fn parse_search(json: &str) -> Result<Vec<Post>, SourceError> {
    let resp: SearchResponse = serde_json::from_str(json).map_err(|e| SourceError::Decode {
        platform: Platform::HackerNews,
        source: e,
    })?;
    let posts = resp
        .hits
        .into_iter()
        .filter_map(|hit| {
            let title = hit.title.filter(|t| !t.is_empty())?;
            let body = hit.story_text.unwrap_or_default();
            let object_id = hit.object_id.unwrap_or_default();
            let url = hit
                .url
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| format!("https://news.ycombinator.com/item?id={}", object_id));
            Some(Post {
                claude_version: extract_claude_version(&title, &body),
                id: format!("hn_{}", object_id),
                title,
                body,
                score: hit.points.unwrap_or(0),
                url,
                author: hit.author.unwrap_or_else(|| "[deleted]".to_string()),
                community: Platform::HackerNews.name().to_string(),
                source: Platform::HackerNews,
                created_utc: hit.created_at_i.unwrap_or(0) as f64,
                num_comments: hit.num_comments.unwrap_or(0),
            })
        })
        .collect();
    Ok(posts)
}
