//! Decoder for Reddit search listings (`/search.json`).

use serde::Deserialize;

use super::{Platform, Post, SourceError};
use crate::version::extract_claude_version;

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
    kind: String,
    #[serde(default)]
    data: RawPost,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPost {
    id: Option<String>,
    title: Option<String>,
    selftext: Option<String>,
    score: Option<i64>,
    url: Option<String>,
    subreddit: Option<String>,
    author: Option<String>,
    created_utc: Option<f64>,
    num_comments: Option<u64>,
}

/// Decode a listing; only titled link posts (`t3`) are kept.
pub fn parse_listing(json: &str) -> Result<Vec<Post>, SourceError> {
    let listing: Listing = serde_json::from_str(json).map_err(|e| SourceError::Decode {
        platform: Platform::Reddit,
        source: e,
    })?;
    let posts = listing
        .data
        .children
        .into_iter()
        .filter(|c| c.kind == "t3")
        .filter_map(|c| {
            let raw = c.data;
            let title = raw.title.filter(|t| !t.is_empty())?;
            let body = raw.selftext.unwrap_or_default();
            Some(Post {
                claude_version: extract_claude_version(&title, &body),
                id: raw.id.unwrap_or_default(),
                title,
                body,
                score: raw.score.unwrap_or(0),
                url: raw.url.unwrap_or_default(),
                author: raw.author.unwrap_or_else(|| "[deleted]".to_string()),
                community: raw.subreddit.unwrap_or_else(|| "unknown".to_string()),
                source: Platform::Reddit,
                created_utc: raw.created_utc.unwrap_or(0.0),
                num_comments: raw.num_comments.unwrap_or(0),
            })
        })
        .collect();
    Ok(posts)
}
