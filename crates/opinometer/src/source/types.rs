use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::SourceError;

/// Platforms posts can come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Reddit,
    HackerNews,
}

impl Platform {
    pub fn name(self) -> &'static str {
        match self {
            Platform::Reddit => "Reddit",
            Platform::HackerNews => "HackerNews",
        }
    }

    /// Discussion page for a post on this platform.
    pub fn discussion_url(self, post: &Post) -> String {
        match self {
            Platform::Reddit => {
                if post.url.contains("reddit.com/") {
                    post.url.clone()
                } else {
                    format!("https://www.reddit.com/comments/{}", post.id)
                }
            }
            Platform::HackerNews => match post.id.strip_prefix("hn_") {
                Some(hn_id) => format!("https://news.ycombinator.com/item?id={}", hn_id),
                None => post.url.clone(),
            },
        }
    }

    /// Whether a post's link points at external content worth reading.
    pub fn should_analyze_url(self, url: &str) -> bool {
        if url.is_empty() {
            return false;
        }
        match self {
            Platform::Reddit => !["reddit.com/", "redd.it/"].iter().any(|d| url.contains(d)),
            Platform::HackerNews => !url.starts_with("https://news.ycombinator.com/"),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Platform {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reddit" => Ok(Platform::Reddit),
            "hackernews" | "hn" => Ok(Platform::HackerNews),
            other => Err(SourceError::UnknownPlatform(other.to_string())),
        }
    }
}

/// A collected discussion post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub body: String,
    pub score: i64,
    pub url: String,
    pub author: String,
    /// Subreddit, or the platform name where there is no sub-community.
    pub community: String,
    pub source: Platform,
    /// Unix seconds.
    pub created_utc: f64,
    pub num_comments: u64,
    pub claude_version: Option<String>,
}

impl Post {
    pub fn discussion_url(&self) -> String {
        self.source.discussion_url(self)
    }
}
