//! Post sources: platform payload decoders, the `PostSource` seam and
//! concurrent collection across sources.
//!
//! Live HTTP fetching is not done here; sources read saved API responses so
//! collection is reproducible.

pub mod hackernews;
pub mod reddit;
pub mod saved;
pub mod types;

pub use saved::*;
pub use types::*;

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinSet;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid {platform} response: {source}")]
    Decode {
        platform: Platform,
        source: serde_json::Error,
    },
    #[error("unknown platform '{0}' (expected reddit or hackernews)")]
    UnknownPlatform(String),
}

#[async_trait]
pub trait PostSource: Send + Sync {
    fn platform(&self) -> Platform;

    /// Collect up to `limit` posts matching `query`.
    async fn collect_posts(&self, query: &str, limit: usize) -> anyhow::Result<Vec<Post>>;
}

/// Collect from all sources concurrently, splitting `limit` evenly.
///
/// A failing source is logged and contributes nothing. Output keeps source
/// registration order and drops repeated post ids. When the first round comes
/// up short of `limit`, sources that filled their share are asked again, in
/// registration order, for the remainder.
pub async fn collect_all(sources: Vec<Arc<dyn PostSource>>, query: &str, limit: usize) -> Vec<Post> {
    if sources.is_empty() {
        return Vec::new();
    }
    let per_source = (limit / sources.len()).max(1);
    let mut set = JoinSet::new();
    for (order, source) in sources.iter().cloned().enumerate() {
        let query = query.to_string();
        set.spawn(async move {
            let platform = source.platform();
            tracing::info!("searching {} for '{}'", platform, query);
            let res = source.collect_posts(&query, per_source).await;
            (order, platform, res)
        });
    }

    let mut batches: Vec<Option<Vec<Post>>> = vec![None; sources.len()];
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((order, platform, Ok(posts))) => {
                tracing::info!("found {} {} posts", posts.len(), platform);
                batches[order] = Some(posts);
            }
            Ok((_, platform, Err(e))) => {
                tracing::warn!("error collecting {} posts: {:#}", platform, e);
            }
            Err(e) => {
                tracing::warn!("source task failed: {}", e);
            }
        }
    }

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    let mut filled = Vec::new();
    for (order, batch) in batches.into_iter().enumerate() {
        let Some(posts) = batch else { continue };
        if posts.len() >= per_source {
            filled.push((order, posts.len()));
        }
        push_unseen(&mut out, &mut seen, posts, usize::MAX);
    }

    for (order, got) in filled {
        if out.len() >= limit {
            break;
        }
        let source = &sources[order];
        let wanted = got + (limit - out.len());
        tracing::info!(
            "topping up from {}: {} of {} posts so far",
            source.platform(),
            out.len(),
            limit
        );
        match source.collect_posts(query, wanted).await {
            Ok(posts) => push_unseen(&mut out, &mut seen, posts, limit),
            Err(e) => tracing::warn!("error topping up {} posts: {:#}", source.platform(), e),
        }
    }
    out
}

fn push_unseen(out: &mut Vec<Post>, seen: &mut HashSet<String>, posts: Vec<Post>, cap: usize) {
    for post in posts {
        if out.len() >= cap {
            break;
        }
        if seen.insert(post.id.clone()) {
            out.push(post);
        } else {
            tracing::trace!("dropping duplicate post {}", post.id);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn post(id: &str, source: Platform, title: &str) -> Post {
        Post {
            id: id.to_string(),
            title: title.to_string(),
            body: String::new(),
            score: 1,
            url: String::new(),
            author: "a".into(),
            community: source.name().into(),
            source,
            created_utc: 0.0,
            num_comments: 0,
            claude_version: None,
        }
    }

    struct StaticSource {
        platform: Platform,
        posts: Vec<Post>,
    }

    #[async_trait]
    impl PostSource for StaticSource {
        fn platform(&self) -> Platform {
            self.platform
        }

        async fn collect_posts(&self, _query: &str, limit: usize) -> anyhow::Result<Vec<Post>> {
            Ok(self.posts.iter().take(limit).cloned().collect())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl PostSource for FailingSource {
        fn platform(&self) -> Platform {
            Platform::HackerNews
        }

        async fn collect_posts(&self, _query: &str, _limit: usize) -> anyhow::Result<Vec<Post>> {
            Err(anyhow::anyhow!("rate limited"))
        }
    }

    #[tokio::test]
    async fn merges_in_order_and_dedups() {
        let reddit = StaticSource {
            platform: Platform::Reddit,
            posts: vec![
                post("r1", Platform::Reddit, "a"),
                post("dup", Platform::Reddit, "b"),
                post("r3", Platform::Reddit, "c"),
            ],
        };
        let hn = StaticSource {
            platform: Platform::HackerNews,
            posts: vec![post("dup", Platform::HackerNews, "d"), post("h2", Platform::HackerNews, "e")],
        };
        let sources: Vec<Arc<dyn PostSource>> = vec![Arc::new(reddit), Arc::new(hn)];
        let posts = collect_all(sources, "claude", 4).await;
        let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
        // the duplicate leaves one slot, topped up from reddit
        assert_eq!(ids, vec!["r1", "dup", "h2", "r3"]);
        assert_eq!(posts[1].source, Platform::Reddit);
    }

    #[tokio::test]
    async fn shortfall_is_topped_up_from_sources_with_more() {
        let reddit = StaticSource {
            platform: Platform::Reddit,
            posts: (1..=6)
                .map(|i| post(&format!("r{}", i), Platform::Reddit, "t"))
                .collect(),
        };
        let hn = StaticSource {
            platform: Platform::HackerNews,
            posts: vec![post("h1", Platform::HackerNews, "t")],
        };
        let sources: Vec<Arc<dyn PostSource>> = vec![Arc::new(reddit), Arc::new(hn)];
        let posts = collect_all(sources, "", 6).await;
        let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["r1", "r2", "r3", "h1", "r4", "r5"]);
    }

    #[tokio::test]
    async fn exhausted_sources_are_not_asked_again() {
        let reddit = StaticSource {
            platform: Platform::Reddit,
            posts: vec![post("r1", Platform::Reddit, "t")],
        };
        let sources: Vec<Arc<dyn PostSource>> = vec![Arc::new(reddit), Arc::new(FailingSource)];
        let posts = collect_all(sources, "", 10).await;
        assert_eq!(posts.len(), 1);
    }

    #[tokio::test]
    async fn failing_source_contributes_nothing() {
        let ok = StaticSource {
            platform: Platform::Reddit,
            posts: vec![post("r1", Platform::Reddit, "a")],
        };
        let sources: Vec<Arc<dyn PostSource>> = vec![Arc::new(FailingSource), Arc::new(ok)];
        let posts = collect_all(sources, "", 1).await;
        assert_eq!(posts.len(), 1);
        assert!(collect_all(Vec::new(), "", 10).await.is_empty());
    }

    #[test]
    fn source_errors_describe_their_cause() {
        let io = SourceError::Io {
            path: PathBuf::from("/saved/r.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(io.to_string(), "failed to read /saved/r.json: gone");
        assert!(std::error::Error::source(&io).is_some());

        let decode = crate::source::reddit::parse_listing("not json").unwrap_err();
        assert!(decode.to_string().starts_with("invalid Reddit response"));
        assert!(std::error::Error::source(&decode).is_some());
    }

    #[test]
    fn platform_parsing_and_urls() {
        assert_eq!("Reddit".parse::<Platform>().unwrap(), Platform::Reddit);
        assert_eq!(" hn ".parse::<Platform>().unwrap(), Platform::HackerNews);
        let err = "mastodon".parse::<Platform>().unwrap_err();
        assert!(err.to_string().contains("mastodon"));

        let mut p = post("xyz", Platform::Reddit, "t");
        assert_eq!(p.discussion_url(), "https://www.reddit.com/comments/xyz");
        p.url = "https://www.reddit.com/r/ClaudeAI/comments/xyz/t/".into();
        assert_eq!(p.discussion_url(), p.url);
        assert!(!Platform::Reddit.should_analyze_url(&p.url));
        assert!(!Platform::Reddit.should_analyze_url("https://i.redd.it/img.png"));
        assert!(Platform::Reddit.should_analyze_url("https://example.com"));
        assert!(!Platform::Reddit.should_analyze_url(""));
    }
}
