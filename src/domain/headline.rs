use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A headline as located in a listing page, before it is tagged with its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHeadline {
    pub title: String,
    pub url: String,
    pub published_at: String,
}

impl RawHeadline {
    pub fn new(title: String, url: String) -> Self {
        Self {
            title,
            url,
            published_at: String::new(),
        }
    }

    pub fn with_published(mut self, published_at: String) -> Self {
        self.published_at = published_at;
        self
    }

    pub fn into_headline(self, source: &str, source_key: &str) -> Headline {
        Headline {
            title: self.title,
            url: self.url,
            published_at: self.published_at,
            source: source.to_string(),
            source_key: source_key.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headline {
    pub title: String,
    pub url: String,
    /// Free text or ISO-8601; empty when the page had no timestamp.
    pub published_at: String,
    /// Display name of the source.
    pub source: String,
    pub source_key: String,
}

impl Headline {
    pub fn new(title: &str, url: &str, source: &str, source_key: &str) -> Self {
        Self {
            title: title.to_string(),
            url: url.to_string(),
            published_at: String::new(),
            source: source.to_string(),
            source_key: source_key.to_string(),
        }
    }

    pub fn with_published(mut self, published_at: &str) -> Self {
        self.published_at = published_at.to_string();
        self
    }

    /// Identity used for deduplication, live and in storage.
    pub fn dedup_key(&self) -> (&str, &str) {
        (&self.url, &self.source_key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredHeadline {
    pub id: i64,
    pub headline: Headline,
    pub scraped_at: DateTime<Utc>,
}

impl StoredHeadline {
    pub fn into_headline(self) -> Headline {
        self.headline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_headline_is_tagged_with_source() {
        let headline = RawHeadline::new(
            "Rust 2024 ships".to_string(),
            "https://news.ycombinator.com/item?id=1".to_string(),
        )
        .with_published("2 hours ago".to_string())
        .into_headline("Hacker News", "hn");

        assert_eq!(headline.source, "Hacker News");
        assert_eq!(headline.source_key, "hn");
        assert_eq!(headline.published_at, "2 hours ago");
    }

    #[test]
    fn test_dedup_key_is_url_and_source_key() {
        let headline = Headline::new("Title", "https://www.bbc.com/news/1", "BBC News", "bbc");
        assert_eq!(headline.dedup_key(), ("https://www.bbc.com/news/1", "bbc"));
    }
}
