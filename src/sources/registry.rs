use scraper::Html;
use url::Url;

use crate::domain::RawHeadline;
use crate::sources::traits::HeadlineParser;
use crate::sources::{
    bbc::BbcParser, hacker_news::HackerNewsParser, hindustan_times::HindustanTimesParser,
    npr::NprParser, times_of_india::TimesOfIndiaParser,
};

/// A configured news site.
pub struct Source {
    pub key: &'static str,
    pub name: &'static str,
    pub listing_url: &'static str,
    origin: Url,
    parser: Box<dyn HeadlineParser>,
}

impl Source {
    /// Panics if `listing_url` is not an absolute URL; sources are compiled in.
    pub fn new(
        key: &'static str,
        name: &'static str,
        listing_url: &'static str,
        parser: Box<dyn HeadlineParser>,
    ) -> Self {
        let origin = Url::parse(listing_url)
            .unwrap_or_else(|e| panic!("invalid listing URL for {}: {}", key, e));

        Self {
            key,
            name,
            listing_url,
            origin,
            parser,
        }
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Parse a fetched listing page into raw items.
    pub fn parse_listing(&self, body: &str) -> Vec<RawHeadline> {
        let document = Html::parse_document(body);
        self.parser.parse(&document, &self.origin).collect()
    }
}

impl std::fmt::Debug for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Source")
            .field("key", &self.key)
            .field("name", &self.name)
            .field("listing_url", &self.listing_url)
            .finish()
    }
}

pub struct SourceRegistry {
    sources: Vec<Source>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            sources: Vec::new(),
        };

        registry.register(Source::new(
            "bbc",
            "BBC News",
            "https://www.bbc.com/news",
            Box::new(BbcParser::new()),
        ));
        registry.register(Source::new(
            "hn",
            "Hacker News",
            "https://news.ycombinator.com/",
            Box::new(HackerNewsParser::new()),
        ));
        registry.register(Source::new(
            "npr",
            "NPR News",
            "https://www.npr.org/sections/news/",
            Box::new(NprParser::new()),
        ));
        registry.register(Source::new(
            "toi",
            "Times of India",
            "https://timesofindia.indiatimes.com/",
            Box::new(TimesOfIndiaParser::new()),
        ));
        registry.register(Source::new(
            "ht",
            "Hindustan Times",
            "https://www.hindustantimes.com/",
            Box::new(HindustanTimesParser::new()),
        ));

        registry
    }

    /// Add a source. A source with the same key replaces the earlier one.
    pub fn register(&mut self, source: Source) {
        self.sources.retain(|s| s.key != source.key);
        self.sources.push(source);
    }

    pub fn get(&self, key: &str) -> Option<&Source> {
        self.sources.iter().find(|s| s.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Source> {
        self.sources.iter()
    }

    pub fn keys(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.key.to_string()).collect()
    }

    /// Registered keys from `selection`, in selection order, without duplicates.
    pub fn known_keys(&self, selection: &[String]) -> Vec<String> {
        let mut known: Vec<String> = Vec::new();
        for key in selection {
            if self.contains(key) && !known.contains(key) {
                known.push(key.clone());
            }
        }
        known
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
