use chrono::{DateTime, Utc};

use crate::domain::{Headline, StoredHeadline};
use crate::errors::HeadlinesResult;

/// Filter for reading cached headlines back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlineQuery {
    /// Restrict to these source keys; `None` means every source.
    pub source_keys: Option<Vec<String>>,
    /// Case-insensitive substring over title or published_at.
    pub keyword: Option<String>,
    pub limit: usize,
}

impl HeadlineQuery {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            ..Default::default()
        }
    }

    pub fn with_sources(mut self, source_keys: Vec<String>) -> Self {
        self.source_keys = Some(source_keys);
        self
    }

    pub fn with_keyword(mut self, keyword: Option<&str>) -> Self {
        self.keyword = keyword
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string);
        self
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait HeadlineRepository {
    /// Insert or update every item, stamping them with one shared scraped_at.
    fn upsert_batch(&self, items: &[Headline]) -> HeadlinesResult<usize> {
        self.upsert_batch_at(items, Utc::now())
    }

    fn upsert_batch_at(&self, items: &[Headline], scraped_at: DateTime<Utc>)
        -> HeadlinesResult<usize>;

    /// Most recently scraped first.
    fn query(&self, query: &HeadlineQuery) -> HeadlinesResult<Vec<StoredHeadline>>;

    fn count(&self) -> HeadlinesResult<usize>;
}
