use tracing::{error, info};

use crate::config::ScrapeSettings;
use crate::domain::{Headline, Provenance};
use crate::sources::SourceRegistry;
use crate::storage::traits::{HeadlineQuery, HeadlineRepository};

/// Serves cached headlines when a live run produced nothing.
pub struct FallbackService {
    cache_page_size: usize,
    broad_page_size: usize,
}

impl FallbackService {
    pub fn new(settings: &ScrapeSettings) -> Self {
        Self {
            cache_page_size: settings.cache_page_size,
            broad_page_size: settings.broad_page_size.max(settings.cache_page_size),
        }
    }

    /// Try, in order: the selection with the keyword; the selection without the
    /// keyword (only when one was given) or every source (when none was given);
    /// then give up with [`Provenance::Empty`].
    pub fn resolve<R: HeadlineRepository>(
        &self,
        repository: &R,
        registry: &SourceRegistry,
        selected: &[String],
        keyword: Option<&str>,
    ) -> (Vec<Headline>, Provenance) {
        let keyword = keyword.map(str::trim).filter(|k| !k.is_empty());

        let mut source_keys = registry.known_keys(selected);
        if source_keys.is_empty() {
            source_keys = registry.keys();
        }

        let filtered = HeadlineQuery::new(self.cache_page_size)
            .with_sources(source_keys.clone())
            .with_keyword(keyword);
        let items = Self::lookup(repository, &filtered);
        if !items.is_empty() {
            info!(count = items.len(), "Serving cached headlines");
            return (items, Provenance::CacheFiltered);
        }

        let (relaxed, ignored_keyword) = match keyword {
            Some(k) => (
                HeadlineQuery::new(self.broad_page_size).with_sources(source_keys),
                Some(k.to_string()),
            ),
            None => (
                HeadlineQuery::new(self.broad_page_size).with_sources(registry.keys()),
                None,
            ),
        };
        let items = Self::lookup(repository, &relaxed);
        if !items.is_empty() {
            info!(count = items.len(), ?ignored_keyword, "Serving unfiltered cached headlines");
            return (items, Provenance::CacheUnfiltered { ignored_keyword });
        }

        info!("No cached headlines available");
        (Vec::new(), Provenance::Empty)
    }

    /// A failed lookup counts as an empty tier.
    fn lookup<R: HeadlineRepository>(repository: &R, query: &HeadlineQuery) -> Vec<Headline> {
        match repository.query(query) {
            Ok(rows) => rows.into_iter().map(|row| row.into_headline()).collect(),
            Err(e) => {
                error!(error = %e, "Cache lookup failed");
                Vec::new()
            }
        }
    }
}
