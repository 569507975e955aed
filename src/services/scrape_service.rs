use std::collections::HashSet;

use tracing::{debug, error, info, warn};

use crate::config::ScrapeSettings;
use crate::domain::{Headline, Notice, Provenance, ScrapeRequest, ScrapeResult};
use crate::fetch::traits::{PageFetcher, RobotsPolicy};
use crate::services::clock::{Clock, SystemClock};
use crate::services::export_service::ExportService;
use crate::services::fallback_service::FallbackService;
use crate::services::keyword_filter;
use crate::sources::{Source, SourceRegistry};
use crate::storage::traits::HeadlineRepository;

/// Outcome of the live part of a run, before persistence and fallback.
#[derive(Debug, Default)]
pub struct LiveScrape {
    pub items: Vec<Headline>,
    pub notices: Vec<Notice>,
}

/// Drives registry -> robots -> fetch -> parse -> filter over the requested
/// sources, one at a time, then persists or falls back to the cache.
pub struct ScrapeService<F: PageFetcher, G: RobotsPolicy, R: HeadlineRepository, C: Clock = SystemClock> {
    fetcher: F,
    robots: G,
    repository: R,
    registry: SourceRegistry,
    clock: C,
    settings: ScrapeSettings,
    fallback: FallbackService,
    exporter: Option<ExportService>,
}

impl<F: PageFetcher, G: RobotsPolicy, R: HeadlineRepository> ScrapeService<F, G, R, SystemClock> {
    pub fn new(
        fetcher: F,
        robots: G,
        repository: R,
        registry: SourceRegistry,
        settings: ScrapeSettings,
    ) -> Self {
        Self {
            fetcher,
            robots,
            repository,
            registry,
            clock: SystemClock::new(),
            fallback: FallbackService::new(&settings),
            settings,
            exporter: None,
        }
    }
}

impl<F: PageFetcher, G: RobotsPolicy, R: HeadlineRepository, C: Clock> ScrapeService<F, G, R, C> {
    pub fn with_clock<C2: Clock>(self, clock: C2) -> ScrapeService<F, G, R, C2> {
        ScrapeService {
            fetcher: self.fetcher,
            robots: self.robots,
            repository: self.repository,
            registry: self.registry,
            clock,
            settings: self.settings,
            fallback: self.fallback,
            exporter: self.exporter,
        }
    }

    pub fn with_exporter(mut self, exporter: ExportService) -> Self {
        self.exporter = Some(exporter);
        self
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Full request: live scrape, persist or fall back, then export.
    pub fn scrape(&self, request: &ScrapeRequest) -> ScrapeResult {
        let keyword = request.keyword.as_deref();
        let LiveScrape { items, mut notices } = self.scrape_live(&request.source_keys, keyword);

        let (items, provenance) = if items.is_empty() {
            self.fallback
                .resolve(&self.repository, &self.registry, &request.source_keys, keyword)
        } else {
            if let Err(e) = self.repository.upsert_batch(&items) {
                error!(error = %e, count = items.len(), "Failed to persist scraped headlines");
                notices.push(Notice::PersistFailed(e.to_string()));
            }
            (items, Provenance::Live)
        };

        let export_path = self
            .exporter
            .as_ref()
            .and_then(|exporter| exporter.export(&items, &request.export_format));

        ScrapeResult {
            items,
            provenance,
            notices,
            export_path,
        }
    }

    /// Walk the worklist under the time budget. Unknown keys, robots denials and
    /// failed fetches are skipped; nothing here touches storage.
    pub fn scrape_live(&self, source_keys: &[String], keyword: Option<&str>) -> LiveScrape {
        let started = self.clock.elapsed();
        let mut run = LiveScrape::default();
        let mut seen: HashSet<(String, String)> = HashSet::new();

        for (index, key) in source_keys.iter().enumerate() {
            let elapsed = self.clock.elapsed().saturating_sub(started);
            if elapsed > self.settings.budget {
                let skipped = source_keys[index..].to_vec();
                warn!(?elapsed, skipped = skipped.len(), "Scrape budget exceeded");
                run.notices.push(Notice::BudgetExceeded {
                    budget: self.settings.budget,
                    skipped,
                });
                break;
            }

            let Some(source) = self.registry.get(key) else {
                warn!(source_key = %key, "Unknown source");
                run.notices.push(Notice::UnknownSource(key.clone()));
                continue;
            };

            for item in self.scrape_source(source, keyword) {
                let (url, source_key) = item.dedup_key();
                if seen.insert((url.to_string(), source_key.to_string())) {
                    run.items.push(item);
                }
            }

            if index + 1 < source_keys.len() {
                self.clock.sleep(self.settings.politeness_delay);
            }
        }

        info!(count = run.items.len(), "Live scrape finished");
        run
    }

    fn scrape_source(&self, source: &Source, keyword: Option<&str>) -> Vec<Headline> {
        if !self.robots.is_allowed(source.listing_url) {
            info!(source_key = source.key, "Skipping source disallowed by robots.txt");
            return Vec::new();
        }

        let Some(body) = self.fetcher.fetch(source.listing_url) else {
            info!(source_key = source.key, "Skipping source, fetch failed");
            return Vec::new();
        };

        let parsed = source.parse_listing(&body);
        let total = parsed.len();
        let items: Vec<Headline> = parsed
            .into_iter()
            .map(|raw| raw.into_headline(source.name, source.key))
            .filter(|item| keyword_filter::matches(item, keyword))
            .collect();

        debug!(source_key = source.key, parsed = total, matched = items.len(), "Parsed listing");
        items
    }
}
