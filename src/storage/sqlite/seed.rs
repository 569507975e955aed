use tracing::info;

use crate::domain::Headline;
use crate::errors::HeadlinesResult;
use crate::sources::SourceRegistry;
use crate::storage::sqlite::{SqliteHeadlineRepository, SqliteStorage};
use crate::storage::traits::HeadlineRepository;

/// (source key, title, url, published_at)
const SAMPLES: &[(&str, &str, &str, &str)] = &[
    ("bbc", "Global climate pact sparks fresh innovation push", "https://www.bbc.com/news/science-environment-123456", "2025-01-05T08:00:00Z"),
    ("hn", "Show HN: Open climate dashboard for local communities", "https://news.ycombinator.com/item?id=42424242", "3 hours ago"),
    ("npr", "NPR Climate Solutions: Turning seawater into batteries", "https://www.npr.org/2025/01/07/example-story-climate-battery", "2025-01-07T10:15:00Z"),
    ("npr", "How coastal cities are adapting to rising tides", "https://www.npr.org/2025/01/04/example-story-rising-tides", "2025-01-04T09:45:00Z"),
    ("toi", "India launches massive reforestation drive to combat climate change", "https://timesofindia.indiatimes.com/climate-reforestation-2025", "2025-01-06T14:20:00Z"),
    ("ht", "Delhi air quality improves as climate policies take effect", "https://www.hindustantimes.com/delhi-air-quality-climate-2025", "2025-01-05T11:30:00Z"),
    ("bbc", "Global markets surge as economic recovery accelerates", "https://www.bbc.com/news/business-economy-789012", "2025-01-08T09:15:00Z"),
    ("toi", "India's GDP growth exceeds expectations in Q4", "https://timesofindia.indiatimes.com/india-gdp-growth-2025", "2025-01-07T16:45:00Z"),
    ("ht", "Central banks coordinate on inflation strategy", "https://www.hindustantimes.com/central-banks-inflation-2025", "2025-01-06T10:00:00Z"),
    ("hn", "Tech stocks rally on strong earnings reports", "https://news.ycombinator.com/item?id=44556677", "5 hours ago"),
    ("npr", "Renewable energy investments reach record high", "https://www.npr.org/2025/01/08/renewable-energy-investments", "2025-01-08T08:30:00Z"),
    ("bbc", "AI-driven forecasts help farmers plan drought response", "https://www.bbc.com/news/technology-654321", "2025-01-03T12:30:00Z"),
    ("hn", "Breakthrough: AI model achieves human-level reasoning", "https://news.ycombinator.com/item?id=45678901", "2 hours ago"),
    ("npr", "New AI system can predict disease outbreaks weeks in advance", "https://www.npr.org/2025/01/09/ai-disease-prediction", "2025-01-09T07:20:00Z"),
    ("toi", "Indian startups lead AI innovation in healthcare sector", "https://timesofindia.indiatimes.com/ai-healthcare-startups-2025", "2025-01-08T13:10:00Z"),
    ("ht", "AI-powered language translation breaks new barriers", "https://www.hindustantimes.com/ai-translation-breakthrough-2025", "2025-01-07T15:50:00Z"),
    ("hn", "Open source AI model released for scientific research", "https://news.ycombinator.com/item?id=46789012", "1 hour ago"),
    ("toi", "Cricket World Cup final sets new viewership records", "https://timesofindia.indiatimes.com/cricket-world-cup-2025", "2025-01-09T18:00:00Z"),
    ("bbc", "Olympic preparations enter final phase", "https://www.bbc.com/news/sport-olympics-2025", "2025-01-08T12:00:00Z"),
    ("ht", "Indian football team qualifies for Asian Cup finals", "https://www.hindustantimes.com/indian-football-asian-cup-2025", "2025-01-07T19:30:00Z"),
    ("toi", "Tennis star breaks 20-year record at Grand Slam", "https://timesofindia.indiatimes.com/tennis-grand-slam-record-2025", "2025-01-06T20:15:00Z"),
    ("bbc", "Formula 1 season opens with dramatic finish", "https://www.bbc.com/news/sport-f1-2025", "2025-01-05T17:45:00Z"),
    ("toi", "Traditional recipes gain popularity in modern kitchens", "https://timesofindia.indiatimes.com/traditional-cooking-recipes-2025", "2025-01-08T10:30:00Z"),
    ("bbc", "Plant-based cooking trends transform restaurant menus", "https://www.bbc.com/news/food-plant-based-2025", "2025-01-07T14:20:00Z"),
    ("ht", "Home cooking surge continues post-pandemic", "https://www.hindustantimes.com/home-cooking-trends-2025", "2025-01-06T11:15:00Z"),
    ("toi", "Chef's innovative fusion cuisine wins international acclaim", "https://timesofindia.indiatimes.com/fusion-cuisine-award-2025", "2025-01-05T16:00:00Z"),
    ("npr", "Sustainable cooking practices reduce food waste", "https://www.npr.org/2025/01/09/sustainable-cooking-food-waste", "2025-01-09T09:45:00Z"),
];

/// Sample headlines used to populate an empty store so the cache fallback has
/// something to show before the first successful scrape.
pub fn sample_headlines() -> Vec<Headline> {
    let registry = SourceRegistry::new();

    SAMPLES
        .iter()
        .filter_map(|(key, title, url, published)| {
            let source = registry.get(key)?;
            Some(Headline::new(title, url, source.name, key).with_published(published))
        })
        .collect()
}

pub fn seed_if_empty(storage: &SqliteStorage) -> HeadlinesResult<()> {
    let repository = SqliteHeadlineRepository::new(storage.clone());
    if repository.count()? > 0 {
        return Ok(());
    }

    let inserted = repository.upsert_batch(&sample_headlines())?;
    info!(count = inserted, "Seeded empty headline store");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_sample_has_a_registered_source() {
        assert_eq!(sample_headlines().len(), SAMPLES.len());
    }

    #[test]
    fn test_samples_cover_all_sources() {
        let samples = sample_headlines();
        for key in SourceRegistry::new().keys() {
            assert!(samples.iter().any(|h| h.source_key == key), "no sample for {}", key);
        }
    }

    #[test]
    fn test_sample_dedup_keys_are_unique() {
        let samples = sample_headlines();
        let mut seen = std::collections::HashSet::new();
        for headline in &samples {
            assert!(seen.insert(headline.dedup_key()));
        }
    }
}
