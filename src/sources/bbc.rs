use scraper::{Html, Selector};
use url::Url;

use crate::domain::RawHeadline;
use crate::sources::markup::{element_text, enclosing, headline, resolve_link, selector, timestamp};
use crate::sources::traits::HeadlineParser;

/// BBC News front page: promo headings, dated by the `<time>` inside the promo card.
pub struct BbcParser {
    heading: Selector,
    time: Selector,
}

impl BbcParser {
    pub fn new() -> Self {
        Self {
            heading: selector("a.gs-c-promo-heading"),
            time: selector("time"),
        }
    }
}

impl Default for BbcParser {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlineParser for BbcParser {
    fn parse<'a>(
        &'a self,
        document: &'a Html,
        origin: &'a Url,
    ) -> Box<dyn Iterator<Item = RawHeadline> + 'a> {
        Box::new(document.select(&self.heading).filter_map(move |link| {
            let published = enclosing(link, "gs-c-promo")
                .and_then(|promo| promo.select(&self.time).next())
                .map(timestamp);

            headline(
                element_text(link),
                resolve_link(origin, link.value().attr("href")),
                published,
            )
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
<html><body>
  <div class="gs-c-promo">
    <a class="gs-c-promo-heading" href="/news/world-europe-1">
      <h3>Global climate pact sparks fresh innovation push</h3>
    </a>
    <time datetime="2025-01-05T08:00:00Z">5 January</time>
  </div>
  <div class="gs-c-promo">
    <a class="gs-c-promo-heading" href="https://www.bbc.com/news/technology-2">AI-driven forecasts</a>
  </div>
  <a class="gs-c-promo-heading" href="/news/empty"></a>
  <a class="gs-c-promo-heading">No link here</a>
</body></html>"#;

    fn parse(html: &str) -> Vec<RawHeadline> {
        let document = Html::parse_document(html);
        let origin = Url::parse("https://www.bbc.com/news").unwrap();
        BbcParser::new().parse(&document, &origin).collect()
    }

    #[test]
    fn test_parses_promo_headings() {
        let items = parse(LISTING);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Global climate pact sparks fresh innovation push");
        assert_eq!(items[0].url, "https://www.bbc.com/news/world-europe-1");
        assert_eq!(items[0].published_at, "2025-01-05T08:00:00Z");
    }

    #[test]
    fn test_missing_time_yields_empty_published() {
        let items = parse(LISTING);
        assert_eq!(items[1].url, "https://www.bbc.com/news/technology-2");
        assert_eq!(items[1].published_at, "");
    }

    #[test]
    fn test_empty_page_yields_nothing() {
        assert!(parse("<html><body><p>maintenance</p></body></html>").is_empty());
    }
}
