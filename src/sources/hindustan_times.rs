use scraper::{Html, Selector};
use url::Url;

use crate::domain::RawHeadline;
use crate::sources::markup::{element_text, headline, resolve_link, selector, timestamp};
use crate::sources::traits::HeadlineParser;

/// Hindustan Times: stories are `article` elements or `.story-card` blocks.
pub struct HindustanTimesParser {
    card: Selector,
    header_link: Selector,
    time: Selector,
}

impl HindustanTimesParser {
    pub fn new() -> Self {
        Self {
            card: selector("article, .story-card"),
            header_link: selector("h2 a, h3 a, .headline a"),
            time: selector("time, .date"),
        }
    }
}

impl Default for HindustanTimesParser {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlineParser for HindustanTimesParser {
    fn parse<'a>(
        &'a self,
        document: &'a Html,
        origin: &'a Url,
    ) -> Box<dyn Iterator<Item = RawHeadline> + 'a> {
        Box::new(document.select(&self.card).filter_map(move |card| {
            let link = card.select(&self.header_link).next()?;
            let published = card.select(&self.time).next().map(timestamp);

            headline(
                element_text(link),
                resolve_link(origin, link.value().attr("href")),
                published,
            )
        }))
    }
}
