use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::domain::RawHeadline;
use crate::sources::markup::{element_text, headline, resolve_link, selector, timestamp};
use crate::sources::traits::HeadlineParser;

/// Times of India: tracked links carry `data-vars-event-label`; a sibling
/// `time`/`.time` element in the same parent holds the timestamp.
pub struct TimesOfIndiaParser {
    link: Selector,
    time: Selector,
}

impl TimesOfIndiaParser {
    pub fn new() -> Self {
        Self {
            link: selector("a[data-vars-event-label]"),
            time: selector("time, .time"),
        }
    }
}

impl Default for TimesOfIndiaParser {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlineParser for TimesOfIndiaParser {
    fn parse<'a>(
        &'a self,
        document: &'a Html,
        origin: &'a Url,
    ) -> Box<dyn Iterator<Item = RawHeadline> + 'a> {
        Box::new(document.select(&self.link).filter_map(move |link| {
            let published = link
                .parent()
                .and_then(ElementRef::wrap)
                .and_then(|parent| parent.select(&self.time).next())
                .map(timestamp);

            headline(
                element_text(link),
                resolve_link(origin, link.value().attr("href")),
                published,
            )
        }))
    }
}
