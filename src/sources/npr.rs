use scraper::{Html, Selector};
use url::Url;

use crate::domain::RawHeadline;
use crate::sources::markup::{element_text, headline, resolve_link, selector, timestamp};
use crate::sources::traits::HeadlineParser;

/// NPR news section: one `article.item` per story.
pub struct NprParser {
    article: Selector,
    title_link: Selector,
    time: Selector,
}

impl NprParser {
    pub fn new() -> Self {
        Self {
            article: selector("article.item"),
            title_link: selector("h2.title a"),
            time: selector("time"),
        }
    }
}

impl Default for NprParser {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlineParser for NprParser {
    fn parse<'a>(
        &'a self,
        document: &'a Html,
        origin: &'a Url,
    ) -> Box<dyn Iterator<Item = RawHeadline> + 'a> {
        Box::new(document.select(&self.article).filter_map(move |article| {
            let link = article.select(&self.title_link).next()?;
            let published = article.select(&self.time).next().map(timestamp);

            headline(
                element_text(link),
                resolve_link(origin, link.value().attr("href")),
                published,
            )
        }))
    }
}
