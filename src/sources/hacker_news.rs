use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::domain::RawHeadline;
use crate::sources::markup::{element_text, headline, resolve_link, selector, timestamp};
use crate::sources::traits::HeadlineParser;

/// Hacker News front page. Each story is a `tr.athing` row; its age sits in the
/// row that follows.
pub struct HackerNewsParser {
    row: Selector,
    title_link: Selector,
    age: Selector,
}

impl HackerNewsParser {
    pub fn new() -> Self {
        Self {
            row: selector("tr.athing"),
            title_link: selector("span.titleline a"),
            age: selector("span.age"),
        }
    }

    fn subtext_row<'a>(row: ElementRef<'a>) -> Option<ElementRef<'a>> {
        row.next_siblings()
            .filter_map(ElementRef::wrap)
            .find(|e| e.value().name() == "tr")
    }
}

impl Default for HackerNewsParser {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlineParser for HackerNewsParser {
    fn parse<'a>(
        &'a self,
        document: &'a Html,
        origin: &'a Url,
    ) -> Box<dyn Iterator<Item = RawHeadline> + 'a> {
        Box::new(document.select(&self.row).filter_map(move |row| {
            let link = row.select(&self.title_link).next()?;
            let published = Self::subtext_row(row)
                .and_then(|subtext| subtext.select(&self.age).next())
                .map(timestamp);

            headline(
                element_text(link),
                resolve_link(origin, link.value().attr("href")),
                published,
            )
        }))
    }
}
