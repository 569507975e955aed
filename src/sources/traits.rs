use scraper::Html;
use url::Url;

use crate::domain::RawHeadline;

/// Site-specific strategy that locates headlines in a listing page.
pub trait HeadlineParser: Send + Sync {
    /// Yield headlines lazily from `document`. Items missing a title or link are
    /// skipped; relative links are resolved against `origin`.
    fn parse<'a>(
        &'a self,
        document: &'a Html,
        origin: &'a Url,
    ) -> Box<dyn Iterator<Item = RawHeadline> + 'a>;
}
