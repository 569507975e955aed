pub mod headline;
pub mod scrape;

pub use headline::{Headline, RawHeadline, StoredHeadline};
pub use scrape::{Notice, Provenance, ScrapeRequest, ScrapeResult};
