pub mod clock;
pub mod keyword_filter;
pub mod fallback_service;
pub mod export_service;
pub mod scrape_service;

pub use clock::{Clock, SystemClock};
pub use export_service::{ExportFormat, ExportRecord, ExportService};
pub use fallback_service::FallbackService;
pub use scrape_service::{LiveScrape, ScrapeService};
