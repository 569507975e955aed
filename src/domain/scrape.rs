use std::path::PathBuf;
use std::time::Duration;

use super::Headline;

/// What the caller asked for: which sources, an optional keyword and the export format.
#[derive(Debug, Clone)]
pub struct ScrapeRequest {
    /// Requested source keys in order; may contain keys the registry does not know.
    pub source_keys: Vec<String>,
    pub keyword: Option<String>,
    pub export_format: String,
}

impl ScrapeRequest {
    pub fn new(source_keys: Vec<String>) -> Self {
        Self {
            source_keys,
            keyword: None,
            export_format: "json".to_string(),
        }
    }

    /// Blank keywords are treated as absent.
    pub fn with_keyword(mut self, keyword: Option<String>) -> Self {
        self.keyword = keyword
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        self
    }

    pub fn with_export_format(mut self, format: &str) -> Self {
        self.export_format = format.to_string();
        self
    }
}

/// Where the returned items came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance {
    Live,
    CacheFiltered,
    /// Cached rows returned without the keyword filter. `ignored_keyword` is `None`
    /// when no keyword was given and the lookup was widened to all sources instead.
    CacheUnfiltered { ignored_keyword: Option<String> },
    Empty,
}

impl Provenance {
    pub fn message(&self) -> String {
        match self {
            Provenance::Live => "Fresh headlines from live sources.".to_string(),
            Provenance::CacheFiltered => {
                "Loaded recent saved headlines while live sources were unavailable.".to_string()
            }
            Provenance::CacheUnfiltered {
                ignored_keyword: Some(keyword),
            } => format!(
                "Approximate match: no saved headlines matched '{}', showing recent headlines instead.",
                keyword
            ),
            Provenance::CacheUnfiltered {
                ignored_keyword: None,
            } => "Showing recent saved headlines from all sources.".to_string(),
            Provenance::Empty => {
                "No headlines found. The database may need to be populated.".to_string()
            }
        }
    }
}

/// Non-fatal events raised while scraping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    UnknownSource(String),
    BudgetExceeded {
        budget: Duration,
        /// Source keys left unprocessed, in worklist order.
        skipped: Vec<String>,
    },
    PersistFailed(String),
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::UnknownSource(key) => write!(f, "Unknown source: {}", key),
            Notice::BudgetExceeded { budget, skipped } => write!(
                f,
                "Stopped scraping after {}s budget ({} sources skipped).",
                budget.as_secs(),
                skipped.len()
            ),
            Notice::PersistFailed(message) => {
                write!(f, "Could not save headlines: {}", message)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScrapeResult {
    pub items: Vec<Headline>,
    pub provenance: Provenance,
    pub notices: Vec<Notice>,
    pub export_path: Option<PathBuf>,
}

impl ScrapeResult {
    pub fn budget_exceeded(&self) -> bool {
        self.notices
            .iter()
            .any(|n| matches!(n, Notice::BudgetExceeded { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_keyword_is_dropped() {
        let request = ScrapeRequest::new(vec!["bbc".to_string()]).with_keyword(Some("   ".to_string()));
        assert!(request.keyword.is_none());

        let request = ScrapeRequest::new(vec![]).with_keyword(Some(" climate ".to_string()));
        assert_eq!(request.keyword.as_deref(), Some("climate"));
    }

    #[test]
    fn test_approximate_match_message_names_keyword() {
        let provenance = Provenance::CacheUnfiltered {
            ignored_keyword: Some("quantum".to_string()),
        };
        assert!(provenance.message().contains("'quantum'"));
    }

    #[test]
    fn test_budget_notice_display() {
        let notice = Notice::BudgetExceeded {
            budget: Duration::from_secs(10),
            skipped: vec!["npr".to_string(), "toi".to_string()],
        };
        assert_eq!(
            notice.to_string(),
            "Stopped scraping after 10s budget (2 sources skipped)."
        );
    }
}
