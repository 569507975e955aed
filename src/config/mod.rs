use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::errors::{HeadlinesError, HeadlinesResult};

/// Product token matched against `User-agent` lines in robots.txt.
pub const BOT_NAME: &str = "WebScraperForHeadlinesBot";

/// Identification string sent with every request.
pub const USER_AGENT: &str = "WebScraperForHeadlinesBot/1.0 (+https://example.com/bot)";

/// Status codes the fetcher retries on.
pub const RETRYABLE_STATUSES: &[u16] = &[429, 500, 502, 503, 504];

/// Timing and retry policy for one scrape run.
#[derive(Debug, Clone)]
pub struct ScrapeSettings {
    /// Wall-clock budget, checked between sources only.
    pub budget: Duration,
    /// Pause after each registered source.
    pub politeness_delay: Duration,
    pub request_timeout: Duration,
    /// Total attempts per fetch, including the first one.
    pub max_attempts: u32,
    pub backoff_factor: f64,
    /// Row limit for the keyword-filtered cache lookup.
    pub cache_page_size: usize,
    /// Row limit once the fallback drops the keyword or widens to all sources.
    pub broad_page_size: usize,
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self {
            budget: Duration::from_secs(10),
            politeness_delay: Duration::from_secs(1),
            request_timeout: Duration::from_secs(15),
            max_attempts: 3,
            backoff_factor: 1.2,
            cache_page_size: 30,
            broad_page_size: 50,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub seed_on_init: bool,
    pub scrape: ScrapeSettings,
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> HeadlinesResult<Self> {
        let exe_dir = Self::exe_dir();

        // Try to load .env from executable's directory first
        if let Some(ref dir) = exe_dir {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        let data_dir = std::env::var("HEADLINES_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                exe_dir
                    .map(|d| d.join("data"))
                    .unwrap_or_else(|| PathBuf::from("./data"))
            });

        let db_path = std::env::var("HEADLINES_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("headlines.db"));

        let seed_on_init = match std::env::var("HEADLINES_SEED") {
            Ok(value) => parse_flag(&value)?,
            Err(_) => true,
        };

        Ok(Self {
            data_dir,
            db_path,
            seed_on_init,
            scrape: ScrapeSettings::default(),
        })
    }
}

fn parse_flag(value: &str) -> HeadlinesResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(HeadlinesError::Config(format!(
            "HEADLINES_SEED must be a boolean, got '{}'",
            other
        ))),
    }
}

/// Create `dir` (and parents) if it does not exist yet.
pub fn ensure_dir(dir: &Path) -> HeadlinesResult<()> {
    if !dir.as_os_str().is_empty() && !dir.exists() {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}
