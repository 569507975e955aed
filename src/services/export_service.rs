use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::ensure_dir;
use crate::domain::Headline;
use crate::errors::HeadlinesResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(format!("Unsupported export format: {}", s)),
        }
    }
}

/// The exported shape: no internal identity, no scraped_at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub title: String,
    pub url: String,
    pub published_at: String,
    pub source: String,
}

impl From<&Headline> for ExportRecord {
    fn from(item: &Headline) -> Self {
        Self {
            title: item.title.clone(),
            url: item.url.clone(),
            published_at: item.published_at.clone(),
            source: item.source.clone(),
        }
    }
}

/// Writes result sets to `headlines-{UTC timestamp}.{ext}` files.
pub struct ExportService {
    output_dir: PathBuf,
}

impl ExportService {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    pub fn file_name(now: DateTime<Utc>, format: ExportFormat) -> String {
        format!("headlines-{}.{}", now.format("%Y%m%d-%H%M%S"), format.extension())
    }

    /// Export `items`; `None` when there is nothing to write, the format is not
    /// supported, or writing failed.
    pub fn export(&self, items: &[Headline], format: &str) -> Option<PathBuf> {
        if items.is_empty() {
            return None;
        }

        let format = match format.parse::<ExportFormat>() {
            Ok(format) => format,
            Err(e) => {
                warn!(error = %e, "Skipping export");
                return None;
            }
        };

        match self.write(items, format, Utc::now()) {
            Ok(path) => {
                info!(path = %path.display(), count = items.len(), "Exported headlines");
                Some(path)
            }
            Err(e) => {
                warn!(error = %e, "Export failed");
                None
            }
        }
    }

    pub fn write(
        &self,
        items: &[Headline],
        format: ExportFormat,
        now: DateTime<Utc>,
    ) -> HeadlinesResult<PathBuf> {
        ensure_dir(&self.output_dir)?;
        let path = self.output_dir.join(Self::file_name(now, format));
        let records: Vec<ExportRecord> = items.iter().map(ExportRecord::from).collect();

        match format {
            ExportFormat::Json => {
                let mut writer = BufWriter::new(File::create(&path)?);
                serde_json::to_writer_pretty(&mut writer, &records)?;
                writer.flush()?;
            }
            ExportFormat::Csv => {
                let mut writer = csv::Writer::from_path(&path)?;
                if records.is_empty() {
                    writer.write_record(["title", "url", "published_at", "source"])?;
                }
                for record in &records {
                    writer.serialize(record)?;
                }
                writer.flush()?;
            }
        }

        Ok(path)
    }
}
