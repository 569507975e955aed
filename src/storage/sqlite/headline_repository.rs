use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::{Type, Value};
use rusqlite::Row;
use tracing::debug;

use crate::domain::{Headline, StoredHeadline};
use crate::errors::{HeadlinesError, HeadlinesResult};
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::{HeadlineQuery, HeadlineRepository};

const UPSERT: &str = r#"
INSERT INTO headlines (title, url, published_at, source, source_key, scraped_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6)
ON CONFLICT(url, source_key) DO UPDATE SET
    title = excluded.title,
    published_at = excluded.published_at,
    source = excluded.source,
    scraped_at = excluded.scraped_at
"#;

pub struct SqliteHeadlineRepository {
    storage: SqliteStorage,
}

impl SqliteHeadlineRepository {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }

    /// Fixed-width UTC text, so ordering by the column orders by time.
    fn format_timestamp(scraped_at: DateTime<Utc>) -> String {
        scraped_at.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    fn row_to_stored(row: &Row<'_>) -> rusqlite::Result<StoredHeadline> {
        let published_at: Option<String> = row.get(3)?;
        let scraped_at: String = row.get(6)?;
        let scraped_at = DateTime::parse_from_rfc3339(&scraped_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?;

        Ok(StoredHeadline {
            id: row.get(0)?,
            headline: Headline {
                title: row.get(1)?,
                url: row.get(2)?,
                published_at: published_at.unwrap_or_default(),
                source: row.get(4)?,
                source_key: row.get(5)?,
            },
            scraped_at,
        })
    }
}

impl HeadlineRepository for SqliteHeadlineRepository {
    fn upsert_batch_at(
        &self,
        items: &[Headline],
        scraped_at: DateTime<Utc>,
    ) -> HeadlinesResult<usize> {
        if items.is_empty() {
            return Ok(0);
        }

        let timestamp = Self::format_timestamp(scraped_at);
        let mut conn = self.storage.connection()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(UPSERT)?;
            for item in items {
                stmt.execute((
                    &item.title,
                    &item.url,
                    &item.published_at,
                    &item.source,
                    &item.source_key,
                    &timestamp,
                ))?;
            }
        }
        tx.commit()?;

        debug!(count = items.len(), %timestamp, "Persisted headline batch");
        Ok(items.len())
    }

    fn query(&self, query: &HeadlineQuery) -> HeadlinesResult<Vec<StoredHeadline>> {
        let mut clauses: Vec<String> = Vec::new();
        let mut params: Vec<Value> = Vec::new();

        if let Some(keys) = &query.source_keys {
            if keys.is_empty() {
                return Ok(Vec::new());
            }
            let placeholders: Vec<&str> = keys.iter().map(|_| "?").collect();
            clauses.push(format!("source_key IN ({})", placeholders.join(", ")));
            params.extend(keys.iter().cloned().map(Value::Text));
        }

        if let Some(keyword) = &query.keyword {
            let needle = keyword.to_lowercase();
            clauses.push(
                "(instr(unicode_lower(title), ?) > 0 \
                 OR instr(unicode_lower(COALESCE(published_at, '')), ?) > 0)"
                    .to_string(),
            );
            params.push(Value::Text(needle.clone()));
            params.push(Value::Text(needle));
        }

        let where_clause = if clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", clauses.join(" AND "))
        };

        let limit = i64::try_from(query.limit)
            .map_err(|_| HeadlinesError::InvalidInput(format!("limit too large: {}", query.limit)))?;
        params.push(Value::Integer(limit));

        let sql = format!(
            "SELECT id, title, url, published_at, source, source_key, scraped_at \
             FROM headlines {} ORDER BY scraped_at DESC, id ASC LIMIT ?",
            where_clause
        );

        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(params.iter()), Self::row_to_stored)?;

        rows.collect::<Result<Vec<_>, _>>().map_err(HeadlinesError::from)
    }

    fn count(&self) -> HeadlinesResult<usize> {
        let conn = self.storage.connection()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM headlines", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;

    fn setup_repo() -> (TempDir, SqliteHeadlineRepository) {
        let temp = TempDir::new().unwrap();
        let storage = SqliteStorage::initialize(temp.path().join("headlines.db"), false).unwrap();
        (temp, SqliteHeadlineRepository::new(storage))
    }

    fn at(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    fn bbc(title: &str, url: &str) -> Headline {
        Headline::new(title, url, "BBC News", "bbc")
    }

    #[test]
    fn test_upsert_empty_batch_is_noop() {
        let (_temp, repo) = setup_repo();
        assert_eq!(repo.upsert_batch(&[]).unwrap(), 0);
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_same_pair_keeps_one_row() {
        let (_temp, repo) = setup_repo();

        repo.upsert_batch_at(&[bbc("Old title", "https://www.bbc.com/news/1")], at(0))
            .unwrap();
        let first = repo.query(&HeadlineQuery::new(10)).unwrap();

        let updated = bbc("New title", "https://www.bbc.com/news/1").with_published("2025-01-10");
        repo.upsert_batch_at(&[updated], at(5)).unwrap();

        let rows = repo.query(&HeadlineQuery::new(10)).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, first[0].id);
        assert_eq!(rows[0].headline.title, "New title");
        assert_eq!(rows[0].headline.published_at, "2025-01-10");
        assert_eq!(rows[0].scraped_at, at(5));
    }

    #[test]
    fn test_same_url_different_source_is_distinct() {
        let (_temp, repo) = setup_repo();
        let shared = "https://example.com/story";

        repo.upsert_batch(&[
            bbc("Story", shared),
            Headline::new("Story", shared, "Hacker News", "hn"),
        ])
        .unwrap();

        assert_eq!(repo.count().unwrap(), 2);
    }

    #[test]
    fn test_batch_shares_one_timestamp() {
        let (_temp, repo) = setup_repo();
        repo.upsert_batch(&[bbc("A", "https://a"), bbc("B", "https://b")])
            .unwrap();

        let rows = repo.query(&HeadlineQuery::new(10)).unwrap();
        assert_eq!(rows[0].scraped_at, rows[1].scraped_at);
    }

    #[test]
    fn test_query_orders_newest_first_then_arrival() {
        let (_temp, repo) = setup_repo();
        repo.upsert_batch_at(&[bbc("Older", "https://1")], at(0)).unwrap();
        repo.upsert_batch_at(&[bbc("Newest A", "https://2"), bbc("Newest B", "https://3")], at(10))
            .unwrap();

        let titles: Vec<String> = repo
            .query(&HeadlineQuery::new(10))
            .unwrap()
            .into_iter()
            .map(|s| s.headline.title)
            .collect();

        assert_eq!(titles, vec!["Newest A", "Newest B", "Older"]);
    }

    #[test]
    fn test_query_filters_sources_keyword_and_limit() {
        let (_temp, repo) = setup_repo();
        repo.upsert_batch(&[
            bbc("Climate talks resume", "https://1"),
            bbc("Markets rally", "https://2"),
            Headline::new("CLIMATE dashboard", "https://3", "Hacker News", "hn"),
            Headline::new("Rust release", "https://4", "Hacker News", "hn").with_published("climate week"),
        ])
        .unwrap();

        let only_hn = HeadlineQuery::new(10)
            .with_sources(vec!["hn".to_string()])
            .with_keyword(Some("Climate"));
        let rows = repo.query(&only_hn).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.headline.source_key == "hn"));

        let all_climate = HeadlineQuery::new(2).with_keyword(Some("climate"));
        assert_eq!(repo.query(&all_climate).unwrap().len(), 2);
    }

    #[test]
    fn test_keyword_is_not_a_like_pattern() {
        let (_temp, repo) = setup_repo();
        repo.upsert_batch(&[bbc("Growth at 5%", "https://1"), bbc("Plain", "https://2")])
            .unwrap();

        let rows = repo
            .query(&HeadlineQuery::new(10).with_keyword(Some("%")))
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].headline.title, "Growth at 5%");
    }

    #[test]
    fn test_empty_source_selection_returns_nothing() {
        let (_temp, repo) = setup_repo();
        repo.upsert_batch(&[bbc("A", "https://1")]).unwrap();

        let rows = repo
            .query(&HeadlineQuery::new(10).with_sources(Vec::new()))
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_keyword_matches_non_ascii_case_insensitively() {
        let (_temp, repo) = setup_repo();
        let heat = bbc("ÉTÉ record heat in Zürich", "https://1");
        repo.upsert_batch(&[heat.clone(), bbc("Markets rally", "https://2")])
            .unwrap();

        assert!(crate::services::keyword_filter::matches(&heat, Some("été")));

        let rows = repo
            .query(&HeadlineQuery::new(10).with_keyword(Some("été")))
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].headline.title, "ÉTÉ record heat in Zürich");

        let rows = repo
            .query(&HeadlineQuery::new(10).with_keyword(Some("ZÜRICH")))
            .unwrap();
        assert_eq!(rows.len(), 1);
    }
}
