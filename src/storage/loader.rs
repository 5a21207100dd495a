use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use fs4::tokio::AsyncFileExt;
use tokio::{
    fs::File,
    io::{AsyncBufRead, AsyncBufReadExt, BufReader},
};
use tracing::{debug, info};

use super::entities::{Dataset, PresenceEntry, UserId};

const FIELD_DELIMITER: char = ',';
const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

/// Source of a complete [Dataset]. Every call performs a full read of the underlying data and
/// returns a fresh value.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DatasetLoader: Send + Sync {
    async fn load(&self) -> Result<Dataset>;
}

/// Reads presence rows of the form `user_id,YYYY-MM-DD,HH:MM:SS,HH:MM:SS` from a file.
pub struct CsvDatasetLoader {
    path: PathBuf,
}

impl CsvDatasetLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetLoader for CsvDatasetLoader {
    async fn load(&self) -> Result<Dataset> {
        debug!("Extracting {:?}", self.path);
        let file = File::open(&self.path)
            .await
            .with_context(|| format!("Failed to open presence data {:?}", self.path))?;
        file.lock_shared()?;
        let mut reader = BufReader::new(file);
        let result = parse_dataset(&mut reader).await;
        reader.into_inner().unlock_async().await?;

        let dataset = result.with_context(|| format!("Failed to read {:?}", self.path))?;
        info!(
            "Loaded {} entries for {} users from {:?}",
            dataset.entry_count(),
            dataset.user_count(),
            self.path
        );
        Ok(dataset)
    }
}

/// Builds a dataset out of delimited rows. Rows with a field count other than four (headers, blank
/// lines) are ignored, rows that fail to parse or aren't valid UTF-8 are logged and skipped. Only
/// I/O failures abort.
pub async fn parse_dataset(mut reader: impl AsyncBufRead + Unpin) -> Result<Dataset> {
    let mut dataset = Dataset::default();
    let mut buffer = Vec::new();
    let mut index = 0usize;
    loop {
        buffer.clear();
        if reader.read_until(b'\n', &mut buffer).await? == 0 {
            break;
        }
        let row = std::str::from_utf8(&buffer)
            .context("row is not valid UTF-8")
            .and_then(parse_row);
        match row {
            Ok(Some((user_id, date, entry))) => dataset.upsert(user_id, date, entry),
            Ok(None) => {}
            Err(e) => debug!("Problem with line {index}: {e:#}"),
        }
        index += 1;
    }
    Ok(dataset)
}

/// Parses a single row. Either all four fields are valid and a record is returned, or nothing
/// is. `Ok(None)` means the row doesn't have the shape of a record at all. Fields may be wrapped
/// in double quotes.
pub fn parse_row(line: &str) -> Result<Option<(UserId, NaiveDate, PresenceEntry)>> {
    let fields = line
        .trim_end_matches(['\n', '\r'])
        .split(FIELD_DELIMITER)
        .map(unquote)
        .collect::<Vec<_>>();
    let &[user_id, date, start, end] = fields.as_slice() else {
        return Ok(None);
    };

    let user_id = user_id
        .parse::<UserId>()
        .with_context(|| format!("invalid user id {user_id:?}"))?;
    let date = NaiveDate::parse_from_str(date, DATE_FORMAT)
        .with_context(|| format!("invalid date {date:?}"))?;
    let start = NaiveTime::parse_from_str(start, TIME_FORMAT)
        .with_context(|| format!("invalid start time {start:?}"))?;
    let end = NaiveTime::parse_from_str(end, TIME_FORMAT)
        .with_context(|| format!("invalid end time {end:?}"))?;

    Ok(Some((user_id, date, PresenceEntry::new(start, end))))
}

fn unquote(field: &str) -> &str {
    field
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(field)
}
