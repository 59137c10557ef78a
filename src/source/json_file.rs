use super::{collect_records, RateSource};
use crate::error::{RateSheetsError, Result};
use rate_sheets_common::{RateRecord, RawRateRecord};
use std::path::{Path, PathBuf};
use tracing::debug;

/// `rates` テーブルと同じ列名を持つJSON配列を読むデータソース
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RateSource for JsonFileSource {
    async fn fetch_rates(&self, client_id: i64) -> Result<Vec<RateRecord>> {
        if !self.path.exists() {
            return Err(RateSheetsError::SourceUnavailable(format!(
                "ファイルが見つかりません: {}",
                self.path.display()
            )));
        }

        let raw = RawRateRecord::list_from_file(&self.path).map_err(|e| {
            RateSheetsError::SourceUnavailable(format!("{}: {}", self.path.display(), e))
        })?;
        debug!(rows = raw.len(), path = %self.path.display(), "loaded rate rows");

        let for_client = raw.into_iter().filter(|r| r.client_id == client_id).collect();
        Ok(collect_records(for_client))
    }
}
