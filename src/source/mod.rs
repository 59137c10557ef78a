//! 料金データの取得元
//!
//! - mysql: `rates` テーブル（本番）
//! - json_file: テーブルをエクスポートしたJSONファイル（オフライン用）

pub mod json_file;
pub mod mysql;

pub use json_file::JsonFileSource;
pub use mysql::MySqlRateSource;

use crate::error::Result;
use rate_sheets_common::{RateRecord, RawRateRecord};
use tracing::warn;

/// クライアントの料金レコードを取得するデータソース
#[allow(async_fn_in_trait)]
pub trait RateSource {
    async fn fetch_rates(&self, client_id: i64) -> Result<Vec<RateRecord>>;
}

/// 生の行を型付きレコードに変換する。locale/shipping_speedが不明な行は警告して除外
pub fn collect_records(raw: Vec<RawRateRecord>) -> Vec<RateRecord> {
    raw.into_iter()
        .filter_map(|row| match RateRecord::try_from(row) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("skipping rate row: {}", e);
                None
            }
        })
        .collect()
}
