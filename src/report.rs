//! 料金表レポートの生成
//!
//! 取得 → シート構成 → Excel書き出し。空のグループはシートを作らず警告のみ。

use crate::error::{RateSheetsError, Result};
use crate::export::excel::write_rates_workbook;
use crate::source::RateSource;
use rate_sheets_common::{plan_sheets, RateRecord, RateSheet, SheetOutcome, ShippingSpeed};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// 生成結果
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSummary {
    pub client_id: i64,
    pub output_path: PathBuf,
    pub sheets_written: Vec<ShippingSpeed>,
    pub sheets_skipped: Vec<ShippingSpeed>,
}

/// データソースから取得してレポートを書き出す
pub async fn generate_report<S: RateSource>(
    source: &S,
    client_id: i64,
    output_dir: &Path,
) -> Result<ReportSummary> {
    let records = source.fetch_rates(client_id).await?;
    info!(client_id, records = records.len(), "rate records fetched");

    build_report(client_id, &records, output_dir)
}

/// 取得済みレコードからレポートを書き出す
pub fn build_report(
    client_id: i64,
    records: &[RateRecord],
    output_dir: &Path,
) -> Result<ReportSummary> {
    if records.is_empty() {
        return Err(RateSheetsError::NoRatesFound(client_id));
    }

    let mut sheets: Vec<RateSheet> = Vec::new();
    let mut sheets_skipped = Vec::new();
    for outcome in plan_sheets(records) {
        match outcome {
            SheetOutcome::Ready(sheet) => {
                info!(sheet = sheet.title(), rows = sheet.rows.len(), "sheet ready");
                sheets.push(sheet);
            }
            SheetOutcome::Skipped(speed) => {
                warn!(
                    client_id,
                    sheet = speed.sheet_title(),
                    "no {} {} rates; sheet omitted",
                    speed.locale(),
                    speed
                );
                sheets_skipped.push(speed);
            }
        }
    }

    if sheets.is_empty() {
        return Err(RateSheetsError::NoRatesFound(client_id));
    }

    let output_path = write_rates_workbook(client_id, &sheets, output_dir)?;

    Ok(ReportSummary {
        client_id,
        output_path,
        sheets_written: sheets.iter().map(|s| s.speed).collect(),
        sheets_skipped,
    })
}
