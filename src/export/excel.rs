//! Excel生成（CLI版）
//!
//! 共通ライブラリでブックを組み立て、ファイルに書き出す

use super::{output_path_for_client, report_name};
use crate::error::{RateSheetsError, Result};
use rate_sheets_common::export::generate_rates_workbook_buffer;
use rate_sheets_common::RateSheet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// `<output_dir>/client-<id>-rates.xlsx` に書き出し、書き出したパスを返す
pub fn write_rates_workbook(
    client_id: i64,
    sheets: &[RateSheet],
    output_dir: &Path,
) -> Result<PathBuf> {
    let buffer = generate_rates_workbook_buffer(&report_name(client_id), sheets)
        .map_err(RateSheetsError::ExcelGeneration)?;

    std::fs::create_dir_all(output_dir).map_err(|e| {
        RateSheetsError::WriteFailure(format!("{}: {}", output_dir.display(), e))
    })?;

    let output_path = output_path_for_client(output_dir, client_id);
    std::fs::write(&output_path, &buffer).map_err(|e| {
        RateSheetsError::WriteFailure(format!("{}: {}", output_path.display(), e))
    })?;
    debug!(bytes = buffer.len(), path = %output_path.display(), "workbook written");

    Ok(output_path)
}
