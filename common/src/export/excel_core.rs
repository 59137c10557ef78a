//! Excel生成（共通ライブラリ）
//!
//! シート構成（RateSheet）から料金表ブックをメモリ上に生成する

use crate::sheet::RateSheet;
use crate::types::ColumnKey;
use rust_xlsxwriter::*;

/// Excelの最大列数
pub const EXCEL_MAX_COLUMNS: usize = 16_384;
/// シート名の最大長
pub const SHEET_NAME_MAX_LEN: usize = 31;
/// シート名に使えない文字
const SHEET_NAME_ILLEGAL: [char; 7] = ['*', ':', '?', '/', '\\', '[', ']'];

const WEIGHT_COL_WIDTH: f64 = 14.0;
const ZONE_COL_WIDTH: f64 = 11.0;

/// シート名を Excel の制約に合わせる
pub fn sanitize_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if SHEET_NAME_ILLEGAL.contains(&c) { '_' } else { c })
        .take(SHEET_NAME_MAX_LEN)
        .collect();
    let trimmed = cleaned.trim_matches('\'');
    if trimmed.is_empty() {
        "Sheet".to_string()
    } else {
        trimmed.to_string()
    }
}

/// 料金表ブックをバッファに生成
///
/// # Arguments
/// * `document_title` - ブックのタイトル（文書プロパティ）
/// * `sheets` - 出力順に並んだシート。空ならエラー
pub fn generate_rates_workbook_buffer(
    document_title: &str,
    sheets: &[RateSheet],
) -> Result<Vec<u8>, String> {
    if sheets.is_empty() {
        return Err("出力するシートがありません".to_string());
    }

    let mut workbook = Workbook::new();
    let properties = DocProperties::new().set_title(document_title);
    workbook.set_properties(&properties);

    let header_format = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    let weight_format = Format::new().set_align(FormatAlign::Left);

    let rate_format = Format::new().set_num_format("0.00");

    for sheet in sheets {
        if sheet.columns.len() > EXCEL_MAX_COLUMNS {
            return Err(format!(
                "列数が上限を超えています: {} ({}列)",
                sheet.title(),
                sheet.columns.len()
            ));
        }

        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(sanitize_sheet_name(sheet.title()))
            .map_err(|e| format!("シート名設定エラー: {}", e))?;

        // 見出し行
        for (idx, column) in sheet.columns.iter().enumerate() {
            let col = idx as u16;
            let width = match column.key {
                ColumnKey::Zone(_) => ZONE_COL_WIDTH,
                _ => WEIGHT_COL_WIDTH,
            };
            worksheet
                .set_column_width(col, width)
                .map_err(|e| format!("列幅設定エラー: {}", e))?;
            worksheet
                .write_string_with_format(0, col, &column.header, &header_format)
                .map_err(|e| format!("見出し書き込みエラー: {}", e))?;
        }

        // データ行（料金の無いゾーンは空セルのまま）
        for (row_idx, row) in sheet.rows.iter().enumerate() {
            let row_num = (row_idx + 1) as u32;
            for (idx, column) in sheet.columns.iter().enumerate() {
                let Some(value) = row.value(&column.key) else {
                    continue;
                };
                let format = match column.key {
                    ColumnKey::Zone(_) => &rate_format,
                    _ => &weight_format,
                };
                worksheet
                    .write_number_with_format(row_num, idx as u16, value, format)
                    .map_err(|e| format!("セル書き込みエラー: {}", e))?;
            }
        }

        worksheet
            .set_freeze_panes(1, 2)
            .map_err(|e| format!("ウィンドウ枠固定エラー: {}", e))?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}
