pub mod excel;

use std::path::{Path, PathBuf};

/// 出力ファイルのベース名（例: client-1240-rates）
pub fn report_name(client_id: i64) -> String {
    format!("client-{}-rates", client_id)
}

pub fn output_path_for_client(output_dir: &Path, client_id: i64) -> PathBuf {
    output_dir.join(format!("{}.xlsx", report_name(client_id)))
}
