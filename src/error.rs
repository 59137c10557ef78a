use thiserror::Error;

#[derive(Error, Debug)]
pub enum RateSheetsError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("データソースに接続できません: {0}")]
    SourceUnavailable(String),

    #[error("クライアント {0} の料金データがありません")]
    NoRatesFound(i64),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("ファイル書き込みエラー: {0}")]
    WriteFailure(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] rate_sheets_common::Error),
}

impl RateSheetsError {
    /// プロセスの終了コード
    pub fn exit_code(&self) -> u8 {
        match self {
            RateSheetsError::SourceUnavailable(_) => 2,
            RateSheetsError::NoRatesFound(_) => 3,
            RateSheetsError::ExcelGeneration(_) | RateSheetsError::WriteFailure(_) => 4,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, RateSheetsError>;
