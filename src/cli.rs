use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rate-sheets")]
#[command(about = "配送料金テーブルからクライアント別の料金表Excelを生成", long_about = None)]
pub struct Cli {
    /// クライアントID（省略時: 設定の既定値、通常1240）
    pub client_id: Option<i64>,

    /// 出力ディレクトリ（省略時: 設定の output_dir）
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// DBの代わりに読む料金JSONファイル
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// 設定ファイル（省略時: ~/.config/rate-sheets/config.json）
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 有効な設定を表示して終了
    #[arg(long)]
    pub show_config: bool,

    /// 詳細ログを出力
    #[arg(short, long)]
    pub verbose: bool,
}
