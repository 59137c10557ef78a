use clap::Parser;
use rate_sheets::{cli, config, error, report, source};
use cli::Cli;
use config::Config;
use error::Result;
use report::ReportSummary;
use source::{JsonFileSource, MySqlRateSource};
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("rate sheet generation failed: {}", e);
            eprintln!("✖ 料金表の生成に失敗しました: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    if cli.show_config {
        println!("設定:");
        for line in config.display_lines() {
            println!("{}", line);
        }
        return Ok(());
    }

    let client_id = cli.client_id.unwrap_or(config.default_client_id);
    let output_dir = cli.output.unwrap_or_else(|| config.output_dir.clone());

    println!("📦 rate-sheets - クライアント {}\n", client_id);

    let summary = match cli.input {
        Some(path) => {
            println!("[1/2] 料金データを読み込み中... ({})", path.display());
            let source = JsonFileSource::new(path);
            report::generate_report(&source, client_id, &output_dir).await?
        }
        None => {
            println!(
                "[1/2] 料金データを取得中... ({}:{}/{})",
                config.database.host, config.database.port, config.database.database
            );
            let source = MySqlRateSource::new(&config.database)?;
            report::generate_report(&source, client_id, &output_dir).await?
        }
    };

    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &ReportSummary) {
    println!("[2/2] Excelを出力しました");
    for speed in &summary.sheets_written {
        println!("  ✔ {}", speed.sheet_title());
    }
    for speed in &summary.sheets_skipped {
        println!("  - {}（データなし）", speed.sheet_title());
    }
    println!(
        "\n✅ クライアント {} の料金表を {} に出力しました",
        summary.client_id,
        summary.output_path.display()
    );
}
