//! 캔들 패턴 스캐너 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 일봉 기준 전체 USDT 페어 스캔
//! candlescan scan
//!
//! # 12시간봉으로 스캔, 결과를 JSON 파일로 저장
//! candlescan scan --interval 12h --format json --output results.json
//!
//! # 스캔 대상 후보 페어 목록 확인
//! candlescan pairs --limit 50
//! ```

use std::sync::Arc;

use candlescan_core::{ScanConfig, ScanInterval};
use candlescan_engine::{filter_candidates, Scanner};
use candlescan_exchange::{BinanceMarketClient, BinanceMarketConfig, BinanceMarketSource};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod output;

use output::OutputFormat;

#[derive(Parser)]
#[command(name = "candlescan")]
#[command(about = "CandleScan - Binance USDT 페어 캔들 패턴 스캐너", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// 캔들 패턴 스캔 실행
    Scan {
        /// 캔들 간격 (1h, 6h, 12h, 1d, 1w, 1M; 그 외 입력은 1d로 대체)
        #[arg(short, long)]
        interval: Option<String>,

        /// 호가 자산 접미사 (기본: USDT)
        #[arg(short, long)]
        quote: Option<String>,

        /// 출력 형식 (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// 출력 파일 경로 (지정하지 않으면 stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// 스캔 대상 후보 페어 목록 조회
    Pairs {
        /// 호가 자산 접미사 (기본: USDT)
        #[arg(short, long)]
        quote: Option<String>,

        /// 최대 결과 수 (0 = 무제한)
        #[arg(long, default_value = "0")]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // 로깅 초기화
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("CandleScan 시작");

    // 설정 로드
    let mut config = ScanConfig::from_env();

    match cli.command {
        Commands::Scan {
            interval,
            quote,
            format,
            output,
        } => {
            if let Some(q) = quote {
                config.quote_asset = q.to_uppercase();
            }

            let interval = interval
                .map(|s| ScanInterval::parse_or_default(&s))
                .unwrap_or(config.default_interval);

            let format = OutputFormat::parse(&format)?;

            run_scan(&config, interval, format, output.as_deref()).await?;
        }

        Commands::Pairs { quote, limit } => {
            if let Some(q) = quote {
                config.quote_asset = q.to_uppercase();
            }

            list_pairs(&config, limit).await?;
        }
    }

    tracing::info!("CandleScan 종료");

    Ok(())
}

/// 한 번의 패턴 스캔을 실행하고 결과를 출력합니다.
async fn run_scan(
    config: &ScanConfig,
    interval: ScanInterval,
    format: OutputFormat,
    output_path: Option<&str>,
) -> anyhow::Result<()> {
    let source = build_source(config)?;
    let scanner = Scanner::new(source, config);

    info!(interval = %interval, quote = %config.quote_asset, "패턴 스캔 시작");

    // 스캔이 도는 동안 로딩 표시
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message("데이터 조회 중...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(120));

    let stats = scanner.run(interval).await;

    spinner.finish_and_clear();
    stats.log_summary("패턴 스캔");

    let state = scanner.state();
    let state = state.read().await;

    output::render_scan_results(&state.results, format, output_path)?;

    if stats.aborted {
        println!("\n⚠️  스캔이 중간에 중단되었습니다. 위 결과는 중단 시점까지의 부분 결과입니다.");
    }

    Ok(())
}

/// 후보 필터를 통과하는 페어 목록을 출력합니다.
async fn list_pairs(config: &ScanConfig, limit: usize) -> anyhow::Result<()> {
    let client = build_client(config)?;

    let prices = client.get_symbol_prices().await?;
    let candidates = filter_candidates(&prices, &config.quote_asset, &config.base_denylist);

    info!(
        listed = prices.len(),
        candidates = candidates.len(),
        "후보 페어 조회 완료"
    );

    println!("{}", output::render_pairs(&candidates, limit));

    Ok(())
}

/// 설정으로부터 Binance 클라이언트 생성.
fn build_client(config: &ScanConfig) -> anyhow::Result<BinanceMarketClient> {
    let market_config = BinanceMarketConfig::new()
        .with_base_url(config.base_url.clone())
        .with_timeout_secs(config.timeout_secs);

    Ok(BinanceMarketClient::new(market_config)?)
}

/// 설정으로부터 스캔용 데이터 소스 생성.
fn build_source(config: &ScanConfig) -> anyhow::Result<Arc<BinanceMarketSource>> {
    let client = build_client(config)?;
    Ok(Arc::new(BinanceMarketSource::from_client(
        client,
        config.kline_limit,
    )))
}
