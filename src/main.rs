/**
* filename : main
* author : HAMA
* date: 2025. 5. 8.
* description:
**/

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use xScan::config::{Config, DataSourceKind};
use xScan::market_data::{CsvDataProvider, HistoricalDataProvider, YahooChartProvider};
use xScan::report;
use xScan::scanner::{Scanner, Scheduler};
use xScan::utils::logging;
use xScan::ScannerError;

struct Args {
    once: bool,
    config_path: Option<PathBuf>,
}

fn parse_args() -> Result<Args, ScannerError> {
    let mut args = Args { once: false, config_path: None };
    let mut iter = std::env::args().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "once" => args.once = true,
            "--config" => {
                let path = iter
                    .next()
                    .ok_or_else(|| ScannerError::InvalidParameter("--config requires a path".to_string()))?;
                args.config_path = Some(PathBuf::from(path));
            }
            other => {
                return Err(ScannerError::InvalidParameter(format!("unknown argument: {}", other)));
            }
        }
    }

    Ok(args)
}

fn build_provider(config: &Config) -> Result<Arc<dyn HistoricalDataProvider>, ScannerError> {
    let source = &config.data_source;
    match source.kind {
        DataSourceKind::Yahoo => Ok(Arc::new(YahooChartProvider::new(source.base_url.clone(), source.timeout_ms)?)),
        DataSourceKind::Csv => {
            let dir = source
                .csv_dir
                .clone()
                .ok_or_else(|| ScannerError::ConfigError("data_source.csv_dir is not set".to_string()))?;
            Ok(Arc::new(CsvDataProvider::new(dir, ',')?))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = parse_args()?;

    // 설정 로드
    let (config, notices) = Config::load(args.config_path.as_deref())?;

    // 로깅 초기화 후 로드 중 메시지 출력
    logging::init(&config.logging.level)?;
    for notice in &notices {
        log::log!(notice.level, "{}", notice.message);
    }
    log::info!("기술 지표 스캐너 v{} 시작...", xScan::VERSION);

    let provider = build_provider(&config)?;
    let scanner = Scanner::from_config(provider, &config);
    let sink = report::build_sink(&config.output)?;

    let mut scheduler = Scheduler::new(
        scanner,
        config.scanner.tickers.clone(),
        Duration::from_secs(config.scanner.interval_secs),
        sink,
    );

    if args.once || config.scanner.run_once {
        scheduler.run_once().await;
        return Ok(());
    }

    // Ctrl-C 로 종료
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("종료 신호 수신, 현재 사이클 후 종료합니다");
            let _ = shutdown_tx.send(true);
        }
    });

    scheduler.run(shutdown_rx).await;

    Ok(())
}
