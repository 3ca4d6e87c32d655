/**
* filename : scheduler
* author : HAMA
* date: 2025. 5. 12.
* description: 고정 주기 스캔 루프
**/

use std::time::Duration;
use tokio::sync::watch;

use crate::models::record::CycleReport;
use crate::report::ReportSink;
use crate::utils::logging;
use super::Scanner;

pub struct Scheduler {
  scanner: Scanner,
  tickers: Vec<String>,
  interval: Duration,
  sink: Box<dyn ReportSink>,
  cycles: u64,
}

impl Scheduler {
  pub fn new(scanner: Scanner, tickers: Vec<String>, interval: Duration, sink: Box<dyn ReportSink>) -> Self {
    Scheduler {
      scanner,
      tickers,
      interval,
      sink,
      cycles: 0,
    }
  }

  pub fn cycles_completed(&self) -> u64 {
    self.cycles
  }

  /// 한 사이클 실행 후 싱크로 출력. 출력 실패는 로그만 남긴다.
  pub async fn run_once(&mut self) -> CycleReport {
    let cycle = self.cycles + 1;
    logging::log_cycle_start(cycle, self.tickers.len());

    let report = self.scanner.run_cycle(&self.tickers).await;
    self.cycles = cycle;

    logging::log_cycle_end(cycle, report.len(), report.skipped, report.failed);

    if let Err(e) = self.sink.emit(&report) {
      log::error!("결과 출력 실패 (사이클 #{}): {}", cycle, e);
    }

    report
  }

  /// 종료 신호가 올 때까지 `interval` 간격으로 반복.
  ///
  /// 진행 중인 사이클은 끝까지 돌고, 대기 중에만 종료를 확인한다.
  pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) {
    log::info!(
      "스케줄러 시작 - 제공자: {} - 종목 수: {} - 주기: {}초",
      self.scanner.provider_name(),
      self.tickers.len(),
      self.interval.as_secs()
    );

    loop {
      if *shutdown.borrow() {
        break;
      }

      self.run_once().await;

      tokio::select! {
        _ = tokio::time::sleep(self.interval) => {}
        changed = shutdown.changed() => {
          // 송신 측이 사라져도 종료
          if changed.is_err() || *shutdown.borrow() {
            break;
          }
        }
      }
    }

    log::info!("스케줄러 종료 - 완료된 사이클: {}", self.cycles);
  }
}
