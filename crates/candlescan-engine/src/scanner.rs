//! 스캔 오케스트레이터.
//!
//! 심볼 목록 조회 → 후보 필터 → 심볼별 캔들 조회 → 기준 캔들 선택 →
//! 후속 캔들 검증 → 현재가 조회 → 결과 누적의 순서로 한 번의 스캔을
//! 수행합니다.

use std::sync::Arc;
use std::time::Instant;

use candlescan_core::{
    MarketDataSource, ScanConfig, ScanInterval, ScanResult, ScanState, SourceError,
};
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use crate::filter::filter_candidates;
use crate::reference::select_reference;
use crate::stats::ScanStats;
use crate::validate::validate_follow_on;

/// 협력자가 구독하는 공유 스캔 상태 핸들.
pub type SharedScanState = Arc<RwLock<ScanState>>;

/// 스캔 오케스트레이터.
///
/// 스캔 상태를 소유하며, 상태 전이는 이 타입만 수행합니다. 협력자는
/// [`Scanner::state`]로 얻은 핸들을 통해 진행 중인 결과를 읽을 수
/// 있습니다.
pub struct Scanner {
    source: Arc<dyn MarketDataSource>,
    quote_asset: String,
    base_denylist: Vec<String>,
    state: SharedScanState,
}

impl Scanner {
    /// 새 스캐너 생성.
    pub fn new(source: Arc<dyn MarketDataSource>, config: &ScanConfig) -> Self {
        Self {
            source,
            quote_asset: config.quote_asset.clone(),
            base_denylist: config.base_denylist.clone(),
            state: Arc::new(RwLock::new(ScanState::new())),
        }
    }

    /// 공유 상태 핸들 반환 (읽기 전용 구독용).
    pub fn state(&self) -> SharedScanState {
        Arc::clone(&self.state)
    }

    /// 한 번의 스캔을 수행합니다.
    ///
    /// 후보를 한 번에 하나씩, 엄격하게 순차적으로 처리합니다. 서로 다른
    /// 심볼의 네트워크 조회가 동시에 진행되는 일은 없습니다. 이 순차성은
    /// 불변 조건입니다: 첫 조회 실패가 남은 후보 전체를 중단시키는 실패
    /// 정책은 순차 처리에서만 의미가 있으므로, 병렬화하려면 실패 정책을
    /// 먼저 재설계해야 합니다.
    ///
    /// 실패 정책: 어떤 조회든 한 번 실패하면 남은 후보를 모두 포기하고
    /// 스캔을 종료합니다. 그때까지 누적된 결과는 롤백하지 않고 그대로
    /// 유지합니다. 패턴 불일치(조용히 건너뜀)와 조회 실패(전체 중단)는
    /// 구분되어 보고되지 않습니다.
    ///
    /// 재진입 보호는 이 계층에 없습니다. 스캔 중복 실행 방지는 외부
    /// 트리거(CLI는 실행당 한 번의 스캔)가 책임집니다.
    pub async fn run(&self, interval: ScanInterval) -> ScanStats {
        let started = Instant::now();
        let mut stats = ScanStats::new();

        let scan_id = self.state.write().await.begin();
        info!(
            scan_id = %scan_id,
            interval = %interval,
            source = self.source.source_name(),
            "스캔 시작"
        );

        if let Err(e) = self.scan_candidates(interval, &mut stats).await {
            stats.aborted = true;
            error!(scan_id = %scan_id, error = %e, "스캔 중단, 누적된 결과는 유지");
        }

        self.state.write().await.finish();

        stats.elapsed = started.elapsed();
        stats
    }

    /// 후보 목록을 순회하며 패턴을 검사합니다.
    async fn scan_candidates(
        &self,
        interval: ScanInterval,
        stats: &mut ScanStats,
    ) -> Result<(), SourceError> {
        let prices = self.source.list_symbol_prices().await?;
        let candidates = filter_candidates(&prices, &self.quote_asset, &self.base_denylist);
        info!(
            listed = prices.len(),
            candidates = candidates.len(),
            "후보 페어 선별 완료"
        );

        for candidate in candidates {
            stats.total += 1;

            let candles = self.source.fetch_candles(&candidate.symbol, interval).await?;
            if candles.is_empty() {
                stats.empty += 1;
                debug!(symbol = %candidate.symbol, "캔들 없음");
                continue;
            }

            let Some(reference) = select_reference(&candles) else {
                stats.no_pattern += 1;
                continue;
            };

            if !validate_follow_on(&candles, &reference) {
                stats.no_pattern += 1;
                continue;
            }

            let current_price = self.source.fetch_price(&candidate.symbol).await?;

            let result = ScanResult {
                symbol: candidate.symbol.clone(),
                reference,
                current_price,
                candles,
                scanned_at: Utc::now(),
            };

            info!(
                symbol = %candidate.symbol,
                reference_index = result.reference.index,
                current_price = %current_price,
                "패턴 일치"
            );

            stats.matched += 1;
            self.state.write().await.push_result(result);
        }

        Ok(())
    }
}
