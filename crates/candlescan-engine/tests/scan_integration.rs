//! 스캔 오케스트레이터 통합 테스트.
//!
//! 메모리 내 MarketDataSource 대역으로 전체 스캔 흐름을 검증한다.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use candlescan_core::{
    Candle, MarketDataSource, Price, ScanConfig, ScanInterval, ScanPhase, SourceError, SymbolPrice,
};
use candlescan_engine::Scanner;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// 심볼별로 준비된 응답을 돌려주는 테스트 소스.
struct ScriptedSource {
    prices: Vec<SymbolPrice>,
    candles: HashMap<String, Vec<Candle>>,
    spot_prices: HashMap<String, Price>,
    fail_candles_for: Option<String>,
}

impl ScriptedSource {
    fn new(prices: Vec<SymbolPrice>) -> Self {
        Self {
            prices,
            candles: HashMap::new(),
            spot_prices: HashMap::new(),
            fail_candles_for: None,
        }
    }

    fn with_candles(mut self, symbol: &str, candles: Vec<Candle>) -> Self {
        self.candles.insert(symbol.to_string(), candles);
        self
    }

    fn with_spot_price(mut self, symbol: &str, price: Price) -> Self {
        self.spot_prices.insert(symbol.to_string(), price);
        self
    }

    fn with_candle_failure(mut self, symbol: &str) -> Self {
        self.fail_candles_for = Some(symbol.to_string());
        self
    }
}

#[async_trait]
impl MarketDataSource for ScriptedSource {
    async fn list_symbol_prices(&self) -> Result<Vec<SymbolPrice>, SourceError> {
        Ok(self.prices.clone())
    }

    async fn fetch_candles(
        &self,
        symbol: &str,
        _interval: ScanInterval,
    ) -> Result<Vec<Candle>, SourceError> {
        if self.fail_candles_for.as_deref() == Some(symbol) {
            return Err(SourceError::Network("connection reset".to_string()));
        }
        Ok(self.candles.get(symbol).cloned().unwrap_or_default())
    }

    async fn fetch_price(&self, symbol: &str) -> Result<Price, SourceError> {
        Ok(self
            .spot_prices
            .get(symbol)
            .copied()
            .unwrap_or_else(|| dec!(1)))
    }

    fn source_name(&self) -> &str {
        "scripted"
    }
}

/// (시가, 종가) 목록으로 시리즈 생성.
fn series_from(bodies: &[(Decimal, Decimal)]) -> Vec<Candle> {
    let start = Utc::now() - Duration::days(bodies.len() as i64);
    bodies
        .iter()
        .enumerate()
        .map(|(i, (open, close))| {
            Candle::new(
                start + Duration::days(i as i64),
                *open,
                (*open).max(*close),
                (*open).min(*close),
                *close,
            )
        })
        .collect()
}

/// 인덱스 13에 기준 캔들(100 → 120), 이후 캔들이 밴드 안에 머무는
/// 20캔들 시리즈.
fn matching_series() -> Vec<Candle> {
    let mut bodies = vec![(dec!(100), dec!(100)); 20];
    bodies[13] = (dec!(100), dec!(120));
    for body in bodies.iter_mut().take(20).skip(14) {
        *body = (dec!(115), dec!(118));
    }
    series_from(&bodies)
}

/// 양봉이 전혀 없는 시리즈.
fn flat_series() -> Vec<Candle> {
    series_from(&vec![(dec!(100), dec!(100)); 20])
}

/// 기준 캔들은 있으나 후속 캔들이 밴드를 이탈하는 시리즈.
fn broken_follow_on_series() -> Vec<Candle> {
    let mut bodies = vec![(dec!(100), dec!(100)); 20];
    bodies[13] = (dec!(100), dec!(120));
    bodies[14] = (dec!(108), dec!(115)); // 시가가 mid(110) 아래
    for body in bodies.iter_mut().take(20).skip(15) {
        *body = (dec!(115), dec!(118));
    }
    series_from(&bodies)
}

fn scan_config() -> ScanConfig {
    ScanConfig::default()
}

#[tokio::test]
async fn test_scan_collects_only_matching_symbols() {
    let source = ScriptedSource::new(vec![
        SymbolPrice::new("AAAUSDT", dec!(1.0)),
        SymbolPrice::new("BBBUSDT", dec!(2.0)),
        SymbolPrice::new("CCCUSDT", dec!(3.0)),
        SymbolPrice::new("BTCUSDT", dec!(50000)), // 제외 목록
        SymbolPrice::new("DDDBUSD", dec!(4.0)),   // 다른 호가 자산
        SymbolPrice::new("EEEUSDT", Decimal::ZERO), // 가격 0
    ])
    .with_candles("AAAUSDT", matching_series())
    .with_candles("BBBUSDT", flat_series())
    .with_candles("CCCUSDT", broken_follow_on_series())
    .with_spot_price("AAAUSDT", dec!(118.5));

    let scanner = Scanner::new(Arc::new(source), &scan_config());
    let stats = scanner.run(ScanInterval::D1).await;

    assert_eq!(stats.total, 3);
    assert_eq!(stats.matched, 1);
    assert_eq!(stats.no_pattern, 2);
    assert_eq!(stats.empty, 0);
    assert!(!stats.aborted);

    let state = scanner.state();
    let state = state.read().await;
    assert_eq!(state.phase, ScanPhase::Idle);
    assert!(state.scan_id.is_some());
    assert_eq!(state.results.len(), 1);

    let result = &state.results[0];
    assert_eq!(result.symbol, "AAAUSDT");
    assert_eq!(result.reference.index, 13);
    assert_eq!(result.reference.open, dec!(100));
    assert_eq!(result.reference.close, dec!(120));
    assert_eq!(result.current_price, dec!(118.5));
    // 전체 시리즈가 결과에 보존된다
    assert_eq!(result.candles.len(), 20);
}

#[tokio::test]
async fn test_fetch_failure_aborts_remaining_symbols() {
    let source = ScriptedSource::new(vec![
        SymbolPrice::new("AAAUSDT", dec!(1.0)),
        SymbolPrice::new("FAILUSDT", dec!(2.0)),
        SymbolPrice::new("ZZZUSDT", dec!(3.0)),
    ])
    .with_candles("AAAUSDT", matching_series())
    .with_candles("ZZZUSDT", matching_series())
    .with_candle_failure("FAILUSDT");

    let scanner = Scanner::new(Arc::new(source), &scan_config());
    let stats = scanner.run(ScanInterval::D1).await;

    // 실패한 후보까지 시작했지만, 그 이후는 처리하지 않는다
    assert!(stats.aborted);
    assert_eq!(stats.total, 2);
    assert_eq!(stats.matched, 1);

    // 실패 이전에 누적된 결과는 유지된다
    let state = scanner.state();
    let state = state.read().await;
    assert_eq!(state.phase, ScanPhase::Idle);
    assert_eq!(state.results.len(), 1);
    assert_eq!(state.results[0].symbol, "AAAUSDT");
}

#[tokio::test]
async fn test_empty_series_is_counted_not_matched() {
    let source = ScriptedSource::new(vec![SymbolPrice::new("AAAUSDT", dec!(1.0))]);
    // 캔들을 등록하지 않으면 빈 시리즈가 내려온다

    let scanner = Scanner::new(Arc::new(source), &scan_config());
    let stats = scanner.run(ScanInterval::D1).await;

    assert_eq!(stats.total, 1);
    assert_eq!(stats.empty, 1);
    assert_eq!(stats.matched, 0);
    assert!(!stats.aborted);

    let state = scanner.state();
    assert!(state.read().await.results.is_empty());
}

#[tokio::test]
async fn test_new_scan_replaces_previous_results() {
    let source = ScriptedSource::new(vec![SymbolPrice::new("AAAUSDT", dec!(1.0))])
        .with_candles("AAAUSDT", matching_series());

    let scanner = Scanner::new(Arc::new(source), &scan_config());

    scanner.run(ScanInterval::D1).await;
    let first_id = scanner.state().read().await.scan_id;

    scanner.run(ScanInterval::D1).await;
    let state = scanner.state();
    let state = state.read().await;

    // 결과는 누적되지 않고 교체된다
    assert_eq!(state.results.len(), 1);
    assert_ne!(state.scan_id, first_id);
}

#[tokio::test]
async fn test_state_handle_is_shared() {
    let source = ScriptedSource::new(vec![SymbolPrice::new("AAAUSDT", dec!(1.0))])
        .with_candles("AAAUSDT", matching_series());

    let scanner = Scanner::new(Arc::new(source), &scan_config());

    // 스캔 전에 얻어 둔 핸들로도 스캔 후의 결과가 보인다
    let handle = scanner.state();
    assert!(handle.read().await.results.is_empty());

    scanner.run(ScanInterval::D1).await;

    let state = handle.read().await;
    assert_eq!(state.results.len(), 1);
    assert_eq!(state.phase, ScanPhase::Idle);
}
