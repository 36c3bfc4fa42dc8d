//! 스캔 상태 및 결과 타입.
//!
//! 이 모듈은 한 번의 스캔이 만들어내는 값 타입을 정의합니다:
//! - `ReferenceCandle` - 패턴의 기준이 되는 캔들
//! - `ScanResult` - 패턴과 일치한 심볼 한 건
//! - `ScanState` - 오케스트레이터가 소유하는 명시적 스캔 상태

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Candle;
use crate::types::Price;

/// 시리즈에서 선택된 기준 캔들.
///
/// 기준 캔들의 OHLC 사본과 시리즈 전체 기준의 절대 인덱스를 담습니다.
/// 선택기가 성공했을 때에만 존재합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceCandle {
    /// 시가
    pub open: Price,
    /// 고가
    pub high: Price,
    /// 저가
    pub low: Price,
    /// 종가
    pub close: Price,
    /// 시리즈 내 절대 인덱스
    pub index: usize,
}

impl ReferenceCandle {
    /// 시리즈의 한 캔들로부터 기준 캔들을 생성합니다.
    pub fn from_candle(candle: &Candle, index: usize) -> Self {
        Self {
            open: candle.open,
            high: candle.high,
            low: candle.low,
            close: candle.close,
            index,
        }
    }

    /// 기준 캔들 몸통의 중간 가격(시가와 종가의 평균)을 반환합니다.
    pub fn body_midpoint(&self) -> Price {
        (self.open + self.close) / Price::from(2)
    }
}

/// 선택기와 검증기를 모두 통과한 심볼 한 건의 스캔 결과.
///
/// 생성 이후 변경되지 않으며, 스캔 완료 순서대로 결과 목록에 쌓입니다.
/// `current_price`는 캔들 시리즈와 별도로 조회되므로 시리즈와 원자적으로
/// 일치하지 않습니다. `candles`는 이후 차트 표시용으로 보관하는 전체
/// 시리즈이며, 검증 자체에는 사용되지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// 거래소 표기 심볼 (예: "ADAUSDT")
    pub symbol: String,
    /// 선택된 기준 캔들
    pub reference: ReferenceCandle,
    /// 스캔 시점의 현재가
    pub current_price: Price,
    /// 조회된 전체 캔들 시리즈
    pub candles: Vec<Candle>,
    /// 결과 생성 시각
    pub scanned_at: DateTime<Utc>,
}

/// 스캔 진행 단계.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanPhase {
    /// 스캔이 요청되지 않은 상태
    Idle,
    /// 심볼 목록 조회 및 후보 순회 중
    Scanning,
}

/// 오케스트레이터가 소유하는 스캔 상태.
///
/// 상태 전이는 오케스트레이터만 수행합니다: `begin`이 이전 결과를 비우고
/// `Scanning`으로 전이하며, `push_result`가 결과를 추가하고, `finish`가
/// 결과를 유지한 채 `Idle`로 돌아갑니다. 협력자는 공유 핸들을 통해
/// 읽기만 합니다.
#[derive(Debug, Clone)]
pub struct ScanState {
    /// 현재 단계
    pub phase: ScanPhase,
    /// 진행 중이거나 마지막으로 완료된 스캔의 식별자
    pub scan_id: Option<Uuid>,
    /// 스캔 완료 순서대로 쌓이는 결과 목록
    pub results: Vec<ScanResult>,
}

impl ScanState {
    /// 새 유휴 상태를 생성합니다.
    pub fn new() -> Self {
        Self {
            phase: ScanPhase::Idle,
            scan_id: None,
            results: Vec::new(),
        }
    }

    /// 스캔 시작: 이전 결과를 비우고 `Scanning`으로 전이합니다.
    ///
    /// 새로 발급한 스캔 식별자를 반환합니다.
    pub fn begin(&mut self) -> Uuid {
        let scan_id = Uuid::new_v4();
        self.phase = ScanPhase::Scanning;
        self.scan_id = Some(scan_id);
        self.results.clear();
        scan_id
    }

    /// 결과 한 건을 추가합니다.
    pub fn push_result(&mut self, result: ScanResult) {
        self.results.push(result);
    }

    /// 스캔 종료: 결과를 유지한 채 `Idle`로 돌아갑니다.
    pub fn finish(&mut self) {
        self.phase = ScanPhase::Idle;
    }

    /// 스캔 진행 중인지 확인합니다.
    pub fn is_scanning(&self) -> bool {
        self.phase == ScanPhase::Scanning
    }
}

impl Default for ScanState {
    fn default() -> Self {
        Self::new()
    }
}
