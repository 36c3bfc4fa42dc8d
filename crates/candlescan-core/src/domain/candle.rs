//! 캔들스틱 데이터 타입.
//!
//! 이 모듈은 하나의 시간 구간을 나타내는 OHLC 캔들을 정의합니다.
//! 캔들 시퀀스는 시간 오름차순의 `Vec<Candle>`로 다루며, 조회 이후에는
//! 변경되지 않습니다.

use crate::types::Price;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// OHLC 캔들스틱 데이터.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// 캔들 시작 시간
    pub open_time: DateTime<Utc>,
    /// 시가
    pub open: Price,
    /// 고가
    pub high: Price,
    /// 저가
    pub low: Price,
    /// 종가
    pub close: Price,
}

impl Candle {
    /// 새 캔들을 생성합니다.
    pub fn new(open_time: DateTime<Utc>, open: Price, high: Price, low: Price, close: Price) -> Self {
        Self {
            open_time,
            open,
            high,
            low,
            close,
        }
    }

    /// 캔들 몸통 크기(절대값)를 반환합니다.
    pub fn body_size(&self) -> Decimal {
        (self.close - self.open).abs()
    }

    /// 캔들 몸통의 중간 가격(시가와 종가의 평균)을 반환합니다.
    pub fn body_midpoint(&self) -> Decimal {
        (self.open + self.close) / Decimal::from(2)
    }

    /// 캔들 범위(고가 - 저가)를 반환합니다.
    pub fn range(&self) -> Decimal {
        self.high - self.low
    }

    /// 양봉(종가 > 시가)인지 확인합니다.
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// 음봉(종가 < 시가)인지 확인합니다.
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}
