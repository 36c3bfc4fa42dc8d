//! 시장 데이터 소스 추상화.
//!
//! 심볼 목록, 캔들 시리즈, 현재가 조회를 위한 거래소 중립적인
//! 인터페이스를 제공합니다. 스캔 엔진은 이 trait에만 의존합니다.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Candle;
use crate::types::{Price, ScanInterval};

// =============================================================================
// 에러 타입
// =============================================================================

/// MarketDataSource 에러.
#[derive(Debug, Error)]
pub enum SourceError {
    /// 네트워크 에러
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// API 에러
    #[error("API 에러: {0}")]
    Api(String),

    /// 파싱 에러
    #[error("파싱 에러: {0}")]
    Parse(String),

    /// 손상된 응답 데이터
    #[error("손상된 데이터: {0}")]
    MalformedData(String),

    /// 기타 에러
    #[error("기타 에러: {0}")]
    Other(String),
}

// =============================================================================
// 심볼 시세
// =============================================================================

/// 전체 시세 목록의 한 항목: 심볼과 현재가.
///
/// `symbol`은 거래소 표기 형식("ADAUSDT")을 그대로 사용합니다. 일괄 시세
/// 응답에서 가격 파싱에 실패한 항목은 0으로 내려오며, 후보 필터의
/// 양수 조건에서 걸러집니다.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolPrice {
    /// 거래소 표기 심볼 (예: "ADAUSDT")
    pub symbol: String,
    /// 현재가
    pub price: Price,
}

impl SymbolPrice {
    /// 새 심볼 시세를 생성합니다.
    pub fn new(symbol: impl Into<String>, price: Price) -> Self {
        Self {
            symbol: symbol.into(),
            price,
        }
    }
}

// =============================================================================
// MarketDataSource Trait
// =============================================================================

/// 시장 데이터 제공자 trait.
///
/// 스캔에 필요한 세 가지 읽기 전용 조회를 제공합니다. 각 데이터 소스별로
/// 이 trait를 구현하여 소스 중립적인 스캔 코드를 작성할 수 있습니다.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// 전체 심볼의 현재가 목록 조회.
    ///
    /// # Errors
    ///
    /// - `SourceError::Network`: 네트워크 연결 실패
    /// - `SourceError::Api`: 데이터 소스 API 에러
    async fn list_symbol_prices(&self) -> Result<Vec<SymbolPrice>, SourceError>;

    /// 심볼의 캔들 시리즈 조회 (시간 오름차순).
    ///
    /// # Errors
    ///
    /// - `SourceError::Network`: 네트워크 연결 실패
    /// - `SourceError::Api`: 데이터 소스 API 에러
    /// - `SourceError::MalformedData`: 캔들 행이 손상된 경우
    async fn fetch_candles(
        &self,
        symbol: &str,
        interval: ScanInterval,
    ) -> Result<Vec<Candle>, SourceError>;

    /// 단일 심볼의 현재가 조회.
    ///
    /// # Errors
    ///
    /// - `SourceError::Network`: 네트워크 연결 실패
    /// - `SourceError::Api`: 데이터 소스 API 에러
    /// - `SourceError::Parse`: 가격 필드가 숫자가 아닌 경우
    async fn fetch_price(&self, symbol: &str) -> Result<Price, SourceError>;

    /// 데이터 소스 이름 반환.
    ///
    /// 로깅 및 디버깅 목적으로 사용됩니다.
    fn source_name(&self) -> &str;
}

// =============================================================================
// 테스트
// =============================================================================
