//! Binance 공개 시장 데이터 클라이언트.
//!
//! 스캔에 필요한 세 가지 공개 REST 엔드포인트만 사용합니다:
//! 전체 시세 목록, 캔들스틱 조회, 단일 심볼 현재가. 인증이 필요한
//! 엔드포인트는 호출하지 않습니다.

use candlescan_core::{Candle, Price, ScanInterval, SymbolPrice};
use chrono::DateTime;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::{ExchangeError, ExchangeResult};

// ============================================================================
// 설정
// ============================================================================

/// Binance 시장 데이터 클라이언트 설정.
#[derive(Debug, Clone)]
pub struct BinanceMarketConfig {
    /// REST API 기본 URL
    pub base_url: String,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
}

impl Default for BinanceMarketConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.binance.com".to_string(),
            timeout_secs: 30,
        }
    }
}

impl BinanceMarketConfig {
    /// 새 설정 생성.
    pub fn new() -> Self {
        Self::default()
    }

    /// 기본 URL 교체 (테스트 서버 지정용).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// 요청 타임아웃 설정.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

// ============================================================================
// API 응답 타입
// ============================================================================

#[derive(Debug, Deserialize)]
struct BinanceSymbolPrice {
    symbol: String,
    price: String,
}

#[derive(Debug, Deserialize)]
struct BinanceError {
    code: i32,
    msg: String,
}

/// 캔들 행의 원시 형태. 필드별 타입이 섞여 있어 값 단위로 투영한다.
type RawKline = Vec<Value>;

// ============================================================================
// Binance 클라이언트
// ============================================================================

/// Binance 공개 시장 데이터 클라이언트.
pub struct BinanceMarketClient {
    config: BinanceMarketConfig,
    client: Client,
}

impl BinanceMarketClient {
    /// 새 클라이언트 생성.
    ///
    /// # Errors
    /// HTTP 클라이언트 생성에 실패하면 `ExchangeError::NetworkError`를 반환합니다.
    pub fn new(config: BinanceMarketConfig) -> Result<Self, ExchangeError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ExchangeError::NetworkError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self { config, client })
    }

    /// 파라미터에서 쿼리 문자열 생성.
    fn build_query(params: &[(&str, String)]) -> String {
        params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// 공개 API 요청.
    async fn public_get<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> ExchangeResult<T> {
        let url = format!("{}{}", self.config.base_url, endpoint);
        let query = Self::build_query(params);

        let full_url = if query.is_empty() {
            url
        } else {
            format!("{}?{}", url, query)
        };

        debug!("GET {}", full_url);

        let response = self
            .client
            .get(&full_url)
            .send()
            .await
            .map_err(ExchangeError::from)?;

        self.handle_response(response).await
    }

    /// API 응답 처리.
    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> ExchangeResult<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ExchangeError::NetworkError(e.to_string()))?;

        if status.is_success() {
            serde_json::from_str(&body).map_err(|e| {
                error!("Failed to parse response: {} - Body: {}", e, body);
                ExchangeError::ParseError(e.to_string())
            })
        } else {
            // 에러 응답 파싱 시도
            if let Ok(error) = serde_json::from_str::<BinanceError>(&body) {
                Err(Self::map_error_code(error.code, &error.msg))
            } else {
                Err(ExchangeError::ApiError {
                    code: status.as_u16() as i32,
                    message: body,
                })
            }
        }
    }

    /// Binance 에러 코드를 ExchangeError로 매핑.
    fn map_error_code(code: i32, msg: &str) -> ExchangeError {
        match code {
            -1000 => ExchangeError::Unknown(msg.to_string()),
            -1001 => ExchangeError::NetworkError(msg.to_string()),
            -1003 => ExchangeError::RateLimited,
            -1121 => ExchangeError::SymbolNotFound(msg.to_string()),
            _ => ExchangeError::ApiError {
                code,
                message: msg.to_string(),
            },
        }
    }

    /// 문자열에서 Decimal 파싱 (실패 시 0).
    ///
    /// 일괄 시세 목록 전용. 항목 하나가 손상되어도 전체 목록 조회를
    /// 실패시키지 않고, 0 가격은 후보 필터의 양수 조건에서 걸러진다.
    fn parse_decimal_lenient(s: &str) -> Decimal {
        s.parse().unwrap_or(Decimal::ZERO)
    }

    /// 원시 캔들 행을 Candle로 투영.
    ///
    /// 필드 0(시작 시간), 1(시가), 2(고가), 3(저가), 4(종가)를 검사하며
    /// 필드가 부족하거나 숫자가 아니면 `MalformedCandle`을 반환한다.
    fn decode_candle(row: &[Value]) -> ExchangeResult<Candle> {
        if row.len() < 5 {
            return Err(ExchangeError::MalformedCandle(format!(
                "kline row has {} fields, expected at least 5",
                row.len()
            )));
        }

        let open_time_ms = row[0].as_i64().ok_or_else(|| {
            ExchangeError::MalformedCandle(format!("open time is not an integer: {}", row[0]))
        })?;
        let open_time = DateTime::from_timestamp_millis(open_time_ms).ok_or_else(|| {
            ExchangeError::MalformedCandle(format!("open time out of range: {}", open_time_ms))
        })?;

        Ok(Candle::new(
            open_time,
            Self::decode_price_field(&row[1], "open")?,
            Self::decode_price_field(&row[2], "high")?,
            Self::decode_price_field(&row[3], "low")?,
            Self::decode_price_field(&row[4], "close")?,
        ))
    }

    /// 캔들 행의 가격 필드 하나를 Decimal로 투영.
    fn decode_price_field(value: &Value, field: &str) -> ExchangeResult<Decimal> {
        let parsed = match value {
            Value::String(s) => s.parse::<Decimal>().ok(),
            Value::Number(n) => n.to_string().parse::<Decimal>().ok(),
            _ => None,
        };

        parsed.ok_or_else(|| {
            ExchangeError::MalformedCandle(format!("{} is not numeric: {}", field, value))
        })
    }

    // ========================================================================
    // 공개 엔드포인트
    // ========================================================================

    /// 전체 심볼의 현재가 목록 조회.
    pub async fn get_symbol_prices(&self) -> ExchangeResult<Vec<SymbolPrice>> {
        let resp: Vec<BinanceSymbolPrice> = self.public_get("/api/v3/ticker/price", &[]).await?;

        Ok(resp
            .into_iter()
            .map(|p| SymbolPrice::new(p.symbol, Self::parse_decimal_lenient(&p.price)))
            .collect())
    }

    /// 심볼의 캔들스틱 조회 (시간 오름차순).
    pub async fn get_klines(
        &self,
        symbol: &str,
        interval: ScanInterval,
        limit: Option<u32>,
    ) -> ExchangeResult<Vec<Candle>> {
        let limit_str = limit.unwrap_or(500).to_string();

        let resp: Vec<RawKline> = self
            .public_get(
                "/api/v3/klines",
                &[
                    ("symbol", symbol.to_string()),
                    ("interval", interval.to_binance_interval().to_string()),
                    ("limit", limit_str),
                ],
            )
            .await?;

        resp.iter().map(|row| Self::decode_candle(row)).collect()
    }

    /// 단일 심볼의 현재가 조회.
    pub async fn get_price(&self, symbol: &str) -> ExchangeResult<Price> {
        let resp: BinanceSymbolPrice = self
            .public_get("/api/v3/ticker/price", &[("symbol", symbol.to_string())])
            .await?;

        resp.price.parse().map_err(|_| {
            ExchangeError::ParseError(format!(
                "price for {} is not numeric: {}",
                resp.symbol, resp.price
            ))
        })
    }
}
