//! Binance MarketDataSource 구현.

use crate::client::BinanceMarketClient;
use crate::ExchangeError;
use async_trait::async_trait;
use candlescan_core::{Candle, MarketDataSource, Price, ScanInterval, SourceError, SymbolPrice};
use std::sync::Arc;

/// Binance MarketDataSource 구현.
///
/// BinanceMarketClient를 래핑하여 소스 중립적인 MarketDataSource
/// 인터페이스를 제공합니다.
pub struct BinanceMarketSource {
    client: Arc<BinanceMarketClient>,
    /// 심볼당 조회할 최대 캔들 수
    kline_limit: u32,
}

impl BinanceMarketSource {
    /// 새 BinanceMarketSource 생성.
    pub fn new(client: Arc<BinanceMarketClient>, kline_limit: u32) -> Self {
        Self {
            client,
            kline_limit,
        }
    }

    /// BinanceMarketClient에서 생성.
    pub fn from_client(client: BinanceMarketClient, kline_limit: u32) -> Self {
        Self::new(Arc::new(client), kline_limit)
    }

    /// ExchangeError를 소스 중립 에러로 변환.
    fn map_error(err: ExchangeError) -> SourceError {
        match err {
            ExchangeError::NetworkError(m) | ExchangeError::Timeout(m) => SourceError::Network(m),
            ExchangeError::ParseError(m) => SourceError::Parse(m),
            ExchangeError::MalformedCandle(m) => SourceError::MalformedData(m),
            other => SourceError::Api(other.to_string()),
        }
    }
}

#[async_trait]
impl MarketDataSource for BinanceMarketSource {
    async fn list_symbol_prices(&self) -> Result<Vec<SymbolPrice>, SourceError> {
        self.client
            .get_symbol_prices()
            .await
            .map_err(Self::map_error)
    }

    async fn fetch_candles(
        &self,
        symbol: &str,
        interval: ScanInterval,
    ) -> Result<Vec<Candle>, SourceError> {
        self.client
            .get_klines(symbol, interval, Some(self.kline_limit))
            .await
            .map_err(Self::map_error)
    }

    async fn fetch_price(&self, symbol: &str) -> Result<Price, SourceError> {
        self.client.get_price(symbol).await.map_err(Self::map_error)
    }

    fn source_name(&self) -> &str {
        "binance"
    }
}
