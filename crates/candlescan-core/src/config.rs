//! 환경변수 기반 설정 모듈.
//!
//! 스캔에 필요한 설정을 환경변수에서 읽어옵니다. 모든 항목에 기본값이
//! 있으므로 환경변수 없이도 동작합니다. 패턴 상수(기준 윈도우, 후행
//! 제외 수, 종가 하한 비율)는 설정이 아니라 엔진의 고정 상수입니다.

use crate::types::ScanInterval;

/// 기본 호가 자산.
pub const DEFAULT_QUOTE_ASSET: &str = "USDT";

/// 기본 기준 자산 제외 목록.
///
/// 주요 코인이 기준 자산인 페어는 스캔 대상에서 제외합니다.
pub const DEFAULT_BASE_DENYLIST: [&str; 3] = ["BTC", "ETH", "BNB"];

/// 스캔 전체 설정.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// 거래소 REST API 기본 URL
    pub base_url: String,
    /// HTTP 요청 타임아웃 (초)
    pub timeout_secs: u64,
    /// 호가 자산 접미사 (예: "USDT")
    pub quote_asset: String,
    /// 제외할 기준 자산 접두사 목록
    pub base_denylist: Vec<String>,
    /// 심볼당 조회할 최대 캔들 수
    pub kline_limit: u32,
    /// 기본 스캔 간격
    pub default_interval: ScanInterval,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.binance.com".to_string(),
            timeout_secs: 30,
            quote_asset: DEFAULT_QUOTE_ASSET.to_string(),
            base_denylist: DEFAULT_BASE_DENYLIST
                .iter()
                .map(|s| s.to_string())
                .collect(),
            kline_limit: 500,
            default_interval: ScanInterval::D1,
        }
    }
}

impl ScanConfig {
    /// 환경변수에서 설정 로드.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        Self {
            base_url: std::env::var("SCAN_BINANCE_BASE_URL").unwrap_or(defaults.base_url),
            timeout_secs: env_var_parse("SCAN_HTTP_TIMEOUT_SECS", defaults.timeout_secs),
            quote_asset: std::env::var("SCAN_QUOTE_ASSET").unwrap_or(defaults.quote_asset),
            base_denylist: env_var_list("SCAN_BASE_DENYLIST", defaults.base_denylist),
            kline_limit: env_var_parse("SCAN_KLINE_LIMIT", defaults.kline_limit),
            default_interval: std::env::var("SCAN_DEFAULT_INTERVAL")
                .map(|v| ScanInterval::parse_or_default(&v))
                .unwrap_or(defaults.default_interval),
        }
    }
}

/// 환경변수에서 값을 파싱 (실패 시 기본값 사용)
fn env_var_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// 환경변수에서 쉼표로 구분된 목록 파싱 (실패 시 기본값 사용)
fn env_var_list(key: &str, default: Vec<String>) -> Vec<String> {
    match std::env::var(key) {
        Ok(v) => {
            let items: Vec<String> = v
                .split(',')
                .map(|s| s.trim().to_uppercase())
                .filter(|s| !s.is_empty())
                .collect();
            if items.is_empty() {
                default
            } else {
                items
            }
        }
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScanConfig::default();
        assert_eq!(config.quote_asset, "USDT");
        assert_eq!(config.base_denylist, vec!["BTC", "ETH", "BNB"]);
        assert_eq!(config.kline_limit, 500);
        assert_eq!(config.default_interval, ScanInterval::D1);
        assert_eq!(config.base_url, "https://api.binance.com");
    }

    #[test]
    fn test_env_var_parse_fallback() {
        // 존재하지 않는 키는 기본값으로
        assert_eq!(env_var_parse("CANDLESCAN_TEST_MISSING_KEY", 42u32), 42);
    }

    #[test]
    fn test_env_var_list() {
        std::env::set_var("CANDLESCAN_TEST_DENYLIST", "sol, doge ,");
        let items = env_var_list("CANDLESCAN_TEST_DENYLIST", vec!["BTC".to_string()]);
        assert_eq!(items, vec!["SOL", "DOGE"]);
        std::env::remove_var("CANDLESCAN_TEST_DENYLIST");
    }
}
