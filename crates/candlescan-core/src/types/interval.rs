//! 캔들스틱 조회에 사용되는 스캔 간격 정의.
//!
//! 스캐너가 허용하는 여섯 가지 시간 간격을 정의합니다. 허용되지 않는
//! 입력은 일봉으로 대체됩니다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// 스캔에 사용되는 캔들스틱 간격.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanInterval {
    /// 1시간봉
    H1,
    /// 6시간봉
    H6,
    /// 12시간봉
    H12,
    /// 일봉
    D1,
    /// 주봉
    W1,
    /// 월봉
    MN1,
}

impl ScanInterval {
    /// 이 간격의 기간을 반환합니다.
    pub fn duration(&self) -> Duration {
        match self {
            ScanInterval::H1 => Duration::from_secs(60 * 60),
            ScanInterval::H6 => Duration::from_secs(6 * 60 * 60),
            ScanInterval::H12 => Duration::from_secs(12 * 60 * 60),
            ScanInterval::D1 => Duration::from_secs(24 * 60 * 60),
            ScanInterval::W1 => Duration::from_secs(7 * 24 * 60 * 60),
            ScanInterval::MN1 => Duration::from_secs(30 * 24 * 60 * 60), // 근사값
        }
    }

    /// 바이낸스 간격 문자열로 변환합니다.
    pub fn to_binance_interval(&self) -> &'static str {
        match self {
            ScanInterval::H1 => "1h",
            ScanInterval::H6 => "6h",
            ScanInterval::H12 => "12h",
            ScanInterval::D1 => "1d",
            ScanInterval::W1 => "1w",
            ScanInterval::MN1 => "1M",
        }
    }

    /// 바이낸스 간격 문자열에서 파싱합니다.
    pub fn from_binance_interval(s: &str) -> Option<Self> {
        match s {
            "1h" => Some(ScanInterval::H1),
            "6h" => Some(ScanInterval::H6),
            "12h" => Some(ScanInterval::H12),
            "1d" => Some(ScanInterval::D1),
            "1w" => Some(ScanInterval::W1),
            "1M" => Some(ScanInterval::MN1),
            _ => None,
        }
    }

    /// 문자열에서 파싱하되, 허용되지 않는 입력은 일봉으로 대체합니다.
    pub fn parse_or_default(s: &str) -> Self {
        Self::from_binance_interval(s).unwrap_or(ScanInterval::D1)
    }
}

impl Default for ScanInterval {
    fn default() -> Self {
        ScanInterval::D1
    }
}

impl fmt::Display for ScanInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_binance_interval())
    }
}

impl FromStr for ScanInterval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_binance_interval(s).ok_or_else(|| format!("Invalid interval: {}", s))
    }
}
