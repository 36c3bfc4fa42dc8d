//! 후보 페어 필터.

use candlescan_core::SymbolPrice;
use rust_decimal::Decimal;

/// 전체 시세 목록에서 스캔 후보를 선별합니다.
///
/// 다음 조건을 모두 만족하는 항목만 유지합니다:
/// - 심볼이 호가 자산 접미사로 끝난다 (예: "USDT")
/// - 심볼이 제외 목록의 기준 자산 접두사로 시작하지 않는다
/// - 가격이 0보다 크다 (손상되었거나 비어 있는 항목 제거)
///
/// 입력 순서를 유지하는 부분 수열을 반환합니다.
pub fn filter_candidates(
    prices: &[SymbolPrice],
    quote_asset: &str,
    base_denylist: &[String],
) -> Vec<SymbolPrice> {
    prices
        .iter()
        .filter(|entry| {
            entry.symbol.ends_with(quote_asset)
                && !base_denylist
                    .iter()
                    .any(|prefix| entry.symbol.starts_with(prefix.as_str()))
                && entry.price > Decimal::ZERO
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn denylist() -> Vec<String> {
        vec!["BTC".to_string(), "ETH".to_string(), "BNB".to_string()]
    }

    #[test]
    fn test_quote_suffix_required() {
        let prices = vec![
            SymbolPrice::new("ADAUSDT", dec!(0.5)),
            SymbolPrice::new("ADABUSD", dec!(0.5)),
            SymbolPrice::new("ADAEUR", dec!(0.46)),
        ];

        let result = filter_candidates(&prices, "USDT", &denylist());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].symbol, "ADAUSDT");
    }

    #[test]
    fn test_denylisted_base_excluded() {
        // BTCUSDT는 가격과 무관하게 항상 제외된다
        let prices = vec![
            SymbolPrice::new("BTCUSDT", dec!(50000)),
            SymbolPrice::new("ETHUSDT", dec!(3000)),
            SymbolPrice::new("BNBUSDT", dec!(600)),
            SymbolPrice::new("XRPUSDT", dec!(0.6)),
        ];

        let result = filter_candidates(&prices, "USDT", &denylist());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].symbol, "XRPUSDT");
    }

    #[test]
    fn test_zero_price_excluded() {
        // 가격이 0인 항목은 제외된다
        let prices = vec![
            SymbolPrice::new("ADAUSDT", Decimal::ZERO),
            SymbolPrice::new("XRPUSDT", dec!(0.6)),
        ];

        let result = filter_candidates(&prices, "USDT", &denylist());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].symbol, "XRPUSDT");
    }

    #[test]
    fn test_order_preserved() {
        let prices = vec![
            SymbolPrice::new("SOLUSDT", dec!(150)),
            SymbolPrice::new("BTCUSDT", dec!(50000)),
            SymbolPrice::new("ADAUSDT", dec!(0.5)),
            SymbolPrice::new("XRPUSDT", dec!(0.6)),
        ];

        let result = filter_candidates(&prices, "USDT", &denylist());
        let symbols: Vec<&str> = result.iter().map(|p| p.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["SOLUSDT", "ADAUSDT", "XRPUSDT"]);
    }

    #[test]
    fn test_empty_input() {
        let result = filter_candidates(&[], "USDT", &denylist());
        assert!(result.is_empty());
    }
}
