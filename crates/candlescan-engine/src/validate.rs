//! 후속 캔들 검증기.
//!
//! 기준 캔들 이후의 모든 캔들이 기준 캔들에서 파생된 가격 밴드 안에
//! 머무는지 검증합니다. 강한 상승 뒤 절반 이상 되돌리지도, 기준 종가를
//! 의미 있게 돌파하지도 않는 횡보를 가려냅니다.

use candlescan_core::{Candle, ReferenceCandle};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// 후속 캔들 종가의 하한 비율 (기준 종가 대비).
pub const CLOSE_FLOOR_RATIO: Decimal = dec!(0.8);

/// 기준 캔들 이후의 캔들을 검증합니다.
///
/// `mid = (기준 시가 + 기준 종가) / 2`로 두고, 기준 캔들 바로 뒤부터
/// 시리즈 끝까지 모든 캔들이 다음을 만족해야 합니다:
/// - 시가 ∈ [mid, 기준 종가]
/// - 종가 ∈ [mid, 기준 종가]
/// - 종가 ≥ `CLOSE_FLOOR_RATIO` × 기준 종가
///
/// 하나라도 위반하면 즉시 `false`를 반환합니다. 기준 캔들이 시리즈의
/// 마지막 캔들이면 검사할 캔들이 없으므로 `true`입니다.
///
/// 전제 조건: `reference.index < series.len()`.
pub fn validate_follow_on(series: &[Candle], reference: &ReferenceCandle) -> bool {
    let mid = reference.body_midpoint();
    let close_floor = CLOSE_FLOOR_RATIO * reference.close;

    for candle in &series[reference.index + 1..] {
        let open_in_band = candle.open >= mid && candle.open <= reference.close;
        let close_in_band = candle.close >= mid && candle.close <= reference.close;

        if !(open_in_band && close_in_band && candle.close >= close_floor) {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use rust_decimal_macros::dec;

    fn series_from(bodies: &[(Decimal, Decimal)]) -> Vec<Candle> {
        let start = Utc::now();
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

    fn reference_100_120(series: &[Candle]) -> ReferenceCandle {
        ReferenceCandle::from_candle(&series[0], 0)
    }

    #[test]
    fn test_all_follow_on_in_band() {
        // 기준: 100 → 120, mid = 110
        let series = series_from(&[
            (dec!(100), dec!(120)),
            (dec!(115), dec!(118)),
            (dec!(112), dec!(110)),
            (dec!(110), dec!(120)),
        ]);
        let reference = reference_100_120(&series);

        assert!(validate_follow_on(&series, &reference));
    }

    #[test]
    fn test_open_below_midpoint_fails() {
        // mid = 110, 후속 시가 108은 밴드 아래
        let series = series_from(&[(dec!(100), dec!(120)), (dec!(108), dec!(115))]);
        let reference = reference_100_120(&series);

        assert!(!validate_follow_on(&series, &reference));
    }

    #[test]
    fn test_close_above_reference_close_fails() {
        // 기준 종가 120을 넘는 돌파는 실패
        let series = series_from(&[(dec!(100), dec!(120)), (dec!(115), dec!(121))]);
        let reference = reference_100_120(&series);

        assert!(!validate_follow_on(&series, &reference));
    }

    #[test]
    fn test_close_below_floor_fails() {
        // 기준 종가 120의 80%는 96, 종가 95는 하한 아래
        let series = series_from(&[(dec!(100), dec!(120)), (dec!(110), dec!(95))]);
        let reference = reference_100_120(&series);

        assert!(!validate_follow_on(&series, &reference));
    }

    #[test]
    fn test_band_boundaries_inclusive() {
        // mid와 기준 종가 자체는 허용된다
        let series = series_from(&[
            (dec!(100), dec!(120)),
            (dec!(110), dec!(110)),
            (dec!(120), dec!(120)),
        ]);
        let reference = reference_100_120(&series);

        assert!(validate_follow_on(&series, &reference));
    }

    #[test]
    fn test_vacuous_when_reference_is_last() {
        // 기준 캔들이 마지막이면 검사할 캔들이 없다
        let series = series_from(&[(dec!(100), dec!(120))]);
        let reference = reference_100_120(&series);

        assert!(validate_follow_on(&series, &reference));
    }

    #[test]
    fn test_violation_after_valid_candles() {
        // 중간까지 유효해도 하나라도 위반하면 실패
        let series = series_from(&[
            (dec!(100), dec!(120)),
            (dec!(115), dec!(118)),
            (dec!(116), dec!(117)),
            (dec!(117), dec!(125)),
        ]);
        let reference = reference_100_120(&series);

        assert!(!validate_follow_on(&series, &reference));
    }
}
